use crate::history::History;
use crate::value::Value;
use derive_more::{Constructor, Deref};
use itertools::Itertools;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// One step of a breadcrumb: the key or index leading from a parent to a
/// child.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(i64),
    /// A key that has no display-safe form.
    Unknown,
}

impl PathSegment {
    pub const UNKNOWN_MARKER: &'static str = "?";
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{key}"),
            PathSegment::Index(index) => write!(f, "{index}"),
            PathSegment::Unknown => write!(f, "{}", Self::UNKNOWN_MARKER),
        }
    }
}

impl Serialize for PathSegment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PathSegment::Key(key) => serializer.serialize_str(key),
            PathSegment::Index(index) => serializer.serialize_i64(*index),
            PathSegment::Unknown => serializer.serialize_str(Self::UNKNOWN_MARKER),
        }
    }
}

/// Route from the traversal root to the node being rendered.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, Deref, Constructor, Serialize)]
#[serde(transparent)]
pub struct Breadcrumb(Vec<PathSegment>);

impl Breadcrumb {
    pub fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    pub fn into_inner(self) -> Vec<PathSegment> {
        self.0
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Display for Breadcrumb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("."))
    }
}

impl FromIterator<PathSegment> for Breadcrumb {
    fn from_iter<T: IntoIterator<Item = PathSegment>>(iter: T) -> Self {
        Breadcrumb(iter.into_iter().collect())
    }
}

/// Classifies a key into its display-safe segment.
///
/// Strings pass through, keywords keep their leading colon, integral numbers
/// become indices. Anything else is [`PathSegment::Unknown`].
pub fn segment_for(key: &Value) -> PathSegment {
    match key {
        Value::String(string) => PathSegment::Key(string.clone()),
        Value::Keyword(name) => PathSegment::Key(format!(":{name}")),
        Value::Number(number) => match number.as_i64() {
            Some(index) => PathSegment::Index(index),
            None => PathSegment::Key(number.to_string()),
        },
        _ => PathSegment::Unknown,
    }
}

/// Finds the key under which `parent` holds `child`.
///
/// Children are matched by identity. When the same child sits under several
/// keys the first one in iteration order wins.
pub fn find_segment(parent: &Value, child: &Value) -> Option<PathSegment> {
    match parent {
        Value::Map(map) => map
            .borrow()
            .iter()
            .find(|(_, v)| v.is_identical(child))
            .map(|(k, _)| segment_for(k)),
        Value::Vector(vector) => vector
            .borrow()
            .iter()
            .position(|v| v.is_identical(child))
            .map(|index| PathSegment::Index(index as i64)),
        _ => None,
    }
}

/// Appends the segment leading from the current parent (first entry of
/// `history`) to `object`.
///
/// A step with no matching segment leaves the breadcrumb as it was.
pub fn extend_path(
    path_info: Option<&Breadcrumb>,
    history: &History,
    object: &Value,
) -> Option<Breadcrumb> {
    let segment = history
        .parent()
        .and_then(|parent| find_segment(parent, object));
    match segment {
        Some(segment) => {
            let mut extended = path_info.cloned().unwrap_or_default();
            extended.push(segment);
            Some(extended)
        }
        None => path_info.cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::from("name"), PathSegment::Key("name".to_string()))]
    #[case(Value::keyword("id"), PathSegment::Key(":id".to_string()))]
    #[case(Value::from(7), PathSegment::Index(7))]
    #[case(Value::from(1.5), PathSegment::Key("1.5".to_string()))]
    #[case(Value::Null, PathSegment::Unknown)]
    #[case(Value::new_vector(), PathSegment::Unknown)]
    fn test_segment_for(#[case] key: Value, #[case] expected: PathSegment) {
        assert_eq!(segment_for(&key), expected);
    }

    #[test]
    fn test_find_segment_in_vector() {
        let parent = Value::with_vector([10.into(), 20.into(), 30.into()]);
        assert_eq!(find_segment(&parent, &20.into()), Some(PathSegment::Index(1)));
        assert_eq!(find_segment(&parent, &40.into()), None);
    }

    #[test]
    fn test_find_segment_uses_identity() {
        let child = Value::new_vector();
        let twin = Value::new_vector();
        let parent = Value::with_map([("a", twin.clone()), ("b", child.clone())]);
        assert_eq!(
            find_segment(&parent, &child),
            Some(PathSegment::Key("b".to_string()))
        );
    }

    #[test]
    fn test_find_segment_first_match_wins() {
        let shared = Value::new_map();
        let parent = Value::with_map([("first", shared.clone()), ("second", shared.clone())]);
        assert_eq!(
            find_segment(&parent, &shared),
            Some(PathSegment::Key("first".to_string()))
        );
    }

    #[test]
    fn test_find_segment_in_scalar_parent() {
        assert_eq!(find_segment(&Value::from(1), &Value::from(1)), None);
    }

    #[test]
    fn test_extend_path_at_root_adds_nothing() {
        let root = Value::new_vector();
        assert_eq!(extend_path(None, &History::new(), &root), None);
    }

    #[test]
    fn test_extend_path_skips_unmatched_step() {
        let a = Value::new_vector();
        let b = Value::with_map([(Value::keyword("k"), a.clone())]);
        let existing = Breadcrumb::new(vec![PathSegment::Index(3)]);
        let unrelated = History::new().push(Value::new_vector());
        let unchanged = extend_path(Some(&existing), &unrelated, &a);
        assert_eq!(unchanged, Some(existing.clone()));

        let history = History::new().push(b);
        let extended = extend_path(Some(&existing), &history, &a).expect("breadcrumb");
        assert_eq!(extended.to_string(), "3.:k");
    }

    #[test]
    fn test_breadcrumb_json() -> crate::Result<()> {
        let breadcrumb: Breadcrumb = [
            PathSegment::Key("x".to_string()),
            PathSegment::Index(2),
            PathSegment::Unknown,
        ]
        .into_iter()
        .collect();
        assert_eq!(breadcrumb.to_json()?, r#"["x",2,"?"]"#);
        Ok(())
    }
}
