use serde_json::Number;
use std::cell::{Ref, RefCell};
use std::fmt::{self, Debug, Display, Formatter};
use std::rc::Rc;

/// A live value as seen by the inspector.
///
/// Containers are shared, interiorly mutable handles, so a graph may refer
/// back to its own ancestors. Containers have identity (the allocation they
/// point at); scalars are compared by value.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Number(Number),
    String(String),
    Keyword(String),
    Vector(Vector),
    Map(Map),
    Tagged(Tagged),
}

impl Value {
    pub fn new_vector() -> Value {
        Value::Vector(Vector::default())
    }

    pub fn with_vector<I>(values: I) -> Value
    where
        I: IntoIterator<Item = Value>,
    {
        Value::Vector(Vector::from_vec(values.into_iter().collect()))
    }

    pub fn new_map() -> Value {
        Value::Map(Map::default())
    }

    pub fn with_map<K, I>(entries: I) -> Value
    where
        K: Into<Value>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let map = Map::default();
        for (k, v) in entries {
            map.insert(k.into(), v);
        }
        Value::Map(map)
    }

    pub fn keyword(name: impl Into<String>) -> Value {
        Value::Keyword(name.into())
    }

    pub fn tagged(tag: impl Into<String>, value: Value) -> Value {
        Value::Tagged(Tagged::new(tag, value))
    }

    pub fn ty(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Keyword(_) => "Keyword",
            Value::Vector(_) => "Vector",
            Value::Map(_) => "Map",
            Value::Tagged(_) => "Tagged",
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Value::Vector(_) | Value::Map(_))
    }

    pub fn as_vector(&self) -> Option<&Vector> {
        match self {
            Value::Vector(vector) => Some(vector),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(string) => Some(string),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(number) => number.as_i64(),
            _ => None,
        }
    }

    /// Number of direct children, `0` for anything that is not a container.
    pub fn len(&self) -> usize {
        match self {
            Value::Vector(vector) => vector.len(),
            Value::Map(map) => map.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Address of the backing allocation for values that have one.
    pub fn id(&self) -> Option<usize> {
        match self {
            Value::Vector(vector) => Some(vector.id()),
            Value::Map(map) => Some(map.id()),
            Value::Tagged(tagged) => Some(tagged.id()),
            _ => None,
        }
    }

    /// Reference identity: containers are identical only when they share an
    /// allocation, scalars when they are equal.
    pub fn is_identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Vector(a), Value::Vector(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
            (Value::Tagged(a), Value::Tagged(b)) => a.ptr_eq(b),
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Keyword(a), Value::Keyword(b)) => a == b,
            _ => false,
        }
    }

    /// Snapshot of the direct `(key, child)` pairs in iteration order.
    ///
    /// Vectors yield their indices as numeric keys. Scalars and tagged values
    /// have no entries.
    pub fn entries(&self) -> Vec<(Value, Value)> {
        match self {
            Value::Vector(vector) => vector
                .borrow()
                .iter()
                .enumerate()
                .map(|(index, v)| (Value::Number(Number::from(index as u64)), v.clone()))
                .collect(),
            Value::Map(map) => map.borrow().clone(),
            _ => vec![],
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let markup = crate::renderer::Renderer::default()
            .header(self, None)
            .map_err(|_| fmt::Error)?;
        write!(f, "{markup}")
    }
}

#[derive(Clone, Default)]
pub struct Vector(Rc<RefCell<Vec<Value>>>);

impl Vector {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_vec(values: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(values)))
    }

    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    /// Replaces the element at `index`, returning `false` when out of bounds.
    pub fn set(&self, index: usize, value: Value) -> bool {
        match self.0.borrow_mut().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    pub fn ptr_eq(&self, other: &Vector) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl Debug for Vector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("id", &format_args!("{:#x}", self.id()))
            .field("len", &self.len())
            .finish()
    }
}

/// Insertion ordered map whose keys may be any value.
#[derive(Clone, Default)]
pub struct Map(Rc<RefCell<Vec<(Value, Value)>>>);

impl Map {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_entries(entries: Vec<(Value, Value)>) -> Self {
        let map = Map::default();
        for (k, v) in entries {
            map.insert(k, v);
        }
        map
    }

    /// Inserts or replaces the entry whose key is identical to `key`.
    pub fn insert(&self, key: Value, value: Value) {
        let mut entries = self.0.borrow_mut();
        match entries.iter_mut().find(|(k, _)| k.is_identical(&key)) {
            Some((_, slot)) => *slot = value,
            None => entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &Value) -> Option<Value> {
        self.0
            .borrow()
            .iter()
            .find(|(k, _)| k.is_identical(key))
            .map(|(_, v)| v.clone())
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn borrow(&self) -> Ref<'_, Vec<(Value, Value)>> {
        self.0.borrow()
    }

    pub fn ptr_eq(&self, other: &Map) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl Debug for Map {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map")
            .field("id", &format_args!("{:#x}", self.id()))
            .field("len", &self.len())
            .finish()
    }
}

struct TaggedInner {
    tag: String,
    value: Value,
}

/// A value printed through a tag, like `#uuid "..."`.
#[derive(Clone)]
pub struct Tagged(Rc<TaggedInner>);

impl Tagged {
    pub fn new(tag: impl Into<String>, value: Value) -> Self {
        Self(Rc::new(TaggedInner {
            tag: tag.into(),
            value,
        }))
    }

    pub fn tag(&self) -> &str {
        &self.0.tag
    }

    pub fn value(&self) -> &Value {
        &self.0.value
    }

    pub fn ptr_eq(&self, other: &Tagged) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl Debug for Tagged {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tagged")
            .field("tag", &self.tag())
            .field("value", &self.value().ty())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_of_containers() {
        let a = Value::new_vector();
        let b = Value::new_vector();
        assert!(a.is_identical(&a.clone()));
        assert!(!a.is_identical(&b));
        assert!(Value::from(20).is_identical(&Value::from(20)));
        assert!(!Value::from("x").is_identical(&Value::keyword("x")));
    }

    #[test]
    fn test_map_keeps_insertion_order() {
        let map = Map::new();
        map.insert("b".into(), 1.into());
        map.insert("a".into(), 2.into());
        map.insert("b".into(), 3.into());
        let keys: Vec<_> = map
            .borrow()
            .iter()
            .map(|(k, _)| k.as_str().map(str::to_owned))
            .collect();
        assert_eq!(keys, vec![Some("b".to_string()), Some("a".to_string())]);
        assert_eq!(map.get(&"b".into()).and_then(|v| v.as_i64()), Some(3));
    }

    #[test]
    fn test_entries_of_vector_are_indexed() {
        let vector = Value::with_vector([10.into(), 20.into()]);
        let entries = vector.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].0.as_i64(), Some(1));
        assert_eq!(entries[1].1.as_i64(), Some(20));
        assert!(Value::from(1).entries().is_empty());
    }

    #[test]
    fn test_cyclic_vector_debug_does_not_recurse() {
        let vector = Vector::new();
        vector.push(Value::Vector(vector.clone()));
        let debug = format!("{:?}", Value::Vector(vector.clone()));
        assert!(debug.contains("len: 1"));
        assert!(vector.get(0).is_some_and(|v| v.is_identical(&Value::Vector(vector.clone()))));
    }
}
