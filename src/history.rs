use crate::value::Value;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

struct Node {
    object: Value,
    next: History,
}

/// Objects visited on the way from the traversal root to the current node,
/// most recent first.
///
/// The list is persistent: [`History::push`] shares the existing tail, so a
/// captured history is never affected by later descents.
#[derive(Clone, Default)]
pub struct History(Option<Rc<Node>>);

impl History {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&self, object: Value) -> History {
        History(Some(Rc::new(Node {
            object,
            next: self.clone(),
        })))
    }

    /// History without its most recent entry.
    pub fn pop(&self) -> History {
        match &self.0 {
            Some(node) => node.next.clone(),
            None => History::new(),
        }
    }

    /// The most recently visited object, i.e. the parent of whatever is
    /// about to be rendered. `None` at the traversal root.
    pub fn parent(&self) -> Option<&Value> {
        self.0.as_ref().map(|node| &node.object)
    }

    /// `true` when `object` is identical to any ancestor, not only the
    /// immediate parent.
    pub fn is_circular(&self, object: &Value) -> bool {
        self.iter().any(|visited| visited.is_identical(object))
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.0.as_deref(),
        }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl Debug for History {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter().map(Value::ty)).finish()
    }
}

impl Drop for History {
    // Unlink iteratively so long chains do not overflow the stack.
    fn drop(&mut self) {
        let mut next = self.0.take();
        while let Some(node) = next {
            match Rc::try_unwrap(node) {
                Ok(mut node) => next = node.next.0.take(),
                Err(_) => break,
            }
        }
    }
}

pub struct Iter<'a> {
    next: Option<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.0.as_deref();
        Some(&node.object)
    }
}

#[cfg(test)]
mod tests {
    use super::History;
    use crate::value::Value;

    #[test]
    fn test_push_is_most_recent_first() {
        let a = Value::new_vector();
        let b = Value::new_map();
        let history = History::new().push(a.clone()).push(b.clone());
        assert!(history.parent().is_some_and(|p| p.is_identical(&b)));
        assert_eq!(history.len(), 2);
        let order: Vec<_> = history.iter().map(Value::ty).collect();
        assert_eq!(order, vec!["Map", "Vector"]);
    }

    #[test]
    fn test_circular_until_popped() {
        let a = Value::new_vector();
        let pushed = History::new().push(a.clone());
        assert!(pushed.is_circular(&a));
        assert!(!pushed.pop().is_circular(&a));
    }

    #[test]
    fn test_circular_checks_every_ancestor() {
        let a = Value::new_vector();
        let history = History::new()
            .push(a.clone())
            .push(Value::new_map())
            .push(Value::new_map());
        assert!(history.is_circular(&a));
    }

    #[test]
    fn test_value_equal_objects_are_not_circular() {
        let a = Value::new_vector();
        let twin = Value::new_vector();
        let history = History::new().push(a);
        assert!(!history.is_circular(&twin));
    }

    #[test]
    fn test_push_does_not_change_original() {
        let root = History::new();
        let _child = root.push(Value::new_vector());
        assert!(root.is_empty());
        assert!(root.parent().is_none());
    }
}
