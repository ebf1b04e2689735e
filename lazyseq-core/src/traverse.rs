use std::iter::FusedIterator;

use crate::value::Value;

/// Access to the children of a tree node.
///
/// Traversals take this capability from the caller instead of looking
/// for a "children" field at runtime.
pub trait HasChildren: Sized {
    fn children(&self) -> &[Self];
}

// A list's elements are its children; everything else is a leaf.
impl HasChildren for Value {
    fn children(&self) -> &[Value] {
        match self {
            Value::List(values) => &values[..],
            _ => &[],
        }
    }
}

/// Pre-order depth-first traversal, yielding each node with its depth.
pub fn depth_first<T: HasChildren>(root: &T) -> DepthFirst<'_, T> {
    DepthFirst {
        stack: vec![(0, root)],
    }
}

/// See [`depth_first`].
pub struct DepthFirst<'a, T> {
    stack: Vec<(usize, &'a T)>,
}

impl<'a, T: HasChildren> Iterator for DepthFirst<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children().iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

impl<T: HasChildren> FusedIterator for DepthFirst<'_, T> {}
