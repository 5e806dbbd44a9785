use crate::arena::Handle;
use crate::error::{Error, Result};
use crate::treap::navigation;
use crate::treap::node::Nodes;

/// A position in the in-order sequence of a tree.
///
/// A cursor either references a node or is terminal. Two cursors are equal if they reference the
/// same node or are both terminal. Cursors do not borrow the forest, so a cursor kept across a
/// `destroy` or `remove` may reference a released node; such a cursor reports
/// `Error::InvalidCursor`, even after the node's slot has been handed to a new node.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Cursor {
    node: Option<Handle>,
}

impl Cursor {
    pub(crate) fn new(node: Option<Handle>) -> Self {
        Cursor { node }
    }

    /// Returns the terminal cursor.
    pub fn end() -> Self {
        Cursor { node: None }
    }

    /// Returns `true` if the cursor is past the last node.
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    pub(crate) fn node(&self) -> Option<Handle> {
        self.node
    }
}

pub fn key<T>(nodes: &Nodes<T>, cursor: Cursor) -> Result<&T> {
    let handle = cursor.node.ok_or(Error::TerminalCursor)?;
    nodes
        .get(handle)
        .map(|node| &node.key)
        .ok_or(Error::InvalidCursor)
}

pub fn advance<T>(nodes: &Nodes<T>, cursor: &mut Cursor) -> Result<()> {
    let handle = cursor.node.ok_or(Error::TerminalCursor)?;
    if !nodes.contains(handle) {
        return Err(Error::InvalidCursor);
    }
    cursor.node = navigation::successor(nodes, Some(handle));
    Ok(())
}

/// An iterator over the keys of a tree in ascending (or positional) order.
///
/// The iterator walks successor links and never mutates the tree.
pub struct Iter<'a, T> {
    nodes: &'a Nodes<T>,
    current: Option<Handle>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(nodes: &'a Nodes<T>, root: Option<Handle>, len: usize) -> Self {
        Iter {
            nodes,
            current: navigation::min(nodes, root),
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.current?;
        self.current = navigation::successor(self.nodes, Some(handle));
        self.remaining -= 1;
        Some(&self.nodes[handle].key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> where T: 'a {}
