use crate::arena::{Arena, Handle};

/// A struct representing an internal node of a treap.
///
/// Children are owned through their handles: a node is reachable from exactly one parent slot or
/// from one `Tree`. `parent` is only a back-reference used for upward navigation.
pub struct Node<T> {
    pub key: T,
    pub priority: u32,
    pub size: usize,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
    pub parent: Option<Handle>,
}

impl<T> Node<T> {
    pub fn new(key: T, priority: u32) -> Self {
        Node {
            key,
            priority,
            size: 1,
            left: None,
            right: None,
            parent: None,
        }
    }
}

/// Which child slot of a node is being rewritten.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}

pub type Nodes<T> = Arena<Node<T>>;

pub fn size_of<T>(nodes: &Nodes<T>, node: Option<Handle>) -> usize {
    node.map_or(0, |handle| nodes[handle].size)
}

pub fn refresh_size<T>(nodes: &mut Nodes<T>, handle: Handle) {
    let (left, right) = (nodes[handle].left, nodes[handle].right);
    nodes[handle].size = 1 + size_of(nodes, left) + size_of(nodes, right);
}

/// Places `child` into the `side` slot of `parent` and points the child back at its new parent.
/// The previous occupant of the slot is overwritten, so callers must have detached it already.
pub fn attach<T>(nodes: &mut Nodes<T>, parent: Handle, side: Side, child: Option<Handle>) {
    match side {
        Side::Left => nodes[parent].left = child,
        Side::Right => nodes[parent].right = child,
    }
    if let Some(child) = child {
        nodes[child].parent = Some(parent);
    }
}

/// Marks `root` as the root of a standalone tree.
pub fn detach_root<T>(nodes: &mut Nodes<T>, root: Option<Handle>) -> Option<Handle> {
    if let Some(handle) = root {
        nodes[handle].parent = None;
    }
    root
}
