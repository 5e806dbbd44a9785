//! Parent-linked traversal. None of these functions allocate or use a stack; they follow `left`,
//! `right`, and `parent` handles only. Starting from an absent node always yields `None`.

use crate::arena::Handle;
use crate::treap::node::Nodes;

pub fn min<T>(nodes: &Nodes<T>, node: Option<Handle>) -> Option<Handle> {
    let mut curr = node?;
    while let Some(left) = nodes[curr].left {
        curr = left;
    }
    Some(curr)
}

pub fn max<T>(nodes: &Nodes<T>, node: Option<Handle>) -> Option<Handle> {
    let mut curr = node?;
    while let Some(right) = nodes[curr].right {
        curr = right;
    }
    Some(curr)
}

/// Returns the next node in in-order sequence, or `None` if `node` is the last one.
pub fn successor<T>(nodes: &Nodes<T>, node: Option<Handle>) -> Option<Handle> {
    let mut curr = node?;
    if let Some(right) = nodes[curr].right {
        return min(nodes, Some(right));
    }
    while let Some(parent) = nodes[curr].parent {
        if nodes[parent].left == Some(curr) {
            return Some(parent);
        }
        curr = parent;
    }
    None
}

/// Returns the previous node in in-order sequence, or `None` if `node` is the first one.
pub fn predecessor<T>(nodes: &Nodes<T>, node: Option<Handle>) -> Option<Handle> {
    let mut curr = node?;
    if let Some(left) = nodes[curr].left {
        return max(nodes, Some(left));
    }
    while let Some(parent) = nodes[curr].parent {
        if nodes[parent].right == Some(curr) {
            return Some(parent);
        }
        curr = parent;
    }
    None
}
