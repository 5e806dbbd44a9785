use crate::arena::Handle;
use crate::error::{Error, Result};
use crate::treap::node::{size_of, Nodes};
use crate::treap::tree::{self, Tree};

/// Concatenates two sequences. Keys are never compared.
pub fn merge<T>(nodes: &mut Nodes<T>, l_tree: Tree, r_tree: Tree) -> Tree {
    tree::merge(nodes, l_tree, r_tree)
}

/// Splits off the first `index` elements. An `index` past the end leaves the right tree empty.
pub fn split<T>(nodes: &mut Nodes<T>, tree: Tree, index: usize) -> (Tree, Tree) {
    let mut remaining = index;
    tree::split_with(nodes, tree, |nodes, handle| {
        let left_size = size_of(nodes, nodes[handle].left);
        if left_size < remaining {
            remaining -= left_size + 1;
            true
        } else {
            false
        }
    })
}

pub fn insert<T>(nodes: &mut Nodes<T>, tree: Tree, index: usize, new_node: Handle) -> Result<Tree> {
    let len = size_of(nodes, tree);
    if index > len {
        return Err(Error::IndexOutOfBounds { index, len });
    }
    let (l_tree, r_tree) = split(nodes, tree, index);
    let l_tree = merge(nodes, l_tree, Some(new_node));
    Ok(merge(nodes, l_tree, r_tree))
}

/// Detaches the element at `index`. Bounds are checked before any relinking, so an error leaves
/// `tree` as it was.
pub fn remove<T>(nodes: &mut Nodes<T>, tree: Tree, index: usize) -> Result<(Tree, Handle)> {
    let len = size_of(nodes, tree);
    if index >= len {
        return Err(Error::IndexOutOfBounds { index, len });
    }
    let (l_tree, r_tree) = split(nodes, tree, index);
    let (middle, r_tree) = split(nodes, r_tree, 1);
    let removed = middle.ok_or_else(|| {
        Error::InvariantViolated(format!("no node at checked position {}", index))
    })?;
    Ok((merge(nodes, l_tree, r_tree), removed))
}

pub fn get<T>(nodes: &Nodes<T>, tree: Tree, index: usize) -> Option<Handle> {
    let mut remaining = index;
    let mut curr = tree;
    while let Some(handle) = curr {
        let left_size = size_of(nodes, nodes[handle].left);
        if remaining < left_size {
            curr = nodes[handle].left;
        } else if remaining == left_size {
            return Some(handle);
        } else {
            remaining -= left_size + 1;
            curr = nodes[handle].right;
        }
    }
    None
}

/// Moves the first `shift % len` elements to the back.
pub fn rotate_left<T>(nodes: &mut Nodes<T>, tree: Tree, shift: usize) -> Tree {
    let len = size_of(nodes, tree);
    if len == 0 {
        return tree;
    }
    let (front, back) = split(nodes, tree, shift % len);
    merge(nodes, back, front)
}

/// Splits out the positions `start..end`, hands them to `query`, and stitches the sequence back
/// together. Bounds are clamped to the sequence length.
pub fn with_range<T, F, U>(
    nodes: &mut Nodes<T>,
    tree: Tree,
    start: usize,
    end: usize,
    query: F,
) -> (Tree, U)
where
    F: FnOnce(&Nodes<T>, Tree) -> U,
{
    let len = size_of(nodes, tree);
    let end = end.min(len);
    let start = start.min(end);
    let (l_tree, rest) = split(nodes, tree, start);
    let (middle, r_tree) = split(nodes, rest, end - start);
    let ret = query(nodes, middle);
    let l_tree = merge(nodes, l_tree, middle);
    (merge(nodes, l_tree, r_tree), ret)
}
