use crate::arena::Handle;
use crate::error::{Error, Result};
use crate::treap::node::{attach, detach_root, refresh_size, size_of, Node, Nodes, Side};
use crate::treap::{implicit_tree, navigation};
use log::trace;

pub type Tree = Option<Handle>;

fn link<T>(nodes: &mut Nodes<T>, root: &mut Tree, hook: Option<(Handle, Side)>, child: Tree) {
    match hook {
        Some((parent, side)) => attach(nodes, parent, side, child),
        None => *root = detach_root(nodes, child),
    }
}

/// Joins two trees whose in-order sequences are `l_tree` followed by `r_tree`.
///
/// The walk descends the right spine of `l_tree` and the left spine of `r_tree`, always taking the
/// root with the higher priority (`r_tree` wins ties). Sizes along the rewritten path are refreshed
/// bottom-up once the walk ends.
pub fn merge<T>(nodes: &mut Nodes<T>, l_tree: Tree, r_tree: Tree) -> Tree {
    let (mut l_tree, mut r_tree) = (l_tree, r_tree);
    let mut root = None;
    let mut hook = None;
    let mut path = Vec::new();

    loop {
        let (winner, side) = match (l_tree, r_tree) {
            (Some(l_node), Some(r_node)) => {
                if nodes[l_node].priority > nodes[r_node].priority {
                    l_tree = nodes[l_node].right;
                    (l_node, Side::Right)
                } else {
                    r_tree = nodes[r_node].left;
                    (r_node, Side::Left)
                }
            },
            (rest, None) | (None, rest) => {
                link(nodes, &mut root, hook, rest);
                break;
            },
        };
        link(nodes, &mut root, hook, Some(winner));
        hook = Some((winner, side));
        path.push(winner);
    }

    for &handle in path.iter().rev() {
        refresh_size(nodes, handle);
    }
    trace!("merge rewrote {} nodes", path.len());
    root
}

/// Partitions `tree` into two trees. `goes_left` is asked once per node on the descent path, in
/// top-down order, whether that node (together with its left subtree) belongs to the left output.
pub fn split_with<T, F>(nodes: &mut Nodes<T>, tree: Tree, mut goes_left: F) -> (Tree, Tree)
where
    F: FnMut(&Nodes<T>, Handle) -> bool,
{
    let (mut l_root, mut r_root) = (None, None);
    let (mut l_hook, mut r_hook): (Option<Handle>, Option<Handle>) = (None, None);
    let mut path = Vec::new();
    let mut curr = tree;

    while let Some(handle) = curr {
        path.push(handle);
        if goes_left(nodes, handle) {
            curr = nodes[handle].right;
            link(nodes, &mut l_root, l_hook.map(|hook| (hook, Side::Right)), Some(handle));
            l_hook = Some(handle);
        } else {
            curr = nodes[handle].left;
            link(nodes, &mut r_root, r_hook.map(|hook| (hook, Side::Left)), Some(handle));
            r_hook = Some(handle);
        }
    }

    if let Some(handle) = l_hook {
        nodes[handle].right = None;
    }
    if let Some(handle) = r_hook {
        nodes[handle].left = None;
    }
    for &handle in path.iter().rev() {
        refresh_size(nodes, handle);
    }
    trace!("split rewrote {} nodes", path.len());
    (l_root, r_root)
}

/// Splits `tree` into keys strictly less than `key` and keys greater than or equal to `key`.
pub fn split<T: Ord>(nodes: &mut Nodes<T>, tree: Tree, key: &T) -> (Tree, Tree) {
    split_with(nodes, tree, |nodes, handle| nodes[handle].key < *key)
}

/// Inserts a detached singleton. Equal keys are kept and always end up in right subtrees, so among
/// equal keys the higher priorities come first in order.
///
/// The walk descends while the current node outranks `new_node`, then splits the subtree it
/// stopped at around the new key and hangs both halves below `new_node`.
pub fn insert<T: Ord>(nodes: &mut Nodes<T>, tree: Tree, new_node: Handle) -> Tree {
    let mut root = tree;
    let mut hook = None;
    let mut path = Vec::new();
    let mut curr = tree;

    while let Some(handle) = curr {
        if nodes[handle].priority < nodes[new_node].priority {
            break;
        }
        path.push(handle);
        if nodes[new_node].key < nodes[handle].key {
            curr = nodes[handle].left;
            hook = Some((handle, Side::Left));
        } else {
            curr = nodes[handle].right;
            hook = Some((handle, Side::Right));
        }
    }

    let (l_tree, r_tree) =
        split_with(nodes, curr, |nodes, handle| nodes[handle].key < nodes[new_node].key);
    attach(nodes, new_node, Side::Left, l_tree);
    attach(nodes, new_node, Side::Right, r_tree);
    refresh_size(nodes, new_node);
    link(nodes, &mut root, hook, Some(new_node));

    for &handle in path.iter().rev() {
        refresh_size(nodes, handle);
    }
    trace!("insert descended {} nodes", path.len());
    root
}

/// Removes one node whose key equals `key` and returns it, detached.
pub fn remove<T: Ord>(nodes: &mut Nodes<T>, tree: Tree, key: &T) -> (Tree, Option<Handle>) {
    let (l_tree, r_tree) = split(nodes, tree, key);
    let found = navigation::min(nodes, r_tree).map_or(false, |handle| nodes[handle].key == *key);
    if !found {
        return (merge(nodes, l_tree, r_tree), None);
    }
    let (first, rest) = implicit_tree::split(nodes, r_tree, 1);
    (merge(nodes, l_tree, rest), first)
}

pub fn contains<T: Ord>(nodes: &Nodes<T>, tree: Tree, key: &T) -> bool {
    let mut curr = tree;
    while let Some(handle) = curr {
        let node = &nodes[handle];
        if *key < node.key {
            curr = node.left;
        } else if node.key < *key {
            curr = node.right;
        } else {
            return true;
        }
    }
    false
}

/// Returns the node holding the largest key of the subtree by scanning every node.
pub fn range_max<T: Ord>(nodes: &Nodes<T>, tree: Tree) -> Option<Handle> {
    let mut best: Option<Handle> = None;
    let mut stack: Vec<Handle> = tree.into_iter().collect();
    while let Some(handle) = stack.pop() {
        let node = &nodes[handle];
        if best.map_or(true, |best| nodes[best].key < node.key) {
            best = Some(handle);
        }
        stack.extend(node.left);
        stack.extend(node.right);
    }
    best
}

/// Releases every node of `tree` and returns their keys in in-order sequence.
pub fn drain<T>(nodes: &mut Nodes<T>, tree: Tree) -> Vec<T> {
    let mut ret = Vec::with_capacity(size_of(nodes, tree));
    let mut stack = Vec::new();
    let mut curr = tree;
    loop {
        while let Some(handle) = curr {
            curr = nodes[handle].left;
            stack.push(handle);
        }
        match stack.pop() {
            Some(handle) => {
                let Node { key, right, .. } = nodes.release(handle);
                curr = right;
                ret.push(key);
            },
            None => break,
        }
    }
    ret
}

/// Checks the heap, size, and parent invariants of `tree`.
pub fn validate_shape<T>(nodes: &Nodes<T>, tree: Tree) -> Result<()> {
    if let Some(root) = tree {
        if nodes[root].parent.is_some() {
            return Err(Error::InvariantViolated(String::from("tree root has a parent")));
        }
    }
    let mut stack: Vec<Handle> = tree.into_iter().collect();
    while let Some(handle) = stack.pop() {
        let node = &nodes[handle];
        let expected = 1 + size_of(nodes, node.left) + size_of(nodes, node.right);
        if node.size != expected {
            return Err(Error::InvariantViolated(format!(
                "node stores size {} but its subtree holds {} nodes",
                node.size, expected,
            )));
        }
        for child in node.left.into_iter().chain(node.right) {
            let child_node = &nodes[child];
            if child_node.parent != Some(handle) {
                return Err(Error::InvariantViolated(String::from(
                    "child does not point back at its parent",
                )));
            }
            if child_node.priority > node.priority {
                return Err(Error::InvariantViolated(format!(
                    "child priority {} exceeds parent priority {}",
                    child_node.priority, node.priority,
                )));
            }
            stack.push(child);
        }
    }
    Ok(())
}

/// Checks that every left subtree holds smaller keys and every right subtree holds keys that are
/// not smaller than their ancestor's.
pub fn validate_order<T: Ord>(nodes: &Nodes<T>, tree: Tree) -> Result<()> {
    // Each entry carries an inclusive lower bound and an exclusive upper bound.
    let mut stack: Vec<(Handle, Option<&T>, Option<&T>)> =
        tree.into_iter().map(|root| (root, None, None)).collect();
    while let Some((handle, lower, upper)) = stack.pop() {
        let node = &nodes[handle];
        let above_lower = lower.map_or(true, |lower| *lower <= node.key);
        let below_upper = upper.map_or(true, |upper| node.key < *upper);
        if !above_lower || !below_upper {
            return Err(Error::InvariantViolated(String::from(
                "key is out of order with respect to an ancestor",
            )));
        }
        if let Some(left) = node.left {
            stack.push((left, lower, Some(&node.key)));
        }
        if let Some(right) = node.right {
            stack.push((right, Some(&node.key), upper));
        }
    }
    Ok(())
}
