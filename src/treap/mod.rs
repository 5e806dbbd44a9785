//! Probabilistic binary search tree where each node also maintains the heap invariant.
//!
//! Nodes live in an arena owned by a `Forest`. Each node records the size of its subtree and a
//! handle to its parent, so the same trees support keyed merge and split, positional (implicit
//! key) merge and split, and in-order navigation without an explicit stack.

mod cursor;
mod forest;
mod implicit_tree;
mod navigation;
mod node;
mod tree;

pub use self::cursor::{Cursor, Iter};
pub use self::forest::{Forest, Treap};
