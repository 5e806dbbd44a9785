use crate::arena::Handle;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::treap::cursor::{self, Cursor, Iter};
use crate::treap::node::{size_of, Node, Nodes};
use crate::treap::{implicit_tree, navigation, tree};
use log::debug;
use rand::{Rng, XorShiftRng};

/// An owned treap living in a `Forest`.
///
/// A `Treap` is only a root handle: the nodes it reaches are stored in the forest that created it.
/// It is neither `Clone` nor `Copy`, and every restructuring operation takes it by value, so a tree
/// that has been merged or split can no longer be named. Dropping a `Treap` without passing it to
/// `Forest::destroy` leaves its nodes allocated until the forest itself is dropped.
#[derive(Debug, Eq, PartialEq)]
pub struct Treap {
    root: tree::Tree,
}

impl Treap {
    /// Returns an empty tree.
    pub fn empty() -> Self {
        Treap { root: None }
    }

    /// Returns `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn from_root(root: tree::Tree) -> Self {
        Treap { root }
    }
}

impl Default for Treap {
    fn default() -> Self {
        Self::empty()
    }
}

/// A node store for treaps.
///
/// A treap is a tree that satisfies both the binary search tree property and a heap property. Each
/// node has a key and a priority. The keys in a node's left subtree are smaller than its key and
/// the keys in its right subtree are not smaller. The priority of a node is at least the priority of
/// its children. With randomly drawn priorities the expected height of the tree is logarithmic in
/// the number of nodes.
///
/// Every node also records the size of its subtree and a back-reference to its parent, which
/// gives positional (implicit key) splits and stackless in-order navigation.
///
/// A `Forest` owns the nodes of any number of `Treap`s together with the generator used to draw
/// priorities. Keyed operations (`merge`, `split`, `insert`, ...) treat a tree as an ordered
/// multiset; implicit operations (`merge_implicit`, `split_by_size`, `insert_at`, ...) treat it as
/// a sequence and never compare keys. Trees must only be passed to the forest that created them.
///
/// # Examples
///
/// ```
/// use treap_forest::{Config, Forest};
///
/// let mut forest = Forest::with_config(Config::seeded(1));
/// let mut tree = forest.make_node(10);
/// for key in vec![20, 5, 15] {
///     forest.insert(&mut tree, key);
/// }
/// assert_eq!(forest.size(&tree), 4);
///
/// let (left, right) = forest.split(tree, &15);
/// assert_eq!(forest.iter(&left).collect::<Vec<&i32>>(), vec![&5, &10]);
/// assert_eq!(forest.iter(&right).collect::<Vec<&i32>>(), vec![&15, &20]);
///
/// let tree = forest.merge(left, right);
/// assert_eq!(forest.range_max(&tree), Some(&20));
/// ```
pub struct Forest<T, R = XorShiftRng> {
    nodes: Nodes<T>,
    rng: R,
}

impl<T> Forest<T, XorShiftRng> {
    /// Constructs a new, empty `Forest<T>` with a randomly seeded priority generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_forest::Forest;
    ///
    /// let forest: Forest<u32> = Forest::new();
    /// assert_eq!(forest.node_count(), 0);
    /// ```
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Constructs a new, empty `Forest<T>` from a `Config`.
    ///
    /// # Panics
    ///
    /// Panics if `config.chunk_size` is zero. Use `try_with_config` for configurations that come
    /// from user input.
    pub fn with_config(config: Config) -> Self {
        let rng = config.rng();
        Self::with_rng(config, rng)
    }

    /// Constructs a new, empty `Forest<T>` from a `Config`, rejecting invalid configurations.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_forest::{Config, Error, Forest};
    ///
    /// let config = Config { chunk_size: 0, seed: None };
    /// match Forest::<u32>::try_with_config(config) {
    ///     Err(Error::InvalidConfig(_)) => {},
    ///     _ => panic!("a zero chunk size was accepted"),
    /// }
    /// ```
    pub fn try_with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }
}

impl<T, R: Rng> Forest<T, R> {
    /// Constructs a new, empty forest that draws priorities from `rng`.
    ///
    /// # Panics
    ///
    /// Panics if `config.chunk_size` is zero.
    pub fn with_rng(config: Config, rng: R) -> Self {
        debug!(
            "creating forest with chunk size {} and seed {:?}",
            config.chunk_size, config.seed,
        );
        Forest {
            nodes: Nodes::new(config.chunk_size),
            rng,
        }
    }

    fn allocate(&mut self, key: T) -> Handle {
        let priority = self.rng.next_u32();
        self.nodes.allocate(Node::new(key, priority))
    }

    /// Creates a single-node tree whose priority is drawn from the forest's generator.
    pub fn make_node(&mut self, key: T) -> Treap {
        Treap::from_root(Some(self.allocate(key)))
    }

    /// Creates a single-node tree with an explicit priority.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_forest::Forest;
    ///
    /// let mut forest = Forest::new();
    /// let low = forest.make_node_with_priority(1, 5);
    /// let high = forest.make_node_with_priority(2, 9);
    /// let tree = forest.merge(low, high);
    /// assert_eq!(forest.root_key(&tree), Some(&2));
    /// ```
    pub fn make_node_with_priority(&mut self, key: T, priority: u32) -> Treap {
        Treap::from_root(Some(self.nodes.allocate(Node::new(key, priority))))
    }

    /// Returns the number of nodes in `tree`.
    pub fn size(&self, tree: &Treap) -> usize {
        size_of(&self.nodes, tree.root)
    }

    /// Returns the number of live nodes across every tree of the forest.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the key stored at the root of `tree`.
    pub fn root_key(&self, tree: &Treap) -> Option<&T> {
        tree.root.map(|root| &self.nodes[root].key)
    }

    /// Returns the priority stored at the root of `tree`.
    pub fn root_priority(&self, tree: &Treap) -> Option<u32> {
        tree.root.map(|root| self.nodes[root].priority)
    }

    /// Concatenates two sequences, `l_tree` first.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_forest::Forest;
    ///
    /// let mut forest = Forest::new();
    /// let left = forest.make_node(3);
    /// let right = forest.make_node(1);
    /// let tree = forest.merge_implicit(left, right);
    /// assert_eq!(forest.iter(&tree).collect::<Vec<&i32>>(), vec![&3, &1]);
    /// ```
    pub fn merge_implicit(&mut self, l_tree: Treap, r_tree: Treap) -> Treap {
        Treap::from_root(implicit_tree::merge(&mut self.nodes, l_tree.root, r_tree.root))
    }

    /// Splits a sequence so that the left tree holds its first `index` elements. An `index` larger
    /// than the sequence moves every element to the left tree.
    pub fn split_by_size(&mut self, tree: Treap, index: usize) -> (Treap, Treap) {
        let (l_tree, r_tree) = implicit_tree::split(&mut self.nodes, tree.root, index);
        (Treap::from_root(l_tree), Treap::from_root(r_tree))
    }

    /// Inserts `value` so that it ends up at position `index` of the sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_forest::{Error, Forest, Treap};
    ///
    /// let mut forest = Forest::new();
    /// let mut tree = Treap::empty();
    /// forest.insert_at(&mut tree, 0, 'b').unwrap();
    /// forest.insert_at(&mut tree, 0, 'a').unwrap();
    /// assert_eq!(forest.get(&tree, 1), Some(&'b'));
    /// assert_eq!(
    ///     forest.insert_at(&mut tree, 5, 'z'),
    ///     Err(Error::IndexOutOfBounds { index: 5, len: 2 }),
    /// );
    /// ```
    pub fn insert_at(&mut self, tree: &mut Treap, index: usize, value: T) -> Result<()> {
        let len = self.size(tree);
        if index > len {
            return Err(Error::IndexOutOfBounds { index, len });
        }
        let new_node = self.allocate(value);
        tree.root = implicit_tree::insert(&mut self.nodes, tree.root, index, new_node)?;
        Ok(())
    }

    /// Appends `value` to the end of the sequence.
    pub fn push_back(&mut self, tree: &mut Treap, value: T) {
        let new_node = self.allocate(value);
        tree.root = implicit_tree::merge(&mut self.nodes, tree.root, Some(new_node));
    }

    /// Prepends `value` to the front of the sequence.
    pub fn push_front(&mut self, tree: &mut Treap, value: T) {
        let new_node = self.allocate(value);
        tree.root = implicit_tree::merge(&mut self.nodes, Some(new_node), tree.root);
    }

    /// Removes and returns the element at position `index`. The tree is unchanged on error.
    pub fn remove_at(&mut self, tree: &mut Treap, index: usize) -> Result<T> {
        let (root, removed) = implicit_tree::remove(&mut self.nodes, tree.root, index)?;
        tree.root = root;
        Ok(self.nodes.release(removed).key)
    }

    /// Returns the element at position `index`, or `None` if it is out of bounds.
    pub fn get(&self, tree: &Treap, index: usize) -> Option<&T> {
        implicit_tree::get(&self.nodes, tree.root, index).map(|handle| &self.nodes[handle].key)
    }

    /// Rotates the sequence so that the element at `shift % len` becomes the first one.
    pub fn rotate_left(&mut self, tree: &mut Treap, shift: usize) {
        tree.root = implicit_tree::rotate_left(&mut self.nodes, tree.root, shift);
    }

    /// Returns a cursor at the first node of `tree`, or the terminal cursor if it is empty.
    pub fn begin(&self, tree: &Treap) -> Cursor {
        Cursor::new(navigation::min(&self.nodes, tree.root))
    }

    /// Returns the terminal cursor.
    pub fn end(&self) -> Cursor {
        Cursor::end()
    }

    /// Returns a cursor at the last node of `tree`, or the terminal cursor if it is empty.
    pub fn last(&self, tree: &Treap) -> Cursor {
        Cursor::new(navigation::max(&self.nodes, tree.root))
    }

    /// Returns the key under `cursor`.
    ///
    /// # Errors
    ///
    /// Returns `Error::TerminalCursor` for the terminal cursor and `Error::InvalidCursor` if the
    /// node under the cursor has been released.
    pub fn key(&self, cursor: Cursor) -> Result<&T> {
        cursor::key(&self.nodes, cursor)
    }

    /// Moves `cursor` to the next node in order. Fails like `key` on a terminal or released
    /// cursor, leaving it unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_forest::{Config, Error, Forest};
    ///
    /// let mut forest = Forest::with_config(Config::seeded(3));
    /// let mut tree = forest.make_node(2);
    /// forest.insert(&mut tree, 1);
    ///
    /// let mut cursor = forest.begin(&tree);
    /// assert_eq!(forest.key(cursor), Ok(&1));
    /// forest.advance(&mut cursor).unwrap();
    /// assert_eq!(forest.key(cursor), Ok(&2));
    /// forest.advance(&mut cursor).unwrap();
    /// assert_eq!(cursor, forest.end());
    /// assert_eq!(forest.advance(&mut cursor), Err(Error::TerminalCursor));
    /// ```
    pub fn advance(&self, cursor: &mut Cursor) -> Result<()> {
        cursor::advance(&self.nodes, cursor)
    }

    /// Returns a cursor at the in-order successor of `cursor`'s node. The terminal cursor maps to
    /// itself.
    pub fn successor(&self, cursor: Cursor) -> Cursor {
        Cursor::new(navigation::successor(&self.nodes, self.live(cursor)))
    }

    /// Returns a cursor at the in-order predecessor of `cursor`'s node. The terminal cursor maps
    /// to itself.
    pub fn predecessor(&self, cursor: Cursor) -> Cursor {
        Cursor::new(navigation::predecessor(&self.nodes, self.live(cursor)))
    }

    fn live(&self, cursor: Cursor) -> tree::Tree {
        cursor.node().filter(|&handle| self.nodes.contains(handle))
    }

    /// Returns an iterator over the keys of `tree` in order.
    pub fn iter<'a>(&'a self, tree: &Treap) -> Iter<'a, T> {
        Iter::new(&self.nodes, tree.root, self.size(tree))
    }

    /// Releases every node of `tree` and returns their keys in order.
    pub fn drain(&mut self, tree: Treap) -> Vec<T> {
        tree::drain(&mut self.nodes, tree.root)
    }

    /// Releases every node of `tree`. Returns the number of nodes released.
    pub fn destroy(&mut self, tree: Treap) -> usize {
        let released = self.drain(tree).len();
        debug!("released {} nodes, {} remain in the forest", released, self.nodes.len());
        released
    }

    /// Checks the heap, size, and parent invariants of a sequence.
    pub fn validate_sequence(&self, tree: &Treap) -> Result<()> {
        tree::validate_shape(&self.nodes, tree.root)
    }
}

impl<T: Ord, R: Rng> Forest<T, R> {
    /// Joins two trees. Every key of `l_tree` must be smaller than every key of `r_tree`; this is
    /// not checked, and violating it produces a tree that is heap ordered but not sorted.
    pub fn merge(&mut self, l_tree: Treap, r_tree: Treap) -> Treap {
        Treap::from_root(tree::merge(&mut self.nodes, l_tree.root, r_tree.root))
    }

    /// Splits `tree` into the keys smaller than `key` and the keys greater than or equal to `key`.
    pub fn split(&mut self, tree: Treap, key: &T) -> (Treap, Treap) {
        let (l_tree, r_tree) = tree::split(&mut self.nodes, tree.root, key);
        (Treap::from_root(l_tree), Treap::from_root(r_tree))
    }

    /// Inserts `key` with a freshly drawn priority. Duplicate keys are kept.
    pub fn insert(&mut self, tree: &mut Treap, key: T) {
        let new_node = self.allocate(key);
        tree.root = tree::insert(&mut self.nodes, tree.root, new_node);
    }

    /// Removes one occurrence of `key` and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_forest::Forest;
    ///
    /// let mut forest = Forest::new();
    /// let mut tree = forest.make_node(4);
    /// forest.insert(&mut tree, 4);
    /// assert_eq!(forest.remove(&mut tree, &4), Some(4));
    /// assert_eq!(forest.remove(&mut tree, &4), Some(4));
    /// assert_eq!(forest.remove(&mut tree, &4), None);
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove(&mut self, tree: &mut Treap, key: &T) -> Option<T> {
        let (root, removed) = tree::remove(&mut self.nodes, tree.root, key);
        tree.root = root;
        removed.map(|handle| self.nodes.release(handle).key)
    }

    /// Returns `true` if `tree` holds `key`.
    pub fn contains(&self, tree: &Treap, key: &T) -> bool {
        tree::contains(&self.nodes, tree.root, key)
    }

    /// Returns the largest key of `tree`, scanning every node. Returns `None` for an empty tree.
    pub fn range_max(&self, tree: &Treap) -> Option<&T> {
        tree::range_max(&self.nodes, tree.root).map(|handle| &self.nodes[handle].key)
    }

    /// Returns the largest key among the positions `start..end` of a sequence. Bounds are clamped
    /// to the sequence length and an empty range yields `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_forest::{Forest, Treap};
    ///
    /// let mut forest = Forest::new();
    /// let mut tree = Treap::empty();
    /// for value in vec![4, 8, 1, 6] {
    ///     forest.push_back(&mut tree, value);
    /// }
    /// assert_eq!(forest.range_max_between(&mut tree, 2, 4), Some(&6));
    /// assert_eq!(forest.range_max_between(&mut tree, 0, 2), Some(&8));
    /// ```
    pub fn range_max_between(&mut self, tree: &mut Treap, start: usize, end: usize) -> Option<&T> {
        let (root, max) =
            implicit_tree::with_range(&mut self.nodes, tree.root, start, end, tree::range_max);
        tree.root = root;
        let nodes = &self.nodes;
        max.map(|handle| &nodes[handle].key)
    }

    /// Checks every treap invariant of a keyed tree, including key order.
    pub fn validate(&self, tree: &Treap) -> Result<()> {
        tree::validate_shape(&self.nodes, tree.root)?;
        tree::validate_order(&self.nodes, tree.root)
    }
}

impl<T> Default for Forest<T, XorShiftRng> {
    fn default() -> Self {
        Self::new()
    }
}
