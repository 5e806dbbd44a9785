//! An arena-backed treap with keyed and positional merge and split.
//!
//! # Examples
//!
//! ```
//! use treap_forest::{Config, Forest, Treap};
//!
//! let mut forest = Forest::with_config(Config::seeded(11));
//!
//! // Keyed trees behave like ordered multisets.
//! let mut set = Treap::empty();
//! for key in vec![50, 30, 70] {
//!     forest.insert(&mut set, key);
//! }
//! assert_eq!(forest.range_max(&set), Some(&70));
//!
//! // Implicit trees behave like sequences.
//! let mut list = Treap::empty();
//! for value in vec![1, 2, 3] {
//!     forest.push_back(&mut list, value);
//! }
//! let (front, back) = forest.split_by_size(list, 1);
//! assert_eq!(forest.size(&front), 1);
//! assert_eq!(forest.size(&back), 2);
//! ```

#[macro_use]
extern crate serde_derive;

pub mod arena;
mod config;
mod error;
pub mod treap;

pub use self::config::{Config, DEFAULT_CHUNK_SIZE};
pub use self::error::{Error, Result};
pub use self::treap::{Cursor, Forest, Iter, Treap};
