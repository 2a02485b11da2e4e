//! Package implement an ordered set of integer keys using a
//! [red-black][wiki-rbt] tree.
//!
//! - Keys are `i64`, totally ordered.
//! - Duplicate keys are allowed, a tie always descends right.
//! - Insert and lookup are O(log n) in the worst case.
//! - Deterministic infix, prefix and postfix serialization.
//! - Clone is a deep structural copy, no node is shared between trees.
//! - No delete operation.
//! - Not thread safe.
//!
//! Constructing a [RedBlackTree] and querying it:
//!
//! ```
//! use rbset::RedBlackTree;
//!
//! let mut tree = RedBlackTree::new();
//! assert_eq!(tree.len(), 0);
//! assert!(tree.get_min().is_err());
//!
//! tree.insert(10);
//! tree.insert(20);
//! tree.insert(30);
//!
//! assert_eq!(tree.len(), 3);
//! assert!(tree.contains(&20));
//! assert!(!tree.contains(&25));
//! assert_eq!(tree.get_min().unwrap(), 10);
//! assert_eq!(tree.get_max().unwrap(), 30);
//! assert_eq!(tree.to_infix_string(), " R10  B20  R30 ");
//! assert_eq!(tree.to_prefix_string(), " B20  R10  R30 ");
//! ```
//!
//! Cloned trees are independent of each other:
//!
//! ```
//! use rbset::RedBlackTree;
//!
//! let mut tree: RedBlackTree = vec![5_i64, 1, 9].into_iter().collect();
//! let snapshot = tree.clone();
//! tree.insert(7);
//!
//! assert_eq!(snapshot.len(), 3);
//! assert!(!snapshot.contains(&7));
//! assert_eq!(tree.iter().collect::<Vec<i64>>(), vec![1, 5, 7, 9]);
//! ```
//!
//! [wiki-rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use std::{error, fmt, result};

// Short form to compose Error values.
//
// ```ignore
// use crate::Error;
// err_at!(EmptyTree, msg: "tree is empty");
// err_at!(Fatal, msg: "unbalanced blacks {} {}", lblacks, rblacks);
// ```
//
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err(Error::$v(prefix, format!($($arg),+)))
    }};
}

mod node;
mod rbtree;

pub use node::Node;
pub use rbtree::{Iter, RedBlackTree};

/// Error variants that are returned by this package's API.
///
/// Each variant carries a prefix, typically identifying the
/// error location.
pub enum Error {
    EmptyTree(String, String),
    Fatal(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use Error::*;

        match self {
            EmptyTree(p, msg) => write!(f, "{} EmptyTree: {}", p, msg),
            Fatal(p, msg) => write!(f, "{} Fatal: {}", p, msg),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self)
    }
}

impl error::Error for Error {}

/// Type alias for Result return type, used by this package.
pub type Result<T> = result::Result<T, Error>;
