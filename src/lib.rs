//! This crate exposes a Binary Search Tree (BST) kept in whatever order the
//! caller chooses, along with the usual traversals and a few diagnostics for
//! how balanced it is.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Here "less" and "greater" are decided by a comparator handed to the tree
//! when it is created, so the same values can be kept ascending, descending,
//! or ordered by a single field. Values the comparator calls equal are
//! duplicates and are never stored twice.
//!
//! ## Balance
//!
//! Searching takes `O(height)` where `height` is the longest path from the
//! root `Node` to a leaf `Node`. A tree built from a whole sequence at once
//! (see [`Tree::with_values`]) has the smallest height possible, `⌈lg(N + 1)⌉`
//! for `N` values. Inserts and removals don't rebalance, so a tree fed
//! ascending values degrades into a list. [`Tree::is_balanced`] reports
//! when that has happened and [`Tree::rebuild`] lays the values out
//! optimally again.
//!
//! # Examples
//!
//! ```
//! use ordtree::{render, Tree};
//!
//! let mut tree = Tree::with_values(|a: &i32, b: &i32| a.cmp(b), vec![5, 3, 8, 1, 4, 7, 9, 5]);
//! tree.insert(12).insert(15).insert(89).insert(75);
//! assert!(!tree.is_balanced());
//!
//! tree.rebuild();
//! assert!(tree.is_balanced());
//! assert_eq!(tree.height(), 4);
//!
//! for line in render(&tree) {
//!     println!("{}", line);
//! }
//! ```

#![deny(missing_docs)]

pub mod node;
pub mod render;
pub mod tree;

pub use node::Node;
pub use render::render;
pub use tree::{Comparator, Order, Removed, Tree};

#[cfg(test)]
mod test;
