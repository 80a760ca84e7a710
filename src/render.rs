//! Draws a tree sideways as indented ASCII art, largest values at the top.
//!
//! ```text
//! │       ┌── 9
//! │   ┌── 8
//! │   │   └── 7
//! └── 5
//!     │   ┌── 4
//!     └── 3
//!         └── 1
//! ```

use std::fmt;

use crate::{Node, Tree};

const RIGHT_BRANCH: &str = "┌── ";
const LEFT_BRANCH: &str = "└── ";
const GUIDE: &str = "│   ";
const BLANK: &str = "    ";

/// Renders `tree` one line per node. An empty tree renders no lines.
pub fn render<T>(tree: &Tree<T>) -> Vec<String>
where
    T: fmt::Display,
{
    let mut lines = Vec::new();
    if let Some(root) = tree.root() {
        render_into(root, "", true, &mut lines);
    }
    lines
}

/// Pushes the lines for the subtree under `node`. `prefix` carries the guides
/// of every ancestor and `is_left` says which side of its parent `node` hangs
/// from (the root counts as a left child).
fn render_into<T>(node: &Node<T>, prefix: &str, is_left: bool, lines: &mut Vec<String>)
where
    T: fmt::Display,
{
    if let Some(right) = node.right() {
        let guide = if is_left { GUIDE } else { BLANK };
        render_into(right, &format!("{}{}", prefix, guide), false, lines);
    }

    let branch = if is_left { LEFT_BRANCH } else { RIGHT_BRANCH };
    lines.push(format!("{}{}{}", prefix, branch, node.value()));

    if let Some(left) = node.left() {
        let guide = if is_left { BLANK } else { GUIDE };
        render_into(left, &format!("{}{}", prefix, guide), true, lines);
    }
}

impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "Tree is empty");
        }

        write!(f, "{}", render(self).join("\n"))
    }
}
