//! The cells a [`Tree`][crate::Tree] is built from.

/// An owned, possibly empty, child slot.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// A `Node` holds one value and owns up to two children. Everything in the
/// left subtree orders strictly before `value` and everything in the right
/// subtree strictly after it.
///
/// Nodes are only ever handed out by reference (or detached, after a
/// removal), so the tree's ordering can't be broken from the outside.
#[derive(Debug)]
pub struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    /// Construct a new leaf `Node` holding the given value.
    pub(crate) fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub(crate) fn boxed(value: T) -> Box<Self> {
        Box::new(Self::new(value))
    }

    /// The value stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The root of the left subtree, if any.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the right subtree, if any.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Consumes the node and returns its value. Any children still attached
    /// are dropped with it.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// How many levels are in the subtree rooted at this node. A node with
    /// no children has a height of 1.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            height = height.max(level);
            stack.extend(node.left().map(|n| (n, level + 1)));
            stack.extend(node.right().map(|n| (n, level + 1)));
        }

        height
    }

    /// Returns whether the subtree rooted here is balanced along with its
    /// height, so that each node is only visited once.
    pub(crate) fn balance(&self) -> (bool, usize) {
        // Children are finished before their parent, so by the time a node
        // is revisited its subtrees' results sit on top of `results`, right
        // above left.
        let mut pending = vec![(self, false)];
        let mut results: Vec<(bool, usize)> = Vec::new();

        while let Some((node, revisit)) = pending.pop() {
            if !revisit {
                pending.push((node, true));
                pending.extend(node.right().map(|n| (n, false)));
                pending.extend(node.left().map(|n| (n, false)));
                continue;
            }

            let (right_balanced, right_height) =
                node.right().and_then(|_| results.pop()).unwrap_or((true, 0));
            let (left_balanced, left_height) =
                node.left().and_then(|_| results.pop()).unwrap_or((true, 0));

            results.push((
                left_balanced && right_balanced && left_height.abs_diff(right_height) <= 1,
                left_height.max(right_height) + 1,
            ));
        }

        results.pop().unwrap_or((true, 0))
    }
}
