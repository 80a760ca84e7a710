//! A mutable BST ordered by a comparator chosen at construction time.
//!
//! The tree never rebalances itself. Building it from a sequence (or calling
//! [`Tree::rebuild`]) produces a minimal-height tree; inserts and removals
//! afterwards only keep the ordering intact.
//!
//! # Examples
//!
//! ```
//! use ordtree::{Order, Tree};
//!
//! // Duplicates are dropped and the rest is laid out balanced.
//! let mut tree = Tree::with_values(|a: &i32, b: &i32| a.cmp(b), vec![5, 3, 8, 1, 4, 7, 9, 5]);
//! assert_eq!(tree.height(), 3);
//! assert!(tree.is_balanced());
//!
//! // Inserts chain and ignore values that are already present.
//! tree.insert(12).insert(15).insert(12);
//!
//! let mut values = Vec::new();
//! tree.traverse(Order::In, |node| values.push(*node.value()));
//! assert_eq!(values, [1, 3, 4, 5, 7, 8, 9, 12, 15]);
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::iter::FromIterator;
use std::mem;

use tracing::{debug, trace};

use crate::node::{Link, Node};

/// The total order a [`Tree`] is kept in. Two values comparing
/// [`Ordering::Equal`] are the same key as far as the tree is concerned.
///
/// It must be consistent for the lifetime of the tree or lookups will
/// silently miss values. The comparator is `'static`, so state it needs (a
/// lookup table, say) has to be moved or shared into it rather than borrowed.
pub type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering>;

/// The depth-first orders [`Tree::traverse`] can visit nodes in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// A node, then its left subtree, then its right subtree.
    Pre,
    /// The left subtree, then the node, then the right subtree. This visits
    /// values in ascending order.
    In,
    /// Both subtrees, then the node.
    Post,
}

/// What [`Tree::remove`] did with the node that matched.
#[derive(Debug)]
pub enum Removed<'a, T> {
    /// The node had at most one child. It was spliced out, its child (if any)
    /// took its place in the tree, and the node itself is handed back.
    Detached(Box<Node<T>>),
    /// The node had two children. It stays in the tree but now holds the
    /// value of its in-order successor, whose own node was spliced out.
    Replaced(&'a Node<T>),
}

impl<'a, T> Removed<'a, T> {
    /// The value held by the matched node once the removal finished. For
    /// [`Removed::Replaced`] this is the promoted successor, not the value
    /// that was asked for.
    pub fn value(&self) -> &T {
        match self {
            Self::Detached(node) => node.value(),
            Self::Replaced(node) => node.value(),
        }
    }
}

/// A Binary Search Tree over values ordered by a user supplied
/// [`Comparator`]. This can be used for inserting, finding, and removing
/// values, walking them in any of the usual orders, and inspecting how
/// balanced the tree is.
pub struct Tree<T> {
    root: Link<T>,
    compare: Comparator<T>,
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree` ordered by `compare`.
    ///
    /// `compare` can't borrow from its surroundings. Move whatever it reads
    /// into the closure, or share it through an `Rc`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use std::rc::Rc;
    ///
    /// use ordtree::Tree;
    ///
    /// // Grades ordered by a ranking table rather than alphabetically.
    /// let ranks: Rc<HashMap<char, u8>> =
    ///     Rc::new(vec![('S', 0), ('A', 1), ('B', 2)].into_iter().collect());
    ///
    /// let table = Rc::clone(&ranks);
    /// let mut tree = Tree::new(move |a: &char, b: &char| table[a].cmp(&table[b]));
    /// tree.insert('B').insert('S').insert('A');
    ///
    /// assert_eq!(tree.root().map(|n| *n.value()), Some('B'));
    /// assert_eq!(tree.depth_of(&'A'), 2);
    /// assert_eq!(Rc::strong_count(&ranks), 2);
    /// ```
    pub fn new<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        Self {
            root: None,
            compare: Box::new(compare),
        }
    }

    /// Generates a balanced `Tree` holding `values`. See [`Tree::from_sequence`]
    /// for how the values are laid out.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Tree;
    ///
    /// let tree = Tree::with_values(|a: &i32, b: &i32| b.cmp(a), vec![1, 2, 3]);
    ///
    /// // Descending order puts the largest value on the left.
    /// let root = tree.root().unwrap();
    /// assert_eq!(root.value(), &2);
    /// assert_eq!(root.left().map(|n| *n.value()), Some(3));
    /// ```
    pub fn with_values<F, I>(compare: F, values: I) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
        I: IntoIterator<Item = T>,
    {
        let mut tree = Self::new(compare);
        tree.root = tree.from_sequence(values);
        tree
    }

    /// Builds a standalone, height-balanced subtree from `values` using this
    /// tree's order. Values comparing equal are collapsed to the first one
    /// seen, the rest are sorted and the middle of every sorted range
    /// becomes the root of that range. For an even sized range the lower of
    /// the two middle values is picked.
    ///
    /// The tree itself is left untouched.
    pub fn from_sequence<I>(&self, values: I) -> Option<Box<Node<T>>>
    where
        I: IntoIterator<Item = T>,
    {
        let mut sorted: Vec<T> = values.into_iter().collect();
        let received = sorted.len();

        // `sort_by` is stable so `dedup_by` keeps the first of each run.
        sorted.sort_by(|a, b| (self.compare)(a, b));
        sorted.dedup_by(|a, b| (self.compare)(a, b) == Ordering::Equal);

        let len = sorted.len();
        debug!(received, unique = len, "building balanced subtree");
        build_balanced(&mut sorted.into_iter(), len)
    }

    /// Discards the current shape and lays the same values out again as a
    /// minimal-height tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Tree;
    ///
    /// let mut tree = Tree::new(|a: &i32, b: &i32| a.cmp(b));
    /// for x in 0..7 {
    ///     tree.insert(x);
    /// }
    /// assert_eq!(tree.height(), 7);
    ///
    /// tree.rebuild();
    /// assert_eq!(tree.height(), 3);
    /// assert!(tree.is_balanced());
    /// ```
    pub fn rebuild(&mut self) -> &mut Self {
        let sorted = drain_in_order(self.root.take());
        let len = sorted.len();
        self.root = build_balanced(&mut sorted.into_iter(), len);

        debug!(len, height = self.height(), "rebuilt tree");
        self
    }

    /// The root node, if the tree has any values.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Inserts `value` as a new leaf. If an equal value is already present
    /// nothing happens. Either way the tree is returned so calls can be
    /// chained.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Tree;
    ///
    /// let mut tree = Tree::new(|a: &i32, b: &i32| a.cmp(b));
    /// tree.insert(2).insert(1).insert(2);
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert!(tree.find(&1).is_some());
    /// ```
    pub fn insert(&mut self, value: T) -> &mut Self {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match (self.compare)(&value, &node.value) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => {
                    trace!("ignoring duplicate insert");
                    return self;
                }
            };
        }

        *link = Some(Node::boxed(value));
        self
    }

    /// Removes the node holding `value`, returning `None` if there isn't
    /// one. See [`Removed`] for what comes back.
    ///
    /// A node with two children isn't unlinked. It takes over the value of
    /// its in-order successor (the leftmost node of its right subtree) and
    /// that successor is spliced out instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{Removed, Tree};
    ///
    /// let mut tree = Tree::with_values(|a: &i32, b: &i32| a.cmp(b), vec![1, 2, 3]);
    ///
    /// // `2` is the root with two children so `3` is promoted into its node.
    /// assert!(matches!(tree.remove(&2), Some(Removed::Replaced(node)) if node.value() == &3));
    ///
    /// // `1` is a leaf so its node is handed back.
    /// assert!(matches!(tree.remove(&1), Some(Removed::Detached(node)) if node.value() == &1));
    ///
    /// assert!(tree.remove(&42).is_none());
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<Removed<'_, T>> {
        let mut link = &mut self.root;
        loop {
            let ordering = (self.compare)(value, &link.as_ref()?.value);
            link = match ordering {
                Ordering::Less => &mut link.as_mut()?.left,
                Ordering::Greater => &mut link.as_mut()?.right,
                Ordering::Equal => break,
            };
        }

        let has_two_children = link
            .as_ref()
            .map_or(false, |node| node.left.is_some() && node.right.is_some());

        if has_two_children {
            let node = link.as_deref_mut()?;
            let Some(mut successor) = take_leftmost(&mut node.right) else {
                unreachable!("a node with a right child has an in-order successor");
            };
            mem::swap(&mut node.value, &mut successor.value);

            trace!("promoted in-order successor into removed node");
            Some(Removed::Replaced(node))
        } else {
            let mut detached = link.take()?;
            *link = detached.left.take().or(detached.right.take());

            trace!(had_child = link.is_some(), "spliced out removed node");
            Some(Removed::Detached(detached))
        }
    }

    /// Finds the node holding `value`, if any.
    pub fn find(&self, value: &T) -> Option<&Node<T>> {
        let mut link = self.root();
        while let Some(node) = link {
            link = match (self.compare)(value, &node.value) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(node),
            };
        }

        None
    }

    /// Whether a value equal to `value` is in the tree.
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Walks the whole tree depth-first, calling `visit` once per node in the
    /// given [`Order`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{Order, Tree};
    ///
    /// let tree = Tree::with_values(|a: &i32, b: &i32| a.cmp(b), vec![1, 2, 3]);
    ///
    /// let mut values = Vec::new();
    /// tree.traverse(Order::Post, |node| values.push(*node.value()));
    /// assert_eq!(values, [1, 3, 2]);
    /// ```
    pub fn traverse<F>(&self, order: Order, mut visit: F)
    where
        F: FnMut(&Node<T>),
    {
        walk(self.root(), order, &mut visit);
    }

    /// Walks the tree breadth-first, calling `visit` on every node of one
    /// level (left to right) before moving to the next.
    pub fn level_order<F>(&self, mut visit: F)
    where
        F: FnMut(&Node<T>),
    {
        let mut queue: VecDeque<&Node<T>> = self.root().into_iter().collect();
        while let Some(node) = queue.pop_front() {
            visit(node);
            queue.extend(node.left());
            queue.extend(node.right());
        }
    }

    /// The number of nodes on the longest path from the root to a leaf. An
    /// empty tree has a height of 0.
    pub fn height(&self) -> usize {
        self.root().map_or(0, Node::height)
    }

    /// How many edges lie between the root and the node holding `target`'s
    /// value.
    ///
    /// **Note** This searches by value, not by identity: `target` doesn't
    /// have to belong to this tree. If its value isn't present the result is
    /// the depth at which it would be inserted.
    pub fn depth(&self, target: &Node<T>) -> usize {
        self.depth_of(target.value())
    }

    /// Like [`Tree::depth`] but keyed on a bare value.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Tree;
    ///
    /// let tree = Tree::with_values(|a: &i32, b: &i32| a.cmp(b), vec![1, 2, 3]);
    ///
    /// assert_eq!(tree.depth_of(&2), 0);
    /// assert_eq!(tree.depth_of(&3), 1);
    /// // `4` would become the right child of `3`.
    /// assert_eq!(tree.depth_of(&4), 2);
    /// ```
    pub fn depth_of(&self, value: &T) -> usize {
        let mut level = 0;
        let mut link = self.root();
        while let Some(node) = link {
            link = match (self.compare)(value, &node.value) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => break,
            };
            level += 1;
        }

        level
    }

    /// Whether, at every node, the heights of the two subtrees differ by at
    /// most one.
    pub fn is_balanced(&self) -> bool {
        self.root().map_or(true, |root| root.balance().0)
    }

    /// The number of values in the tree. This walks every node.
    pub fn len(&self) -> usize {
        let mut len = 0;
        self.level_order(|_| len += 1);
        len
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

impl<T> Tree<T>
where
    T: Ord + 'static,
{
    /// Generates a new, empty `Tree` ordered by `T`'s [`Ord`] implementation.
    pub fn ordered() -> Self {
        Self::new(T::cmp)
    }
}

impl<T> Default for Tree<T>
where
    T: Ord + 'static,
{
    fn default() -> Self {
        Self::ordered()
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord + 'static,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::with_values(T::cmp, iter)
    }
}

impl<T> Extend<T> for Tree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> Drop for Tree<T> {
    // Dropping a long chain of boxes recursively can overflow the stack so
    // nodes are unlinked one at a time.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

/// Builds a balanced subtree from the next `len` values of an ascending,
/// duplicate free iterator.
fn build_balanced<T, I>(values: &mut I, len: usize) -> Link<T>
where
    I: Iterator<Item = T>,
{
    if len == 0 {
        return None;
    }

    let mid = (len - 1) / 2;
    let left = build_balanced(values, mid);
    let value = values.next()?;
    let right = build_balanced(values, len - mid - 1);

    Some(Box::new(Node { value, left, right }))
}

/// Consumes a subtree and returns its values in order.
fn drain_in_order<T>(mut link: Link<T>) -> Vec<T> {
    let mut values = Vec::new();
    let mut stack = Vec::new();

    loop {
        while let Some(mut node) = link {
            link = node.left.take();
            stack.push(node);
        }

        let Some(mut node) = stack.pop() else {
            return values;
        };
        link = node.right.take();
        values.push(node.value);
    }
}

/// One pending step of a depth-first walk.
enum Step<'a, T> {
    /// Schedule the node and its subtrees.
    Expand(&'a Node<T>),
    /// Hand the node to the visitor.
    Visit(&'a Node<T>),
}

fn walk<T, F>(root: Option<&Node<T>>, order: Order, visit: &mut F)
where
    F: FnMut(&Node<T>),
{
    let mut stack: Vec<Step<'_, T>> = root.map(Step::Expand).into_iter().collect();
    while let Some(step) = stack.pop() {
        match step {
            Step::Visit(node) => visit(node),
            // Pushed in the reverse of the order they run in.
            Step::Expand(node) => {
                if order == Order::Post {
                    stack.push(Step::Visit(node));
                }
                stack.extend(node.right().map(Step::Expand));
                if order == Order::In {
                    stack.push(Step::Visit(node));
                }
                stack.extend(node.left().map(Step::Expand));
                if order == Order::Pre {
                    stack.push(Step::Visit(node));
                }
            }
        }
    }
}

/// Unlinks the leftmost node of the subtree in `link`, moving its right
/// child (if any) into its place.
fn take_leftmost<T>(mut link: &mut Link<T>) -> Link<T> {
    while link.as_ref()?.left.is_some() {
        link = &mut link.as_mut()?.left;
    }

    let mut node = link.take()?;
    *link = node.right.take();
    Some(node)
}
