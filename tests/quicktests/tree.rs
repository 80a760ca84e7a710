use ordtree::{Node, Order, Tree};
use quickcheck_macros::quickcheck;

use std::collections::BTreeSet;

use crate::Op;

fn ascending() -> Tree<i16> {
    Tree::new(|a: &i16, b: &i16| a.cmp(b))
}

fn in_order(tree: &Tree<i16>) -> Vec<i16> {
    let mut values = Vec::new();
    tree.traverse(Order::In, |node| values.push(*node.value()));
    values
}

/// The smallest height a BST holding `len` values can have.
fn minimal_height(len: usize) -> usize {
    (usize::BITS - len.leading_zeros()) as usize
}

/// Whether every node's value lies strictly inside the bounds set by its
/// ancestors.
fn is_bst(node: Option<&Node<i16>>, low: Option<i16>, high: Option<i16>) -> bool {
    let Some(node) = node else {
        return true;
    };
    let value = *node.value();

    low.map_or(true, |low| low < value)
        && high.map_or(true, |high| value < high)
        && is_bst(node.left(), low, Some(value))
        && is_bst(node.right(), Some(value), high)
}

/// Applies a set of operations to a tree and a `BTreeSet`.
/// This way we can ensure that after a random smattering of inserts
/// and removes we have the same set of values in both.
fn do_ops(ops: &[Op<i16>], bst: &mut Tree<i16>, set: &mut BTreeSet<i16>) {
    for op in ops {
        match op {
            Op::Insert(x) => {
                bst.insert(*x);
                set.insert(*x);
            }
            Op::Remove(x) => {
                bst.remove(x);
                set.remove(x);
            }
            Op::Rebuild => {
                bst.rebuild();
            }
        }
    }
}

#[quickcheck]
fn construction_is_minimal_height(xs: Vec<i16>) -> bool {
    let tree = Tree::with_values(|a: &i16, b: &i16| a.cmp(b), xs.clone());
    let unique: BTreeSet<_> = xs.into_iter().collect();

    tree.is_balanced()
        && tree.len() == unique.len()
        && tree.height() == minimal_height(unique.len())
        && in_order(&tree) == unique.into_iter().collect::<Vec<_>>()
}

#[quickcheck]
fn in_order_is_strictly_ascending(ops: Vec<Op<i16>>) -> bool {
    let mut tree = ascending();
    let mut set = BTreeSet::new();
    do_ops(&ops, &mut tree, &mut set);

    let values = in_order(&tree);
    values.windows(2).all(|pair| pair[0] < pair[1])
        && is_bst(tree.root(), None, None)
        && values == set.into_iter().collect::<Vec<_>>()
}

#[quickcheck]
fn duplicate_inserts_change_nothing(xs: Vec<i16>) -> bool {
    let mut tree = ascending();
    tree.extend(xs.iter().copied());
    let (height, balanced, values) = (tree.height(), tree.is_balanced(), in_order(&tree));

    tree.extend(xs);

    tree.height() == height && tree.is_balanced() == balanced && in_order(&tree) == values
}

#[quickcheck]
fn removed_values_are_gone(xs: Vec<i16>, removes: Vec<i16>) -> bool {
    let mut tree = ascending();
    tree.extend(xs.iter().copied());

    for x in &removes {
        let before = in_order(&tree);
        let present = tree.contains(x);

        if tree.remove(x).is_some() != present {
            return false;
        }
        if tree.contains(x) || (!present && in_order(&tree) != before) {
            return false;
        }
    }

    is_bst(tree.root(), None, None)
        && xs
            .iter()
            .filter(|x| !removes.contains(x))
            .all(|x| tree.contains(x))
}

#[quickcheck]
fn rebuild_restores_minimal_height(ops: Vec<Op<i16>>) -> bool {
    let mut tree = ascending();
    let mut set = BTreeSet::new();
    do_ops(&ops, &mut tree, &mut set);

    let before: BTreeSet<_> = in_order(&tree).into_iter().collect();
    tree.rebuild();
    let after: BTreeSet<_> = in_order(&tree).into_iter().collect();

    tree.is_balanced() && tree.height() == minimal_height(before.len()) && before == after
}

#[quickcheck]
fn traversals_visit_every_node_once(xs: Vec<i16>) -> bool {
    let mut tree = ascending();
    tree.extend(xs);
    let expected = in_order(&tree);

    [Order::Pre, Order::Post].iter().all(|order| {
        let mut seen = Vec::new();
        tree.traverse(*order, |node| seen.push(*node.value()));
        seen.sort_unstable();
        seen == expected
    }) && {
        let mut seen = Vec::new();
        tree.level_order(|node| seen.push(*node.value()));
        seen.sort_unstable();
        seen == expected
    }
}

#[quickcheck]
fn depth_matches_path_length(xs: Vec<i16>) -> bool {
    let mut tree = ascending();
    tree.extend(xs.iter().copied());

    xs.iter().all(|x| {
        let node = tree.find(x).unwrap();
        let mut depth = 0;
        let mut current = tree.root().unwrap();
        while current.value() != x {
            current = if x < current.value() {
                current.left().unwrap()
            } else {
                current.right().unwrap()
            };
            depth += 1;
        }

        tree.depth(node) == depth
    })
}
