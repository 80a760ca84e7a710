//! Helpers shared by the unit tests.


use std::sync::Once;

use tracing_subscriber::EnvFilter;

use crate::{Node, Order, Tree};

static LOGGING: Once = Once::new();

/// Installs a global `tracing` subscriber writing through the test harness.
/// `RUST_LOG` overrides the default of tracing everything in this crate.
pub(crate) fn init_logging() {
    LOGGING.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ordtree=trace"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .unwrap_or_else(|e| eprintln!("Failed to set up logging: {}", e));
    });
}

/// A tree over `T`'s natural order built from `values`.
pub(crate) fn numeric<T>(values: Vec<T>) -> Tree<T>
where
    T: Ord + 'static,
{
    Tree::with_values(|a: &T, b: &T| a.cmp(b), values)
}

/// The tree's values, in order.
pub(crate) fn in_order<T: Clone>(tree: &Tree<T>) -> Vec<T> {
    let mut values = Vec::new();
    tree.traverse(Order::In, |node| values.push(node.value().clone()));
    values
}

/// Asserts that every node sits strictly between the bounds its ancestors
/// impose on it.
pub(crate) fn assert_bst<T: Ord + std::fmt::Debug>(tree: &Tree<T>) {
    fn check<T: Ord + std::fmt::Debug>(node: Option<&Node<T>>, low: Option<&T>, high: Option<&T>) {
        let Some(node) = node else {
            return;
        };
        if let Some(low) = low {
            assert!(node.value() > low, "{:?} should be above {:?}", node.value(), low);
        }
        if let Some(high) = high {
            assert!(node.value() < high, "{:?} should be below {:?}", node.value(), high);
        }

        check(node.left(), low, Some(node.value()));
        check(node.right(), Some(node.value()), high);
    }

    check(tree.root(), None, None);
}
