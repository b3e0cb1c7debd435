//! Nested translation trees and their flat representation.

use indexmap::IndexMap;

/// Nested key/value structure of one translation file, in file order.
pub type Tree = IndexMap<String, Node>;

/// Flat key to value mapping, in traversal order.
pub type FlatValues = IndexMap<String, String>;

/// A tree entry: either a translated string or a nested group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Leaf(String),
    Branch(Tree),
}

impl Node {
    pub fn leaf(value: impl Into<String>) -> Self {
        Node::Leaf(value.into())
    }
}

/// Flattens `tree` into dotted keys, each prefixed with `prefix`.
///
/// Groups without leaves produce no keys.
pub fn flatten(tree: &Tree, prefix: &str) -> FlatValues {
    let mut values = FlatValues::new();
    flatten_into(tree, prefix, &mut values);
    values
}

fn flatten_into(tree: &Tree, prefix: &str, values: &mut FlatValues) {
    for (key, node) in tree {
        match node {
            Node::Leaf(value) => {
                values.insert(format!("{prefix}{key}"), value.clone());
            },
            Node::Branch(children) => {
                flatten_into(children, &format!("{prefix}{key}."), values);
            },
        }
    }
}

/// Rebuilds a tree from dotted paths.
///
/// Paths sharing a prefix end up in the same group. When the same path is
/// given twice the last value wins.
pub fn unflatten<I, K, V>(entries: I) -> Tree
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut tree = Tree::new();
    for (path, value) in entries {
        insert_path(&mut tree, path.as_ref(), value.into());
    }
    tree
}

/// Sets the leaf at `path`, creating groups along the way.
///
/// A leaf standing where a group is needed is replaced by the group.
pub fn insert_path(tree: &mut Tree, path: &str, value: String) {
    let mut current = tree;
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            current.insert(segment.to_string(), Node::Leaf(value));
            return;
        }

        let node = current
            .entry(segment.to_string())
            .or_insert_with(|| Node::Branch(Tree::new()));
        if matches!(node, Node::Leaf(_)) {
            *node = Node::Branch(Tree::new());
        }
        let Node::Branch(children) = node else {
            return;
        };
        current = children;
    }
}

/// Merges `overlay` into `base`.
///
/// Groups present on both sides are merged recursively; any other collision
/// is won by `overlay`. Keys only present in `base` keep their position, new
/// keys are appended.
pub fn merge(base: &mut Tree, overlay: Tree) {
    for (key, node) in overlay {
        match (base.get_mut(&key), node) {
            (Some(Node::Branch(existing)), Node::Branch(children)) => merge(existing, children),
            (Some(slot), node) => *slot = node,
            (None, node) => {
                base.insert(key, node);
            },
        }
    }
}

/// Counts the leaves of a tree.
pub fn count_leaves(tree: &Tree) -> usize {
    tree.values()
        .map(|node| match node {
            Node::Leaf(_) => 1,
            Node::Branch(children) => count_leaves(children),
        })
        .sum()
}
