//! Ordered index over owners
//!
//! `OwnerIndex` is an unbalanced binary search tree keyed by owner name,
//! compared case-insensitively. Shape and traversal cost depend entirely on
//! insertion order. The index owns every node exclusively: children are
//! `Option<Box<OwnerNode>>` and there are no parent back-pointers.
//!
//! Mutation is written in a rebuild-on-mutation style: `delete` consumes a
//! subtree and returns its replacement.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::PokedexError;
use crate::record::CreatureRecord;

/// Compare two owner names ignoring case.
///
/// This is the single ordering rule of the index: names that differ only
/// in case are the same key.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

// ═══════════════════════════════════════════════════════════════════════
// Nodes
// ═══════════════════════════════════════════════════════════════════════

/// A single owner: a name plus an ordered, id-deduplicated collection.
#[derive(Debug, Clone)]
pub struct OwnerNode {
    pub(crate) name: String,
    pub(crate) collection: Vec<Arc<CreatureRecord>>,
    left: Option<Box<OwnerNode>>,
    right: Option<Box<OwnerNode>>,
}

impl OwnerNode {
    /// Create a leaf holding a single starter record.
    pub fn new(name: impl Into<String>, starter: Arc<CreatureRecord>) -> Self {
        Self {
            name: name.into(),
            collection: vec![starter],
            left: None,
            right: None,
        }
    }

    /// The owner's name as it was registered.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The owner's collection in insertion order.
    pub fn collection(&self) -> &[Arc<CreatureRecord>] {
        &self.collection
    }

    /// Number of entries in the collection.
    pub fn size(&self) -> usize {
        self.collection.len()
    }

    /// Left subtree (names ordered before this one).
    pub fn left(&self) -> Option<&OwnerNode> {
        self.left.as_deref()
    }

    /// Right subtree (names ordered after this one).
    pub fn right(&self) -> Option<&OwnerNode> {
        self.right.as_deref()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Traversal Orders
// ═══════════════════════════════════════════════════════════════════════

/// The four full-tree walk orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Breadth-first, left child before right
    LevelOrder,
    /// Node, left, right
    PreOrder,
    /// Left, node, right: ascending name order
    InOrder,
    /// Left, right, node
    PostOrder,
}

impl Traversal {
    /// All orders, in menu order.
    pub const ALL: [Traversal; 4] = [
        Traversal::LevelOrder,
        Traversal::PreOrder,
        Traversal::InOrder,
        Traversal::PostOrder,
    ];
}

impl TryFrom<i64> for Traversal {
    type Error = PokedexError;

    /// Map a 1-based menu choice to an order.
    fn try_from(choice: i64) -> Result<Self, Self::Error> {
        match choice {
            1 => Ok(Traversal::LevelOrder),
            2 => Ok(Traversal::PreOrder),
            3 => Ok(Traversal::InOrder),
            4 => Ok(Traversal::PostOrder),
            other => Err(PokedexError::InvalidSelection(other)),
        }
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Traversal::LevelOrder => "BFS",
            Traversal::PreOrder => "Pre-Order",
            Traversal::InOrder => "In-Order",
            Traversal::PostOrder => "Post-Order",
        };
        f.write_str(label)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Index
// ═══════════════════════════════════════════════════════════════════════

/// Unbalanced BST of owners keyed by case-insensitive name.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pokedex::{CreatureRecord, OwnerIndex, Traversal};
///
/// let starter = Arc::new(CreatureRecord::new(252, "Treecko", "Grass", 40, 45, true));
/// let mut index = OwnerIndex::new();
/// index.insert("Bob", starter.clone());
/// index.insert("Amy", starter.clone());
/// index.insert("Zoe", starter);
///
/// let names: Vec<&str> = index
///     .traverse(Traversal::InOrder)
///     .into_iter()
///     .map(|node| node.name())
///     .collect();
/// assert_eq!(names, vec!["Amy", "Bob", "Zoe"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OwnerIndex {
    root: Option<Box<OwnerNode>>,
}

impl OwnerIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// The root node, if any.
    pub fn root(&self) -> Option<&OwnerNode> {
        self.root.as_deref()
    }

    /// Whether the index holds no owners.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of owners.
    pub fn len(&self) -> usize {
        fn count(node: Option<&OwnerNode>) -> usize {
            node.map_or(0, |n| 1 + count(n.left()) + count(n.right()))
        }
        count(self.root())
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        fn height(node: Option<&OwnerNode>) -> usize {
            node.map_or(0, |n| 1 + height(n.left()).max(height(n.right())))
        }
        height(self.root())
    }

    /// Insert a new owner holding `starter`.
    ///
    /// If an owner with the same name (ignoring case) is already present the
    /// existing node is left untouched and `false` is returned. Callers
    /// that must reject duplicates should check with [`find`](Self::find)
    /// first.
    pub fn insert(&mut self, name: &str, starter: Arc<CreatureRecord>) -> bool {
        let inserted = insert_into(&mut self.root, name, starter);
        if !inserted {
            warn!(owner = name, "duplicate owner ignored by insert");
        }
        inserted
    }

    /// Binary search for an owner by name, ignoring case.
    pub fn find(&self, name: &str) -> Option<&OwnerNode> {
        let mut current = self.root();
        while let Some(node) = current {
            current = match compare_names(name, &node.name) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Mutable lookup, used by the collection operations.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut OwnerNode> {
        find_in(&mut self.root, name)
    }

    /// Whether an owner with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Remove the owner with this name. Returns `false` if it was absent.
    ///
    /// A node with two children is not unlinked: it takes over the name and
    /// collection of its in-order successor, and the successor's original
    /// node is deleted from the right subtree instead.
    pub fn delete(&mut self, name: &str) -> bool {
        if !self.contains(name) {
            return false;
        }
        self.root = delete_from(self.root.take(), name);
        true
    }

    /// Walk the whole tree in the given order.
    pub fn traverse(&self, order: Traversal) -> Vec<&OwnerNode> {
        let mut out = Vec::new();
        match order {
            Traversal::LevelOrder => level_order(self.root(), &mut out),
            Traversal::PreOrder => pre_order(self.root(), &mut out),
            Traversal::InOrder => in_order(self.root(), &mut out),
            Traversal::PostOrder => post_order(self.root(), &mut out),
        }
        debug!(order = %order, visited = out.len(), "traversal complete");
        out
    }

    /// Owner names in the given order.
    pub fn names(&self, order: Traversal) -> Vec<&str> {
        self.traverse(order).into_iter().map(|n| n.name()).collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Recursive Helpers
// ═══════════════════════════════════════════════════════════════════════

fn insert_into(
    slot: &mut Option<Box<OwnerNode>>,
    name: &str,
    starter: Arc<CreatureRecord>,
) -> bool {
    match slot {
        None => {
            *slot = Some(Box::new(OwnerNode::new(name, starter)));
            true
        }
        Some(node) => match compare_names(name, &node.name) {
            Ordering::Less => insert_into(&mut node.left, name, starter),
            Ordering::Greater => insert_into(&mut node.right, name, starter),
            Ordering::Equal => false,
        },
    }
}

fn find_in<'a>(slot: &'a mut Option<Box<OwnerNode>>, name: &str) -> Option<&'a mut OwnerNode> {
    let node = slot.as_deref_mut()?;
    match compare_names(name, &node.name) {
        Ordering::Less => find_in(&mut node.left, name),
        Ordering::Greater => find_in(&mut node.right, name),
        Ordering::Equal => Some(node),
    }
}

/// Leftmost node of a subtree: the in-order successor when applied to a
/// right subtree.
fn leftmost(mut node: &OwnerNode) -> &OwnerNode {
    while let Some(left) = node.left() {
        node = left;
    }
    node
}

fn delete_from(subtree: Option<Box<OwnerNode>>, name: &str) -> Option<Box<OwnerNode>> {
    let mut node = subtree?;
    match compare_names(name, &node.name) {
        Ordering::Less => {
            node.left = delete_from(node.left.take(), name);
            Some(node)
        }
        Ordering::Greater => {
            node.right = delete_from(node.right.take(), name);
            Some(node)
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, right) => right,
            (left, None) => left,
            (left, Some(right)) => {
                let successor = leftmost(&right);
                node.name = successor.name.clone();
                node.collection = successor.collection.clone();
                // Delete by the successor's key, now also held by `node`.
                node.right = delete_from(Some(right), &node.name);
                node.left = left;
                Some(node)
            }
        },
    }
}

fn level_order<'a>(root: Option<&'a OwnerNode>, out: &mut Vec<&'a OwnerNode>) {
    let mut queue: VecDeque<&OwnerNode> = root.into_iter().collect();
    while let Some(node) = queue.pop_front() {
        out.push(node);
        queue.extend(node.left());
        queue.extend(node.right());
    }
}

fn pre_order<'a>(node: Option<&'a OwnerNode>, out: &mut Vec<&'a OwnerNode>) {
    if let Some(node) = node {
        out.push(node);
        pre_order(node.left(), out);
        pre_order(node.right(), out);
    }
}

fn in_order<'a>(node: Option<&'a OwnerNode>, out: &mut Vec<&'a OwnerNode>) {
    if let Some(node) = node {
        in_order(node.left(), out);
        out.push(node);
        in_order(node.right(), out);
    }
}

fn post_order<'a>(node: Option<&'a OwnerNode>, out: &mut Vec<&'a OwnerNode>) {
    if let Some(node) = node {
        post_order(node.left(), out);
        post_order(node.right(), out);
        out.push(node);
    }
}
