use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::data::StyleData;
use crate::node::{NodeRef, NodeType};

/// Payload of one selection change. Built fresh per change and dropped
/// after dispatch.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub unique_node_types: Vec<NodeType>,
    pub nodes: Vec<NodeRef>,
    pub data_items: Vec<StyleData>,
}

impl Selection {
    /// Derives `unique_node_types` from `nodes` in first-seen order.
    pub fn new(nodes: Vec<NodeRef>, data_items: Vec<StyleData>) -> Self {
        let mut unique_node_types = Vec::new();
        for node in &nodes {
            let node_type = node.node_type();
            if !unique_node_types.contains(&node_type) {
                unique_node_types.push(node_type);
            }
        }
        Self {
            unique_node_types,
            nodes,
            data_items,
        }
    }
}

/// The collaborator owning the tree selection.
pub trait SelectionSource: Send + Sync {
    fn set_recursive_flag(&self, recursive: bool);
}

/// Builds selection payloads from the tree's selected nodes.
///
/// With the recursive flag on, every descendant of a selected node joins
/// the selection (pre-order, each node once).
#[derive(Debug, Default)]
pub struct SelectionTracker {
    recursive: AtomicBool,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive.load(Ordering::Relaxed)
    }

    pub fn select(&self, selected: &[NodeRef], data_items: Vec<StyleData>) -> Selection {
        let mut collected = Collected::default();
        let recursive = self.is_recursive();
        for node in selected {
            if recursive {
                collected.push_descendants(node);
            } else {
                collected.push(node);
            }
        }
        Selection::new(collected.nodes, data_items)
    }
}

impl SelectionSource for SelectionTracker {
    fn set_recursive_flag(&self, recursive: bool) {
        self.recursive.store(recursive, Ordering::Relaxed);
    }
}

/// Nodes in selection order, each node once by identity.
#[derive(Default)]
struct Collected {
    nodes: Vec<NodeRef>,
    seen: HashSet<*const ()>,
}

impl Collected {
    fn push(&mut self, node: &NodeRef) -> bool {
        let inserted = self.seen.insert(Arc::as_ptr(node) as *const ());
        if inserted {
            self.nodes.push(node.clone());
        }
        inserted
    }

    fn push_descendants(&mut self, node: &NodeRef) {
        // A node already collected brought its subtree along with it.
        if !self.push(node) {
            return;
        }
        for child in node.children() {
            self.push_descendants(child);
        }
    }
}
