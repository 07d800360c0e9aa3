//! Node-type keyed tool registry.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::{same_tool, Tool};
use crate::data::StyleData;
use crate::node::{NodeRef, NodeType};

/// Candidate tools per node type, in registration order.
///
/// Filled once at startup and handed to the tool panel, which only reads it.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<NodeType, Vec<Arc<dyn Tool>>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `tool` as a candidate for `node_type`. Registering the same
    /// instance twice under one type is a no-op.
    pub fn register(&mut self, node_type: NodeType, tool: Arc<dyn Tool>) {
        let candidates = self.tools.entry(node_type).or_default();
        if !candidates.iter().any(|existing| same_tool(existing, &tool)) {
            candidates.push(tool);
        }
    }

    /// Registers one instance under every type in `node_types`.
    pub fn register_all(&mut self, node_types: &[NodeType], tool: Arc<dyn Tool>) {
        for node_type in node_types {
            self.register(*node_type, tool.clone());
        }
    }

    pub fn tools_for(&self, node_type: NodeType) -> &[Arc<dyn Tool>] {
        self.tools
            .get(&node_type)
            .map(|tools| tools.as_slice())
            .unwrap_or(&[])
    }

    /// Builds the consolidated tool list for a selection.
    ///
    /// Node types are scanned in the caller's order and candidates in
    /// registration order; each applicable instance is kept once, at its
    /// first discovery. A `supports` call that panics counts as not
    /// applicable.
    pub fn consolidate(
        &self,
        unique_node_types: &[NodeType],
        nodes: &[NodeRef],
        data_items: &[StyleData],
    ) -> Vec<Arc<dyn Tool>> {
        let mut consolidated: Vec<Arc<dyn Tool>> = Vec::new();

        for node_type in unique_node_types {
            for tool in self.tools_for(*node_type) {
                if consolidated.iter().any(|existing| same_tool(existing, tool)) {
                    continue;
                }
                if supports_isolated(tool, unique_node_types, nodes, data_items) {
                    consolidated.push(tool.clone());
                }
            }
        }

        consolidated
    }
}

fn supports_isolated(
    tool: &Arc<dyn Tool>,
    unique_node_types: &[NodeType],
    nodes: &[NodeRef],
    data_items: &[StyleData],
) -> bool {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        tool.supports(unique_node_types, nodes, data_items)
    }));
    match result {
        Ok(supported) => supported,
        Err(_) => {
            tracing::error!("tool {} panicked in supports; skipping", tool.tool_name());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::FileNode;
    use crate::surface::{Size, Surface, SurfaceHandle};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingTool {
        name: String,
        accepts: Vec<NodeType>,
        supports_calls: AtomicUsize,
        panel: SurfaceHandle,
    }

    impl CountingTool {
        fn new(name: &str, accepts: Vec<NodeType>) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                accepts,
                supports_calls: AtomicUsize::new(0),
                panel: Arc::new(Surface::new(name, Size::new(60, 50), vec![])),
            })
        }
    }

    impl Tool for CountingTool {
        fn panel(&self) -> SurfaceHandle {
            self.panel.clone()
        }

        fn set_selected_items(&self, _nodes: &[NodeRef], _data_items: &[StyleData]) {}

        fn supports(&self, unique: &[NodeType], _nodes: &[NodeRef], _data: &[StyleData]) -> bool {
            self.supports_calls.fetch_add(1, Ordering::SeqCst);
            unique.iter().all(|t| self.accepts.contains(t))
        }

        fn tool_name(&self) -> &str {
            &self.name
        }
    }

    fn names(tools: &[Arc<dyn Tool>]) -> Vec<&str> {
        tools.iter().map(|t| t.tool_name()).collect()
    }

    fn file() -> NodeRef {
        Arc::new(FileNode::new("a.sld", "/a.sld"))
    }

    #[test]
    fn empty_registry_yields_nothing() {
        let registry = ToolRegistry::new();
        assert!(registry.tools_for(NodeType::File).is_empty());
        assert!(registry
            .consolidate(&[NodeType::File], &[file()], &[])
            .is_empty());
    }

    #[test]
    fn duplicate_registration_under_one_type_is_ignored() {
        let mut registry = ToolRegistry::new();
        let tool = CountingTool::new("export", vec![NodeType::File]);
        registry.register(NodeType::File, tool.clone());
        registry.register(NodeType::File, tool);
        assert_eq!(registry.tools_for(NodeType::File).len(), 1);
        assert!(registry.tools_for(NodeType::Folder).is_empty());
    }

    #[test]
    fn shared_tool_consolidated_once_and_tested_once() {
        let mut registry = ToolRegistry::new();
        let shared = CountingTool::new("shared", vec![NodeType::File, NodeType::Folder]);
        registry.register_all(&[NodeType::File, NodeType::Folder], shared.clone());

        let tools = registry.consolidate(&[NodeType::File, NodeType::Folder], &[file()], &[]);
        assert_eq!(names(&tools), vec!["shared"]);
        assert_eq!(shared.supports_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn order_follows_node_types_then_registration() {
        let mut registry = ToolRegistry::new();
        let both = vec![NodeType::File, NodeType::Folder];
        registry.register(NodeType::Folder, CountingTool::new("folder-a", both.clone()));
        registry.register(NodeType::File, CountingTool::new("file-a", both.clone()));
        registry.register(NodeType::File, CountingTool::new("file-b", both.clone()));

        let tools = registry.consolidate(&[NodeType::File, NodeType::Folder], &[file()], &[]);
        assert_eq!(names(&tools), vec!["file-a", "file-b", "folder-a"]);

        let tools = registry.consolidate(&[NodeType::Folder, NodeType::File], &[file()], &[]);
        assert_eq!(names(&tools), vec!["folder-a", "file-a", "file-b"]);
    }

    #[test]
    fn unsupported_candidates_are_dropped() {
        let mut registry = ToolRegistry::new();
        registry.register(NodeType::File, CountingTool::new("files-only", vec![NodeType::File]));

        let tools = registry.consolidate(&[NodeType::File, NodeType::Folder], &[file()], &[]);
        assert!(tools.is_empty());
    }
}
