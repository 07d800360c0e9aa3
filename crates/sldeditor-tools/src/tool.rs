//! Pluggable, selection-reactive tool panels.

pub mod layer_update;
pub mod panel;
pub mod registry;

use std::sync::Arc;

use crate::data::StyleData;
use crate::node::{NodeRef, NodeType};
use crate::surface::SurfaceHandle;

/// Contract every tool shown in the tool panel satisfies.
///
/// One instance may be registered under several node types; the panel
/// still shows and notifies it at most once per selection.
pub trait Tool: Send + Sync {
    /// Returns the same surface on every call, selection or not.
    fn panel(&self) -> SurfaceHandle;

    /// Receives the current selection. Implementations discard the working
    /// state of the previous selection before resolving the new one.
    fn set_selected_items(&self, nodes: &[NodeRef], data_items: &[StyleData]);

    /// Side-effect free applicability test. A selection the tool cannot
    /// handle yields `false`, never an error.
    fn supports(
        &self,
        unique_node_types: &[NodeType],
        nodes: &[NodeRef],
        data_items: &[StyleData],
    ) -> bool;

    /// Diagnostic name only; identity is the instance.
    fn tool_name(&self) -> &str;
}

/// Instance identity of two tool handles.
pub fn same_tool(a: &Arc<dyn Tool>, b: &Arc<dyn Tool>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
