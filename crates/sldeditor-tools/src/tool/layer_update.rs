//! Bulk update of the styles assigned to GeoServer layers.
//!
//! The selection is resolved into a flat list of layers plus the
//! connection they live on. Pressing the update button then fetches the
//! available styles, lets the user map layers to styles, and commits the
//! result in one batch.

use std::sync::Arc;

use parking_lot::Mutex;

use super::Tool;
use crate::config::PanelPreferences;
use crate::data::StyleData;
use crate::error::{ToolError, ToolResult};
use crate::node::{
    downcast, LayerHeadingNode, LayerNode, NodeRef, NodeType, SelectionNode, WorkspaceNode,
};
use crate::remote::{
    LayerStyleAssignment, LayerStyleService, RemoteConnection, RemoteLayer, StyleMap,
};
use crate::surface::{Surface, SurfaceAction, SurfaceHandle};

pub const LAYER_UPDATE_TOOL_NAME: &str = "geoserver-layer-update";
pub const LAYER_UPDATE_ACTION: &str = "layer-update";

const SUPPORTED_NODE_TYPES: [NodeType; 3] = [
    NodeType::GeoServerLayerHeading,
    NodeType::GeoServerWorkspace,
    NodeType::GeoServerLayer,
];

/// The interactive step between fetching styles and committing.
pub trait LayerStyleDialog: Send {
    /// Shows the dialog. Returns `true` when the user accepted.
    fn populate(&mut self, style_map: &StyleMap, layers: &[RemoteLayer]) -> bool;

    fn updated_layer_styles(&self) -> Vec<LayerStyleAssignment>;
}

/// Creates a fresh dialog for every button press.
pub type LayerStyleDialogFactory = Arc<dyn Fn() -> Box<dyn LayerStyleDialog> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// No style service is configured; nothing happened.
    NoService,
    Cancelled,
    Committed { layers: usize },
}

#[derive(Debug, Default)]
struct WorkingSet {
    layers: Vec<RemoteLayer>,
    connection: Option<RemoteConnection>,
    /// First connection seen that differs from `connection`.
    conflict: Option<RemoteConnection>,
}

impl WorkingSet {
    fn adopt(&mut self, connection: &RemoteConnection) {
        if self.connection.is_none() {
            self.connection = Some(connection.clone());
        } else if self.connection.as_ref() != Some(connection) {
            self.note_conflict(connection);
        }
    }

    fn push_layer(&mut self, layer: &RemoteLayer) {
        if self
            .connection
            .as_ref()
            .is_some_and(|current| *current != layer.connection)
        {
            self.note_conflict(&layer.connection);
        }
        self.layers.push(layer.clone());
    }

    fn note_conflict(&mut self, connection: &RemoteConnection) {
        if self.conflict.is_none() {
            self.conflict = Some(connection.clone());
        }
    }

    fn extract_workspace_layers(&mut self, workspace: &WorkspaceNode) {
        for child in workspace.children() {
            if let Some(layer_node) = downcast::<LayerNode>(child) {
                self.push_layer(layer_node.layer());
            }
        }
    }
}

pub struct LayerUpdateTool {
    service: Option<Arc<dyn LayerStyleService>>,
    dialog_factory: LayerStyleDialogFactory,
    panel: SurfaceHandle,
    working: Mutex<WorkingSet>,
}

impl LayerUpdateTool {
    pub fn new(
        service: Option<Arc<dyn LayerStyleService>>,
        dialog_factory: LayerStyleDialogFactory,
        preferences: &PanelPreferences,
    ) -> Self {
        let action = SurfaceAction {
            id: LAYER_UPDATE_ACTION.to_string(),
            label: "Layer".to_string(),
            icon: Some("tool/layerupdate.png".to_string()),
        };
        Self {
            service,
            dialog_factory,
            panel: Arc::new(Surface::new(
                "GeoServer Layer Style",
                preferences.layer_update_size(),
                vec![action],
            )),
            working: Mutex::new(WorkingSet::default()),
        }
    }

    /// Node types this tool should be registered under.
    pub fn supported_node_types() -> &'static [NodeType] {
        &SUPPORTED_NODE_TYPES
    }

    /// Layers resolved from the current selection, in resolution order.
    pub fn layers(&self) -> Vec<RemoteLayer> {
        self.working.lock().layers.clone()
    }

    /// Connection adopted for the current selection (first seen wins).
    pub fn connection(&self) -> Option<RemoteConnection> {
        self.working.lock().connection.clone()
    }

    /// Fetch styles → ask the user → commit.
    ///
    /// Nothing is committed when the dialog is cancelled, and nothing is
    /// fetched when the selection spans more than one connection.
    pub async fn layer_update_button_pressed(&self) -> ToolResult<UpdateOutcome> {
        let Some(service) = &self.service else {
            return Ok(UpdateOutcome::NoService);
        };

        let (connection, layers) = {
            let working = self.working.lock();
            let connection = working.connection.clone().ok_or(ToolError::NoConnection)?;
            if let Some(other) = &working.conflict {
                return Err(ToolError::MixedConnections {
                    first: connection.to_string(),
                    other: other.to_string(),
                });
            }
            (connection, working.layers.clone())
        };

        let style_map = service.style_map(&connection).await?;

        let mut dialog = (self.dialog_factory)();
        if !dialog.populate(&style_map, &layers) {
            tracing::debug!("layer style update cancelled");
            return Ok(UpdateOutcome::Cancelled);
        }

        let assignments = dialog.updated_layer_styles();
        let count = assignments.len();
        service.update_layer_style(assignments).await?;
        tracing::info!("updated style of {count} layer(s) on {connection}");
        Ok(UpdateOutcome::Committed { layers: count })
    }
}

impl Tool for LayerUpdateTool {
    fn panel(&self) -> SurfaceHandle {
        self.panel.clone()
    }

    fn set_selected_items(&self, nodes: &[NodeRef], _data_items: &[StyleData]) {
        let mut working = self.working.lock();
        *working = WorkingSet::default();

        for node in nodes {
            if let Some(layer_node) = downcast::<LayerNode>(node) {
                working.adopt(&layer_node.layer().connection);
                working.push_layer(layer_node.layer());
            } else if let Some(heading) = downcast::<LayerHeadingNode>(node) {
                working.adopt(heading.connection());
                for child in heading.children() {
                    if let Some(workspace) = downcast::<WorkspaceNode>(child) {
                        working.extract_workspace_layers(workspace);
                    }
                }
            } else if let Some(workspace) = downcast::<WorkspaceNode>(node) {
                if !workspace.is_style() {
                    working.adopt(workspace.connection());
                    working.extract_workspace_layers(workspace);
                }
            }
        }

        if let Some(conflict) = &working.conflict {
            tracing::warn!(
                "layer selection spans connections; {conflict} differs from the first one"
            );
        }
    }

    fn supports(
        &self,
        unique_node_types: &[NodeType],
        nodes: &[NodeRef],
        _data_items: &[StyleData],
    ) -> bool {
        if unique_node_types.len() != 1 {
            return false;
        }
        let Some(node) = nodes.first() else {
            return false;
        };
        let node_type = node.node_type();
        if !SUPPORTED_NODE_TYPES.contains(&node_type) {
            return false;
        }
        if node_type == NodeType::GeoServerWorkspace {
            // Every selected workspace must hold layers, whatever the click order.
            return nodes.iter().all(|node| {
                downcast::<WorkspaceNode>(node).is_some_and(|workspace| !workspace.is_style())
            });
        }
        true
    }

    fn tool_name(&self) -> &str {
        LAYER_UPDATE_TOOL_NAME
    }
}
