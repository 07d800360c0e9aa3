//! Drives the tool panel with a sample navigation tree.
//!
//! Usage: tool_panel_demo [preferences-dir]
//!
//! Set `RUST_LOG=debug` to see every displayed tool.

use std::path::PathBuf;
use std::sync::Arc;

use sldeditor_tools::node::{
    ConnectionNode, FileNode, LayerHeadingNode, LayerNode, StyleHeadingNode, StyleNode,
    WorkspaceNode,
};
use sldeditor_tools::remote::{LayerStyleAssignment, StyleMap};
use sldeditor_tools::tool::layer_update::LayerStyleDialogFactory;
use sldeditor_tools::{
    load_or_create_preferences, LayerStyleDialog, LayerStyleService, LayerUpdateTool,
    MemoryLayerStyleService, NodeRef, PanelPreferences, RemoteConnection, RemoteLayer,
    SelectionTracker, StyleData, StyleReference, ToolPanel, ToolRegistry,
};
use tracing_subscriber::EnvFilter;

/// Assigns the first offered style to every layer without asking.
struct FirstStyleDialog {
    assignments: Vec<LayerStyleAssignment>,
}

impl LayerStyleDialog for FirstStyleDialog {
    fn populate(&mut self, style_map: &StyleMap, layers: &[RemoteLayer]) -> bool {
        let Some(style) = style_map.values().flatten().next() else {
            return false;
        };
        self.assignments = layers
            .iter()
            .map(|layer| LayerStyleAssignment {
                layer: layer.clone(),
                style: style.clone(),
            })
            .collect();
        true
    }

    fn updated_layer_styles(&self) -> Vec<LayerStyleAssignment> {
        self.assignments.clone()
    }
}

struct SampleTree {
    root: NodeRef,
    heading: NodeRef,
    workspace: NodeRef,
    layer: NodeRef,
}

fn sample_tree(connection: &RemoteConnection) -> SampleTree {
    let layer = |name: &str| -> NodeRef {
        Arc::new(LayerNode::new(
            RemoteLayer::new("topp", name, connection.clone())
                .with_style(StyleReference::new("", "polygon")),
        ))
    };
    let states = layer("states");
    let topp: NodeRef = Arc::new(WorkspaceNode::new(
        "topp",
        connection.clone(),
        false,
        vec![states.clone(), layer("tasmania_roads")],
    ));
    let heading: NodeRef = Arc::new(LayerHeadingNode::new(connection.clone(), vec![topp.clone()]));
    let polygon: NodeRef = Arc::new(StyleNode::new(StyleReference::new("", "polygon")));
    let style_workspace: NodeRef = Arc::new(WorkspaceNode::new(
        "styles",
        connection.clone(),
        true,
        vec![polygon],
    ));
    let styles: NodeRef = Arc::new(StyleHeadingNode::new(
        connection.clone(),
        vec![style_workspace],
    ));
    let root: NodeRef = Arc::new(ConnectionNode::new(
        connection.clone(),
        vec![heading.clone(), styles],
    ));
    SampleTree {
        root,
        heading,
        workspace: topp,
        layer: states,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let preferences = match std::env::args().nth(1) {
        Some(dir) => load_or_create_preferences(&PathBuf::from(dir))?,
        None => PanelPreferences::default(),
    };

    let connection = RemoteConnection::new("local", "http://localhost:8080/geoserver");
    let service = Arc::new(MemoryLayerStyleService::new());
    service.add_style(&connection, StyleReference::new("topp", "population"));

    let factory: LayerStyleDialogFactory = Arc::new(|| {
        Box::new(FirstStyleDialog {
            assignments: Vec::new(),
        }) as Box<dyn LayerStyleDialog>
    });
    let layer_tool = Arc::new(LayerUpdateTool::new(
        Some(service.clone() as Arc<dyn LayerStyleService>),
        factory,
        &preferences,
    ));

    let mut registry = ToolRegistry::new();
    registry.register_all(LayerUpdateTool::supported_node_types(), layer_tool.clone());

    let tracker = Arc::new(SelectionTracker::new());
    let panel = ToolPanel::new(tracker.clone(), registry, preferences);

    let tree = sample_tree(&connection);
    let file: NodeRef = Arc::new(FileNode::new("roads.sld", "styles/roads.sld"));

    let selections = [
        ("file", vec![file]),
        ("connection", vec![tree.root]),
        ("layer", vec![tree.layer.clone()]),
        ("layer + workspace", vec![tree.layer, tree.workspace]),
        ("heading", vec![tree.heading]),
    ];
    for (label, nodes) in selections {
        let data = vec![StyleData::from_file("roads", "styles/roads.sld")];
        let outcome = panel.apply(&tracker.select(&nodes, data));
        tracing::info!(
            "{label}: tools={:?} placeholder={} surfaces={}",
            outcome.active_tools,
            outcome.placeholder,
            panel.displayed_surfaces().len()
        );
    }

    let layers: Vec<String> = layer_tool
        .layers()
        .into_iter()
        .map(|layer| layer.layer_name)
        .collect();
    tracing::info!("resolved layers: {layers:?}");

    let outcome = layer_tool.layer_update_button_pressed().await?;
    tracing::info!("update outcome: {outcome:?}");
    for batch in service.committed() {
        for assignment in batch {
            println!("{} -> {}", assignment.layer.layer_name, assignment.style);
        }
    }

    Ok(())
}
