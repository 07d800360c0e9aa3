//! Tool selection and dynamic panel composition for the style editor.
//!
//! This crate provides:
//! - A node capability model for the navigation tree
//! - The pluggable tool contract and a node-type keyed registry
//! - The dispatch panel that rebuilds the visible tool set per selection
//! - The GeoServer bulk layer-style update tool

pub mod config;
pub mod data;
pub mod error;
pub mod node;
pub mod remote;
pub mod selection;
pub mod surface;
pub mod tool;

pub use config::{load_or_create_preferences, PanelPreferences};
pub use data::StyleData;
pub use error::{ToolError, ToolResult};
pub use node::{NodeRef, NodeType, SelectionNode};
pub use remote::{
    LayerStyleAssignment, LayerStyleService, MemoryLayerStyleService, RemoteConnection,
    RemoteLayer, StyleMap, StyleReference,
};
pub use selection::{Selection, SelectionSource, SelectionTracker};
pub use surface::{PanelArea, Size, Surface, SurfaceContainer, SurfaceHandle};
pub use tool::layer_update::{LayerStyleDialog, LayerUpdateTool, UpdateOutcome};
pub use tool::panel::{DispatchOutcome, ToolPanel};
pub use tool::registry::ToolRegistry;
pub use tool::Tool;
