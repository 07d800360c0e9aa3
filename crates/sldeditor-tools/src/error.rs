#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("No connection resolved for the current selection")]
    NoConnection,

    #[error("Selection spans multiple connections: {first} and {other}")]
    MixedConnections { first: String, other: String },

    #[error("Style service error: {0}")]
    Service(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ToolResult<T> = std::result::Result<T, ToolError>;
