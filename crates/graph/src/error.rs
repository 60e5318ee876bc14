use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),
}

impl GraphError {
    pub fn node_not_found(chunk_id: impl Into<String>) -> Self {
        Self::NodeNotFound(chunk_id.into())
    }
}
