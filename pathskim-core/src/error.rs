use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Node ID: {0} not in the network")]
    NodeNotFound(String),
    #[error("Invalid node index: {0}")]
    InvalidNodeIndex(usize),
    #[error("Unsupported output type '{format}'. Please use one of {supported}")]
    UnsupportedFormat {
        format: String,
        supported: &'static str,
    },
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
