//! Structured error types for gridctrl.
//!
//! Every public mutator reports failure through these values; nothing
//! panics across the crate boundary.

/// All errors that can occur while mutating a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Row or column outside the current bounds.
    #[error("Invalid cell address: ({row}, {col})")]
    InvalidAddress { row: u32, col: u32 },

    /// Growing the cell store or geometry vectors failed.
    #[error("Allocation failed while resizing to {requested} entries")]
    AllocationFailure { requested: usize },

    /// A merge handle or cached coordinate no longer refers to live data.
    #[error("Stale handle: {0}")]
    StaleHandle(usize),

    /// A structural mutator was re-entered while already running.
    #[error("Structural change already in progress")]
    Reentrant,

    /// A fixed/frozen count that would exceed the grid size.
    #[error("Invalid {what} count {count} (limit {limit})")]
    InvalidCount {
        what: &'static str,
        count: u32,
        limit: u32,
    },

    /// Column layer blob could not be decoded.
    #[error("Layer decode: {0}")]
    Layer(String),

    /// JSON (configuration or layer) could not be parsed.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
