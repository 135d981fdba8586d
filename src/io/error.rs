//! Error types for object and frame generation

use thiserror::Error;

/// Main error type for all generator operations
#[derive(Debug, Error)]
pub enum ObjectStudioError {
    /// Frame or buffer dimensions do not fit the base cell grid
    #[error("Dimension mismatch for '{frame}' ({width}x{height}): {reason}")]
    DimensionMismatch {
        /// Frame identifier, or a description of the buffer
        frame: String,
        /// Offending width in pixels
        width: usize,
        /// Offending height in pixels
        height: usize,
        /// What the dimensions were expected to satisfy
        reason: String,
    },

    /// No frames were supplied to a pipeline entry point
    #[error("No frames supplied to {operation}")]
    EmptyInput {
        /// Pipeline that received the empty batch
        operation: &'static str,
    },

    /// A placement names an object the library does not hold
    #[error(
        "Frame '{frame}' references object {object} which is not in the library ({library_size} objects)"
    )]
    UnresolvedObjectReference {
        /// Frame being reconstructed
        frame: String,
        /// Object identifier that failed to resolve
        object: usize,
        /// Number of objects in the supplied library
        library_size: usize,
    },

    /// Configuration parameter validation failed
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidConfiguration {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A placement would be drawn entirely outside its frame
    #[error(
        "Frame '{frame}' ({width}x{height}) places object {object} at ({x}, {y}), outside the frame"
    )]
    PlacementOutOfBounds {
        /// Frame being reconstructed
        frame: String,
        /// Object the placement draws
        object: usize,
        /// Destination column of the top-left pixel
        x: i64,
        /// Destination row of the top-left pixel
        y: i64,
        /// Declared frame width
        width: usize,
        /// Declared frame height
        height: usize,
    },

    /// A placement targets a frame with no declared dimensions
    #[error("Placement targets unknown frame '{frame}'")]
    UnknownFrame {
        /// Frame identifier found on the placement
        frame: String,
    },

    /// Processing of a frame was abandoned through its cancel flag
    #[error("Processing of frame '{frame}' was cancelled")]
    Cancelled {
        /// Frame whose scan was abandoned
        frame: String,
    },

    /// Placement metadata could not be serialized or parsed
    #[error("Manifest error: {source}")]
    Manifest {
        /// Underlying JSON error
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience type alias for generator results
pub type Result<T> = std::result::Result<T, ObjectStudioError>;

/// Create an invalid configuration error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ObjectStudioError {
    ObjectStudioError::InvalidConfiguration {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a dimension mismatch error
pub fn dimension_mismatch(
    frame: &str,
    width: usize,
    height: usize,
    reason: &impl ToString,
) -> ObjectStudioError {
    ObjectStudioError::DimensionMismatch {
        frame: frame.to_string(),
        width,
        height,
        reason: reason.to_string(),
    }
}

impl ObjectStudioError {
    /// Frame the error is attributed to, when there is one
    pub fn frame(&self) -> Option<&str> {
        match self {
            Self::DimensionMismatch { frame, .. }
            | Self::UnresolvedObjectReference { frame, .. }
            | Self::PlacementOutOfBounds { frame, .. }
            | Self::UnknownFrame { frame }
            | Self::Cancelled { frame } => Some(frame),
            Self::EmptyInput { .. } | Self::InvalidConfiguration { .. } | Self::Manifest { .. } => {
                None
            }
        }
    }
}
