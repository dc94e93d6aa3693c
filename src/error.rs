/// Error types that can occur while configuring or running a dropout layer
///
/// # Variants
///
/// - `InvalidConfiguration` - the drop probability is outside the open interval (0, 1) or its derived scale is unusable
/// - `ShapeMismatch` - a buffer presented to the layer does not match the shape the mask cache was adapted to
/// - `StaleOrMissingMask` - backward was requested without a forward pass for the current mask
/// - `InvalidInput` - a buffer cannot be interpreted as a contiguous `[batch, elements]` block
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DropoutError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    #[error("Stale or missing mask: {0}")]
    StaleOrMissingMask(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
