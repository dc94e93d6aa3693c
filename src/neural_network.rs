/// Module that contains the dropout layer, its mask cache and kernels
pub mod regularization_layer;

pub use regularization_layer::*;

pub use crate::error::DropoutError;
pub use crate::traits::Layer;
use ndarray::ArrayD;

/// Type alias for n-dimensional arrays used as tensors in the neural network
pub type Tensor = ArrayD<f32>;

/// Execution phase of a forward/backward pair.
///
/// Supplied by the caller on every forward call. The backward call that
/// follows reuses the phase of the forward it pairs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Random masking is applied and cached for the backward pass
    Train,
    /// The layer is an identity map
    Inference,
}

