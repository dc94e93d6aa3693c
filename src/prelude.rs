pub use crate::error::DropoutError;
pub use crate::neural_network::regularization_layer::dropout_kernel::DROPOUT_PARALLEL_THRESHOLD;
pub use crate::neural_network::regularization_layer::*;
pub use crate::neural_network::{Phase, Tensor};
pub use crate::traits::Layer;
