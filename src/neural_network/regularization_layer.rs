use crate::error::DropoutError;
use crate::neural_network::{Layer, Phase, Tensor};
use input_validation_function::*;
use ndarray::{ArrayView1, ArrayView2, ArrayViewD, ArrayViewMut1, ArrayViewMut2, ArrayViewMutD, Zip};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Bernoulli, Distribution};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Common output shape implementation for the dropout layer.
///
/// # Parameters
///
/// - `input_shape` - The input shape the mask cache was adapted to
///
/// # Returns
///
/// * `String` - Formatted output shape string
fn dropout_output_shape(input_shape: &[usize]) -> String {
    if !input_shape.is_empty() {
        format!(
            "({})",
            input_shape
                .iter()
                .map(|x| x.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    } else {
        String::from("Unknown")
    }
}

/// Dropout layer for neural networks
pub mod dropout;
/// Forward and backward kernels shared by both masking granularities
pub mod dropout_kernel;
/// Configuration record and derived runtime constants
pub mod dropout_param;
/// Input validation functions for the dropout layer
mod input_validation_function;
/// Keep/drop mask cache reused between forward and backward
pub mod mask_cache;

pub use dropout::*;
pub use dropout_param::*;
pub use mask_cache::*;
