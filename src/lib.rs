/// Module `error` contains the error type shared by every fallible operation in this crate.
///
/// # Variants
/// - `InvalidConfiguration` - rejected drop probability, raised at setup time
/// - `ShapeMismatch` - a buffer does not match the adapted input shape
/// - `StaleOrMissingMask` - backward without a matching forward pass
/// - `InvalidInput` - a buffer cannot be viewed as a contiguous batch matrix
pub mod error;

/// Module `traits` defines the `Layer` contract the enclosing computation graph drives.
pub mod traits;

/// Module `neural_network` provides the inverted dropout layer.
///
/// During training the layer zeroes each element (or each whole sample) with probability `p`
/// and rescales survivors by `1 / (1 - p)`, caching the keep mask so the backward pass applies
/// exactly the same decisions. During inference it is an identity map.
///
/// # Core Components
/// - **Dropout**: the layer itself, owning its random source and mask cache
/// - **DropoutParam / DropoutConfig**: configuration record and the constants derived from it
/// - **MaskCache**: keep flags tagged with the shape generation they were drawn for
/// - **dropout_kernel**: the multiply-and-scale kernels, parallelized with rayon on large inputs
///
/// # Examples
/// ```rust
/// use dropout_layer::prelude::*;
/// use ndarray::Array;
///
/// let param = DropoutParam::new(0.25).with_drop_full_sample(true);
/// let mut dropout = Dropout::with_seed(param, 7).unwrap();
///
/// let x = Array::ones((4, 3, 2)).into_dyn();
/// dropout.adapt_shape(x.shape()).unwrap();
///
/// // Inference is an identity map
/// let y = dropout.forward(&x, Phase::Inference).unwrap();
/// assert_eq!(y, x);
///
/// // Training drops whole samples
/// let y = dropout.forward(&x, Phase::Train).unwrap();
/// assert_eq!(dropout.mask().shape(), &[4, 1]);
/// ```
pub mod neural_network;

/// A convenience module that re-exports the most commonly used types and traits from this crate.
pub mod prelude;

pub use error::DropoutError;
