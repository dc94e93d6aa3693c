use super::*;

/// Forward pass recorded for the backward passes that follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ForwardPass {
    phase: Phase,
    generation: u64,
}

/// Dropout layer for neural networks, which randomly sets a fraction of input units to 0
/// during training and rescales the survivors by `1 / (1 - p)`.
///
/// The keep/drop decisions of a training forward pass are cached and replayed exactly by
/// every backward pass until the next forward pass or shape change. During inference
/// the layer is an identity map.
///
/// A second forward pass overwrites the cached mask, so gradients must be taken before
/// the next forward pass on the same layer.
///
/// # Fields
///
/// - `config` - Drop probability and the constants derived from it
/// - `mask_cache` - Keep/drop flags of the latest training forward pass
/// - `rng` - Random source owned exclusively by this layer
/// - `last_forward` - Phase and mask generation of the latest forward pass
///
/// # Example
/// ```rust
/// use dropout_layer::prelude::*;
/// use ndarray::Array2;
///
/// // Create a Dropout layer with 50% dropout rate and a fixed seed
/// let mut dropout = Dropout::with_seed(DropoutParam::new(0.5), 42).unwrap();
/// dropout.adapt_shape(&[32, 128]).unwrap();
///
/// let input = Array2::ones((32, 128)).into_dyn();
///
/// // During training, approximately 50% of values will be set to 0 and the rest to 2.0
/// let output = dropout.forward(&input, Phase::Train).unwrap();
///
/// let grad_output = Array2::ones((32, 128)).into_dyn();
/// let mut grad_input = Array2::zeros((32, 128)).into_dyn();
/// dropout.backward(&grad_output, true, &mut grad_input).unwrap();
/// assert_eq!(grad_input, output);
/// ```
pub struct Dropout<R: Rng = StdRng> {
    config: DropoutConfig,
    mask_cache: MaskCache,
    rng: R,
    last_forward: Option<ForwardPass>,
}

impl Dropout<StdRng> {
    /// Creates a new Dropout layer seeded from the operating system.
    ///
    /// # Parameters
    ///
    /// * `param` - Drop probability and masking granularity
    ///
    /// # Returns
    ///
    /// * `Result<Self, DropoutError>` - A new instance of the Dropout layer
    ///
    /// # Errors
    ///
    /// Returns `DropoutError::InvalidConfiguration` if the drop probability is not in (0, 1).
    pub fn new(param: DropoutParam) -> Result<Self, DropoutError> {
        Self::with_rng(param, StdRng::from_os_rng())
    }

    /// Creates a new Dropout layer whose masks are reproducible from `seed`.
    pub fn with_seed(param: DropoutParam, seed: u64) -> Result<Self, DropoutError> {
        Self::with_rng(param, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Dropout<R> {
    /// Creates a new Dropout layer drawing its masks from `rng`.
    ///
    /// # Parameters
    ///
    /// - `param` - Drop probability and masking granularity
    /// - `rng` - Random source; the layer takes exclusive ownership of it
    ///
    /// # Returns
    ///
    /// * `Result<Self, DropoutError>` - A new instance of the Dropout layer
    pub fn with_rng(param: DropoutParam, rng: R) -> Result<Self, DropoutError> {
        let config = DropoutConfig::from_param(&param)?;
        Ok(Dropout {
            mask_cache: MaskCache::new(config.granularity()),
            config,
            rng,
            last_forward: None,
        })
    }

    /// Changes the drop probability and re-derives the scale.
    ///
    /// Any cached mask was drawn for the old probability, so the pending
    /// forward pass is discarded and a new one is required before backward.
    pub fn set_drop_probability(&mut self, drop_probability: f32) -> Result<(), DropoutError> {
        let param = DropoutParam::new(drop_probability)
            .with_drop_full_sample(self.config.granularity() == MaskGranularity::PerSample);
        self.config = DropoutConfig::from_param(&param)?;
        self.last_forward = None;
        Ok(())
    }

    pub fn drop_probability(&self) -> f32 {
        self.config.drop_probability()
    }

    pub fn scale(&self) -> f32 {
        self.config.scale()
    }

    pub fn keep_threshold(&self) -> u32 {
        self.config.keep_threshold()
    }

    pub fn granularity(&self) -> MaskGranularity {
        self.config.granularity()
    }

    /// Returns the cached keep flags: `[batch, elements]` per element, `[batch, 1]` per sample.
    pub fn mask(&self) -> ArrayView2<'_, u32> {
        self.mask_cache.view()
    }

    /// Phase of the forward pass the next backward call will pair with, if still valid.
    pub fn pending_phase(&self) -> Option<Phase> {
        self.pending_pass().ok().map(|pass| pass.phase)
    }

    /// Runs the forward pass into a caller-owned output buffer.
    ///
    /// # Parameters
    ///
    /// - `input` - Input data, shaped as passed to the latest `adapt_shape`
    /// - `output` - Destination buffer of the same shape, in standard layout
    /// - `phase` - Training draws and caches a new mask; inference copies the input
    ///
    /// # Returns
    ///
    /// - `Ok(())` - The output was written
    /// - `Err(DropoutError::ShapeMismatch)` - If either buffer differs from the adapted shape
    /// - `Err(DropoutError::InvalidInput)` - If the output buffer is not contiguous
    pub fn forward_into(
        &mut self,
        input: ArrayViewD<f32>,
        output: ArrayViewMutD<f32>,
        phase: Phase,
    ) -> Result<(), DropoutError> {
        validate_input_shape(input.shape(), self.mask_cache.input_shape())?;
        validate_input_shape(output.shape(), self.mask_cache.input_shape())?;

        let batch_size = self.mask_cache.batch_size();
        let sample_len = self.mask_cache.sample_len();
        let input = input.as_standard_layout();
        let src = as_batch_matrix(input.view(), batch_size, sample_len)?;
        let dst = as_batch_matrix_mut(output, batch_size, sample_len)?;

        match phase {
            Phase::Inference => dropout_kernel::pass_through(src, dst),
            Phase::Train => {
                self.mask_cache
                    .refill(self.config.keep_distribution(), &mut self.rng);
                self.apply_cached_mask(src, dst);
            }
        }

        self.last_forward = Some(ForwardPass {
            phase,
            generation: self.mask_cache.generation(),
        });
        trace!(?phase, batch_size, sample_len, "dropout forward");
        Ok(())
    }

    /// Runs the backward pass into a caller-owned input-gradient buffer.
    ///
    /// Replays the mask of the preceding forward pass; no randomness is drawn.
    /// When `propagate_down` is false, `grad_input` is left untouched.
    ///
    /// # Parameters
    ///
    /// - `grad_output` - Gradient with respect to the layer output
    /// - `propagate_down` - Whether to compute the input gradient at all
    /// - `grad_input` - Destination buffer of the same shape, in standard layout
    ///
    /// # Returns
    ///
    /// - `Ok(())` - The gradient was written or skipped
    /// - `Err(DropoutError::StaleOrMissingMask)` - If no forward pass ran since the last shape change
    /// - `Err(DropoutError::ShapeMismatch)` - If either buffer differs from the adapted shape
    pub fn backward_into(
        &self,
        grad_output: ArrayViewD<f32>,
        propagate_down: bool,
        grad_input: ArrayViewMutD<f32>,
    ) -> Result<(), DropoutError> {
        if !propagate_down {
            trace!("dropout backward skipped, propagate_down is false");
            return Ok(());
        }

        let pass = self.pending_pass()?;
        validate_input_shape(grad_output.shape(), self.mask_cache.input_shape())?;
        validate_input_shape(grad_input.shape(), self.mask_cache.input_shape())?;

        let batch_size = self.mask_cache.batch_size();
        let sample_len = self.mask_cache.sample_len();
        let grad_output = grad_output.as_standard_layout();
        let src = as_batch_matrix(grad_output.view(), batch_size, sample_len)?;
        let dst = as_batch_matrix_mut(grad_input, batch_size, sample_len)?;

        match pass.phase {
            Phase::Inference => dropout_kernel::pass_through(src, dst),
            Phase::Train => self.apply_cached_mask(src, dst),
        }

        trace!(phase = ?pass.phase, batch_size, sample_len, "dropout backward");
        Ok(())
    }

    fn apply_cached_mask(&self, src: ArrayView2<f32>, dst: ArrayViewMut2<f32>) {
        let scale = self.config.scale();
        match self.mask_cache.granularity() {
            MaskGranularity::PerElement => {
                dropout_kernel::scale_per_element(src, self.mask_cache.view(), scale, dst)
            }
            MaskGranularity::PerSample => {
                dropout_kernel::scale_per_sample(src, self.mask_cache.sample_flags(), scale, dst)
            }
        }
    }

    fn pending_pass(&self) -> Result<ForwardPass, DropoutError> {
        match self.last_forward {
            Some(pass) if pass.generation == self.mask_cache.generation() => Ok(pass),
            Some(pass) => {
                warn!(
                    recorded = pass.generation,
                    current = self.mask_cache.generation(),
                    "dropout mask is stale"
                );
                Err(DropoutError::StaleOrMissingMask(
                    "input shape changed since the last forward pass".to_string(),
                ))
            }
            None => Err(DropoutError::StaleOrMissingMask(
                "backward called without a preceding forward pass".to_string(),
            )),
        }
    }
}

impl<R: Rng> Layer for Dropout<R> {
    fn adapt_shape(&mut self, input_shape: &[usize]) -> Result<(), DropoutError> {
        self.mask_cache.adapt(input_shape)?;
        Ok(())
    }

    fn forward(&mut self, input: &Tensor, phase: Phase) -> Result<Tensor, DropoutError> {
        let mut output = Tensor::zeros(input.raw_dim());
        self.forward_into(input.view(), output.view_mut(), phase)?;
        Ok(output)
    }

    fn backward(
        &mut self,
        grad_output: &Tensor,
        propagate_down: bool,
        grad_input: &mut Tensor,
    ) -> Result<(), DropoutError> {
        self.backward_into(grad_output.view(), propagate_down, grad_input.view_mut())
    }

    fn layer_type(&self) -> &str {
        "Dropout"
    }

    fn output_shape(&self) -> String {
        dropout_output_shape(self.mask_cache.input_shape())
    }
}
