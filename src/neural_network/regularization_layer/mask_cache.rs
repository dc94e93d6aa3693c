use super::*;
use ndarray::Array2;

/// Granularity at which keep/drop decisions are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskGranularity {
    /// One independent decision per scalar element
    PerElement,
    /// One decision per sample, broadcast across all of its elements
    PerSample,
}

/// Keep/drop flags shared by a forward pass and the backward passes that follow it.
///
/// The mask is a `[batch, elements]` matrix in per-element mode and a `[batch, 1]`
/// column in per-sample mode. Every change of the adapted input shape bumps the
/// generation, so a pass recorded against an older generation can be detected.
///
/// # Fields
///
/// - `mask` - Flags in `{0, 1}`, 1 meaning keep
/// - `granularity` - Per-element or per-sample masking
/// - `input_shape` - Full input shape the cache was adapted to
/// - `generation` - Incremented on every shape change
#[derive(Debug, Clone)]
pub struct MaskCache {
    mask: Array2<u32>,
    granularity: MaskGranularity,
    input_shape: Vec<usize>,
    generation: u64,
}

impl MaskCache {
    /// Creates an empty cache; [`MaskCache::adapt`] must run before it can be filled.
    pub fn new(granularity: MaskGranularity) -> Self {
        MaskCache {
            mask: Array2::zeros((0, 0)),
            granularity,
            input_shape: Vec::new(),
            generation: 0,
        }
    }

    /// Resizes the cache for an input of the given shape.
    ///
    /// Calling this again with an unchanged shape does nothing.
    ///
    /// # Parameters
    ///
    /// * `input_shape` - Full input shape, batch axis first
    ///
    /// # Returns
    ///
    /// - `Ok(true)` - The shape changed and any recorded pass is now stale
    /// - `Ok(false)` - The shape was already current
    /// - `Err(DropoutError::InvalidInput)` - If the shape has no batch axis
    pub fn adapt(&mut self, input_shape: &[usize]) -> Result<bool, DropoutError> {
        let (batch_size, sample_len) = split_batch_shape(input_shape)?;
        if self.input_shape == input_shape {
            return Ok(false);
        }

        let dims = match self.granularity {
            MaskGranularity::PerElement => (batch_size, sample_len),
            MaskGranularity::PerSample => (batch_size, 1),
        };
        if self.mask.dim() != dims {
            debug!(?dims, granularity = ?self.granularity, "reallocating dropout mask");
            self.mask = Array2::zeros(dims);
        }

        self.input_shape = input_shape.to_vec();
        self.generation += 1;
        Ok(true)
    }

    /// Overwrites every flag with a fresh Bernoulli draw, in row-major order.
    pub(super) fn refill<R: Rng + ?Sized>(&mut self, keep: &Bernoulli, rng: &mut R) {
        dropout_kernel::draw_mask(self.mask.view_mut(), keep, rng);
    }

    /// Returns a read-only view of the flags.
    pub fn view(&self) -> ArrayView2<'_, u32> {
        self.mask.view()
    }

    /// Returns the per-sample flags as a column of length `batch_size`.
    ///
    /// Only meaningful in per-sample mode.
    pub(super) fn sample_flags(&self) -> ArrayView1<'_, u32> {
        self.mask.column(0)
    }

    pub fn granularity(&self) -> MaskGranularity {
        self.granularity
    }

    pub fn input_shape(&self) -> &[usize] {
        &self.input_shape
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_adapted(&self) -> bool {
        !self.input_shape.is_empty()
    }

    pub fn batch_size(&self) -> usize {
        self.input_shape.first().copied().unwrap_or(0)
    }

    /// Number of scalar elements in one sample of the adapted input.
    pub fn sample_len(&self) -> usize {
        self.input_shape.iter().skip(1).product()
    }
}
