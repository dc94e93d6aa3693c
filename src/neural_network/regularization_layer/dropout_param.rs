use super::*;

/// Drop probability used when a configuration record does not name one
pub const DEFAULT_DROPOUT_RATIO: f32 = 0.5;

/// Configuration record handed to the dropout layer by the enclosing graph.
///
/// # Fields
///
/// - `dropout_ratio` - Probability of dropping each element (or each sample). Must lie in (0, 1).
/// - `drop_full_sample` - When `true`, one keep/drop decision is drawn per sample and broadcast
///   across all of its elements.
///
/// # Example
/// ```rust
/// use dropout_layer::prelude::*;
///
/// let param: DropoutParam = DropoutParam::new(0.3).with_drop_full_sample(true);
/// assert_eq!(param.dropout_ratio, 0.3);
/// assert!(param.drop_full_sample);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropoutParam {
    pub dropout_ratio: f32,
    pub drop_full_sample: bool,
}

impl Default for DropoutParam {
    fn default() -> Self {
        DropoutParam {
            dropout_ratio: DEFAULT_DROPOUT_RATIO,
            drop_full_sample: false,
        }
    }
}

impl DropoutParam {
    /// Creates a per-element configuration with the given drop probability.
    pub fn new(dropout_ratio: f32) -> Self {
        DropoutParam {
            dropout_ratio,
            drop_full_sample: false,
        }
    }

    /// Sets whether masking is shared across all elements of a sample.
    pub fn with_drop_full_sample(mut self, drop_full_sample: bool) -> Self {
        self.drop_full_sample = drop_full_sample;
        self
    }
}

/// Runtime constants derived from a [`DropoutParam`].
///
/// # Fields
///
/// - `drop_probability` - Validated drop probability `p`
/// - `scale` - Survivor scale `1 / (1 - p)`
/// - `keep_threshold` - `u32::MAX * p`; a uniform `u32` draw above it counts as a keep
/// - `granularity` - Per-element or per-sample masking
/// - `keep_distribution` - Bernoulli trial with success probability `1 - p`
#[derive(Debug, Clone, PartialEq)]
pub struct DropoutConfig {
    drop_probability: f32,
    scale: f32,
    keep_threshold: u32,
    granularity: MaskGranularity,
    keep_distribution: Bernoulli,
}

impl DropoutConfig {
    /// Validates a configuration record and derives the runtime constants.
    ///
    /// # Parameters
    ///
    /// * `param` - The configuration record to derive from
    ///
    /// # Returns
    ///
    /// * `Result<Self, DropoutError>` - The derived configuration
    ///
    /// # Errors
    ///
    /// Returns `DropoutError::InvalidConfiguration` if `dropout_ratio` is not in (0, 1)
    /// or is so small that `1 - p` rounds to 1.
    pub fn from_param(param: &DropoutParam) -> Result<Self, DropoutError> {
        let drop_probability = param.dropout_ratio;
        validate_drop_probability(drop_probability)?;

        let scale = 1.0 / (1.0 - drop_probability);
        validate_scale(scale, drop_probability)?;

        let keep_distribution = Bernoulli::new(1.0 - f64::from(drop_probability)).map_err(|e| {
            DropoutError::InvalidConfiguration(format!("Cannot build keep distribution: {}", e))
        })?;
        let keep_threshold = (f64::from(u32::MAX) * f64::from(drop_probability)) as u32;

        let granularity = if param.drop_full_sample {
            MaskGranularity::PerSample
        } else {
            MaskGranularity::PerElement
        };

        debug!(
            drop_probability,
            scale,
            keep_threshold,
            ?granularity,
            "dropout configured"
        );

        Ok(DropoutConfig {
            drop_probability,
            scale,
            keep_threshold,
            granularity,
            keep_distribution,
        })
    }

    pub fn drop_probability(&self) -> f32 {
        self.drop_probability
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Integer threshold equivalent to the drop probability.
    pub fn keep_threshold(&self) -> u32 {
        self.keep_threshold
    }

    pub fn granularity(&self) -> MaskGranularity {
        self.granularity
    }

    pub(super) fn keep_distribution(&self) -> &Bernoulli {
        &self.keep_distribution
    }
}
