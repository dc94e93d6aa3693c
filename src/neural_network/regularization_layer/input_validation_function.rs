use crate::error::DropoutError;
use ndarray::{ArrayView2, ArrayViewD, ArrayViewMut2, ArrayViewMutD};

/// Validates that a drop probability lies in the open interval (0, 1)
pub(super) fn validate_drop_probability(drop_probability: f32) -> Result<(), DropoutError> {
    if !(drop_probability > 0.0 && drop_probability < 1.0) {
        return Err(DropoutError::InvalidConfiguration(format!(
            "Dropout ratio must be in range (0, 1), got {}",
            drop_probability
        )));
    }
    Ok(())
}

/// Validates that the survivor scale is finite and strictly greater than 1
pub(super) fn validate_scale(scale: f32, drop_probability: f32) -> Result<(), DropoutError> {
    if !scale.is_finite() || scale <= 1.0 {
        return Err(DropoutError::InvalidConfiguration(format!(
            "Dropout ratio {} yields unusable scale {}",
            drop_probability, scale
        )));
    }
    Ok(())
}

/// Splits a shape into `(batch_size, elements_per_sample)`
pub(super) fn split_batch_shape(input_shape: &[usize]) -> Result<(usize, usize), DropoutError> {
    match input_shape.split_first() {
        Some((&batch_size, rest)) => Ok((batch_size, rest.iter().product())),
        None => Err(DropoutError::InvalidInput(
            "Input must have at least one axis (the batch axis)".to_string(),
        )),
    }
}

/// Validates that a buffer shape matches the shape the mask cache was adapted to
pub(super) fn validate_input_shape(
    input_shape: &[usize],
    expected_shape: &[usize],
) -> Result<(), DropoutError> {
    if expected_shape.is_empty() || input_shape != expected_shape {
        return Err(DropoutError::ShapeMismatch {
            expected: expected_shape.to_vec(),
            got: input_shape.to_vec(),
        });
    }
    Ok(())
}

/// Views a read-only buffer as a `[batch, elements]` matrix
pub(super) fn as_batch_matrix<'a>(
    view: ArrayViewD<'a, f32>,
    batch_size: usize,
    sample_len: usize,
) -> Result<ArrayView2<'a, f32>, DropoutError> {
    view.into_shape_with_order((batch_size, sample_len))
        .map_err(|e| {
            DropoutError::InvalidInput(format!("Cannot view buffer as batch matrix: {}", e))
        })
}

/// Views a writable buffer as a `[batch, elements]` matrix
///
/// The buffer must be in standard (row-major, contiguous) layout.
pub(super) fn as_batch_matrix_mut<'a>(
    view: ArrayViewMutD<'a, f32>,
    batch_size: usize,
    sample_len: usize,
) -> Result<ArrayViewMut2<'a, f32>, DropoutError> {
    if !view.is_standard_layout() {
        return Err(DropoutError::InvalidInput(
            "Destination buffer must be contiguous in row-major order".to_string(),
        ));
    }
    view.into_shape_with_order((batch_size, sample_len))
        .map_err(|e| {
            DropoutError::InvalidInput(format!("Cannot view buffer as batch matrix: {}", e))
        })
}
