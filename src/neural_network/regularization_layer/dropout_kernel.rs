use super::*;

/// Threshold for using parallel computation in the dropout kernels.
/// When the total number of elements >= this threshold, parallel computation is used.
pub const DROPOUT_PARALLEL_THRESHOLD: usize = 10000;

/// Fills a mask with independent Bernoulli keep flags.
///
/// Draws are taken serially from `rng` in row-major order so that a seeded
/// generator always yields the same mask.
///
/// # Parameters
///
/// - `mask` - The mask to overwrite
/// - `keep` - Bernoulli distribution with success probability `1 - p`
/// - `rng` - Random source owned by the calling layer
pub fn draw_mask<R: Rng + ?Sized>(mut mask: ArrayViewMut2<u32>, keep: &Bernoulli, rng: &mut R) {
    mask.mapv_inplace(|_| if keep.sample(&mut *rng) { 1 } else { 0 });
}

/// Copies `src` into `dst` unchanged.
pub fn pass_through(src: ArrayView2<f32>, mut dst: ArrayViewMut2<f32>) {
    dst.assign(&src);
}

/// Computes `dst[i] = src[i] * mask[i] * scale` for every element.
///
/// # Parameters
///
/// - `src` - Input data (forward) or upstream gradient (backward), shape `[batch, elements]`
/// - `mask` - Keep flags, same shape as `src`
/// - `scale` - Survivor scale `1 / (1 - p)`
/// - `dst` - Output data (forward) or input gradient (backward), same shape as `src`
pub fn scale_per_element(
    src: ArrayView2<f32>,
    mask: ArrayView2<u32>,
    scale: f32,
    dst: ArrayViewMut2<f32>,
) {
    let parallel = dst.len() >= DROPOUT_PARALLEL_THRESHOLD;
    let zip = Zip::from(dst).and(src).and(mask);
    let apply = |d: &mut f32, &s: &f32, &m: &u32| *d = s * m as f32 * scale;

    if parallel {
        zip.par_for_each(apply);
    } else {
        zip.for_each(apply);
    }
}

/// Computes `dst[s][j] = src[s][j] * mask[s] * scale`, broadcasting one flag per sample.
///
/// # Parameters
///
/// - `src` - Input data (forward) or upstream gradient (backward), shape `[batch, elements]`
/// - `mask` - One keep flag per sample, length `batch`
/// - `scale` - Survivor scale `1 / (1 - p)`
/// - `dst` - Output data (forward) or input gradient (backward), same shape as `src`
pub fn scale_per_sample(
    src: ArrayView2<f32>,
    mask: ArrayView1<u32>,
    scale: f32,
    mut dst: ArrayViewMut2<f32>,
) {
    let parallel = dst.len() >= DROPOUT_PARALLEL_THRESHOLD;
    let zip = Zip::from(dst.rows_mut()).and(src.rows()).and(mask);
    let apply = |mut d: ArrayViewMut1<f32>, s: ArrayView1<f32>, &m: &u32| {
        let keep = m as f32;
        Zip::from(&mut d)
            .and(&s)
            .for_each(|d, &s| *d = s * keep * scale);
    };

    if parallel {
        zip.par_for_each(apply);
    } else {
        zip.for_each(apply);
    }
}
