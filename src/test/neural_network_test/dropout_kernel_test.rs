use super::*;

#[test]
fn test_draw_mask_is_binary_and_reproducible() {
    let keep = Bernoulli::new(0.6).unwrap();

    let mut first = Array2::<u32>::zeros((16, 32));
    let mut rng = StdRng::seed_from_u64(1234);
    draw_mask(first.view_mut(), &keep, &mut rng);

    let mut second = Array2::<u32>::zeros((16, 32));
    let mut rng = StdRng::seed_from_u64(1234);
    draw_mask(second.view_mut(), &keep, &mut rng);

    assert!(first.iter().all(|&m| m == 0 || m == 1));
    assert_eq!(first, second);
}

#[test]
fn test_draw_mask_degenerate_probabilities() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut mask = Array2::<u32>::zeros((3, 4));

    draw_mask(mask.view_mut(), &Bernoulli::new(1.0).unwrap(), &mut rng);
    assert!(mask.iter().all(|&m| m == 1));

    draw_mask(mask.view_mut(), &Bernoulli::new(0.0).unwrap(), &mut rng);
    assert!(mask.iter().all(|&m| m == 0));
}

#[test]
fn test_pass_through_copies() {
    let src = generate_data(3, 5);
    let mut dst = Array2::<f32>::zeros((3, 5));
    pass_through(src.view(), dst.view_mut());
    assert_eq!(dst, src);
}

#[test]
fn test_scale_per_element() {
    let src = array![[1.0_f32, 2.0], [3.0, 4.0]];
    let mask = array![[1_u32, 0], [0, 1]];
    let mut dst = Array2::<f32>::from_elem((2, 2), -1.0);

    scale_per_element(src.view(), mask.view(), 2.0, dst.view_mut());

    assert_eq!(dst, array![[2.0, 0.0], [0.0, 8.0]]);
}

#[test]
fn test_scale_per_sample_broadcasts_flag() {
    let src = array![[1.0_f32, 2.0, 3.0], [4.0, 5.0, 6.0]];
    let mask = array![0_u32, 1];
    let mut dst = Array2::<f32>::from_elem((2, 3), -1.0);

    scale_per_sample(src.view(), mask.view(), 4.0, dst.view_mut());

    assert_eq!(dst, array![[0.0, 0.0, 0.0], [16.0, 20.0, 24.0]]);
}

#[test]
fn test_scale_parallel_path_matches_sequential_formula() {
    // 200 * 100 elements is above DROPOUT_PARALLEL_THRESHOLD
    let src = generate_data(200, 100);
    assert!(src.len() >= DROPOUT_PARALLEL_THRESHOLD);

    let mut rng = StdRng::seed_from_u64(99);
    let mut mask = Array2::<u32>::zeros((200, 100));
    draw_mask(mask.view_mut(), &Bernoulli::new(0.5).unwrap(), &mut rng);

    let mut dst = Array2::<f32>::zeros((200, 100));
    scale_per_element(src.view(), mask.view(), 2.0, dst.view_mut());
    for ((&d, &s), &m) in dst.iter().zip(src.iter()).zip(mask.iter()) {
        assert_eq!(d, s * m as f32 * 2.0);
    }

    let sample_mask = mask.column(0).to_owned();
    scale_per_sample(src.view(), sample_mask.view(), 2.0, dst.view_mut());
    for (b, row) in dst.rows().into_iter().enumerate() {
        for (j, &d) in row.iter().enumerate() {
            assert_abs_diff_eq!(d, src[[b, j]] * sample_mask[b] as f32 * 2.0);
        }
    }
}
