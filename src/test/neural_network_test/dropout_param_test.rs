use super::*;

#[test]
fn test_dropout_param_defaults() {
    let param = DropoutParam::default();
    assert_eq!(param.dropout_ratio, DEFAULT_DROPOUT_RATIO);
    assert!(!param.drop_full_sample);
}

#[test]
fn test_dropout_config_half_ratio() {
    let config = DropoutConfig::from_param(&DropoutParam::new(0.5)).unwrap();

    // 1 / (1 - 0.5) is exactly representable
    assert_eq!(config.scale(), 2.0);
    assert_eq!(config.drop_probability(), 0.5);
    assert_eq!(config.keep_threshold(), u32::MAX / 2);
    assert_eq!(config.granularity(), MaskGranularity::PerElement);
}

#[test]
fn test_dropout_config_scale_matches_ratio() {
    for ratio in [0.1_f32, 0.2, 0.3, 0.75, 0.9] {
        let config = DropoutConfig::from_param(&DropoutParam::new(ratio)).unwrap();
        assert_relative_eq!(config.scale() * (1.0 - ratio), 1.0, epsilon = 1e-6);
        assert!(config.scale() > 1.0);
        assert!(config.scale().is_finite());
    }
}

#[test]
fn test_dropout_config_full_sample_granularity() {
    let param = DropoutParam::new(0.4).with_drop_full_sample(true);
    let config = DropoutConfig::from_param(&param).unwrap();
    assert_eq!(config.granularity(), MaskGranularity::PerSample);
}

#[test]
fn test_dropout_config_rejects_out_of_range_ratio() {
    for ratio in [0.0_f32, 1.0, -0.1, 1.5, f32::NAN, f32::INFINITY] {
        let result = DropoutConfig::from_param(&DropoutParam::new(ratio));
        assert!(
            matches!(result, Err(DropoutError::InvalidConfiguration(_))),
            "ratio {} should be rejected",
            ratio
        );
    }
}

#[test]
fn test_dropout_config_rejects_ratio_below_f32_resolution() {
    // 1 - 1e-9 rounds to 1.0 in f32, so the scale would not exceed 1
    let result = DropoutConfig::from_param(&DropoutParam::new(1e-9));
    assert!(matches!(result, Err(DropoutError::InvalidConfiguration(_))));
}
