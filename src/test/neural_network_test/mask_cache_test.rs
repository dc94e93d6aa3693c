use super::*;

#[test]
fn test_mask_cache_per_element_shape() {
    let mut cache = MaskCache::new(MaskGranularity::PerElement);
    assert!(!cache.is_adapted());

    let changed = cache.adapt(&[4, 3, 2]).unwrap();
    assert!(changed);
    assert!(cache.is_adapted());
    assert_eq!(cache.view().shape(), &[4, 6]);
    assert_eq!(cache.batch_size(), 4);
    assert_eq!(cache.sample_len(), 6);
    assert_eq!(cache.generation(), 1);
}

#[test]
fn test_mask_cache_per_sample_shape() {
    let mut cache = MaskCache::new(MaskGranularity::PerSample);
    cache.adapt(&[5, 8, 8]).unwrap();

    assert_eq!(cache.view().shape(), &[5, 1]);
    assert_eq!(cache.sample_len(), 64);
}

#[test]
fn test_mask_cache_adapt_is_idempotent() {
    let mut cache = MaskCache::new(MaskGranularity::PerElement);
    cache.adapt(&[2, 10]).unwrap();
    let generation = cache.generation();

    let changed = cache.adapt(&[2, 10]).unwrap();
    assert!(!changed);
    assert_eq!(cache.generation(), generation);
}

#[test]
fn test_mask_cache_shape_change_bumps_generation() {
    let mut cache = MaskCache::new(MaskGranularity::PerElement);
    cache.adapt(&[4, 3, 2]).unwrap();

    // Same number of elements, different logical shape
    assert!(cache.adapt(&[4, 6]).unwrap());
    assert_eq!(cache.generation(), 2);
    assert_eq!(cache.input_shape(), &[4, 6]);

    assert!(cache.adapt(&[8, 6]).unwrap());
    assert_eq!(cache.generation(), 3);
    assert_eq!(cache.view().shape(), &[8, 6]);
}

#[test]
fn test_mask_cache_batch_only_shape() {
    let mut cache = MaskCache::new(MaskGranularity::PerElement);
    cache.adapt(&[7]).unwrap();
    assert_eq!(cache.sample_len(), 1);
    assert_eq!(cache.view().shape(), &[7, 1]);
}

#[test]
fn test_mask_cache_rejects_scalar_shape() {
    let mut cache = MaskCache::new(MaskGranularity::PerSample);
    let result = cache.adapt(&[]);
    assert!(matches!(result, Err(DropoutError::InvalidInput(_))));
    assert!(!cache.is_adapted());
}
