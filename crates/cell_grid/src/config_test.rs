use super::*;

#[test]
fn test_default_config_is_valid() {
  let config = GridConfig::default();
  assert_eq!(config.cell_size, 1.0);
  assert_eq!(config.half_cell(), 0.5);
  assert!(config.validate().is_ok());
}

#[test]
fn test_builder() {
  let config = GridConfig::new()
    .with_cell_size(2.5)
    .with_parallel_threshold(16)
    .with_epsilon(1e-6)
    .with_max_block_cells(64);

  assert_eq!(config.cell_size, 2.5);
  assert_eq!(config.parallel_threshold, 16);
  assert_eq!(config.epsilon, 1e-6);
  assert_eq!(config.max_block_cells, 64);
}

/// Zero, negative and non-finite sizes are construction errors.
#[test]
fn test_invalid_cell_sizes() {
  for size in [0.0, -1.0, f64::NAN, f64::INFINITY] {
    let config = GridConfig::new().with_cell_size(size);
    assert!(
      matches!(config.validate(), Err(GridError::InvalidCellSize(_))),
      "cell size {} should be rejected",
      size
    );
  }
}

#[test]
fn test_invalid_epsilon() {
  for epsilon in [-1e-9, f64::NAN, f64::INFINITY] {
    let config = GridConfig::new().with_epsilon(epsilon);
    assert!(
      matches!(config.validate(), Err(GridError::InvalidEpsilon(_))),
      "epsilon {} should be rejected",
      epsilon
    );
  }
  assert!(GridConfig::new().with_epsilon(0.0).validate().is_ok());
}

#[test]
fn test_zero_block_limit_rejected() {
  let config = GridConfig::new().with_max_block_cells(0);
  assert_eq!(config.validate(), Err(GridError::InvalidBlockLimit));
  assert!(GridConfig::new().with_max_block_cells(1).validate().is_ok());
}

#[test]
fn test_parallel_threshold() {
  let config = GridConfig::new().with_parallel_threshold(100);
  assert!(!config.marches_in_parallel(99));
  assert!(config.marches_in_parallel(100));

  let serial = GridConfig::new().with_parallel_threshold(0);
  assert!(!serial.marches_in_parallel(usize::MAX));
}
