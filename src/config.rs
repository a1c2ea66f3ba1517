//! Параметры запуска

use crate::error::{ClError, Result};
use crate::matrix::{Dims, MatrixType, DEFAULT_KERNEL_PATH};
use crate::opencl::DeviceKind;
use std::path::PathBuf;

/// Seed генератора по умолчанию
pub const DEFAULT_SEED: u64 = 2014;

/// Допустимая абсолютная разница между GPU и CPU
pub const DEFAULT_TOLERANCE: f32 = 1e-4;

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub dims: Dims,
    pub seed: u64,
    pub matrix_type: MatrixType,
    pub kernel_path: PathBuf,
    pub device: DeviceKind,
    pub tolerance: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            dims: Dims::default(),
            seed: DEFAULT_SEED,
            matrix_type: MatrixType::Random,
            kernel_path: PathBuf::from(DEFAULT_KERNEL_PATH),
            device: DeviceKind::Gpu,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl RunConfig {
    pub fn with_dims(mut self, dims: Dims) -> Self {
        self.dims = dims;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_matrix_type(mut self, matrix_type: MatrixType) -> Self {
        self.matrix_type = matrix_type;
        self
    }

    pub fn with_kernel_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.kernel_path = path.into();
        self
    }

    pub fn with_device(mut self, device: DeviceKind) -> Self {
        self.device = device;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let Dims { rows_a, inner, cols_b } = self.dims;
        if rows_a == 0 || inner == 0 || cols_b == 0 {
            return Err(ClError::InvalidConfig(format!(
                "dimensions must be non-zero, got {}x{} @ {}x{}",
                rows_a, inner, inner, cols_b
            )));
        }
        let limit = i32::MAX as usize;
        if rows_a > limit || inner > limit || cols_b > limit {
            return Err(ClError::InvalidConfig("dimensions exceed i32::MAX".to_string()));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ClError::InvalidConfig(format!(
                "tolerance must be a positive finite number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_demo_program() {
        let config = RunConfig::default();
        assert_eq!(config.dims, Dims::square(5));
        assert_eq!(config.seed, 2014);
        assert_eq!(config.kernel_path, PathBuf::from("matrixmul_kernel.cl"));
        assert_eq!(config.device, DeviceKind::Gpu);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let config = RunConfig::default().with_dims(Dims::new(3, 0, 3));
        assert!(matches!(config.validate(), Err(ClError::InvalidConfig(_))));
    }

    #[test]
    fn bad_tolerance_is_rejected() {
        for tolerance in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = RunConfig::default().with_tolerance(tolerance);
            assert!(config.validate().is_err(), "tolerance {} accepted", tolerance);
        }
    }

    #[test]
    fn builders_override_fields() {
        let config = RunConfig::default()
            .with_dims(Dims::new(2, 3, 4))
            .with_seed(9)
            .with_matrix_type(MatrixType::OnesAndTwos)
            .with_kernel_path("k.cl")
            .with_device(DeviceKind::Cpu);
        assert_eq!(config.dims.inner, 3);
        assert_eq!(config.seed, 9);
        assert_eq!(config.matrix_type, MatrixType::OnesAndTwos);
        assert_eq!(config.kernel_path, PathBuf::from("k.cl"));
        assert_eq!(config.device, DeviceKind::Cpu);
    }
}
