//! Модуль для работы с матрицами
//!
//! Предоставляет:
//! - Типы матриц
//! - Операции над матрицами
//! - GPU-ускоренные реализации

mod types;
pub mod gpu;
pub mod operations;
pub mod kernels;

pub use types::{Dims, Matrix, MatrixType};
pub use gpu::GpuMatrixMultiplier;
pub use operations::{cpu_matrix_multiply, compare_results, initialize_matrices, Comparison};
pub use kernels::{load_kernel_source, DEFAULT_KERNEL_PATH, KERNEL_NAME, MATRIX_MULTIPLY_KERNEL};
