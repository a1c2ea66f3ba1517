//! Операции над матрицами

use super::types::{Dims, Matrix, MatrixType};
use crate::error::{ClError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Заполняет матрицу случайными значениями из [0, 1)
pub fn random_matrix<R: Rng>(rng: &mut R, rows: usize, cols: usize) -> Matrix {
    let mut m = Matrix::zeros(rows, cols);
    for value in m.as_mut_slice() {
        *value = rng.gen_range(0.0f32..1.0);
    }
    m
}

/// Инициализирует матрицы A и B заданного типа.
///
/// Для `Random` обе матрицы берутся из одного генератора с `seed`
/// (сначала A, затем B), так что результат воспроизводим.
pub fn initialize_matrices(matrix_type: MatrixType, dims: Dims, seed: u64) -> (Matrix, Matrix) {
    match matrix_type {
        MatrixType::OnesAndTwos => (
            Matrix::filled(dims.rows_a, dims.inner, 1.0),
            Matrix::filled(dims.inner, dims.cols_b, 2.0),
        ),
        MatrixType::Random => {
            let mut rng = StdRng::seed_from_u64(seed);
            let a = random_matrix(&mut rng, dims.rows_a, dims.inner);
            let b = random_matrix(&mut rng, dims.inner, dims.cols_b);
            (a, b)
        }
    }
}

/// CPU реализация матричного умножения
pub fn cpu_matrix_multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.cols() != b.rows() {
        return Err(ClError::ShapeMismatch {
            m: a.rows(),
            k: a.cols(),
            k2: b.rows(),
            n: b.cols(),
        });
    }

    let mut c = Matrix::zeros(a.rows(), b.cols());
    for i in 0..a.rows() {
        for j in 0..b.cols() {
            let mut sum = 0.0f32;
            for k in 0..a.cols() {
                sum += a.get(i, k) * b.get(k, j);
            }
            c.set(i, j, sum);
        }
    }
    Ok(c)
}

/// Итог сравнения результатов устройства и хоста
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub mismatches: usize,
    pub max_diff: f32,
    pub tolerance: f32,
}

impl Comparison {
    pub fn matches(&self) -> bool {
        self.mismatches == 0
    }
}

/// Сравнивает результаты GPU и CPU вычислений поэлементно
pub fn compare_results(gpu_result: &Matrix, cpu_result: &Matrix, tolerance: f32) -> Result<Comparison> {
    if gpu_result.rows() != cpu_result.rows() || gpu_result.cols() != cpu_result.cols() {
        return Err(ClError::ShapeMismatch {
            m: gpu_result.rows(),
            k: gpu_result.cols(),
            k2: cpu_result.rows(),
            n: cpu_result.cols(),
        });
    }

    let mut max_diff = 0.0f32;
    let mut mismatches = 0;
    for (g, c) in gpu_result.as_slice().iter().zip(cpu_result.as_slice()) {
        let diff = (g - c).abs();
        // Совпадение только при строгом |d - h| < tolerance, NaN не совпадает
        if !(diff < tolerance) {
            mismatches += 1;
        }
        if diff > max_diff {
            max_diff = diff;
        }
    }

    if mismatches > 0 {
        log::warn!("Расхождения: {} элементов, максимальная разница {:e}", mismatches, max_diff);
    } else {
        log::debug!("Результаты совпадают, максимальная разница {:e}", max_diff);
    }

    Ok(Comparison { mismatches, max_diff, tolerance })
}
