//! Типы матриц и связанные структуры

use crate::error::{ClError, Result};
use std::fmt;

/// Тип матриц для вычислений
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixType {
    /// A заполнена 1, B заполнена 2
    OnesAndTwos,
    /// Случайно заполненные матрицы, элементы в [0, 1)
    #[default]
    Random,
}

/// Размеры задачи: A (rows_a x inner), B (inner x cols_b), C (rows_a x cols_b)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims {
    pub rows_a: usize,
    pub inner: usize,
    pub cols_b: usize,
}

impl Dims {
    pub const fn new(rows_a: usize, inner: usize, cols_b: usize) -> Self {
        Self { rows_a, inner, cols_b }
    }

    pub const fn square(n: usize) -> Self {
        Self::new(n, n, n)
    }
}

impl Default for Dims {
    fn default() -> Self {
        Self::square(5)
    }
}

/// Плотная матрица f32 в одном row-major буфере
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self { rows, cols, data: vec![0.0; rows * cols] }
    }

    pub fn filled(rows: usize, cols: usize, value: f32) -> Self {
        Self { rows, cols, data: vec![value; rows * cols] }
    }

    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(ClError::InvalidConfig(format!(
                "matrix {}x{} needs {} elements, got {}",
                rows,
                cols,
                rows * cols,
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Строит матрицу из строк одинаковой длины
    pub fn from_rows(rows: &[&[f32]]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.len());
        if rows.iter().any(|r| r.len() != cols) {
            return Err(ClError::InvalidConfig("rows have different lengths".to_string()));
        }
        let data: Vec<f32> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Self::from_vec(rows.len(), cols, data)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Шаг между строками в буфере
    pub fn stride(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.stride() + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        let stride = self.stride();
        self.data[row * stride + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f32] {
        let start = row * self.stride();
        &self.data[start..start + self.cols]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Строка на каждую строку матрицы, значения через пробел в формате `%f`
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            for (c, value) in self.row(r).iter().enumerate() {
                if c > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{:.6}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_stride_accessors() {
        let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.stride(), 3);
        assert_eq!(m.get(1, 0), 4.0);
        assert_eq!(m.get(0, 2), 3.0);
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn from_vec_rejects_wrong_length() {
        let err = Matrix::from_vec(2, 2, vec![1.0; 3]).unwrap_err();
        assert!(matches!(err, ClError::InvalidConfig(_)));
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        assert!(Matrix::from_rows(&[&[1.0, 2.0], &[3.0]]).is_err());
        let m = Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0]]).unwrap();
        assert_eq!(m.get(1, 1), 4.0);
    }

    #[test]
    fn display_prints_one_line_per_row() {
        let m = Matrix::from_vec(2, 3, vec![0.5, 1.0, 0.25, 2.0, 3.0, 4.0]).unwrap();
        let text = m.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["0.500000 1.000000 0.250000", "2.000000 3.000000 4.000000"]);
    }

    #[test]
    fn display_rows_have_exactly_cols_values() {
        let m = Matrix::filled(5, 4, 0.123456);
        let text = m.to_string();
        assert_eq!(text.lines().count(), 5);
        for line in text.lines() {
            let values: Vec<f32> = line
                .split(' ')
                .map(|v| v.parse().expect("float"))
                .collect();
            assert_eq!(values.len(), 4);
        }
    }

    #[test]
    fn default_dims_are_five_square() {
        assert_eq!(Dims::default(), Dims::new(5, 5, 5));
    }
}
