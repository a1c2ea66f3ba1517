//! Полный прогон: подготовка данных, запуск на устройстве, проверка на хосте

use crate::config::RunConfig;
use crate::error::{ClError, Result};
use crate::matrix::{
    compare_results, cpu_matrix_multiply, initialize_matrices, load_kernel_source, Comparison,
    GpuMatrixMultiplier, Matrix,
};
use crate::opencl::ComputeContext;
use crate::utils::measure_time;
use std::io::Write;
use std::time::Duration;

/// Результаты одного прогона
#[derive(Debug, Clone)]
pub struct RunReport {
    pub a: Matrix,
    pub b: Matrix,
    pub gpu: Matrix,
    pub cpu: Matrix,
    pub comparison: Comparison,
    pub gpu_time: Duration,
    pub cpu_time: Duration,
}

/// Печатает заголовок и матрицу построчно
pub fn write_matrix<W: Write>(out: &mut W, title: &str, matrix: &Matrix) -> Result<()> {
    writeln!(out, "\n{}", title)?;
    write!(out, "{}", matrix)?;
    Ok(())
}

/// Выполняет умножение на устройстве и сверяет его с CPU.
///
/// Исходник ядра читается до инициализации устройства, чтобы ошибка
/// файла не требовала OpenCL. Расхождение с эталоном возвращается как
/// `ClError::ResultMismatch` уже после печати матриц.
pub fn run<W: Write>(config: &RunConfig, out: &mut W) -> Result<RunReport> {
    config.validate()?;
    let source = load_kernel_source(&config.kernel_path)?;

    let (a, b) = initialize_matrices(config.matrix_type, config.dims, config.seed);

    writeln!(out, "Initializing OpenCL device...")?;
    let context = ComputeContext::new(config.device)?;
    log::info!(
        "Используется {} ({})",
        context.device_name(),
        context.platform_name()
    );
    let multiplier = GpuMatrixMultiplier::new(context, &source)?;

    writeln!(
        out,
        "Running matrix multiplication for matrices A ({}x{}) and B ({}x{}) ...",
        a.rows(),
        a.cols(),
        b.rows(),
        b.cols()
    )?;
    let (gpu, gpu_time) = measure_time(|| multiplier.multiply(&a, &b));
    let gpu = gpu?;
    log::info!("GPU вычисления завершены за {:?}", gpu_time);

    let (cpu, cpu_time) = measure_time(|| cpu_matrix_multiply(&a, &b));
    let cpu = cpu?;
    log::info!("CPU вычисления завершены за {:?}", cpu_time);

    write_matrix(out, "Matrix A", &a)?;
    write_matrix(out, "Matrix B", &b)?;
    write_matrix(out, "Matrix C (Results)", &gpu)?;

    let comparison = compare_results(&gpu, &cpu, config.tolerance)?;
    writeln!(out)?;
    if !comparison.matches() {
        writeln!(
            out,
            "Device result differs from host reference in {} cells",
            comparison.mismatches
        )?;
        return Err(ClError::ResultMismatch {
            mismatches: comparison.mismatches,
            max_diff: comparison.max_diff,
            tolerance: comparison.tolerance,
        });
    }
    writeln!(
        out,
        "Device result matches host reference (max diff {:e})",
        comparison.max_diff
    )?;
    writeln!(out, "Matrix multiplication completed...")?;

    Ok(RunReport {
        a,
        b,
        gpu,
        cpu,
        comparison,
        gpu_time,
        cpu_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Dims;

    #[test]
    fn write_matrix_prints_title_then_rows() {
        let mut out = Vec::new();
        let m = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        write_matrix(&mut out, "Matrix A", &m).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "\nMatrix A\n1.000000 2.000000\n3.000000 4.000000\n");
    }

    #[test]
    fn missing_kernel_fails_before_device_setup() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig::default().with_kernel_path(dir.path().join("matrixmul_kernel.cl"));
        let mut out = Vec::new();
        let err = run(&config, &mut out).unwrap_err();
        assert!(matches!(err, ClError::KernelSource { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn invalid_config_fails_first() {
        let config = RunConfig::default().with_dims(Dims::new(0, 5, 5));
        let mut out = Vec::new();
        assert!(matches!(run(&config, &mut out), Err(ClError::InvalidConfig(_))));
    }
}
