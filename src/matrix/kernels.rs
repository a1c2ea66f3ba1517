//! OpenCL ядра для матричных операций

use crate::error::{ClError, Result};
use std::fs;
use std::path::Path;

/// Имя файла ядра по умолчанию, относительно рабочего каталога
pub const DEFAULT_KERNEL_PATH: &str = "matrixmul_kernel.cl";

/// Точка входа ядра: `matrixMul(C, A, B, wA, wC)`
pub const KERNEL_NAME: &str = "matrixMul";

/// Исходный код ядра, поставляемый вместе с крейтом
pub static MATRIX_MULTIPLY_KERNEL: &str = include_str!("../../matrixmul_kernel.cl");

/// Читает исходник ядра целиком
pub fn load_kernel_source(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| ClError::KernelSource {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(ClError::EmptyKernelSource { path: path.to_path_buf() });
    }
    let source = String::from_utf8(bytes).map_err(|_| ClError::NotUtf8 { path: path.to_path_buf() })?;
    log::debug!("Загружено ядро {} ({} байт)", path.display(), source.len());
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_a_kernel_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_kernel_source(dir.path().join("absent.cl")).unwrap_err();
        match err {
            ClError::KernelSource { path, source } => {
                assert!(path.ends_with("absent.cl"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reads_whole_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MATRIX_MULTIPLY_KERNEL.as_bytes()).unwrap();
        let source = load_kernel_source(file.path()).unwrap();
        assert_eq!(source, MATRIX_MULTIPLY_KERNEL);
    }

    #[test]
    fn blank_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b" \n\t\n").unwrap();
        let err = load_kernel_source(file.path()).unwrap_err();
        assert!(matches!(err, ClError::EmptyKernelSource { .. }));
    }

    #[test]
    fn binary_garbage_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00, 0x41]).unwrap();
        let err = load_kernel_source(file.path()).unwrap_err();
        assert!(matches!(err, ClError::NotUtf8 { .. }));
    }

    #[test]
    fn bundled_kernel_defines_entry_point() {
        assert!(MATRIX_MULTIPLY_KERNEL.contains(&format!("__kernel void {}(", KERNEL_NAME)));
    }
}
