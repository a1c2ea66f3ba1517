//! Коды завершения бинарника при ошибках входных файлов

use std::process::Command;

const BIN: &str = env!("CARGO_BIN_EXE_opencl_matmul");

#[test]
fn missing_kernel_file_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(BIN).current_dir(dir.path()).env_remove("RUST_LOG").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error:"), "stderr: {stderr}");
    assert!(stderr.contains("matrixmul_kernel.cl"), "stderr: {stderr}");
    assert!(!stderr.contains("panicked"));
    assert!(output.stdout.is_empty());
}

#[test]
fn empty_kernel_file_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("matrixmul_kernel.cl"), "\n").unwrap();
    let output = Command::new(BIN).current_dir(dir.path()).env_remove("RUST_LOG").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("is empty"), "stderr: {stderr}");
}

#[test]
fn malformed_kernel_file_exits_with_one() {
    // С устройством это ошибка сборки, без него ошибка инициализации
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("matrixmul_kernel.cl"), "__kernel void matrixMul( {").unwrap();
    let output = Command::new(BIN).current_dir(dir.path()).env_remove("RUST_LOG").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "stderr: {stderr}");
    assert!(!stderr.contains("panicked"));
}

#[test]
fn disagreeing_kernel_exits_with_one() {
    // С устройством результаты расходятся, без него падает инициализация
    let dir = tempfile::tempdir().unwrap();
    let source = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/matrixmul_kernel.cl"))
        .unwrap()
        .replace("C[row * wC + col] = value;", "C[row * wC + col] = value + 1.0f;");
    assert!(source.contains("value + 1.0f"));
    std::fs::write(dir.path().join("matrixmul_kernel.cl"), source).unwrap();
    let output = Command::new(BIN).current_dir(dir.path()).env_remove("RUST_LOG").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("completed"), "stdout: {stdout}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "stderr: {stderr}");
}
