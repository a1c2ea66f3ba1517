//! Ошибки OpenCL-конвейера и хостовых операций

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::opencl::types::cl_int;

#[derive(Error, Debug)]
pub enum ClError {
    #[error("no OpenCL platform available")]
    NoPlatform,
    #[error("OpenCL setup failed at {stage}: error code {code}")]
    Setup { stage: &'static str, code: cl_int },
    #[error("failed to build program executable (error code {code}):\n{log}")]
    Build { code: cl_int, log: String },
    #[error("OpenCL kernel failure at {stage}: error code {code}")]
    Kernel { stage: &'static str, code: cl_int },
    #[error("OpenCL buffer failure at {stage}: error code {code}")]
    Buffer { stage: &'static str, code: cl_int },
    #[error("failed to read kernel source {}: {source}", .path.display())]
    KernelSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("kernel source {} is empty", .path.display())]
    EmptyKernelSource { path: PathBuf },
    #[error("kernel source {} is not valid UTF-8", .path.display())]
    NotUtf8 { path: PathBuf },
    #[error("matmul dimension mismatch: [{m}x{k}] @ [{k2}x{n}]")]
    ShapeMismatch {
        m: usize,
        k: usize,
        k2: usize,
        n: usize,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("device result differs from host reference in {mismatches} cells (max diff {max_diff:e}, tolerance {tolerance:e})")]
    ResultMismatch {
        mismatches: usize,
        max_diff: f32,
        tolerance: f32,
    },
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ClError>;
