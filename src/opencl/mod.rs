//! Модуль для работы с OpenCL
//!
//! Содержит низкоуровневые привязки и безопасные обертки для OpenCL

pub mod bindings;
pub mod buffer;
pub mod callbacks;
pub mod context;
pub mod kernel;
pub mod types;
pub mod utils;

pub use buffer::DeviceBuffer;
pub use context::{ComputeContext, DeviceKind};
pub use kernel::{Kernel, Program};
