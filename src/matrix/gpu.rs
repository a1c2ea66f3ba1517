//! GPU-ускоренное умножение матриц

use super::kernels::KERNEL_NAME;
use super::types::Matrix;
use crate::error::{ClError, Result};
use crate::opencl::types::cl_int;
use crate::opencl::{ComputeContext, DeviceBuffer, Kernel, Program};

/// Собранное ядро `matrixMul` вместе с контекстом устройства.
///
/// Порядок полей задаёт порядок освобождения: ядро, программа, контекст.
pub struct GpuMatrixMultiplier {
    kernel: Kernel,
    _program: Program,
    context: ComputeContext,
}

impl GpuMatrixMultiplier {
    /// Компилирует `source` для устройства контекста
    pub fn new(context: ComputeContext, source: &str) -> Result<Self> {
        log::debug!("Компиляция OpenCL программы на {}", context.device_name());
        let program = Program::build(&context, source)?;
        let kernel = Kernel::create(&program, KERNEL_NAME)?;
        Ok(Self {
            kernel,
            _program: program,
            context,
        })
    }

    /// C = A * B, по одной рабочей единице на ячейку C
    pub fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        if a.cols() != b.rows() {
            return Err(ClError::ShapeMismatch {
                m: a.rows(),
                k: a.cols(),
                k2: b.rows(),
                n: b.cols(),
            });
        }
        if a.is_empty() || b.is_empty() {
            return Err(ClError::InvalidConfig("cannot dispatch an empty matrix".to_string()));
        }
        let w_a = to_cl_int(a.cols())?;
        let w_c = to_cl_int(b.cols())?;

        let ctx = &self.context;
        let a_buffer = DeviceBuffer::from_slice(ctx, a.as_slice(), "clCreateBuffer(A)")?;
        let b_buffer = DeviceBuffer::from_slice(ctx, b.as_slice(), "clCreateBuffer(B)")?;
        let mut c = Matrix::zeros(a.rows(), b.cols());
        let c_buffer = DeviceBuffer::write_only(ctx, c.as_slice().len(), "clCreateBuffer(C)")?;

        self.kernel.set_arg_buffer(0, &c_buffer)?;
        self.kernel.set_arg_buffer(1, &a_buffer)?;
        self.kernel.set_arg_buffer(2, &b_buffer)?;
        self.kernel.set_arg_int(3, w_a)?;
        self.kernel.set_arg_int(4, w_c)?;

        log::debug!("Запуск {} на сетке {}x{}", self.kernel.name(), c.rows(), c.cols());
        self.kernel.enqueue_2d_and_wait(ctx, [c.rows(), c.cols()])?;

        c_buffer.read_into(ctx, c.as_mut_slice())?;
        Ok(c)
    }
}

fn to_cl_int(value: usize) -> Result<cl_int> {
    cl_int::try_from(value)
        .map_err(|_| ClError::InvalidConfig(format!("dimension {} does not fit a kernel int", value)))
}
