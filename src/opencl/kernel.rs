//! Сборка программы и запуск ядра

use super::bindings::*;
use super::buffer::DeviceBuffer;
use super::context::ComputeContext;
use super::types::*;
use super::utils::{query_info_string, to_c_string};
use crate::error::{ClError, Result};
use crate::{cl_check, cl_create};
use std::ffi::{c_char, c_void};
use std::ptr;

/// Собранная для устройства программа
pub struct Program {
    program: cl_program,
}

impl Program {
    /// Компилирует исходник; при ошибке возвращает лог сборки
    pub fn build(ctx: &ComputeContext, source: &str) -> Result<Self> {
        let source_ptr = source.as_ptr() as *const c_char;
        let source_len = source.len();
        let program = cl_create!(
            clCreateProgramWithSource(ctx.raw_context(), 1, &source_ptr, &source_len),
            |code| ClError::Setup { stage: "clCreateProgramWithSource", code }
        )?;
        let program = Self { program };

        let device = ctx.device();
        let build_status = unsafe {
            clBuildProgram(program.program, 1, &device, ptr::null(), None, ptr::null_mut())
        };
        if build_status != CL_SUCCESS {
            let log = query_info_string(|size, value, size_ret| unsafe {
                clGetProgramBuildInfo(program.program, device, CL_PROGRAM_BUILD_LOG, size, value, size_ret)
            })
            .unwrap_or_default();
            log::error!("Лог компиляции OpenCL:\n{}", log);
            return Err(ClError::Build { code: build_status, log });
        }

        Ok(program)
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe {
            clReleaseProgram(self.program);
        }
    }
}

/// Ядро, созданное из собранной программы
pub struct Kernel {
    kernel: cl_kernel,
    name: String,
}

impl Kernel {
    pub fn create(program: &Program, name: &str) -> Result<Self> {
        let c_name = to_c_string(name)
            .ok_or_else(|| ClError::InvalidConfig(format!("kernel name {:?} contains NUL", name)))?;
        let kernel = cl_create!(
            clCreateKernel(program.program, c_name.as_ptr()),
            |code| ClError::Kernel { stage: "clCreateKernel", code }
        )?;
        Ok(Self { kernel, name: name.to_string() })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_arg_buffer(&self, index: cl_uint, buffer: &DeviceBuffer) -> Result<()> {
        let mem = buffer.raw();
        cl_check!(
            clSetKernelArg(
                self.kernel,
                index,
                std::mem::size_of::<cl_mem>(),
                &mem as *const cl_mem as *const c_void
            ),
            |code| ClError::Kernel { stage: "clSetKernelArg", code }
        )
    }

    pub fn set_arg_int(&self, index: cl_uint, value: cl_int) -> Result<()> {
        cl_check!(
            clSetKernelArg(
                self.kernel,
                index,
                std::mem::size_of::<cl_int>(),
                &value as *const cl_int as *const c_void
            ),
            |code| ClError::Kernel { stage: "clSetKernelArg", code }
        )
    }

    /// Запускает ядро на 2D-сетке и ждёт завершения очереди.
    ///
    /// Размер рабочей группы выбирает рантайм.
    pub fn enqueue_2d_and_wait(&self, ctx: &ComputeContext, global_size: [usize; 2]) -> Result<()> {
        cl_check!(
            clEnqueueNDRangeKernel(
                ctx.queue(),
                self.kernel,
                2,
                ptr::null(),
                global_size.as_ptr(),
                ptr::null(),
                0,
                ptr::null(),
                ptr::null_mut()
            ),
            |code| ClError::Kernel { stage: "clEnqueueNDRangeKernel", code }
        )?;
        cl_check!(clFinish(ctx.queue()), |code| ClError::Kernel { stage: "clFinish", code })
    }
}

impl Drop for Kernel {
    fn drop(&mut self) {
        unsafe {
            clReleaseKernel(self.kernel);
        }
    }
}
