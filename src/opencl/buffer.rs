//! Буферы памяти устройства для f32 данных

use super::bindings::*;
use super::context::ComputeContext;
use super::types::*;
use crate::error::{ClError, Result};
use crate::{cl_check, cl_create};
use std::ffi::c_void;
use std::ptr;

pub struct DeviceBuffer {
    mem: cl_mem,
    len: usize,
}

impl DeviceBuffer {
    /// Буфер только для чтения, заполненный копией `data`
    pub fn from_slice(ctx: &ComputeContext, data: &[f32], stage: &'static str) -> Result<Self> {
        let mem = cl_create!(
            clCreateBuffer(
                ctx.raw_context(),
                CL_MEM_READ_ONLY | CL_MEM_COPY_HOST_PTR,
                std::mem::size_of_val(data),
                data.as_ptr() as *mut c_void
            ),
            |code| ClError::Buffer { stage, code }
        )?;
        Ok(Self { mem, len: data.len() })
    }

    /// Неинициализированный буфер результата на `len` элементов
    pub fn write_only(ctx: &ComputeContext, len: usize, stage: &'static str) -> Result<Self> {
        let mem = cl_create!(
            clCreateBuffer(
                ctx.raw_context(),
                CL_MEM_WRITE_ONLY,
                len * std::mem::size_of::<f32>(),
                ptr::null_mut()
            ),
            |code| ClError::Buffer { stage, code }
        )?;
        Ok(Self { mem, len })
    }

    /// Число элементов f32 в буфере
    fn len(&self) -> usize {
        self.len
    }

    pub fn raw(&self) -> cl_mem {
        self.mem
    }

    /// Блокирующее чтение всего буфера в `out`
    pub fn read_into(&self, ctx: &ComputeContext, out: &mut [f32]) -> Result<()> {
        if out.len() != self.len() {
            return Err(ClError::Buffer { stage: "clEnqueueReadBuffer: length mismatch", code: 0 });
        }
        cl_check!(
            clEnqueueReadBuffer(
                ctx.queue(),
                self.mem,
                CL_TRUE,
                0,
                std::mem::size_of_val(out),
                out.as_mut_ptr() as *mut c_void,
                0,
                ptr::null(),
                ptr::null_mut()
            ),
            |code| ClError::Buffer { stage: "clEnqueueReadBuffer", code }
        )
    }
}

impl Drop for DeviceBuffer {
    fn drop(&mut self) {
        unsafe {
            clReleaseMemObject(self.mem);
        }
    }
}
