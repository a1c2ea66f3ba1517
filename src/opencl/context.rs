//! Платформа, устройство, контекст и очередь команд

use super::bindings::*;
use super::callbacks::log_context_notify;
use super::types::*;
use super::utils::query_info_string;
use crate::cl_create;
use crate::error::{ClError, Result};
use std::ptr;

/// Класс устройства, на котором выполняется ядро
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceKind {
    #[default]
    Gpu,
    Cpu,
}

impl DeviceKind {
    pub fn as_cl(self) -> cl_device_type {
        match self {
            DeviceKind::Gpu => CL_DEVICE_TYPE_GPU,
            DeviceKind::Cpu => CL_DEVICE_TYPE_CPU,
        }
    }
}

/// Контекст OpenCL с очередью команд на первом подходящем устройстве.
///
/// Все объекты освобождаются в `Drop`.
pub struct ComputeContext {
    device: cl_device_id,
    context: cl_context,
    command_queue: cl_command_queue,
    platform_name: String,
    device_name: String,
}

impl ComputeContext {
    /// Берёт первую платформу и первое устройство заданного класса
    pub fn new(kind: DeviceKind) -> Result<Self> {
        let mut num_platforms: cl_uint = 0;
        let code = unsafe { clGetPlatformIDs(0, ptr::null_mut(), &mut num_platforms) };
        if code != CL_SUCCESS || num_platforms == 0 {
            log::debug!("clGetPlatformIDs: code {}, платформ {}", code, num_platforms);
            return Err(ClError::NoPlatform);
        }

        let mut platform_ids = vec![ptr::null_mut(); num_platforms as usize];
        let code = unsafe { clGetPlatformIDs(num_platforms, platform_ids.as_mut_ptr(), ptr::null_mut()) };
        if code != CL_SUCCESS {
            return Err(ClError::Setup { stage: "clGetPlatformIDs", code });
        }
        let platform = platform_ids[0];

        let mut device: cl_device_id = ptr::null_mut();
        let code = unsafe { clGetDeviceIDs(platform, kind.as_cl(), 1, &mut device, ptr::null_mut()) };
        if code != CL_SUCCESS {
            if code == CL_DEVICE_NOT_FOUND {
                log::warn!("На первой платформе нет устройства типа {:?}", kind);
            }
            return Err(ClError::Setup { stage: "clGetDeviceIDs", code });
        }

        let platform_name = query_info_string(|size, value, size_ret| unsafe {
            clGetPlatformInfo(platform, CL_PLATFORM_NAME, size, value, size_ret)
        })
        .unwrap_or_default();
        let device_name = query_info_string(|size, value, size_ret| unsafe {
            clGetDeviceInfo(device, CL_DEVICE_NAME, size, value, size_ret)
        })
        .unwrap_or_default();
        log::info!("Платформа: {}, устройство: {}", platform_name, device_name);

        let context = cl_create!(
            clCreateContext(ptr::null(), 1, &device, Some(log_context_notify), ptr::null_mut()),
            |code| ClError::Setup { stage: "clCreateContext", code }
        )?;

        let command_queue = match cl_create!(
            clCreateCommandQueue(context, device, 0),
            |code| ClError::Setup { stage: "clCreateCommandQueue", code }
        ) {
            Ok(queue) => queue,
            Err(e) => {
                unsafe { clReleaseContext(context) };
                return Err(e);
            }
        };

        Ok(Self {
            device,
            context,
            command_queue,
            platform_name,
            device_name,
        })
    }

    pub fn device(&self) -> cl_device_id {
        self.device
    }

    pub fn raw_context(&self) -> cl_context {
        self.context
    }

    pub fn queue(&self) -> cl_command_queue {
        self.command_queue
    }

    pub fn platform_name(&self) -> &str {
        &self.platform_name
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }
}

impl Drop for ComputeContext {
    fn drop(&mut self) {
        unsafe {
            clReleaseCommandQueue(self.command_queue);
            clReleaseContext(self.context);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpu_is_the_default_device_kind() {
        assert_eq!(DeviceKind::default(), DeviceKind::Gpu);
        assert_eq!(DeviceKind::Gpu.as_cl(), CL_DEVICE_TYPE_GPU);
        assert_eq!(DeviceKind::Cpu.as_cl(), CL_DEVICE_TYPE_CPU);
    }
}
