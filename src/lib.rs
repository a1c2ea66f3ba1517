//! OpenCL-ускоренное умножение матриц с проверкой на хосте

pub mod config;
pub mod error;
pub mod matrix;
pub mod opencl;
pub mod pipeline;
pub mod utils;

// Реэкспортируем макросы на уровень крейта
#[macro_use]
mod macros {
    /// Макрос для обработки ошибок OpenCL (коды возврата).
    ///
    /// Второй аргумент строит ошибку из ненулевого кода.
    #[macro_export]
    macro_rules! cl_check {
        ($expr:expr, $on_err:expr) => {{
            #[allow(unused_unsafe)]
            let code = unsafe { $expr };
            if code != $crate::opencl::types::CL_SUCCESS {
                Err(($on_err)(code))
            } else {
                Ok(())
            }
        }};
    }

    /// Макрос для функций, возвращающих объект OpenCL.
    ///
    /// Последний аргумент `errcode_ret` подставляется макросом. Ошибкой
    /// считается только нулевой указатель: созданный объект всегда
    /// возвращается вызывающему, который отвечает за его освобождение.
    #[macro_export]
    macro_rules! cl_create {
        ($func:ident($($arg:expr),* $(,)?), $on_err:expr) => {{
            let mut code: $crate::opencl::types::cl_int = $crate::opencl::types::CL_SUCCESS;
            #[allow(unused_unsafe)]
            let obj = unsafe { $func($($arg,)* &mut code) };
            if obj.is_null() {
                Err(($on_err)(code))
            } else {
                Ok(obj)
            }
        }};
    }
}

// Реэкспорт основных типов для удобства
pub use config::RunConfig;
pub use error::{ClError, Result};
pub use matrix::{Dims, Matrix, MatrixType};
pub use opencl::DeviceKind;

#[cfg(test)]
mod tests {
    use crate::opencl::types::cl_int;
    use std::ffi::c_void;

    fn fake_create(handle: *mut c_void, status: cl_int, errcode_ret: *mut cl_int) -> *mut c_void {
        unsafe { *errcode_ret = status };
        handle
    }

    fn create(handle: *mut c_void, status: cl_int) -> Result<*mut c_void, cl_int> {
        cl_create!(fake_create(handle, status), |code| code)
    }

    #[test]
    fn cl_create_fails_only_on_null_handle() {
        let mut object = 0u8;
        let handle = &mut object as *mut u8 as *mut c_void;

        assert_eq!(create(std::ptr::null_mut(), -5), Err(-5));
        assert_eq!(create(handle, 0), Ok(handle));
        // Ненулевой объект не теряется даже при ненулевом коде
        assert_eq!(create(handle, -5), Ok(handle));
    }

    #[test]
    fn cl_check_maps_non_zero_codes() {
        fn status(code: cl_int) -> cl_int {
            code
        }
        let ok: Result<(), cl_int> = cl_check!(status(0), |code| code);
        let failed: Result<(), cl_int> = cl_check!(status(-36), |code| code);
        assert_eq!(ok, Ok(()));
        assert_eq!(failed, Err(-36));
    }
}
