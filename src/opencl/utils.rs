//! Вспомогательные функции для OpenCL

use super::types::{cl_int, CL_SUCCESS};
use std::ffi::{c_void, CString};

/// Преобразует строку в null-terminated строку для C
pub fn to_c_string(s: &str) -> Option<CString> {
    CString::new(s).ok()
}

/// Превращает байты, полученные из clGet*Info, в строку без завершающих NUL
pub fn info_bytes_to_string(mut bytes: Vec<u8>) -> String {
    if let Some(end) = bytes.iter().position(|&b| b == 0) {
        bytes.truncate(end);
    }
    String::from_utf8_lossy(&bytes).trim_end().to_string()
}

/// Двухшаговый запрос строкового параметра: сначала размер, затем данные.
///
/// `query` получает `(param_value_size, param_value, param_value_size_ret)`
/// и возвращает код OpenCL.
pub fn query_info_string<F>(mut query: F) -> Result<String, cl_int>
where
    F: FnMut(usize, *mut c_void, *mut usize) -> cl_int,
{
    let mut size = 0usize;
    let code = query(0, std::ptr::null_mut(), &mut size);
    if code != CL_SUCCESS {
        return Err(code);
    }
    if size == 0 {
        return Ok(String::new());
    }

    let mut buffer = vec![0u8; size];
    let code = query(size, buffer.as_mut_ptr() as *mut c_void, std::ptr::null_mut());
    if code != CL_SUCCESS {
        return Err(code);
    }
    Ok(info_bytes_to_string(buffer))
}
