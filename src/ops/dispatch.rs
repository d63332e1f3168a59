//! DType dispatch utilities
//!
//! `dispatch_dtype!` converts a runtime `DType` into a concrete Rust type and
//! runs a block with that type bound, so a single generic kernel serves every
//! element type.
//!
//! ```ignore
//! dispatch_dtype!(dtype, T => {
//!     unsafe { kernels::eye_kernel::<T>(out_ptr as *mut T, rows, cols) };
//! }, "eye");
//! ```

/// Runtime dtype dispatch over every numeric element type.
///
/// `Bool` has no `Element` impl and yields `UnsupportedDType` for `$error_op`.
#[macro_export]
macro_rules! dispatch_dtype {
    ($dtype:expr, $T:ident => $body:block, $error_op:expr) => {
        match $dtype {
            $crate::dtype::DType::F64 => {
                type $T = f64;
                $body
            }
            $crate::dtype::DType::F32 => {
                type $T = f32;
                $body
            }
            $crate::dtype::DType::I64 => {
                type $T = i64;
                $body
            }
            $crate::dtype::DType::I32 => {
                type $T = i32;
                $body
            }
            $crate::dtype::DType::I16 => {
                type $T = i16;
                $body
            }
            $crate::dtype::DType::I8 => {
                type $T = i8;
                $body
            }
            $crate::dtype::DType::U64 => {
                type $T = u64;
                $body
            }
            $crate::dtype::DType::U32 => {
                type $T = u32;
                $body
            }
            $crate::dtype::DType::U16 => {
                type $T = u16;
                $body
            }
            $crate::dtype::DType::U8 => {
                type $T = u8;
                $body
            }
            other => {
                return Err($crate::error::Error::UnsupportedDType {
                    dtype: other,
                    op: $error_op,
                })
            }
        }
    };
}

/// Runtime dtype dispatch restricted to `f32`/`f64`.
///
/// Used by factorization paths; any other dtype yields `UnsupportedDType`.
#[macro_export]
macro_rules! dispatch_float_dtype {
    ($dtype:expr, $T:ident => $body:block, $error_op:expr) => {
        match $dtype {
            $crate::dtype::DType::F64 => {
                type $T = f64;
                $body
            }
            $crate::dtype::DType::F32 => {
                type $T = f32;
                $body
            }
            other => {
                return Err($crate::error::Error::UnsupportedDType {
                    dtype: other,
                    op: $error_op,
                })
            }
        }
    };
}
