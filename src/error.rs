//! Error types for tensr

use thiserror::Error;

/// Result type alias using tensr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when constructing views.
///
/// Every condition here is a contract violation, not an expected runtime
/// outcome. The panicking constructors surface these by aborting; the `try_`
/// twins return them so callers can probe a construction before committing.
#[derive(Error, Debug)]
pub enum Error {
    /// Index out of bounds
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index
        index: usize,
        /// Size of the dimension
        size: usize,
    },

    /// Invalid dimension index
    #[error("Invalid dimension {dim} for tensor with {ndim} dimensions")]
    InvalidDimension {
        /// The invalid dimension
        dim: usize,
        /// Number of dimensions
        ndim: usize,
    },

    /// A strided view would address storage positions past the end
    #[error("View out of bounds: last addressed element {last} exceeds storage of size {size}")]
    ViewOutOfBounds {
        /// Largest storage position the view would address
        last: usize,
        /// Size of the storage
        size: usize,
    },

    /// Stride of zero supplied where a positive stride is required
    #[error("Stride must be positive")]
    ZeroStride,

    /// Ravel requested on a view that does not cover its storage
    #[error("Operation requires a tensor that covers its storage")]
    NotCoveringStorage,

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }
}
