//! tensr: reference-counted tensors with shared mutable views
//!
//! A small numeric core built around two types:
//!
//! - [`Storage`]: a reference-counted flat buffer of `f64`. Cloning a
//!   handle shares the buffer instead of copying it.
//! - [`Tensor`]: a 1D or 2D strided view over a storage. Views made with
//!   [`Tensor::select`] or [`Tensor::new1_from_storage`] alias the original
//!   buffer, so mutation through any view is visible through all of them.
//!
//! On top of the tensor core sit a few training pieces: a fully connected
//! layer ([`nn::Linear`]), a mean squared error criterion
//! ([`nn::MseCriterion`]) and in-place gradient descent ([`optim::Sgd`]).
//!
//! # Quick start
//!
//! ```
//! use tensr::prelude::*;
//!
//! let m = Tensor::new2(2, 3);
//! m.fill(1.0);
//!
//! // Rows are views, not copies.
//! let row = m.select(0, 1);
//! row.mul(10.0);
//! assert_eq!(m.get2(0, 0), 1.0);
//! assert_eq!(m.get2(1, 0), 10.0);
//!
//! // The storage is shared while the view is alive.
//! assert_eq!(m.storage().ref_count(), 2);
//! drop(row);
//! assert_eq!(m.storage().ref_count(), 1);
//! ```

#![warn(missing_docs)]

pub mod elementwise;
pub mod error;
pub mod nn;
pub mod optim;
pub mod storage;
pub mod tensor;

pub use error::{Error, Result};
pub use storage::Storage;
pub use tensor::Tensor;

/// Commonly used imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::nn::{Linear, MseCriterion};
    pub use crate::optim::{Sgd, SgdConfig};
    pub use crate::storage::Storage;
    pub use crate::tensor::{Layout, Shape, Tensor};
}
