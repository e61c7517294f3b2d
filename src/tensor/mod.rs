//! Tensor: 1D/2D strided views over shared storage
//!
//! [`Tensor`] pairs a [`Storage`](crate::storage::Storage) handle with a
//! [`Layout`]. Views built by [`Tensor::select`] and
//! [`Tensor::new1_from_storage`] alias the buffer they were built from, so
//! writing through any view is visible through all of them.

mod core;
mod layout;
mod ops;

pub use self::core::Tensor;
pub use self::layout::{Layout, Shape};
