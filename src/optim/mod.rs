//! Optimization routines updating parameter tensors in place

mod sgd;

pub use self::sgd::{Sgd, SgdConfig};
