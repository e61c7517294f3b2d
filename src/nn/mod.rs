//! Neural network building blocks: layers and criteria

mod linear;
mod mse;

pub use self::linear::Linear;
pub use self::mse::MseCriterion;
