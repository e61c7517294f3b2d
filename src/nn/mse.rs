//! Mean squared error criterion

use crate::tensor::Tensor;

/// Mean squared error between a prediction and a target.
///
/// Both tensors are raveled first, so shapes may differ as long as the
/// element counts match and both tensors cover their storage. The criterion
/// is stateless; [`MseCriterion::backward`] allocates and returns a fresh
/// gradient tensor on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct MseCriterion;

impl MseCriterion {
    /// Create the criterion
    pub fn new() -> Self {
        Self
    }

    /// Mean of the squared elementwise differences.
    ///
    /// # Panics
    ///
    /// Panics if the element counts differ or either tensor does not cover
    /// its storage.
    pub fn forward(&self, input: &Tensor, target: &Tensor) -> f64 {
        let n = input.elem_count();
        assert_eq!(
            n,
            target.elem_count(),
            "MseCriterion::forward: element count mismatch"
        );
        let input = input.ravel();
        let target = target.ravel();
        let mut sum = 0.0;
        for i in 0..n {
            let diff = input.get1(i) - target.get1(i);
            sum += diff * diff;
        }
        sum / n as f64
    }

    /// Gradient of the criterion with respect to `input`, as a fresh 1D
    /// tensor of `n` elements.
    ///
    /// Element `i` of the result is `(1/n) * 2 * (input_i - target_i) *
    /// input_i`. Note the trailing `input_i` factor: this is not the plain
    /// derivative of [`MseCriterion::forward`], and the scaling is
    /// intentional.
    ///
    /// # Panics
    ///
    /// Panics if the element counts differ or either tensor does not cover
    /// its storage.
    pub fn backward(&self, input: &Tensor, target: &Tensor) -> Tensor {
        let n = input.elem_count();
        assert_eq!(
            n,
            target.elem_count(),
            "MseCriterion::backward: element count mismatch"
        );
        let input = input.ravel();
        let target = target.ravel();
        let result = Tensor::new1(n);
        let over_n = 1.0 / n as f64;
        for i in 0..n {
            let x = input.get1(i);
            result.set1(i, over_n * 2.0 * (x - target.get1(i)) * x);
        }
        result
    }
}
