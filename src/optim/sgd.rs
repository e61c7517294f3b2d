//! Stochastic gradient descent

use std::fmt;

use crate::tensor::Tensor;

/// Hyperparameters for [`Sgd`].
#[derive(Debug, Clone, Copy)]
pub struct SgdConfig {
    /// Base step size
    pub learning_rate: f64,
    /// Annealing rate; the step size for evaluation `k` (counted from 0) is
    /// `learning_rate / (1 + k * learning_rate_decay)`
    pub learning_rate_decay: f64,
    /// Per-step parameter shrink factor, applied as
    /// `x += -weight_decay * learning_rate * x` before the gradient step
    pub weight_decay: f64,
    /// Smoothing factor for the tracked gradient average
    pub momentum: f64,
}

impl Default for SgdConfig {
    fn default() -> Self {
        Self {
            learning_rate: 1e-3,
            learning_rate_decay: 0.0,
            weight_decay: 0.0,
            momentum: 0.0,
        }
    }
}

/// Stochastic gradient descent over a single parameter tensor.
///
/// The optimizer owns nothing but its hyperparameters and bookkeeping;
/// parameters live in the caller's tensor and are updated in place through
/// it.
///
/// When momentum is enabled the optimizer maintains an exponentially
/// smoothed copy of the gradients, but the parameter update itself always
/// uses the raw gradient of the current evaluation; the smoothed tensor is
/// bookkeeping for callers that want to inspect it.
#[derive(Debug)]
pub struct Sgd {
    config: SgdConfig,
    eval_counter: u64,
    last_fx: Option<f64>,
    smoothed_grad: Option<Tensor>,
}

impl Sgd {
    /// Create an optimizer with the given hyperparameters.
    ///
    /// # Panics
    ///
    /// Panics unless `learning_rate > 0` and the decay, weight decay and
    /// momentum factors are all non-negative.
    pub fn new(config: SgdConfig) -> Self {
        assert!(
            config.learning_rate > 0.0,
            "Sgd::new: learning_rate must be positive"
        );
        assert!(
            config.learning_rate_decay >= 0.0,
            "Sgd::new: learning_rate_decay must be non-negative"
        );
        assert!(
            config.weight_decay >= 0.0,
            "Sgd::new: weight_decay must be non-negative"
        );
        assert!(
            config.momentum >= 0.0,
            "Sgd::new: momentum must be non-negative"
        );
        Self {
            config,
            eval_counter: 0,
            last_fx: None,
            smoothed_grad: None,
        }
    }

    /// Evaluate `f` at `x` and take one descent step in place.
    ///
    /// `f` returns the objective value and its gradient at `x`; the gradient
    /// must cover its storage and match `x`'s element count. Returns the
    /// objective value, which is also kept in [`Sgd::last_fx`].
    ///
    /// With weight decay enabled `x` must cover its storage as well.
    pub fn step<F>(&mut self, x: &Tensor, f: F) -> f64
    where
        F: FnOnce(&Tensor) -> (f64, Tensor),
    {
        let (fx, dfdx) = f(x);

        if self.config.momentum != 0.0 {
            match &self.smoothed_grad {
                Some(smoothed) => {
                    smoothed
                        .mul(self.config.momentum)
                        .add(1.0 - self.config.momentum, &dfdx);
                }
                None => self.smoothed_grad = Some(dfdx.deep_copy()),
            }
        }

        if self.config.weight_decay != 0.0 {
            x.add(-self.config.weight_decay * self.config.learning_rate, x);
        }

        let current_lr = self.config.learning_rate
            / (1.0 + self.eval_counter as f64 * self.config.learning_rate_decay);
        x.add(-current_lr, &dfdx);

        self.eval_counter += 1;
        self.last_fx = Some(fx);
        fx
    }

    /// Get the hyperparameters
    #[inline]
    pub fn config(&self) -> &SgdConfig {
        &self.config
    }

    /// Get the number of objective evaluations taken so far
    #[inline]
    pub fn eval_counter(&self) -> u64 {
        self.eval_counter
    }

    /// Get the objective value from the most recent step
    #[inline]
    pub fn last_fx(&self) -> Option<f64> {
        self.last_fx
    }

    /// Get the smoothed gradient, present once momentum is enabled and at
    /// least one step has run
    #[inline]
    pub fn smoothed_grad(&self) -> Option<&Tensor> {
        self.smoothed_grad.as_ref()
    }
}

impl Default for Sgd {
    fn default() -> Self {
        Self::new(SgdConfig::default())
    }
}

impl fmt::Display for Sgd {
    /// One line of hyperparameters and progress.
    ///
    /// Diagnostic output only; the format is not stable.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sgd lr {} lr decay {} weight decay {} momentum {} evals {}",
            self.config.learning_rate,
            self.config.learning_rate_decay,
            self.config.weight_decay,
            self.config.momentum,
            self.eval_counter
        )?;
        if let Some(fx) = self.last_fx {
            write!(f, " last fx {fx}")?;
        }
        Ok(())
    }
}
