//! Fully connected layer

use std::fmt;

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::tensor::Tensor;

/// Fully connected layer computing `output = weight * input + bias`.
///
/// Holds an `output_size x input_size` weight matrix and a bias vector,
/// plus gradient accumulators of matching shapes. The accumulators start
/// zeroed and the layer never writes them itself; they are buffers for a
/// caller-driven backward pass.
pub struct Linear {
    input_size: usize,
    output_size: usize,
    weight: Tensor,
    bias: Tensor,
    grad_weight: Tensor,
    grad_bias: Tensor,
}

impl Linear {
    /// Create a layer with parameters drawn from the thread-local generator.
    ///
    /// # Panics
    ///
    /// Panics if either size is zero.
    pub fn new(input_size: usize, output_size: usize) -> Self {
        Self::new_with_rng(input_size, output_size, &mut rand::rng())
    }

    /// Create a layer with parameters drawn from `rng`.
    ///
    /// Seed the generator to make initialization reproducible.
    ///
    /// # Panics
    ///
    /// Panics if either size is zero.
    pub fn new_with_rng<R: Rng + ?Sized>(input_size: usize, output_size: usize, rng: &mut R) -> Self {
        assert!(input_size > 0, "Linear::new: input_size must be positive");
        assert!(output_size > 0, "Linear::new: output_size must be positive");
        let layer = Self {
            input_size,
            output_size,
            weight: Tensor::new2(output_size, input_size),
            bias: Tensor::new1(output_size),
            grad_weight: Tensor::new2(output_size, input_size),
            grad_bias: Tensor::new1(output_size),
        };
        layer.grad_weight.zero();
        layer.grad_bias.zero();
        layer.reset(rng);
        layer
    }

    /// Redraw the parameters uniformly from
    /// `[-1/sqrt(input_size), 1/sqrt(input_size)]`.
    pub fn reset<R: Rng + ?Sized>(&self, rng: &mut R) {
        self.reset_with_bound(rng, 1.0 / (self.input_size as f64).sqrt());
    }

    /// Redraw the parameters uniformly with the bound chosen so the draws
    /// have standard deviation `stdv` (a uniform on `[-b, b]` has standard
    /// deviation `b / sqrt(3)`).
    pub fn reset_with_stdv<R: Rng + ?Sized>(&self, rng: &mut R, stdv: f64) {
        self.reset_with_bound(rng, stdv * 3f64.sqrt());
    }

    fn reset_with_bound<R: Rng + ?Sized>(&self, rng: &mut R, bound: f64) {
        let uniform =
            Uniform::new_inclusive(-bound, bound).expect("Linear::reset: invalid init bound");
        for o in 0..self.output_size {
            for i in 0..self.input_size {
                self.weight.set2(o, i, uniform.sample(rng));
                // The bias element is redrawn alongside every weight in its
                // row; only the last draw survives.
                self.bias.set1(o, uniform.sample(rng));
            }
        }
    }

    /// Compute `weight * input + bias` as a fresh 1D tensor.
    ///
    /// Each call allocates its own output, so earlier results stay valid.
    ///
    /// # Panics
    ///
    /// Panics if `input` is not a 1D tensor of `input_size` elements.
    pub fn forward(&self, input: &Tensor) -> Tensor {
        assert_eq!(
            input.ndim(),
            1,
            "Linear::forward: input must be 1-dimensional"
        );
        assert_eq!(
            input.size0(),
            self.input_size,
            "Linear::forward: input has {} elements, layer takes {}",
            input.size0(),
            self.input_size
        );
        let output = Tensor::new1(self.output_size);
        for o in 0..self.output_size {
            let mut sum = self.bias.get1(o);
            for i in 0..self.input_size {
                sum += self.weight.get2(o, i) * input.get1(i);
            }
            output.set1(o, sum);
        }
        output
    }

    /// Get the number of input features
    #[inline]
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Get the number of output features
    #[inline]
    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// Get the `output_size x input_size` weight matrix
    #[inline]
    pub fn weight(&self) -> &Tensor {
        &self.weight
    }

    /// Get the bias vector
    #[inline]
    pub fn bias(&self) -> &Tensor {
        &self.bias
    }

    /// Get the weight gradient accumulator
    #[inline]
    pub fn grad_weight(&self) -> &Tensor {
        &self.grad_weight
    }

    /// Get the bias gradient accumulator
    #[inline]
    pub fn grad_bias(&self) -> &Tensor {
        &self.grad_bias
    }
}

fn fmt_vector(f: &mut fmt::Formatter<'_>, label: &str, t: &Tensor) -> fmt::Result {
    write!(f, " {label}: [")?;
    for i in 0..t.size0().min(7) {
        write!(f, " {}", t.get1(i))?;
    }
    if t.size0() > 7 {
        write!(f, " ...")?;
    }
    writeln!(f, " ]")
}

fn fmt_matrix(f: &mut fmt::Formatter<'_>, label: &str, t: &Tensor) -> fmt::Result {
    writeln!(f, " {label}:")?;
    let size1 = t.size1().unwrap_or(0);
    for i in 0..t.size0().min(7) {
        write!(f, "  [")?;
        for j in 0..size1.min(7) {
            write!(f, " {}", t.get2(i, j))?;
        }
        if size1 > 7 {
            write!(f, " ...")?;
        }
        writeln!(f, " ]")?;
    }
    if t.size0() > 7 {
        writeln!(f, "  ...")?;
    }
    Ok(())
}

impl fmt::Debug for Linear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Linear")
            .field("input_size", &self.input_size)
            .field("output_size", &self.output_size)
            .finish()
    }
}

impl fmt::Display for Linear {
    /// Sizes plus the parameters and accumulators, capped at 7 values per
    /// dimension.
    ///
    /// Diagnostic output only; the format is not stable.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Linear {} -> {}", self.input_size, self.output_size)?;
        fmt_vector(f, "bias", &self.bias)?;
        fmt_matrix(f, "weight", &self.weight)?;
        fmt_vector(f, "grad bias", &self.grad_bias)?;
        fmt_matrix(f, "grad weight", &self.grad_weight)
    }
}
