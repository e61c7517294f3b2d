//! Arithmetic and elementwise operations on tensors

use crate::elementwise;
use crate::tensor::core::Tensor;
use crate::tensor::layout::Shape;

impl Tensor {
    /// Replace every logical element `x` with `f(x)`, returning `&self` for
    /// chaining.
    ///
    /// A tensor that covers its storage is swept directly through
    /// [`Storage::apply`](crate::storage::Storage::apply), under the
    /// buffer's write lock; `f` must not touch the same storage through
    /// another handle in that case. Any other view is walked element by
    /// element in logical order, touching only the elements it maps.
    pub fn apply<F: FnMut(f64) -> f64>(&self, mut f: F) -> &Self {
        if self.covers_storage() {
            self.storage().apply(f);
            return self;
        }
        match self.layout().shape() {
            Shape::Rank1 { size0, .. } => {
                for i in 0..size0 {
                    self.set1(i, f(self.get1(i)));
                }
            }
            Shape::Rank2 { size0, size1, .. } => {
                for i in 0..size0 {
                    for j in 0..size1 {
                        self.set2(i, j, f(self.get2(i, j)));
                    }
                }
            }
        }
        self
    }

    /// Set every logical element to `value`, returning `&self` for chaining.
    pub fn fill(&self, value: f64) -> &Self {
        self.apply(elementwise::constant(value))
    }

    /// Set every logical element to zero, returning `&self` for chaining.
    pub fn zero(&self) -> &Self {
        self.apply(elementwise::zero)
    }

    /// Accumulate `scalar * other` into this tensor elementwise, returning
    /// `&self` for chaining.
    ///
    /// `other` is raveled first and consumed in row-major order against this
    /// tensor's logical order; the shapes may differ as long as the element
    /// counts match. `other` may alias `self` (each element is read before
    /// the matching element is written), so `x.add(1.0, &x)` doubles `x`.
    ///
    /// # Panics
    ///
    /// Panics if `other` does not cover its storage or the element counts
    /// differ.
    pub fn add(&self, scalar: f64, other: &Tensor) -> &Self {
        let raveled = other.ravel();
        assert_eq!(
            self.elem_count(),
            raveled.elem_count(),
            "Tensor::add: element count mismatch"
        );
        match self.layout().shape() {
            Shape::Rank1 { size0, .. } => {
                for i in 0..size0 {
                    self.set1(i, self.get1(i) + scalar * raveled.get1(i));
                }
            }
            Shape::Rank2 { size0, size1, .. } => {
                let mut n = 0;
                for i in 0..size0 {
                    for j in 0..size1 {
                        self.set2(i, j, self.get2(i, j) + scalar * raveled.get1(n));
                        n += 1;
                    }
                }
            }
        }
        self
    }

    /// Scale every logical element by `scalar`, returning `&self` for
    /// chaining.
    pub fn mul(&self, scalar: f64) -> &Self {
        self.apply(|x| x * scalar)
    }

    /// Dot product of the raveled elements of two tensors.
    ///
    /// Both tensors are raveled first, so shapes may differ as long as the
    /// element counts match; a 2x3 tensor dots a length-6 vector.
    ///
    /// # Panics
    ///
    /// Panics if either tensor does not cover its storage or the element
    /// counts differ.
    pub fn dot(&self, other: &Tensor) -> f64 {
        let a = self.ravel();
        let b = other.ravel();
        assert_eq!(
            a.elem_count(),
            b.elem_count(),
            "Tensor::dot: element count mismatch"
        );
        let mut sum = 0.0;
        for i in 0..a.elem_count() {
            sum += a.get1(i) * b.get1(i);
        }
        sum
    }
}
