//! Stock elementwise transforms
//!
//! `Storage::apply` and `Tensor::apply` rewrite every element through a
//! caller-supplied `FnMut(f64) -> f64`; any context the transform needs is
//! closure capture. The two transforms here back `fill` and `zero`.

/// Transform that ignores its input and yields the captured constant.
///
/// `apply(constant(v))` is how `fill(v)` is implemented.
pub fn constant(value: f64) -> impl FnMut(f64) -> f64 {
    move |_| value
}

/// Transform that ignores its input and yields zero.
pub fn zero(_value: f64) -> f64 {
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant() {
        let mut zero_fn = constant(0.0);
        assert_eq!(zero_fn(123.0), 0.0);

        let mut one_fn = constant(1.0);
        assert_eq!(one_fn(27.0), 1.0);
    }

    #[test]
    fn test_zero() {
        assert_eq!(zero(27.0), 0.0);
        assert_eq!(zero(-1.5), 0.0);
    }
}
