//! Uniform stream interface.

/// A stream of uniform variates in the open interval (0, 1).
///
/// Samplers that need an unbounded number of draws (acceptance-rejection
/// methods) read from this trait instead of from a fixed slice.
pub trait UniformSource {
    /// Next uniform variate in (0, 1).
    fn next_uniform(&mut self) -> f64;
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}
