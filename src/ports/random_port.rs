//! Random draw capability consumed by the series generator.

pub trait RandomSource {
    /// Next uniform draw in [0, 1).
    fn next_unit(&mut self) -> f64;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}
