//! Random source port.

/// Random source port for the itinerary sampler.
///
/// Injected so that sampling can be made reproducible in tests.
pub trait RandomSource: Send {
    /// Returns an index uniformly distributed in `0..len`.
    ///
    /// Callers never pass `len == 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<T: RandomSource + ?Sized> RandomSource for Box<T> {
    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }
}
