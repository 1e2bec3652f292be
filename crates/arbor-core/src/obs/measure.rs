use std::time::{Duration, Instant};

///
/// Measured
///
/// A value paired with the wall-clock time it took to produce.
///

#[derive(Clone, Copy, Debug)]
pub struct Measured<T> {
    pub value: T,
    pub elapsed: Duration,
}

impl<T> Measured<T> {
    #[must_use]
    pub fn elapsed_millis(&self) -> u128 {
        self.elapsed.as_millis()
    }

    /// Transform the value while keeping the measured duration.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Measured<U> {
        Measured {
            value: f(self.value),
            elapsed: self.elapsed,
        }
    }
}

/// Run `f` and record its duration.
///
/// The closure's result is returned untouched; measuring never changes
/// what is evaluated.
pub fn measure<T>(f: impl FnOnce() -> T) -> Measured<T> {
    let start = Instant::now();
    let value = f();

    Measured {
        value,
        elapsed: start.elapsed(),
    }
}
