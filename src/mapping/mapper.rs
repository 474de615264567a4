//! Mapper trait

/// Trait for value-to-parameter mapping functions
pub trait Mapper: Send + Sync {
    /// Map an input value to an output value
    fn map(&self, input: f64) -> f64;
}
