//! Trait for components that can be advanced by clock ticks.

/// A component driven one discrete tick at a time.
///
/// One tick is one unit of observable progress. Ticking is fallible: a
/// component with an abort-style error policy surfaces its failure and the
/// caller stops driving it. There is no retry inside a tick.
pub trait Tickable {
    /// The failure type a tick can surface.
    type Error;

    /// Advance the component by one tick.
    fn tick(&mut self) -> Result<(), Self::Error>;
}
