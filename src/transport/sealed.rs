//! Sealed trait marker for Transport implementations.
//!
//! Prevents external implementations of the `Transport` trait, so every
//! transport in circulation honors the sign-then-send contract.

pub(crate) mod private {
    /// Sealed trait marker.
    pub trait Sealed {}
}
