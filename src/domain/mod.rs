//! Domain layer - door state, its reconciliation, and the voice envelope.
//!
//! Pure types and functions; no I/O happens here.

pub mod door;
pub mod foundation;
pub mod voice;
