//! olc-records
//!
//! Typed rows of the Orion operator-lifecycle snapshot exports.
//!
//! Every field is optional with a fixed default: keys and text fall back to
//! `None`, ranks to `None`, flags to `false`. A value of the wrong JSON type
//! is treated as absent (see [`lenient`]), never as an error.

pub mod lenient;
mod types;

pub use types::*;
