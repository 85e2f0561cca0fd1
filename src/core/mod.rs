//! Core types shared by every layer: node identifiers, the upward
//! delivery contract, field validation, and the top-level error type.

mod error;
mod traits;
pub mod validate;

pub use error::LinkError;
pub use traits::DataIndication;

/// Identifier of one addressable service access point.
///
/// The storage type is a 16-bit signed integer, but identifiers are
/// non-negative wherever they are validated (see [`validate`]).
pub type NodeId = i16;
