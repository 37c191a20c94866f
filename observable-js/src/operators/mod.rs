//! Combinators over [`Observable`](crate::Observable), implemented as inherent methods.

mod combine;
mod compare;
mod error;
mod flatten;
mod time;
mod transform;

pub use combine::zip;
