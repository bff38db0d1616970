//! Concrete semirings beyond [`LogSpace`](crate::LogSpace).
//!
//! `f64` and `bool` implement the contract directly; the others are thin
//! newtypes so that the same float can mean different algebras.

mod expectation;
mod real;
mod tropical;

pub use expectation::{Expectation, SecondOrderExpectation};
pub use real::Count;
pub use tropical::{MaxTimes, MinPlus};
