//! # tessera-rings
//!
//! Algebraic capability contracts for the tessera matrix engine.
//!
//! This crate provides:
//! - Capability traits: `Ring`, `UnitRing`, `EuclideanDomain`, `Field`
//! - A `Capability` token for dispatching on the strongest structure
//! - Concrete scalars: Z, Q, Z/nZ, Z/pZ, 2Z and polynomials F[x]
//!
//! ## Trait Hierarchy
//!
//! ```text
//! Ring                 (2Z)
//!  └── UnitRing        (Z/nZ)
//!       └── EuclideanDomain   (Z, F[x])
//!            └── Field        (Q, Z/pZ)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod integers;
pub mod modular;
pub mod poly_ring;
pub mod rationals;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use integers::{Even, Z};
pub use modular::{Fp, Zn, GF2};
pub use poly_ring::Polynomial;
pub use rationals::Q;
pub use traits::{
    Capability, DivisionError, EuclideanDomain, EuclideanOps, Field, FieldOps, Ring, UnitRing,
};
