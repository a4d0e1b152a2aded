//! Algebraic capability traits.
//!
//! Every matrix algorithm in tessera is written against one of these
//! traits. Each trait is a strict superset of the previous one:
//!
//! ```text
//! Ring
//!  └── UnitRing
//!       └── EuclideanDomain
//!            └── Field
//! ```
//!
//! Algorithms that are generic over a weak capability but can do better
//! with a stronger one ask [`Ring::capability`] once at their entry point
//! and receive a [`Capability`] token carrying the extra operations.

use std::fmt::{self, Debug};
use std::ops::{Add, Mul, Neg, Sub};

use thiserror::Error;

/// Failure of a division that was expected to succeed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DivisionError {
    /// The divisor was zero (or not a unit where one was required).
    #[error("division by zero")]
    DivisionByZero,

    /// The division left a non-zero remainder.
    #[error("division is not exact")]
    NotExact,
}

/// A commutative ring, not necessarily with a multiplicative identity.
///
/// # Laws
///
/// - Addition is associative and commutative with identity `zero()`
/// - Multiplication is associative and commutative
/// - Multiplication distributes over addition
/// - Every element has an additive inverse (`neg`)
pub trait Ring:
    Clone + Eq + Debug + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Neg<Output = Self>
{
    /// The additive identity.
    fn zero() -> Self;

    /// Returns true if this is the additive identity.
    fn is_zero(&self) -> bool;

    /// The strongest capability this scalar type provides.
    ///
    /// Implementations of the stronger traits override this; see
    /// [`Capability::unit_ring`], [`Capability::euclidean_domain`] and
    /// [`Capability::field`].
    fn capability() -> Capability<Self> {
        Capability::Ring
    }

    /// Computes self + self + ... (n times), negated for negative n.
    fn mul_by_scalar(&self, n: i64) -> Self {
        if n == 0 {
            return Self::zero();
        }

        let mut result = Self::zero();
        let mut base = self.clone();
        let mut k = n.unsigned_abs();

        while k > 0 {
            if k & 1 == 1 {
                result = result + base.clone();
            }
            base = base.clone() + base;
            k >>= 1;
        }

        if n < 0 {
            -result
        } else {
            result
        }
    }
}

/// A commutative ring with a multiplicative identity.
pub trait UnitRing: Ring {
    /// The multiplicative identity.
    fn one() -> Self;

    /// Returns true if this is the multiplicative identity.
    fn is_one(&self) -> bool;

    /// Returns true if this element has a multiplicative inverse.
    fn is_unit(&self) -> bool;

    /// The multiplicative inverse, if this element is a unit.
    fn inverse(&self) -> Option<Self>;

    /// The image of an integer under the canonical map Z -> R.
    fn from_i64(n: i64) -> Self {
        Self::one().mul_by_scalar(n)
    }

    /// Exact division by a positive integer.
    ///
    /// The default implementation multiplies by the inverse of `n`,
    /// which works whenever `n` is a unit of the ring.
    ///
    /// # Errors
    ///
    /// Returns [`DivisionError::DivisionByZero`] for `n == 0` and
    /// [`DivisionError::NotExact`] when the quotient does not exist.
    fn div_integer(&self, n: u64) -> Result<Self, DivisionError> {
        if n == 0 {
            return Err(DivisionError::DivisionByZero);
        }
        let n = i64::try_from(n).map_err(|_| DivisionError::NotExact)?;
        Self::from_i64(n)
            .inverse()
            .map(|inv| self.clone() * inv)
            .ok_or(DivisionError::NotExact)
    }

    /// Computes self^n.
    fn pow(&self, n: u32) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result * base.clone();
            }
            base = base.clone() * base;
            exp >>= 1;
        }

        result
    }
}

/// A Euclidean domain supports division with remainder.
///
/// For any a, b with b ≠ 0, there exist q, r such that:
/// - a = b*q + r
/// - Either r = 0 or φ(r) < φ(b) for some Euclidean function φ
pub trait EuclideanDomain: UnitRing {
    /// Computes the quotient and remainder of division.
    ///
    /// # Panics
    ///
    /// May panic if `other` is zero.
    fn div_rem(&self, other: &Self) -> (Self, Self);

    /// Computes the quotient of division.
    fn div(&self, other: &Self) -> Self {
        self.div_rem(other).0
    }

    /// Computes the remainder of division.
    fn rem(&self, other: &Self) -> Self {
        self.div_rem(other).1
    }

    /// Returns true if `other` divides `self`.
    fn is_divisible_by(&self, other: &Self) -> bool {
        if other.is_zero() {
            return self.is_zero();
        }
        self.rem(other).is_zero()
    }

    /// Division that must leave no remainder.
    ///
    /// # Errors
    ///
    /// Returns [`DivisionError::DivisionByZero`] for a zero divisor and
    /// [`DivisionError::NotExact`] for a non-zero remainder.
    fn divide_exact(&self, other: &Self) -> Result<Self, DivisionError> {
        if other.is_zero() {
            return Err(DivisionError::DivisionByZero);
        }
        let (q, r) = self.div_rem(other);
        if r.is_zero() {
            Ok(q)
        } else {
            Err(DivisionError::NotExact)
        }
    }

    /// The unit `u` such that `self * u` is the canonical associate of
    /// `self` (non-negative integers, monic polynomials, ...).
    ///
    /// Returns one for zero.
    fn canonical_unit(&self) -> Self;

    /// Computes the greatest common divisor.
    fn gcd(&self, other: &Self) -> Self {
        let mut a = self.clone();
        let mut b = other.clone();

        while !b.is_zero() {
            let r = a.rem(&b);
            a = b;
            b = r;
        }

        let u = a.canonical_unit();
        a * u
    }

    /// Extended Euclidean algorithm.
    ///
    /// Returns (gcd, x, y) such that gcd = self*x + other*y.
    fn extended_gcd(&self, other: &Self) -> (Self, Self, Self) {
        let mut old_r = self.clone();
        let mut r = other.clone();
        let mut old_s = Self::one();
        let mut s = Self::zero();
        let mut old_t = Self::zero();
        let mut t = Self::one();

        while !r.is_zero() {
            let (q, rem) = old_r.div_rem(&r);
            old_r = r;
            r = rem;

            let new_s = old_s.clone() - q.clone() * s.clone();
            old_s = s;
            s = new_s;

            let new_t = old_t.clone() - q * t.clone();
            old_t = t;
            t = new_t;
        }

        let u = old_r.canonical_unit();
        (old_r * u.clone(), old_s * u.clone(), old_t * u)
    }
}

/// A field is a ring where every non-zero element has a multiplicative inverse.
pub trait Field: EuclideanDomain {
    /// Computes the multiplicative inverse.
    ///
    /// Returns `None` if the element is zero.
    fn inv(&self) -> Option<Self>;

    /// Divides by another element.
    ///
    /// # Errors
    ///
    /// Returns [`DivisionError::DivisionByZero`] if `other` is zero.
    fn try_div(&self, other: &Self) -> Result<Self, DivisionError> {
        other
            .inv()
            .map(|inv| self.clone() * inv)
            .ok_or(DivisionError::DivisionByZero)
    }
}

/// Euclidean-domain operations captured as plain function pointers.
pub struct EuclideanOps<R> {
    /// The multiplicative identity.
    pub one: fn() -> R,
    /// Division with remainder.
    pub div_rem: fn(&R, &R) -> (R, R),
    /// The normalizing unit of an element.
    pub canonical_unit: fn(&R) -> R,
}

impl<R: EuclideanDomain> EuclideanOps<R> {
    /// Captures the operations of `R`.
    #[must_use]
    pub fn of() -> Self {
        Self {
            one: <R as UnitRing>::one,
            div_rem: <R as EuclideanDomain>::div_rem,
            canonical_unit: <R as EuclideanDomain>::canonical_unit,
        }
    }
}

impl<R: Ring> EuclideanOps<R> {
    /// Division that must leave no remainder.
    ///
    /// # Errors
    ///
    /// See [`EuclideanDomain::divide_exact`].
    pub fn divide_exact(&self, a: &R, b: &R) -> Result<R, DivisionError> {
        if b.is_zero() {
            return Err(DivisionError::DivisionByZero);
        }
        let (q, r) = (self.div_rem)(a, b);
        if r.is_zero() {
            Ok(q)
        } else {
            Err(DivisionError::NotExact)
        }
    }
}

/// Field operations captured as plain function pointers.
pub struct FieldOps<R> {
    /// The Euclidean part (remainders are always zero).
    pub euclidean: EuclideanOps<R>,
    /// Multiplicative inverse of a non-zero element.
    pub inv: fn(&R) -> Option<R>,
}

impl<R: Field> FieldOps<R> {
    /// Captures the operations of `R`.
    #[must_use]
    pub fn of() -> Self {
        Self {
            euclidean: EuclideanOps::of(),
            inv: <R as Field>::inv,
        }
    }
}

/// The capability of a scalar type, resolved once per algorithm call.
pub enum Capability<R> {
    /// Only ring operations.
    Ring,
    /// A ring with identity; the [`UnitRing`] methods are available.
    UnitRing,
    /// Division with remainder is available.
    EuclideanDomain(EuclideanOps<R>),
    /// Exact division by any non-zero element is available.
    Field(FieldOps<R>),
}

impl<R: UnitRing> Capability<R> {
    /// The token for a plain unit ring.
    #[must_use]
    pub fn unit_ring() -> Self {
        Self::UnitRing
    }
}

impl<R: EuclideanDomain> Capability<R> {
    /// The token for a Euclidean domain.
    #[must_use]
    pub fn euclidean_domain() -> Self {
        Self::EuclideanDomain(EuclideanOps::of())
    }
}

impl<R: Field> Capability<R> {
    /// The token for a field.
    #[must_use]
    pub fn field() -> Self {
        Self::Field(FieldOps::of())
    }
}

impl<R> Capability<R> {
    /// The Euclidean operations, if the scalar type has them.
    #[must_use]
    pub fn euclidean(&self) -> Option<EuclideanOps<R>> {
        match self {
            Self::EuclideanDomain(ops) => Some(*ops),
            Self::Field(ops) => Some(ops.euclidean),
            Self::Ring | Self::UnitRing => None,
        }
    }

    /// The field operations, if the scalar type has them.
    #[must_use]
    pub fn field_ops(&self) -> Option<FieldOps<R>> {
        match self {
            Self::Field(ops) => Some(*ops),
            _ => None,
        }
    }

    /// Returns true for unit rings and everything stronger.
    #[must_use]
    pub fn has_unit(&self) -> bool {
        !matches!(self, Self::Ring)
    }

    /// A short name for log output.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ring => "ring",
            Self::UnitRing => "unit ring",
            Self::EuclideanDomain(_) => "euclidean domain",
            Self::Field(_) => "field",
        }
    }
}

// Function pointers are `Copy` for every `R`, so these are written by hand
// to avoid the `R: Copy` bound a derive would add.
impl<R> Clone for EuclideanOps<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for EuclideanOps<R> {}

impl<R> Clone for FieldOps<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FieldOps<R> {}

impl<R> Clone for Capability<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Ring => Self::Ring,
            Self::UnitRing => Self::UnitRing,
            Self::EuclideanDomain(ops) => Self::EuclideanDomain(*ops),
            Self::Field(ops) => Self::Field(*ops),
        }
    }
}

impl<R> Debug for Capability<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integers::{Even, Z};
    use crate::modular::Zn;
    use crate::rationals::Q;

    #[test]
    fn test_capability_tokens() {
        assert_eq!(Even::capability().name(), "ring");
        assert_eq!(Zn::<6>::capability().name(), "unit ring");
        assert_eq!(Z::capability().name(), "euclidean domain");
        assert_eq!(Q::capability().name(), "field");

        assert!(Z::capability().euclidean().is_some());
        assert!(Z::capability().field_ops().is_none());
        assert!(Q::capability().euclidean().is_some());
        assert!(!Even::capability().has_unit());
    }

    #[test]
    fn test_ops_token_calls_through() {
        let ops = Z::capability().euclidean().unwrap();
        let (q, r) = (ops.div_rem)(&Z::new(17), &Z::new(5));
        assert_eq!(q, Z::new(3));
        assert_eq!(r, Z::new(2));
        assert_eq!(ops.divide_exact(&Z::new(12), &Z::new(4)), Ok(Z::new(3)));
        assert_eq!(
            ops.divide_exact(&Z::new(13), &Z::new(4)),
            Err(DivisionError::NotExact)
        );
    }

    #[test]
    fn test_mul_by_scalar() {
        assert_eq!(Z::new(7).mul_by_scalar(6), Z::new(42));
        assert_eq!(Z::new(7).mul_by_scalar(-3), Z::new(-21));
        assert_eq!(Z::new(7).mul_by_scalar(0), Z::new(0));
    }

    #[test]
    fn test_default_div_integer() {
        // 3 is a unit mod 7 but not mod 6.
        let x = Zn::<7>::new(5);
        let q = x.div_integer(3).unwrap();
        assert_eq!(q * Zn::<7>::new(3), x);
        assert_eq!(
            Zn::<6>::new(3).div_integer(3),
            Err(DivisionError::NotExact)
        );
    }
}
