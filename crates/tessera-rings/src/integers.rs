//! The ring of integers Z and its ideal 2Z.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use dashu::base::{Abs, Gcd, Signed as DashuSigned};
use dashu::integer::IBig;

use crate::traits::{Capability, DivisionError, EuclideanDomain, Ring, UnitRing};

/// The ring of arbitrary precision integers.
///
/// Division with remainder is Euclidean: the remainder is always
/// non-negative, so `div_rem` gives canonical residues for Hermite
/// reduction.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Z(pub IBig);

impl Z {
    /// Creates a new integer.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(IBig::from(value))
    }

    /// Returns the inner `dashu::IBig`.
    #[must_use]
    pub fn into_inner(self) -> IBig {
        self.0
    }

    /// Returns a reference to the inner `dashu::IBig`.
    #[must_use]
    pub fn as_inner(&self) -> &IBig {
        &self.0
    }

    /// Attempts to convert to an i64.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.0.clone().try_into().ok()
    }

    /// Returns true if this integer is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }
}

impl Ring for Z {
    fn zero() -> Self {
        Self(IBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    fn capability() -> Capability<Self> {
        Capability::euclidean_domain()
    }

    fn mul_by_scalar(&self, n: i64) -> Self {
        Self(&self.0 * IBig::from(n))
    }
}

impl UnitRing for Z {
    fn one() -> Self {
        Self(IBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == IBig::ONE
    }

    fn is_unit(&self) -> bool {
        self.0 == IBig::ONE || self.0 == IBig::NEG_ONE
    }

    fn inverse(&self) -> Option<Self> {
        self.is_unit().then(|| self.clone())
    }

    fn from_i64(n: i64) -> Self {
        Self::new(n)
    }

    fn div_integer(&self, n: u64) -> Result<Self, DivisionError> {
        self.divide_exact(&Self(IBig::from(n)))
    }
}

impl EuclideanDomain for Z {
    fn div_rem(&self, other: &Self) -> (Self, Self) {
        let mut q = &self.0 / &other.0;
        let mut r = &self.0 % &other.0;
        if DashuSigned::is_negative(&r) {
            if DashuSigned::is_negative(&other.0) {
                r -= &other.0;
                q += IBig::ONE;
            } else {
                r += &other.0;
                q -= IBig::ONE;
            }
        }
        (Self(q), Self(r))
    }

    fn canonical_unit(&self) -> Self {
        if self.is_negative() {
            Self(IBig::NEG_ONE)
        } else {
            Self(IBig::ONE)
        }
    }

    fn gcd(&self, other: &Self) -> Self {
        Self(IBig::from(self.0.clone().gcd(other.0.clone())))
    }
}

impl Add for Z {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Z {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul for Z {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Neg for Z {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl From<i64> for Z {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<IBig> for Z {
    fn from(value: IBig) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Z {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Z({})", self.0)
    }
}

impl fmt::Display for Z {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The even integers 2Z: a commutative ring without a multiplicative
/// identity.
///
/// Only ring operations are available, so matrix algorithms fall back to
/// their division-free variants for it.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Even(Z);

impl Even {
    /// Returns `2 * k`.
    #[must_use]
    pub fn double_of(k: i64) -> Self {
        Self(Z::new(k).mul_by_scalar(2))
    }

    /// Returns the element if `value` is even.
    #[must_use]
    pub fn new(value: i64) -> Option<Self> {
        (value % 2 == 0).then(|| Self(Z::new(value)))
    }

    /// Returns the underlying integer.
    #[must_use]
    pub fn as_integer(&self) -> &Z {
        &self.0
    }
}

impl Ring for Even {
    fn zero() -> Self {
        Self(Z::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Add for Even {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Even {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul for Even {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Neg for Even {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl fmt::Display for Even {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
