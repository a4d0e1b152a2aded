//! Residue rings Z/nZ and prime fields Z/pZ.
//!
//! `Zn<N>` is only a unit ring: for composite N it has zero divisors and
//! non-invertible non-zero elements, which is exactly the situation where
//! matrix inversion has to go through the adjugate. `Fp<P>` wraps the same
//! representation and adds the field structure; P must be prime.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_integer::Integer as _;

use crate::traits::{Capability, EuclideanDomain, Field, Ring, UnitRing};

/// An integer modulo N.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Zn<const N: u64>(u64);

impl<const N: u64> Zn<N> {
    /// Creates a new residue.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value % N)
    }

    /// Creates a residue from a signed value.
    #[must_use]
    pub fn from_signed(value: i64) -> Self {
        let m = i128::from(N);
        let r = i128::from(value).rem_euclid(m);
        // r < N, so it fits.
        Self(u64::try_from(r).unwrap_or_default())
    }

    /// Returns the canonical representative in `0..N`.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the modulus.
    #[must_use]
    pub const fn modulus() -> u64 {
        N
    }

    fn mul_mod(a: u64, b: u64) -> u64 {
        let p = u128::from(a) * u128::from(b) % u128::from(N);
        // p < N
        u64::try_from(p).unwrap_or_default()
    }

    /// Inverse via the extended Euclidean algorithm on machine integers.
    fn inv_mod(self) -> Option<Self> {
        if self.0 == 0 {
            return None;
        }

        let mut t = 0i128;
        let mut new_t = 1i128;
        let mut r = i128::from(N);
        let mut new_r = i128::from(self.0);

        while new_r != 0 {
            let quotient = r / new_r;
            (t, new_t) = (new_t, t - quotient * new_t);
            (r, new_r) = (new_r, r - quotient * new_r);
        }

        if r > 1 {
            return None;
        }

        let m = i128::from(N);
        u64::try_from(t.rem_euclid(m)).ok().map(Self)
    }
}

impl<const N: u64> Ring for Zn<N> {
    fn zero() -> Self {
        Self(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }

    fn capability() -> Capability<Self> {
        Capability::unit_ring()
    }

    fn mul_by_scalar(&self, n: i64) -> Self {
        *self * Self::from_signed(n)
    }
}

impl<const N: u64> UnitRing for Zn<N> {
    fn one() -> Self {
        Self::new(1)
    }

    fn is_one(&self) -> bool {
        *self == Self::one()
    }

    fn is_unit(&self) -> bool {
        self.0.gcd(&N) == 1
    }

    fn inverse(&self) -> Option<Self> {
        self.inv_mod()
    }

    fn from_i64(n: i64) -> Self {
        Self::from_signed(n)
    }
}

impl<const N: u64> Add for Zn<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let s = (u128::from(self.0) + u128::from(rhs.0)) % u128::from(N);
        Self(u64::try_from(s).unwrap_or_default())
    }
}

impl<const N: u64> Sub for Zn<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl<const N: u64> Mul for Zn<N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(Self::mul_mod(self.0, rhs.0))
    }
}

impl<const N: u64> Neg for Zn<N> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        if self.0 == 0 {
            self
        } else {
            Self(N - self.0)
        }
    }
}

impl<const N: u64> From<i64> for Zn<N> {
    fn from(value: i64) -> Self {
        Self::from_signed(value)
    }
}

impl<const N: u64> fmt::Debug for Zn<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (mod {})", self.0, N)
    }
}

impl<const N: u64> fmt::Display for Zn<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The prime field Z/PZ.
///
/// P must be prime; nothing checks this.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Fp<const P: u64>(pub Zn<P>);

impl<const P: u64> Fp<P> {
    /// Creates a new field element.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(Zn::new(value))
    }

    /// Creates a field element from a signed value.
    #[must_use]
    pub fn from_signed(value: i64) -> Self {
        Self(Zn::from_signed(value))
    }

    /// Returns the value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0.value()
    }

    /// Returns the characteristic (the prime p).
    #[must_use]
    pub const fn characteristic() -> u64 {
        P
    }
}

impl<const P: u64> Ring for Fp<P> {
    fn zero() -> Self {
        Self(Zn::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    fn capability() -> Capability<Self> {
        Capability::field()
    }

    fn mul_by_scalar(&self, n: i64) -> Self {
        Self(self.0.mul_by_scalar(n))
    }
}

impl<const P: u64> UnitRing for Fp<P> {
    fn one() -> Self {
        Self(Zn::one())
    }

    fn is_one(&self) -> bool {
        self.0.is_one()
    }

    fn is_unit(&self) -> bool {
        !self.is_zero()
    }

    fn inverse(&self) -> Option<Self> {
        self.inv()
    }

    fn from_i64(n: i64) -> Self {
        Self::from_signed(n)
    }
}

impl<const P: u64> EuclideanDomain for Fp<P> {
    fn div_rem(&self, other: &Self) -> (Self, Self) {
        // In a field, division is exact
        let q = other.inv().map_or_else(Self::zero, |inv| *self * inv);
        (q, Self::zero())
    }

    fn canonical_unit(&self) -> Self {
        self.inv().unwrap_or_else(Self::one)
    }
}

impl<const P: u64> Field for Fp<P> {
    fn inv(&self) -> Option<Self> {
        self.0.inv_mod().map(Self)
    }
}

impl<const P: u64> Add for Fp<P> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl<const P: u64> Sub for Fp<P> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl<const P: u64> Mul for Fp<P> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl<const P: u64> Neg for Fp<P> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl<const P: u64> From<i64> for Fp<P> {
    fn from(value: i64) -> Self {
        Self::from_signed(value)
    }
}

impl<const P: u64> fmt::Display for Fp<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type alias for GF(2), the field with two elements.
pub type GF2 = Fp<2>;
