//! Univariate polynomial rings R[x].
//!
//! Over a field F, F[x] is a Euclidean domain with the degree as the
//! Euclidean function. Matrices with polynomial entries ("lambda-matrices",
//! such as the characteristic matrix xI - A) are reduced over this ring.

use std::fmt;

use crate::traits::{Capability, DivisionError, EuclideanDomain, Field, Ring, UnitRing};

/// A polynomial over a ring R.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Polynomial<R: Ring> {
    /// Coefficients in ascending degree order: [a_0, a_1, a_2, ...]
    /// Invariant: trailing zeros are removed (except for the zero polynomial).
    coeffs: Vec<R>,
}

impl<R: Ring> Polynomial<R> {
    /// Creates a new polynomial from coefficients.
    ///
    /// Coefficients are given in ascending degree order.
    #[must_use]
    pub fn new(mut coeffs: Vec<R>) -> Self {
        while coeffs.len() > 1 && coeffs.last().is_some_and(|c| c.is_zero()) {
            coeffs.pop();
        }

        if coeffs.is_empty() {
            coeffs.push(R::zero());
        }

        Self { coeffs }
    }

    /// Creates a constant polynomial.
    #[must_use]
    pub fn constant(c: R) -> Self {
        Self::new(vec![c])
    }

    /// Creates the monomial c * x^n.
    #[must_use]
    pub fn monomial(c: R, n: usize) -> Self {
        let mut coeffs = vec![R::zero(); n + 1];
        coeffs[n] = c;
        Self::new(coeffs)
    }

    /// Returns the degree of the polynomial.
    ///
    /// The zero polynomial has degree 0 by convention.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero_poly(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_zero()
    }

    /// Returns the leading coefficient.
    #[must_use]
    pub fn leading_coeff(&self) -> &R {
        &self.coeffs[self.coeffs.len() - 1]
    }

    /// Returns the coefficient of x^i.
    #[must_use]
    pub fn coeff(&self, i: usize) -> R {
        self.coeffs.get(i).cloned().unwrap_or_else(R::zero)
    }

    /// Returns all coefficients.
    #[must_use]
    pub fn coeffs(&self) -> &[R] {
        &self.coeffs
    }

    /// Evaluates the polynomial at a point.
    #[must_use]
    pub fn eval(&self, x: &R) -> R {
        // Horner's method
        let mut result = R::zero();
        for c in self.coeffs.iter().rev() {
            result = result * x.clone() + c.clone();
        }
        result
    }

    /// Multiplies by a scalar.
    #[must_use]
    pub fn scale(&self, c: &R) -> Self {
        Self::new(self.coeffs.iter().map(|x| x.clone() * c.clone()).collect())
    }

    fn add_poly(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let result = (0..len).map(|i| self.coeff(i) + other.coeff(i)).collect();
        Self::new(result)
    }

    fn neg_poly(&self) -> Self {
        Self::new(self.coeffs.iter().map(|c| -c.clone()).collect())
    }

    fn mul_poly(&self, other: &Self) -> Self {
        if self.is_zero_poly() || other.is_zero_poly() {
            return Self::new(Vec::new());
        }

        let n = self.coeffs.len();
        let m = other.coeffs.len();
        let mut result = vec![R::zero(); n + m - 1];

        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                result[i + j] = result[i + j].clone() + a.clone() * b.clone();
            }
        }

        Self::new(result)
    }
}

impl<R: UnitRing> Polynomial<R> {
    /// Creates the polynomial x.
    #[must_use]
    pub fn x() -> Self {
        Self::new(vec![R::zero(), R::one()])
    }

    /// Returns true if the leading coefficient is one.
    #[must_use]
    pub fn is_monic(&self) -> bool {
        self.leading_coeff().is_one()
    }
}

impl<F: Field> Polynomial<F> {
    /// Long division by a non-zero polynomial.
    fn long_division(&self, divisor: &Self) -> (Self, Self) {
        let Some(lc_inv) = divisor.leading_coeff().inv() else {
            // Division by the zero polynomial: quotient 0, remainder self.
            return (Self::new(Vec::new()), self.clone());
        };

        let d = divisor.degree();
        let mut rem = self.coeffs.clone();
        if rem.len() <= d {
            return (Self::new(Vec::new()), self.clone());
        }

        let mut quot = vec![F::zero(); rem.len() - d];
        for k in (0..quot.len()).rev() {
            let c = rem[k + d].clone() * lc_inv.clone();
            if c.is_zero() {
                continue;
            }
            for (i, b) in divisor.coeffs.iter().enumerate() {
                rem[k + i] = rem[k + i].clone() - c.clone() * b.clone();
            }
            quot[k] = c;
        }
        rem.truncate(d.max(1));

        (Self::new(quot), Self::new(rem))
    }

    /// Makes the polynomial monic. The zero polynomial is returned unchanged.
    #[must_use]
    pub fn monic(&self) -> Self {
        self.clone() * self.canonical_unit()
    }
}

impl<R: Ring> std::ops::Add for Polynomial<R> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.add_poly(&rhs)
    }
}

impl<R: Ring> std::ops::Sub for Polynomial<R> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.add_poly(&rhs.neg_poly())
    }
}

impl<R: Ring> std::ops::Mul for Polynomial<R> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.mul_poly(&rhs)
    }
}

impl<R: Ring> std::ops::Neg for Polynomial<R> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.neg_poly()
    }
}

impl<F: Field> Ring for Polynomial<F> {
    fn zero() -> Self {
        Self::new(Vec::new())
    }

    fn is_zero(&self) -> bool {
        self.is_zero_poly()
    }

    fn capability() -> Capability<Self> {
        Capability::euclidean_domain()
    }
}

impl<F: Field> UnitRing for Polynomial<F> {
    fn one() -> Self {
        Self::constant(F::one())
    }

    fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_one()
    }

    fn is_unit(&self) -> bool {
        self.degree() == 0 && !self.is_zero_poly()
    }

    fn inverse(&self) -> Option<Self> {
        if self.degree() == 0 {
            self.coeffs[0].inv().map(Self::constant)
        } else {
            None
        }
    }

    fn div_integer(&self, n: u64) -> Result<Self, DivisionError> {
        let coeffs = self
            .coeffs
            .iter()
            .map(|c| c.div_integer(n))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(coeffs))
    }
}

impl<F: Field> EuclideanDomain for Polynomial<F> {
    fn div_rem(&self, other: &Self) -> (Self, Self) {
        self.long_division(other)
    }

    fn canonical_unit(&self) -> Self {
        self.leading_coeff()
            .inv()
            .map_or_else(Self::one, Self::constant)
    }
}

impl<R: Ring + fmt::Display> fmt::Display for Polynomial<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero_poly() {
            return write!(f, "0");
        }

        let mut terms = Vec::new();
        for (i, c) in self.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }

            let term = match i {
                0 => format!("{c}"),
                1 => format!("{c}*x"),
                _ => format!("{c}*x^{i}"),
            };
            terms.push(term);
        }

        write!(f, "{}", terms.join(" + "))
    }
}
