//! Property-based tests for the scalar contracts.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{EuclideanDomain, Field, Fp, Polynomial, Ring, UnitRing, Zn, Q, Z};

    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    fn small_poly() -> impl Strategy<Value = Polynomial<Q>> {
        prop::collection::vec(-20i64..20i64, 1..5)
            .prop_map(|c| Polynomial::new(c.into_iter().map(Q::from_integer).collect()))
    }

    proptest! {
        #[test]
        fn integer_distributive(a in small_int(), b in small_int(), c in small_int()) {
            let (a, b, c) = (Z::new(a), Z::new(b), Z::new(c));
            prop_assert_eq!(
                a.clone() * (b.clone() + c.clone()),
                a.clone() * b + a * c
            );
        }

        #[test]
        fn integer_div_rem_identity(a in small_int(), b in non_zero_int()) {
            let (a, b) = (Z::new(a), Z::new(b));
            let (q, r) = a.div_rem(&b);
            prop_assert_eq!(b.clone() * q + r.clone(), a);
            prop_assert!(!r.is_negative());
            prop_assert!(r < b.abs());
        }

        #[test]
        fn integer_gcd_divides_both(a in non_zero_int(), b in non_zero_int()) {
            let (a, b) = (Z::new(a), Z::new(b));
            let (g, x, y) = a.extended_gcd(&b);
            prop_assert!(a.is_divisible_by(&g));
            prop_assert!(b.is_divisible_by(&g));
            prop_assert_eq!(a * x + b * y, g);
        }

        #[test]
        fn rational_inverse(n in non_zero_int(), d in non_zero_int()) {
            let x = Q::new(n, d);
            prop_assert!((x.clone() * x.inv().unwrap()).is_one());
        }

        #[test]
        fn prime_field_inverse(v in 1u64..101) {
            let x = Fp::<101>::new(v);
            prop_assert!((x * x.inv().unwrap()).is_one());
        }

        #[test]
        fn residue_unit_iff_invertible(v in 0u64..12) {
            let x = Zn::<12>::new(v);
            prop_assert_eq!(x.is_unit(), x.inverse().is_some());
        }

        #[test]
        fn polynomial_div_rem_identity(a in small_poly(), b in small_poly()) {
            prop_assume!(!b.is_zero());
            let (q, r) = a.div_rem(&b);
            prop_assert_eq!(b.clone() * q + r.clone(), a);
            prop_assert!(r.is_zero() || r.degree() < b.degree());
        }
    }
}
