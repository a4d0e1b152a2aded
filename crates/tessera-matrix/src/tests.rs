//! Integration tests for tessera-matrix.

#[cfg(test)]
mod integration_tests {
    use crate::{smith_normal_form, DenseMatrix, MatrixError, MatrixRead, SmithConfig, SolutionKind};
    use tessera_rings::{Even, Fp, Polynomial, Ring, UnitRing, Zn, Q, Z};

    fn z_matrix(rows: &[&[i64]]) -> DenseMatrix<Z> {
        DenseMatrix::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|&v| Z::new(v)).collect())
                .collect(),
        )
        .unwrap()
    }

    fn q_matrix(rows: &[&[i64]]) -> DenseMatrix<Q> {
        z_matrix(rows).map(|z| Q::from(z.clone()))
    }

    #[test]
    fn test_singular_integer_matrix() {
        let a = z_matrix(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]]);

        let snf = smith_normal_form(&a, &SmithConfig::default());
        assert_eq!(
            snf.normal_form,
            DenseMatrix::diagonal(vec![Z::new(1), Z::new(3), Z::new(0)])
        );
        assert_eq!(a.det().unwrap(), Z::zero());
        assert_eq!(a.rank(), 2);
        assert_eq!(a.inverse(), Err(MatrixError::NotInvertible));
    }

    #[test]
    fn test_diagonal_system_over_rationals() {
        let a = q_matrix(&[&[2, 0], &[0, 3]]);
        let b = DenseMatrix::column_vector(vec![Q::from_integer(4), Q::from_integer(9)]).unwrap();

        let solution = a.solve_linear(&b).unwrap();
        assert_eq!(solution.kind(), SolutionKind::Single);
        assert_eq!(
            solution.particular().unwrap().col(0),
            vec![Q::from_integer(2), Q::from_integer(3)]
        );
    }

    #[test]
    fn test_inconsistent_system_over_rationals() {
        let a = q_matrix(&[&[1, 1], &[1, 1]]);
        let b = DenseMatrix::column_vector(vec![Q::from_integer(1), Q::from_integer(2)]).unwrap();

        let solution = a.solve_linear(&b).unwrap();
        assert_eq!(solution.kind(), SolutionKind::Empty);
        assert_eq!(solution.homogeneous().rank(), 1);
    }

    #[test]
    fn test_every_capability_agrees_on_determinant() {
        let rows: &[&[i64]] = &[&[2, 0, 1, 3], &[1, 1, 0, 2], &[0, 3, 1, 1], &[4, 1, 2, 0]];
        let z = z_matrix(rows);
        let expected = z.det().unwrap();
        assert_eq!(expected, Z::new(-32));

        assert_eq!(q_matrix(rows).det().unwrap(), Q::from(expected.clone()));
        assert_eq!(z.det_slow().unwrap(), expected);

        let z6 = z.map(|v| Zn::<6>::from_signed(v.to_i64().unwrap_or(0)));
        assert_eq!(z6.det().unwrap(), Zn::<6>::from_signed(-32));

        let f7 = z.map(|v| Fp::<7>::from_signed(v.to_i64().unwrap_or(0)));
        assert_eq!(f7.det().unwrap(), Fp::<7>::from_signed(-32));

        // every entry doubled scales the determinant by 2^4 inside 2Z
        let even = z.map(|v| Even::double_of(v.to_i64().unwrap_or(0)));
        assert_eq!(even.det().unwrap(), Even::double_of(-32 * 8));
    }

    #[test]
    fn test_views_compose_without_copying() {
        let m = z_matrix(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 10]]);
        let t = m.transposed();
        let sub = t.sub_matrix(0..2, 1..3).unwrap();
        // transpose rows 0..2, cols 1..3 = [[4, 7], [5, 8]]
        assert_eq!(sub.to_dense(), z_matrix(&[&[4, 7], &[5, 8]]));
        assert_eq!(sub.to_dense().det().unwrap(), Z::new(-3));

        let cofactor = t.cofactor(0, 0).unwrap();
        assert!(cofactor.values_eq(&z_matrix(&[&[5, 8], &[6, 10]])));
    }

    #[test]
    fn test_adjugate_identity_across_scalars() {
        let z = z_matrix(&[&[2, 1, 1], &[1, 3, 2], &[1, 0, 1]]);
        let adj = z.adjugate().unwrap();
        let det = z.det().unwrap();
        assert_eq!(z.mm(&adj).unwrap(), DenseMatrix::identity(3).scale(&det));

        let z6 = z.map(|v| Zn::<6>::from_signed(v.to_i64().unwrap_or(0)));
        let adj6 = z6.adjugate().unwrap();
        let det6 = z6.det().unwrap();
        assert_eq!(z6.mm(&adj6).unwrap(), DenseMatrix::identity(3).scale(&det6));
    }

    #[test]
    fn test_lambda_matrix_determinant_is_characteristic_polynomial() {
        let m = q_matrix(&[&[2, 1, 1, 3], &[1, 3, 2, 0], &[1, 0, 1, 5], &[4, -1, 2, 2]]);
        let lambda = m.characteristic_matrix().unwrap();
        let det = lambda.det().unwrap();
        assert_eq!(det, m.characteristic_polynomial().unwrap());
        assert!(det.is_monic());
        assert_eq!(det.degree(), 4);
    }

    #[test]
    fn test_smith_of_characteristic_matrix_multiplies_out() {
        let m = q_matrix(&[&[2, 0, 0], &[0, 2, 0], &[0, 0, 3]]);
        let snf = smith_normal_form(&m.characteristic_matrix().unwrap(), &SmithConfig::default());
        let product = snf
            .invariant_factors
            .iter()
            .fold(Polynomial::<Q>::one(), |acc, p| acc * p.clone());
        assert_eq!(product, m.characteristic_polynomial().unwrap());
    }

    #[test]
    fn test_basis_round_trip() {
        let a = q_matrix(&[&[1, 2, 0], &[0, 1, 1], &[1, 3, 1]]);
        let columns = a.column_space();
        assert_eq!(columns.rank(), 2);
        let v = a.mv(&[Q::from_integer(1), Q::from_integer(-1), Q::from_integer(2)]).unwrap();
        assert!(columns.contains(&v));

        let kernel = a.kernel();
        assert_eq!(kernel.rank() + a.rank(), 3);
    }
}

#[cfg(test)]
mod proptest_tests {
    use std::cmp::Ordering;

    use proptest::prelude::*;

    use crate::{smith_normal_form, DenseMatrix, MatrixError, SmithConfig};
    use tessera_rings::{EuclideanDomain, Ring, UnitRing, Zn, Q, Z};

    fn z_matrix(rows: usize, cols: usize) -> impl Strategy<Value = DenseMatrix<Z>> {
        prop::collection::vec(-6i64..=6, rows * cols)
            .prop_map(move |v| DenseMatrix::from_flat(rows, cols, v.into_iter().map(Z::new).collect()).unwrap())
    }

    fn q_matrix(rows: usize, cols: usize) -> impl Strategy<Value = DenseMatrix<Q>> {
        z_matrix(rows, cols).prop_map(|m| m.map(|z| Q::from(z.clone())))
    }

    /// Integer matrices of determinant ±1, built as `P * L * U` with a row
    /// swap `P`, unit lower `L` and upper `U` carrying ±1 on the diagonal.
    fn unimodular_z(n: usize) -> impl Strategy<Value = DenseMatrix<Z>> {
        (
            prop::collection::vec(-3i64..=3, n * n),
            prop::collection::vec(-3i64..=3, n * n),
            prop::collection::vec(any::<bool>(), 2 * n),
            0..n,
        )
            .prop_map(move |(lower, upper, signs, k)| {
                let sign = |negative: bool| Z::new(if negative { -1 } else { 1 });
                let l = DenseMatrix::from_fn(n, n, |i, j| match i.cmp(&j) {
                    Ordering::Greater => Z::new(lower[i * n + j]),
                    Ordering::Equal => sign(signs[i]),
                    Ordering::Less => Z::zero(),
                });
                let u = DenseMatrix::from_fn(n, n, |i, j| match i.cmp(&j) {
                    Ordering::Less => Z::new(upper[i * n + j]),
                    Ordering::Equal => sign(signs[n + i]),
                    Ordering::Greater => Z::zero(),
                });
                let pl = DenseMatrix::from_fn(n, n, |i, j| {
                    let source = if i == 0 {
                        k
                    } else if i == k {
                        0
                    } else {
                        i
                    };
                    l[(source, j)].clone()
                });
                pl.mm(&u).unwrap()
            })
    }

    fn q_vector(len: usize) -> impl Strategy<Value = Vec<Q>> {
        prop::collection::vec(-9i64..=9, len).prop_map(|v| v.into_iter().map(Q::from_integer).collect())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn solve_round_trip(a in q_matrix(3, 3), b in q_vector(3)) {
            prop_assume!(!a.det().unwrap().is_zero());
            let x = a.solve(&b).unwrap().unwrap();
            prop_assert_eq!(a.mv(&x).unwrap(), b);
        }

        #[test]
        fn kernel_vectors_are_annihilated(a in q_matrix(3, 4)) {
            let kernel = a.solve_homo();
            for v in kernel.vectors() {
                prop_assert!(a.mv(v).unwrap().iter().all(Ring::is_zero));
            }
            prop_assert_eq!(a.rank() + kernel.rank(), a.num_cols());
        }

        #[test]
        fn inverse_is_two_sided(a in q_matrix(3, 3)) {
            prop_assume!(!a.det().unwrap().is_zero());
            let inv = a.inverse().unwrap();
            prop_assert!(a.mm(&inv).unwrap().is_identity());
            prop_assert!(inv.mm(&a).unwrap().is_identity());
        }

        #[test]
        fn unimodular_integer_inverse(a in unimodular_z(3)) {
            prop_assert!(a.det().unwrap().is_unit());
            let inv = a.inverse().unwrap();
            prop_assert!(a.mm(&inv).unwrap().is_identity());
            prop_assert!(inv.mm(&a).unwrap().is_identity());
            prop_assert_eq!(inv, a.inverse_by_adjugate().unwrap());
        }

        #[test]
        fn integer_inverse_needs_unit_determinant(a in unimodular_z(3), d in 2i64..=5) {
            let scaled = DenseMatrix::from_fn(3, 3, |i, j| {
                if i == 0 {
                    a[(i, j)].clone() * Z::new(d)
                } else {
                    a[(i, j)].clone()
                }
            });
            prop_assert_eq!(scaled.det().unwrap().to_i64().map(i64::abs), Some(d));
            prop_assert!(!scaled.is_invertible());
            prop_assert_eq!(scaled.inverse(), Err(MatrixError::NotInvertible));
        }

        #[test]
        fn unit_determinant_inverts_modulo_six(a in unimodular_z(3)) {
            let a6 = a.map(|v| Zn::<6>::from_signed(v.to_i64().unwrap_or(0)));
            prop_assert!(a6.det().unwrap().is_unit());
            let inv = a6.inverse().unwrap();
            prop_assert!(a6.mm(&inv).unwrap().is_identity());
            prop_assert!(inv.mm(&a6).unwrap().is_identity());
        }

        #[test]
        fn determinant_is_multiplicative(a in z_matrix(4, 4), b in z_matrix(4, 4)) {
            let ab = a.mm(&b).unwrap();
            prop_assert_eq!(ab.det().unwrap(), a.det().unwrap() * b.det().unwrap());
        }

        #[test]
        fn bareiss_matches_expansion(a in z_matrix(5, 5)) {
            prop_assert_eq!(a.det().unwrap(), a.det_slow().unwrap());
        }

        #[test]
        fn smith_divisibility_chain(a in z_matrix(3, 4)) {
            let snf = smith_normal_form(&a, &SmithConfig::default());
            for pair in snf.invariant_factors.windows(2) {
                prop_assert!(pair[1].is_divisible_by(&pair[0]));
            }
            let u = snf.left_transform.as_ref().unwrap();
            let v = snf.right_transform.as_ref().unwrap();
            prop_assert!(u.det().unwrap().is_unit());
            prop_assert!(v.det().unwrap().is_unit());
            prop_assert_eq!(u.mm(&a).unwrap().mm(v).unwrap(), snf.normal_form);
            prop_assert_eq!(snf.rank, a.rank());
        }

        #[test]
        fn adjugate_scales_identity(a in z_matrix(4, 4)) {
            let det = a.det().unwrap();
            let adj = a.adjugate().unwrap();
            prop_assert_eq!(a.mm(&adj).unwrap(), DenseMatrix::identity(4).scale(&det));
        }

        #[test]
        fn hessenberg_preserves_characteristic_polynomial(a in q_matrix(4, 4)) {
            let h = a.to_upper_hessenberg().unwrap();
            prop_assert!(h.is_upper_hessenberg());
            prop_assert_eq!(
                h.characteristic_coefficients().unwrap(),
                a.characteristic_coefficients().unwrap()
            );
        }

        #[test]
        fn integer_and_rational_rank_agree(a in z_matrix(3, 5)) {
            let q = a.map(|z| Q::from(z.clone()));
            prop_assert_eq!(a.rank(), q.rank());
        }
    }
}
