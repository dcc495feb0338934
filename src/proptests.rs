//! Property-based tests for canonical form, parsing and division.

use proptest::prelude::*;

use crate::Polynomial;

// Arbitrary finite coefficients, rendered and re-parsed through the text grammar.
fn real_poly() -> impl Strategy<Value = Polynomial> {
    proptest::collection::vec((0u32..40, -1.0e6f64..1.0e6), 0..8).prop_map(Polynomial::from_terms)
}

// Integer-valued coefficients keep all arithmetic below exact in f64.
fn int_poly() -> impl Strategy<Value = Polynomial> {
    proptest::collection::vec((0u32..12, -50i32..50), 0..6).prop_map(|terms| {
        Polynomial::from_terms(terms.into_iter().map(|(e, c)| (e, f64::from(c))))
    })
}

// Monic divisors with small lower coefficients keep long division exact over integers.
fn monic_poly() -> impl Strategy<Value = Polynomial> {
    (0u32..6, proptest::collection::vec((0u32..6, -3i32..=3), 0..4)).prop_map(|(degree, lower)| {
        let mut divisor = Polynomial::from_term(degree, 1.0);
        divisor.extend(
            lower
                .into_iter()
                .filter(|&(e, _)| e < degree)
                .map(|(e, c)| (e, f64::from(c))),
        );
        divisor
    })
}

proptest! {
    #[test]
    fn render_parse_round_trip(p in real_poly()) {
        let text = p.to_string();
        let parsed = Polynomial::parse(&text);
        prop_assert!(parsed.is_ok(), "{} failed to parse: {:?}", text, parsed);
        prop_assert_eq!(parsed.unwrap(), p);
    }

    #[test]
    fn canonical_form_is_zero_free_and_sorted(p in real_poly()) {
        let terms = p.terms().collect::<Vec<_>>();
        prop_assert!(terms.iter().all(|t| t.coefficient != 0.0));
        prop_assert!(terms.windows(2).all(|w| w[0].exponent < w[1].exponent));
    }

    #[test]
    fn add_then_subtract(p in int_poly(), q in int_poly()) {
        prop_assert_eq!(&(&p + &q) - &q, p.clone());
        prop_assert!((&p - &p).is_zero());
    }

    #[test]
    fn add_and_mul_commute(p in int_poly(), q in int_poly()) {
        prop_assert_eq!(&p + &q, &q + &p);
        prop_assert_eq!(&p * &q, &q * &p);
    }

    #[test]
    fn mul_degree_is_sum_of_degrees(p in int_poly(), q in int_poly()) {
        let product = &p * &q;
        match (p.degree(), q.degree()) {
            (Some(a), Some(b)) => prop_assert_eq!(product.degree(), Some(a + b)),
            _ => prop_assert!(product.is_zero()),
        }
    }

    #[test]
    fn division_identity(p in int_poly(), d in monic_poly()) {
        let (quotient, remainder) = p.div_rem(&d).unwrap();
        prop_assert_eq!(&quotient * &d + &remainder, p);
        prop_assert!(remainder.is_zero() || remainder.highest_exponent() < d.highest_exponent());
    }

    #[test]
    fn derivative_of_constant_is_zero(c in -1.0e6f64..1.0e6) {
        prop_assert!(Polynomial::from_term(0, c).derive().is_zero());
    }
}
