//! Property-based tests for expression trees.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::node::Node;
    use crate::taylor::taylor_polynomial;

    fn small_coeff() -> impl Strategy<Value = f64> {
        (-20i32..=20i32).prop_map(|n| f64::from(n) / 4.0)
    }

    fn small_int() -> impl Strategy<Value = f64> {
        (-3i32..=3i32).prop_map(f64::from)
    }

    fn small_x() -> impl Strategy<Value = f64> {
        (-2i32..=2i32).prop_map(f64::from)
    }

    fn int_poly() -> impl Strategy<Value = Node> {
        proptest::collection::vec(small_int(), 1..=4).prop_map(Node::polynomial)
    }

    // Shallow trees over small integers without Quotient: every value and
    // derivative at an integer point is an exactly representable integer.
    fn tree() -> impl Strategy<Value = Node> {
        let leaf = prop_oneof![small_int().prop_map(Node::constant), int_poly()];
        leaf.prop_recursive(2, 8, 2, |inner| {
            prop_oneof![
                inner.clone().prop_map(Node::negation),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Node::sum(a, b)),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Node::difference(a, b)),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Node::product(a, b)),
                (inner.clone(), 1i32..=2).prop_map(|(a, e)| Node::power(a, e)),
                proptest::collection::vec(inner.clone(), 1..=2)
                    .prop_map(|ops| Node::multi_sum(ops).expect("non-empty")),
                proptest::collection::vec(inner, 1..=2)
                    .prop_map(|ops| Node::multi_product(ops).expect("non-empty")),
            ]
        })
    }

    proptest! {
        #[test]
        fn constant_value_and_slope(v in -1e6f64..1e6, x in -1e3f64..1e3) {
            let c = Node::constant(v);
            prop_assert_eq!(c.value_at(x), v);
            prop_assert_eq!(c.derivative().value_at(x), 0.0);
        }

        #[test]
        fn negation_negates_derivative(f in tree(), x in small_x()) {
            let lhs = Node::negation(f.clone()).derivative().value_at(x);
            prop_assert_eq!(lhs, -f.derivative().value_at(x));
        }

        #[test]
        fn symbolic_derivative_matches_dual_numbers(f in tree(), x in small_x()) {
            let (value, slope) = f.tangent_at(x);
            prop_assert_eq!(value, f.value_at(x));
            prop_assert_eq!(slope, f.derivative().value_at(x), "derivative of {}", f);
        }

        #[test]
        fn taylor_of_quadratic_is_identity(c0 in small_coeff(), c1 in small_coeff(), c2 in small_coeff()) {
            let f = Node::polynomial(vec![c0, c1, c2]);
            prop_assert_eq!(taylor_polynomial(&f, 2), f);
        }

        #[test]
        fn rendering_is_deterministic(f in tree()) {
            prop_assert_eq!(f.to_string(), f.clone().to_string());
        }

        #[test]
        fn derivative_leaves_input_untouched(f in tree()) {
            let before = f.clone();
            let _ = f.derivative();
            prop_assert_eq!(f, before);
        }
    }
}
