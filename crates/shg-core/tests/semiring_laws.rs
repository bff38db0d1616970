use proptest::prelude::*;
use shg_core::{
    Count, Expectation, LogSpace, MaxTimes, MinPlus, Module, SecondOrderExpectation, Semiring,
};

fn check_laws<W, F>(a: &W, b: &W, c: &W, eq: F)
where
    W: Semiring,
    F: Fn(&W, &W) -> bool,
{
    let zero = W::zero();
    let one = W::one();
    assert!(eq(&a.add(&b.add(c)), &a.add(b).add(c)), "⊕ associativity");
    assert!(eq(&a.mul(&b.mul(c)), &a.mul(b).mul(c)), "⊗ associativity");
    assert!(eq(&a.mul(&b.add(c)), &a.mul(b).add(&a.mul(c))), "left distributivity");
    assert!(eq(&b.add(c).mul(a), &b.mul(a).add(&c.mul(a))), "right distributivity");
    assert!(eq(&a.add(&zero), a), "additive identity");
    assert!(eq(&a.mul(&one), a), "right multiplicative identity");
    assert!(eq(&one.mul(a), a), "left multiplicative identity");
    assert!(a.mul(&zero).is_zero(), "right annihilation");
    assert!(zero.mul(a).is_zero(), "left annihilation");
    if W::COMMUTATIVE {
        assert!(eq(&a.add(b), &b.add(a)), "⊕ commutativity");
        assert!(eq(&a.mul(b), &b.mul(a)), "⊗ commutativity");
    }
}

fn scaling_distributes<K, M>(x1: &M, x2: &M, k: &K) -> bool
where
    K: Semiring,
    M: Module<K> + PartialEq,
{
    x1.plus(x2).scale(k) == x1.scale(k).plus(&x2.scale(k)) && x1.plus(&M::null()) == *x1
}

fn logspace_eq(x: &LogSpace, y: &LogSpace) -> bool {
    x.approx_eq(y, 1e-9)
}

fn probability() -> impl Strategy<Value = LogSpace> {
    prop_oneof![
        Just(LogSpace::ZERO),
        (1e-300f64..1e300).prop_map(LogSpace::lift),
        (-700.0f64..700.0).prop_map(|ell| LogSpace::from_log(true, ell)),
    ]
}

fn small_integer() -> impl Strategy<Value = f64> {
    (-6i32..=6).prop_map(f64::from)
}

fn dyadic_unit() -> impl Strategy<Value = f64> {
    (0u32..=8).prop_map(|k| f64::from(k) / 8.0)
}

proptest! {
    #[test]
    fn logspace_laws_on_probabilities(a in probability(), b in probability(), c in probability()) {
        check_laws(&a, &b, &c, logspace_eq);
    }

    #[test]
    fn real_laws(a in small_integer(), b in small_integer(), c in small_integer()) {
        check_laws(&a, &b, &c, |x: &f64, y: &f64| x == y);
    }

    #[test]
    fn boolean_laws(a in any::<bool>(), b in any::<bool>(), c in any::<bool>()) {
        check_laws(&a, &b, &c, |x: &bool, y: &bool| x == y);
    }

    #[test]
    fn count_laws(a in 0u64..50, b in 0u64..50, c in 0u64..50) {
        check_laws(&Count(a), &Count(b), &Count(c), |x: &Count, y: &Count| x == y);
    }

    #[test]
    fn max_times_laws(a in dyadic_unit(), b in dyadic_unit(), c in dyadic_unit()) {
        check_laws(&MaxTimes(a), &MaxTimes(b), &MaxTimes(c), |x: &MaxTimes, y: &MaxTimes| x == y);
    }

    #[test]
    fn min_plus_laws(a in small_integer(), b in small_integer(), c in small_integer()) {
        check_laws(&MinPlus(a), &MinPlus(b), &MinPlus(c), |x: &MinPlus, y: &MinPlus| x == y);
    }

    #[test]
    fn expectation_laws(
        (p1, r1) in (small_integer(), small_integer()),
        (p2, r2) in (small_integer(), small_integer()),
        (p3, r3) in (small_integer(), small_integer()),
    ) {
        let a = Expectation::new(p1, r1);
        let b = Expectation::new(p2, r2);
        let c = Expectation::new(p3, r3);
        check_laws(&a, &b, &c, |x: &Expectation<f64>, y: &Expectation<f64>| x == y);
    }

    #[test]
    fn second_order_expectation_laws(
        a in (small_integer(), small_integer(), small_integer(), small_integer()),
        b in (small_integer(), small_integer(), small_integer(), small_integer()),
        c in (small_integer(), small_integer(), small_integer(), small_integer()),
    ) {
        let lift = |(p, r, s, t): (f64, f64, f64, f64)| SecondOrderExpectation::new(p, r, s, t);
        check_laws(
            &lift(a),
            &lift(b),
            &lift(c),
            |x: &SecondOrderExpectation<f64>, y: &SecondOrderExpectation<f64>| x == y,
        );
    }

    #[test]
    fn scaling_distributes_over_plus(
        x1 in (small_integer(), small_integer()),
        x2 in (small_integer(), small_integer()),
        k in (small_integer(), small_integer()),
    ) {
        let x1 = Expectation::new(x1.0, x1.1);
        let x2 = Expectation::new(x2.0, x2.1);
        let k = Expectation::new(k.0, k.1);
        prop_assert!(scaling_distributes(&x1, &x2, &k));
    }
}

#[test]
fn min_plus_zero_is_absorbing_against_negative_costs() {
    let cost = MinPlus(-3.0);
    assert!(cost.mul(&MinPlus::zero()).is_zero());
    assert_eq!(cost.add(&MinPlus::zero()), cost);
}

#[test]
fn expectation_accumulates_edge_quantities() {
    // Two edges in sequence with masses 0.5 and 0.25 and lengths 1 and 2.
    let first = Expectation::edge(0.5, &1.0);
    let second = Expectation::edge(0.25, &2.0);
    let path = first.mul(&second);
    assert_eq!(path.p, 0.125);
    assert_eq!(path.r, 0.125 * 3.0);
    assert_eq!(path.expected(), 3.0);
}

#[test]
fn second_order_edge_weight_carries_products() {
    let edge = SecondOrderExpectation::edge(0.5, &2.0, &3.0);
    assert_eq!(edge, SecondOrderExpectation::new(0.5, 1.0, 1.5, 3.0));
    // Two edges in sequence: r and s add up along the derivation.
    let path = edge.mul(&SecondOrderExpectation::edge(0.5, &1.0, &1.0));
    let (r, s, t) = path.expected();
    assert_eq!(r, 3.0);
    assert_eq!(s, 4.0);
    assert_eq!(t, 12.0);
    assert!(SecondOrderExpectation::<f64>::one().is_one());
}
