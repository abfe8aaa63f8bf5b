//! End-to-end behaviour of every generator through the `Connector` trait.

mod common;

use rstest::rstest;
use sinew_core::{
    All2All, ConnectError, Connector, Dog, FixedPostNum, FixedPreNum, FixedProb, GaussianProb,
    GaussianWeight, GridEight, GridFour, GridN, One2One, Population, ScaleFree, SmallWorld,
};

use common::{in_degrees, out_degrees, pairs};

#[test]
fn identity_pairs_by_position() {
    let pre = Population::from_ids(vec![3, 1, 2]);
    let post = Population::from_ids(vec![0, 5, 4]);
    let connection = One2One.connect(&pre, &post).expect("equal lengths");
    assert_eq!(pairs(&connection), [(3, 0), (1, 5), (2, 4)]);
}

#[test]
fn identity_rejects_unequal_lengths() {
    let err = One2One
        .connect(&Population::range(2), &Population::range(3))
        .expect_err("lengths differ");
    assert!(matches!(err, ConnectError::ShapeMismatch { .. }));
}

#[test]
fn dense_without_self_drops_exactly_the_diagonal() {
    let layer = Population::range(5);
    let connection = All2All::new(false).connect(&layer, &layer).expect("dense");
    let edges = pairs(&connection);
    assert_eq!(edges.len(), 20);
    for i in 0..5 {
        for j in 0..5 {
            assert_eq!(edges.contains(&(i, j)), i != j, "pair ({i}, {j})");
        }
    }
}

#[rstest]
#[case(4, 4)]
#[case(0, 2)]
#[case(2, 2)]
#[case(1, 3)]
fn grid_four_degrees_on_three_by_three(#[case] cell: usize, #[case] expected: usize) {
    let sheet = Population::grid(3, 3);
    let connection = GridFour::default().connect(&sheet, &sheet).expect("planar grid");
    assert_eq!(out_degrees(&connection, 9)[cell], expected);
}

#[test]
fn grid_rejects_mismatched_shapes() {
    let err = GridEight::default()
        .connect(&Population::grid(2, 3), &Population::grid(3, 2))
        .expect_err("shapes differ");
    assert!(matches!(err, ConnectError::ShapeMismatch { .. }));
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(42)]
#[case(9_999)]
fn fixed_in_degree_holds_for_any_seed(#[case] seed: u64) {
    let connection = FixedPreNum::new(2)
        .expect("valid degree")
        .with_seed(seed)
        .connect(&Population::range(5), &Population::range(4))
        .expect("2 <= 5");
    assert_eq!(in_degrees(&connection, 4), [2, 2, 2, 2]);
}

#[rstest]
#[case(0)]
#[case(7)]
fn fixed_out_degree_holds_for_any_seed(#[case] seed: u64) {
    let connection = FixedPostNum::new(3)
        .expect("valid degree")
        .with_include_self(false)
        .with_seed(seed)
        .connect(&Population::range(6), &Population::range(6))
        .expect("3 <= 6");
    assert_eq!(out_degrees(&connection, 6), [3; 6]);
    assert!(connection.edges().all(|edge| edge.pre != edge.post));
}

#[test]
fn gaussian_weight_on_single_points_is_peak() {
    let point = Population::grid(1, 1);
    let connection = GaussianWeight::new(1.0, 1.0)
        .expect("valid sigma")
        .connect(&point, &point)
        .expect("planar");
    assert_eq!(pairs(&connection), [(0, 0)]);
    assert_eq!(connection.weights(), Some(&[1.0][..]));
}

#[rstest]
#[case(Population::grid(1, 5))]
#[case(Population::grid(5, 1))]
fn decay_handles_degenerate_axes(#[case] strip: Population) {
    let connection = GaussianWeight::new(0.5, 1.0)
        .expect("valid sigma")
        .connect(&strip, &strip)
        .expect("planar");
    let weights = connection.weights().expect("weighted");
    assert!(weights.iter().all(|w| w.is_finite()));
    // The degenerate axis contributes nothing, so each self-pair peaks.
    let mut peaks = connection
        .edges()
        .filter(|edge| edge.pre == edge.post)
        .filter_map(|edge| edge.weight);
    assert!(peaks.all(|w| w == 1.0));
}

#[test]
fn deterministic_generators_are_idempotent() {
    let sheet = Population::grid(4, 3);
    let rules: Vec<Box<dyn Connector>> = vec![
        Box::new(One2One),
        Box::new(All2All::new(false)),
        Box::new(GridFour::new(true)),
        Box::new(GridN::new(2, false)),
        Box::new(GaussianWeight::new(0.4, 2.0).expect("valid sigma")),
        Box::new(Dog::new((0.2, 0.6), (1.0, 0.5)).expect("valid sigmas")),
    ];
    for rule in rules {
        let first = rule.connect(&sheet, &sheet).expect("valid inputs");
        let second = rule.connect(&sheet, &sheet).expect("valid inputs");
        assert_eq!(first, second, "{} must be idempotent", rule.name());
    }
}

#[test]
fn seeded_generators_repeat() {
    let sheet = Population::grid(4, 4);
    let rules: Vec<Box<dyn Connector>> = vec![
        Box::new(FixedProb::new(0.3).expect("valid prob").with_seed(5)),
        Box::new(FixedPreNum::new(0.25).expect("valid degree").with_seed(5)),
        Box::new(FixedPostNum::new(4).expect("valid degree").with_seed(5)),
        Box::new(GaussianProb::new(0.3).expect("valid sigma").with_seed(5)),
    ];
    for rule in rules {
        let first = rule.connect(&sheet, &sheet).expect("valid inputs");
        let second = rule.connect(&sheet, &sheet).expect("valid inputs");
        assert_eq!(first, second, "{} must repeat under a seed", rule.name());
    }
}

#[test]
fn sizes_come_from_largest_index_unless_declared() {
    let pre = Population::from_ids(vec![2, 6, 4]);
    let post = Population::from_ids(vec![0, 1, 2]).with_declared_size(10);
    let connection = One2One.connect(&pre, &post).expect("equal lengths");
    assert_eq!((connection.num_pre(), connection.num_post()), (6, 10));
    // Derived layouts still cover index 6.
    assert_eq!(connection.pre_to_post().rows(), 7);
    assert_eq!(connection.to_matrix().rows(), 7);
    assert_eq!(connection.to_matrix().cols(), 10);
}

#[test]
fn fan_in_matches_fan_out() {
    let sheet = Population::grid(3, 4);
    let connection = GridEight::new(false).connect_within(&sheet).expect("planar grid");
    let fan_out = connection.pre_to_post();
    let fan_in = connection.post_to_pre();
    assert_eq!(fan_out.indices().len(), connection.len());
    for (pre, post) in pairs(&connection) {
        assert!(fan_out.neighbours(pre).contains(&post));
        assert!(fan_in.neighbours(post).contains(&pre));
    }
}

#[test]
fn placeholders_report_not_implemented() {
    for err in [ScaleFree::new().map(|_| ()), SmallWorld::new().map(|_| ())] {
        let err = err.expect_err("placeholders never construct");
        assert_eq!(err.code().as_str(), "SINEW_NOT_IMPLEMENTED");
    }
}
