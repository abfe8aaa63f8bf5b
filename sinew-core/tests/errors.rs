//! Error codes and messages surfaced by the generators.

use rstest::rstest;
use sinew_core::{ConnectError, ConnectErrorCode, Shape};

#[rstest]
#[case(
    ConnectError::ShapeMismatch { pre: Shape::new(vec![3]), post: Shape::new(vec![2, 2]) },
    ConnectErrorCode::ShapeMismatch,
    "SINEW_SHAPE_MISMATCH",
)]
#[case(
    ConnectError::ShapeLengthMismatch { shape: Shape::new(vec![2, 3]), len: 5 },
    ConnectErrorCode::ShapeLengthMismatch,
    "SINEW_SHAPE_LENGTH_MISMATCH",
)]
#[case(
    ConnectError::UnsupportedGeometry {
        connector: "grid_four",
        supported: "one- or two-dimensional",
        dimensions: 3,
    },
    ConnectErrorCode::UnsupportedGeometry,
    "SINEW_UNSUPPORTED_GEOMETRY",
)]
#[case(
    ConnectError::InvalidDegree { connector: "fixed_pre_num", reason: "7 exceeds the 5 pre neurons".into() },
    ConnectErrorCode::InvalidDegree,
    "SINEW_INVALID_DEGREE",
)]
#[case(
    ConnectError::InvalidParameterType { raw: "ten".into() },
    ConnectErrorCode::InvalidParameterType,
    "SINEW_INVALID_PARAMETER_TYPE",
)]
#[case(
    ConnectError::InvalidParameter { connector: "fixed_prob", name: "prob", reason: "2 must lie in [0, 1]".into() },
    ConnectErrorCode::InvalidParameter,
    "SINEW_INVALID_PARAMETER",
)]
#[case(
    ConnectError::NotImplemented { connector: "small_world" },
    ConnectErrorCode::NotImplemented,
    "SINEW_NOT_IMPLEMENTED",
)]
fn returns_expected_code(
    #[case] error: ConnectError,
    #[case] expected: ConnectErrorCode,
    #[case] code: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(expected.as_str(), code);
    assert_eq!(expected.to_string(), code);
}

#[rstest]
#[case(
    ConnectError::ShapeMismatch { pre: Shape::new(vec![3]), post: Shape::new(vec![2, 2]) },
    "pre population (3,) (size 3) does not match post population (2, 2) (size 4)",
)]
#[case(
    ConnectError::ShapeLengthMismatch { shape: Shape::new(vec![2, 3]), len: 5 },
    "shape (2, 3) describes 6 neurons but 5 indices were given",
)]
#[case(
    ConnectError::NotImplemented { connector: "scale_free" },
    "scale_free connectivity is not implemented",
)]
fn renders_messages(#[case] error: ConnectError, #[case] expected: &str) {
    assert_eq!(error.to_string(), expected);
}
