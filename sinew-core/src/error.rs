//! Error types for the sinew connectivity generators.
//!
//! Every generator validates its inputs before producing any edges, so a
//! returned error always means no partial [`crate::Connection`] exists.

use std::fmt;

use thiserror::Error;

use crate::population::Shape;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error produced while configuring or running a [`crate::Connector`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConnectError {
    /// Pre and post populations were required to agree but do not.
    #[error(
        "pre population {pre} (size {}) does not match post population {post} (size {})",
        .pre.size(),
        .post.size()
    )]
    ShapeMismatch {
        /// Shape of the pre-synaptic population.
        pre: Shape,
        /// Shape of the post-synaptic population.
        post: Shape,
    },
    /// A population shape does not cover its index array.
    #[error("shape {shape} describes {} neurons but {len} indices were given", .shape.size())]
    ShapeLengthMismatch {
        /// Requested shape.
        shape: Shape,
        /// Number of indices supplied alongside the shape.
        len: usize,
    },
    /// The generator cannot interpret a population with this many dimensions.
    #[error("{connector} supports {supported} geometry, got {dimensions} dimension(s)")]
    UnsupportedGeometry {
        /// Generator that rejected the population.
        connector: &'static str,
        /// Human-readable description of the accepted geometry.
        supported: &'static str,
        /// Number of dimensions of the rejected population.
        dimensions: usize,
    },
    /// A fixed degree exceeds the population it is drawn from or lies
    /// outside its valid range.
    #[error("invalid degree for {connector}: {reason}")]
    InvalidDegree {
        /// Generator that rejected the degree.
        connector: &'static str,
        /// Why the degree was rejected.
        reason: String,
    },
    /// A degree parameter was neither an integer count nor a fraction.
    #[error("degree must be an integer count or a float fraction, got `{raw}`")]
    InvalidParameterType {
        /// Raw parameter text.
        raw: String,
    },
    /// A numeric parameter was outside its valid range.
    #[error("invalid {name} for {connector}: {reason}")]
    InvalidParameter {
        /// Generator that rejected the parameter.
        connector: &'static str,
        /// Parameter name.
        name: &'static str,
        /// Why the parameter was rejected.
        reason: String,
    },
    /// The requested generator exists only as a placeholder.
    #[error("{connector} connectivity is not implemented")]
    NotImplemented {
        /// Name of the placeholder generator.
        connector: &'static str,
    },
}

define_error_codes! {
    /// Stable codes describing [`ConnectError`] variants.
    enum ConnectErrorCode for ConnectError {
        /// Pre and post populations disagree in shape or size.
        ShapeMismatch => ShapeMismatch { .. } => "SINEW_SHAPE_MISMATCH",
        /// A population shape does not cover its index array.
        ShapeLengthMismatch => ShapeLengthMismatch { .. } => "SINEW_SHAPE_LENGTH_MISMATCH",
        /// The population geometry is not supported by the generator.
        UnsupportedGeometry => UnsupportedGeometry { .. } => "SINEW_UNSUPPORTED_GEOMETRY",
        /// The fixed degree is invalid.
        InvalidDegree => InvalidDegree { .. } => "SINEW_INVALID_DEGREE",
        /// The degree parameter has an unsupported type.
        InvalidParameterType => InvalidParameterType { .. } => "SINEW_INVALID_PARAMETER_TYPE",
        /// A numeric parameter is out of range.
        InvalidParameter => InvalidParameter { .. } => "SINEW_INVALID_PARAMETER",
        /// The generator is a placeholder.
        NotImplemented => NotImplemented { .. } => "SINEW_NOT_IMPLEMENTED",
    }
}

/// Convenient alias for results returned by the generators.
pub type Result<T> = core::result::Result<T, ConnectError>;
