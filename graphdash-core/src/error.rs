//! Error types for the graphdash core library.
//!
//! Every public error enum carries a stable machine-readable code so the CLI
//! can log failures without matching on display strings.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

use crate::graph::NodeId;

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

/// Error produced while generating, loading or writing graphs.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GraphError {
    /// A generation parameter was negative.
    #[error("{parameter} must be non-negative (got {got})")]
    InvalidArgument {
        /// Name of the rejected parameter.
        parameter: &'static str,
        /// Value supplied by the caller.
        got: i64,
    },
    /// Reading or writing a graph file failed.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The node-link document could not be encoded or decoded.
    #[error("invalid node-link JSON: {source}")]
    Json {
        /// Underlying `serde_json` failure.
        #[source]
        source: serde_json::Error,
    },
    /// Two nodes in the document share an id.
    #[error("node {id} appears more than once")]
    DuplicateNode {
        /// Repeated node identifier.
        id: NodeId,
    },
    /// A link referenced a node that the document does not declare.
    #[error("link {source_id} -> {target_id} references unknown node {missing}")]
    UnknownEndpoint {
        /// Source of the offending link.
        source_id: NodeId,
        /// Target of the offending link.
        target_id: NodeId,
        /// Endpoint that has no matching node.
        missing: NodeId,
    },
    /// The document declares a multigraph, which this tool does not model.
    #[error("multigraph documents are not supported")]
    UnsupportedMultigraph,
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// A generation parameter was negative.
        InvalidArgument => InvalidArgument { .. } => "GRAPH_INVALID_ARGUMENT",
        /// Reading or writing a graph file failed.
        Io => Io { .. } => "GRAPH_IO",
        /// The node-link document could not be encoded or decoded.
        Json => Json { .. } => "GRAPH_INVALID_JSON",
        /// Two nodes in the document share an id.
        DuplicateNode => DuplicateNode { .. } => "GRAPH_DUPLICATE_NODE",
        /// A link referenced a node that the document does not declare.
        UnknownEndpoint => UnknownEndpoint { .. } => "GRAPH_UNKNOWN_ENDPOINT",
        /// The document declares a multigraph.
        UnsupportedMultigraph => UnsupportedMultigraph => "GRAPH_UNSUPPORTED_MULTIGRAPH",
    }
}

/// Error produced while rendering styles from a color-mapping payload.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StyleError {
    /// The payload was not a valid attribute → value → color document.
    #[error("malformed color-mapping payload: {source}")]
    MalformedPayload {
        /// Underlying `serde_json` failure.
        #[source]
        source: serde_json::Error,
    },
}

define_error_codes! {
    /// Stable codes describing [`StyleError`] variants.
    enum StyleErrorCode for StyleError {
        /// The payload was not a valid color-mapping document.
        MalformedPayload => MalformedPayload { .. } => "STYLE_MALFORMED_PAYLOAD",
    }
}

/// Convenient alias for results returned by the graph API.
pub type Result<T> = core::result::Result<T, GraphError>;
