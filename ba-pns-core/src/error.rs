//! Error types for the ba-pns core library.
//!
//! Every public error enum carries a stable machine-readable code so the CLI
//! and downstream reporting can classify failures without matching on
//! display strings.

use std::fmt;

use thiserror::Error;

use crate::sampler::DegreeKind;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
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
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Errors raised by [`crate::GraphState`] when a mutation would break its
/// structural invariants.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// Node identifiers must be assigned contiguously in creation order.
    #[error("node {got} is not the next identifier (expected {expected})")]
    NonContiguousNode {
        /// Identifier supplied by the caller.
        got: usize,
        /// Identifier the graph would assign next.
        expected: usize,
    },
    /// An edge endpoint does not exist in the graph.
    #[error("node {node} does not exist (graph holds {node_count} nodes)")]
    UnknownNode {
        /// Offending endpoint.
        node: usize,
        /// Number of nodes currently in the graph.
        node_count: usize,
    },
    /// Self-loops are never stored.
    #[error("self-loop on node {node} rejected")]
    SelfLoop {
        /// Node that would have been connected to itself.
        node: usize,
    },
    /// Parallel edges are never stored.
    #[error("edge ({source_node}, {target}) already exists")]
    DuplicateEdge {
        /// Source endpoint of the rejected edge.
        source_node: usize,
        /// Target endpoint of the rejected edge.
        target: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// Node identifiers must be contiguous.
        NonContiguousNode => NonContiguousNode { .. } => "GRAPH_NON_CONTIGUOUS_NODE",
        /// An edge endpoint does not exist.
        UnknownNode => UnknownNode { .. } => "GRAPH_UNKNOWN_NODE",
        /// Self-loops are rejected.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// Parallel edges are rejected.
        DuplicateEdge => DuplicateEdge { .. } => "GRAPH_DUPLICATE_EDGE",
    }
}

/// Errors raised while configuring or recording edge amounts.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AmountError {
    /// The log-amount distribution parameters were rejected.
    #[error("invalid amount distribution: mean={mean}, std_dev={std_dev}")]
    InvalidDistribution {
        /// Requested mean of the log-amount.
        mean: f64,
        /// Requested standard deviation of the log-amount.
        std_dev: f64,
    },
    /// Amounts are written once per edge and never revised.
    #[error("amount for edge ({source_node}, {target}) was already recorded")]
    AlreadyRecorded {
        /// Source endpoint of the edge.
        source_node: usize,
        /// Target endpoint of the edge.
        target: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`AmountError`] variants.
    enum AmountErrorCode for AmountError {
        /// The log-amount distribution parameters were rejected.
        InvalidDistribution => InvalidDistribution { .. } => "AMOUNT_INVALID_DISTRIBUTION",
        /// Amounts are written once per edge.
        AlreadyRecorded => AlreadyRecorded { .. } => "AMOUNT_ALREADY_RECORDED",
    }
}

/// Error type produced when configuring or running an
/// [`crate::EdgeGrowthEngine`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GrowthError {
    /// The growth configuration violates one of its invariants.
    #[error("invalid growth configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the violated invariant.
        reason: String,
    },
    /// Every proposal for an edge collided with an existing edge until the
    /// retry budget ran out.
    #[error(
        "node {node} could not attach an edge weighted by {kind} degree after {attempts} attempts"
    )]
    Saturated {
        /// Node being attached when the budget ran out.
        node: usize,
        /// Degree kind that weighted the candidate draw.
        kind: DegreeKind,
        /// Number of proposals drawn before giving up.
        attempts: usize,
    },
    /// No node other than the active one was available to connect to.
    #[error("node {node} has no candidate counterparts")]
    EmptyCandidatePool {
        /// Node being attached.
        node: usize,
    },
    /// [`crate::EdgeGrowthEngine::generate`] was called on a finished engine.
    #[error("the network has already been generated")]
    AlreadyGenerated,
    /// A graph mutation broke a structural invariant.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Recording or configuring an amount failed.
    #[error(transparent)]
    Amount(#[from] AmountError),
}

define_error_codes! {
    /// Stable codes describing [`GrowthError`] variants.
    enum GrowthErrorCode for GrowthError {
        /// The growth configuration violates one of its invariants.
        InvalidConfig => InvalidConfig { .. } => "GROWTH_INVALID_CONFIG",
        /// Duplicate proposals exhausted the retry budget.
        Saturated => Saturated { .. } => "GROWTH_SATURATED",
        /// No candidate counterparts existed.
        EmptyCandidatePool => EmptyCandidatePool { .. } => "GROWTH_EMPTY_CANDIDATE_POOL",
        /// The engine already reached its final state.
        AlreadyGenerated => AlreadyGenerated => "GROWTH_ALREADY_GENERATED",
        /// A graph mutation broke a structural invariant.
        GraphFailure => Graph(..) => "GROWTH_GRAPH_FAILURE",
        /// Recording or configuring an amount failed.
        AmountFailure => Amount(..) => "GROWTH_AMOUNT_FAILURE",
    }
}

impl GrowthError {
    /// Retrieve the inner [`GraphErrorCode`] when the error originated in the
    /// graph layer.
    #[must_use]
    pub const fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::Graph(error) => Some(error.code()),
            _ => None,
        }
    }

    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

/// Errors raised while estimating a power-law exponent.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EstimationError {
    /// The sequence contained no strictly positive observations.
    #[error("sequence contains no positive observations")]
    NoPositiveObservations,
    /// The tail above `xmin` was too short to fit.
    #[error("tail holds {got} observations but at least {required} are required")]
    TooFewObservations {
        /// Observations available in the tail.
        got: usize,
        /// Minimum tail length configured on the estimator.
        required: usize,
    },
    /// An observation was NaN or infinite.
    #[error("observation at index {index} is not finite")]
    NonFiniteObservation {
        /// Position of the offending observation in the input.
        index: usize,
    },
    /// All tail observations sit at `xmin`, so the likelihood has no maximum.
    #[error("tail observations are degenerate at xmin={xmin}")]
    Degenerate {
        /// Cutoff at which the tail collapsed.
        xmin: f64,
    },
    /// A fixed cutoff was unusable.
    #[error("xmin {xmin} is invalid: {reason}")]
    InvalidXmin {
        /// Cutoff supplied by the caller.
        xmin: f64,
        /// Why the cutoff was rejected.
        reason: &'static str,
    },
}

define_error_codes! {
    /// Stable codes describing [`EstimationError`] variants.
    enum EstimationErrorCode for EstimationError {
        /// The sequence contained no positive observations.
        NoPositiveObservations => NoPositiveObservations => "ESTIMATION_NO_POSITIVE_OBSERVATIONS",
        /// The tail above `xmin` was too short.
        TooFewObservations => TooFewObservations { .. } => "ESTIMATION_TOO_FEW_OBSERVATIONS",
        /// An observation was not finite.
        NonFiniteObservation => NonFiniteObservation { .. } => "ESTIMATION_NON_FINITE_OBSERVATION",
        /// The tail was degenerate.
        Degenerate => Degenerate { .. } => "ESTIMATION_DEGENERATE",
        /// A fixed cutoff was unusable.
        InvalidXmin => InvalidXmin { .. } => "ESTIMATION_INVALID_XMIN",
    }
}

/// Convenient alias for results returned by the growth API.
pub type Result<T> = core::result::Result<T, GrowthError>;
