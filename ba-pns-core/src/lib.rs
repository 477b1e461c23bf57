//! Preferential-attachment payment network simulator.
//!
//! Grows directed or undirected scale-free networks from a complete seed
//! graph, optionally attaches a transaction amount to every edge, and
//! estimates the power-law exponents of the resulting degree and amount
//! distributions.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod amount;
mod config;
mod engine;
mod ensemble;
mod error;
mod graph;
mod powerlaw;
mod report;
mod sampler;

pub use crate::{
    amount::{AmountMatrix, AmountModel, AmountSampler},
    config::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RNG_SEED, EdgeQuota, GrowthConfig},
    engine::{Attachment, EdgeGrowthEngine, GrowthPhase, GrowthSummary},
    ensemble::{Ensemble, run_seed},
    error::{
        AmountError, AmountErrorCode, EstimationError, EstimationErrorCode, GraphError,
        GraphErrorCode, GrowthError, GrowthErrorCode, Result,
    },
    graph::{GraphState, Topology},
    powerlaw::{
        Cutoff, DEFAULT_MIN_TAIL, EstimatorConfig, LogLogFit, MAX_XMIN_CANDIDATES,
        PowerLawEstimator, PowerLawFit, TailModel, degree_observations, estimate_exponent,
        log_log_regression,
    },
    report::{ExponentOutcome, NetworkExponents},
    sampler::{DegreeKind, Draw, PreferentialAttachmentSampler},
};
