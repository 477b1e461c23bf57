//! Exponent summaries of a grown network.

use rand::Rng;
use tracing::{instrument, warn};

use crate::{
    engine::EdgeGrowthEngine,
    error::EstimationError,
    powerlaw::{EstimatorConfig, PowerLawEstimator, PowerLawFit, TailModel, degree_observations},
};

/// Outcome of fitting one observation sequence.
pub type ExponentOutcome = Result<PowerLawFit, EstimationError>;

/// Power-law fits of the degree and amount sequences of one network.
///
/// Each sequence is fitted independently, so a degenerate sequence does not
/// hide the exponents of the others. Degree sequences use the discrete
/// likelihood; amount totals the continuous one.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkExponents {
    /// In-degree fit for directed networks, plain degree for undirected ones.
    pub in_degree: ExponentOutcome,
    /// Out-degree fit; `None` for undirected networks.
    pub out_degree: Option<ExponentOutcome>,
    /// Fit of per-node incoming amount totals, when amounts are tracked.
    pub incoming_amount: Option<ExponentOutcome>,
    /// Fit of per-node outgoing amount totals; directed networks only.
    pub outgoing_amount: Option<ExponentOutcome>,
}

impl NetworkExponents {
    /// Fits every sequence of `engine` with the default cutoff scan.
    #[must_use]
    pub fn measure<R: Rng>(engine: &EdgeGrowthEngine<R>) -> Self {
        Self::measure_with(engine, EstimatorConfig::new())
    }

    /// Fits every sequence of `engine`, overriding the likelihood per
    /// sequence kind but keeping the cutoff and minimum tail of `config`.
    #[instrument(name = "report.exponents", level = "debug", skip_all)]
    pub fn measure_with<R: Rng>(engine: &EdgeGrowthEngine<R>, config: EstimatorConfig) -> Self {
        let graph = engine.graph();
        let degrees = PowerLawEstimator::new(config.with_model(TailModel::Discrete));
        let amounts = PowerLawEstimator::new(config.with_model(TailModel::Continuous));
        let directed = graph.is_directed();

        let in_degree = if directed {
            degrees.fit(degree_observations(&graph.in_degrees()))
        } else {
            degrees.fit(degree_observations(&graph.degrees()))
        };
        let out_degree = directed.then(|| degrees.fit(degree_observations(&graph.out_degrees())));

        let totals = engine.node_amount_totals();
        let incoming_amount = totals
            .as_ref()
            .map(|totals| amounts.fit(totals.iter().map(|&(incoming, _)| incoming)));
        let outgoing_amount = totals
            .as_ref()
            .filter(|_| directed)
            .map(|totals| amounts.fit(totals.iter().map(|&(_, outgoing)| outgoing)));

        let report = Self {
            in_degree,
            out_degree,
            incoming_amount,
            outgoing_amount,
        };
        for (label, outcome) in report.outcomes() {
            if let Err(error) = outcome {
                warn!(sequence = label, code = %error.code(), %error, "exponent not estimated");
            }
        }
        report
    }

    /// Labelled outcomes for every fitted sequence, in a stable order.
    pub fn outcomes(&self) -> impl Iterator<Item = (&'static str, &ExponentOutcome)> {
        [
            Some(("in_degree", &self.in_degree)),
            self.out_degree.as_ref().map(|fit| ("out_degree", fit)),
            self.incoming_amount
                .as_ref()
                .map(|fit| ("incoming_amount", fit)),
            self.outgoing_amount
                .as_ref()
                .map(|fit| ("outgoing_amount", fit)),
        ]
        .into_iter()
        .flatten()
    }
}
