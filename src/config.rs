// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the configuration options for building a `RouteGraph`
//! and running a balance over it.

/// How the temperatures of several inbound streams are combined when they
/// merge at a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TemperatureMixing {
    /// Streams are merged pairwise, in edge declaration order, and every merge
    /// takes the mean of its two operands.  With more than two streams the
    /// result depends on the order and is weighted towards the later streams.
    #[default]
    PairwiseFold,
    /// The merged temperature is the arithmetic mean over all inbound streams.
    RunningMean,
}

/// Configuration options for the `RouteGraph` and the balance calculation.
#[derive(Clone, Debug)]
pub struct CalculationConfig {
    /// Upper bound on the number of nodes accepted in a route.  `None`
    /// disables the check.
    pub max_nodes: Option<usize>,

    /// The rule used to combine stream temperatures at merge points.
    pub temperature_mixing: TemperatureMixing,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            max_nodes: Some(10_000),
            temperature_mixing: TemperatureMixing::default(),
        }
    }
}
