// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Mass/energy balance over a [`RouteGraph`].
//!
//! The balance walks the graph in calculation order.  At every node the
//! inbound streams are merged, the technology's rule turns the merged stream
//! into an output stream and a set of metrics, and the output is copied onto
//! every outgoing connection.  The per-node metrics are then folded into a
//! plant-wide [`Summary`].

mod aggregator;
mod propagation;
mod result;
mod rules;

pub use result::{
    BiomethaneSaleMetrics, BoilerMetrics, ByproductMetrics, CalculationResult, ChpMetrics,
    DigesterMetrics, FlareMetrics, LiquidFeedstockMetrics, NodeMetrics, NodeResult,
    PretreatmentMetrics, SolidFeedstockMetrics, Summary, UpgradingMetrics,
};

use crate::{Edge, Error, Node, RouteGraph, TechnologyLookup};

/// Operating days per year used to annualise daily figures.
pub const OPERATING_DAYS_PER_YEAR: f64 = 330.0;

/// Lower heating value of methane, in MJ/Nm³.
pub const METHANE_LHV_MJ_PER_NM3: f64 = 35.8;

/// MJ in one kWh.
pub(crate) const MJ_PER_KWH: f64 = 3.6;

impl<N, E> RouteGraph<N, E>
where
    N: Node,
    E: Edge,
{
    /// Runs the mass/energy balance over the graph.
    ///
    /// The calculation is all-or-nothing: the first node that references an
    /// unknown technology or fails its rule aborts it, and the error names
    /// that node.
    pub fn balance<C>(&self, catalog: &C) -> Result<CalculationResult, Error>
    where
        C: TechnologyLookup + ?Sized,
    {
        propagation::StreamPropagator::new(self, catalog).run()
    }
}

/// Rounds `value` to the given number of decimal places.
fn round(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
