// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Folds per-node metrics into the plant summary.

use std::collections::BTreeMap;

use crate::Stream;

use super::{round, CalculationResult, NodeMetrics, NodeResult, Summary, OPERATING_DAYS_PER_YEAR};

/// kg CO2-eq avoided per Nm³ of methane put to use.
const AVOIDED_EMISSIONS_PER_NM3: f64 = 2.75;

pub(super) fn aggregate(
    node_details: BTreeMap<String, NodeResult>,
    streams: BTreeMap<String, Stream>,
) -> CalculationResult {
    let total = |field: fn(&NodeMetrics) -> Option<f64>| -> f64 {
        node_details
            .values()
            .filter_map(|result| field(&result.metrics))
            .sum()
    };

    let biogas = total(NodeMetrics::biogas_nm3_day);
    let methane = total(NodeMetrics::methane_nm3_day);
    let biomethane = total(NodeMetrics::biomethane_nm3_day);
    let electricity = total(NodeMetrics::electricity_kwh_day);
    let thermal = total(NodeMetrics::thermal_kwh_day);
    let revenue = total(NodeMetrics::annual_revenue_brl);

    let emissions_daily = (methane + biomethane) * AVOIDED_EMISSIONS_PER_NM3;
    let emissions_annual = emissions_daily * OPERATING_DAYS_PER_YEAR;

    let summary = Summary {
        biogas_nm3_day: round(biogas, 0),
        methane_nm3_day: round(methane, 0),
        biomethane_nm3_day: round(biomethane, 0),
        electricity_kwh_day: round(electricity, 0),
        electricity_mwh_year: round(electricity * OPERATING_DAYS_PER_YEAR / 1000.0, 0),
        thermal_kwh_day: round(thermal, 0),
        annual_revenue_brl: round(revenue, 0),
        emissions_avoided_kg_day: round(emissions_daily, 0),
        emissions_avoided_ton_year: round(emissions_annual / 1000.0, 1),
    };

    tracing::info!(
        "Balance of {} nodes: {} Nm³/day biogas, {} kWh/day electricity, {} kWh/day heat, {} R$/year.",
        node_details.len(),
        summary.biogas_nm3_day,
        summary.electricity_kwh_day,
        summary.thermal_kwh_day,
        summary.annual_revenue_brl
    );

    CalculationResult {
        success: true,
        summary,
        node_details,
        streams,
    }
}
