// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The records a balance produces: per-node metrics, the plant summary and
//! the stream on every connection.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{Stream, TechnologyCategory};

/// Metrics of a liquid feedstock, whose quantity is a volume per day.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LiquidFeedstockMetrics {
    pub input_quantity: f64,
    pub input_unit: &'static str,
    pub cod_total: f64,
    pub vs_available: f64,
}

/// Metrics of a solid feedstock, whose quantity is a mass per day.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SolidFeedstockMetrics {
    pub input_quantity: f64,
    pub input_unit: &'static str,
    pub dry_mass: f64,
    pub vs_available: f64,
    pub energy_available_mj: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PretreatmentMetrics {
    pub biogas_increase_percent: f64,
    pub parasitic_energy_kwh: f64,
    pub effective_vs_output: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DigesterMetrics {
    pub biogas_nm3_day: f64,
    pub methane_nm3_day: f64,
    pub methane_content_percent: f64,
    pub conversion_efficiency: f64,
    pub energy_output_mj_day: f64,
    pub energy_output_kwh_day: f64,
    pub hrt_days: f64,
    pub olr: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UpgradingMetrics {
    pub biogas_input_nm3_day: f64,
    pub biomethane_nm3_day: f64,
    pub methane_purity_percent: f64,
    pub methane_recovery_percent: f64,
    pub methane_loss_nm3_day: f64,
    pub parasitic_energy_kwh_day: f64,
    pub co2_separated_nm3_day: f64,
}

/// Metrics of a combined heat and power unit.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChpMetrics {
    pub methane_input_nm3_day: f64,
    pub energy_input_kwh_day: f64,
    pub electricity_kwh_day: f64,
    pub electricity_mwh_year: f64,
    pub thermal_kwh_day: f64,
    pub electrical_efficiency_percent: f64,
    pub thermal_efficiency_percent: f64,
    pub total_efficiency_percent: f64,
    pub daily_revenue_brl: f64,
    pub annual_revenue_brl: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BiomethaneSaleMetrics {
    pub biomethane_nm3_day: f64,
    pub biomethane_nm3_year: f64,
    pub price_per_nm3: f64,
    pub daily_revenue_brl: f64,
    pub annual_revenue_brl: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoilerMetrics {
    pub methane_input_nm3_day: f64,
    pub thermal_kwh_day: f64,
    pub thermal_efficiency_percent: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlareMetrics {
    pub methane_flared_nm3_day: f64,
    pub destruction_efficiency_percent: f64,
    pub co2eq_avoided_kg_day: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ByproductMetrics {
    pub value_per_unit: f64,
}

/// The metrics a node's rule reported.
///
/// Serialized flat, with a `kind` field naming the variant.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeMetrics {
    LiquidFeedstock(LiquidFeedstockMetrics),
    SolidFeedstock(SolidFeedstockMetrics),
    Pretreatment(PretreatmentMetrics),
    Digester(DigesterMetrics),
    Upgrading(UpgradingMetrics),
    Chp(ChpMetrics),
    BiomethaneSale(BiomethaneSaleMetrics),
    Boiler(BoilerMetrics),
    Flare(FlareMetrics),
    Byproduct(ByproductMetrics),
    /// Pass-through nodes and end-use technologies without a known strategy.
    Empty,
}

/// Field accessors used by the aggregator.  A field a variant doesn't carry
/// reads as `None`.
impl NodeMetrics {
    pub fn biogas_nm3_day(&self) -> Option<f64> {
        match self {
            NodeMetrics::Digester(m) => Some(m.biogas_nm3_day),
            _ => None,
        }
    }

    pub fn methane_nm3_day(&self) -> Option<f64> {
        match self {
            NodeMetrics::Digester(m) => Some(m.methane_nm3_day),
            _ => None,
        }
    }

    pub fn biomethane_nm3_day(&self) -> Option<f64> {
        match self {
            NodeMetrics::Upgrading(m) => Some(m.biomethane_nm3_day),
            NodeMetrics::BiomethaneSale(m) => Some(m.biomethane_nm3_day),
            _ => None,
        }
    }

    pub fn electricity_kwh_day(&self) -> Option<f64> {
        match self {
            NodeMetrics::Chp(m) => Some(m.electricity_kwh_day),
            _ => None,
        }
    }

    pub fn thermal_kwh_day(&self) -> Option<f64> {
        match self {
            NodeMetrics::Chp(m) => Some(m.thermal_kwh_day),
            NodeMetrics::Boiler(m) => Some(m.thermal_kwh_day),
            _ => None,
        }
    }

    pub fn annual_revenue_brl(&self) -> Option<f64> {
        match self {
            NodeMetrics::Chp(m) => Some(m.annual_revenue_brl),
            NodeMetrics::BiomethaneSale(m) => Some(m.annual_revenue_brl),
            _ => None,
        }
    }
}

/// The result record of one node, annotated with its technology.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeResult {
    pub tech_id: String,
    pub tech_name: String,
    pub category: TechnologyCategory,
    #[serde(flatten)]
    pub metrics: NodeMetrics,
}

/// Plant-wide totals.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Summary {
    pub biogas_nm3_day: f64,
    pub methane_nm3_day: f64,
    pub biomethane_nm3_day: f64,
    pub electricity_kwh_day: f64,
    pub electricity_mwh_year: f64,
    pub thermal_kwh_day: f64,
    pub annual_revenue_brl: f64,
    pub emissions_avoided_kg_day: f64,
    pub emissions_avoided_ton_year: f64,
}

/// The outcome of a balance.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalculationResult {
    pub success: bool,
    pub summary: Summary,
    /// Per-node results, keyed by node id.
    pub node_details: BTreeMap<String, NodeResult>,
    /// The stream on every connection, keyed by `"source->target"`.
    pub streams: BTreeMap<String, Stream>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_result_serialization() {
        let result = NodeResult {
            tech_id: "flare".to_string(),
            tech_name: "Flare".to_string(),
            category: TechnologyCategory::Enduse,
            metrics: NodeMetrics::Flare(FlareMetrics {
                methane_flared_nm3_day: 100.0,
                destruction_efficiency_percent: 99.0,
                co2eq_avoided_kg_day: 2079.0,
            }),
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({
                "tech_id": "flare",
                "tech_name": "Flare",
                "category": "enduse",
                "kind": "flare",
                "methane_flared_nm3_day": 100.0,
                "destruction_efficiency_percent": 99.0,
                "co2eq_avoided_kg_day": 2079.0,
            })
        );

        let passthrough = NodeResult {
            tech_id: "silo".to_string(),
            tech_name: "Silo".to_string(),
            category: TechnologyCategory::Unspecified("storage".to_string()),
            metrics: NodeMetrics::Empty,
        };
        assert_eq!(
            serde_json::to_value(&passthrough).unwrap(),
            serde_json::json!({
                "tech_id": "silo",
                "tech_name": "Silo",
                "category": "storage",
                "kind": "empty",
            })
        );
    }

    #[test]
    fn test_accessors() {
        let sale = NodeMetrics::BiomethaneSale(BiomethaneSaleMetrics {
            biomethane_nm3_day: 10.0,
            biomethane_nm3_year: 3300.0,
            price_per_nm3: 2.8,
            daily_revenue_brl: 28.0,
            annual_revenue_brl: 9240.0,
        });
        assert_eq!(sale.biomethane_nm3_day(), Some(10.0));
        assert_eq!(sale.annual_revenue_brl(), Some(9240.0));
        assert_eq!(sale.biogas_nm3_day(), None);
        assert_eq!(NodeMetrics::Empty.thermal_kwh_day(), None);
    }
}
