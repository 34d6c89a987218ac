// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Feedstocks start a route.  They have no inputs and turn a daily quantity
//! into a stream.

use crate::graph::balance::result::{LiquidFeedstockMetrics, SolidFeedstockMetrics};
use crate::graph::balance::NodeMetrics;
use crate::stream::DEFAULT_TEMPERATURE;
use crate::{Error, Stream};

use super::{params::Params, RuleOutput};

/// Feedstocks measured in m³/day and characterised by their COD.  All other
/// feedstocks are solids measured in t/day.
const LIQUID_FEEDSTOCKS: &[&str] = &["vinasse", "wash_water"];

/// kg VS estimated per kg COD of a liquid feedstock.
const VS_PER_COD: f64 = 0.7;

const KG_PER_TONNE: f64 = 1000.0;

pub(super) enum FeedstockRule {
    Liquid {
        quantity: f64,
        cod_per_m3: f64,
        temperature: f64,
    },
    Solid {
        quantity: f64,
        temperature: f64,
        moisture: f64,
        vs_fraction: f64,
        lhv: f64,
    },
}

impl FeedstockRule {
    pub(super) fn try_new(params: &Params) -> Result<Self, Error> {
        let quantity = params.quantity()?;
        // °C at which the feedstock leaves the node.
        let temperature = params.setting("temperature", "temperature", DEFAULT_TEMPERATURE)?;

        if LIQUID_FEEDSTOCKS.contains(&params.profile().id.as_str()) {
            Ok(Self::Liquid {
                quantity,
                cod_per_m3: params.coefficient("cod", 25.0)?,
                temperature,
            })
        } else {
            Ok(Self::Solid {
                quantity,
                temperature,
                moisture: params.percent("moisture", 50.0)?,
                vs_fraction: params.percent("vs", 85.0)?,
                lhv: params.coefficient("lhv", 7.5)?,
            })
        }
    }

    pub(super) fn apply(self) -> Result<RuleOutput, Error> {
        match self {
            Self::Liquid {
                quantity,
                cod_per_m3,
                temperature,
            } => {
                let cod = quantity * cod_per_m3;
                let stream = Stream {
                    volume_flow: quantity,
                    cod,
                    vs_content: cod * VS_PER_COD,
                    temperature,
                    ..Stream::empty()
                };
                let metrics = LiquidFeedstockMetrics {
                    input_quantity: quantity,
                    input_unit: "m³/day",
                    cod_total: cod,
                    vs_available: stream.vs_content,
                };
                Ok(RuleOutput::new(stream, NodeMetrics::LiquidFeedstock(metrics)))
            }
            Self::Solid {
                quantity,
                temperature,
                moisture,
                vs_fraction,
                lhv,
            } => {
                let dry_mass = quantity * (1.0 - moisture);
                if dry_mass < 0.0 {
                    return Err(Error::invalid_parameter(format!(
                        "Moisture of {}% leaves a negative dry mass.",
                        moisture * 100.0
                    )));
                }
                let vs_mass = dry_mass * vs_fraction * KG_PER_TONNE;
                let energy = quantity * KG_PER_TONNE * (1.0 - moisture) * lhv;

                let stream = Stream {
                    mass_flow: quantity * KG_PER_TONNE,
                    vs_content: vs_mass,
                    energy_content: energy,
                    temperature,
                    ..Stream::empty()
                };
                let metrics = SolidFeedstockMetrics {
                    input_quantity: quantity,
                    input_unit: "t/day",
                    dry_mass,
                    vs_available: vs_mass,
                    energy_available_mj: energy,
                };
                Ok(RuleOutput::new(stream, NodeMetrics::SolidFeedstock(metrics)))
            }
        }
    }
}
