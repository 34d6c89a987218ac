// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Anaerobic digestion.
//!
//! A stream carrying COD is digested along the liquid pathway, where the
//! methane volume follows from the COD removed and the biogas volume from the
//! methane fraction.  Any other stream follows the solid pathway, where the
//! biogas volume follows from the volatile solids and the methane volume from
//! the methane fraction.

use crate::graph::balance::result::DigesterMetrics;
use crate::graph::balance::{round, NodeMetrics, METHANE_LHV_MJ_PER_NM3, MJ_PER_KWH};
use crate::{Error, Stream};

use super::{params::Params, RuleOutput};

/// Nm³ CH4 per kg COD removed.
const METHANE_YIELD_PER_COD: f64 = 0.35;

/// Nm³ biogas per kg VS.
const BIOGAS_YIELD_PER_VS: f64 = 0.40;

pub(super) struct DigesterRule {
    efficiency: f64,
    methane_fraction: f64,
    hrt: f64,
    olr: f64,
}

impl DigesterRule {
    pub(super) fn try_new(params: &Params) -> Result<Self, Error> {
        Ok(Self {
            efficiency: params.ratio("efficiency", "efficiency", 0.70)?,
            methane_fraction: params.ratio("ch4_content", "ch4_content", 0.60)?,
            hrt: params.setting("hrt", "hrt", 20.0)?,
            olr: params.setting("olr", "olr", 3.0)?,
        })
    }

    pub(super) fn apply(self, input: &Stream) -> Result<RuleOutput, Error> {
        let (biogas, methane) = if input.cod > 0.0 {
            if self.methane_fraction == 0.0 {
                return Err(Error::invalid_parameter(
                    "Parameter `ch4_content` must be greater than 0 to digest a COD stream.",
                ));
            }
            let methane = input.cod * METHANE_YIELD_PER_COD * self.efficiency;
            (methane / self.methane_fraction, methane)
        } else {
            let biogas = input.vs_content * BIOGAS_YIELD_PER_VS * self.efficiency;
            (biogas, biogas * self.methane_fraction)
        };

        let energy_mj = methane * METHANE_LHV_MJ_PER_NM3;
        let energy_kwh = energy_mj / MJ_PER_KWH;

        let stream = Stream {
            volume_flow: biogas,
            methane_content: methane,
            energy_content: energy_mj,
            ..Stream::empty()
        };
        let metrics = DigesterMetrics {
            biogas_nm3_day: round(biogas, 1),
            methane_nm3_day: round(methane, 1),
            methane_content_percent: round(self.methane_fraction * 100.0, 1),
            conversion_efficiency: round(self.efficiency * 100.0, 1),
            energy_output_mj_day: round(energy_mj, 0),
            energy_output_kwh_day: round(energy_kwh, 0),
            hrt_days: self.hrt,
            olr: self.olr,
        };

        Ok(RuleOutput::new(stream, NodeMetrics::Digester(metrics)))
    }
}
