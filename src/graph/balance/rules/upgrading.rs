// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Biogas upgrading.  The output stream is the purified biomethane: its
//! volume and methane fields both carry the recovered methane.

use crate::graph::balance::result::UpgradingMetrics;
use crate::graph::balance::{round, NodeMetrics, METHANE_LHV_MJ_PER_NM3};
use crate::{Error, Stream};

use super::{params::Params, RuleOutput};

pub(super) struct UpgradingRule {
    recovery: f64,
    energy_use: f64,
    purity: f64,
    methane_fraction: f64,
}

impl UpgradingRule {
    pub(super) fn try_new(params: &Params) -> Result<Self, Error> {
        Ok(Self {
            recovery: params.ratio("recovery", "recovery", 0.96)?,
            energy_use: params.setting("energy_use", "energy_use", 0.25)?,
            purity: params.ratio("ch4_purity", "ch4_purity", 0.97)?,
            methane_fraction: params.ratio("ch4_content", "ch4_content", 0.60)?,
        })
    }

    pub(super) fn apply(self, input: &Stream) -> Result<RuleOutput, Error> {
        let biomethane = input.methane_content * self.recovery;
        let parasitic_load = input.volume_flow * self.energy_use;
        let co2 = input.volume_flow * (1.0 - self.methane_fraction);

        let stream = Stream {
            volume_flow: biomethane,
            methane_content: biomethane,
            energy_content: biomethane * METHANE_LHV_MJ_PER_NM3,
            ..Stream::empty()
        };
        let metrics = UpgradingMetrics {
            biogas_input_nm3_day: round(input.volume_flow, 1),
            biomethane_nm3_day: round(biomethane, 1),
            methane_purity_percent: round(self.purity * 100.0, 1),
            methane_recovery_percent: round(self.recovery * 100.0, 1),
            methane_loss_nm3_day: round(input.methane_content - biomethane, 1),
            parasitic_energy_kwh_day: round(parasitic_load, 0),
            co2_separated_nm3_day: round(co2, 1),
        };

        Ok(RuleOutput::new(stream, NodeMetrics::Upgrading(metrics)))
    }
}
