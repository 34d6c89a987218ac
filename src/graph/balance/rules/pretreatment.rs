// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Pretreatment raises the digestibility of a stream.  The output is the
//! merged input with its volatile solids scaled up by the technology's biogas
//! increase.

use crate::graph::balance::result::PretreatmentMetrics;
use crate::graph::balance::NodeMetrics;
use crate::{Error, Stream};

use super::{params::Params, RuleOutput};

/// What a pretreatment technology's `energy_use` coefficient is measured
/// against.
#[derive(Clone, Copy, Debug, PartialEq)]
enum EnergyBasis {
    /// kWh per kg of input VS.
    VolatileSolids,
    /// kWh per tonne of input mass.
    Mass,
}

const ENERGY_BASIS: &[(&str, EnergyBasis)] = &[
    ("thermal_hydrolysis", EnergyBasis::VolatileSolids),
    ("mechanical_prep", EnergyBasis::Mass),
];

pub(super) struct PretreatmentRule {
    increase: f64,
    energy_use: f64,
    basis: Option<EnergyBasis>,
}

impl PretreatmentRule {
    pub(super) fn try_new(params: &Params) -> Result<Self, Error> {
        let id = params.profile().id.as_str();
        let basis = ENERGY_BASIS
            .iter()
            .find(|(tech, _)| *tech == id)
            .map(|(_, basis)| *basis);
        if basis.is_none() {
            tracing::warn!(
                "Pretreatment {} has no energy basis; its parasitic energy is taken as 0.",
                id
            );
        }

        Ok(Self {
            increase: params.setting("biogas_increase", "biogas_increase", 15.0)? / 100.0,
            energy_use: params.setting("energy_use", "energy_use", 0.3)?,
            basis,
        })
    }

    pub(super) fn apply(self, input: &Stream) -> Result<RuleOutput, Error> {
        let parasitic_energy = match self.basis {
            Some(EnergyBasis::VolatileSolids) => input.vs_content * self.energy_use,
            Some(EnergyBasis::Mass) => input.mass_flow / 1000.0 * self.energy_use,
            None => 0.0,
        };

        let stream = Stream {
            vs_content: input.vs_content * (1.0 + self.increase),
            ..*input
        };
        let metrics = PretreatmentMetrics {
            biogas_increase_percent: self.increase * 100.0,
            parasitic_energy_kwh: parasitic_energy,
            effective_vs_output: stream.vs_content,
        };

        Ok(RuleOutput::new(stream, NodeMetrics::Pretreatment(metrics)))
    }
}
