// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! End-use technologies turn methane into electricity, heat, revenue or
//! avoided emissions.  They are terminal and always emit an empty stream.
//!
//! Which conversion applies is decided per technology id, through
//! [`STRATEGIES`].

use crate::graph::balance::result::{
    BiomethaneSaleMetrics, BoilerMetrics, ChpMetrics, FlareMetrics,
};
use crate::graph::balance::{round, NodeMetrics, MJ_PER_KWH, OPERATING_DAYS_PER_YEAR};
use crate::{Error, Stream};

use super::{params::Params, RuleOutput};

/// Energy of methane available to a CHP engine, in kWh/Nm³.
const CHP_KWH_PER_NM3_METHANE: f64 = 9.97;

/// kg CO2-eq avoided per Nm³ of methane destroyed.
const FLARE_CO2EQ_PER_NM3: f64 = 21.0;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Strategy {
    Chp,
    BiomethaneSale,
    Boiler,
    Flare,
}

const STRATEGIES: &[(&str, Strategy)] = &[
    ("ice_cogen", Strategy::Chp),
    ("gas_turbine", Strategy::Chp),
    ("microturbine", Strategy::Chp),
    ("fuel_cell", Strategy::Chp),
    ("biomethane_gnv", Strategy::BiomethaneSale),
    ("biomethane_grid", Strategy::BiomethaneSale),
    ("boiler", Strategy::Boiler),
    ("flare", Strategy::Flare),
];

pub(super) fn apply(params: &Params, input: &Stream) -> Result<RuleOutput, Error> {
    let id = params.profile().id.as_str();
    let Some((_, strategy)) = STRATEGIES.iter().find(|(tech, _)| *tech == id) else {
        tracing::warn!("End-use {} has no conversion strategy; it reports no metrics.", id);
        return Ok(RuleOutput::terminal(NodeMetrics::Empty));
    };

    let metrics = match strategy {
        Strategy::Chp => chp(params, input)?,
        Strategy::BiomethaneSale => biomethane_sale(params, input)?,
        Strategy::Boiler => boiler(params, input)?,
        Strategy::Flare => flare(params, input)?,
    };
    Ok(RuleOutput::terminal(metrics))
}

fn chp(params: &Params, input: &Stream) -> Result<NodeMetrics, Error> {
    let elec_eff = params.ratio("elec_efficiency", "elec_eff", 0.38)?;
    let therm_eff = params.ratio("therm_efficiency", "therm_eff", 0.45)?;
    // R$/MWh
    let elec_price = params.setting("elec_price", "elec_price", 350.0)?;

    let energy_input = input.methane_content * CHP_KWH_PER_NM3_METHANE;
    let electricity = energy_input * elec_eff;
    let thermal = energy_input * therm_eff;
    let daily_revenue = electricity / 1000.0 * elec_price;
    let annual_revenue = daily_revenue * OPERATING_DAYS_PER_YEAR;

    Ok(NodeMetrics::Chp(ChpMetrics {
        methane_input_nm3_day: round(input.methane_content, 1),
        energy_input_kwh_day: round(energy_input, 0),
        electricity_kwh_day: round(electricity, 0),
        electricity_mwh_year: round(electricity * OPERATING_DAYS_PER_YEAR / 1000.0, 0),
        thermal_kwh_day: round(thermal, 0),
        electrical_efficiency_percent: round(elec_eff * 100.0, 1),
        thermal_efficiency_percent: round(therm_eff * 100.0, 1),
        total_efficiency_percent: round((elec_eff + therm_eff) * 100.0, 1),
        daily_revenue_brl: round(daily_revenue, 2),
        annual_revenue_brl: round(annual_revenue, 0),
    }))
}

fn biomethane_sale(params: &Params, input: &Stream) -> Result<NodeMetrics, Error> {
    // R$/Nm³
    let price = params.setting("price", "price", 3.50)?;
    let daily_revenue = input.methane_content * price;

    Ok(NodeMetrics::BiomethaneSale(BiomethaneSaleMetrics {
        biomethane_nm3_day: round(input.methane_content, 1),
        biomethane_nm3_year: round(input.methane_content * OPERATING_DAYS_PER_YEAR, 0),
        price_per_nm3: price,
        daily_revenue_brl: round(daily_revenue, 2),
        annual_revenue_brl: round(daily_revenue * OPERATING_DAYS_PER_YEAR, 0),
    }))
}

fn boiler(params: &Params, input: &Stream) -> Result<NodeMetrics, Error> {
    let therm_eff = params.ratio("therm_efficiency", "therm_eff", 0.85)?;
    let thermal = input.energy_content / MJ_PER_KWH * therm_eff;

    Ok(NodeMetrics::Boiler(BoilerMetrics {
        methane_input_nm3_day: round(input.methane_content, 1),
        thermal_kwh_day: round(thermal, 0),
        thermal_efficiency_percent: round(therm_eff * 100.0, 1),
    }))
}

fn flare(params: &Params, input: &Stream) -> Result<NodeMetrics, Error> {
    let destruction = params.ratio("destruction_efficiency", "destruction_efficiency", 0.99)?;
    let avoided = input.methane_content * FLARE_CO2EQ_PER_NM3 * destruction;

    Ok(NodeMetrics::Flare(FlareMetrics {
        methane_flared_nm3_day: round(input.methane_content, 1),
        destruction_efficiency_percent: round(destruction * 100.0, 1),
        co2eq_avoided_kg_day: round(avoided, 0),
    }))
}
