// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

use crate::graph::balance::result::ByproductMetrics;
use crate::graph::balance::NodeMetrics;
use crate::Error;

use super::{params::Params, RuleOutput};

/// Byproducts are terminal: they report their unit value and emit nothing.
pub(super) fn apply(params: &Params) -> Result<RuleOutput, Error> {
    let metrics = ByproductMetrics {
        value_per_unit: params.coefficient("value", 0.0)?,
    };
    Ok(RuleOutput::terminal(NodeMetrics::Byproduct(metrics)))
}
