// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Resolution of the numbers a rule works with.
//!
//! A user-supplied parameter overrides the technology's coefficient, which in
//! turn overrides the rule's own fallback.  Ratio-like values (efficiencies,
//! recoveries, purities, fractions) given above 1 are read as percentages.

use crate::{Error, Node, TechnologyProfile};

/// Reads parameters of one node against its technology profile.
pub(crate) struct Params<'a> {
    profile: &'a TechnologyProfile,
    node: &'a dyn Node,
}

impl<'a> Params<'a> {
    pub(crate) fn new(profile: &'a TechnologyProfile, node: &'a dyn Node) -> Self {
        Self { profile, node }
    }

    pub(crate) fn profile(&self) -> &'a TechnologyProfile {
        self.profile
    }

    /// The user's value for `key`, if any.  Values outside the declared
    /// bounds are used but logged.
    fn user(&self, key: &str) -> Option<f64> {
        let value = self.node.parameter(key)?;
        if let Some(spec) = self.profile.parameter_spec(key) {
            if !spec.contains(value) {
                tracing::warn!(
                    "Node {}: parameter `{}` = {} is outside the range declared by {} ({:?}..{:?}).",
                    self.node.node_id(),
                    key,
                    value,
                    self.profile.id,
                    spec.min,
                    spec.max
                );
            }
        }
        Some(value)
    }

    /// A technology coefficient, or `fallback` if the technology doesn't
    /// declare it.
    pub(crate) fn coefficient(&self, key: &str, fallback: f64) -> Result<f64, Error> {
        checked(key, self.profile.coefficient(key).unwrap_or(fallback))
    }

    /// A technology coefficient given in percent, as a fraction.
    pub(crate) fn percent(&self, key: &str, fallback: f64) -> Result<f64, Error> {
        Ok(self.coefficient(key, fallback)? / 100.0)
    }

    /// The user's `user_key`, else the technology's `default_key`, else
    /// `fallback`.
    pub(crate) fn setting(
        &self,
        user_key: &str,
        default_key: &str,
        fallback: f64,
    ) -> Result<f64, Error> {
        match self.user(user_key) {
            Some(value) => checked(user_key, value),
            None => self.coefficient(default_key, fallback),
        }
    }

    /// Like [`setting`][Self::setting], normalized to a fraction.
    pub(crate) fn ratio(
        &self,
        user_key: &str,
        default_key: &str,
        fallback: f64,
    ) -> Result<f64, Error> {
        let key = if self.node.parameter(user_key).is_some() {
            user_key
        } else {
            default_key
        };
        normalize_ratio(key, self.setting(user_key, default_key, fallback)?)
    }

    /// The feedstock quantity: the user's `quantity`, else the default of the
    /// first declared parameter, else 100.
    pub(crate) fn quantity(&self) -> Result<f64, Error> {
        let value = self
            .user("quantity")
            .or_else(|| self.profile.parameters.first().map(|p| p.default_value))
            .unwrap_or(100.0);
        checked("quantity", value)
    }
}

/// Reads a ratio given above 1 as a percentage.
pub(crate) fn normalize_ratio(key: &str, value: f64) -> Result<f64, Error> {
    let ratio = if value > 1.0 { value / 100.0 } else { value };
    if ratio > 1.0 {
        return Err(Error::invalid_parameter(format!(
            "Parameter `{key}` must be a fraction or a percentage of at most 100, got {value}."
        )));
    }
    Ok(ratio)
}

fn checked(key: &str, value: f64) -> Result<f64, Error> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::invalid_parameter(format!(
            "Parameter `{key}` must be a finite, non-negative number, got {value}."
        )));
    }
    Ok(value)
}
