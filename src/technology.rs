// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The technology catalog: read-only profiles with physical defaults and the
//! parameter specifications that process nodes are bound to.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::technology_category::Categorized;
use crate::{Error, TechnologyCategory};

/// The specification of a user-adjustable parameter of a technology.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub key: String,
    pub default_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ParameterSpec {
    /// Returns true if `value` lies within the declared bounds.  Missing
    /// bounds are treated as open.
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// A technology of the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TechnologyProfile {
    pub id: String,
    pub category: TechnologyCategory,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    /// Stream kinds the technology accepts.  Empty means "accepts anything".
    #[serde(default)]
    pub accepts: Vec<String>,
    /// Stream kinds the technology produces.
    #[serde(default)]
    pub outputs: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
    /// Named coefficients consumed by the calculation rules.
    #[serde(default)]
    pub defaults: BTreeMap<String, f64>,
}

impl TechnologyProfile {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: TechnologyCategory,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            name: name.into(),
            name_en: None,
            accepts: Vec::new(),
            outputs: Vec::new(),
            parameters: Vec::new(),
            defaults: BTreeMap::new(),
        }
    }

    pub fn with_accepts<S: Into<String>>(mut self, kinds: impl IntoIterator<Item = S>) -> Self {
        self.accepts = kinds.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_outputs<S: Into<String>>(mut self, kinds: impl IntoIterator<Item = S>) -> Self {
        self.outputs = kinds.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default(mut self, key: impl Into<String>, value: f64) -> Self {
        self.defaults.insert(key.into(), value);
        self
    }

    pub fn with_parameter(mut self, spec: ParameterSpec) -> Self {
        self.parameters.push(spec);
        self
    }

    /// Returns the named coefficient, if the technology declares it.
    pub fn coefficient(&self, key: &str) -> Option<f64> {
        self.defaults.get(key).copied()
    }

    /// Returns the specification of the given parameter, if declared.
    pub fn parameter_spec(&self, key: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.key == key)
    }

    /// Returns true if the technology accepts a stream of any kind.
    pub fn accepts_any(&self) -> bool {
        self.accepts.is_empty()
    }
}

impl Categorized for TechnologyProfile {
    fn category(&self) -> &TechnologyCategory {
        &self.category
    }
}

/// Read-only access to technology profiles by id.
///
/// Implementations must not change while a calculation is running; they are
/// only ever borrowed immutably, so one catalog can serve any number of
/// concurrent calculations.
pub trait TechnologyLookup {
    /// Returns the technology with the given id, if it exists.
    fn technology(&self, tech_id: &str) -> Option<&TechnologyProfile>;
}

impl TechnologyLookup for HashMap<String, TechnologyProfile> {
    fn technology(&self, tech_id: &str) -> Option<&TechnologyProfile> {
        self.get(tech_id)
    }
}

/// A catalog of technologies keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TechnologyCatalog {
    profiles: HashMap<String, TechnologyProfile>,
}

/// The two JSON layouts a catalog can be loaded from.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Keyed(BTreeMap<String, TechnologyProfile>),
    Listed(Vec<TechnologyProfile>),
}

impl TechnologyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog from the given profiles.  A later profile replaces an
    /// earlier one with the same id.
    pub fn from_profiles(profiles: impl IntoIterator<Item = TechnologyProfile>) -> Self {
        let mut catalog = Self::new();
        for profile in profiles {
            catalog.insert(profile);
        }
        catalog
    }

    /// Loads a catalog from JSON, either an object keyed by technology id or
    /// an array of technologies.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let document: CatalogDocument = serde_json::from_str(json)
            .map_err(|e| Error::invalid_catalog(format!("Unable to parse catalog: {e}")))?;

        match document {
            CatalogDocument::Keyed(profiles) => {
                for (key, profile) in &profiles {
                    if *key != profile.id {
                        return Err(Error::invalid_catalog(format!(
                            "Catalog key {key} does not match technology id {}.",
                            profile.id
                        )));
                    }
                }
                Ok(Self::from_profiles(profiles.into_values()))
            }
            CatalogDocument::Listed(profiles) => {
                let mut catalog = Self::new();
                for profile in profiles {
                    if catalog.profiles.contains_key(&profile.id) {
                        return Err(Error::invalid_catalog(format!(
                            "Duplicate technology id found: {}",
                            profile.id
                        )));
                    }
                    catalog.insert(profile);
                }
                Ok(catalog)
            }
        }
    }

    /// Adds a technology, returning the one it replaced, if any.
    pub fn insert(&mut self, profile: TechnologyProfile) -> Option<TechnologyProfile> {
        self.profiles.insert(profile.id.clone(), profile)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Returns an iterator over all technologies, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &TechnologyProfile> {
        self.profiles.values()
    }

    /// Returns the technologies of the given category, sorted by id.
    pub fn by_category(&self, category: TechnologyCategory) -> Vec<&TechnologyProfile> {
        let mut found = self
            .profiles
            .values()
            .filter(|p| p.category == category)
            .collect::<Vec<_>>();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        found
    }
}

impl TechnologyLookup for TechnologyCatalog {
    fn technology(&self, tech_id: &str) -> Option<&TechnologyProfile> {
        self.profiles.get(tech_id)
    }
}
