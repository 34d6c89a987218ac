// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `TechnologyCategory` enum, which represents the
//! stage of a biogas route a technology belongs to.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Represents the category of a technology.
///
/// Category strings that are not recognised deserialize to
/// [`TechnologyCategory::Unspecified`], whose nodes pass their inbound stream
/// through unchanged. The raw string is kept and serialized back as-is.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TechnologyCategory {
    Feedstock,
    Pretreatment,
    Digester,
    Upgrading,
    Enduse,
    Byproduct,
    Unspecified(String),
}

impl TechnologyCategory {
    /// The catalog name of the category.
    pub fn as_str(&self) -> &str {
        match self {
            TechnologyCategory::Feedstock => "feedstock",
            TechnologyCategory::Pretreatment => "pretreatment",
            TechnologyCategory::Digester => "digester",
            TechnologyCategory::Upgrading => "upgrading",
            TechnologyCategory::Enduse => "enduse",
            TechnologyCategory::Byproduct => "byproduct",
            TechnologyCategory::Unspecified(raw) => raw,
        }
    }
}

impl From<String> for TechnologyCategory {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "feedstock" => TechnologyCategory::Feedstock,
            "pretreatment" => TechnologyCategory::Pretreatment,
            "digester" => TechnologyCategory::Digester,
            "upgrading" => TechnologyCategory::Upgrading,
            "enduse" => TechnologyCategory::Enduse,
            "byproduct" => TechnologyCategory::Byproduct,
            _ => TechnologyCategory::Unspecified(raw),
        }
    }
}

impl From<&str> for TechnologyCategory {
    fn from(raw: &str) -> Self {
        TechnologyCategory::from(raw.to_string())
    }
}

impl From<TechnologyCategory> for String {
    fn from(category: TechnologyCategory) -> Self {
        match category {
            TechnologyCategory::Unspecified(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for TechnologyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TechnologyCategory::Feedstock => write!(f, "Feedstock"),
            TechnologyCategory::Pretreatment => write!(f, "Pretreatment"),
            TechnologyCategory::Digester => write!(f, "Digester"),
            TechnologyCategory::Upgrading => write!(f, "Upgrading"),
            TechnologyCategory::Enduse => write!(f, "EndUse"),
            TechnologyCategory::Byproduct => write!(f, "Byproduct"),
            TechnologyCategory::Unspecified(raw) => write!(f, "Unspecified ({raw})"),
        }
    }
}

/// Implemented by anything that belongs to a [`TechnologyCategory`].
pub(crate) trait Categorized {
    fn category(&self) -> &TechnologyCategory;
}

/// Predicates for checking the technology category of a value.
pub(crate) trait CategoryPredicates: Categorized {
    fn is_feedstock(&self) -> bool {
        *self.category() == TechnologyCategory::Feedstock
    }

    /// End-use and byproduct technologies consume their input and never emit
    /// a stream.
    fn is_terminal(&self) -> bool {
        matches!(
            self.category(),
            TechnologyCategory::Enduse | TechnologyCategory::Byproduct
        )
    }
}

/// Implement the `CategoryPredicates` trait for all types that implement the
/// `Categorized` trait.
impl<T: Categorized> CategoryPredicates for T {}
