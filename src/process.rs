// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Plain data types for the nodes and connections of a route, as they arrive
//! in a calculation request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Edge, Node};

/// Canvas position of a node.  Carried along for callers, ignored by the
/// calculation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A process step in a route, bound to a technology of the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcessNode {
    pub node_id: String,
    pub tech_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// User overrides of the technology's parameters.
    #[serde(default)]
    pub parameters: BTreeMap<String, f64>,
}

impl ProcessNode {
    pub fn new(node_id: impl Into<String>, tech_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            tech_id: tech_id.into(),
            position: None,
            parameters: BTreeMap::new(),
        }
    }

    /// Sets a parameter override and returns the node.
    pub fn with_parameter(mut self, key: impl Into<String>, value: f64) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }
}

impl Node for ProcessNode {
    fn node_id(&self) -> &str {
        &self.node_id
    }

    fn tech_id(&self) -> &str {
        &self.tech_id
    }

    fn parameter(&self, key: &str) -> Option<f64> {
        self.parameters.get(key).copied()
    }
}

/// A directed connection between two process nodes.
///
/// The handle labels identify ports on an editor canvas and have no effect on
/// the calculation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl Connection {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }
}

impl Edge for Connection {
    fn source(&self) -> &str {
        &self.source
    }

    fn target(&self) -> &str {
        &self.target
    }
}
