// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module is only compiled when running unit tests and contains features
//! that are shared by all tests of the `graph` module.
//!
//! - the `TestNode` and `TestConnection` types, which implement the `Node`
//!   and `Edge` traits respectively.
//! - the `RouteBuilder`, which can declaratively build routes for use in
//!   tests.
//! - `catalog()`, a technology catalog with the coefficients of the sugarcane
//!   mill technologies the tests run against.

use crate::{
    CalculationConfig, CalculationResult, Edge, Error, Node, ParameterSpec, RouteGraph,
    TechnologyCatalog, TechnologyCategory, TechnologyProfile,
};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TestNode {
    pub(crate) id: String,
    pub(crate) tech: String,
    pub(crate) params: Vec<(String, f64)>,
}

impl TestNode {
    pub(crate) fn new(id: &str, tech: &str) -> Self {
        TestNode {
            id: id.to_string(),
            tech: tech.to_string(),
            params: Vec::new(),
        }
    }

    pub(crate) fn with(mut self, key: &str, value: f64) -> Self {
        self.params.push((key.to_string(), value));
        self
    }
}

impl Node for TestNode {
    fn node_id(&self) -> &str {
        &self.id
    }

    fn tech_id(&self) -> &str {
        &self.tech
    }

    fn parameter(&self, key: &str) -> Option<f64> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TestConnection(String, String);

impl TestConnection {
    pub(crate) fn new(source: &str, target: &str) -> Self {
        TestConnection(source.to_string(), target.to_string())
    }
}

impl Edge for TestConnection {
    fn source(&self) -> &str {
        &self.0
    }

    fn target(&self) -> &str {
        &self.1
    }
}

/// Represents a node added to the `RouteBuilder`.
#[derive(Eq, Hash, PartialEq, Clone)]
pub(crate) struct NodeHandle(String);

impl NodeHandle {
    /// Returns the node ID of the node.
    pub(crate) fn node_id(&self) -> &str {
        &self.0
    }
}

/// A builder for creating routes easily, for use in tests.
pub(crate) struct RouteBuilder {
    nodes: Vec<TestNode>,
    connections: Vec<TestConnection>,
}

impl RouteBuilder {
    /// Creates a new `RouteBuilder`.
    pub(crate) fn new() -> Self {
        RouteBuilder {
            nodes: Vec::new(),
            connections: Vec::new(),
        }
    }

    /// Adds a node bound to the given technology, with the given parameter
    /// overrides, and returns its handle.  Node ids are `<tech>-<n>`.
    pub(crate) fn add(&mut self, tech: &str, params: &[(&str, f64)]) -> NodeHandle {
        let id = format!("{tech}-{}", self.nodes.len());
        let mut node = TestNode::new(&id, tech);
        for (key, value) in params {
            node = node.with(key, *value);
        }
        self.nodes.push(node);
        NodeHandle(id)
    }

    /// Connects two nodes in the route.
    pub(crate) fn connect(&mut self, from: &NodeHandle, to: &NodeHandle) -> &mut Self {
        self.connections
            .push(TestConnection::new(&from.0, &to.0));
        self
    }

    pub(crate) fn nodes(&self) -> Vec<TestNode> {
        self.nodes.clone()
    }

    pub(crate) fn connections(&self) -> Vec<TestConnection> {
        self.connections.clone()
    }

    /// Builds and returns the route graph from the nodes and connections added
    /// to the builder.
    pub(crate) fn build(&self) -> Result<RouteGraph<TestNode, TestConnection>, Error> {
        RouteGraph::try_new(
            self.nodes.clone(),
            self.connections.clone(),
            CalculationConfig::default(),
        )
    }

    /// Builds the route and runs the balance against the test catalog.
    pub(crate) fn calculate(&self) -> Result<CalculationResult, Error> {
        self.build()?.balance(&catalog())
    }
}

/// Asserts that two floats agree to within 1e-6, relative to their size.
pub(crate) fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0) * 1000.0;
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

fn param(key: &str, default_value: f64, min: f64, max: f64) -> ParameterSpec {
    ParameterSpec {
        key: key.to_string(),
        default_value,
        min: Some(min),
        max: Some(max),
        unit: None,
        label: None,
    }
}

fn tech(id: &str, category: TechnologyCategory, accepts: &[&str], outputs: &[&str]) -> TechnologyProfile {
    TechnologyProfile::new(id, id, category)
        .with_accepts(accepts.iter().copied())
        .with_outputs(outputs.iter().copied())
}

/// Returns a catalog with the sugarcane mill technologies used by the tests.
pub(crate) fn catalog() -> TechnologyCatalog {
    use TechnologyCategory::*;

    TechnologyCatalog::from_profiles([
        tech("bagasse", Feedstock, &[], &["solid_biomass"])
            .with_parameter(param("quantity", 100.0, 10.0, 5000.0))
            .with_default("lhv", 7.5)
            .with_default("moisture", 50.0)
            .with_default("vs", 85.0),
        tech("filter_cake", Feedstock, &[], &["solid_biomass"])
            .with_parameter(param("quantity", 50.0, 5.0, 500.0))
            .with_default("lhv", 3.2)
            .with_default("moisture", 75.0)
            .with_default("vs", 70.0),
        tech("vinasse", Feedstock, &[], &["liquid_organic"])
            .with_parameter(param("quantity", 1000.0, 100.0, 10000.0))
            .with_default("cod", 25.0),
        tech("wash_water", Feedstock, &[], &["liquid_organic"])
            .with_parameter(param("quantity", 500.0, 50.0, 3000.0))
            .with_default("cod", 5.0),
        tech("thermal_hydrolysis", Pretreatment, &["solid_biomass"], &["treated_solid"])
            .with_default("biogas_increase", 25.0)
            .with_default("energy_use", 0.5),
        tech("mechanical_prep", Pretreatment, &["solid_biomass"], &["treated_solid"])
            .with_default("biogas_increase", 15.0)
            .with_default("energy_use", 0.3),
        tech("alkaline_pretreat", Pretreatment, &["solid_biomass"], &["treated_solid"])
            .with_default("biogas_increase", 20.0)
            .with_default("energy_use", 0.1),
        tech(
            "cstr",
            Digester,
            &["solid_biomass", "treated_solid", "liquid_organic"],
            &["biogas", "digestate"],
        )
        .with_parameter(param("efficiency", 70.0, 50.0, 80.0))
        .with_default("efficiency", 0.70)
        .with_default("hrt", 25.0)
        .with_default("olr", 3.0)
        .with_default("ch4_content", 0.60),
        tech("uasb", Digester, &["liquid_organic"], &["biogas", "digestate"])
            .with_parameter(param("efficiency", 80.0, 70.0, 90.0))
            .with_default("efficiency", 0.80)
            .with_default("hrt", 1.0)
            .with_default("olr", 15.0)
            .with_default("ch4_content", 0.65),
        tech("psa", Upgrading, &["biogas"], &["biomethane", "co2"])
            .with_parameter(param("recovery", 98.0, 95.0, 99.0))
            .with_default("recovery", 0.98)
            .with_default("energy_use", 0.25)
            .with_default("ch4_purity", 0.98),
        tech("membrane", Upgrading, &["biogas"], &["biomethane", "co2"])
            .with_default("recovery", 0.96)
            .with_default("energy_use", 0.20)
            .with_default("ch4_purity", 0.97),
        tech("ice_cogen", Enduse, &["biogas", "biomethane"], &["electricity", "heat"])
            .with_parameter(param("elec_efficiency", 40.0, 35.0, 43.0))
            .with_parameter(param("therm_efficiency", 45.0, 40.0, 50.0))
            .with_parameter(param("elec_price", 350.0, 200.0, 600.0))
            .with_default("elec_eff", 0.40)
            .with_default("therm_eff", 0.45),
        tech("boiler", Enduse, &["biogas", "biomethane"], &["heat"])
            .with_default("therm_eff", 0.85),
        tech("biomethane_grid", Enduse, &["biomethane"], &["revenue"])
            .with_default("price", 2.80),
        tech("flare", Enduse, &["biogas", "biomethane"], &["emissions_reduction"])
            .with_default("destruction_efficiency", 0.99),
        tech("heat_pump", Enduse, &["heat"], &["heat"]),
        tech("digestate_liquid", Byproduct, &["digestate"], &["biofertilizer"])
            .with_default("value", 0.15),
        tech("storage_tank", Unspecified("storage".to_string()), &[], &["biogas"]),
    ])
}
