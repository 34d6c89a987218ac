// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

/*!
# BioRoute Balance

This is a library for calculating the mass and energy balance of a biogas
route: a Directed Acyclic Graph (DAG) of process nodes, from feedstocks
through pretreatment, digestion and upgrading to the end uses and byproducts,
with the connections between them carrying material/energy streams.

## The `Node` and `Edge` traits

The main struct is [`RouteGraph`], instances of which can be created by
passing an iterator of nodes and the connections between them to the
[`try_new`][RouteGraph::try_new] method.

The library doesn't need to know the node and connection types of its
callers.  Any type implementing the [`Node`] and [`Edge`] traits will do, and
[`ProcessNode`] and [`Connection`] are ready-made serde types for both.

## Technologies

Every node is bound to a [`TechnologyProfile`] of a catalog, looked up
through the [`TechnologyLookup`] trait.  The profile's
[`TechnologyCategory`] decides which rule transforms the node's inbound
stream, and its coefficients parameterise that rule.  A
[`TechnologyCatalog`] can be loaded from JSON.

## Calculation

[`calculate`] builds the graph and runs the balance.  Nodes are processed in
a deterministic topological order.  At every node the inbound [`Stream`]s are
merged, the technology rule produces an output stream and per-node
[`NodeMetrics`], and the output is copied onto every outgoing connection.
The metrics are then totalled into a plant-wide [`Summary`].

A calculation either succeeds completely or fails with a single [`Error`]
whose [`ErrorKind`] tells what went wrong:

- the graph has a cycle, a duplicate node id or a connection to a missing
  node,
- a node references a technology that isn't in the catalog,
- a parameter resolves to an invalid value.

## Validation

[`validate`] is the diagnostic counterpart of [`calculate`].  It builds the
graph and checks that every connection carries a stream kind its target
accepts, collecting all problems into a [`ValidationReport`] instead of
failing on the first one.

## Scenarios

The [`scenario`] module stores routes behind a [`ScenarioRepository`] and
compares the balances of saved routes side by side.
*/

mod config;
pub use config::{CalculationConfig, TemperatureMixing};

mod error;
pub use error::{Error, ErrorKind};

mod graph;
pub use graph::{
    iterators, BiomethaneSaleMetrics, BoilerMetrics, ByproductMetrics, CalculationResult,
    ChpMetrics, DigesterMetrics, FlareMetrics, LiquidFeedstockMetrics, NodeMetrics, NodeResult,
    PretreatmentMetrics, RouteGraph, SolidFeedstockMetrics, Summary, UpgradingMetrics,
    ValidationIssue, ValidationReport, METHANE_LHV_MJ_PER_NM3, OPERATING_DAYS_PER_YEAR,
};

mod graph_traits;
pub use graph_traits::{Edge, Node};

mod process;
pub use process::{Connection, Position, ProcessNode};

pub mod scenario;
pub use scenario::{InMemoryScenarioRepository, Scenario, ScenarioRepository};

mod stream;
pub use stream::Stream;

mod technology;
pub use technology::{ParameterSpec, TechnologyCatalog, TechnologyLookup, TechnologyProfile};

mod technology_category;
pub use technology_category::TechnologyCategory;

/// Builds a route from the given nodes and connections and runs its
/// mass/energy balance against `catalog`, with the default configuration.
pub fn calculate<N, E, C>(
    nodes: impl IntoIterator<Item = N>,
    connections: impl IntoIterator<Item = E>,
    catalog: &C,
) -> Result<CalculationResult, Error>
where
    N: Node,
    E: Edge,
    C: TechnologyLookup + ?Sized,
{
    calculate_with_config(nodes, connections, catalog, CalculationConfig::default())
}

/// Like [`calculate`], with the given configuration.
pub fn calculate_with_config<N, E, C>(
    nodes: impl IntoIterator<Item = N>,
    connections: impl IntoIterator<Item = E>,
    catalog: &C,
    config: CalculationConfig,
) -> Result<CalculationResult, Error>
where
    N: Node,
    E: Edge,
    C: TechnologyLookup + ?Sized,
{
    RouteGraph::try_new(nodes, connections, config)?.balance(catalog)
}

/// Checks a route without running its balance.
///
/// Failures to build the graph and incompatible connections are reported in
/// the returned [`ValidationReport`], never as an `Err`.
pub fn validate<N, E, C>(
    nodes: impl IntoIterator<Item = N>,
    connections: impl IntoIterator<Item = E>,
    catalog: &C,
) -> ValidationReport
where
    N: Node,
    E: Edge,
    C: TechnologyLookup + ?Sized,
{
    validate_with_config(nodes, connections, catalog, CalculationConfig::default())
}

/// Like [`validate`], with the given configuration.
pub fn validate_with_config<N, E, C>(
    nodes: impl IntoIterator<Item = N>,
    connections: impl IntoIterator<Item = E>,
    catalog: &C,
    config: CalculationConfig,
) -> ValidationReport
where
    N: Node,
    E: Edge,
    C: TechnologyLookup + ?Sized,
{
    match RouteGraph::try_new(nodes, connections, config) {
        Ok(rg) => graph::validate(&rg, catalog),
        Err(err) => {
            tracing::debug!("Route failed to build: {}", err);
            ValidationReport::from_error(&err)
        }
    }
}
