// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! A graph representation of the process nodes of a biogas route and the
//! connections that carry streams between them.

mod creation;
mod ordering;
mod retrieval;
mod validation;

pub(crate) mod balance;
pub mod iterators;

#[cfg(test)]
pub(crate) mod test_utils;

pub use balance::{
    BiomethaneSaleMetrics, BoilerMetrics, ByproductMetrics, CalculationResult, ChpMetrics,
    DigesterMetrics, FlareMetrics, LiquidFeedstockMetrics, NodeMetrics, NodeResult,
    PretreatmentMetrics, SolidFeedstockMetrics, Summary, UpgradingMetrics,
    METHANE_LHV_MJ_PER_NM3, OPERATING_DAYS_PER_YEAR,
};
pub use validation::{ValidationIssue, ValidationReport};
pub(crate) use validation::validate;

use crate::{CalculationConfig, Edge, Node};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// `Node`s stored in a `DiGraph` instance can be addressed with `NodeIndex`es.
///
/// `NodeIndexMap` stores the corresponding `NodeIndex` for any `node_id`, so
/// that Nodes in the `DiGraph` can be retrieved from their `node_id`s.
pub(crate) type NodeIndexMap = HashMap<String, NodeIndex>;

/// `Edge`s are not stored in the `DiGraph` instance, so we need to store them
/// separately.
///
/// `EdgeMap` can be used to lookup the `Edge` for any pair of source and
/// target `NodeIndex` values.
pub(crate) type EdgeMap<E> = HashMap<(NodeIndex, NodeIndex), E>;

/// A validated, acyclic graph of process nodes and the connections between
/// them, together with a deterministic calculation order.
pub struct RouteGraph<N, E>
where
    N: Node,
    E: Edge,
{
    graph: DiGraph<N, ()>,
    node_indices: NodeIndexMap,
    edges: EdgeMap<E>,
    order: Vec<NodeIndex>,
    config: CalculationConfig,
}
