// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Stream propagation over a route graph in calculation order.

use std::collections::{BTreeMap, HashMap};

use petgraph::graph::NodeIndex;
use petgraph::Direction;

use crate::technology_category::CategoryPredicates;
use crate::{Edge, Error, Node, RouteGraph, Stream, TechnologyLookup};

use super::{aggregator, rules, CalculationResult, NodeResult};

/// Carries streams from every node to its successors, applying each node's
/// technology rule on the way.
pub(super) struct StreamPropagator<'a, N, E, C>
where
    N: Node,
    E: Edge,
    C: TechnologyLookup + ?Sized,
{
    graph: &'a RouteGraph<N, E>,
    catalog: &'a C,
    outputs: HashMap<NodeIndex, Stream>,
    node_details: BTreeMap<String, NodeResult>,
    streams: BTreeMap<String, Stream>,
}

impl<'a, N, E, C> StreamPropagator<'a, N, E, C>
where
    N: Node,
    E: Edge,
    C: TechnologyLookup + ?Sized,
{
    pub(super) fn new(graph: &'a RouteGraph<N, E>, catalog: &'a C) -> Self {
        Self {
            graph,
            catalog,
            outputs: HashMap::new(),
            node_details: BTreeMap::new(),
            streams: BTreeMap::new(),
        }
    }

    pub(super) fn run(mut self) -> Result<CalculationResult, Error> {
        for &index in self.graph.order() {
            self.visit(index)?;
        }
        Ok(aggregator::aggregate(self.node_details, self.streams))
    }

    fn visit(&mut self, index: NodeIndex) -> Result<(), Error> {
        let node = self.graph.node_at(index);
        let profile = self.catalog.technology(node.tech_id()).ok_or_else(|| {
            Error::unknown_technology(format!(
                "Technology '{}' not found in catalog.",
                node.tech_id()
            ))
            .at_node(node.node_id(), node.tech_id())
        })?;

        tracing::debug!(
            "Calculating node {} ({}, {}).",
            node.node_id(),
            profile.id,
            profile.category
        );

        let inbound = self.graph.linked(index, Direction::Incoming);
        let outbound = self.graph.linked(index, Direction::Outgoing);
        if profile.is_feedstock() && !inbound.is_empty() {
            tracing::warn!(
                "Feedstock node {} has inbound connections; they are ignored.",
                node.node_id()
            );
        }
        if profile.is_terminal() && !outbound.is_empty() {
            tracing::warn!(
                "Node {} ({}) is terminal; its successors receive an empty stream.",
                node.node_id(),
                profile.category
            );
        }

        let input = Stream::merge(
            inbound.iter().filter_map(|source| self.outputs.get(source)),
            self.graph.config().temperature_mixing,
        );
        let output = rules::apply(profile, node, &input)
            .map_err(|err| err.at_node(node.node_id(), node.tech_id()))?;
        if let Some((field, value)) = output.stream.invalid_field() {
            return Err(Error::invalid_parameter(format!(
                "Stream field `{field}` must be a finite, non-negative number, got {value}."
            ))
            .at_node(node.node_id(), node.tech_id()));
        }

        for target in outbound {
            let key = format!(
                "{}->{}",
                node.node_id(),
                self.graph.node_at(target).node_id()
            );
            self.streams.insert(key, output.stream);
        }
        self.outputs.insert(index, output.stream);
        self.node_details.insert(
            node.node_id().to_string(),
            NodeResult {
                tech_id: profile.id.clone(),
                tech_name: profile.name.clone(),
                category: profile.category.clone(),
                metrics: output.metrics,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::test_utils::{assert_close, RouteBuilder};
    use crate::{
        CalculationConfig, Error, ErrorKind, RouteGraph, Stream, TechnologyCatalog,
        TechnologyCategory, TechnologyProfile, TemperatureMixing,
    };

    #[test]
    fn test_inbound_streams_are_summed() -> Result<(), Error> {
        let mut builder = RouteBuilder::new();
        let vinasse = builder.add("vinasse", &[("quantity", 1000.0)]);
        let wash = builder.add("wash_water", &[("quantity", 400.0)]);
        let tank = builder.add("storage_tank", &[]);
        builder.connect(&vinasse, &tank).connect(&wash, &tank);
        let sink = builder.add("storage_tank", &[]);
        builder.connect(&tank, &sink);

        let result = builder.calculate()?;
        let merged = result.streams["storage_tank-2->storage_tank-3"];
        assert_close(merged.volume_flow, 1400.0);
        assert_close(merged.cod, 27000.0);
        assert_close(merged.vs_content, 18900.0);
        assert_eq!(merged.temperature, 35.0);
        assert_eq!(merged.pressure, 1.0);
        Ok(())
    }

    #[test]
    fn test_source_without_inputs_sees_empty_stream() -> Result<(), Error> {
        let mut builder = RouteBuilder::new();
        let tank = builder.add("storage_tank", &[]);
        let digester = builder.add("cstr", &[]);
        builder.connect(&tank, &digester);

        let result = builder.calculate()?;
        assert_eq!(result.streams["storage_tank-0->cstr-1"], Stream::empty());
        assert_eq!(result.summary.biogas_nm3_day, 0.0);
        Ok(())
    }

    #[test]
    fn test_temperature_mixing() -> Result<(), Error> {
        let mut builder = RouteBuilder::new();
        let a = builder.add("vinasse", &[("temperature", 80.0)]);
        let b = builder.add("wash_water", &[("temperature", 20.0)]);
        let c = builder.add("filter_cake", &[("temperature", 20.0)]);
        let tank = builder.add("storage_tank", &[]);
        let sink = builder.add("storage_tank", &[]);
        builder
            .connect(&a, &tank)
            .connect(&b, &tank)
            .connect(&c, &tank)
            .connect(&tank, &sink);

        // Pairwise: (80 + 20) / 2 = 50, then (50 + 20) / 2 = 35.
        for (mixing, expected) in [
            (TemperatureMixing::PairwiseFold, 35.0),
            (TemperatureMixing::RunningMean, 40.0),
        ] {
            let config = CalculationConfig {
                temperature_mixing: mixing,
                ..Default::default()
            };
            let graph = RouteGraph::try_new(builder.nodes(), builder.connections(), config)?;
            let result = graph.balance(&crate::graph::test_utils::catalog())?;
            assert_close(
                result.streams["storage_tank-3->storage_tank-4"].temperature,
                expected,
            );
            assert_eq!(result.streams["vinasse-0->storage_tank-3"].temperature, 80.0);
        }
        Ok(())
    }

    #[test]
    fn test_non_finite_rule_output_is_rejected() {
        let catalog = TechnologyCatalog::from_profiles([
            TechnologyProfile::new("sludge", "Sludge", TechnologyCategory::Feedstock)
                .with_default("moisture", 0.0),
            TechnologyProfile::new("tank", "Tank", TechnologyCategory::from("storage")),
        ]);
        let mut builder = RouteBuilder::new();
        let sludge = builder.add("sludge", &[("quantity", 1e306)]);
        let tank = builder.add("tank", &[]);
        builder.connect(&sludge, &tank);

        let err = builder.build().unwrap().balance(&catalog).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert!(err.description().starts_with("Node sludge-0 (sludge): "));
        assert!(err
            .description()
            .contains("Stream field `mass_flow` must be a finite, non-negative number, got inf."));
    }

    #[test]
    fn test_unknown_category_is_reported_verbatim() -> Result<(), Error> {
        let mut builder = RouteBuilder::new();
        let vinasse = builder.add("vinasse", &[("quantity", 1000.0)]);
        let tank = builder.add("storage_tank", &[]);
        builder.connect(&vinasse, &tank);

        let result = builder.calculate()?;
        let details = &result.node_details["storage_tank-1"];
        assert_eq!(details.category.as_str(), "storage");
        assert_eq!(
            serde_json::to_value(details).unwrap()["category"],
            serde_json::json!("storage")
        );
        Ok(())
    }
}
