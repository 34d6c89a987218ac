// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for creating [`RouteGraph`] instances from given nodes and
//! connections.

use petgraph::graph::DiGraph;

use crate::{CalculationConfig, Edge, Error, Node};

use super::{ordering, EdgeMap, NodeIndexMap, RouteGraph};

/// `RouteGraph` instantiation.
impl<N, E> RouteGraph<N, E>
where
    N: Node,
    E: Edge,
{
    /// Creates a new [`RouteGraph`] from the given nodes and connections.
    ///
    /// Returns an error if a node id is used twice, if a connection refers to
    /// a node that doesn't exist, or if the connections form a cycle.  The
    /// inputs are consumed but never modified.
    pub fn try_new<NodeIterator: IntoIterator<Item = N>, EdgeIterator: IntoIterator<Item = E>>(
        nodes: NodeIterator,
        connections: EdgeIterator,
        config: CalculationConfig,
    ) -> Result<Self, Error> {
        let (graph, indices) = Self::create_graph(nodes, &config)?;

        let mut rg = Self {
            graph,
            node_indices: indices,
            edges: EdgeMap::new(),
            order: Vec::new(),
            config,
        };
        rg.add_connections(connections)?;

        rg.order = ordering::topological_order(&rg.graph)?;
        tracing::debug!(
            "Calculation order: {}",
            rg.order
                .iter()
                .map(|i| rg.graph[*i].node_id())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(rg)
    }

    fn create_graph(
        nodes: impl IntoIterator<Item = N>,
        config: &CalculationConfig,
    ) -> Result<(DiGraph<N, ()>, NodeIndexMap), Error> {
        let mut graph = DiGraph::new();
        let mut indices = NodeIndexMap::new();

        for node in nodes {
            if let Some(max_nodes) = config.max_nodes {
                if graph.node_count() >= max_nodes {
                    return Err(Error::invalid_graph(format!(
                        "Route has more than the maximum of {max_nodes} nodes."
                    )));
                }
            }

            let nid = node.node_id().to_string();
            if indices.contains_key(&nid) {
                return Err(Error::invalid_graph(format!(
                    "Duplicate node ID found: {nid}"
                )));
            }

            let idx = graph.add_node(node);
            indices.insert(nid, idx);
        }

        Ok((graph, indices))
    }

    fn add_connections(&mut self, connections: impl IntoIterator<Item = E>) -> Result<(), Error> {
        for connection in connections {
            let sid = connection.source();
            let tid = connection.target();

            for nid in [sid, tid] {
                if !self.node_indices.contains_key(nid) {
                    return Err(Error::node_not_found(format!(
                        "Connection:({sid}, {tid}) Can't find a node with ID {nid}"
                    )));
                }
            }
            if sid == tid {
                return Err(Error::cycle_detected(format!(
                    "Cycle detected: {sid} -> {tid}"
                )));
            }

            let source_idx = self.node_indices[sid];
            let target_idx = self.node_indices[tid];
            self.graph.update_edge(source_idx, target_idx, ());
            self.edges.insert((source_idx, target_idx), connection);
        }

        Ok(())
    }
}
