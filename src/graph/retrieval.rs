// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for retrieving nodes and connections from a [`RouteGraph`].

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::iterators::{Connections, Neighbors, Nodes, Ordered};
use crate::{CalculationConfig, Edge, Error, Node, RouteGraph};

/// `Node` and `Connection` retrieval.
impl<N, E> RouteGraph<N, E>
where
    N: Node,
    E: Edge,
{
    /// Returns the node with the given `node_id`, if it exists.
    pub fn node(&self, node_id: &str) -> Result<&N, Error> {
        self.node_indices
            .get(node_id)
            .map(|i| &self.graph[*i])
            .ok_or_else(|| Error::node_not_found(format!("Node with id {node_id} not found.")))
    }

    /// Returns an iterator over the nodes in the graph.
    pub fn nodes(&self) -> Nodes<'_, N> {
        Nodes {
            iter: self.graph.raw_nodes().iter(),
        }
    }

    /// Returns an iterator over the connections in the graph.
    pub fn connections(&self) -> Connections<'_, N, E> {
        Connections {
            rg: self,
            iter: self.graph.raw_edges().iter(),
        }
    }

    /// Returns an iterator over the nodes in the order they are calculated:
    /// every node comes after all of its predecessors.
    pub fn ordered_nodes(&self) -> Ordered<'_, N> {
        Ordered {
            graph: &self.graph,
            iter: self.order.iter(),
        }
    }

    /// Returns the configuration the graph was built with.
    pub fn config(&self) -> &CalculationConfig {
        &self.config
    }

    /// Returns an iterator over the *predecessors* of the node with the
    /// given `node_id`.
    ///
    /// Returns an error if the given `node_id` does not exist.
    pub fn predecessors(&self, node_id: &str) -> Result<Neighbors<'_, N>, Error> {
        self.neighbors(node_id, Direction::Incoming)
    }

    /// Returns an iterator over the *successors* of the node with the
    /// given `node_id`.
    ///
    /// Returns an error if the given `node_id` does not exist.
    pub fn successors(&self, node_id: &str) -> Result<Neighbors<'_, N>, Error> {
        self.neighbors(node_id, Direction::Outgoing)
    }

    fn neighbors(&self, node_id: &str, direction: Direction) -> Result<Neighbors<'_, N>, Error> {
        self.node_indices
            .get(node_id)
            .map(|&index| Neighbors {
                graph: &self.graph,
                iter: self.graph.neighbors_directed(index, direction),
            })
            .ok_or_else(|| Error::node_not_found(format!("Node with id {node_id} not found.")))
    }

    /// Returns the calculation order as graph indices.
    pub(crate) fn order(&self) -> &[NodeIndex] {
        &self.order
    }

    pub(crate) fn node_at(&self, index: NodeIndex) -> &N {
        &self.graph[index]
    }

    /// Returns the neighbours of the node at `index` in the given direction,
    /// in the order their connections were declared.
    pub(crate) fn linked(&self, index: NodeIndex, direction: Direction) -> Vec<NodeIndex> {
        let mut edges = self
            .graph
            .edges_directed(index, direction)
            .map(|e| {
                let other = match direction {
                    Direction::Incoming => e.source(),
                    Direction::Outgoing => e.target(),
                };
                (e.id(), other)
            })
            .collect::<Vec<_>>();
        edges.sort_by_key(|(id, _)| *id);
        edges.into_iter().map(|(_, other)| other).collect()
    }
}
