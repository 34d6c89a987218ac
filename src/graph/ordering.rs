// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Computes the order in which the nodes of a route are calculated.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::{Error, Node};

/// Returns the nodes of the graph in topological order.
///
/// This is Kahn's algorithm with the ready set ordered by node index, so that
/// whenever several nodes are ready, the one declared first goes first.  The
/// result is the same for the same input, which keeps floating point results
/// reproducible.
///
/// Returns a `CycleDetected` error naming one of the cycles if the graph is
/// not acyclic.
pub(super) fn topological_order<N: Node>(graph: &DiGraph<N, ()>) -> Result<Vec<NodeIndex>, Error> {
    let mut in_degree = graph
        .node_indices()
        .map(|i| graph.neighbors_directed(i, Direction::Incoming).count())
        .collect::<Vec<_>>();

    let mut ready = graph
        .node_indices()
        .filter(|i| in_degree[i.index()] == 0)
        .map(Reverse)
        .collect::<BinaryHeap<_>>();

    let mut order = Vec::with_capacity(graph.node_count());
    while let Some(Reverse(index)) = ready.pop() {
        order.push(index);
        for successor in graph.neighbors_directed(index, Direction::Outgoing) {
            in_degree[successor.index()] -= 1;
            if in_degree[successor.index()] == 0 {
                ready.push(Reverse(successor));
            }
        }
    }

    if order.len() < graph.node_count() {
        return Err(Error::cycle_detected(format!(
            "Cycle detected: {}",
            describe_cycle(graph, &in_degree)
        )));
    }

    Ok(order)
}

/// Finds a cycle among the nodes Kahn's algorithm could not release.
///
/// Every such node still has an unreleased predecessor, so walking
/// predecessors from any of them must eventually revisit a node.
fn describe_cycle<N: Node>(graph: &DiGraph<N, ()>, in_degree: &[usize]) -> String {
    let blocked = |i: &NodeIndex| in_degree[i.index()] > 0;

    let Some(start) = graph.node_indices().find(blocked) else {
        return String::from("unknown");
    };

    let mut path: Vec<NodeIndex> = Vec::new();
    let mut current = start;
    let mut cycle = loop {
        if let Some(position) = path.iter().position(|i| *i == current) {
            break path.split_off(position);
        }
        path.push(current);
        let Some(predecessor) = graph
            .neighbors_directed(current, Direction::Incoming)
            .filter(blocked)
            .min()
        else {
            return String::from("unknown");
        };
        current = predecessor;
    };

    // The walk went against the edges; report the cycle in edge direction,
    // starting from its earliest declared node.
    cycle.reverse();
    if let Some(first) = cycle
        .iter()
        .enumerate()
        .min_by_key(|(_, i)| **i)
        .map(|(position, _)| position)
    {
        cycle.rotate_left(first);
    }

    cycle
        .iter()
        .chain(cycle.first())
        .map(|i| graph[*i].node_id())
        .collect::<Vec<_>>()
        .join(" -> ")
}
