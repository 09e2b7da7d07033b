use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use log::debug;
use serde::Serialize;

use crate::error::Result;
use crate::graph::{NodeId, SequenceGraph};

pub const SOURCE_NODE_NAME: &str = "source";
pub const SINK_NODE_NAME: &str = "sink";

/// Whether paths diverge at a node or converge on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakpointKind {
    Branch,
    Merge,
}

/// Label of the edge `from -> to`.
pub fn edge_label(from: &str, to: &str) -> String {
    format!("{}_{}", from, to)
}

/// Label of the branch breakpoint at a node: `"<name>_"`.
pub fn branch_label(node_name: &str) -> String {
    format!("{}_", node_name)
}

/// Label of the merge breakpoint at a node: `"_<name>"`.
pub fn merge_label(node_name: &str) -> String {
    format!("_{}", node_name)
}

///
/// Local topology of one breakpoint: the node and the edges that leave it (branch) or
/// enter it (merge).
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakpointStatistics {
    pub node_id: NodeId,
    pub node_name: String,
    pub kind: BreakpointKind,
    /// Edge labels, ordered by neighbour id.
    pub edges: Vec<String>,
}

impl BreakpointStatistics {
    pub fn new<G>(graph: &G, node: NodeId, is_branch: bool) -> Result<Self>
    where
        G: SequenceGraph + ?Sized,
    {
        let node_name = graph.node_name(node)?.to_string();

        let (kind, neighbours) = if is_branch {
            (BreakpointKind::Branch, graph.successors(node)?)
        } else {
            (BreakpointKind::Merge, graph.predecessors(node)?)
        };

        let mut edges = Vec::with_capacity(neighbours.len());
        for &neighbour in neighbours {
            let neighbour_name = graph.node_name(neighbour)?;
            edges.push(match kind {
                BreakpointKind::Branch => edge_label(&node_name, neighbour_name),
                BreakpointKind::Merge => edge_label(neighbour_name, &node_name),
            });
        }

        Ok(BreakpointStatistics {
            node_id: node,
            node_name,
            kind,
            edges,
        })
    }

    pub fn label(&self) -> String {
        match self.kind {
            BreakpointKind::Branch => branch_label(&self.node_name),
            BreakpointKind::Merge => merge_label(&self.node_name),
        }
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
}

///
/// Breakpoints of a graph keyed by label.
///
/// Keys are `"<node>_"` for branch points and `"_<node>"` for merge points, so one node can
/// appear twice. Iteration is in key order.
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BreakpointMap {
    breakpoints: BTreeMap<String, BreakpointStatistics>,
}

impl BreakpointMap {
    pub fn get(&self, label: &str) -> Option<&BreakpointStatistics> {
        self.breakpoints.get(label)
    }

    pub fn contains_key(&self, label: &str) -> bool {
        self.breakpoints.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.breakpoints.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BreakpointStatistics)> {
        self.breakpoints.iter()
    }

    ///
    /// Breakpoints an alignment crossing the edge `from -> to` passes through: the branch
    /// point at `from` and the merge point at `to`, when they exist.
    ///
    pub fn breakpoints_on_edge(
        &self,
        from: &str,
        to: &str,
    ) -> (Option<&BreakpointStatistics>, Option<&BreakpointStatistics>) {
        (
            self.breakpoints.get(&branch_label(from)),
            self.breakpoints.get(&merge_label(to)),
        )
    }

    /// Adds a breakpoint unless its label is already taken; the earlier entry is kept.
    fn insert(&mut self, statistics: BreakpointStatistics) {
        match self.breakpoints.entry(statistics.label()) {
            Entry::Vacant(slot) => {
                slot.insert(statistics);
            }
            Entry::Occupied(slot) => {
                debug!(
                    "Breakpoint label {} of node {} already taken by node {}",
                    slot.key(),
                    statistics.node_name,
                    slot.get().node_name
                );
            }
        }
    }
}

impl<'a> IntoIterator for &'a BreakpointMap {
    type Item = (&'a String, &'a BreakpointStatistics);
    type IntoIter = std::collections::btree_map::Iter<'a, String, BreakpointStatistics>;

    fn into_iter(self) -> Self::IntoIter {
        self.breakpoints.iter()
    }
}

///
/// Create a map of all breakpoints in a graph.
///
/// When node `0` is named `source` and the last node `sink`, both are left out. Every other
/// node is visited once in id order; more than one successor makes it a branch point, more
/// than one predecessor a merge point.
///
pub fn create_breakpoint_map<G>(graph: &G) -> Result<BreakpointMap>
where
    G: SequenceGraph + ?Sized,
{
    let mut breakpoint_map = BreakpointMap::default();
    let num_nodes = graph.num_nodes();
    if num_nodes == 0 {
        return Ok(breakpoint_map);
    }

    let source_node: NodeId = 0;
    let sink_node: NodeId = num_nodes - 1;
    let has_source_and_sink = graph.node_name(source_node)? == SOURCE_NODE_NAME
        && graph.node_name(sink_node)? == SINK_NODE_NAME;

    for node in source_node..=sink_node {
        if has_source_and_sink && (node == source_node || node == sink_node) {
            continue;
        }

        if graph.successors(node)?.len() > 1 {
            breakpoint_map.insert(BreakpointStatistics::new(graph, node, true)?);
        }

        if graph.predecessors(node)?.len() > 1 {
            breakpoint_map.insert(BreakpointStatistics::new(graph, node, false)?);
        }
    }

    debug!(
        "Found {} breakpoints in a graph of {} nodes",
        breakpoint_map.len(),
        num_nodes
    );
    Ok(breakpoint_map)
}
