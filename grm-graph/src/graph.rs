use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

pub type NodeId = usize;

///
/// Read-only view of a directed sequence graph.
///
/// Node ids run from `0` to `num_nodes() - 1`. Adjacency lists are sorted by node id.
///
pub trait SequenceGraph {
    fn num_nodes(&self) -> usize;

    fn node_name(&self, node: NodeId) -> Result<&str>;

    fn successors(&self, node: NodeId) -> Result<&[NodeId]>;

    fn predecessors(&self, node: NodeId) -> Result<&[NodeId]>;
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    #[serde(default)]
    pub sequence: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

/// On-disk graph description. Fields other than `nodes` and `edges` are ignored.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GraphDocument {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

///
/// Adjacency-list sequence graph.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    successors: Vec<Vec<NodeId>>,
    predecessors: Vec<Vec<NodeId>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Build a graph from node names and `(from, to)` name pairs.
    ///
    pub fn from_names(names: &[&str], edges: &[(&str, &str)]) -> Result<Self> {
        let document = GraphDocument {
            nodes: names
                .iter()
                .map(|name| Node {
                    name: name.to_string(),
                    sequence: String::new(),
                })
                .collect(),
            edges: edges
                .iter()
                .map(|(from, to)| Edge {
                    from: from.to_string(),
                    to: to.to_string(),
                })
                .collect(),
        };
        Graph::try_from(document)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let document: GraphDocument = serde_json::from_str(json)?;
        Graph::try_from(document)
    }

    pub fn add_node(&mut self, name: impl Into<String>, sequence: impl Into<String>) -> Result<NodeId> {
        let name = name.into();
        if self.node_id(&name).is_some() {
            return Err(GraphError::DuplicateNode(name));
        }
        self.nodes.push(Node {
            name,
            sequence: sequence.into(),
        });
        self.successors.push(Vec::new());
        self.predecessors.push(Vec::new());
        Ok(self.nodes.len() - 1)
    }

    /// Add an edge between two existing nodes. Adding an existing edge is a no-op.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        self.check(from)?;
        self.check(to)?;

        if let Err(index) = self.successors[from].binary_search(&to) {
            self.successors[from].insert(index, to);
        }
        if let Err(index) = self.predecessors[to].binary_search(&from) {
            self.predecessors[to].insert(index, from);
        }
        Ok(())
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|node| node.name == name)
    }

    pub fn node(&self, node: NodeId) -> Result<&Node> {
        self.check(node)?;
        Ok(&self.nodes[node])
    }

    pub fn num_edges(&self) -> usize {
        self.successors.iter().map(Vec::len).sum()
    }

    fn check(&self, node: NodeId) -> Result<()> {
        if node < self.nodes.len() {
            Ok(())
        } else {
            Err(GraphError::NodeOutOfRange(node, self.nodes.len()))
        }
    }
}

impl SequenceGraph for Graph {
    fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn node_name(&self, node: NodeId) -> Result<&str> {
        Ok(self.node(node)?.name.as_str())
    }

    fn successors(&self, node: NodeId) -> Result<&[NodeId]> {
        self.check(node)?;
        Ok(&self.successors[node])
    }

    fn predecessors(&self, node: NodeId) -> Result<&[NodeId]> {
        self.check(node)?;
        Ok(&self.predecessors[node])
    }
}

impl TryFrom<GraphDocument> for Graph {
    type Error = GraphError;

    fn try_from(document: GraphDocument) -> Result<Self> {
        let mut graph = Graph::new();
        for node in document.nodes {
            graph.add_node(node.name, node.sequence)?;
        }
        for edge in document.edges {
            let from = graph
                .node_id(&edge.from)
                .ok_or_else(|| GraphError::UnknownNode(edge.from.clone()))?;
            let to = graph
                .node_id(&edge.to)
                .ok_or_else(|| GraphError::UnknownNode(edge.to.clone()))?;
            graph.add_edge(from, to)?;
        }
        Ok(graph)
    }
}

impl TryFrom<&Path> for Graph {
    type Error = GraphError;

    fn try_from(path: &Path) -> Result<Self> {
        let json = read_to_string(path)?;
        Graph::from_json(&json)
    }
}
