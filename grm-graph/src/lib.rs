//! Sequence graphs and their breakpoints.
//!
//! A breakpoint is a node where alignment paths through the graph diverge (a branch point,
//! more than one successor) or converge (a merge point, more than one predecessor). The
//! [`BreakpointMap`] built by [`create_breakpoint_map`] indexes them by label so alignments
//! can be classified by the breakpoints they cross.
//!
//! ```rust
//! use grm_graph::{Graph, create_breakpoint_map};
//!
//! let graph = Graph::from_names(
//!     &["source", "left", "del", "right", "sink"],
//!     &[
//!         ("source", "left"),
//!         ("left", "del"),
//!         ("left", "right"),
//!         ("del", "right"),
//!         ("right", "sink"),
//!     ],
//! )
//! .unwrap();
//!
//! let breakpoints = create_breakpoint_map(&graph).unwrap();
//! assert!(breakpoints.contains_key("left_"));
//! assert!(breakpoints.contains_key("_right"));
//! assert_eq!(breakpoints.len(), 2);
//! ```

pub mod breakpoints;
pub mod error;
pub mod graph;

// re-exports
pub use self::breakpoints::{
    BreakpointKind, BreakpointMap, BreakpointStatistics, create_breakpoint_map,
};
pub use self::error::{GraphError, Result};
pub use self::graph::{Graph, GraphDocument, NodeId, SequenceGraph};
