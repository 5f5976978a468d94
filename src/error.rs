//! Error types for the mind map data model.

use thiserror::Error;

/// Structural defects in diagram data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagramError {
	/// Two nodes share an identifier.
	#[error("duplicate node id: {id}")]
	DuplicateNodeId {
		/// The repeated identifier.
		id: String,
	},

	/// Two edges share an identifier.
	#[error("duplicate edge id: {id}")]
	DuplicateEdgeId {
		/// The repeated identifier.
		id: String,
	},

	/// An edge names a node that is not in the graph.
	#[error("edge {edge} references unknown node {node}")]
	DanglingEdge {
		/// Offending edge id.
		edge: String,
		/// The missing node id.
		node: String,
	},

	/// A category name outside the closed set of node categories.
	#[error("unknown node category: {name}")]
	UnknownCategory {
		/// The unrecognized name.
		name: String,
	},
}

/// Result alias for diagram operations.
pub type Result<T> = std::result::Result<T, DiagramError>;
