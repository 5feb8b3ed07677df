//! Node system - socket declarations, dynamic items, and the graph
//! resync protocol

// Core node system modules
pub mod declaration;
pub mod factory;
pub mod graph;
pub mod items;
pub mod node;
pub mod socket;
pub mod types;

// Node kind implementations
pub mod function;

// Re-export core types
pub use declaration::{DeclarationBuilder, NodeDeclaration};
pub use graph::{Connection, FunctionGraph, GraphError, NodeInstance};
pub use items::{SocketItem, SocketItemList};
pub use node::{DrawContext, FunctionNode, NodeCommand, NodeId};
pub use socket::{Socket, SocketOrigin, SocketSide};
pub use types::{StandardTypes, TypeRegistry, TypeTag};

// Re-export factory types
pub use factory::{NodeCategory, NodeFactory, NodeMetadata, NodeRegistry};
