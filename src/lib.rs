//! Funcgraph - function node graphs with dynamically declared sockets
//!
//! This library provides the socket-declaration machinery for nodes
//! whose interface (socket count and data types) changes at edit time:
//! nodes declare their sockets from their current state through a
//! builder, and the owning graph resyncs connections against each fresh
//! declaration so the structure stays consistent while the user edits.

pub mod nodes;

pub use nodes::{
    Connection, DeclarationBuilder, DrawContext, FunctionGraph, FunctionNode, GraphError,
    NodeCategory, NodeCommand, NodeDeclaration, NodeFactory, NodeId, NodeInstance, NodeMetadata,
    NodeRegistry, Socket, SocketItem, SocketItemList, SocketOrigin, SocketSide, StandardTypes,
    TypeRegistry, TypeTag,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_to_graph_round_trip() {
        let registry = NodeRegistry::default();
        let mut graph = FunctionGraph::new();

        let select = graph.add_node(registry.create_node("Select").unwrap());
        let node = graph.node(select).unwrap();
        assert_eq!(node.behavior.type_name(), "Select");
        assert_eq!(node.inputs.len(), 4);
        assert_eq!(node.outputs.len(), 1);

        // Test node removal
        assert!(graph.remove_node(select).is_some());
        assert!(graph.node(select).is_none());
    }

    #[test]
    fn test_edit_session_keeps_graph_consistent() {
        let registry = NodeRegistry::default();
        let mut graph = FunctionGraph::new();
        let switch = graph.add_node(registry.create_node("Switch").unwrap());
        let select = graph.add_node(registry.create_node("Select").unwrap());

        graph.connect(switch, "result", select, "fallback").unwrap();
        graph.dispatch(select, NodeCommand::AddItem).unwrap();
        graph.dispatch(select, NodeCommand::RemoveItem(0)).unwrap();
        assert_eq!(graph.node(select).unwrap().inputs.len(), 4);
        assert_eq!(graph.connections().len(), 1);

        graph
            .dispatch(select, NodeCommand::SetDataType(TypeTag::boolean()))
            .unwrap();
        assert!(graph.connections().is_empty());
    }
}
