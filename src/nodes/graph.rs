//! Function graph: node ownership, connections, and the resync protocol

use std::collections::HashMap;

use egui::Ui;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::declaration::DeclarationBuilder;
use super::node::{DrawContext, FunctionNode, NodeCommand, NodeId};
use super::socket::{Socket, SocketSide};
use super::types::{StandardTypes, TypeRegistry};

/// Errors surfaced by graph operations and node mutators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A positional index does not refer to a current list entry
    #[error("index {index} is out of range for a list of {len} items")]
    InvalidIndex { index: usize, len: usize },

    /// No node with this id exists in the graph
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    /// No socket with this identifier exists on the addressed side
    #[error("node {node} has no {side:?} socket {identifier:?}")]
    UnknownSocket {
        node: NodeId,
        side: SocketSide,
        identifier: String,
    },

    /// The endpoint types do not resolve to a connectable pair
    #[error("cannot connect {from:?} to {to:?}")]
    IncompatibleTypes { from: String, to: String },

    /// Both endpoints are on the same node
    #[error("cannot connect node {0} to itself")]
    SelfConnection(NodeId),

    /// The command is not understood by this node kind
    #[error("{node_type} node does not support {command}")]
    UnsupportedCommand {
        node_type: &'static str,
        command: &'static str,
    },
}

/// A connection from an output socket to an input socket.
///
/// Endpoints are addressed by socket identifier so that a connection
/// follows its socket through re-declarations that shuffle positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub from_node: NodeId,
    pub from_socket: String,
    pub to_node: NodeId,
    pub to_socket: String,
}

impl Connection {
    /// Creates a new connection
    pub fn new(
        from_node: NodeId,
        from_socket: impl Into<String>,
        to_node: NodeId,
        to_socket: impl Into<String>,
    ) -> Self {
        Self {
            from_node,
            from_socket: from_socket.into(),
            to_node,
            to_socket: to_socket.into(),
        }
    }
}

/// A node instance owned by the graph: its behavior plus the socket set
/// materialized from the latest declaration pass
pub struct NodeInstance {
    pub id: NodeId,
    pub behavior: Box<dyn FunctionNode>,
    pub inputs: Vec<Socket>,
    pub outputs: Vec<Socket>,
}

impl NodeInstance {
    /// Looks up a socket by side and identifier
    pub fn socket(&self, side: SocketSide, identifier: &str) -> Option<&Socket> {
        let list = match side {
            SocketSide::Input => &self.inputs,
            SocketSide::Output => &self.outputs,
        };
        list.iter().find(|s| s.identifier == identifier)
    }
}

/// A graph of function nodes kept structurally consistent across
/// interactive edits.
///
/// Single-threaded and event-driven: every mutation happens
/// synchronously inside [`dispatch`], and the resync it triggers is
/// atomic with respect to the mutation. Readers never observe a
/// half-updated socket set.
///
/// [`dispatch`]: FunctionGraph::dispatch
pub struct FunctionGraph {
    nodes: HashMap<NodeId, NodeInstance>,
    connections: Vec<Connection>,
    types: Box<dyn TypeRegistry>,
    next_node_id: NodeId,
    resyncs: u64,
}

impl FunctionGraph {
    /// Creates an empty graph with the built-in type catalog
    pub fn new() -> Self {
        Self::with_types(Box::new(StandardTypes))
    }

    /// Creates an empty graph with a custom type registry
    pub fn with_types(types: Box<dyn TypeRegistry>) -> Self {
        Self {
            nodes: HashMap::new(),
            connections: Vec::new(),
            types,
            next_node_id: 0,
            resyncs: 0,
        }
    }

    /// Adds a node and materializes its initial socket set, returning
    /// the assigned id
    pub fn add_node(&mut self, behavior: Box<dyn FunctionNode>) -> NodeId {
        let id = self.next_node_id;
        self.next_node_id += 1;
        debug!("adding {} node as {}", behavior.type_name(), id);
        self.nodes.insert(
            id,
            NodeInstance {
                id,
                behavior,
                inputs: Vec::new(),
                outputs: Vec::new(),
            },
        );
        self.resync(id);
        id
    }

    /// Removes a node and all its connections
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Box<dyn FunctionNode>> {
        self.connections
            .retain(|conn| conn.from_node != node_id && conn.to_node != node_id);
        self.nodes.remove(&node_id).map(|node| node.behavior)
    }

    pub fn node(&self, node_id: NodeId) -> Option<&NodeInstance> {
        self.nodes.get(&node_id)
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Number of resync passes run so far
    pub fn resync_count(&self) -> u64 {
        self.resyncs
    }

    /// Applies one command to a node, then reconciles the graph.
    ///
    /// The command either fully applies and triggers exactly one resync,
    /// or fails with no observable change.
    pub fn dispatch(&mut self, node_id: NodeId, command: NodeCommand) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get_mut(&node_id)
            .ok_or(GraphError::UnknownNode(node_id))?;
        node.behavior.apply(command)?;
        self.resync(node_id);
        Ok(())
    }

    /// Connects an output socket to an input socket, by identifier
    pub fn connect(
        &mut self,
        from_node: NodeId,
        from_socket: &str,
        to_node: NodeId,
        to_socket: &str,
    ) -> Result<(), GraphError> {
        if from_node == to_node {
            return Err(GraphError::SelfConnection(from_node));
        }
        let from = self
            .nodes
            .get(&from_node)
            .ok_or(GraphError::UnknownNode(from_node))?;
        let to = self
            .nodes
            .get(&to_node)
            .ok_or(GraphError::UnknownNode(to_node))?;
        let from_sock = from.socket(SocketSide::Output, from_socket).ok_or_else(|| {
            GraphError::UnknownSocket {
                node: from_node,
                side: SocketSide::Output,
                identifier: from_socket.to_string(),
            }
        })?;
        let to_sock = to.socket(SocketSide::Input, to_socket).ok_or_else(|| {
            GraphError::UnknownSocket {
                node: to_node,
                side: SocketSide::Input,
                identifier: to_socket.to_string(),
            }
        })?;
        if !self.types.can_connect(&from_sock.data_type, &to_sock.data_type) {
            return Err(GraphError::IncompatibleTypes {
                from: from_sock.data_type.as_str().to_string(),
                to: to_sock.data_type.as_str().to_string(),
            });
        }
        self.connections
            .push(Connection::new(from_node, from_socket, to_node, to_socket));
        Ok(())
    }

    /// Runs one UI pass for a node: node-level controls first, then a
    /// row per socket. Returns the commands the widgets emitted, ready
    /// to feed back through [`dispatch`].
    ///
    /// [`dispatch`]: FunctionGraph::dispatch
    pub fn draw_node(&self, node_id: NodeId, ui: &mut Ui) -> Result<Vec<NodeCommand>, GraphError> {
        let node = self
            .nodes
            .get(&node_id)
            .ok_or(GraphError::UnknownNode(node_id))?;
        let ctx = DrawContext {
            types: self.types.as_ref(),
        };
        let mut commands = Vec::new();
        node.behavior.draw(ui, &ctx, &mut commands);
        for socket in node.inputs.iter().chain(&node.outputs) {
            node.behavior.draw_socket(ui, socket, &mut commands);
        }
        Ok(commands)
    }

    /// Recomputes a node's sockets from its declaration and drops
    /// connections that no longer resolve
    fn resync(&mut self, node_id: NodeId) {
        {
            let node = self
                .nodes
                .get_mut(&node_id)
                .expect("resync requested for a node not in the graph");
            let mut builder = DeclarationBuilder::new();
            node.behavior.declaration(&mut builder);
            let decl = builder.finish();
            debug!(
                "resync node {}: {} inputs, {} outputs",
                node_id,
                decl.inputs.len(),
                decl.outputs.len()
            );
            node.inputs = decl.inputs;
            node.outputs = decl.outputs;
        }

        let nodes = &self.nodes;
        let types = self.types.as_ref();
        self.connections.retain(|conn| {
            let resolved = resolve_endpoints(nodes, conn);
            let (from, to) = match resolved {
                Some(pair) => pair,
                None => {
                    info!("dropping {:?}: endpoint no longer declared", conn);
                    return false;
                }
            };
            for tag in [&from.data_type, &to.data_type] {
                if !types.contains(tag) {
                    warn!("socket carries unknown type tag {:?}", tag.as_str());
                }
            }
            if !types.can_connect(&from.data_type, &to.data_type) {
                info!(
                    "dropping {:?}: {} does not connect to {}",
                    conn, from.data_type, to.data_type
                );
                return false;
            }
            true
        });

        self.resyncs += 1;
    }
}

impl Default for FunctionGraph {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_endpoints<'a>(
    nodes: &'a HashMap<NodeId, NodeInstance>,
    conn: &Connection,
) -> Option<(&'a Socket, &'a Socket)> {
    let from = nodes
        .get(&conn.from_node)?
        .socket(SocketSide::Output, &conn.from_socket)?;
    let to = nodes
        .get(&conn.to_node)?
        .socket(SocketSide::Input, &conn.to_socket)?;
    Some((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::function::{SelectNode, SwitchNode};
    use crate::nodes::types::TypeTag;

    fn graph_with_switch_and_select() -> (FunctionGraph, NodeId, NodeId) {
        let mut graph = FunctionGraph::new();
        let switch = graph.add_node(Box::new(SwitchNode::new()));
        let select = graph.add_node(Box::new(SelectNode::new()));
        (graph, switch, select)
    }

    fn item_identifier(graph: &FunctionGraph, node_id: NodeId, position: usize) -> String {
        graph.node(node_id).unwrap().inputs[1 + position]
            .identifier
            .clone()
    }

    #[test]
    fn test_adding_a_node_materializes_its_sockets() {
        let mut graph = FunctionGraph::new();
        let id = graph.add_node(Box::new(SwitchNode::new()));
        let node = graph.node(id).unwrap();
        assert_eq!(node.inputs.len(), 3);
        assert_eq!(node.outputs.len(), 1);
        assert_eq!(graph.resync_count(), 1);
    }

    #[test]
    fn test_each_dispatch_triggers_exactly_one_resync() {
        let (mut graph, switch, select) = graph_with_switch_and_select();
        let before = graph.resync_count();

        graph
            .dispatch(switch, NodeCommand::SetDataType(TypeTag::integer()))
            .unwrap();
        assert_eq!(graph.resync_count(), before + 1);

        graph.dispatch(select, NodeCommand::AddItem).unwrap();
        assert_eq!(graph.resync_count(), before + 2);

        graph.dispatch(select, NodeCommand::RemoveItem(0)).unwrap();
        assert_eq!(graph.resync_count(), before + 3);
    }

    #[test]
    fn test_failed_dispatch_changes_nothing() {
        let (mut graph, _, select) = graph_with_switch_and_select();
        let before_sockets = graph.node(select).unwrap().inputs.clone();
        let before_resyncs = graph.resync_count();

        let err = graph
            .dispatch(select, NodeCommand::RemoveItem(7))
            .unwrap_err();
        assert_eq!(err, GraphError::InvalidIndex { index: 7, len: 2 });
        assert_eq!(graph.resync_count(), before_resyncs);
        assert_eq!(graph.node(select).unwrap().inputs, before_sockets);
    }

    #[test]
    fn test_dispatch_to_missing_node_fails() {
        let mut graph = FunctionGraph::new();
        let err = graph
            .dispatch(42, NodeCommand::AddItem)
            .unwrap_err();
        assert_eq!(err, GraphError::UnknownNode(42));
    }

    #[test]
    fn test_connect_validates_types_and_sockets() {
        let (mut graph, switch, select) = graph_with_switch_and_select();

        // switch result is Float, select's select input is Integer
        let err = graph
            .connect(switch, "result", select, "select")
            .unwrap_err();
        assert!(matches!(err, GraphError::IncompatibleTypes { .. }));

        let err = graph
            .connect(switch, "result", select, "no-such-socket")
            .unwrap_err();
        assert!(matches!(err, GraphError::UnknownSocket { .. }));

        let err = graph.connect(switch, "result", switch, "true").unwrap_err();
        assert_eq!(err, GraphError::SelfConnection(switch));

        graph.connect(switch, "result", select, "fallback").unwrap();
        assert_eq!(graph.connections().len(), 1);
    }

    #[test]
    fn test_connection_follows_item_through_removal() {
        let (mut graph, switch, select) = graph_with_switch_and_select();
        let second_item = item_identifier(&graph, select, 1);

        graph.connect(switch, "result", select, &second_item).unwrap();
        graph.dispatch(select, NodeCommand::RemoveItem(0)).unwrap();

        // The connected entry now sits at position 0 under the same
        // identifier, and the edge survived.
        assert_eq!(graph.connections().len(), 1);
        let socket = graph
            .node(select)
            .unwrap()
            .socket(SocketSide::Input, &second_item)
            .unwrap();
        assert_eq!(socket.name, "0");
    }

    #[test]
    fn test_removing_the_connected_item_drops_the_edge() {
        let (mut graph, switch, select) = graph_with_switch_and_select();
        let first_item = item_identifier(&graph, select, 0);

        graph.connect(switch, "result", select, &first_item).unwrap();
        graph.dispatch(select, NodeCommand::RemoveItem(0)).unwrap();
        assert!(graph.connections().is_empty());
    }

    #[test]
    fn test_type_change_drops_incompatible_edges() {
        let (mut graph, switch, select) = graph_with_switch_and_select();
        graph.connect(switch, "result", select, "fallback").unwrap();

        graph
            .dispatch(select, NodeCommand::SetDataType(TypeTag::integer()))
            .unwrap();
        assert!(graph.connections().is_empty());
    }

    #[test]
    fn test_matching_type_change_keeps_edges() {
        let (mut graph, switch, select) = graph_with_switch_and_select();
        graph.connect(switch, "result", select, "fallback").unwrap();

        graph
            .dispatch(switch, NodeCommand::SetDataType(TypeTag::float()))
            .unwrap();
        assert_eq!(graph.connections().len(), 1);
    }

    #[test]
    fn test_unknown_type_tag_is_stored_without_crashing() {
        let (mut graph, switch, select) = graph_with_switch_and_select();
        graph.connect(switch, "result", select, "fallback").unwrap();

        graph
            .dispatch(select, NodeCommand::SetDataType(TypeTag::new("Quaternion")))
            .unwrap();

        let node = graph.node(select).unwrap();
        let fallback = node.socket(SocketSide::Input, "fallback").unwrap();
        assert_eq!(fallback.data_type.as_str(), "Quaternion");
        // unknown tags never type-check, so the edge is gone
        assert!(graph.connections().is_empty());
    }

    #[test]
    fn test_remove_node_drops_its_connections() {
        let (mut graph, switch, select) = graph_with_switch_and_select();
        graph.connect(switch, "result", select, "fallback").unwrap();

        assert!(graph.remove_node(switch).is_some());
        assert!(graph.connections().is_empty());
        assert!(graph.node(switch).is_none());
    }
}
