//! Declaration builder for node socket interfaces

use super::socket::{Socket, SocketOrigin, SocketSide};
use super::types::TypeTag;

/// The ordered socket interface computed from a node's current state.
///
/// Derived data: recomputed on every resync pass and handed to the
/// graph, never stored on the node itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeDeclaration {
    pub inputs: Vec<Socket>,
    pub outputs: Vec<Socket>,
}

/// Fluent accumulator handed to [`declaration`] implementations.
///
/// Lives for a single declaration pass. Emitting two sockets with the
/// same identifier on one side is a defect in the node implementation
/// and panics immediately rather than producing an inconsistent graph.
///
/// [`declaration`]: super::node::FunctionNode::declaration
#[derive(Debug, Default)]
pub struct DeclarationBuilder {
    decl: NodeDeclaration,
}

impl DeclarationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an input socket that exists regardless of node state
    pub fn fixed_input(&mut self, identifier: &str, name: &str, data_type: TypeTag) -> &mut Self {
        self.push(Socket {
            identifier: identifier.to_string(),
            name: name.to_string(),
            data_type,
            side: SocketSide::Input,
            origin: SocketOrigin::Fixed,
        });
        self
    }

    /// Appends an input socket backed by the item list entry currently
    /// at `position`. The identifier must be the entry's stable
    /// identifier, not its position.
    pub fn item_input(
        &mut self,
        identifier: &str,
        name: &str,
        data_type: TypeTag,
        position: usize,
    ) -> &mut Self {
        self.push(Socket {
            identifier: identifier.to_string(),
            name: name.to_string(),
            data_type,
            side: SocketSide::Input,
            origin: SocketOrigin::Item { position },
        });
        self
    }

    /// Appends an output socket that exists regardless of node state
    pub fn fixed_output(&mut self, identifier: &str, name: &str, data_type: TypeTag) -> &mut Self {
        self.push(Socket {
            identifier: identifier.to_string(),
            name: name.to_string(),
            data_type,
            side: SocketSide::Output,
            origin: SocketOrigin::Fixed,
        });
        self
    }

    fn push(&mut self, socket: Socket) {
        let list = match socket.side {
            SocketSide::Input => &mut self.decl.inputs,
            SocketSide::Output => &mut self.decl.outputs,
        };
        if list.iter().any(|s| s.identifier == socket.identifier) {
            panic!(
                "duplicate socket identifier {:?} declared on the {:?} side",
                socket.identifier, socket.side
            );
        }
        list.push(socket);
    }

    /// Consumes the builder, yielding the accumulated declaration
    pub fn finish(self) -> NodeDeclaration {
        self.decl
    }
}
