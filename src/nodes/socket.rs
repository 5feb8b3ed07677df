//! Socket descriptors produced by node declarations

use serde::{Deserialize, Serialize};

use super::types::TypeTag;

/// Which side of the node a socket sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketSide {
    Input,
    Output,
}

/// How a socket came to be declared.
///
/// Item sockets record the position of the backing list entry at
/// declaration time, so per-socket UI can offer positional actions
/// without inferring anything from the label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocketOrigin {
    /// Declared unconditionally by the node kind
    Fixed,
    /// Declared for the item list entry currently at `position`
    Item { position: usize },
}

/// A typed, named connection point on a node.
///
/// `identifier` is unique per node side and stable across
/// re-declarations; connections reference sockets by identifier, never
/// by position. The order in which sockets are declared is the display
/// and call-argument order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Socket {
    pub identifier: String,
    pub name: String,
    pub data_type: TypeTag,
    pub side: SocketSide,
    pub origin: SocketOrigin,
}

impl Socket {
    /// Checks if this socket is an input
    pub fn is_input(&self) -> bool {
        matches!(self.side, SocketSide::Input)
    }

    /// Checks if this socket is an output
    pub fn is_output(&self) -> bool {
        matches!(self.side, SocketSide::Output)
    }
}
