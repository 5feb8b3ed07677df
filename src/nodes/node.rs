//! Function node trait and the command-dispatch mutation model

use egui::Ui;

use super::declaration::DeclarationBuilder;
use super::graph::GraphError;
use super::socket::Socket;
use super::types::{TypeRegistry, TypeTag};

/// Unique identifier for a node
pub type NodeId = usize;

/// A state mutation requested by the UI layer.
///
/// Widgets emit commands instead of mutating node state in place; the
/// graph applies a command all-or-nothing and then runs exactly one
/// resync, keeping "what changed" separate from "who reacts".
#[derive(Debug, Clone, PartialEq)]
pub enum NodeCommand {
    /// Replace the node's selected data type
    SetDataType(TypeTag),
    /// Append a new input slot to the node's item list
    AddItem,
    /// Remove the input slot at the given current position
    RemoveItem(usize),
}

impl NodeCommand {
    /// Short name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            NodeCommand::SetDataType(_) => "set data type",
            NodeCommand::AddItem => "add item",
            NodeCommand::RemoveItem(_) => "remove item",
        }
    }
}

/// Context available to node draw hooks
pub struct DrawContext<'a> {
    /// Type catalog backing the type-selection affordance
    pub types: &'a dyn TypeRegistry,
}

/// A node kind participating in the socket declaration protocol
pub trait FunctionNode {
    /// Stable type name, unique within the registry
    fn type_name(&self) -> &'static str;

    /// Declares the node's socket interface from its current state.
    ///
    /// Must be pure: no side effects, and the same state always emits
    /// the same ordered descriptors. The graph calls this on every
    /// resync pass.
    fn declaration(&self, builder: &mut DeclarationBuilder);

    /// Applies one command, all-or-nothing.
    ///
    /// Validation happens before any state change; an error leaves the
    /// node untouched and suppresses the resync.
    fn apply(&mut self, command: NodeCommand) -> Result<(), GraphError>;

    /// Renders node-level controls, emitting commands for the graph
    fn draw(&self, ui: &mut Ui, ctx: &DrawContext<'_>, commands: &mut Vec<NodeCommand>);

    /// Renders one socket row.
    ///
    /// The default is the standard label widget; node kinds override
    /// this to attach per-socket affordances.
    fn draw_socket(&self, ui: &mut Ui, socket: &Socket, _commands: &mut Vec<NodeCommand>) {
        ui.label(&socket.name);
    }
}

/// Type-selection affordance shared by nodes with a selectable data
/// type. Emits [`NodeCommand::SetDataType`] when a tag is picked.
pub fn type_selection(
    ui: &mut Ui,
    current: &TypeTag,
    ctx: &DrawContext<'_>,
    commands: &mut Vec<NodeCommand>,
) {
    egui::ComboBox::from_label("Type")
        .selected_text(current.as_str().to_string())
        .show_ui(ui, |ui| {
            for tag in ctx.types.tags() {
                if ui.selectable_label(tag == *current, tag.as_str()).clicked() {
                    commands.push(NodeCommand::SetDataType(tag.clone()));
                }
            }
        });
}
