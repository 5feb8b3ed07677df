//! Select node: multiplexes one of a variable number of inputs by an
//! integer index

use egui::Ui;
use serde::{Deserialize, Serialize};

use crate::nodes::declaration::DeclarationBuilder;
use crate::nodes::factory::{NodeCategory, NodeFactory, NodeMetadata};
use crate::nodes::graph::GraphError;
use crate::nodes::items::SocketItemList;
use crate::nodes::node::{type_selection, DrawContext, FunctionNode, NodeCommand};
use crate::nodes::socket::{Socket, SocketOrigin};
use crate::nodes::types::TypeTag;

/// Integer-indexed multiplexer with a user-extendable input list.
///
/// Item sockets are identified by their entry's stable identifier and
/// labeled by their current position, so a connection follows its entry
/// when earlier slots are removed. The items, the fallback, and the
/// result all share the node's selected data type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectNode {
    pub data_type: TypeTag,
    pub items: SocketItemList,
}

impl SelectNode {
    /// Creates the node with its two initial input slots
    pub fn new() -> Self {
        let mut items = SocketItemList::new();
        items.add();
        items.add();
        Self {
            data_type: TypeTag::float(),
            items,
        }
    }
}

impl Default for SelectNode {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionNode for SelectNode {
    fn type_name(&self) -> &'static str {
        "Select"
    }

    fn declaration(&self, builder: &mut DeclarationBuilder) {
        builder.fixed_input("select", "Select", TypeTag::integer());
        for (position, item) in self.items.iter().enumerate() {
            builder.item_input(
                &item.identifier,
                &position.to_string(),
                self.data_type.clone(),
                position,
            );
        }
        builder
            .fixed_input("fallback", "Fallback", self.data_type.clone())
            .fixed_output("result", "Result", self.data_type.clone());
    }

    fn apply(&mut self, command: NodeCommand) -> Result<(), GraphError> {
        match command {
            NodeCommand::SetDataType(data_type) => {
                self.data_type = data_type;
                Ok(())
            }
            NodeCommand::AddItem => {
                self.items.add();
                Ok(())
            }
            NodeCommand::RemoveItem(position) => self.items.remove(position).map(|_| ()),
        }
    }

    fn draw(&self, ui: &mut Ui, ctx: &DrawContext<'_>, commands: &mut Vec<NodeCommand>) {
        type_selection(ui, &self.data_type, ctx, commands);
        if ui.button("Add Input").clicked() {
            commands.push(NodeCommand::AddItem);
        }
    }

    fn draw_socket(&self, ui: &mut Ui, socket: &Socket, commands: &mut Vec<NodeCommand>) {
        match socket.origin {
            // item rows get an inline remove button carrying the entry's
            // position as of this draw pass
            SocketOrigin::Item { position } => {
                ui.horizontal(|ui| {
                    ui.label(&socket.name);
                    if ui.small_button("✕").clicked() {
                        commands.push(NodeCommand::RemoveItem(position));
                    }
                });
            }
            SocketOrigin::Fixed => {
                ui.label(&socket.name);
            }
        }
    }
}

#[derive(Default)]
pub struct SelectNodeFactory;

impl NodeFactory for SelectNodeFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "Select",
            "Select",
            NodeCategory::function(),
            "Routes the input chosen by an integer index to the result, with a fallback",
        )
    }

    fn create() -> Box<dyn FunctionNode> {
        Box::new(SelectNode::new())
    }
}
