//! Switch node: routes one of two branches to the result by a boolean
//! condition

use egui::Ui;
use serde::{Deserialize, Serialize};

use crate::nodes::declaration::DeclarationBuilder;
use crate::nodes::factory::{NodeCategory, NodeFactory, NodeMetadata};
use crate::nodes::graph::GraphError;
use crate::nodes::node::{type_selection, DrawContext, FunctionNode, NodeCommand};
use crate::nodes::types::TypeTag;

/// Conditional select with a fixed three-input shape.
///
/// The two branches and the result all share the node's selected data
/// type; the condition is always boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchNode {
    pub data_type: TypeTag,
}

impl SwitchNode {
    pub fn new() -> Self {
        Self {
            data_type: TypeTag::float(),
        }
    }
}

impl Default for SwitchNode {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionNode for SwitchNode {
    fn type_name(&self) -> &'static str {
        "Switch"
    }

    fn declaration(&self, builder: &mut DeclarationBuilder) {
        builder
            .fixed_input("condition", "Condition", TypeTag::boolean())
            .fixed_input("true", "True", self.data_type.clone())
            .fixed_input("false", "False", self.data_type.clone())
            .fixed_output("result", "Result", self.data_type.clone());
    }

    fn apply(&mut self, command: NodeCommand) -> Result<(), GraphError> {
        match command {
            NodeCommand::SetDataType(data_type) => {
                self.data_type = data_type;
                Ok(())
            }
            other => Err(GraphError::UnsupportedCommand {
                node_type: self.type_name(),
                command: other.name(),
            }),
        }
    }

    fn draw(&self, ui: &mut Ui, ctx: &DrawContext<'_>, commands: &mut Vec<NodeCommand>) {
        type_selection(ui, &self.data_type, ctx, commands);
    }
}

#[derive(Default)]
pub struct SwitchNodeFactory;

impl NodeFactory for SwitchNodeFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "Switch",
            "Switch",
            NodeCategory::function(),
            "Routes the true or false branch to the result by a boolean condition",
        )
    }

    fn create() -> Box<dyn FunctionNode> {
        Box::new(SwitchNode::new())
    }
}
