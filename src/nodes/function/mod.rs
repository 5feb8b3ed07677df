//! Function node implementations

pub mod select;
pub mod switch;

pub use select::{SelectNode, SelectNodeFactory};
pub use switch::{SwitchNode, SwitchNodeFactory};
