//! Standard node types
//!
//! Schemas of the built-in node types the editor knows about

mod core;
mod http;
mod mysql;
mod twilio;

pub use crate::core::{no_op, start, NO_OP, START};
pub use http::{http_request, HTTP_REQUEST};
pub use mysql::{mysql, MYSQL};
pub use twilio::{twilio, TWILIO};

use floweditor::NodeTypeRegistry;

/// Register all standard node types with a registry
pub fn register_all(registry: &mut NodeTypeRegistry) {
    registry.register(start());
    registry.register(no_op());
    registry.register(http_request());
    registry.register(mysql());
    registry.register(twilio());
}

/// A registry holding only the standard node types
pub fn registry() -> NodeTypeRegistry {
    let mut registry = NodeTypeRegistry::new();
    register_all(&mut registry);
    registry
}
