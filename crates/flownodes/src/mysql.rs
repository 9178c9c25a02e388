use flowcore::{CredentialDescription, DisplayOptions, NodeProperty, NodeTypeSchema, PropertyType};

pub const MYSQL: &str = "mysql";

fn for_operation(operation: &str) -> DisplayOptions {
    DisplayOptions::new().show("operation", [operation])
}

/// MySQL node: run a query, insert rows or update rows
pub fn mysql() -> NodeTypeSchema {
    let mut schema = NodeTypeSchema::new(MYSQL)
        .with_default_color("#4279a2")
        .with_credential(CredentialDescription::new("mysql").required())
        .with_property(
            NodeProperty::options("operation", ["executeQuery", "insert", "update"], "insert")
                .with_display_name("Operation"),
        )
        .with_property(
            NodeProperty::string("query")
                .with_display_name("Query")
                .required()
                .with_display_options(for_operation("executeQuery")),
        )
        // insert
        .with_property(
            NodeProperty::string("table")
                .with_display_name("Table")
                .required()
                .with_display_options(for_operation("insert")),
        )
        .with_property(
            NodeProperty::string("columns")
                .with_display_name("Columns")
                .with_display_options(for_operation("insert")),
        )
        // update
        .with_property(
            NodeProperty::string("table")
                .with_display_name("Table")
                .required()
                .with_display_options(for_operation("update")),
        )
        .with_property(
            NodeProperty::new("updateKey", PropertyType::String, "id")
                .with_display_name("Update Key")
                .required()
                .with_display_options(for_operation("update")),
        )
        .with_property(
            NodeProperty::string("columns")
                .with_display_name("Columns")
                .with_display_options(for_operation("update")),
        );

    schema.display_name = "MySQL".to_string();
    schema.description = "Gets, adds and updates data in MySQL".to_string();
    schema.defaults.name = "MySQL".to_string();
    schema
}
