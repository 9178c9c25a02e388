use flowcore::{
    CredentialDescription, DisplayOptions, NodeProperty, NodeTypeSchema, PropertyType,
};

pub const HTTP_REQUEST: &str = "httpRequest";

/// HTTP request node; which credential it uses depends on `authentication`
pub fn http_request() -> NodeTypeSchema {
    let mut schema = NodeTypeSchema::new(HTTP_REQUEST)
        .with_default_color("#2200DD")
        .with_credential(
            CredentialDescription::new("httpBasicAuth")
                .required()
                .with_display_options(DisplayOptions::new().show("authentication", ["basicAuth"])),
        )
        .with_credential(
            CredentialDescription::new("httpHeaderAuth")
                .required()
                .with_display_options(DisplayOptions::new().show("authentication", ["headerAuth"])),
        )
        .with_property(
            NodeProperty::options("authentication", ["none", "basicAuth", "headerAuth"], "none")
                .with_display_name("Authentication"),
        )
        .with_property(
            NodeProperty::options("requestMethod", ["GET", "POST", "PUT", "DELETE", "HEAD"], "GET")
                .with_display_name("Request Method"),
        )
        .with_property(NodeProperty::string("url").with_display_name("URL").required())
        .with_property(
            NodeProperty::new("jsonParameters", PropertyType::Boolean, false)
                .with_display_name("JSON Parameters"),
        )
        .with_property(
            NodeProperty::new("bodyParametersJson", PropertyType::Json, "")
                .with_display_name("Body Parameters")
                .with_display_options(
                    DisplayOptions::new()
                        .show("jsonParameters", [true])
                        .hide("requestMethod", ["GET", "HEAD"]),
                ),
        )
        .with_property(
            NodeProperty::collection(
                "options",
                vec![
                    NodeProperty::new("timeout", PropertyType::Number, 10000)
                        .with_display_name("Timeout"),
                    NodeProperty::boolean("fullResponse", false).with_display_name("Full Response"),
                ],
            )
            .with_display_name("Options"),
        );

    schema.display_name = "HTTP Request".to_string();
    schema.description = "Makes a HTTP request and returns the received data".to_string();
    schema.defaults.name = "HTTP Request".to_string();
    schema
}
