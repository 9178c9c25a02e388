use flowcore::{CredentialDescription, DisplayOptions, NodeProperty, NodeTypeSchema};

pub const TWILIO: &str = "twilio";

fn shown_for(resource: &str, operation: &str) -> DisplayOptions {
    DisplayOptions::new()
        .show("operation", [operation])
        .show("resource", [resource])
}

/// Twilio node: send messages or place calls.
///
/// `operation`, `from`, `to` and `message` are each declared once per
/// resource; only the definition matching the current resource is displayed.
pub fn twilio() -> NodeTypeSchema {
    let mut schema = NodeTypeSchema::new(TWILIO)
        .with_default_color("#cf272d")
        .with_credential(CredentialDescription::new("twilioApi").required())
        .with_property(NodeProperty::options("resource", ["sms", "voice"], "sms").with_display_name("Resource"))
        // sms
        .with_property(
            NodeProperty::options("operation", ["send"], "send")
                .with_display_name("Operation")
                .with_display_options(DisplayOptions::new().show("resource", ["sms"])),
        )
        .with_property(
            NodeProperty::string("from")
                .with_display_name("From")
                .required()
                .with_display_options(shown_for("sms", "send")),
        )
        .with_property(
            NodeProperty::string("to")
                .with_display_name("To")
                .required()
                .with_display_options(shown_for("sms", "send")),
        )
        .with_property(
            NodeProperty::boolean("toWhatsapp", false)
                .with_display_name("To Whatsapp")
                .with_display_options(shown_for("sms", "send")),
        )
        .with_property(
            NodeProperty::string("message")
                .with_display_name("Message")
                .required()
                .with_display_options(shown_for("sms", "send")),
        )
        // voice
        .with_property(
            NodeProperty::options("operation", ["call"], "call")
                .with_display_name("Operation")
                .with_display_options(DisplayOptions::new().show("resource", ["voice"])),
        )
        .with_property(
            NodeProperty::string("from")
                .with_display_name("From")
                .required()
                .with_display_options(shown_for("voice", "call")),
        )
        .with_property(
            NodeProperty::string("to")
                .with_display_name("To")
                .required()
                .with_display_options(shown_for("voice", "call")),
        )
        .with_property(
            NodeProperty::string("message")
                .with_display_name("Message")
                .required()
                .with_display_options(shown_for("voice", "call")),
        )
        .with_property(
            NodeProperty::options("voice", ["man", "woman"], "man")
                .with_display_name("Voice")
                .required()
                .with_display_options(shown_for("voice", "call")),
        )
        .with_property(
            NodeProperty::options("lang", ["en", "en-gb", "es", "fr", "de"], "en")
                .with_display_name("Language")
                .required()
                .with_display_options(shown_for("voice", "call")),
        );

    schema.display_name = "Twilio".to_string();
    schema.description = "Send SMS and WhatsApp messages or make phone calls".to_string();
    schema.defaults.name = "Twilio".to_string();
    schema
}
