use clue_core::{CompletionItem, CompletionResponse};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaType};
use crate::output::output;

/// Handle `clue schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema_for(args.type_name), flags.format)
}

fn schema_for(type_name: SchemaType) -> schemars::Schema {
    match type_name {
        SchemaType::CompletionResponse => schemars::schema_for!(CompletionResponse),
        SchemaType::CompletionItem => schemars::schema_for!(CompletionItem),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_response_schema_names_fields() {
        let schema = serde_json::to_value(schema_for(SchemaType::CompletionResponse))
            .expect("serialize schema");
        let properties = schema["properties"].as_object().expect("properties");
        for field in ["context", "offset", "items"] {
            assert!(properties.contains_key(field), "{field} missing");
        }
    }

    #[test]
    fn item_schema_lists_kinds() {
        let schema =
            serde_json::to_value(schema_for(SchemaType::CompletionItem)).expect("serialize schema");
        let text = schema.to_string();
        assert!(text.contains("\"method\""));
        assert!(text.contains("replace_span"));
    }
}
