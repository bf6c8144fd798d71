use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => Ok(render_object(map)),
        scalar => Ok(table::render_rows(
            &["value"],
            &[vec![value_to_cell(&scalar)]],
            table_options(),
        )),
    }
}

/// Scalar fields as `key: value` lines, then each array field as a table.
fn render_object(map: Map<String, Value>) -> String {
    let (arrays, scalars): (Vec<_>, Vec<_>) =
        map.into_iter().partition(|(_, value)| value.is_array());

    let mut sections = Vec::new();
    if !scalars.is_empty() {
        sections.push(
            scalars
                .iter()
                .map(|(key, value)| format!("{key}: {}", value_to_cell(value)))
                .collect::<Vec<_>>()
                .join("\n"),
        );
    }
    for (_, value) in arrays {
        if let Value::Array(items) = value {
            sections.push(render_array_table(&items));
        }
    }
    sections.join("\n\n")
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_rows(&["value"], &rows, table_options());
    }

    // Column order follows the first row; later rows may add columns.
    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_rows(&header_refs, &rows, table_options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use clue_core::{CompletionItem, CompletionKind, CompletionResponse};
    use pretty_assertions::assert_eq;

    use super::render;
    use crate::cli::OutputFormat;

    fn response() -> CompletionResponse {
        CompletionResponse {
            context: "member".to_string(),
            offset: 35,
            items: vec![
                CompletionItem::new("x", CompletionKind::Field).with_detail("int"),
                CompletionItem::new("move", CompletionKind::Method)
                    .with_detail("void(struct P p)")
                    .with_insert_text("move(p$0)"),
            ],
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&response(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["context"], "member");
        assert_eq!(parsed["items"][1]["insert_text"], "move(p$0)");
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&response(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["offset"], 35);
    }

    #[test]
    fn table_render_lists_scalars_then_items() {
        let out = render(&response(), OutputFormat::Table).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "context: member");
        assert_eq!(lines[1], "offset: 35");
        assert_eq!(lines[2], "");
        for column in ["label", "kind", "detail", "insert_text"] {
            assert!(lines[3].contains(column), "{column} header missing");
        }
        assert!(out.contains("move(p$0)"));
        assert!(out.contains("void(struct P p)"));
    }

    #[test]
    fn empty_array_renders_placeholder() {
        let empty: Vec<CompletionItem> = Vec::new();
        let out = render(&empty, OutputFormat::Table).expect("table render should work");
        assert_eq!(out, "(no rows)");
    }
}
