//! @ai:module:intent Format scan results and task contexts for the terminal (JSON, text)
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_scan_output, format_task_contexts, to_json
//! @ai:module:depends_on annotation, task
//! @ai:module:stateless true

use crate::annotation::{ScanOutput, ScanResult, TaskAnnotationMap};
use crate::task::TaskContexts;
use colored::Colorize;
use serde::Serialize;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent Format the result of scanning one file
/// @ai:effects pure
pub fn format_scan_output(output: &ScanOutput, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(output, false),
        OutputFormat::JsonPretty => to_json(output, true),
        OutputFormat::Text => format_scan_output_text(output),
    }
}

/// @ai:intent Format a scan result as human-readable text
/// @ai:effects pure
fn format_scan_output_text(output: &ScanOutput) -> String {
    let mut text = match &output.result {
        ScanResult::Annotated(map) => format_annotations_text(map),
        ScanResult::Verbatim(source) => format!(
            "{} ({} lines)\n",
            "No answer comments".yellow().bold(),
            source.lines().count()
        ),
    };

    if let Some(cleaned) = &output.cleaned_source {
        text.push_str(&format!("\n{}\n{}\n", "Cleaned source:".bold(), cleaned));
    }

    text
}

fn format_annotations_text(map: &TaskAnnotationMap) -> String {
    let mut output = String::new();

    for (task_id, annotations) in map.iter() {
        output.push_str(&format!("{}\n", task_id.cyan().bold()));

        for annotation in annotations {
            output.push_str(&format!("  {} {}\n", "answer:".green(), annotation.comment_text));

            if annotation.associated_code.is_empty() {
                output.push_str(&format!("  {}\n", "(no code)".dimmed()));
            }
            for line in annotation.associated_code.lines() {
                output.push_str(&format!("  {} {}\n", "|".dimmed(), line));
            }
        }
    }

    output.push_str(&format!(
        "\n{} {} tasks, {} answers\n",
        "OK".green().bold(),
        map.len(),
        map.annotations().count()
    ));

    output
}

/// @ai:intent Format task contexts built from a directory
/// @ai:effects pure
pub fn format_task_contexts(contexts: &TaskContexts, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(contexts, false),
        OutputFormat::JsonPretty => to_json(contexts, true),
        OutputFormat::Text => format_task_contexts_text(contexts),
    }
}

fn format_task_contexts_text(contexts: &TaskContexts) -> String {
    let mut output = String::new();

    for task in contexts.iter() {
        let answers = match &task.code {
            ScanResult::Annotated(map) => format!("{} answers", map.annotations().count()),
            ScanResult::Verbatim(_) => "verbatim".dimmed().to_string(),
        };

        output.push_str(&format!(
            "{} {}: {}, {} ({})\n",
            task.kind.title().cyan(),
            task.number.bold(),
            task.topic,
            task.name,
            answers
        ));
    }

    output.push_str(&format!("\n{} tasks\n", contexts.len()));
    output
}

/// @ai:intent Format any serializable value as JSON
/// @ai:effects pure
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(value).unwrap_or_default()
    } else {
        serde_json::to_string(value).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::CommentGrammar;
    use crate::scanner::CodeScanner;

    #[test]
    fn test_scan_output_json() {
        let grammar = CommentGrammar::default();
        let output = CodeScanner::new(&grammar)
            .scan_source("int x;\n/* ANSWER (lab 1.1): declares x", false)
            .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&format_scan_output(&output, OutputFormat::Json)).unwrap();

        assert_eq!(json["result"]["lab_1_1"][0]["associated_code"], "int x;");
        assert!(json.get("cleaned_source").is_none());
    }

    #[test]
    fn test_scan_output_text_lists_tasks() {
        colored::control::set_override(false);
        let grammar = CommentGrammar::default();
        let output = CodeScanner::new(&grammar)
            .scan_source("/* ANSWER (lab 1.1): nothing yet", true)
            .unwrap();

        let text = format_scan_output(&output, OutputFormat::Text);

        assert!(text.contains("lab_1_1"));
        assert!(text.contains("answer: nothing yet"));
        assert!(text.contains("(no code)"));
        assert!(text.contains("1 tasks, 1 answers"));
    }
}
