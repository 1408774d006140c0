//! @ai:module:intent Decide whether a comment is an answer and parse its task id and text
//! @ai:module:layer application
//! @ai:module:public_api parse_inline_annotation, parse_block_annotation, normalize_task_id
//! @ai:module:depends_on grammar, extract, annotation, error
//! @ai:module:stateless true

use crate::annotation::AnswerComment;
use crate::error::MalformedComment;
use crate::extract::extract_fenced_example;
use crate::grammar::CommentGrammar;

/// @ai:intent Parse a single-line answer comment
/// @ai:pre line starts with the inline comment marker once trimmed
/// @ai:post None for ordinary comments that do not follow the answer grammar
/// @ai:example ("/* ANSWER (lab 3.2): explanation") -> Some(task_id = "lab_3_2")
/// @ai:effects pure
pub fn parse_inline_annotation(grammar: &CommentGrammar, line: &str) -> Option<AnswerComment> {
    let trimmed = line.trim();
    let body = trimmed.strip_prefix(grammar.inline_start()).unwrap_or(trimmed);
    let body = body.trim();
    let body = body.strip_suffix(grammar.comment_end()).unwrap_or(body).trim();

    let captures = grammar.inline_answer().captures(body)?;
    let task_id = format!("{}_{}_{}", &captures[1], &captures[2], &captures[3]);
    let comment_text = captures[4].trim().to_string();

    tracing::debug!("Inline answer for task {}: {}", task_id, comment_text);
    Some(AnswerComment {
        task_id,
        comment_text,
    })
}

/// @ai:intent Parse the de-indented lines of a completed block comment
/// @ai:pre comment_lines have the interior marker already stripped
/// @ai:post Ok(None) when the first line is not an answer heading
/// @ai:edge_cases an empty block is malformed, not a non-answer comment
/// @ai:effects pure
pub fn parse_block_annotation(
    grammar: &CommentGrammar,
    comment_lines: &[String],
) -> Result<Option<AnswerComment>, MalformedComment> {
    let heading = comment_lines
        .first()
        .ok_or(MalformedComment::Empty)?
        .trim();

    let rest = match heading.strip_prefix(grammar.answer_keyword()) {
        Some(rest) if !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_') => rest,
        _ => {
            tracing::debug!("Ignoring non-answer block comment: {}", heading);
            return Ok(None);
        }
    };

    let task_id = normalize_task_id(extract_task_id(grammar, rest));
    if task_id.is_empty() {
        return Err(MalformedComment::MissingTaskId);
    }

    let comment_text = assemble_comment_text(grammar, comment_lines);

    tracing::debug!("Block answer for task {}: {}", task_id, comment_text);
    Ok(Some(AnswerComment {
        task_id,
        comment_text,
    }))
}

/// @ai:intent Pull the raw identifier out of the text following the answer keyword
/// @ai:example (" (4.1)") -> "4.1"
/// @ai:example (" (Task 4.1):") -> "Task 4.1"
/// @ai:effects pure
fn extract_task_id<'a>(grammar: &CommentGrammar, rest: &'a str) -> &'a str {
    let (open, close) = grammar.id_delimiters();
    let rest = rest.trim();

    if let Some(inner) = rest.strip_prefix(open) {
        if let Some(end) = inner.find(close) {
            return inner[..end].trim();
        }
    }

    rest.trim_matches(|c: char| c == open || c == close || c == ':' || c.is_whitespace())
}

/// @ai:intent Turn a raw identifier into a key with spaces and periods replaced
/// @ai:example ("4.1") -> "4_1"
/// @ai:example ("lab 3.2") -> "lab_3_2"
/// @ai:effects pure
pub fn normalize_task_id(raw: &str) -> String {
    raw.trim().replace([' ', '.'], "_")
}

/// @ai:intent Join the body lines, inlining fenced examples as literal text
/// @ai:effects pure
fn assemble_comment_text(grammar: &CommentGrammar, comment_lines: &[String]) -> String {
    let mut text = String::new();
    let mut cursor = 1;

    while cursor < comment_lines.len() {
        let line = &comment_lines[cursor];

        if grammar.is_fence(line) {
            let (example, closing) = extract_fenced_example(grammar, comment_lines, cursor);
            paragraph_break(&mut text);
            text.push_str(&example);
            text.push('\n');
            cursor = closing + 1;
            continue;
        }

        text.push_str(line.trim());
        text.push(' ');
        cursor += 1;
    }

    text.trim().to_string()
}

// Examples start on their own line, separated from the prose before them.
fn paragraph_break(text: &mut String) {
    let kept = text.trim_end_matches(' ').len();
    text.truncate(kept);
    if !text.is_empty() && !text.ends_with("\n\n") {
        text.push_str(if text.ends_with('\n') { "\n" } else { "\n\n" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn owned(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_inline_answer_task_id() {
        let grammar = CommentGrammar::default();
        let answer =
            parse_inline_annotation(&grammar, "/* ANSWER (lab 3.2): explanation").unwrap();

        assert_eq!(answer.task_id, "lab_3_2");
        assert_eq!(answer.comment_text, "explanation");
    }

    #[test]
    fn test_inline_answer_with_closing_marker() {
        let grammar = CommentGrammar::default();
        let answer =
            parse_inline_annotation(&grammar, "  /* ANSWER (extra 1.4): uses a loop */").unwrap();

        assert_eq!(answer.task_id, "extra_1_4");
        assert_eq!(answer.comment_text, "uses a loop");
    }

    #[test]
    fn test_inline_ordinary_comment_is_ignored() {
        let grammar = CommentGrammar::default();
        assert_eq!(parse_inline_annotation(&grammar, "/* just a note */"), None);
        assert_eq!(parse_inline_annotation(&grammar, "/* ANSWER (3.2): no category"), None);
    }

    #[test]
    fn test_block_answer_inlines_example() {
        let grammar = CommentGrammar::default();
        let lines = owned(&[
            "ANSWER (4.1)",
            "Explanation text.",
            "```",
            "int x = 5;",
            "```",
            "More text.",
        ]);

        let answer = parse_block_annotation(&grammar, &lines).unwrap().unwrap();

        assert_eq!(answer.task_id, "4_1");
        assert_eq!(
            answer.comment_text,
            "Explanation text.\n\nint x = 5;\n\nMore text."
        );
        assert!(!answer.comment_text.contains("```"));
    }

    #[test]
    fn test_block_answer_joins_lines_with_spaces() {
        let grammar = CommentGrammar::default();
        let lines = owned(&["ANSWER (2.3)", "The loop", "terminates early."]);

        let answer = parse_block_annotation(&grammar, &lines).unwrap().unwrap();

        assert_eq!(answer.task_id, "2_3");
        assert_eq!(answer.comment_text, "The loop terminates early.");
    }

    #[test]
    fn test_block_heading_without_parentheses() {
        let grammar = CommentGrammar::default();
        let lines = owned(&["ANSWER: 5.2", "Text"]);

        let answer = parse_block_annotation(&grammar, &lines).unwrap().unwrap();

        assert_eq!(answer.task_id, "5_2");
    }

    #[test]
    fn test_empty_block_is_malformed() {
        let grammar = CommentGrammar::default();
        assert_eq!(
            parse_block_annotation(&grammar, &[]),
            Err(MalformedComment::Empty)
        );
    }

    #[test]
    fn test_answer_without_id_is_malformed() {
        let grammar = CommentGrammar::default();
        let lines = owned(&["ANSWER ()", "Text"]);
        assert_eq!(
            parse_block_annotation(&grammar, &lines),
            Err(MalformedComment::MissingTaskId)
        );
    }

    #[test]
    fn test_non_answer_block_is_ignored() {
        let grammar = CommentGrammar::default();
        let lines = owned(&["Computes the sum.", "@return total"]);
        assert_eq!(parse_block_annotation(&grammar, &lines), Ok(None));

        let lines = owned(&["ANSWERS are below", "Text"]);
        assert_eq!(parse_block_annotation(&grammar, &lines), Ok(None));
    }

    #[test]
    fn test_custom_keyword_applies_to_both_forms() {
        let grammar = CommentGrammar::default().with_answer_keyword("SOLUTION");

        let inline = parse_inline_annotation(&grammar, "/* SOLUTION (lab 4.2): text").unwrap();
        assert_eq!(inline.task_id, "lab_4_2");
        assert_eq!(parse_inline_annotation(&grammar, "/* ANSWER (lab 4.2): text"), None);

        let block = owned(&["SOLUTION (4.3)", "Text"]);
        let answer = parse_block_annotation(&grammar, &block).unwrap().unwrap();
        assert_eq!(answer.task_id, "4_3");

        let block = owned(&["ANSWER (4.3)", "Text"]);
        assert_eq!(parse_block_annotation(&grammar, &block), Ok(None));
    }

    #[test]
    fn test_normalize_task_id() {
        assert_eq!(normalize_task_id("lab 3.2"), "lab_3_2");
        assert_eq!(normalize_task_id(" 10.1 "), "10_1");
    }
}
