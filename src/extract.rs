//! @ai:module:intent Delimit block comments and pull fenced examples out of them
//! @ai:module:layer application
//! @ai:module:public_api delimit_block_span, extract_fenced_example
//! @ai:module:depends_on grammar
//! @ai:module:stateless true

use crate::grammar::CommentGrammar;

/// @ai:intent Collect the interior lines of a block comment
/// @ai:pre start is the index just after the block-start line
/// @ai:post end is the index of the terminator line, or lines.len() when unterminated
/// @ai:edge_cases an unterminated block runs to end of input instead of failing
/// @ai:effects pure
pub fn delimit_block_span<S: AsRef<str>>(
    grammar: &CommentGrammar,
    lines: &[S],
    start: usize,
) -> (Vec<String>, usize) {
    let mut content = Vec::new();
    let mut cursor = start;

    while cursor < lines.len() {
        let line = lines[cursor].as_ref().trim();
        if line == grammar.comment_end() {
            return (content, cursor);
        }

        content.push(strip_block_middle(grammar, line).to_string());
        cursor += 1;
    }

    tracing::debug!("Block comment opened before line {} is unterminated", start);
    (content, cursor)
}

/// @ai:intent Remove the interior marker and the single space that follows it
/// @ai:example ("* text") -> "text"
/// @ai:example ("*     indented") -> "    indented"
/// @ai:effects pure
fn strip_block_middle<'a>(grammar: &CommentGrammar, line: &'a str) -> &'a str {
    let stripped = line.trim_start_matches(grammar.block_middle());
    stripped.strip_prefix(' ').unwrap_or(stripped)
}

/// @ai:intent Copy the lines of a fenced example verbatim
/// @ai:pre start points at the opening fence line
/// @ai:post returned cursor points at the closing fence, or past the end
/// @ai:effects pure
pub fn extract_fenced_example(
    grammar: &CommentGrammar,
    comment_lines: &[String],
    start: usize,
) -> (String, usize) {
    let mut example = String::new();
    let mut cursor = start + 1;

    while cursor < comment_lines.len() {
        let line = &comment_lines[cursor];
        if grammar.is_fence(line) {
            break;
        }

        example.push_str(line);
        example.push('\n');
        cursor += 1;
    }

    tracing::debug!("Extracted fenced example: {:?}", example);
    (example, cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_delimit_stops_at_terminator() {
        let grammar = CommentGrammar::default();
        let lines = ["/**", " * ANSWER (1.1)", " * Text", " */", "int x;"];

        let (content, end) = delimit_block_span(&grammar, &lines, 1);

        assert_eq!(content, owned(&["ANSWER (1.1)", "Text"]));
        assert_eq!(end, 3);
    }

    #[test]
    fn test_delimit_unterminated_runs_to_end() {
        let grammar = CommentGrammar::default();
        let lines = ["/**", " * never closed", "int x;"];

        let (content, end) = delimit_block_span(&grammar, &lines, 1);

        assert_eq!(content, owned(&["never closed", "int x;"]));
        assert_eq!(end, lines.len());
    }

    #[test]
    fn test_delimit_immediately_closed() {
        let grammar = CommentGrammar::default();
        let lines = ["/**", "   */"];

        let (content, end) = delimit_block_span(&grammar, &lines, 1);

        assert!(content.is_empty());
        assert_eq!(end, 1);
    }

    #[test]
    fn test_delimit_keeps_relative_indentation() {
        let grammar = CommentGrammar::default();
        let lines = ["/**", " *     nested();", " */"];

        let (content, _) = delimit_block_span(&grammar, &lines, 1);

        assert_eq!(content, owned(&["    nested();"]));
    }

    #[test]
    fn test_fenced_example_excludes_fences() {
        let grammar = CommentGrammar::default();
        let lines = owned(&["intro", "```", "int x = 5;", "x++;", "```", "after"]);

        let (example, cursor) = extract_fenced_example(&grammar, &lines, 1);

        assert_eq!(example, "int x = 5;\nx++;\n");
        assert_eq!(cursor, 4);
    }

    #[test]
    fn test_fenced_example_unclosed() {
        let grammar = CommentGrammar::default();
        let lines = owned(&["```cpp", "int y;"]);

        let (example, cursor) = extract_fenced_example(&grammar, &lines, 0);

        assert_eq!(example, "int y;\n");
        assert_eq!(cursor, 2);
    }
}
