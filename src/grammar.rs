//! @ai:module:intent Hold the answer-comment grammar literals in one place
//! @ai:module:layer domain
//! @ai:module:public_api CommentGrammar
//! @ai:module:stateless true

use regex::Regex;

/// @ai:intent Comment markers and answer keywords recognised by the scanner
/// @ai:invariant block_start starts with inline_start, so block detection must run first
/// @ai:invariant inline_answer is always compiled from the current answer_keyword
#[derive(Debug, Clone)]
pub struct CommentGrammar {
    answer_keyword: &'static str,
    inline_start: &'static str,
    block_start: &'static str,
    block_middle: char,
    comment_end: &'static str,
    id_delimiters: (char, char),
    fence: &'static str,
    inline_answer: Regex,
}

impl CommentGrammar {
    /// @ai:intent Build the C-style grammar used in lab sources
    /// @ai:example inline "/* ANSWER (lab 3.2): text" ; block "/**" ... "*/"
    /// @ai:effects pure
    pub fn c_style() -> Self {
        let answer_keyword = "ANSWER";

        Self {
            answer_keyword,
            inline_start: "/*",
            block_start: "/**",
            block_middle: '*',
            comment_end: "*/",
            id_delimiters: ('(', ')'),
            fence: "```",
            inline_answer: compile_inline_answer(answer_keyword),
        }
    }

    /// @ai:intent Use a different answer keyword for both inline and block comments
    /// @ai:effects pure
    pub fn with_answer_keyword(self, answer_keyword: &'static str) -> Self {
        Self {
            answer_keyword,
            inline_answer: compile_inline_answer(answer_keyword),
            ..self
        }
    }

    pub fn answer_keyword(&self) -> &'static str {
        self.answer_keyword
    }

    pub fn inline_start(&self) -> &'static str {
        self.inline_start
    }

    pub fn block_middle(&self) -> char {
        self.block_middle
    }

    pub fn comment_end(&self) -> &'static str {
        self.comment_end
    }

    /// @ai:intent Opening and closing characters around a block task id
    pub fn id_delimiters(&self) -> (char, char) {
        self.id_delimiters
    }

    /// @ai:intent Compiled inline answer pattern: keyword, (category number.subnumber), colon, text
    pub fn inline_answer(&self) -> &Regex {
        &self.inline_answer
    }

    /// @ai:intent Check whether a trimmed line opens a block comment
    pub fn is_block_start(&self, trimmed: &str) -> bool {
        trimmed.starts_with(self.block_start)
    }

    /// @ai:intent Check whether a trimmed line is an inline comment
    pub fn is_inline_start(&self, trimmed: &str) -> bool {
        trimmed.starts_with(self.inline_start)
    }

    /// @ai:intent Check whether a line opens or closes a fenced example
    pub fn is_fence(&self, line: &str) -> bool {
        line.trim_start().starts_with(self.fence)
    }
}

impl Default for CommentGrammar {
    fn default() -> Self {
        Self::c_style()
    }
}

/// The keyword is escaped, so the pattern always compiles.
fn compile_inline_answer(keyword: &str) -> Regex {
    let pattern = format!(
        r"^{} \((\w+) (\d+)\.(\d+)\):\s*(.+)$",
        regex::escape(keyword)
    );
    Regex::new(&pattern).expect("Invalid regex pattern")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_start_is_also_inline_start() {
        let grammar = CommentGrammar::default();
        assert!(grammar.is_block_start("/** doc"));
        assert!(grammar.is_inline_start("/** doc"));
        assert!(!grammar.is_block_start("/* note"));
    }

    #[test]
    fn test_inline_pattern_captures() {
        let grammar = CommentGrammar::default();
        let caps = grammar
            .inline_answer()
            .captures("ANSWER (lab 3.2): explanation")
            .unwrap();
        assert_eq!(&caps[1], "lab");
        assert_eq!(&caps[2], "3");
        assert_eq!(&caps[3], "2");
        assert_eq!(&caps[4], "explanation");
    }

    #[test]
    fn test_inline_pattern_rejects_two_groups() {
        let grammar = CommentGrammar::default();
        assert!(!grammar.inline_answer().is_match("ANSWER (3.2): explanation"));
    }

    #[test]
    fn test_custom_keyword_recompiles_inline_pattern() {
        let grammar = CommentGrammar::default().with_answer_keyword("SOLUTION");
        assert_eq!(grammar.answer_keyword(), "SOLUTION");
        assert!(grammar.inline_answer().is_match("SOLUTION (lab 1.1): text"));
        assert!(!grammar.inline_answer().is_match("ANSWER (lab 1.1): text"));
    }
}
