//! @ai:module:intent Walk a source file once, pairing answer comments with the code before them
//! @ai:module:layer application
//! @ai:module:public_api CodeScanner
//! @ai:module:depends_on grammar, extract, classify, annotation, error
//! @ai:module:stateless true

use crate::annotation::{AnswerComment, ScanOutput, ScanResult, TaskAnnotationMap};
use crate::classify::{parse_block_annotation, parse_inline_annotation};
use crate::error::{Error, Result};
use crate::extract::delimit_block_span;
use crate::grammar::CommentGrammar;

/// @ai:intent Mutable state owned by one scan and lent to the comment handlers
#[derive(Debug, Default)]
struct ScanState {
    current_code: Vec<String>,
    cleaned: Option<Vec<String>>,
    annotations: TaskAnnotationMap,
}

impl ScanState {
    fn new(strip_comments: bool) -> Self {
        Self {
            cleaned: strip_comments.then(Vec::new),
            ..Default::default()
        }
    }

    /// @ai:intent Attribute the pending code to an answer and start a fresh buffer
    fn record(&mut self, answer: AnswerComment) {
        let code = self.current_code.join("\n");
        self.current_code.clear();
        self.annotations.record(answer.with_code(code));
    }

    fn push_code(&mut self, raw: &str) {
        self.current_code.push(raw.trim().to_string());
        if let Some(cleaned) = &mut self.cleaned {
            cleaned.push(raw.to_string());
        }
    }
}

/// @ai:intent Scans source lines against a comment grammar
#[derive(Debug, Clone, Copy)]
pub struct CodeScanner<'g> {
    grammar: &'g CommentGrammar,
}

impl<'g> CodeScanner<'g> {
    pub fn new(grammar: &'g CommentGrammar) -> Self {
        Self { grammar }
    }

    pub fn grammar(&self) -> &'g CommentGrammar {
        self.grammar
    }

    /// @ai:intent Scan a whole source text split into lines
    /// @ai:effects pure
    pub fn scan_source(&self, source: &str, strip_comments: bool) -> Result<ScanOutput> {
        let lines: Vec<&str> = source.lines().collect();
        self.scan(&lines, strip_comments)
    }

    /// @ai:intent Single forward pass producing annotations or the verbatim source
    /// @ai:post Verbatim holds the lines joined by newlines when no answer was found
    /// @ai:post cleaned_source is Some exactly when strip_comments is set
    /// @ai:edge_cases a file of only comments yields annotations with empty code
    /// @ai:effects pure
    pub fn scan<S: AsRef<str>>(&self, lines: &[S], strip_comments: bool) -> Result<ScanOutput> {
        let mut state = ScanState::new(strip_comments);
        let mut cursor = 0;

        while cursor < lines.len() {
            let raw = lines[cursor].as_ref();
            let trimmed = raw.trim();

            if self.grammar.is_block_start(trimmed) {
                cursor = self.handle_block(lines, cursor, &mut state)?;
                continue;
            }

            if self.grammar.is_inline_start(trimmed) {
                if let Some(answer) = parse_inline_annotation(self.grammar, trimmed) {
                    state.record(answer);
                }
            } else {
                state.push_code(raw);
            }

            cursor += 1;
        }

        Ok(finish(lines, state))
    }

    /// @ai:intent Classify the block opened at `open` and return the cursor past its terminator
    fn handle_block<S: AsRef<str>>(
        &self,
        lines: &[S],
        open: usize,
        state: &mut ScanState,
    ) -> Result<usize> {
        let (content, end) = delimit_block_span(self.grammar, lines, open + 1);

        let answer = parse_block_annotation(self.grammar, &content).map_err(|source| {
            Error::Comment {
                line: open + 1,
                source,
            }
        })?;

        if let Some(answer) = answer {
            state.record(answer);
        }

        Ok(end + 1)
    }
}

fn finish<S: AsRef<str>>(lines: &[S], state: ScanState) -> ScanOutput {
    let cleaned_source = state.cleaned.map(|cleaned| cleaned.join("\n"));

    let result = if state.annotations.is_empty() {
        let verbatim: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();
        ScanResult::Verbatim(verbatim.join("\n"))
    } else {
        if !state.current_code.is_empty() {
            tracing::debug!(
                "{} trailing code lines follow the last answer",
                state.current_code.len()
            );
        }
        ScanResult::Annotated(state.annotations)
    };

    ScanOutput {
        result,
        cleaned_source,
    }
}
