//! @ai:module:intent Assemble the logbook and coursework contexts handed to a renderer
//! @ai:module:layer application
//! @ai:module:public_api WeekContext, LogbookContext, CourseworkFile, CourseworkContext, build_week_contexts, build_logbook_context, build_coursework_context
//! @ai:module:depends_on task, scanner, config, files
//! @ai:module:stateless true

use crate::annotation::ScanResult;
use crate::config::{LogbookConfig, Reference};
use crate::error::Result;
use crate::files::{InputDirectory, WeekSources};
use crate::grammar::CommentGrammar;
use crate::scanner::CodeScanner;
use crate::task::{TaskContextBuilder, TaskContexts};
use chrono::{Duration, NaiveDate};
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct WeekContext {
    pub number: u32,
    pub date: NaiveDate,
    pub reflection: String,
    pub tasks: TaskContexts,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogbookContext {
    pub cover: LogbookConfig,
    pub weeks: Vec<WeekContext>,
    pub references: Vec<Reference>,
}

/// @ai:intent One coursework file with its answers and comment-free code
#[derive(Debug, Clone, Serialize)]
pub struct CourseworkFile {
    pub file_name: String,
    pub tasks: ScanResult,
    pub code: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CourseworkContext {
    pub files: Vec<CourseworkFile>,
}

/// @ai:intent First day of a teaching week, counting weeks from 1
/// @ai:example (2024-09-23, 3) -> 2024-10-07
/// @ai:effects pure
pub fn week_start(start: NaiveDate, number: u32) -> NaiveDate {
    start + Duration::weeks(i64::from(number.saturating_sub(1)))
}

/// @ai:intent Build one context per week, skipping files that fail to parse
/// @ai:post weeks are numbered 1..n in input order
/// @ai:effects pure
pub fn build_week_contexts(
    grammar: &CommentGrammar,
    weeks: &[WeekSources],
    start: NaiveDate,
) -> Vec<WeekContext> {
    weeks
        .iter()
        .zip(1u32..)
        .map(|(week, number)| {
            let mut builder = TaskContextBuilder::new(grammar);

            for (file_name, source) in &week.sources {
                if let Err(e) = builder.add_file(file_name, source) {
                    tracing::warn!(
                        "Skipping {} in week {}: {}",
                        file_name,
                        number,
                        e
                    );
                }
            }

            let tasks = builder.finish();
            tracing::debug!("Week {} has {} tasks", number, tasks.len());

            WeekContext {
                number,
                date: week_start(start, number),
                reflection: week.reflection.trim().to_string(),
                tasks,
            }
        })
        .collect()
}

/// @ai:intent Combine cover config, weeks and references
/// @ai:effects pure
pub fn build_logbook_context(
    grammar: &CommentGrammar,
    config: &LogbookConfig,
    input: &InputDirectory,
) -> LogbookContext {
    LogbookContext {
        cover: config.clone(),
        weeks: build_week_contexts(grammar, &input.weeks, config.university.start),
        references: input.references.clone(),
    }
}

/// @ai:intent Scan coursework files with comment stripping enabled
/// @ai:post fails on the first malformed file
/// @ai:effects pure
pub fn build_coursework_context(
    grammar: &CommentGrammar,
    files: &IndexMap<String, String>,
) -> Result<CourseworkContext> {
    let scanner = CodeScanner::new(grammar);
    let mut context = CourseworkContext::default();

    for (file_name, source) in files {
        let output = scanner.scan_source(source, true)?;
        tracing::debug!("Stripped comments from coursework file {}", file_name);

        context.files.push(CourseworkFile {
            file_name: file_name.clone(),
            tasks: output.result,
            code: output.cleaned_source.unwrap_or_default(),
        });
    }

    Ok(context)
}
