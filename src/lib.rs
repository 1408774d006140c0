//! @ai:module:intent Logbook generator library: answer-comment parsing and document assembly
//! @ai:module:layer infrastructure
//! @ai:module:public_api annotation, classify, config, context, error, extract, files, grammar, output, render, scanner, task
//! @ai:module:stateless true
//!
//! # Logbook Generator
//!
//! Extracts `ANSWER` comments from weekly lab sources, pairs each with the
//! code written before it, and renders the result into a Markdown logbook.
//! An optional coursework document carries the same code with comments removed.
//!
//! ## Example
//!
//! ```rust,no_run
//! use logbook_generator::{CodeScanner, CommentGrammar, ScanResult};
//!
//! let grammar = CommentGrammar::default();
//! let source = "int total = 0;\n/* ANSWER (lab 1.1): starts the running sum";
//! let output = CodeScanner::new(&grammar).scan_source(source, false).unwrap();
//!
//! if let ScanResult::Annotated(tasks) = output.result {
//!     for (task_id, answers) in tasks.iter() {
//!         println!("{task_id}: {} answers", answers.len());
//!     }
//! }
//! ```

pub mod annotation;
pub mod classify;
pub mod config;
pub mod context;
pub mod error;
pub mod extract;
pub mod files;
pub mod grammar;
pub mod output;
pub mod render;
pub mod scanner;
pub mod task;

pub use annotation::{AnswerComment, Annotation, ScanOutput, ScanResult, TaskAnnotationMap};
pub use classify::{parse_block_annotation, parse_inline_annotation};
pub use config::{load_config, load_references, LogbookConfig, Reference};
pub use context::{
    build_coursework_context, build_logbook_context, CourseworkContext, LogbookContext,
    WeekContext,
};
pub use error::{Error, MalformedComment, Result};
pub use extract::{delimit_block_span, extract_fenced_example};
pub use files::{read_input_directory, save_file, InputDirectory};
pub use grammar::CommentGrammar;
pub use output::{format_scan_output, format_task_contexts, to_json, OutputFormat};
pub use render::{MarkdownRenderer, Renderer};
pub use scanner::CodeScanner;
pub use task::{build_task_contexts, TaskContext, TaskContextBuilder, TaskContexts, TaskKind};
