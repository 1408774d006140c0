//! @ai:module:intent Build per-task contexts from task filenames and scanned sources
//! @ai:module:layer application
//! @ai:module:public_api TaskKind, TaskName, TaskContext, TaskContexts, TaskContextBuilder, build_task_contexts
//! @ai:module:depends_on scanner, annotation, error
//! @ai:module:stateless true

use crate::annotation::ScanResult;
use crate::error::{Error, Result};
use crate::grammar::CommentGrammar;
use crate::scanner::CodeScanner;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Leading letter of the code token that marks a lab task.
const LAB_MARKER: char = 'l';

/// @ai:intent Category of a task, taken from the first letter of its filename
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Lab,
    Extra,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Lab => "lab",
            TaskKind::Extra => "extra",
        }
    }

    /// @ai:intent Heading used when rendering the kind
    pub fn title(&self) -> &'static str {
        match self {
            TaskKind::Lab => "Lab",
            TaskKind::Extra => "Extra",
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Metadata parsed from a `<code><number>-<topic>-<name>` filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskName {
    pub kind: TaskKind,
    pub number: String,
    pub order: u64,
    pub topic: String,
    pub name: String,
}

impl TaskName {
    /// @ai:intent Parse a task filename, with or without extension
    /// @ai:example ("l02-loops_and_arrays-fizzbuzz.cpp") -> Lab, "02", "Loops And Arrays", "Fizzbuzz"
    /// @ai:edge_cases anything other than exactly three hyphen-separated parts is an error
    /// @ai:effects pure
    pub fn parse(file_name: &str) -> Result<Self> {
        let invalid = || Error::FilenameFormat(file_name.to_string());

        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(invalid)?;

        let parts: Vec<&str> = stem.split('-').collect();
        let [code, topic, name] = parts.as_slice() else {
            return Err(invalid());
        };

        let mut chars = code.chars();
        let marker = chars.next().ok_or_else(invalid)?;
        let number = chars.as_str();
        let order = number.parse::<u64>().map_err(|_| invalid())?;

        let kind = if marker.eq_ignore_ascii_case(&LAB_MARKER) {
            TaskKind::Lab
        } else {
            TaskKind::Extra
        };

        Ok(Self {
            kind,
            number: number.to_string(),
            order,
            topic: title_case(&topic.replace('_', " ")),
            name: title_case(&name.replace('_', " ")),
        })
    }
}

/// @ai:intent Capitalise the first letter of every word and lowercase the rest
/// @ai:example ("loops and arrays") -> "Loops And Arrays"
/// @ai:effects pure
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_letter = false;

    for c in text.chars() {
        if previous_is_letter {
            result.extend(c.to_lowercase());
        } else {
            result.extend(c.to_uppercase());
        }
        previous_is_letter = c.is_alphabetic();
    }

    result
}

/// @ai:intent One task file ready for rendering
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TaskContext {
    #[serde(rename = "type")]
    pub kind: TaskKind,
    pub number: String,
    #[serde(skip)]
    pub order: u64,
    pub topic: String,
    pub name: String,
    pub code: ScanResult,
}

/// @ai:intent Task contexts grouped by kind, each group keyed by task number
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TaskContexts {
    groups: BTreeMap<TaskKind, IndexMap<String, TaskContext>>,
}

impl TaskContexts {
    pub fn group(&self, kind: TaskKind) -> Option<&IndexMap<String, TaskContext>> {
        self.groups.get(&kind)
    }

    /// @ai:intent Tasks of one kind in number order
    pub fn tasks(&self, kind: TaskKind) -> impl Iterator<Item = &TaskContext> {
        self.groups.get(&kind).into_iter().flat_map(|group| group.values())
    }

    /// @ai:intent Every task, labs first
    pub fn iter(&self) -> impl Iterator<Item = &TaskContext> {
        self.groups.values().flat_map(|group| group.values())
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&mut self, context: TaskContext) -> Result<()> {
        let group = self.groups.entry(context.kind).or_default();
        if group.contains_key(&context.number) {
            return Err(Error::DuplicateTask {
                kind: context.kind.to_string(),
                number: context.number,
            });
        }

        group.insert(context.number.clone(), context);
        Ok(())
    }

    fn sort(&mut self) {
        for group in self.groups.values_mut() {
            group.sort_by(|ka, a, kb, b| a.order.cmp(&b.order).then_with(|| ka.cmp(kb)));
        }
    }
}

/// @ai:intent Accumulates task contexts file by file so callers can skip failures
pub struct TaskContextBuilder<'g> {
    scanner: CodeScanner<'g>,
    contexts: TaskContexts,
}

impl<'g> TaskContextBuilder<'g> {
    pub fn new(grammar: &'g CommentGrammar) -> Self {
        Self {
            scanner: CodeScanner::new(grammar),
            contexts: TaskContexts::default(),
        }
    }

    /// @ai:intent Parse the filename, scan the source and add the task
    /// @ai:post on error the builder is unchanged
    /// @ai:effects pure
    pub fn add_file(&mut self, file_name: &str, source: &str) -> Result<()> {
        let task = TaskName::parse(file_name)?;
        let output = self.scanner.scan_source(source, false)?;

        tracing::debug!(
            "Task {} {} ({}): annotated = {}",
            task.kind,
            task.number,
            file_name,
            output.result.is_annotated()
        );

        self.contexts.insert(TaskContext {
            kind: task.kind,
            number: task.number,
            order: task.order,
            topic: task.topic,
            name: task.name,
            code: output.result,
        })
    }

    /// @ai:intent Emit every group sorted by numeric task number
    pub fn finish(mut self) -> TaskContexts {
        self.contexts.sort();
        self.contexts
    }
}

/// @ai:intent Build contexts for every file, failing on the first bad file
/// @ai:effects pure
pub fn build_task_contexts<'a, I>(grammar: &CommentGrammar, files: I) -> Result<TaskContexts>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut builder = TaskContextBuilder::new(grammar);
    for (file_name, source) in files {
        builder.add_file(file_name, source)?;
    }
    Ok(builder.finish())
}
