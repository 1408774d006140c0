//! @ai:module:intent Define data structures for answer annotations and scan results
//! @ai:module:layer domain
//! @ai:module:public_api AnswerComment, Annotation, TaskAnnotationMap, ScanResult, ScanOutput
//! @ai:module:stateless true

use indexmap::IndexMap;
use serde::Serialize;

/// @ai:intent A recognised answer comment before any code is attached to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerComment {
    pub task_id: String,
    pub comment_text: String,
}

impl AnswerComment {
    /// @ai:intent Attach the code collected since the previous answer
    pub fn with_code(self, associated_code: String) -> Annotation {
        Annotation {
            task_id: self.task_id,
            comment_text: self.comment_text,
            associated_code,
        }
    }
}

/// @ai:intent An answer comment together with the code that precedes it
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Annotation {
    #[serde(skip)]
    pub task_id: String,
    pub comment_text: String,
    pub associated_code: String,
}

/// @ai:intent Annotations of one file grouped by task id, in file order
/// @ai:invariant every task id maps to a non-empty list
/// @ai:invariant order holds one (task index, list position) pair per annotation, in file order
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TaskAnnotationMap {
    tasks: IndexMap<String, Vec<Annotation>>,
    #[serde(skip)]
    order: Vec<(usize, usize)>,
}

impl TaskAnnotationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Append an annotation under its task id, keeping earlier ones
    pub fn record(&mut self, annotation: Annotation) {
        let entry = self.tasks.entry(annotation.task_id.clone());
        let task = entry.index();
        let list = entry.or_default();
        self.order.push((task, list.len()));
        list.push(annotation);
    }

    pub fn get(&self, task_id: &str) -> Option<&[Annotation]> {
        self.tasks.get(task_id).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Annotation])> {
        self.tasks.iter().map(|(id, list)| (id.as_str(), list.as_slice()))
    }

    /// @ai:intent Every annotation in file order, across task ids
    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.order.iter().filter_map(|&(task, position)| {
            self.tasks
                .get_index(task)
                .and_then(|(_, list)| list.get(position))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// @ai:intent Number of distinct task ids
    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

/// @ai:intent Outcome of scanning one file
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ScanResult {
    Annotated(TaskAnnotationMap),
    Verbatim(String),
}

impl ScanResult {
    pub fn is_annotated(&self) -> bool {
        matches!(self, ScanResult::Annotated(_))
    }
}

/// @ai:intent Scan result plus the comment-free source when it was requested
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScanOutput {
    pub result: ScanResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaned_source: Option<String>,
}
