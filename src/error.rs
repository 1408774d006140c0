//! @ai:module:intent Define error types for the logbook generator
//! @ai:module:layer domain
//! @ai:module:public_api Error, MalformedComment, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Why a block comment could not be classified
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedComment {
    #[error("block comment has no content")]
    Empty,

    #[error("answer comment has no task identifier")]
    MissingTaskId,
}

/// @ai:intent Unified error type for all logbook generator operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed comment at line {line}: {source}")]
    Comment {
        line: usize,
        #[source]
        source: MalformedComment,
    },

    #[error("Invalid task filename `{0}`: expected <code><number>-<topic>-<name>")]
    FilenameFormat(String),

    #[error("Duplicate {kind} task number {number}")]
    DuplicateTask { kind: String, number: String },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Render error: {0}")]
    Render(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
