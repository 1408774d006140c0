//! @ai:module:intent Read the logbook input directory and write rendered documents
//! @ai:module:layer infrastructure
//! @ai:module:public_api InputDirectory, WeekSources, read_input_directory, read_source_files, save_file
//! @ai:module:depends_on config, error

use crate::config::{load_references, Reference};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const SOURCE_EXTENSION: &str = "cpp";
pub const WEEK_PREFIX: &str = "week";
pub const REFLECTION_FILE: &str = "reflection.md";
pub const REFERENCES_FILE: &str = "references.yaml";
pub const COURSEWORK_DIR: &str = "coursework";

/// @ai:intent Raw contents of one week directory
#[derive(Debug, Clone, Default)]
pub struct WeekSources {
    pub directory: PathBuf,
    pub sources: IndexMap<String, String>,
    pub reflection: String,
}

/// @ai:intent Everything read from the input directory
#[derive(Debug, Clone, Default)]
pub struct InputDirectory {
    pub weeks: Vec<WeekSources>,
    pub references: Vec<Reference>,
    pub coursework: Option<IndexMap<String, String>>,
}

/// @ai:intent Read week directories, references and optional coursework
/// @ai:pre path is a directory containing references.yaml
/// @ai:effects fs:read
pub fn read_input_directory(path: &Path) -> Result<InputDirectory> {
    tracing::debug!("Reading input directory {}", path.display());

    let weeks = week_directories(path)?
        .into_iter()
        .map(|dir| read_week(&dir))
        .collect::<Result<Vec<_>>>()?;
    tracing::info!("Found {} weeks in {}", weeks.len(), path.display());

    let references = load_references(&path.join(REFERENCES_FILE))?;

    let coursework_dir = path.join(COURSEWORK_DIR);
    let coursework = if coursework_dir.is_dir() {
        Some(read_source_files(&coursework_dir)?)
    } else {
        None
    };

    Ok(InputDirectory {
        weeks,
        references,
        coursework,
    })
}

/// @ai:intent List week directories ordered by their trailing number
/// @ai:effects fs:read
fn week_directories(path: &Path) -> Result<Vec<PathBuf>> {
    let mut weeks: Vec<(Option<u64>, String, PathBuf)> = Vec::new();

    for entry in WalkDir::new(path).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(suffix) = name.strip_prefix(WEEK_PREFIX) {
            let number = suffix.trim_start_matches(['_', '-']).parse().ok();
            weeks.push((number, name.clone(), entry.into_path()));
        }
    }

    weeks.sort_by(|a, b| (a.0, &a.1).cmp(&(b.0, &b.1)));
    Ok(weeks.into_iter().map(|(_, _, path)| path).collect())
}

/// @ai:intent Read one week's sources and reflection
/// @ai:effects fs:read
fn read_week(dir: &Path) -> Result<WeekSources> {
    let sources = read_source_files(dir)?;

    let reflection_path = dir.join(REFLECTION_FILE);
    let reflection = if reflection_path.is_file() {
        read_file(&reflection_path)?
    } else {
        tracing::warn!("No {} in {}", REFLECTION_FILE, dir.display());
        String::new()
    };

    Ok(WeekSources {
        directory: dir.to_path_buf(),
        sources,
        reflection,
    })
}

/// @ai:intent Read every source file directly inside a directory, keyed by file name
/// @ai:post entries are ordered by file name
/// @ai:effects fs:read
pub fn read_source_files(dir: &Path) -> Result<IndexMap<String, String>> {
    let mut sources = IndexMap::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        let is_source = path
            .extension()
            .map(|ext| ext == SOURCE_EXTENSION)
            .unwrap_or(false);

        if is_source {
            let name = entry.file_name().to_string_lossy().into_owned();
            sources.insert(name, read_file(path)?);
            tracing::debug!("Read file {}", path.display());
        }
    }

    Ok(sources)
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// @ai:intent Write a document, creating parent directories first
/// @ai:effects fs:write
pub fn save_file(path: &Path, content: &str) -> Result<()> {
    let write_error = |source: std::io::Error| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    tracing::debug!("Saving file {}", path.display());
    std::fs::write(path, content).map_err(write_error)
}
