//! @ai:module:intent Load the logbook cover configuration and the references list
//! @ai:module:layer infrastructure
//! @ai:module:public_api LogbookConfig, ModuleInfo, Statement, Student, University, Reference, load_config, load_references
//! @ai:module:depends_on error
//! @ai:module:stateless true

use crate::error::{Error, Result};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// @ai:intent Cover page details read from config.yaml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogbookConfig {
    pub module: ModuleInfo,
    pub statement: Statement,
    pub student: Student,
    pub university: University,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModuleInfo {
    pub code: String,
    pub name: String,
    pub semester: String,
    #[serde(deserialize_with = "scalar_string")]
    pub year: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Statement {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Student {
    #[serde(deserialize_with = "scalar_string")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct University {
    pub department: String,
    pub name: String,
    /// First day of the first teaching week.
    pub start: NaiveDate,
}

/// @ai:intent One bibliography entry with its fields in file order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Reference {
    fields: IndexMap<String, serde_yaml::Value>,
}

impl Reference {
    /// @ai:intent Read a scalar field as text
    /// @ai:effects pure
    pub fn field(&self, key: &str) -> Option<String> {
        self.fields.get(key).and_then(scalar_to_string)
    }

    /// @ai:intent All scalar fields as text, in file order
    pub fn fields(&self) -> impl Iterator<Item = (&str, String)> {
        self.fields
            .iter()
            .filter_map(|(key, value)| scalar_to_string(value).map(|v| (key.as_str(), v)))
    }
}

#[derive(Debug, Deserialize)]
struct ReferencesFile {
    #[serde(default)]
    references: Vec<Reference>,
}

/// @ai:intent Parse config.yaml content
/// @ai:effects pure
pub fn parse_config(content: &str) -> Result<LogbookConfig> {
    Ok(serde_yaml::from_str(content)?)
}

/// @ai:intent Load config.yaml from disk
/// @ai:effects fs:read
pub fn load_config(path: &Path) -> Result<LogbookConfig> {
    tracing::debug!("Loading config from {}", path.display());
    parse_config(&read(path)?)
}

/// @ai:intent Parse references.yaml content
/// @ai:effects pure
pub fn parse_references(content: &str) -> Result<Vec<Reference>> {
    let file: ReferencesFile = serde_yaml::from_str(content)?;
    Ok(file.references)
}

/// @ai:intent Load references.yaml from disk
/// @ai:effects fs:read
pub fn load_references(path: &Path) -> Result<Vec<Reference>> {
    tracing::debug!("Loading references from {}", path.display());
    let references = parse_references(&read(path)?)?;
    tracing::debug!("Loaded {} references", references.len());
    Ok(references)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// YAML types `year: 2024` and `id: 12345678` as numbers.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Integer(i64),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Integer(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = "---
module:
    code: CS1010
    name: Programming in C++
    semester: Autumn
    year: 2024
statement:
    text: This is my own work.
student:
    id: 12345678
    name: Ada Lovelace
university:
    department: Computer Science
    name: Example University
    start: 2024-09-23
";

    #[test]
    fn test_parse_config() {
        let config = parse_config(CONFIG).unwrap();

        assert_eq!(config.module.code, "CS1010");
        assert_eq!(config.module.year, "2024");
        assert_eq!(config.student.id, "12345678");
        assert_eq!(
            config.university.start,
            NaiveDate::from_ymd_opt(2024, 9, 23).unwrap()
        );
    }

    #[test]
    fn test_parse_config_rejects_bad_date() {
        let bad = CONFIG.replace("2024-09-23", "23/09/2024");
        assert!(matches!(parse_config(&bad), Err(Error::Yaml(_))));
    }

    #[test]
    fn test_parse_references_keeps_order() {
        let refs = parse_references(
            "references:
  - author: Stroustrup, B.
    title: The C++ Programming Language
    year: 2013
  - title: cppreference
    url: https://en.cppreference.com
",
        )
        .unwrap();

        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].field("year").as_deref(), Some("2013"));
        let keys: Vec<&str> = refs[0].fields().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["author", "title", "year"]);
        assert_eq!(refs[1].field("author"), None);
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/config.yaml")).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}
