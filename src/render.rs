//! @ai:module:intent Render logbook and coursework contexts into Markdown documents
//! @ai:module:layer infrastructure
//! @ai:module:public_api Renderer, MarkdownRenderer
//! @ai:module:depends_on context, task, annotation, config
//! @ai:module:stateless true

use crate::annotation::ScanResult;
use crate::config::{LogbookConfig, Reference};
use crate::context::{CourseworkContext, LogbookContext, WeekContext};
use crate::error::Result;
use crate::task::{title_case, TaskContext, TaskKind};
use std::fmt::Write as FmtWrite;

const PAGE_BREAK: &str = "\\newpage";
const DATE_FORMAT: &str = "%d %B %Y";

/// @ai:intent Turns assembled contexts into document text
pub trait Renderer {
    /// @ai:intent Render the full logbook
    fn render_logbook(&self, context: &LogbookContext) -> Result<String>;

    /// @ai:intent Render the coursework document
    fn render_coursework(&self, context: &CourseworkContext) -> Result<String>;
}

/// @ai:intent Markdown renderer with page breaks understood by pandoc
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    code_language: String,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::with_code_language("cpp")
    }

    /// @ai:intent Use a different info string on fenced code blocks
    pub fn with_code_language(language: impl Into<String>) -> Self {
        Self {
            code_language: language.into(),
        }
    }

    fn write_code_block(&self, out: &mut String, code: &str) -> Result<()> {
        writeln!(out, "```{}", self.code_language)?;
        writeln!(out, "{}", code)?;
        writeln!(out, "```")?;
        writeln!(out)?;
        Ok(())
    }

    fn write_cover(&self, out: &mut String, cover: &LogbookConfig) -> Result<()> {
        writeln!(out, "# {}: {}", cover.module.code, cover.module.name)?;
        writeln!(out)?;
        writeln!(out, "## Logbook")?;
        writeln!(out)?;
        writeln!(out, "**Student:** {} ({})", cover.student.name, cover.student.id)?;
        writeln!(out)?;
        writeln!(
            out,
            "**Module:** {} {}, {}",
            cover.module.semester, cover.module.year, cover.module.code
        )?;
        writeln!(out)?;
        writeln!(
            out,
            "**University:** {}, {}",
            cover.university.department, cover.university.name
        )?;
        writeln!(out)?;
        writeln!(out, "{}", cover.statement.text.trim())?;
        writeln!(out)?;
        Ok(())
    }

    fn write_contents(&self, out: &mut String, weeks: &[WeekContext]) -> Result<()> {
        writeln!(out, "## Contents")?;
        writeln!(out)?;
        for week in weeks {
            writeln!(
                out,
                "- [Week {}](#week-{}) ({})",
                week.number,
                week.number,
                week.date.format(DATE_FORMAT)
            )?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn write_week(&self, out: &mut String, week: &WeekContext) -> Result<()> {
        writeln!(out, "## Week {}", week.number)?;
        writeln!(out)?;
        writeln!(out, "*Week commencing {}*", week.date.format(DATE_FORMAT))?;
        writeln!(out)?;

        for kind in [TaskKind::Lab, TaskKind::Extra] {
            let mut tasks = week.tasks.tasks(kind).peekable();
            if tasks.peek().is_none() {
                continue;
            }

            writeln!(out, "### {} Tasks", kind.title())?;
            writeln!(out)?;
            for task in tasks {
                self.write_task(out, task)?;
            }
        }

        if !week.reflection.is_empty() {
            writeln!(out, "### Reflection")?;
            writeln!(out)?;
            writeln!(out, "{}", week.reflection)?;
            writeln!(out)?;
        }

        Ok(())
    }

    fn write_task(&self, out: &mut String, task: &TaskContext) -> Result<()> {
        writeln!(
            out,
            "#### {} {}: {}, {}",
            task.kind.title(),
            task.number,
            task.topic,
            task.name
        )?;
        writeln!(out)?;

        match &task.code {
            ScanResult::Annotated(map) => {
                for (task_id, annotations) in map.iter() {
                    writeln!(out, "##### Task {}", format_task_id(task_id))?;
                    writeln!(out)?;
                    for annotation in annotations {
                        if !annotation.associated_code.trim().is_empty() {
                            self.write_code_block(out, &annotation.associated_code)?;
                        }
                        writeln!(out, "{}", annotation.comment_text)?;
                        writeln!(out)?;
                    }
                }
            }
            ScanResult::Verbatim(source) => self.write_code_block(out, source)?,
        }

        Ok(())
    }

    fn write_references(&self, out: &mut String, references: &[Reference]) -> Result<()> {
        writeln!(out, "## References")?;
        writeln!(out)?;
        for reference in references {
            writeln!(out, "- {}", format_reference(reference))?;
        }
        Ok(())
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for MarkdownRenderer {
    fn render_logbook(&self, context: &LogbookContext) -> Result<String> {
        let mut out = String::new();

        self.write_cover(&mut out, &context.cover)?;
        writeln!(out, "{}", PAGE_BREAK)?;
        writeln!(out)?;

        self.write_contents(&mut out, &context.weeks)?;
        writeln!(out, "{}", PAGE_BREAK)?;
        writeln!(out)?;

        for week in &context.weeks {
            tracing::debug!("Rendering week {}", week.number);
            self.write_week(&mut out, week)?;
            writeln!(out, "{}", PAGE_BREAK)?;
            writeln!(out)?;
        }

        self.write_references(&mut out, &context.references)?;
        Ok(out)
    }

    fn render_coursework(&self, context: &CourseworkContext) -> Result<String> {
        let mut out = String::new();

        for file in &context.files {
            tracing::debug!("Rendering coursework for {}", file.file_name);
            writeln!(out, "## {}", file.file_name)?;
            writeln!(out)?;
            self.write_code_block(&mut out, &file.code)?;
        }

        Ok(out)
    }
}

/// @ai:intent Turn a normalised task id back into a heading label
/// @ai:example ("lab_3_1") -> "Lab 3.1" ; ("4_1") -> "4.1"
/// @ai:effects pure
fn format_task_id(task_id: &str) -> String {
    let (words, numbers): (Vec<&str>, Vec<&str>) = task_id
        .split('_')
        .filter(|part| !part.is_empty())
        .partition(|part| !part.chars().all(|c| c.is_ascii_digit()));

    let label = title_case(&words.join(" "));
    let number = numbers.join(".");
    match (label.is_empty(), number.is_empty()) {
        (true, _) => number,
        (false, true) => label,
        (false, false) => format!("{} {}", label, number),
    }
}

/// @ai:intent Format a reference as "Author (Year). Title. URL", falling back to raw fields
/// @ai:effects pure
fn format_reference(reference: &Reference) -> String {
    let title = reference.field("title");
    let author = reference.field("author");
    let year = reference.field("year");
    let url = reference.field("url");

    if title.is_none() {
        let fields: Vec<String> = reference
            .fields()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect();
        return fields.join(", ");
    }

    let mut text = String::new();
    if let Some(author) = author {
        text.push_str(&author);
        if let Some(year) = &year {
            text.push_str(&format!(" ({})", year));
        }
        text.push_str(". ");
    } else if let Some(year) = &year {
        text.push_str(&format!("({}). ", year));
    }

    if let Some(title) = title {
        text.push_str(&format!("*{}*.", title));
    }

    if let Some(url) = url {
        text.push_str(&format!(" <{}>", url));
    }

    text
}
