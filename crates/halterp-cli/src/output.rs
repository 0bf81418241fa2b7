//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), with dedicated
//! human renderings for attribute maps, problem reports and link listings.

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::handlers::links::RelationLinks;
use colored::Colorize;
use halterp_core::Problem;
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};
use tracing::trace;

#[cfg(test)]
mod tests;

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format interpreted attributes
    fn format_attributes(&self, attributes: &Value) -> Result<String>;

    /// Format a problem report
    fn format_problems(&self, problems: &[Problem]) -> Result<String>;

    /// Format the relations of a document
    fn format_links(&self, relations: &[RelationLinks]) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // For human format, use pretty JSON as fallback
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_attributes(&self, attributes: &Value) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_attributes_human(attributes)),
            _ => self.format(attributes),
        }
    }

    fn format_problems(&self, problems: &[Problem]) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_problems_human(problems)),
            _ => self.format(&problems),
        }
    }

    fn format_links(&self, relations: &[RelationLinks]) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_links_human(relations)),
            _ => self.format(&relations),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write an error message
    pub fn error(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.red().to_string())
        } else {
            self.writeln(&format!("ERROR: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");
        self.emit(&formatted)
    }

    /// Write one item's attributes
    pub fn attributes(&mut self, attributes: &Value) -> Result<()> {
        let formatted = self.format.format_attributes(attributes)?;
        self.emit(&formatted)
    }

    /// Write a problem report
    pub fn problems(&mut self, problems: &[Problem]) -> Result<()> {
        let formatted = self.format.format_problems(problems)?;
        self.emit(&formatted)
    }

    /// Write the relations of a document
    pub fn links(&mut self, relations: &[RelationLinks]) -> Result<()> {
        let formatted = self.format.format_links(relations)?;
        self.emit(&formatted)
    }

    fn emit(&mut self, formatted: &str) -> Result<()> {
        match self.format {
            // YAML already ends with a newline
            OutputFormat::Yaml => self.write(formatted),
            _ => self.writeln(formatted),
        }
    }
}

/// Render attributes as `name: value` lines
pub fn format_attributes_human(attributes: &Value) -> String {
    match attributes {
        Value::Object(map) if !map.is_empty() => {
            let width = map.keys().map(String::len).max().unwrap_or(0);
            map.iter()
                .map(|(name, value)| format!("{:<width$}  {}", name, human_value(value), width = width))
                .collect::<Vec<_>>()
                .join("\n")
        }
        Value::Object(_) => "(no attributes)".to_string(),
        other => human_value(other),
    }
}

/// Render a problem report, one problem per line
pub fn format_problems_human(problems: &[Problem]) -> String {
    if problems.is_empty() {
        return "No problems found".to_string();
    }

    let mut output = format!("{} problem(s):", problems.len());
    for problem in problems {
        output.push_str(&format!("\n  ✗ {}", problem));
    }
    output
}

/// Render relations and their hrefs as an indented listing
pub fn format_links_human(relations: &[RelationLinks]) -> String {
    if relations.is_empty() {
        return "No relations found".to_string();
    }

    let mut output = String::new();
    for relation in relations {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&relation.rel);
        if relation.links.is_empty() {
            output.push_str("\n  (none)");
        }
        for link in &relation.links {
            output.push_str("\n  ");
            output.push_str(&link.href);
            if link.templated {
                output.push_str(&format!(" (templated: {})", link.variables.join(", ")));
            }
        }
    }
    output
}

fn human_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}
