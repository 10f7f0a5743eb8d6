use std::fmt::Display;

use colored::Colorize;

use crate::source_manager::SourceManager;

/// Renders compiler errors against the source they came from.
pub struct DiagnosticReporter {
    pub source_manager: SourceManager,
}

impl DiagnosticReporter {
    pub fn new(source_manager: SourceManager) -> Self {
        Self { source_manager }
    }

    /// `error: <message>` followed by the location and the offending line.
    ///
    /// `line` is the line the message refers to; lines outside the source
    /// produce only the header.
    pub fn report_error(&self, message: &dyn Display, line: usize) -> String {
        let mut output = format!("{}: {}", "error".red().bold(), message.to_string().bold());

        if let Some(snippet) = self.source_manager.get_snippet(line) {
            let name = if self.source_manager.name().is_empty() {
                "<input>"
            } else {
                self.source_manager.name()
            };
            output.push_str(&format!("\n {} {}:{}", "-->".blue().bold(), name, line));
            output.push_str(&format!("\n{}", snippet));
        }

        output
    }
}
