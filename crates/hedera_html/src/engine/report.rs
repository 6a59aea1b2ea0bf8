use crate::errors::{ParseError, Severity};
use crate::options::ParseOptions;

/// Collects diagnostics during a parse. Diagnostics suppressed by `NOERROR` / `NOWARNING` are
/// neither logged nor collected.
#[derive(Debug)]
pub(crate) struct Report {
    options: ParseOptions,
    diagnostics: Vec<ParseError>,
}

impl Report {
    pub(crate) fn new(options: ParseOptions) -> Self {
        Self {
            options,
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn warning(&mut self, message: impl Into<String>, line: u64) {
        self.push(Severity::Warning, message.into(), line);
    }

    pub(crate) fn error(&mut self, message: impl Into<String>, line: u64) {
        self.push(Severity::Error, message.into(), line);
    }

    fn push(&mut self, severity: Severity, message: String, line: u64) {
        let suppressed = match severity {
            Severity::Warning => self.options.contains(ParseOptions::NOWARNING),
            Severity::Error => self.options.contains(ParseOptions::NOERROR),
        };
        if suppressed {
            return;
        }

        let diagnostic = ParseError {
            message,
            line,
            severity,
        };
        match severity {
            Severity::Warning => log::warn!("{diagnostic}"),
            Severity::Error => log::error!("{diagnostic}"),
        }

        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn into_diagnostics(self) -> Vec<ParseError> {
        self.diagnostics
    }
}
