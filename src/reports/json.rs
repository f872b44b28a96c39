//! JSON rendering of the final report.

use super::FinalReport;
use crate::error::{ReportErrorKind, Result, RfpError};

/// JSON reporter for [`FinalReport`].
#[derive(Debug, Clone)]
pub struct JsonReporter {
    pretty: bool,
}

impl JsonReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing.
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Serialize the report.
    pub fn render(&self, report: &FinalReport) -> Result<String> {
        let result = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        result.map_err(|e| {
            RfpError::report(
                "final report",
                ReportErrorKind::JsonSerializationError(e.to_string()),
            )
        })
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}
