use std::path::PathBuf;

use thiserror::Error;

/// Failures of the batch pipeline.
///
/// Only [`PlotError::SourceUnavailable`] is fatal for a run. Everything else is
/// scoped to one case or one (case, group) unit and ends up in the report.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("cannot open workbook {path}: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },

    #[error("case {0} is not a sheet of the workbook")]
    CaseNotFound(String),

    #[error("case {case}: malformed table, {reason}")]
    MalformedTable { case: String, reason: String },

    #[error("case {case}: no column of group {group} is present")]
    NoDataForGroup { case: String, group: String },

    #[error("could not write {path}: {reason}")]
    ExportFailed { path: PathBuf, reason: String },

    #[error("rendering failed: {0}")]
    Render(String),
}

impl PlotError {
    /// True for the kinds that abort the whole run rather than one unit.
    pub fn is_fatal(&self) -> bool {
        matches!(self, PlotError::SourceUnavailable { .. })
    }

    /// True for the informational skip of a group without columns.
    pub fn is_skip(&self) -> bool {
        matches!(self, PlotError::NoDataForGroup { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_source_unavailable_is_fatal() {
        let fatal = PlotError::SourceUnavailable {
            path: PathBuf::from("data.xlsx"),
            reason: "missing".to_string(),
        };
        assert!(fatal.is_fatal());
        assert!(!PlotError::CaseNotFound("3".to_string()).is_fatal());
        assert!(!PlotError::Render("x".to_string()).is_fatal());
    }

    #[test]
    fn messages_name_the_unit() {
        let e = PlotError::NoDataForGroup {
            case: "1".to_string(),
            group: "wing1".to_string(),
        };
        assert!(e.is_skip());
        assert_eq!(e.to_string(), "case 1: no column of group wing1 is present");
    }
}
