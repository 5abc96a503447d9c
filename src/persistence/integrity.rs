use super::diagnostics::Diagnostic;
use super::parser::{decode_with_diagnostics, is_recognizable};
use crate::domain::AppState;

/// Outcome of checking the data file.
///
/// `state` is the repaired state; nothing is written back until the caller
/// saves it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegrityReport {
    pub ok: bool,
    pub issues: Vec<String>,
    pub fixed: Vec<String>,
    pub state: Option<AppState>,
}

impl IntegrityReport {
    fn clean(state: Option<AppState>) -> Self {
        Self {
            ok: true,
            state,
            ..Self::default()
        }
    }

    pub(crate) fn failed(issue: impl Into<String>) -> Self {
        Self {
            ok: false,
            issues: vec![issue.into()],
            ..Self::default()
        }
    }
}

/// Check document text. `None` means there is no file, which is not a problem.
pub fn check_content(content: Option<&str>) -> IntegrityReport {
    let Some(content) = content else {
        return IntegrityReport::clean(None);
    };
    if !is_recognizable(content) {
        return IntegrityReport::failed("file is not a daybook document");
    }

    let (state, diagnostics) = decode_with_diagnostics(content);
    let mut issues = Vec::new();
    let mut fixed = Vec::new();
    for diagnostic in diagnostics.iter() {
        issues.push(diagnostic.issue());
        if let Some(fix) = diagnostic.fix() {
            fixed.push(fix);
        }
    }

    let dropped = diagnostics
        .iter()
        .filter(|diagnostic| matches!(diagnostic, Diagnostic::Dropped { .. }))
        .count();
    if !issues.is_empty() {
        tracing::warn!(issues = issues.len(), dropped, "integrity check found problems");
    }

    IntegrityReport {
        ok: issues.is_empty(),
        issues,
        fixed,
        state: Some(state),
    }
}
