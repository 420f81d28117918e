use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// `reported_path` is the final file path printed by the extractor, if any.
    Success { reported_path: Option<PathBuf> },
    Failure(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
    Tagged,
    Failed(String),
}

/// How the locator settled on a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Reported,
    Exact,
    Scanned,
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub path: PathBuf,
    pub exists: bool,
    pub via: Resolution,
}

impl ResolvedFile {
    pub fn found(path: PathBuf, via: Resolution) -> Self {
        Self {
            path,
            exists: true,
            via,
        }
    }

    pub fn unresolved(expected: PathBuf) -> Self {
        Self {
            path: expected,
            exists: false,
            via: Resolution::Unresolved,
        }
    }
}

/// Per-item result handed back to the batch loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemReport {
    Tagged { path: PathBuf },
    TagFailed { path: PathBuf, reason: String },
    Unresolved { expected: PathBuf },
    DownloadFailed { reason: String },
    Aborted { reason: String },
}

impl ItemReport {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ItemReport::DownloadFailed { .. } | ItemReport::Aborted { .. }
        )
    }

    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            ItemReport::TagFailed { .. } | ItemReport::Unresolved { .. }
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub tagged: usize,
    pub warnings: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn record(&mut self, report: &ItemReport) {
        self.total += 1;
        if report.is_failure() {
            self.failed += 1;
        } else if report.is_warning() {
            self.warnings += 1;
        } else {
            self.tagged += 1;
        }
    }
}
