use serde::Serialize;
use std::fmt;

use super::pipeline::Stage;

/// How a stage ended
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum StageOutcome {
    Imported,
    /// The stage's sheet is not in the workbook
    SheetMissing,
    /// The sheet could not be used at all (unreadable, bad header)
    Skipped(String),
    /// A store write failed part-way; earlier rows were kept
    Aborted(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    pub sheet: String,
    pub outcome: StageOutcome,
    pub rows_written: usize,
    pub rows_skipped: usize,
    /// Numeric cells that could not be parsed and were stored as NULL
    pub malformed_numbers: usize,
}

impl StageReport {
    pub fn new(stage: Stage, sheet: impl Into<String>) -> Self {
        Self {
            stage,
            sheet: sheet.into(),
            outcome: StageOutcome::Imported,
            rows_written: 0,
            rows_skipped: 0,
            malformed_numbers: 0,
        }
    }

    pub fn with_outcome(mut self, outcome: StageOutcome) -> Self {
        self.outcome = outcome;
        self
    }
}

impl fmt::Display for StageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.stage)?;
        match &self.outcome {
            StageOutcome::Imported => write!(f, "{} rows", self.rows_written)?,
            StageOutcome::SheetMissing => write!(f, "skipped (sheet {:?} not found)", self.sheet)?,
            StageOutcome::Skipped(reason) => write!(f, "skipped ({})", reason)?,
            StageOutcome::Aborted(reason) => {
                write!(f, "aborted after {} rows ({})", self.rows_written, reason)?
            }
        }
        if self.rows_skipped > 0 {
            write!(f, ", {} rows without station key", self.rows_skipped)?;
        }
        if self.malformed_numbers > 0 {
            write!(f, ", {} malformed numbers", self.malformed_numbers)?;
        }
        Ok(())
    }
}

/// Outcome of every stage that ran, in pipeline order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    pub stages: Vec<StageReport>,
}

impl ImportReport {
    pub fn stage(&self, stage: Stage) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == stage)
    }

    pub fn rows_written(&self) -> usize {
        self.stages.iter().map(|s| s.rows_written).sum()
    }

    /// Whether every stage imported its sheet
    pub fn is_complete(&self) -> bool {
        self.stages
            .iter()
            .all(|s| s.outcome == StageOutcome::Imported)
    }

    pub fn summary(&self) -> String {
        self.stages
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;

    #[test]
    fn test_stage_summary_lines() {
        let mut imported = StageReport::new(Stage::Category(Category::Rainfall), "表3 雨量站");
        imported.rows_written = 12;
        imported.malformed_numbers = 2;
        assert_eq!(imported.to_string(), "rainfall: 12 rows, 2 malformed numbers");

        let missing = StageReport::new(Stage::Category(Category::Evaporation), "表4 蒸发站")
            .with_outcome(StageOutcome::SheetMissing);
        assert_eq!(
            missing.to_string(),
            "evaporation: skipped (sheet \"表4 蒸发站\" not found)"
        );

        let report = ImportReport {
            stages: vec![imported, missing],
        };
        assert_eq!(report.rows_written(), 12);
        assert!(!report.is_complete());
    }
}
