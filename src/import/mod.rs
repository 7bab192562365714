pub mod importer;
pub mod pipeline;
pub mod report;
pub mod stages;

pub use importer::import_category;
pub use pipeline::{import_workbook, run_pipeline, selected_stages, Stage, STAGES};
pub use report::{ImportReport, StageOutcome, StageReport};
pub use stages::CategoryStage;
