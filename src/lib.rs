pub mod category;
pub mod cli;
pub mod config;
pub mod coordinate;
pub mod error;
pub mod filter;
pub mod header;
pub mod import;
pub mod parser;
pub mod registry;
pub mod reconcile;
pub mod schema;
pub mod sheet;
pub mod store;
pub mod ui;

pub use cli::{Cli, Commands};
pub use config::{ImportConfig, SheetNames};
pub use error::ImportError;
pub use import::{import_workbook, run_pipeline, ImportReport};
pub use ui::{ConsoleUi, Phase, SilentUi, Ui, UiApp};
