pub mod cell;
pub mod extract;
pub mod workbook;

pub use cell::*;
pub use extract::*;
pub use workbook::*;
