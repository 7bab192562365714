pub mod queries;
pub mod schema_gen;
pub mod sqlite;

pub use queries::*;
pub use sqlite::*;
