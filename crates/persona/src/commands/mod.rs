pub mod analyze;
pub mod check;
pub mod report;
pub mod setup;
pub mod version;
