//! File persistence helpers and well-known paths

mod io;
mod paths;

pub use io::{atomic_write, read_json, write_json_pretty};
pub use paths::Paths;
