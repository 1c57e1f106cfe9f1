//! Command implementations.

pub mod check;
pub mod config;
pub mod extract;

pub use self::check::execute_check;
pub use self::config::execute_config;
pub use self::extract::execute_extract;

use std::path::Path;

/// File name used in results and reports.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
