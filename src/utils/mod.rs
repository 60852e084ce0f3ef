// jsdecls Utilities Module
//
// Source file reading shared by the library pipeline and the CLI.

use crate::error::ScanError;
use std::path::Path;

/// File utilities
pub mod file_utils {
    use super::*;
    use std::fs;
    use std::io::{self, Read};

    /// Path that selects standard input instead of a file
    pub const STDIN_PATH: &str = "-";

    /// Read file content as UTF-8, or all of stdin for `-`
    pub fn read_source(path: &Path) -> Result<String, ScanError> {
        let result = if path.as_os_str() == STDIN_PATH {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map(|_| buffer)
        } else {
            fs::read_to_string(path)
        };

        result.map_err(|source| ScanError::FileRead {
            path: path.to_path_buf(),
            source,
        })
    }
}
