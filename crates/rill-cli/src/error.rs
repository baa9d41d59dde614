//! The one error kind `main` needs to distinguish from everything else:
//! a source file that couldn't be opened gets its own exit code, per
//! the reference shell's `main.cpp` (`Unable to open file '{}'`
//! followed by a distinct return value from an internal fault).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Unable to open file '{}'", .0.display())]
    FileNotOpenable(PathBuf),
}
