use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::mxs::StoreError;

/// Failures that end a whole pass. Per-object problems never end up here;
/// they are collected in the pass report instead.
#[derive(Error, Debug)]
pub enum PassError {
    #[error("Failed to read {}: {diagnostic}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        diagnostic: StoreError,
    },

    #[error("Failed to write {}: {diagnostic}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        diagnostic: StoreError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type PassResult<T> = Result<T, PassError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_names_the_file() {
        let err = PassError::Read {
            path: PathBuf::from("/scenes/room.mxs"),
            diagnostic: StoreError::new("bad header"),
        };
        assert_eq!(err.to_string(), "Failed to read /scenes/room.mxs: bad header");
    }
}
