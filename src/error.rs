use std::io;
use std::path::PathBuf;

/// Failure to bring a function into memory.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to open library {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("symbol `{symbol}` not found in {path:?}: {source}")]
    Symbol {
        path: PathBuf,
        symbol: String,
        #[source]
        source: libloading::Error,
    },

    #[error("nothing was loaded before, cannot reload")]
    NothingToReload,
}

/// Failure to invoke a dynamically loaded function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CallError {
    #[error("function is not loaded")]
    NotLoaded,
}

/// Failure of a single hot swap attempt inside [`Hotswap::update`].
///
/// [`Hotswap::update`]: crate::Hotswap::update
#[derive(Debug, thiserror::Error)]
pub enum ReloadError {
    #[error("failed to snapshot {from:?} into {to:?}: {source}")]
    Snapshot {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Load(#[from] LoadError),
}
