//! Load a function from a shared library by name and keep it in sync with the
//! library file while the host keeps running.
//!
//! - [`LibraryHandle`] owns one OS library handle.
//! - [`DynFunction`] ties a resolved function of a known [`Signature`] to the
//!   handle it came from.
//! - [`Hotswap`] watches the library file and swaps in new builds from a
//!   private copy on every [`Hotswap::update`].

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod function;
pub mod hotswap;
pub mod library;
pub mod signature;
pub mod timer;
mod watcher;

pub use libloading;

pub use self::config::{HotswapConfig, RetryPolicy};
pub use self::diagnostics::{Diagnostics, HotswapEvent, NoDiagnostics, TracingDiagnostics};
pub use self::error::{CallError, LoadError, ReloadError};
pub use self::function::DynFunction;
pub use self::hotswap::{Hotswap, UpdateOutcome};
pub use self::library::LibraryHandle;
pub use self::signature::Signature;
pub use self::watcher::FileStamp;
