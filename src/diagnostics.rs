//! Where a [`Hotswap`](crate::Hotswap) reports what it is doing.

use std::io;
use std::path::Path;

use tracing::{debug, info, trace, warn};

use crate::error::ReloadError;

#[derive(Debug)]
pub enum HotswapEvent<'a> {
    /// The watched file could not be stat'd; nothing was touched.
    Unavailable { path: &'a Path, error: &'a io::Error },
    /// The file changed but is empty, the reload is postponed.
    Deferred { path: &'a Path },
    /// A new version was copied and loaded.
    Reloaded {
        path: &'a Path,
        shadow: &'a Path,
        original_len: u64,
        shadow_len: u64,
    },
    /// A new version was detected but could not be loaded.
    Failed { path: &'a Path, error: &'a ReloadError },
}

pub trait Diagnostics {
    fn report(&self, event: &HotswapEvent<'_>);
}

impl<T: Fn(&HotswapEvent<'_>)> Diagnostics for T {
    fn report(&self, event: &HotswapEvent<'_>) {
        self(event)
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDiagnostics;

impl Diagnostics for NoDiagnostics {
    fn report(&self, _: &HotswapEvent<'_>) {}
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, event: &HotswapEvent<'_>) {
        match event {
            HotswapEvent::Unavailable { path, error } => {
                trace!("Cannot stat {path:?}: {error}")
            }
            HotswapEvent::Deferred { path } => {
                debug!("{path:?} is empty, waiting for the writer to finish")
            }
            HotswapEvent::Reloaded {
                path,
                shadow,
                original_len,
                shadow_len,
            } => info!(
                "Reloaded {path:?} through {shadow:?} (orig: {original_len}, copy: {shadow_len})"
            ),
            HotswapEvent::Failed { path, error } => warn!("Cannot reload {path:?}: {error}"),
        }
    }
}
