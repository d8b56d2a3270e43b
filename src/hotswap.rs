use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{HotswapConfig, RetryPolicy};
use crate::diagnostics::{Diagnostics, HotswapEvent, NoDiagnostics};
use crate::error::{CallError, ReloadError};
use crate::function::DynFunction;
use crate::signature::Signature;
use crate::watcher::{self, FileStamp, Poll, PollWatcher};

/// Result of one [`Hotswap::update`] tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The file has not changed since the last load attempt.
    Unchanged,
    /// The file could not be stat'd; nothing changed.
    Unavailable,
    /// The file changed but is empty for now.
    Deferred,
    /// A new version is loaded.
    Reloaded,
    /// A new version was detected but could not be loaded; nothing is loaded.
    Failed,
}

/// A function that follows a library file on disk.
///
/// Every [`update`](Hotswap::update) checks the file and, when it changed,
/// unloads the current version, copies the file next to itself and loads the
/// copy. The original is never opened by the loader, so a build tool can
/// rewrite it at any time.
///
/// ```no_run
/// use hotswap::{Hotswap, TracingDiagnostics};
///
/// type Answer = extern "C" fn() -> i32;
///
/// let mut answer = unsafe { Hotswap::<Answer>::new("target/debug/libgame.so", "answer") }
///     .with_diagnostics(TracingDiagnostics);
///
/// loop {
///     answer.update();
///     if let Ok(value) = answer.call(()) {
///         println!("{value}");
///     }
///     std::thread::sleep(std::time::Duration::from_millis(100));
/// }
/// ```
pub struct Hotswap<F: Signature> {
    function: DynFunction<F>,
    poller: PollWatcher,
    symbol: String,
    shadow: PathBuf,
    config: HotswapConfig,
    diagnostics: Box<dyn Diagnostics + Send>,
}

impl<F: Signature> Hotswap<F> {
    /// Watches `path` for `symbol`. Nothing is loaded until the first
    /// [`update`](Hotswap::update).
    ///
    /// # Safety
    ///
    /// Every version of the file that ever shows up at `path` gets loaded:
    /// each must be a library whose initialization is sound to run and whose
    /// `symbol` really has the signature `F`.
    pub unsafe fn new(path: impl Into<PathBuf>, symbol: impl Into<String>) -> Hotswap<F> {
        Self::with_config(path, symbol, HotswapConfig::default())
    }

    /// # Safety
    ///
    /// See [`Hotswap::new`].
    pub unsafe fn with_config(
        path: impl Into<PathBuf>,
        symbol: impl Into<String>,
        config: HotswapConfig,
    ) -> Hotswap<F> {
        let path = path.into();
        let shadow = watcher::shadow_path(&path, &config.shadow_suffix);

        Hotswap {
            function: DynFunction::new(),
            poller: PollWatcher::new(path),
            symbol: symbol.into(),
            shadow,
            config,
            diagnostics: Box::new(NoDiagnostics),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: impl Diagnostics + Send + 'static) -> Self {
        self.diagnostics = Box::new(diagnostics);
        self
    }

    /// Checks the watched file and swaps in its new version if it changed.
    ///
    /// Never panics on I/O or load errors: they are reported to the
    /// diagnostics sink and leave the function unloaded.
    pub fn update(&mut self) -> UpdateOutcome {
        let stamp = match self.poller.poll() {
            Ok(Poll::Unchanged) => return UpdateOutcome::Unchanged,
            Ok(Poll::Truncated(_)) => {
                self.report(&HotswapEvent::Deferred { path: self.path() });
                return UpdateOutcome::Deferred;
            }
            Ok(Poll::Changed(stamp)) => stamp,
            Err(error) => {
                self.report(&HotswapEvent::Unavailable {
                    path: self.path(),
                    error: &error,
                });
                return UpdateOutcome::Unavailable;
            }
        };

        self.poller.commit(stamp);

        match self.swap() {
            Ok(shadow_len) => {
                self.report(&HotswapEvent::Reloaded {
                    path: self.path(),
                    shadow: &self.shadow,
                    original_len: stamp.len,
                    shadow_len,
                });
                UpdateOutcome::Reloaded
            }
            Err(error) => {
                self.function.reset();
                if self.config.retry == RetryPolicy::EveryUpdate {
                    self.poller.forget();
                }
                self.report(&HotswapEvent::Failed {
                    path: self.path(),
                    error: &error,
                });
                UpdateOutcome::Failed
            }
        }
    }

    fn swap(&mut self) -> Result<u64, ReloadError> {
        // Release the current copy before touching it.
        self.function.reset();

        let copied = watcher::snapshot(self.poller.path(), &self.shadow).map_err(|source| {
            ReloadError::Snapshot {
                from: self.poller.path().to_path_buf(),
                to: self.shadow.clone(),
                source,
            }
        })?;

        // SAFETY: the caller of `Hotswap::new` vouched for every version of
        // the watched file, and the shadow is a copy of one.
        unsafe { self.function.load(&self.shadow, &self.symbol)? };

        Ok(copied)
    }

    fn report(&self, event: &HotswapEvent<'_>) {
        self.diagnostics.report(event);
    }

    /// Calls the current version, if any.
    pub fn call(&self, args: F::Args) -> Result<F::Output, CallError> {
        self.function.call(args)
    }

    pub fn call_or(&self, args: F::Args, default: F::Output) -> F::Output {
        self.function.call_or(args, default)
    }

    pub fn is_loaded(&self) -> bool {
        self.function.is_loaded()
    }

    pub fn function(&self) -> &DynFunction<F> {
        &self.function
    }

    pub fn path(&self) -> &Path {
        self.poller.path()
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn shadow_path(&self) -> &Path {
        &self.shadow
    }

    /// Stamp of the file version last loaded (or attempted).
    pub fn last_stamp(&self) -> Option<FileStamp> {
        self.poller.last()
    }

    pub fn config(&self) -> &HotswapConfig {
        &self.config
    }
}

impl<F: Signature> Drop for Hotswap<F> {
    fn drop(&mut self) {
        self.function.reset();

        if self.config.remove_shadow_on_drop {
            let _ = fs::remove_file(&self.shadow);
        }
    }
}

impl<F: Signature> fmt::Debug for Hotswap<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hotswap")
            .field("path", &self.path())
            .field("symbol", &self.symbol)
            .field("shadow", &self.shadow)
            .field("last", &self.poller.last())
            .field("function", &self.function)
            .finish()
    }
}
