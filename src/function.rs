use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{CallError, LoadError};
use crate::library::LibraryHandle;
use crate::signature::Signature;

/// A function of signature `F` resolved from a dynamic library.
///
/// The resolved pointer never leaves this type: it is only reachable through
/// [`DynFunction::call`], which borrows `self`, so it can't outlive the library
/// it came from nor survive a [`reset`](DynFunction::reset) or reload.
///
/// ```no_run
/// use hotswap::DynFunction;
///
/// let mut add = DynFunction::<extern "C" fn(i32, i32) -> i32>::new();
/// unsafe { add.load("./libmath.so", "add") }.expect("load add");
/// assert_eq!(add.call((2, 3)), Ok(5));
/// ```
pub struct DynFunction<F: Signature> {
    function: Option<F>,
    origin: Option<(PathBuf, String)>,
    library: LibraryHandle,
}

impl<F: Signature> DynFunction<F> {
    pub const fn new() -> DynFunction<F> {
        DynFunction {
            function: None,
            origin: None,
            library: LibraryHandle::new(),
        }
    }

    /// Resolves `symbol` from the library at `path`.
    ///
    /// Whatever was loaded before is released, even when this fails. On
    /// failure the remembered origin is cleared as well, so a later
    /// [`reload`](DynFunction::reload) has nothing to repeat.
    ///
    /// # Safety
    ///
    /// Loading runs the library's initialization code, and `symbol` must be a
    /// function whose real signature is `F`.
    pub unsafe fn load(&mut self, path: impl AsRef<Path>, symbol: &str) -> Result<(), LoadError> {
        self.reset();

        let path = path.as_ref();
        let function = self.library.load::<F>(path, symbol)?;

        self.function = Some(function);
        self.origin = Some((path.to_path_buf(), symbol.to_owned()));

        Ok(())
    }

    /// Loads again from the last successfully loaded path and symbol.
    ///
    /// # Safety
    ///
    /// Same contract as [`load`](DynFunction::load), for whatever the file at
    /// the remembered path contains now.
    pub unsafe fn reload(&mut self) -> Result<(), LoadError> {
        let (path, symbol) = self.origin.take().ok_or(LoadError::NothingToReload)?;
        self.load(path, &symbol)
    }

    /// Forgets the function and its origin, then releases the library.
    pub fn reset(&mut self) {
        self.function = None;
        self.origin = None;
        self.library.reset();
    }

    pub fn is_loaded(&self) -> bool {
        self.function.is_some()
    }

    /// Path and symbol of the currently loaded function.
    pub fn origin(&self) -> Option<(&Path, &str)> {
        self.origin
            .as_ref()
            .map(|(path, symbol)| (path.as_path(), symbol.as_str()))
    }

    /// Calls the loaded function, or does nothing when none is loaded.
    pub fn call(&self, args: F::Args) -> Result<F::Output, CallError> {
        let function = self.function.ok_or(CallError::NotLoaded)?;
        Ok(function.invoke(args))
    }

    /// Like [`call`](DynFunction::call), falling back to `default` when nothing
    /// is loaded.
    pub fn call_or(&self, args: F::Args, default: F::Output) -> F::Output {
        self.call(args).unwrap_or(default)
    }
}

impl<F: Signature> Default for DynFunction<F> {
    fn default() -> Self {
        DynFunction::new()
    }
}

impl<F: Signature> fmt::Debug for DynFunction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynFunction")
            .field("loaded", &self.is_loaded())
            .field("origin", &self.origin)
            .finish()
    }
}
