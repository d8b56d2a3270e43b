use std::path::{Path, PathBuf};

use libloading::Library;
use tracing::{debug, warn};

use crate::error::LoadError;

/// Owner of at most one OS dynamic-library handle.
///
/// Every pointer resolved through [`LibraryHandle::load`] dangles once the
/// handle is reset or dropped. The handle does not track them, see
/// [`DynFunction`](crate::DynFunction) for a type that does.
#[derive(Debug, Default)]
pub struct LibraryHandle {
    library: Option<(Library, PathBuf)>,
}

impl LibraryHandle {
    pub const fn new() -> LibraryHandle {
        LibraryHandle { library: None }
    }

    /// Opens the library at `path` and resolves `symbol` as an `F`.
    ///
    /// Any previously held library is released first, even when this call
    /// fails. A missing symbol releases the freshly opened library too, so an
    /// `Err` always leaves the handle unloaded.
    ///
    /// # Safety
    ///
    /// Opening a library runs its initialization routines, and `F` must be the
    /// real type of the exported symbol. The returned value must not be used
    /// after the handle is reset, reloaded or dropped.
    pub unsafe fn load<F: Copy>(
        &mut self,
        path: impl AsRef<Path>,
        symbol: &str,
    ) -> Result<F, LoadError> {
        self.reset();

        let path = path.as_ref();
        let library = Library::new(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let resolved = library.get::<F>(symbol.as_bytes()).map(|function| *function);
        let function = match resolved {
            Ok(function) => function,
            Err(source) => {
                close(library, path);
                return Err(LoadError::Symbol {
                    path: path.to_path_buf(),
                    symbol: symbol.to_owned(),
                    source,
                });
            }
        };

        debug!("Loaded `{symbol}` from {path:?}");
        self.library = Some((library, path.to_path_buf()));

        Ok(function)
    }

    /// Releases the OS handle if one is held.
    pub fn reset(&mut self) {
        if let Some((library, path)) = self.library.take() {
            close(library, &path);
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.library.is_some()
    }

    /// Path the held library was opened from.
    pub fn path(&self) -> Option<&Path> {
        self.library.as_ref().map(|(_, path)| path.as_path())
    }
}

fn close(library: Library, path: &Path) {
    match library.close() {
        Ok(()) => debug!("Closed {path:?}"),
        Err(err) => warn!("Cannot close {path:?}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_leaves_handle_unloaded() {
        let mut handle = LibraryHandle::new();

        let result =
            unsafe { handle.load::<extern "C" fn() -> i32>("/nonexistent/libnope.so", "f") };

        assert!(matches!(result, Err(LoadError::Open { .. })));
        assert!(!handle.is_loaded());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut handle = LibraryHandle::new();
        handle.reset();
        handle.reset();
        assert!(!handle.is_loaded());
    }

    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    #[test]
    fn resolves_libm_symbol() {
        let mut handle = LibraryHandle::new();

        let cos = unsafe { handle.load::<extern "C" fn(f64) -> f64>("libm.so.6", "cos") }
            .expect("libm should export cos");

        assert!(handle.is_loaded());
        assert_eq!(handle.path(), Some(Path::new("libm.so.6")));
        assert_eq!(cos(0.0), 1.0);

        handle.reset();
        assert!(!handle.is_loaded());
    }

    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    #[test]
    fn missing_symbol_releases_library() {
        let mut handle = LibraryHandle::new();

        let result =
            unsafe { handle.load::<extern "C" fn()>("libm.so.6", "definitely_not_here") };

        assert!(matches!(result, Err(LoadError::Symbol { .. })));
        assert!(!handle.is_loaded());
    }
}
