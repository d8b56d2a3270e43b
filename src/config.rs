use std::ffi::OsString;

/// What to do after a hot swap attempt failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Wait until the watched file changes again.
    #[default]
    OnChange,
    /// Try again on every following update until a load succeeds.
    EveryUpdate,
}

/// Settings of a [`Hotswap`](crate::Hotswap).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotswapConfig {
    /// Appended to the watched path to name the copy that gets loaded.
    pub shadow_suffix: OsString,
    pub retry: RetryPolicy,
    /// Delete the copy when the watcher is dropped.
    pub remove_shadow_on_drop: bool,
}

impl Default for HotswapConfig {
    fn default() -> Self {
        Self {
            shadow_suffix: OsString::from("_copy"),
            retry: RetryPolicy::default(),
            remove_shadow_on_drop: true,
        }
    }
}

impl HotswapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shadow_suffix(mut self, suffix: impl Into<OsString>) -> Self {
        self.shadow_suffix = suffix.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_remove_shadow_on_drop(mut self, remove: bool) -> Self {
        self.remove_shadow_on_drop = remove;
        self
    }
}
