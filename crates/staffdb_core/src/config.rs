//! Database configuration.

/// Configuration for creating or opening a database.
#[derive(Debug, Clone)]
pub struct Config {
    /// Take an exclusive advisory lock on the file while it is open.
    pub lock: bool,

    /// Call `sync` after every successful persist (safer but slower).
    pub sync_on_write: bool,

    /// Open the file without write access; `persist` fails.
    pub read_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lock: false,
            sync_on_write: true,
            read_only: false,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to take an advisory lock.
    #[must_use]
    pub const fn lock(mut self, value: bool) -> Self {
        self.lock = value;
        self
    }

    /// Sets whether to sync after every persist.
    #[must_use]
    pub const fn sync_on_write(mut self, value: bool) -> Self {
        self.sync_on_write = value;
        self
    }

    /// Sets whether to open the file read-only.
    #[must_use]
    pub const fn read_only(mut self, value: bool) -> Self {
        self.read_only = value;
        self
    }
}
