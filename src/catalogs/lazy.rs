//! Build-once cells for catalogs that are expensive to load.
//!
//! A `LazyCatalog` is built on first access and cached for its owner's
//! lifetime. Concurrent first accesses run the builder at most once: the
//! value lives in a `OnceLock`, and fallible builds are serialized by a
//! mutex with a second check after it is taken.

use std::sync::OnceLock;

use parking_lot::Mutex;

/// A value built at most once, on first access.
///
/// ## Example
///
/// ```
/// use ccg_card_db::catalogs::LazyCatalog;
///
/// let cell: LazyCatalog<Vec<u32>> = LazyCatalog::new();
/// assert!(!cell.is_built());
///
/// let first = cell.get_or_build(|| vec![1, 2, 3]);
/// let second = cell.get_or_build(|| unreachable!());
/// assert!(std::ptr::eq(first, second));
/// ```
#[derive(Debug)]
pub struct LazyCatalog<T> {
    value: OnceLock<T>,
    build_lock: Mutex<()>,
}

impl<T> Default for LazyCatalog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LazyCatalog<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            value: OnceLock::new(),
            build_lock: Mutex::new(()),
        }
    }

    /// The cached value, if already built.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.value.get()
    }

    /// Whether a build has completed.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.value.get().is_some()
    }

    /// Return the cached value, building it first if needed.
    pub fn get_or_build(&self, build: impl FnOnce() -> T) -> &T {
        self.value.get_or_init(build)
    }

    /// Fallible variant of `get_or_build`.
    ///
    /// A failed build caches nothing; the next access tries again.
    pub fn get_or_try_build<E>(&self, build: impl FnOnce() -> Result<T, E>) -> Result<&T, E> {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let _guard = self.build_lock.lock();
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let built = build()?;
        Ok(self.value.get_or_init(|| built))
    }
}
