//! Storage: reference-counted flat buffer of f64 with shared mutation

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::elementwise;

/// Reference-counted flat buffer of `f64`.
///
/// `Storage` is a cheap handle over one shared buffer. Cloning the handle
/// takes a new counted reference instead of copying data, which is how tensor
/// views alias a buffer: every view holds its own handle, mutation through
/// any handle is visible through all of them, and the buffer is released when
/// the last handle is dropped.
///
/// Element access goes through a runtime-checked lock, so handles may cross
/// threads; the intended discipline is still a single logical thread of
/// control.
pub struct Storage {
    inner: Arc<RwLock<Vec<f64>>>,
}

impl Storage {
    /// Create storage for `len` elements.
    ///
    /// `len` may be zero. The initial element contents are unspecified;
    /// callers must write before relying on a value. (The current
    /// implementation zero-fills, but that is not part of the contract.)
    ///
    /// # Example
    ///
    /// ```
    /// use tensr::storage::Storage;
    ///
    /// let s = Storage::new(3);
    /// assert_eq!(s.len(), 3);
    /// assert_eq!(s.ref_count(), 1);
    /// ```
    pub fn new(len: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(vec![0.0; len])),
        }
    }

    /// Create an independent deep copy of `existing`.
    ///
    /// The copy has the same length and element values, shares no memory with
    /// `existing`, and starts with a reference count of 1.
    pub fn new_copy(existing: &Storage) -> Self {
        Self {
            inner: Arc::new(RwLock::new(existing.inner.read().clone())),
        }
    }

    /// Get the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check if storage is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Get the reference count
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check if this is the only reference
    #[inline]
    pub fn is_unique(&self) -> bool {
        Arc::strong_count(&self.inner) == 1
    }

    /// Check whether two handles reference the same buffer
    #[inline]
    pub fn ptr_eq(&self, other: &Storage) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Read the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn get(&self, index: usize) -> f64 {
        let buf = self.inner.read();
        assert!(
            index < buf.len(),
            "Storage::get: index {index} out of bounds for storage of size {}",
            buf.len()
        );
        buf[index]
    }

    /// Write `value` to the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&self, index: usize, value: f64) {
        let mut buf = self.inner.write();
        assert!(
            index < buf.len(),
            "Storage::set: index {index} out of bounds for storage of size {}",
            buf.len()
        );
        buf[index] = value;
    }

    /// Replace every element `x` with `f(x)`, returning `&self` for chaining.
    ///
    /// This is the single generic mutation primitive; `fill` and `zero` are
    /// implemented on top of it. The whole sweep runs under the buffer's
    /// write lock, so `f` must not touch this storage through another handle.
    ///
    /// # Example
    ///
    /// ```
    /// use tensr::storage::Storage;
    ///
    /// let s = Storage::new(3);
    /// s.fill(10.0).apply(|x| 2.0 * x + 1.0);
    /// assert_eq!(s.get(0), 21.0);
    /// ```
    pub fn apply<F: FnMut(f64) -> f64>(&self, mut f: F) -> &Self {
        let mut buf = self.inner.write();
        for value in buf.iter_mut() {
            *value = f(*value);
        }
        self
    }

    /// Set every element to `value`, returning `&self` for chaining.
    pub fn fill(&self, value: f64) -> &Self {
        self.apply(elementwise::constant(value))
    }

    /// Set every element to zero, returning `&self` for chaining.
    pub fn zero(&self) -> &Self {
        self.apply(elementwise::zero)
    }

    /// Grow or shrink the buffer in place, returning `&self` for chaining.
    ///
    /// Values at indices below `min(old_len, new_len)` are preserved. On
    /// growth the contents of the new slots are unspecified; callers must
    /// write before relying on them.
    pub fn resize(&self, new_len: usize) -> &Self {
        self.inner.write().resize(new_len, 0.0);
        self
    }

    /// Write the one-line size/refs header used by the debug dumps.
    pub(crate) fn fmt_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Storage size {} refs {}", self.len(), self.ref_count())
    }
}

impl Clone for Storage {
    /// Clone takes a new counted reference to the same buffer (zero-copy)
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("len", &self.len())
            .field("refs", &self.ref_count())
            .finish()
    }
}

impl fmt::Display for Storage {
    /// Header line plus up to the first 10 element values.
    ///
    /// Diagnostic output only; the format is not stable.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_header(f)?;
        writeln!(f)?;
        let buf = self.inner.read();
        for (i, value) in buf.iter().take(10).enumerate() {
            write!(f, " [{i}]={value}")?;
        }
        if buf.len() > 10 {
            write!(f, " ...")?;
        }
        Ok(())
    }
}
