//! Core tensor type: construction, views and element access

use std::fmt;

use crate::error::{Error, Result};
use crate::storage::Storage;
use crate::tensor::layout::{Layout, Shape};

/// A 1D or 2D strided view over a reference-counted [`Storage`].
///
/// A tensor never owns elements directly; it pairs a storage handle with a
/// [`Layout`] mapping logical indices to storage indices. Several tensors may
/// view the same storage, and writes through one are visible through the
/// others. There is deliberately no `Clone`: use [`Tensor::deep_copy`] for an
/// independent tensor, or re-view the storage for another alias.
///
/// Tensors created by the allocating constructors ([`Tensor::new1`],
/// [`Tensor::new2`], [`Tensor::deep_copy`], [`Tensor::lin_space`]) cover
/// their storage exactly, one logical element per storage element. Tensors
/// created over existing storage ([`Tensor::new1_from_storage`],
/// [`Tensor::select`], [`Tensor::ravel`]) do not carry that guarantee, and
/// the operations that need it ([`Tensor::ravel`], [`Tensor::dot`], the
/// `other` side of [`Tensor::add`]) refuse them.
///
/// # Example
///
/// ```
/// use tensr::tensor::Tensor;
///
/// let m = Tensor::new2(2, 3);
/// m.fill(1.0);
/// let row = m.select(0, 1);
/// row.fill(5.0);
/// assert_eq!(m.get2(0, 2), 1.0);
/// assert_eq!(m.get2(1, 2), 5.0);
/// ```
pub struct Tensor {
    storage: Storage,
    layout: Layout,
    covers_storage: bool,
}

impl Tensor {
    /// Create a 1D tensor of `size0` elements over fresh storage.
    ///
    /// Element contents are unspecified until written.
    ///
    /// # Panics
    ///
    /// Panics if `size0` is zero.
    pub fn new1(size0: usize) -> Self {
        assert!(size0 > 0, "Tensor::new1: size0 must be positive");
        Self {
            storage: Storage::new(size0),
            layout: Layout::contiguous1(size0),
            covers_storage: true,
        }
    }

    /// Create a 2D row-major tensor of `size0 * size1` elements over fresh
    /// storage.
    ///
    /// Element contents are unspecified until written.
    ///
    /// # Panics
    ///
    /// Panics if either size is zero.
    pub fn new2(size0: usize, size1: usize) -> Self {
        assert!(size0 > 0, "Tensor::new2: size0 must be positive");
        assert!(size1 > 0, "Tensor::new2: size1 must be positive");
        Self {
            storage: Storage::new(size0 * size1),
            layout: Layout::contiguous2(size0, size1),
            covers_storage: true,
        }
    }

    /// Create a 1D view over existing storage.
    ///
    /// The view shares `storage` (its reference count goes up by one) and
    /// reads element `i` from storage index `offset + i * stride0`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `size0` is zero
    /// - [`Error::IndexOutOfBounds`] if `offset` is past the end of storage
    /// - [`Error::ZeroStride`] if `stride0` is zero
    /// - [`Error::ViewOutOfBounds`] if the last viewed element is past the
    ///   end of storage
    pub fn try_new1_from_storage(
        storage: &Storage,
        offset: usize,
        size0: usize,
        stride0: usize,
    ) -> Result<Self> {
        if size0 == 0 {
            return Err(Error::invalid_argument("size0", "view must have at least one element"));
        }
        if offset >= storage.len() {
            return Err(Error::IndexOutOfBounds {
                index: offset,
                size: storage.len(),
            });
        }
        if stride0 == 0 {
            return Err(Error::ZeroStride);
        }
        let layout = Layout::strided1(offset, size0, stride0);
        let last = layout.last_index();
        if last >= storage.len() {
            return Err(Error::ViewOutOfBounds {
                last,
                size: storage.len(),
            });
        }
        Ok(Self {
            storage: storage.clone(),
            layout,
            covers_storage: false,
        })
    }

    /// Create a 1D view over existing storage.
    ///
    /// # Panics
    ///
    /// Panics if the view is invalid; see [`Tensor::try_new1_from_storage`].
    ///
    /// # Example
    ///
    /// ```
    /// use tensr::storage::Storage;
    /// use tensr::tensor::Tensor;
    ///
    /// let storage = Storage::new(4);
    /// storage.fill(7.0);
    /// let every_other = Tensor::new1_from_storage(&storage, 0, 2, 2);
    /// assert_eq!(every_other.get1(1), 7.0);
    /// assert_eq!(storage.ref_count(), 2);
    /// ```
    pub fn new1_from_storage(storage: &Storage, offset: usize, size0: usize, stride0: usize) -> Self {
        Self::try_new1_from_storage(storage, offset, size0, stride0)
            .expect("Tensor::new1_from_storage failed")
    }

    /// Create an independent deep copy of this tensor.
    ///
    /// The copy has the same shape and element values over fresh contiguous
    /// storage; it shares nothing with `self`, so it covers its storage even
    /// when `self` does not.
    pub fn deep_copy(&self) -> Self {
        match self.layout.shape() {
            Shape::Rank1 { size0, .. } => {
                let copy = Self::new1(size0);
                for i in 0..size0 {
                    copy.set1(i, self.get1(i));
                }
                copy
            }
            Shape::Rank2 { size0, size1, .. } => {
                let copy = Self::new2(size0, size1);
                for i in 0..size0 {
                    for j in 0..size1 {
                        copy.set2(i, j, self.get2(i, j));
                    }
                }
                copy
            }
        }
    }

    /// Create a 1D tensor of `n` points spaced evenly from `start` to `end`
    /// inclusive.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `n` is less than two.
    pub fn try_lin_space(start: f64, end: f64, n: usize) -> Result<Self> {
        if n < 2 {
            return Err(Error::invalid_argument("n", "need at least two points"));
        }
        let tensor = Self::new1(n);
        let step = (end - start) / (n - 1) as f64;
        for i in 0..n {
            tensor.set1(i, start + i as f64 * step);
        }
        Ok(tensor)
    }

    /// Create a 1D tensor of `n` points spaced evenly from `start` to `end`
    /// inclusive.
    ///
    /// # Panics
    ///
    /// Panics if `n` is less than two.
    ///
    /// # Example
    ///
    /// ```
    /// use tensr::tensor::Tensor;
    ///
    /// let t = Tensor::lin_space(1.0, 10.0, 3);
    /// assert_eq!(t.get1(0), 1.0);
    /// assert_eq!(t.get1(1), 5.5);
    /// assert_eq!(t.get1(2), 10.0);
    /// ```
    pub fn lin_space(start: f64, end: f64, n: usize) -> Self {
        Self::try_lin_space(start, end, n).expect("Tensor::lin_space failed")
    }

    /// Flatten to a 1D view sharing this tensor's storage.
    ///
    /// A 1D tensor ravels to an equivalent view of itself; a 2D tensor
    /// ravels to its `size0 * size1` elements at stride 1 in row-major
    /// order. The result is a plain storage view, so it cannot itself be
    /// raveled again.
    ///
    /// # Errors
    ///
    /// [`Error::NotCoveringStorage`] if this tensor does not cover its
    /// storage.
    pub fn try_ravel(&self) -> Result<Self> {
        if !self.covers_storage {
            return Err(Error::NotCoveringStorage);
        }
        match self.layout.shape() {
            Shape::Rank1 { size0, stride0 } => {
                Self::try_new1_from_storage(&self.storage, self.layout.offset(), size0, stride0)
            }
            Shape::Rank2 { size0, size1, .. } => {
                Self::try_new1_from_storage(&self.storage, self.layout.offset(), size0 * size1, 1)
            }
        }
    }

    /// Flatten to a 1D view sharing this tensor's storage.
    ///
    /// # Panics
    ///
    /// Panics if this tensor does not cover its storage; see
    /// [`Tensor::try_ravel`].
    pub fn ravel(&self) -> Self {
        self.try_ravel().expect("Tensor::ravel failed")
    }

    /// Select a 1D slice along `dim` at position `index`, sharing storage.
    ///
    /// For a 2D tensor, `select(0, i)` views row `i` and `select(1, j)`
    /// views column `j`. Row and column arithmetic assumes the tensor is a
    /// row-major allocation; selecting from a tensor that was itself built
    /// with exotic strides is not supported. For a 1D tensor only
    /// `select(0, 0)` is allowed and returns an equivalent view of the
    /// whole tensor.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimension`] if `dim` is not a dimension of this
    ///   tensor
    /// - [`Error::IndexOutOfBounds`] if `index` is out of bounds along `dim`
    /// - [`Error::InvalidArgument`] if selecting from a 1D tensor with a
    ///   nonzero `index`
    pub fn try_select(&self, dim: usize, index: usize) -> Result<Self> {
        match self.layout.shape() {
            Shape::Rank1 { size0, stride0 } => {
                if dim != 0 {
                    return Err(Error::InvalidDimension { dim, ndim: 1 });
                }
                if index != 0 {
                    return Err(Error::invalid_argument(
                        "index",
                        "selecting from a 1-dimensional tensor requires index 0",
                    ));
                }
                Self::try_new1_from_storage(&self.storage, self.layout.offset(), size0, stride0)
            }
            Shape::Rank2 {
                size0,
                size1,
                stride1,
                ..
            } => match dim {
                0 => {
                    if index >= size0 {
                        return Err(Error::IndexOutOfBounds { index, size: size0 });
                    }
                    Self::try_new1_from_storage(
                        &self.storage,
                        self.layout.offset() + index * size1,
                        size1,
                        stride1,
                    )
                }
                1 => {
                    if index >= size1 {
                        return Err(Error::IndexOutOfBounds { index, size: size1 });
                    }
                    Self::try_new1_from_storage(
                        &self.storage,
                        self.layout.offset() + index,
                        size0,
                        size1,
                    )
                }
                _ => Err(Error::InvalidDimension { dim, ndim: 2 }),
            },
        }
    }

    /// Select a 1D slice along `dim` at position `index`, sharing storage.
    ///
    /// # Panics
    ///
    /// Panics if the selection is invalid; see [`Tensor::try_select`].
    pub fn select(&self, dim: usize, index: usize) -> Self {
        self.try_select(dim, index).expect("Tensor::select failed")
    }

    // ===== Accessors =====

    /// Get the number of dimensions (1 or 2)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Get the total number of logical elements
    #[inline]
    pub fn elem_count(&self) -> usize {
        self.layout.elem_count()
    }

    /// Get the size of the first dimension
    #[inline]
    pub fn size0(&self) -> usize {
        self.layout.size0()
    }

    /// Get the stride of the first dimension
    #[inline]
    pub fn stride0(&self) -> usize {
        self.layout.stride0()
    }

    /// Get the size of the second dimension, if 2D
    #[inline]
    pub fn size1(&self) -> Option<usize> {
        self.layout.size1()
    }

    /// Get the stride of the second dimension, if 2D
    #[inline]
    pub fn stride1(&self) -> Option<usize> {
        self.layout.stride1()
    }

    /// Get the storage offset of the first logical element
    #[inline]
    pub fn offset(&self) -> usize {
        self.layout.offset()
    }

    /// Get the layout
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Get the underlying storage handle
    #[inline]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Whether this tensor covers its storage exactly, one logical element
    /// per storage element
    #[inline]
    pub fn covers_storage(&self) -> bool {
        self.covers_storage
    }

    // ===== Element access =====

    /// Read element `i` of a 1D tensor.
    ///
    /// # Panics
    ///
    /// Panics if the tensor is not 1D or `i` is out of bounds.
    pub fn get1(&self, i: usize) -> f64 {
        self.storage.get(self.index1_or_panic("Tensor::get1", i))
    }

    /// Write `value` to element `i` of a 1D tensor.
    ///
    /// # Panics
    ///
    /// Panics if the tensor is not 1D or `i` is out of bounds.
    pub fn set1(&self, i: usize, value: f64) {
        self.storage.set(self.index1_or_panic("Tensor::set1", i), value);
    }

    /// Read element `(i, j)` of a 2D tensor.
    ///
    /// # Panics
    ///
    /// Panics if the tensor is not 2D or either index is out of bounds.
    pub fn get2(&self, i: usize, j: usize) -> f64 {
        self.storage.get(self.index2_or_panic("Tensor::get2", i, j))
    }

    /// Write `value` to element `(i, j)` of a 2D tensor.
    ///
    /// # Panics
    ///
    /// Panics if the tensor is not 2D or either index is out of bounds.
    pub fn set2(&self, i: usize, j: usize, value: f64) {
        self.storage.set(self.index2_or_panic("Tensor::set2", i, j), value);
    }

    fn index1_or_panic(&self, op: &str, i: usize) -> usize {
        assert_eq!(
            self.ndim(),
            1,
            "{op}: expected a 1-dimensional tensor, got {} dimensions",
            self.ndim()
        );
        self.layout.index1(i).unwrap_or_else(|| {
            panic!(
                "{op}: index {i} out of bounds for dimension of size {}",
                self.layout.size0()
            )
        })
    }

    fn index2_or_panic(&self, op: &str, i: usize, j: usize) -> usize {
        assert_eq!(
            self.ndim(),
            2,
            "{op}: expected a 2-dimensional tensor, got {} dimensions",
            self.ndim()
        );
        self.layout.index2(i, j).unwrap_or_else(|| {
            panic!(
                "{op}: index ({i}, {j}) out of bounds for dimensions {}x{}",
                self.layout.size0(),
                self.layout.size1().unwrap_or(0)
            )
        })
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("layout", &self.layout)
            .field("storage", &self.storage)
            .field("covers_storage", &self.covers_storage)
            .finish()
    }
}

impl fmt::Display for Tensor {
    /// Shape line, storage header, then elements in logical order capped at
    /// 10 per dimension with `...` markers.
    ///
    /// Diagnostic output only; the format is not stable.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.layout.shape() {
            Shape::Rank1 { size0, stride0 } => {
                writeln!(
                    f,
                    "Tensor size {size0} stride {stride0} offset {}",
                    self.layout.offset()
                )?;
                self.storage.fmt_header(f)?;
                writeln!(f)?;
                for i in 0..size0.min(10) {
                    write!(f, " [{i}]={}", self.get1(i))?;
                }
                if size0 > 10 {
                    write!(f, " ...")?;
                }
                Ok(())
            }
            Shape::Rank2 {
                size0,
                size1,
                stride0,
                stride1,
            } => {
                writeln!(
                    f,
                    "Tensor size {size0}x{size1} stride {stride0},{stride1} offset {}",
                    self.layout.offset()
                )?;
                self.storage.fmt_header(f)?;
                for i in 0..size0.min(10) {
                    writeln!(f)?;
                    for j in 0..size1.min(10) {
                        write!(f, " {}", self.get2(i, j))?;
                    }
                    if size1 > 10 {
                        write!(f, " ...")?;
                    }
                }
                if size0 > 10 {
                    writeln!(f)?;
                    write!(f, " ...")?;
                }
                Ok(())
            }
        }
    }
}
