//! Layout: shape, strides and offset mapping logical indices to storage

/// Logical extents and storage strides of a tensor, by rank.
///
/// Strides are in elements, not bytes. A negative stride has no
/// representation here; constructors reject a zero stride and the crate never
/// builds reversed views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// One-dimensional view
    Rank1 {
        /// Number of elements
        size0: usize,
        /// Storage step between consecutive elements
        stride0: usize,
    },
    /// Two-dimensional view
    Rank2 {
        /// Number of rows
        size0: usize,
        /// Number of columns
        size1: usize,
        /// Storage step between consecutive rows
        stride0: usize,
        /// Storage step between consecutive columns
        stride1: usize,
    },
}

impl Shape {
    /// Get the number of dimensions (1 or 2)
    #[inline]
    pub fn ndim(&self) -> usize {
        match self {
            Shape::Rank1 { .. } => 1,
            Shape::Rank2 { .. } => 2,
        }
    }

    /// Get the total number of logical elements
    #[inline]
    pub fn elem_count(&self) -> usize {
        match *self {
            Shape::Rank1 { size0, .. } => size0,
            Shape::Rank2 { size0, size1, .. } => size0 * size1,
        }
    }
}

/// Maps logical tensor indices to absolute storage indices.
///
/// A layout is a [`Shape`] plus the storage offset of the element at logical
/// index 0 (or (0, 0)). The element at logical `(i, j)` of a rank-2 layout
/// lives at storage index `offset + i * stride0 + j * stride1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    shape: Shape,
    offset: usize,
}

impl Layout {
    /// Create a contiguous 1D layout starting at storage index 0
    pub fn contiguous1(size0: usize) -> Self {
        Self {
            shape: Shape::Rank1 { size0, stride0: 1 },
            offset: 0,
        }
    }

    /// Create a contiguous row-major 2D layout starting at storage index 0
    pub fn contiguous2(size0: usize, size1: usize) -> Self {
        Self {
            shape: Shape::Rank2 {
                size0,
                size1,
                stride0: size1,
                stride1: 1,
            },
            offset: 0,
        }
    }

    /// Create an arbitrary 1D layout.
    ///
    /// No bounds are checked here; offset and extent validation against a
    /// concrete storage happens at the tensor layer.
    pub fn strided1(offset: usize, size0: usize, stride0: usize) -> Self {
        Self {
            shape: Shape::Rank1 { size0, stride0 },
            offset,
        }
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Get the storage offset of the first logical element
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get the number of dimensions (1 or 2)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Get the total number of logical elements
    #[inline]
    pub fn elem_count(&self) -> usize {
        self.shape.elem_count()
    }

    /// Get the size of the first dimension
    #[inline]
    pub fn size0(&self) -> usize {
        match self.shape {
            Shape::Rank1 { size0, .. } | Shape::Rank2 { size0, .. } => size0,
        }
    }

    /// Get the stride of the first dimension
    #[inline]
    pub fn stride0(&self) -> usize {
        match self.shape {
            Shape::Rank1 { stride0, .. } | Shape::Rank2 { stride0, .. } => stride0,
        }
    }

    /// Get the size of the second dimension, if rank 2
    #[inline]
    pub fn size1(&self) -> Option<usize> {
        match self.shape {
            Shape::Rank1 { .. } => None,
            Shape::Rank2 { size1, .. } => Some(size1),
        }
    }

    /// Get the stride of the second dimension, if rank 2
    #[inline]
    pub fn stride1(&self) -> Option<usize> {
        match self.shape {
            Shape::Rank1 { .. } => None,
            Shape::Rank2 { stride1, .. } => Some(stride1),
        }
    }

    /// Storage index of logical element `i` of a rank-1 layout.
    ///
    /// Returns `None` if `i` is out of bounds or the layout is rank 2.
    #[inline]
    pub fn index1(&self, i: usize) -> Option<usize> {
        match self.shape {
            Shape::Rank1 { size0, stride0 } if i < size0 => Some(self.offset + i * stride0),
            _ => None,
        }
    }

    /// Storage index of logical element `(i, j)` of a rank-2 layout.
    ///
    /// Returns `None` if either index is out of bounds or the layout is
    /// rank 1.
    #[inline]
    pub fn index2(&self, i: usize, j: usize) -> Option<usize> {
        match self.shape {
            Shape::Rank2 {
                size0,
                size1,
                stride0,
                stride1,
            } if i < size0 && j < size1 => Some(self.offset + i * stride0 + j * stride1),
            _ => None,
        }
    }

    /// Storage index of the last logical element, without bounds assumptions.
    ///
    /// Saturates instead of overflowing so callers can compare the result
    /// against a storage length safely. Meaningless for empty shapes.
    pub(crate) fn last_index(&self) -> usize {
        match self.shape {
            Shape::Rank1 { size0, stride0 } => self
                .offset
                .saturating_add(size0.saturating_sub(1).saturating_mul(stride0)),
            Shape::Rank2 {
                size0,
                size1,
                stride0,
                stride1,
            } => self
                .offset
                .saturating_add(size0.saturating_sub(1).saturating_mul(stride0))
                .saturating_add(size1.saturating_sub(1).saturating_mul(stride1)),
        }
    }
}
