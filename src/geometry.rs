//! Geometry sinks: where distance constraints publish their endpoints after a
//! step so a renderer can draw them as line segments.

use crate::constraint::ConstraintHandle;
use crate::vec::Vec;
use alloc::vec::Vec as AllocVec;

/// Receives the endpoints of every distance constraint after each step.
///
/// Position constraints own no renderable geometry and never reach the sink.
pub trait GeometrySink<V: Vec> {
    fn segment(&mut self, constraint: ConstraintHandle, a: V, b: V);
}

/// A sink that discards everything.
pub struct NullSink;

impl<V: Vec> GeometrySink<V> for NullSink {
    fn segment(&mut self, _constraint: ConstraintHandle, _a: V, _b: V) {}
}

/// Flat vertex buffer of line segments, two vertices per distance constraint.
///
/// Slots are keyed by constraint index so a renderer can upload `data()` as a
/// vertex attribute. Slots belonging to position constraints stay zeroed.
pub struct SegmentBuffer<V: Vec> {
    data: AllocVec<V::Scalar>,
    scratch: AllocVec<V::Scalar>,
    dirty: bool,
}

impl<V: Vec> SegmentBuffer<V> {
    pub fn new() -> Self {
        SegmentBuffer {
            data: AllocVec::new(),
            scratch: AllocVec::with_capacity(V::DIM * 2),
            dirty: false,
        }
    }

    /// Floats per segment (two endpoints).
    pub fn stride() -> usize {
        V::DIM * 2
    }

    pub fn data(&self) -> &[V::Scalar] {
        &self.data
    }

    /// Components of one segment, if it has been written.
    pub fn segment_at(&self, constraint: ConstraintHandle) -> Option<&[V::Scalar]> {
        let start = constraint.index() * Self::stride();
        self.data.get(start..start + Self::stride())
    }

    /// Number of segment slots allocated so far.
    pub fn len(&self) -> usize {
        self.data.len() / Self::stride()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// `true` if anything was written since the last `take_dirty`.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }
}

impl<V: Vec> Default for SegmentBuffer<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vec> GeometrySink<V> for SegmentBuffer<V> {
    fn segment(&mut self, constraint: ConstraintHandle, a: V, b: V) {
        let stride = Self::stride();
        let start = constraint.index() * stride;
        if self.data.len() < start + stride {
            self.data.resize(start + stride, V::Scalar::default());
        }
        self.scratch.clear();
        a.write_components(&mut self.scratch);
        b.write_components(&mut self.scratch);
        self.data[start..start + stride].copy_from_slice(&self.scratch);
        self.dirty = true;
    }
}
