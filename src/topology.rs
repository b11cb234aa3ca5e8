//! Initial web topology: points, links between them, and anchored points.
//!
//! A [`Topology`] is plain data handed to [`crate::Web::from_topology`]. It can
//! be assembled by hand, laid out as a cloth of bars, or welded together from
//! a list of line segments exported by a modelling tool.

use crate::error::WebError;
use crate::float::Float;
use crate::vec::{MountPlane, Vec};
use alloc::vec::Vec as AllocVec;

/// A distance link between two points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Link<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_length: F,
}

/// Which cloth points get position constraints.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ClothAnchors {
    #[default]
    None,
    /// Every point in row 0.
    TopRow,
    /// The four corner points.
    Corners,
    /// Every point on the outer edge.
    Border,
}

/// Layout of a rectangular cloth of bars.
///
/// `cols` × `rows` cells means `(cols + 1) × (rows + 1)` points. Bars whose
/// `bar_length` is shorter than `spacing` start stretched, so the cloth pulls
/// itself taut on the first steps.
#[derive(Copy, Clone, Debug)]
pub struct ClothConfig<F: Float> {
    pub cols: usize,
    pub rows: usize,
    pub spacing: F,
    pub bar_length: F,
    pub anchors: ClothAnchors,
}

impl<F: Float> ClothConfig<F> {
    /// A 10 × 10 web: 55-unit spacing, 50-unit bars.
    pub fn classic() -> Self {
        ClothConfig {
            cols: 10,
            rows: 10,
            spacing: F::from_f32(55.0),
            bar_length: F::from_f32(50.0),
            anchors: ClothAnchors::None,
        }
    }

    pub fn with_anchors(mut self, anchors: ClothAnchors) -> Self {
        self.anchors = anchors;
        self
    }
}

/// Points, links, and anchors of a web before simulation.
#[derive(Clone, Debug)]
pub struct Topology<V: Vec> {
    pub points: AllocVec<V>,
    pub links: AllocVec<Link<V::Scalar>>,
    /// Points pinned by a position constraint at their initial position.
    pub anchors: AllocVec<usize>,
}

impl<V: Vec> Topology<V> {
    pub fn new() -> Self {
        Topology {
            points: AllocVec::new(),
            links: AllocVec::new(),
            anchors: AllocVec::new(),
        }
    }

    pub fn add_point(&mut self, pos: V) -> usize {
        self.points.push(pos);
        self.points.len() - 1
    }

    pub fn link(&mut self, a: usize, b: usize, rest_length: V::Scalar) -> &mut Self {
        self.links.push(Link { a, b, rest_length });
        self
    }

    /// Link two existing points at their current separation.
    ///
    /// Panics if either index is out of bounds.
    pub fn link_taut(&mut self, a: usize, b: usize) -> &mut Self {
        let rest_length = self.points[a].distance(self.points[b]);
        self.link(a, b, rest_length)
    }

    pub fn anchor(&mut self, index: usize) -> &mut Self {
        if !self.anchors.contains(&index) {
            self.anchors.push(index);
        }
        self
    }

    pub fn point_count(&self) -> usize { self.points.len() }
    pub fn link_count(&self) -> usize { self.links.len() }

    /// Check every index and rest length.
    pub fn validate(&self) -> Result<(), WebError> {
        let count = self.points.len();
        for link in &self.links {
            for index in [link.a, link.b] {
                if index >= count {
                    return Err(WebError::ParticleOutOfBounds { index, count });
                }
            }
            if link.a == link.b {
                return Err(WebError::SelfLink { index: link.a });
            }
            if !link.rest_length.is_finite() || link.rest_length < V::Scalar::zero() {
                return Err(WebError::InvalidRestLength);
            }
        }
        for &index in &self.anchors {
            if index >= count {
                return Err(WebError::ParticleOutOfBounds { index, count });
            }
        }
        Ok(())
    }
}

impl<V: Vec> Default for Topology<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: MountPlane> Topology<V> {
    /// Lay out a cloth centred on `origin` in the mounting plane.
    ///
    /// Point (col, row) has index `row * (cols + 1) + col`. Links are emitted
    /// point by point: the bar to the left neighbour, then the bar to the
    /// neighbour above.
    pub fn cloth(origin: V, config: &ClothConfig<V::Scalar>) -> Self {
        let cols = config.cols;
        let rows = config.rows;
        let width = cols + 1;
        let spacing = config.spacing;
        let half = V::Scalar::half();
        let start_x = -(V::Scalar::from_f32(cols as f32) * spacing) * half;
        let start_y = -(V::Scalar::from_f32(rows as f32) * spacing) * half;

        let mut topology = Topology::new();
        for row in 0..=rows {
            for col in 0..=cols {
                let x = start_x + V::Scalar::from_f32(col as f32) * spacing;
                let y = start_y + V::Scalar::from_f32(row as f32) * spacing;
                let index = topology.add_point(origin + V::in_plane(x, y));

                if col != 0 {
                    topology.link(index - 1, index, config.bar_length);
                }
                if row != 0 {
                    topology.link(index - width, index, config.bar_length);
                }
            }
        }

        for row in 0..=rows {
            for col in 0..=cols {
                let on_top = row == 0;
                let on_edge = on_top || row == rows || col == 0 || col == cols;
                let on_corner = (row == 0 || row == rows) && (col == 0 || col == cols);
                let pinned = match config.anchors {
                    ClothAnchors::None => false,
                    ClothAnchors::TopRow => on_top,
                    ClothAnchors::Corners => on_corner,
                    ClothAnchors::Border => on_edge,
                };
                if pinned {
                    topology.anchor(row * width + col);
                }
            }
        }

        topology
    }
}

impl<V: Vec> Topology<V> {
    /// Weld a list of segments into a web.
    ///
    /// Endpoints within `weld_tolerance` of an existing point reuse it. Each
    /// segment becomes a link at its own length. Segments that collapse to a
    /// single point or repeat an existing link are dropped.
    pub fn from_segments(segments: &[(V, V)], weld_tolerance: V::Scalar) -> Self {
        let tolerance_sq = weld_tolerance * weld_tolerance;
        let mut topology = Topology::new();

        for &(start, end) in segments {
            let a = topology.weld(start, tolerance_sq);
            let b = topology.weld(end, tolerance_sq);
            if a == b {
                continue;
            }
            let duplicate = topology
                .links
                .iter()
                .any(|l| (l.a == a && l.b == b) || (l.a == b && l.b == a));
            if !duplicate {
                topology.link(a, b, start.distance(end));
            }
        }

        topology
    }

    fn weld(&mut self, pos: V, tolerance_sq: V::Scalar) -> usize {
        match self.points.iter().position(|p| p.distance_sq(pos) <= tolerance_sq) {
            Some(index) => index,
            None => self.add_point(pos),
        }
    }
}
