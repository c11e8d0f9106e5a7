use super::*;

/// An ordered run of 3D vertices.
///
/// Any number of vertices is accepted; a polyline with less than 2 vertices simply has no
/// segments.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Polyline3(Vec<Point3>);

impl Polyline3 {
    pub fn new<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point3>,
    {
        Polyline3(points.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pts(&self) -> &[Point3] {
        &self.0
    }

    pub fn first(&self) -> Option<Point3> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<Point3> {
        self.0.last().copied()
    }

    /// Number of segments, `max(0, len - 1)`.
    pub fn segment_count(&self) -> usize {
        self.len().saturating_sub(1)
    }

    /// Consecutive vertex pairs.
    pub fn segments(&self) -> impl ExactSizeIterator<Item = (Point3, Point3)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    /// Returns if the first and last vertex are within `tolerance`.
    pub fn is_closed(&self, tolerance: f64) -> bool {
        self.len() > 2
            && match (self.first(), self.last()) {
                (Some(a), Some(b)) => dist(a, b) <= tolerance,
                _ => false,
            }
    }

    /// Removes vertices within `tolerance` of the previously kept vertex.
    ///
    /// The first vertex is always kept, and the last vertex replaces the last kept vertex if
    /// it was dropped. Every remaining segment is longer than `tolerance`; a polyline that
    /// folds back onto its first vertex collapses to that vertex.
    /// Returns the number of removed vertices.
    ///
    /// ```rust
    /// # use geom_encode::*;
    /// let mut p = Polyline3::new([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.001, 0.0], [2.0, 0.0, 0.0]]);
    /// assert_eq!(p.delete_short_segments(0.01), 1);
    /// assert_eq!(p.len(), 3);
    /// ```
    pub fn delete_short_segments(&mut self, tolerance: f64) -> usize {
        let kept = self.retained_vertices(tolerance);
        let removed = self.len() - kept.len();
        if removed > 0 {
            self.0 = kept.into_iter().map(|i| self.0[i]).collect();
        }
        removed
    }

    /// The indices of the vertices [`Polyline3::delete_short_segments`] keeps, ascending.
    pub fn retained_vertices(&self, tolerance: f64) -> Vec<usize> {
        let pts = self.pts();
        let Some(last) = pts.len().checked_sub(1) else {
            return Vec::new();
        };

        let mut kept = Vec::with_capacity(pts.len());
        kept.push(0);
        for i in 1..pts.len() {
            // kept always holds the first vertex
            let prev = kept[kept.len() - 1];
            if dist(pts[prev], pts[i]) > tolerance {
                kept.push(i);
            }
        }

        let n = kept.len();
        if n > 1 && kept[n - 1] != last {
            kept[n - 1] = last;
            // moving the end can shorten the final segment, fold back until it is long enough
            while kept.len() > 1 && dist(pts[kept[kept.len() - 2]], pts[last]) <= tolerance {
                if kept.len() > 2 {
                    kept.remove(kept.len() - 2);
                } else {
                    kept.pop();
                }
            }
        }

        kept
    }
}

impl FromIterator<Point3> for Polyline3 {
    fn from_iter<T: IntoIterator<Item = Point3>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl IntoIterator for Polyline3 {
    type Item = Point3;
    type IntoIter = std::vec::IntoIter<Self::Item>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
