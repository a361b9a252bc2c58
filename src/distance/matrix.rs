//! Dense travel-time matrix.

use crate::models::Position;

/// A dense n×n travel-time matrix stored in row-major order.
///
/// Index 0 is the depot, indices `1..n` are clients. The matrix may be
/// asymmetric.
///
/// # Examples
///
/// ```
/// use care_routing::distance::TravelTimes;
/// use care_routing::models::Position;
///
/// let tt = TravelTimes::from_positions(&[
///     Position::new(0.0, 0.0),
///     Position::new(3.0, 4.0),
///     Position::new(6.0, 8.0),
/// ]);
/// assert!((tt.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(tt.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TravelTimes {
    data: Vec<f64>,
    size: usize,
}

impl TravelTimes {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Euclidean travel times between positions (depot first).
    pub fn from_positions(positions: &[Position]) -> Self {
        let n = positions.len();
        let mut tt = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = positions[i].distance_to(&positions[j]);
                tt.set(i, j, d);
                tt.set(j, i, d);
            }
        }
        tt
    }

    /// Creates a matrix from nested rows.
    ///
    /// Returns `None` unless every row has as many entries as there are rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(Self {
            data: rows.into_iter().flatten().collect(),
            size,
        })
    }

    /// Travel time from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the travel time from `from` to `to`.
    pub fn set(&mut self, from: usize, to: usize, time: f64) {
        self.data[from * self.size + to] = time;
    }

    /// Number of locations, depot included.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Travel time of `depot → route[0] → … → route[n-1] → depot`.
    ///
    /// Zero for an empty route.
    pub fn route_time(&self, route: &[usize]) -> f64 {
        let (Some(&first), Some(&last)) = (route.first(), route.last()) else {
            return 0.0;
        };
        let inner: f64 = route.windows(2).map(|w| self.get(w[0], w[1])).sum();
        self.get(0, first) + inner + self.get(last, 0)
    }
}
