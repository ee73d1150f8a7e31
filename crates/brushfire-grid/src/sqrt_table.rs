//! Squared-cell-distance to metric-distance lookup.

/// Precomputed `sqrt(i) * resolution` for every integer squared distance
/// `i` in `0..=max_sqrd`.
///
/// Distances stored in the grid are integer squared cell distances bounded
/// by `max_sqrd`, so every query resolves with a single indexed load.
#[derive(Clone, Debug, PartialEq)]
pub struct SqrtTable {
    values: Vec<f64>,
}

impl SqrtTable {
    /// Build a table covering `0..=max_sqrd`.
    pub fn new(max_sqrd: u32, resolution: f64) -> Self {
        let values = (0..=max_sqrd)
            .map(|i| f64::from(i).sqrt() * resolution)
            .collect();
        Self { values }
    }

    /// Metric distance for squared cell distance `sqrd`, or `None` past the
    /// end of the table.
    #[inline]
    pub fn get(&self, sqrd: u32) -> Option<f64> {
        self.values.get(sqrd as usize).copied()
    }

    /// Largest squared distance the table covers.
    pub fn max_sqrd(&self) -> u32 {
        // The table always holds at least the zero entry.
        (self.values.len() - 1) as u32
    }
}
