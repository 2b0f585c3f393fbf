//! Min-max normalization split into its reduce and map passes.
//!
//! The reduce pass ([`Extent::of`]) has to see the whole comparison set
//! before the map pass ([`Extent::normalize`]) can produce any value, which
//! is what makes every normalized attribute set-relative.

/// Observed range of one attribute across a zone set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Smallest observed value.
    pub min: f64,
    /// Largest observed value.
    pub max: f64,
}

impl Extent {
    /// Value assigned to every zone when the attribute does not vary.
    pub const NEUTRAL: f64 = 0.5;

    /// Reduces `values` to their range. Returns `None` for an empty slice.
    #[must_use]
    pub fn of(values: &[f64]) -> Option<Self> {
        let (first, rest) = values.split_first()?;
        Some(rest.iter().fold(
            Self {
                min: *first,
                max: *first,
            },
            |acc, &v| Self {
                min: acc.min.min(v),
                max: acc.max.max(v),
            },
        ))
    }

    /// Whether every observed value was identical.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    /// Maps `value` into `[0, 1]` relative to this range.
    ///
    /// A degenerate range maps everything to [`Self::NEUTRAL`].
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return Self::NEUTRAL;
        }
        (value - self.min) / (self.max - self.min)
    }
}

/// Normalizes every value against the range of the whole slice.
#[must_use]
pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    Extent::of(values).map_or_else(Vec::new, |extent| {
        values.iter().map(|&v| extent.normalize(v)).collect()
    })
}
