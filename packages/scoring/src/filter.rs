//! Visibility filters and name search over already-scored zones.
//!
//! Everything here borrows from a slice produced by [`crate::score`] and
//! preserves the scores and ranks computed for the full set. Filtering
//! before scoring would renormalize against the subset and silently change
//! every score.

use std::collections::BTreeSet;

use zone_priority_zone_models::{PriorityTier, ScoredZone, ZoneType};

/// Default cap on [`suggestions`].
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Minimum query length (in characters) before suggestions are offered.
const MIN_SUGGESTION_QUERY_LEN: usize = 2;

/// Restricts which scored zones are visible.
///
/// Each criterion is optional; an unset criterion admits every zone. A set
/// criterion that is empty admits none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneFilter {
    names: Option<BTreeSet<String>>,
    tiers: Option<BTreeSet<PriorityTier>>,
    zone_type: Option<ZoneType>,
}

impl ZoneFilter {
    /// A filter that admits every zone.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only admit zones whose name is in `names`.
    #[must_use]
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Only admit zones in one of `tiers`.
    #[must_use]
    pub fn with_tiers<I>(mut self, tiers: I) -> Self
    where
        I: IntoIterator<Item = PriorityTier>,
    {
        self.tiers = Some(tiers.into_iter().collect());
        self
    }

    /// Only admit zones of the given type.
    #[must_use]
    pub const fn with_zone_type(mut self, zone_type: ZoneType) -> Self {
        self.zone_type = Some(zone_type);
        self
    }

    /// Whether `zone` passes every configured criterion.
    #[must_use]
    pub fn matches(&self, zone: &ScoredZone) -> bool {
        self.names
            .as_ref()
            .is_none_or(|names| names.contains(zone.name()))
            && self
                .tiers
                .as_ref()
                .is_none_or(|tiers| tiers.contains(&zone.priority_tier))
            && self.zone_type.is_none_or(|t| t == zone.zone.zone_type)
    }

    /// Returns the visible zones in their original order.
    #[must_use]
    pub fn apply<'a>(&self, scored: &'a [ScoredZone]) -> Vec<&'a ScoredZone> {
        let visible: Vec<&ScoredZone> = scored.iter().filter(|z| self.matches(z)).collect();
        log::debug!("Filter admitted {} of {} zones", visible.len(), scored.len());
        visible
    }
}

/// Zones whose name contains `query`, ignoring case.
///
/// A blank query matches every zone.
#[must_use]
pub fn search_zones<'a>(query: &str, scored: &'a [ScoredZone]) -> Vec<&'a ScoredZone> {
    let query = query.trim();
    if query.is_empty() {
        return scored.iter().collect();
    }

    let needle = query.to_lowercase();
    scored
        .iter()
        .filter(|z| z.name().to_lowercase().contains(&needle))
        .collect()
}

/// Names of zones matching `query`, highest priority first, at most `max`.
///
/// The query is trimmed first; if fewer than two characters remain there
/// are no suggestions.
#[must_use]
pub fn suggestions<'a>(query: &str, scored: &'a [ScoredZone], max: usize) -> Vec<&'a str> {
    if query.trim().chars().count() < MIN_SUGGESTION_QUERY_LEN {
        return Vec::new();
    }

    let mut matches = search_zones(query, scored);
    matches.sort_by_key(|z| z.rank);
    matches.into_iter().take(max).map(ScoredZone::name).collect()
}
