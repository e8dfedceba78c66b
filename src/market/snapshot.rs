//! Market snapshot of a single creature.

use chrono::{DateTime, Utc};
use std::fmt;
use std::num::IntErrorKind;

/// Placeholder shown for a field the page did not carry.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder shown when the page carried no timestamp.
pub const UNKNOWN: &str = "Unknown";

/// Price stability label scraped from the value page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Rising,
    Stable,
    Fluctuating,
    Declining,
    VeryUnstable,
}

impl Stability {
    /// All labels, best first.
    pub const ALL: [Stability; 5] = [
        Stability::Rising,
        Stability::Stable,
        Stability::Fluctuating,
        Stability::Declining,
        Stability::VeryUnstable,
    ];

    /// Parse a label as it appears on the page.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "RISING" => Some(Self::Rising),
            "STABLE" => Some(Self::Stable),
            "FLUCTUATING" => Some(Self::Fluctuating),
            "DECLINING" => Some(Self::Declining),
            "VERY UNSTABLE" => Some(Self::VeryUnstable),
            _ => None,
        }
    }

    /// The label as it appears on the page.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rising => "RISING",
            Self::Stable => "STABLE",
            Self::Fluctuating => "FLUCTUATING",
            Self::Declining => "DECLINING",
            Self::VeryUnstable => "VERY UNSTABLE",
        }
    }

    /// Score contribution used by the combined tip rule.
    pub fn weight(&self) -> i64 {
        match self {
            Self::Rising => 4,
            Self::Stable => 3,
            Self::Fluctuating => 2,
            Self::Declining => 1,
            Self::VeryUnstable => 0,
        }
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Player demand, written `"<level>/<max>"` on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Demand {
    pub level: i64,
    pub max: Option<i64>,
}

impl Demand {
    /// Parse `"7/10"`. Returns `None` when the leading part is not an integer.
    ///
    /// Integers outside the `i64` range clamp to `i64::MAX` or `i64::MIN`.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.splitn(2, '/');
        let level = parse_clamped(parts.next()?)?;
        let max = parts.next().and_then(parse_clamped);
        Some(Self { level, max })
    }

    /// Leading integer of a demand string, 0 when it does not parse.
    pub fn level_or_zero(raw: &str) -> i64 {
        Self::parse(raw).map(|d| d.level).unwrap_or(0)
    }
}

fn parse_clamped(text: &str) -> Option<i64> {
    match text.trim().parse::<i64>() {
        Ok(n) => Some(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

/// One fetched set of trade fields for a creature.
///
/// Built once by the fetcher and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketSnapshot {
    creature_name: String,
    slug: String,
    value: Option<String>,
    demand: Option<String>,
    stability: Option<String>,
    last_updated: Option<String>,
    fetched_at: DateTime<Utc>,
}

impl MarketSnapshot {
    /// Start building a snapshot for the given display name.
    pub fn builder(creature_name: impl Into<String>) -> MarketSnapshotBuilder {
        let creature_name = creature_name.into().trim().to_string();
        MarketSnapshotBuilder {
            slug: crate::fetch::creature_slug(&creature_name),
            creature_name,
            value: None,
            demand: None,
            stability: None,
            last_updated: None,
        }
    }

    pub fn creature_name(&self) -> &str {
        &self.creature_name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn demand(&self) -> Option<&str> {
        self.demand.as_deref()
    }

    pub fn stability(&self) -> Option<&str> {
        self.stability.as_deref()
    }

    pub fn last_updated(&self) -> Option<&str> {
        self.last_updated.as_deref()
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Value text, or `"N/A"`.
    pub fn value_label(&self) -> &str {
        self.value().unwrap_or(NOT_AVAILABLE)
    }

    /// Demand text, or `"N/A"`.
    pub fn demand_label(&self) -> &str {
        self.demand().unwrap_or(NOT_AVAILABLE)
    }

    /// Stability text, or `"N/A"`.
    pub fn stability_label(&self) -> &str {
        self.stability().unwrap_or(NOT_AVAILABLE)
    }

    /// Timestamp text, or `"Unknown"`.
    pub fn last_updated_label(&self) -> &str {
        self.last_updated().unwrap_or(UNKNOWN)
    }

    /// Parsed stability, if the page carried a known label.
    pub fn parsed_stability(&self) -> Option<Stability> {
        self.stability().and_then(Stability::parse)
    }

    /// Whether at least one trade field was found on the page.
    pub fn has_market_data(&self) -> bool {
        self.value.is_some() || self.demand.is_some() || self.stability.is_some()
    }
}

/// Builder used by the page parser.
#[derive(Debug, Clone)]
pub struct MarketSnapshotBuilder {
    creature_name: String,
    slug: String,
    value: Option<String>,
    demand: Option<String>,
    stability: Option<String>,
    last_updated: Option<String>,
}

impl MarketSnapshotBuilder {
    pub fn value(mut self, value: Option<String>) -> Self {
        self.value = non_empty(value);
        self
    }

    pub fn demand(mut self, demand: Option<String>) -> Self {
        self.demand = non_empty(demand);
        self
    }

    pub fn stability(mut self, stability: Option<String>) -> Self {
        self.stability = non_empty(stability);
        self
    }

    pub fn last_updated(mut self, last_updated: Option<String>) -> Self {
        self.last_updated = non_empty(last_updated);
        self
    }

    pub fn build(self) -> MarketSnapshot {
        MarketSnapshot {
            creature_name: self.creature_name,
            slug: self.slug,
            value: self.value,
            demand: self.demand,
            stability: self.stability,
            last_updated: self.last_updated,
            fetched_at: Utc::now(),
        }
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Format a page timestamp for display. Falls back to the raw text.
pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stability_parse_and_weight() {
        assert_eq!(Stability::parse("RISING"), Some(Stability::Rising));
        assert_eq!(Stability::parse(" VERY UNSTABLE "), Some(Stability::VeryUnstable));
        assert_eq!(Stability::parse("stable"), None);
        assert_eq!(Stability::parse("N/A"), None);

        let weights: Vec<i64> = Stability::ALL.iter().map(|s| s.weight()).collect();
        assert_eq!(weights, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_stability_label_roundtrip() {
        for stability in Stability::ALL {
            assert_eq!(Stability::parse(stability.label()), Some(stability));
        }
    }

    #[test]
    fn test_demand_parse() {
        assert_eq!(Demand::parse("7/10"), Some(Demand { level: 7, max: Some(10) }));
        assert_eq!(Demand::parse(" 3 / 10"), Some(Demand { level: 3, max: Some(10) }));
        assert_eq!(Demand::parse("5"), Some(Demand { level: 5, max: None }));
        assert_eq!(Demand::parse("abc/10"), None);
        assert_eq!(Demand::parse(""), None);
    }

    #[test]
    fn test_demand_parse_clamps_out_of_range() {
        assert_eq!(Demand::level_or_zero("99999999999999999999/10"), i64::MAX);
        assert_eq!(Demand::level_or_zero("-99999999999999999999/10"), i64::MIN);
        assert_eq!(
            Demand::parse("9223372036854775807/10"),
            Some(Demand { level: i64::MAX, max: Some(10) })
        );
        assert_eq!(Demand::level_or_zero("9x9/10"), 0);
    }

    #[test]
    fn test_demand_level_or_zero() {
        assert_eq!(Demand::level_or_zero("9/10"), 9);
        assert_eq!(Demand::level_or_zero("abc/10"), 0);
        assert_eq!(Demand::level_or_zero("N/A"), 0);
    }

    #[test]
    fn test_snapshot_labels_default_to_placeholders() {
        let snapshot = MarketSnapshot::builder("Giga Rex").build();
        assert_eq!(snapshot.creature_name(), "Giga Rex");
        assert_eq!(snapshot.slug(), "giga-rex");
        assert_eq!(snapshot.value_label(), "N/A");
        assert_eq!(snapshot.demand_label(), "N/A");
        assert_eq!(snapshot.stability_label(), "N/A");
        assert_eq!(snapshot.last_updated_label(), "Unknown");
        assert!(!snapshot.has_market_data());
    }

    #[test]
    fn test_snapshot_builder_drops_blank_fields() {
        let snapshot = MarketSnapshot::builder("  Jotunn ")
            .value(Some("  1,200 ".to_string()))
            .demand(Some("   ".to_string()))
            .stability(Some("RISING".to_string()))
            .build();

        assert_eq!(snapshot.creature_name(), "Jotunn");
        assert_eq!(snapshot.value(), Some("1,200"));
        assert_eq!(snapshot.demand(), None);
        assert_eq!(snapshot.parsed_stability(), Some(Stability::Rising));
        assert!(snapshot.has_market_data());
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("2024-06-01T10:15:00+00:00"), "2024-06-01 10:15");
        assert_eq!(format_timestamp("last week"), "last week");
    }
}
