//! Trading tip rules.
//!
//! Tips are derived from the demand and stability strings exactly as they
//! were scraped. Two rule sets exist and they disagree for the same inputs,
//! so the active one is chosen through [`TipPolicyKind`] in the config.

use super::snapshot::{Demand, Stability};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Returned when no rule produced a tip.
pub const NO_TIPS: &str = "No trading tips available.";

/// A rule set turning demand and stability into advice sentences.
pub trait TipPolicy: Send + Sync + Debug {
    /// Returns the identifier of this policy.
    fn name(&self) -> &str;

    /// Produce the tips for the given inputs, in display order.
    ///
    /// Implementations may return an empty vector; [`TipPolicy::tips`]
    /// substitutes the "no tips" sentence.
    fn evaluate(&self, demand: &str, stability: &str) -> Vec<String>;

    /// Evaluate and guarantee a non-empty result.
    fn tips(&self, demand: &str, stability: &str) -> Vec<String> {
        let tips = self.evaluate(demand, stability);
        if tips.is_empty() {
            vec![NO_TIPS.to_string()]
        } else {
            tips
        }
    }
}

/// Which rule set to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipPolicyKind {
    /// One tip from demand level plus stability weight.
    #[default]
    Combined,
    /// One tip per axis, demand first.
    Independent,
}

impl TipPolicyKind {
    /// Instantiate the policy.
    pub fn build(self) -> Box<dyn TipPolicy> {
        match self {
            Self::Combined => Box::new(CombinedScorePolicy),
            Self::Independent => Box::new(IndependentAxisPolicy),
        }
    }
}

/// Generate tips with the default (combined-score) policy.
pub fn generate_trading_tips(demand: &str, stability: &str) -> Vec<String> {
    CombinedScorePolicy.tips(demand, stability)
}

fn has_demand(demand: &str) -> bool {
    !demand.contains(super::snapshot::NOT_AVAILABLE)
}

/// Sums the demand level and the stability weight into one score.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombinedScorePolicy;

impl CombinedScorePolicy {
    /// Score for the given inputs. `None` when demand is unavailable.
    pub fn score(demand: &str, stability: &str) -> Option<i64> {
        if !has_demand(demand) {
            return None;
        }
        let weight = Stability::parse(stability).map(|s| s.weight()).unwrap_or(0);
        Some(Demand::level_or_zero(demand).saturating_add(weight))
    }

    fn tip_for(score: i64) -> &'static str {
        match score {
            s if s >= 10 => {
                "The market conditions are excellent! It's a great time to sell for high value."
            }
            7..=9 => "Market conditions are good. You can expect decent returns.",
            5..=6 => "Market conditions are average. Plan your trades strategically.",
            3..=4 => {
                "The market is not very favorable right now. It’s better to wait or sell cautiously."
            }
            _ => "The market is unfavorable. It's a risky time to trade.",
        }
    }
}

impl TipPolicy for CombinedScorePolicy {
    fn name(&self) -> &str {
        "combined"
    }

    fn evaluate(&self, demand: &str, stability: &str) -> Vec<String> {
        Self::score(demand, stability)
            .map(|score| vec![Self::tip_for(score).to_string()])
            .unwrap_or_default()
    }
}

/// Rates demand and stability separately.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndependentAxisPolicy;

impl IndependentAxisPolicy {
    fn demand_tip(level: i64) -> &'static str {
        match level {
            l if l >= 9 => "Demand is very high. Expect quick offers at or above value.",
            7..=8 => "Demand is strong. This creature trades easily.",
            5..=6 => "Demand is moderate. Expect some negotiation.",
            3..=4 => "Demand is low. Be ready to overpay or wait for a buyer.",
            _ => "Demand is very low. This creature is hard to trade.",
        }
    }

    fn stability_tip(stability: Stability) -> &'static str {
        match stability {
            Stability::Rising => "Value is rising. Holding may pay off.",
            Stability::Stable => "Value is stable. Trading at listed value is safe.",
            Stability::Fluctuating => "Value is fluctuating. Check recent trades before committing.",
            Stability::Declining => "Value is declining. Consider trading it away soon.",
            Stability::VeryUnstable => "Value is very unstable. Trade with caution.",
        }
    }
}

impl TipPolicy for IndependentAxisPolicy {
    fn name(&self) -> &str {
        "independent"
    }

    fn evaluate(&self, demand: &str, stability: &str) -> Vec<String> {
        let mut tips = Vec::with_capacity(2);

        if has_demand(demand)
            && let Some(parsed) = Demand::parse(demand)
        {
            tips.push(Self::demand_tip(parsed.level).to_string());
        }

        if let Some(parsed) = Stability::parse(stability) {
            tips.push(Self::stability_tip(parsed).to_string());
        }

        tips
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EXCELLENT: &str =
        "The market conditions are excellent! It's a great time to sell for high value.";
    const GOOD: &str = "Market conditions are good. You can expect decent returns.";
    const AVERAGE: &str = "Market conditions are average. Plan your trades strategically.";
    const UNFAVORABLE: &str =
        "The market is not very favorable right now. It’s better to wait or sell cautiously.";
    const RISKY: &str = "The market is unfavorable. It's a risky time to trade.";

    #[test]
    fn test_no_data_yields_placeholder() {
        assert_eq!(generate_trading_tips("N/A", "N/A"), vec![NO_TIPS.to_string()]);
        assert_eq!(
            IndependentAxisPolicy.tips("N/A", "N/A"),
            vec![NO_TIPS.to_string()]
        );
    }

    #[test]
    fn test_combined_excellent() {
        // 9 + 4 = 13
        assert_eq!(CombinedScorePolicy::score("9/10", "RISING"), Some(13));
        assert_eq!(generate_trading_tips("9/10", "RISING"), vec![EXCELLENT.to_string()]);
    }

    #[test]
    fn test_combined_risky() {
        // 2 + 0 = 2
        assert_eq!(
            generate_trading_tips("2/10", "VERY UNSTABLE"),
            vec![RISKY.to_string()]
        );
    }

    #[test]
    fn test_combined_unparseable_demand_defaults_to_zero() {
        // 0 + 3 = 3
        assert_eq!(CombinedScorePolicy::score("abc/10", "STABLE"), Some(3));
        assert_eq!(
            generate_trading_tips("abc/10", "STABLE"),
            vec![UNFAVORABLE.to_string()]
        );
    }

    #[test]
    fn test_combined_tier_boundaries() {
        let cases = [
            ("10/10", "VERY UNSTABLE", EXCELLENT),
            ("6/10", "DECLINING", GOOD),
            ("7/10", "VERY UNSTABLE", GOOD),
            ("3/10", "FLUCTUATING", AVERAGE),
            ("4/10", "DECLINING", AVERAGE),
            ("1/10", "FLUCTUATING", UNFAVORABLE),
            ("4/10", "VERY UNSTABLE", UNFAVORABLE),
            ("2/10", "N/A", RISKY),
        ];
        for (demand, stability, expected) in cases {
            assert_eq!(
                generate_trading_tips(demand, stability),
                vec![expected.to_string()],
                "demand={demand} stability={stability}"
            );
        }
    }

    #[test]
    fn test_huge_demand_is_top_tier() {
        let very_high = "Demand is very high. Expect quick offers at or above value.";
        for demand in ["9223372036854775807/10", "99999999999999999999/10"] {
            assert_eq!(CombinedScorePolicy::score(demand, "RISING"), Some(i64::MAX));
            assert_eq!(generate_trading_tips(demand, "RISING"), vec![EXCELLENT.to_string()]);
            assert_eq!(generate_trading_tips(demand, "STABLE"), vec![EXCELLENT.to_string()]);
            assert_eq!(IndependentAxisPolicy.tips(demand, "RISING")[0], very_high);
            assert_eq!(IndependentAxisPolicy.tips(demand, "STABLE")[0], very_high);
        }
    }

    #[test]
    fn test_huge_negative_demand_is_risky() {
        let demand = "-99999999999999999999/10";
        assert_eq!(generate_trading_tips(demand, "RISING"), vec![RISKY.to_string()]);
        assert_eq!(
            IndependentAxisPolicy.tips(demand, "RISING")[0],
            "Demand is very low. This creature is hard to trade."
        );
    }

    #[test]
    fn test_combined_unknown_stability_weighs_zero() {
        assert_eq!(CombinedScorePolicy::score("5/10", "SIDEWAYS"), Some(5));
    }

    #[test]
    fn test_combined_skips_unavailable_demand() {
        // Stability alone never produces a combined tip.
        assert_eq!(generate_trading_tips("N/A", "RISING"), vec![NO_TIPS.to_string()]);
    }

    #[test]
    fn test_every_label_gives_tips_for_any_demand() {
        for policy in [TipPolicyKind::Combined.build(), TipPolicyKind::Independent.build()] {
            for stability in Stability::ALL {
                for level in 0..=10 {
                    let demand = format!("{level}/10");
                    let tips = policy.tips(&demand, stability.label());
                    assert!(!tips.is_empty());
                    assert_ne!(tips, vec![NO_TIPS.to_string()], "{}", policy.name());
                }
            }
        }
    }

    #[test]
    fn test_independent_two_tips_demand_first() {
        let tips = IndependentAxisPolicy.tips("9/10", "RISING");
        assert_eq!(
            tips,
            vec![
                "Demand is very high. Expect quick offers at or above value.".to_string(),
                "Value is rising. Holding may pay off.".to_string(),
            ]
        );
    }

    #[test]
    fn test_independent_stability_without_demand() {
        let tips = IndependentAxisPolicy.tips("N/A", "STABLE");
        assert_eq!(
            tips,
            vec!["Value is stable. Trading at listed value is safe.".to_string()]
        );

        let tips = IndependentAxisPolicy.tips("abc/10", "DECLINING");
        assert_eq!(
            tips,
            vec!["Value is declining. Consider trading it away soon.".to_string()]
        );
    }

    #[test]
    fn test_independent_demand_tiers() {
        let tier = |d: &str| IndependentAxisPolicy.evaluate(d, "N/A");
        assert_eq!(tier("8/10")[0], "Demand is strong. This creature trades easily.");
        assert_eq!(tier("5/10")[0], "Demand is moderate. Expect some negotiation.");
        assert_eq!(tier("3/10")[0], "Demand is low. Be ready to overpay or wait for a buyer.");
        assert_eq!(tier("0/10")[0], "Demand is very low. This creature is hard to trade.");
    }

    #[test]
    fn test_policies_differ_for_same_input() {
        let combined = TipPolicyKind::Combined.build();
        let independent = TipPolicyKind::Independent.build();
        assert_ne!(
            combined.tips("9/10", "RISING"),
            independent.tips("9/10", "RISING")
        );
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            generate_trading_tips("7/10", "STABLE"),
            generate_trading_tips("7/10", "STABLE")
        );
    }
}
