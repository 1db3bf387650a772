//! Score tiers used by the sector deep-dive screen.

use serde::{Deserialize, Serialize};

/// Gauge band for a sector health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthBand {
    /// Score at or below 3.5.
    Weak,
    Steady,
    /// Score at or above 6.5.
    Strong,
}

impl HealthBand {
    pub const WEAK_MAX: f64 = 3.5;
    pub const STRONG_MIN: f64 = 6.5;

    pub fn from_score(score: f64) -> Self {
        if score >= Self::STRONG_MIN {
            HealthBand::Strong
        } else if score <= Self::WEAK_MAX {
            HealthBand::Weak
        } else {
            HealthBand::Steady
        }
    }

    /// Gauge bar color.
    pub fn color(&self) -> &'static str {
        match self {
            HealthBand::Strong => "#09ab3b",
            HealthBand::Steady => "#faca2b",
            HealthBand::Weak => "#ff4b4b",
        }
    }
}

/// Five-tier investment verdict derived from a model's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl Verdict {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 8.0 => Verdict::StrongBuy,
            s if s >= 6.5 => Verdict::Buy,
            s if s >= 4.0 => Verdict::Hold,
            s if s >= 2.0 => Verdict::Sell,
            _ => Verdict::StrongSell,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::StrongBuy => "STRONG BUY",
            Verdict::Buy => "BUY",
            Verdict::Hold => "HOLD",
            Verdict::Sell => "SELL",
            Verdict::StrongSell => "STRONG SELL",
        }
    }

    /// Card accent color.
    pub fn accent(&self) -> &'static str {
        match self {
            Verdict::StrongBuy => "#1b5e20",
            Verdict::Buy => "#33691e",
            Verdict::Hold => "#bf8d0a",
            Verdict::Sell => "#e65100",
            Verdict::StrongSell => "#b71c1c",
        }
    }
}
