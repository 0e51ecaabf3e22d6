//! Plant growth stages.
//!
//! A planted seed goes seedling → sprout → bloom over a fixed span,
//! changing stage at one third and two thirds of it. Growth is cosmetic.

use serde::{Deserialize, Serialize};

/// Visual growth stage. Stored as its integer value (0, 1, 2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GrowthStage {
    Seedling = 0,
    Sprout = 1,
    Bloom = 2,
}

impl GrowthStage {
    /// Stage reached `elapsed_ms` after planting, for a full span of
    /// `span_ms`.
    #[must_use]
    pub fn at(elapsed_ms: u64, span_ms: u64) -> Self {
        let scaled = u128::from(elapsed_ms) * 3;
        let span = u128::from(span_ms);
        if scaled >= span * 2 {
            GrowthStage::Bloom
        } else if scaled >= span {
            GrowthStage::Sprout
        } else {
            GrowthStage::Seedling
        }
    }

    /// Time after planting at which this stage begins.
    #[must_use]
    pub fn starts_after(self, span_ms: u64) -> u64 {
        match self {
            GrowthStage::Seedling => 0,
            GrowthStage::Sprout => span_ms.div_ceil(3),
            GrowthStage::Bloom => {
                let starts = (u128::from(span_ms) * 2).div_ceil(3);
                u64::try_from(starts).unwrap_or(u64::MAX)
            }
        }
    }

    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            GrowthStage::Seedling => Some(GrowthStage::Sprout),
            GrowthStage::Sprout => Some(GrowthStage::Bloom),
            GrowthStage::Bloom => None,
        }
    }

    /// Stages that follow this one, in order.
    pub fn later(self) -> impl Iterator<Item = GrowthStage> {
        std::iter::successors(self.next(), |stage| stage.next())
    }
}

impl From<GrowthStage> for u8 {
    fn from(stage: GrowthStage) -> u8 {
        stage as u8
    }
}

impl TryFrom<u8> for GrowthStage {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(GrowthStage::Seedling),
            1 => Ok(GrowthStage::Sprout),
            2 => Ok(GrowthStage::Bloom),
            other => Err(format!("invalid growth stage {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPAN: u64 = 60_000;

    #[test]
    fn test_stage_boundaries() {
        assert_eq!(GrowthStage::at(0, SPAN), GrowthStage::Seedling);
        assert_eq!(GrowthStage::at(19_999, SPAN), GrowthStage::Seedling);
        assert_eq!(GrowthStage::at(20_000, SPAN), GrowthStage::Sprout);
        assert_eq!(GrowthStage::at(39_999, SPAN), GrowthStage::Sprout);
        assert_eq!(GrowthStage::at(40_000, SPAN), GrowthStage::Bloom);
        assert_eq!(GrowthStage::at(10 * SPAN, SPAN), GrowthStage::Bloom);
    }

    #[test]
    fn test_starts_after_agrees_with_at() {
        for span in [60_000, 1_000, 10, 7, u64::MAX] {
            for stage in [GrowthStage::Seedling, GrowthStage::Sprout, GrowthStage::Bloom] {
                let start = stage.starts_after(span);
                assert_eq!(GrowthStage::at(start, span), stage, "span {span}");
                if start > 0 {
                    assert!(GrowthStage::at(start - 1, span) < stage, "span {span}");
                }
            }
        }
    }

    #[test]
    fn test_zero_span_blooms_immediately() {
        assert_eq!(GrowthStage::at(0, 0), GrowthStage::Bloom);
    }

    #[test]
    fn test_later() {
        let later: Vec<_> = GrowthStage::Seedling.later().collect();
        assert_eq!(later, vec![GrowthStage::Sprout, GrowthStage::Bloom]);
        assert_eq!(GrowthStage::Bloom.later().count(), 0);
    }

    #[test]
    fn test_serde_as_integer() {
        assert_eq!(serde_json::to_string(&GrowthStage::Sprout).unwrap(), "1");
        let stage: GrowthStage = serde_json::from_str("2").unwrap();
        assert_eq!(stage, GrowthStage::Bloom);
        assert!(serde_json::from_str::<GrowthStage>("3").is_err());
    }
}
