//! Display title selection by fuzzy match against thumbnail names.

use serde::{Deserialize, Serialize};

use crate::similarity::ratio;

/// Which candidate wins when several clear the threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Highest score; ties go to the earliest candidate
    #[default]
    Best,
    /// Earliest candidate above the threshold
    #[serde(rename = "first")]
    FirstAbove,
}

impl MatchStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Best => "best",
            Self::FirstAbove => "first",
        }
    }
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string cannot be parsed into a `MatchStrategy`.
#[derive(Debug, Clone)]
pub struct MatchStrategyParseError(pub String);

impl std::fmt::Display for MatchStrategyParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown match strategy: '{}' (expected best or first)", self.0)
    }
}

impl std::error::Error for MatchStrategyParseError {}

impl std::str::FromStr for MatchStrategy {
    type Err = MatchStrategyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "best" => Ok(Self::Best),
            "first" => Ok(Self::FirstAbove),
            _ => Err(MatchStrategyParseError(s.to_string())),
        }
    }
}

/// A candidate title and its similarity to the fallback title.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleMatch<'a> {
    pub title: &'a str,
    pub score: f64,
}

/// Picks a thumbnail title for a ROM when one is similar enough.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleMatcher {
    threshold: f64,
    strategy: MatchStrategy,
}

impl TitleMatcher {
    pub const DEFAULT_THRESHOLD: f64 = 0.70;

    /// `threshold` is a strict lower bound: a score equal to it does not match.
    pub fn new(threshold: f64, strategy: MatchStrategy) -> Self {
        Self {
            threshold,
            strategy,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// The winning candidate, if any scores strictly above the threshold.
    pub fn find<'a>(&self, fallback: &str, candidates: &'a [String]) -> Option<TitleMatch<'a>> {
        let mut scored = candidates.iter().map(|c| TitleMatch {
            title: c.as_str(),
            score: ratio(c, fallback),
        });

        match self.strategy {
            MatchStrategy::Best => {
                let mut best: Option<TitleMatch<'a>> = None;
                for m in scored {
                    if best.is_none_or(|b| m.score > b.score) {
                        best = Some(m);
                    }
                }
                best.filter(|b| b.score > self.threshold)
            }
            MatchStrategy::FirstAbove => scored.find(|m| m.score > self.threshold),
        }
    }

    /// The display title: the winning candidate, or `fallback` unchanged.
    pub fn pick(&self, fallback: &str, candidates: &[String]) -> String {
        match self.find(fallback, candidates) {
            Some(m) => {
                log::debug!(
                    "Title '{}' -> '{}' (score {:.3})",
                    fallback,
                    m.title,
                    m.score
                );
                m.title.to_string()
            }
            None => fallback.to_string(),
        }
    }
}

impl Default for TitleMatcher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD, MatchStrategy::Best)
    }
}

#[cfg(test)]
#[path = "tests/title_tests.rs"]
mod tests;
