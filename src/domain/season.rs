// ============================================================
// Layer 3 — Seasons and Season Patterns
// ============================================================
// A training example strings together sequences from a run of
// flu seasons, e.g. winter → summer → winter.
//
// Winters are northern-hemisphere seasons that straddle a year
// boundary: the winter "of" year Y runs from October of Y-1
// to May of Y. Summers are southern-hemisphere seasons inside
// a single calendar year.
//
// A pattern is walked position by position. The year advances
// on every step EXCEPT winter → summer, because the summer that
// follows the winter of Y is also in Y:
//
//   pattern  W      S      W
//   year     Y      Y      Y+1
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::SamplerError;

/// Longest pattern a composite sequence can encode
/// (three segments need exactly two delimiters).
pub const MAX_PATTERN_LEN: usize = 3;

/// A season tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// Northern-hemisphere winter (Oct of Y-1 .. May of Y)
    Winter,
    /// Southern-hemisphere summer flu season of Y
    Summer,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Winter => write!(f, "winter"),
            Season::Summer => write!(f, "summer"),
        }
    }
}

impl FromStr for Season {
    type Err = SamplerError;

    /// Accepts "w"/"winter" and "s"/"summer", case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "w" | "winter" => Ok(Season::Winter),
            "s" | "summer" => Ok(Season::Summer),
            other => Err(SamplerError::configuration(format!(
                "unknown season tag '{other}', expected winter or summer"
            ))),
        }
    }
}

/// An ordered list of 1 to 3 season tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonPattern(Vec<Season>);

impl SeasonPattern {
    /// Build a pattern, rejecting empty ones and ones longer than three.
    pub fn new(seasons: Vec<Season>) -> Result<Self, SamplerError> {
        if seasons.is_empty() {
            return Err(SamplerError::configuration("season pattern must not be empty"));
        }
        if seasons.len() > MAX_PATTERN_LEN {
            return Err(SamplerError::configuration(format!(
                "Please only supply patterns of length {MAX_PATTERN_LEN} (got {})",
                seasons.len()
            )));
        }
        Ok(Self(seasons))
    }

    /// Parse a comma separated pattern such as "W,S,W"
    pub fn parse(text: &str) -> Result<Self, SamplerError> {
        let seasons = text
            .split(',')
            .map(str::parse)
            .collect::<Result<Vec<Season>, _>>()?;
        Self::new(seasons)
    }

    /// The season tags in order
    pub fn seasons(&self) -> &[Season] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pair every position with the year it samples, starting at `pivot`.
    pub fn year_walk(&self, pivot: i32) -> Vec<(Season, i32)> {
        let mut walk         = Vec::with_capacity(self.0.len());
        let mut current_year = pivot;

        for (i, season) in self.0.iter().enumerate() {
            if i > 0 {
                let same_year = self.0[i - 1] == Season::Winter && *season == Season::Summer;
                if !same_year {
                    current_year += 1;
                }
            }
            walk.push((*season, current_year));
        }

        walk
    }
}

/// Winter → summer → winter, the pattern training examples use.
impl Default for SeasonPattern {
    fn default() -> Self {
        Self(vec![Season::Winter, Season::Summer, Season::Winter])
    }
}

impl fmt::Display for SeasonPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<String> = self.0.iter().map(Season::to_string).collect();
        write!(f, "{}", tags.join(","))
    }
}

// ─── Month Bounds ─────────────────────────────────────────────────────────────
/// Months bounding the northern winter of year Y:
/// Y records with month <= upper, Y-1 records with month >= lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WinterBounds {
    pub upper: u32,
    pub lower: u32,
}

impl Default for WinterBounds {
    fn default() -> Self {
        Self { upper: 5, lower: 10 }
    }
}

impl WinterBounds {
    /// Returns true if a record dated (year, month) belongs to the winter of `winter_year`
    pub fn accepts(&self, winter_year: i32, year: i32, month: u32) -> bool {
        (year == winter_year && month <= self.upper)
            || (year == winter_year - 1 && month >= self.lower)
    }
}

/// Months bounding the southern summer season of a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummerBounds {
    pub lower: u32,
    pub upper: u32,
}

impl Default for SummerBounds {
    fn default() -> Self {
        Self { lower: 5, upper: 10 }
    }
}

/// How a summer candidate is tested against SummerBounds.
///
/// `MonthBand` keeps records of the summer year whose month lies in
/// `[lower, upper]`. `WinterBounds` reproduces the older behaviour where
/// summers were filtered with the winter predicate, fed the summer bounds
/// (upper = 10, lower = 5). Since the summer pool only holds records of the
/// summer year, that keeps every month up to October.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummerRule {
    #[default]
    MonthBand,
    WinterBounds,
}

impl SummerBounds {
    /// Returns true if a record dated (year, month) belongs to the summer of `summer_year`
    pub fn accepts(&self, rule: SummerRule, summer_year: i32, year: i32, month: u32) -> bool {
        match rule {
            SummerRule::MonthBand => {
                year == summer_year && (self.lower..=self.upper).contains(&month)
            }
            SummerRule::WinterBounds => WinterBounds { upper: self.upper, lower: self.lower }
                .accepts(summer_year, year, month),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wsw_walk_stays_in_pivot_for_summer() {
        let walk = SeasonPattern::default().year_walk(2012);
        assert_eq!(
            walk,
            vec![(Season::Winter, 2012), (Season::Summer, 2012), (Season::Winter, 2013)]
        );
    }

    #[test]
    fn test_summer_then_winter_advances() {
        let pattern = SeasonPattern::parse("s,w,w").unwrap();
        let years: Vec<i32> = pattern.year_walk(2010).into_iter().map(|(_, y)| y).collect();
        assert_eq!(years, vec![2010, 2011, 2012]);
    }

    #[test]
    fn test_pattern_longer_than_three_is_rejected() {
        let err = SeasonPattern::parse("W,S,W,S").unwrap_err();
        assert!(matches!(err, SamplerError::Configuration(_)));
    }

    #[test]
    fn test_empty_pattern_is_rejected() {
        assert!(SeasonPattern::new(Vec::new()).is_err());
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        assert!("autumn".parse::<Season>().is_err());
        assert_eq!("Winter".parse::<Season>().unwrap(), Season::Winter);
    }

    #[test]
    fn test_winter_bounds_default() {
        let w = WinterBounds::default();
        assert!(w.accepts(2012, 2012, 5));
        assert!(!w.accepts(2012, 2012, 6));
        assert!(w.accepts(2012, 2011, 10));
        assert!(!w.accepts(2012, 2011, 9));
        assert!(!w.accepts(2012, 2010, 12));
    }

    #[test]
    fn test_summer_month_band() {
        let s = SummerBounds::default();
        assert!(s.accepts(SummerRule::MonthBand, 2012, 2012, 5));
        assert!(s.accepts(SummerRule::MonthBand, 2012, 2012, 10));
        assert!(!s.accepts(SummerRule::MonthBand, 2012, 2012, 4));
        assert!(!s.accepts(SummerRule::MonthBand, 2012, 2011, 7));
    }

    #[test]
    fn test_summer_legacy_rule_keeps_early_months() {
        let s = SummerBounds::default();
        // Legacy predicate: same year and month <= 10
        assert!(s.accepts(SummerRule::WinterBounds, 2012, 2012, 1));
        assert!(!s.accepts(SummerRule::WinterBounds, 2012, 2012, 11));
    }
}
