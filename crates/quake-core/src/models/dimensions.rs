//! The two enumerated query dimensions of the USGS summary feeds.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::QuakeError;

/// Magnitude filter of a feed (first query dimension).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Magnitude {
    Unspecified,
    Significant,
    M4_5Plus,
    M2_5Plus,
    M1_0Plus,
    /// Every event regardless of magnitude. A superset of all other filters.
    All,
}

impl Magnitude {
    /// Every magnitude value in declaration order.
    pub const ALL_VALUES: [Magnitude; 6] = [
        Magnitude::Unspecified,
        Magnitude::Significant,
        Magnitude::M4_5Plus,
        Magnitude::M2_5Plus,
        Magnitude::M1_0Plus,
        Magnitude::All,
    ];

    /// Canonical enum name, used to build cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Magnitude::Unspecified => "MAGNITUDE_UNSPECIFIED",
            Magnitude::Significant => "MAGNITUDE_SIGNIFICANT",
            Magnitude::M4_5Plus => "MAGNITUDE_M4_5_PLUS",
            Magnitude::M2_5Plus => "MAGNITUDE_M2_5_PLUS",
            Magnitude::M1_0Plus => "MAGNITUDE_M1_0_PLUS",
            Magnitude::All => "MAGNITUDE_ALL",
        }
    }

    /// Path segment used by the USGS feed URLs.
    pub fn feed_segment(&self) -> &'static str {
        match self {
            Magnitude::Significant => "significant",
            Magnitude::M4_5Plus => "4.5",
            Magnitude::M2_5Plus => "2.5",
            Magnitude::M1_0Plus => "1.0",
            Magnitude::All | Magnitude::Unspecified => "all",
        }
    }
}

impl FromStr for Magnitude {
    type Err = QuakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "magnitude_unspecified" => Ok(Magnitude::Unspecified),
            "significant" | "magnitude_significant" => Ok(Magnitude::Significant),
            "4.5" | "magnitude_m4_5_plus" => Ok(Magnitude::M4_5Plus),
            "2.5" | "magnitude_m2_5_plus" => Ok(Magnitude::M2_5Plus),
            "1.0" | "magnitude_m1_0_plus" => Ok(Magnitude::M1_0Plus),
            "all" | "magnitude_all" => Ok(Magnitude::All),
            _ => Err(QuakeError::InvalidArgument {
                field: "magnitude".to_string(),
                message: format!("unknown magnitude filter '{}'", s),
            }),
        }
    }
}

impl std::fmt::Display for Magnitude {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recency window of a feed (second query dimension).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Past {
    Unspecified,
    Hour,
    Day,
    SevenDays,
    ThirtyDays,
}

impl Past {
    /// Every window in declaration order.
    pub const ALL_VALUES: [Past; 5] = [
        Past::Unspecified,
        Past::Hour,
        Past::Day,
        Past::SevenDays,
        Past::ThirtyDays,
    ];

    /// Windows searched by identifier lookups, narrowest first.
    pub const FAN_OUT: [Past; 4] = [Past::Hour, Past::Day, Past::SevenDays, Past::ThirtyDays];

    /// Canonical enum name, used to build cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Past::Unspecified => "PAST_UNSPECIFIED",
            Past::Hour => "PAST_HOUR",
            Past::Day => "PAST_DAY",
            Past::SevenDays => "PAST_7DAYS",
            Past::ThirtyDays => "PAST_30DAYS",
        }
    }

    /// Path segment used by the USGS feed URLs.
    pub fn feed_segment(&self) -> &'static str {
        match self {
            Past::Hour => "hour",
            Past::Day | Past::Unspecified => "day",
            Past::SevenDays => "week",
            Past::ThirtyDays => "month",
        }
    }
}

impl FromStr for Past {
    type Err = QuakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "past_unspecified" => Ok(Past::Unspecified),
            "hour" | "past_hour" => Ok(Past::Hour),
            "day" | "past_day" => Ok(Past::Day),
            "week" | "7days" | "past_7days" => Ok(Past::SevenDays),
            "month" | "30days" | "past_30days" => Ok(Past::ThirtyDays),
            _ => Err(QuakeError::InvalidArgument {
                field: "past".to_string(),
                message: format!("unknown recency window '{}'", s),
            }),
        }
    }
}

impl std::fmt::Display for Past {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude_parses_both_spellings() {
        for magnitude in Magnitude::ALL_VALUES {
            let parsed: Magnitude = magnitude.as_str().parse().expect("Should parse");
            assert_eq!(parsed, magnitude);
        }
        assert_eq!("4.5".parse::<Magnitude>().unwrap(), Magnitude::M4_5Plus);
        assert_eq!("ALL".parse::<Magnitude>().unwrap(), Magnitude::All);
    }

    #[test]
    fn test_past_parses_both_spellings() {
        for past in Past::ALL_VALUES {
            let parsed: Past = past.as_str().parse().expect("Should parse");
            assert_eq!(parsed, past);
        }
        assert_eq!("week".parse::<Past>().unwrap(), Past::SevenDays);
        assert_eq!("30days".parse::<Past>().unwrap(), Past::ThirtyDays);
    }

    #[test]
    fn test_unknown_values_are_rejected() {
        let err = "7.0".parse::<Magnitude>().unwrap_err();
        assert!(matches!(err, QuakeError::InvalidArgument { ref field, .. } if field == "magnitude"));
        assert!("year".parse::<Past>().is_err());
    }

    #[test]
    fn test_fan_out_skips_unspecified() {
        assert!(!Past::FAN_OUT.contains(&Past::Unspecified));
        assert_eq!(Past::FAN_OUT.len(), Past::ALL_VALUES.len() - 1);
    }
}
