use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rating given to a single review, ordered worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ReviewQuality {
    /// The answer could not be recalled.
    Forgot = 0,
    /// Recalled with significant effort.
    Hard = 1,
    /// Recalled correctly.
    Good = 2,
    /// Recalled instantly.
    Easy = 3,
}

impl ReviewQuality {
    /// All ratings, worst first.
    pub const ALL: [Self; 4] = [Self::Forgot, Self::Hard, Self::Good, Self::Easy];

    /// Numeric value of the rating (0..=3).
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Whether this rating counts as a lapse and restarts the review cycle.
    pub const fn is_lapse(self) -> bool {
        (self as u8) < (Self::Good as u8)
    }

    /// Lowercase label, used for logging and metric labels.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forgot => "forgot",
            Self::Hard => "hard",
            Self::Good => "good",
            Self::Easy => "easy",
        }
    }
}

/// A raw rating outside `0..=3`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid review quality {0}, expected a value between 0 and 3")]
pub struct InvalidQuality(pub i64);

impl TryFrom<u8> for ReviewQuality {
    type Error = InvalidQuality;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Forgot),
            1 => Ok(Self::Hard),
            2 => Ok(Self::Good),
            3 => Ok(Self::Easy),
            other => Err(InvalidQuality(i64::from(other))),
        }
    }
}

impl TryFrom<i32> for ReviewQuality {
    type Error = InvalidQuality;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| InvalidQuality(i64::from(value)))
            .and_then(Self::try_from)
    }
}
