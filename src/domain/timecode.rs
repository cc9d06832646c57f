use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A position in the audio stream with millisecond precision.
///
/// Rendered as `HH:MM:SS.mmm`. Parsing also accepts `HH:MM:SS` and the SRT
/// form `HH:MM:SS,mmm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timecode(u64);

impl Timecode {
    pub const ZERO: Timecode = Timecode(0);

    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Saturates at the largest representable timecode.
    pub fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(1000))
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Milliseconds from `earlier` to `self`, zero when `earlier` is later.
    pub fn millis_since(&self, earlier: Timecode) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimecodeParseError {
    #[error("malformed timecode: {0}")]
    Malformed(String),
    #[error("timecode component out of range: {0}")]
    OutOfRange(String),
}

impl FromStr for Timecode {
    type Err = TimecodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let (clock, fraction) = match raw.find([',', '.']) {
            Some(idx) => (&raw[..idx], Some(&raw[idx + 1..])),
            None => (raw, None),
        };

        let parts: Vec<&str> = clock.split(':').collect();
        if parts.len() != 3 {
            return Err(TimecodeParseError::Malformed(raw.to_string()));
        }

        let parse = |part: &str| {
            part.parse::<u64>()
                .map_err(|_| TimecodeParseError::Malformed(raw.to_string()))
        };
        let hours = parse(parts[0])?;
        let minutes = parse(parts[1])?;
        let seconds = parse(parts[2])?;
        if minutes >= 60 || seconds >= 60 {
            return Err(TimecodeParseError::OutOfRange(raw.to_string()));
        }

        let millis = match fraction {
            None => 0,
            Some(f) if f.is_empty() || f.len() > 3 || !f.bytes().all(|b| b.is_ascii_digit()) => {
                return Err(TimecodeParseError::Malformed(raw.to_string()));
            }
            // "5" means 500ms, "05" means 50ms
            Some(f) => parse(f)? * 10u64.pow(3 - f.len() as u32),
        };

        hours
            .checked_mul(3600)
            .and_then(|s| s.checked_add(minutes * 60 + seconds))
            .and_then(|s| s.checked_mul(1000))
            .and_then(|ms| ms.checked_add(millis))
            .map(Self)
            .ok_or_else(|| TimecodeParseError::OutOfRange(raw.to_string()))
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self.0 % 1000;
        let total_secs = self.0 / 1000;
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            total_secs / 3600,
            (total_secs / 60) % 60,
            total_secs % 60,
            millis
        )
    }
}

impl Serialize for Timecode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timecode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
