//! Byte-size parsing: accepts `"200kb"`, `"1mb"`, `"5gb"`, or a bare integer.
//!
//! Grounded on `original_source/src/docpull/models/config.py`'s `ByteSize`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A byte count, deserializable from either an integer or a human string
/// like `"200kb"`/`"1mb"`/`"5gb"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ByteSize(pub usize);

impl ByteSize {
    #[must_use]
    pub fn bytes(&self) -> usize {
        self.0
    }
}

impl FromStr for ByteSize {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<usize>() {
            return Ok(Self(n));
        }
        let lower = trimmed.to_ascii_lowercase();
        // Check longer suffixes first so "gb" isn't matched as "b".
        for (suffix, multiplier) in [("gb", 1024 * 1024 * 1024), ("mb", 1024 * 1024), ("kb", 1024), ("b", 1)] {
            if let Some(number) = lower.strip_suffix(suffix) {
                let number: f64 = number
                    .trim()
                    .parse()
                    .map_err(|_| anyhow::anyhow!("invalid byte size: {s}"))?;
                return Ok(Self((number * multiplier as f64) as usize));
            }
        }
        Err(anyhow::anyhow!("invalid byte size: {s}"))
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ByteSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0 as u64)
    }
}

impl<'de> Deserialize<'de> for ByteSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(u64),
            Text(String),
        }
        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(Self(n as usize)),
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

impl From<usize> for ByteSize {
    fn from(n: usize) -> Self {
        Self(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_integer() {
        assert_eq!("1024".parse::<ByteSize>().unwrap().bytes(), 1024);
    }

    #[test]
    fn parses_kb_mb_gb() {
        assert_eq!("200kb".parse::<ByteSize>().unwrap().bytes(), 200 * 1024);
        assert_eq!("1mb".parse::<ByteSize>().unwrap().bytes(), 1024 * 1024);
        assert_eq!("5gb".parse::<ByteSize>().unwrap().bytes(), 5 * 1024 * 1024 * 1024);
    }

    #[test]
    fn rejects_garbage() {
        assert!("not-a-size".parse::<ByteSize>().is_err());
    }
}
