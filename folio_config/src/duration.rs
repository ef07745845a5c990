use std::{ops::Deref, str::FromStr};

use serde::Deserialize;

/// A duration written as whitespace separated `<number><unit>` parts, e.g.
/// `"80s"`, `"10m"` or `"1h 30m"`. Supported units are `ms`, `s`, `m`, `h`
/// and `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for Duration {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .try_fold(std::time::Duration::ZERO, |total, part| {
                let split = part
                    .find(|c: char| !c.is_ascii_digit())
                    .ok_or("Missing duration unit")?;
                let (value, unit) = part.split_at(split);
                let value = value.parse::<u64>().map_err(|_| "Invalid duration value")?;
                let part = match unit {
                    "ms" => std::time::Duration::from_millis(value),
                    "s" => std::time::Duration::from_secs(value),
                    "m" => std::time::Duration::from_secs(value.saturating_mul(60)),
                    "h" => std::time::Duration::from_secs(value.saturating_mul(60 * 60)),
                    "d" => std::time::Duration::from_secs(value.saturating_mul(24 * 60 * 60)),
                    _ => return Err("Invalid duration unit"),
                };
                total.checked_add(part).ok_or("Duration too long")
            })
            .map(Self)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration() {
        for (input, expected) in [
            ("80s", Some(80_000)),
            ("10m", Some(10 * 60 * 1000)),
            ("250ms", Some(250)),
            ("2h", Some(2 * 60 * 60 * 1000)),
            ("1d", Some(24 * 60 * 60 * 1000)),
            ("1h 30m", Some(90 * 60 * 1000)),
            ("", Some(0)),
            ("80", None),
            ("m", None),
            ("10x", None),
            ("10mm", None),
            ("1.5h", None),
        ] {
            let input = serde_json::Value::String(input.into());
            let output = serde_json::from_value::<Duration>(input)
                .ok()
                .map(|x| x.0.as_millis());
            assert_eq!(output, expected);
        }
    }
}
