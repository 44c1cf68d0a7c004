use serde::{Deserialize, Deserializer};
use crate::error::ConfigError;

/// One entry of a `column` or `id` list: a single index or an inclusive `"A-B"` range.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum IndexEntry {
    Single(usize),
    Text(String),
}

/// Parse a textual index entry: `"7"` or `"0-5"` (inclusive).
pub fn parse_index_entry(text: &str) -> Result<Vec<usize>, ConfigError> {
    let trimmed = text.trim();
    let bad = || ConfigError::IndexRange(text.to_string());
    match trimmed.split_once('-') {
        Some((a, b)) => {
            let start: usize = a.trim().parse().map_err(|_| bad())?;
            let end: usize = b.trim().parse().map_err(|_| bad())?;
            if start > end {
                return Err(bad());
            }
            Ok((start..=end).collect())
        }
        None => trimmed.parse::<usize>().map(|v| vec![v]).map_err(|_| bad()),
    }
}

/// serde helper expanding a list of index entries into a flat `Vec<usize>`.
pub fn deserialize_indices<'de, D>(deserializer: D) -> Result<Vec<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<IndexEntry>::deserialize(deserializer)?;
    let mut out = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            IndexEntry::Single(v) => out.push(v),
            IndexEntry::Text(s) => {
                out.extend(parse_index_entry(&s).map_err(serde::de::Error::custom)?)
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "deserialize_indices")]
        ids: Vec<usize>,
    }

    #[test]
    fn ranges_expand_inclusively() {
        let h: Holder = serde_json::from_str(r#"{"ids": [3, "5-7", "10"]}"#).unwrap();
        assert_eq!(h.ids, vec![3, 5, 6, 7, 10]);
    }

    #[test]
    fn reversed_range_is_rejected() {
        assert!(parse_index_entry("7-5").is_err());
        assert!(parse_index_entry("x").is_err());
        assert!(serde_json::from_str::<Holder>(r#"{"ids": ["2-a"]}"#).is_err());
    }
}
