//! The species record and its kingdom taxonomy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ─── Kingdom ─────────────────────────────────────────────────────────────────

/// Taxonomic kingdom – a closed set of six values.
///
/// Serialized as the bare literal name (`"Animalia"`, …), which is also what
/// the `<select>` in the edit form produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kingdom {
    Animalia,
    Plantae,
    Fungi,
    Protista,
    Archaea,
    Bacteria,
}

impl Kingdom {
    /// All kingdoms, in the order the edit form lists them.
    pub const ALL: [Kingdom; 6] = [
        Kingdom::Animalia,
        Kingdom::Plantae,
        Kingdom::Fungi,
        Kingdom::Protista,
        Kingdom::Archaea,
        Kingdom::Bacteria,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kingdom::Animalia => "Animalia",
            Kingdom::Plantae => "Plantae",
            Kingdom::Fungi => "Fungi",
            Kingdom::Protista => "Protista",
            Kingdom::Archaea => "Archaea",
            Kingdom::Bacteria => "Bacteria",
        }
    }
}

impl Default for Kingdom {
    /// Display fallback when no kingdom has been chosen yet.
    fn default() -> Self {
        Kingdom::Animalia
    }
}

impl fmt::Display for Kingdom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a kingdom string outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown kingdom: {0}")]
pub struct UnknownKingdom(pub String);

impl FromStr for Kingdom {
    type Err = UnknownKingdom;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kingdom::ALL
            .iter()
            .find(|k| k.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownKingdom(s.to_string()))
    }
}

// ─── Species record ──────────────────────────────────────────────────────────

/// A single species record as stored in the catalog.
///
/// `id` and `author` are never written by the edit form; `updated_at` is
/// maintained by the store on every successful update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub id: i64,
    pub scientific_name: String,
    pub common_name: Option<String>,
    pub kingdom: Kingdom,
    pub total_population: Option<i64>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub author: String,
    pub updated_at: Option<String>,
}

/// Trim `text` and cut it to at most `max` characters, appending `"..."`
/// when anything was cut.  Used by the read-only detail view (`max = 150`).
pub fn truncate_description(text: &str, max: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max {
        trimmed.to_string()
    } else {
        let mut out: String = trimmed.chars().take(max).collect();
        out.push_str("...");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kingdom_parse_all_literals() {
        for k in Kingdom::ALL {
            assert_eq!(k.as_str().parse::<Kingdom>().unwrap(), k);
        }
    }

    #[test]
    fn test_kingdom_rejects_other_values() {
        assert!("Monera".parse::<Kingdom>().is_err());
        assert!("animalia".parse::<Kingdom>().is_err());
        assert!("".parse::<Kingdom>().is_err());
    }

    #[test]
    fn test_kingdom_serde_literal() {
        let json = serde_json::to_string(&Kingdom::Fungi).unwrap();
        assert_eq!(json, "\"Fungi\"");
        let back: Kingdom = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Kingdom::Fungi);
    }

    #[test]
    fn test_truncate_short_text_untouched() {
        assert_eq!(truncate_description("  a shrub  ", 150), "a shrub");
    }

    #[test]
    fn test_truncate_long_text() {
        let long = "x".repeat(200);
        let out = truncate_description(&long, 150);
        assert_eq!(out.chars().count(), 153);
        assert_eq!(&out[..150], "x".repeat(150));
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_truncate_exact_boundary() {
        let text = "y".repeat(150);
        assert_eq!(truncate_description(&text, 150), text);
    }
}
