//! Editions and legacy syntax markers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered identifier selecting a bundle of default features.
///
/// Variants are declared in ascending raw-value order, so the derived
/// `Ord` matches protobuf's numeric edition ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum Edition {
    #[default]
    #[serde(rename = "EDITION_UNKNOWN")]
    Unknown = 0,
    #[serde(rename = "EDITION_LEGACY")]
    Legacy = 900,
    #[serde(rename = "EDITION_PROTO2")]
    Proto2 = 998,
    #[serde(rename = "EDITION_PROTO3")]
    Proto3 = 999,
    #[serde(rename = "EDITION_2023")]
    Edition2023 = 1000,
    #[serde(rename = "EDITION_2024")]
    Edition2024 = 1001,
    #[serde(rename = "EDITION_MAX")]
    Max = i32::MAX,
}

impl Edition {
    /// Protobuf wire value.
    pub fn raw(self) -> i32 {
        self as i32
    }

    /// Whether this edition predates editions (proto2/proto3 syntax).
    pub fn is_legacy_syntax(self) -> bool {
        self < Edition::Edition2023
    }

    /// Edition implied by a file's `syntax`/`edition` pair.
    ///
    /// Unrecognized syntax strings fall back to proto2, matching protoc's
    /// treatment of a missing syntax statement.
    pub fn from_syntax(syntax: Option<&str>, edition: Option<Edition>) -> Edition {
        match syntax {
            Some("editions") => edition.unwrap_or(Edition::Unknown),
            Some("proto3") => Edition::Proto3,
            _ => Edition::Proto2,
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Edition::Unknown => "unknown",
            Edition::Legacy => "legacy",
            Edition::Proto2 => "proto2",
            Edition::Proto3 => "proto3",
            Edition::Edition2023 => "2023",
            Edition::Edition2024 => "2024",
            Edition::Max => "max",
        };
        f.write_str(s)
    }
}
