//! Client versions and localized-string layouts.
//!
//! A localized string occupies one string reference per supported locale
//! followed by a 4-byte flags word. How many locales a client stores is a
//! property of the client build, so the schema's `version` element selects
//! the layout.
//!
//! | Version | Client | Locales | Slots |
//! |---------|--------|---------|-------|
//! | `1.12.1`, `1.12.2` | Vanilla | 8 | 9 |
//! | `2.4.3` | The Burning Crusade | 16 | 17 |
//! | `3.3.5`, `3.3.5a` | Wrath of the Lich King | 16 | 17 |

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// Locale codes in on-disk order.
pub const LOCALE_CODES: [&str; 16] = [
    "enUS", "koKR", "frFR", "deDE", "zhCN", "zhTW", "esES", "esMX", "ruRU", "jaJP", "ptPT",
    "itIT", "unk1", "unk2", "unk3", "unk4",
];

/// A client build with a known localized-string layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClientVersion {
    Vanilla,
    BurningCrusade,
    WrathOfTheLichKing,
}

impl ClientVersion {
    /// Resolve a schema `version` string. Returns `None` for unknown builds.
    pub fn parse(version: &str) -> Option<Self> {
        match version.trim() {
            "1.12.1" | "1.12.2" => Some(ClientVersion::Vanilla),
            "2.4.3" => Some(ClientVersion::BurningCrusade),
            "3.3.5" | "3.3.5a" => Some(ClientVersion::WrathOfTheLichKing),
            _ => None,
        }
    }

    /// Number of per-locale strings in a localized string.
    pub fn locale_count(self) -> usize {
        match self {
            ClientVersion::Vanilla => 8,
            ClientVersion::BurningCrusade | ClientVersion::WrathOfTheLichKing => 16,
        }
    }
}

impl fmt::Display for ClientVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientVersion::Vanilla => write!(f, "1.12.x"),
            ClientVersion::BurningCrusade => write!(f, "2.4.3"),
            ClientVersion::WrathOfTheLichKing => write!(f, "3.3.5a"),
        }
    }
}

/// Number of per-locale strings for a schema `version` string.
///
/// Unknown versions yield 0, which disables localized fields: decoding a
/// schema that still declares one fails instead of guessing a layout.
pub fn locale_count(version: &str) -> usize {
    ClientVersion::parse(version).map_or(0, ClientVersion::locale_count)
}

/// Column suffix for the locale at `index`.
pub fn locale_code(index: usize) -> Cow<'static, str> {
    match LOCALE_CODES.get(index) {
        Some(code) => Cow::Borrowed(code),
        None => Cow::Owned(format!("loc{}", index)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_versions() {
        assert_eq!(locale_count("2.4.3"), 16);
        assert_eq!(locale_count("3.3.5a"), 16);
        assert_eq!(locale_count("1.12.1"), 8);
        assert_eq!(locale_count(" 2.4.3 "), 16);
    }

    #[test]
    fn test_unknown_version_has_no_locales() {
        assert_eq!(locale_count("9.9.9"), 0);
        assert_eq!(locale_count(""), 0);
        assert!(ClientVersion::parse("4.3.4").is_none());
    }

    #[test]
    fn test_locale_codes() {
        assert_eq!(locale_code(0), "enUS");
        assert_eq!(locale_code(8), "ruRU");
        assert_eq!(locale_code(15), "unk4");
        assert_eq!(locale_code(16), "loc16");
    }
}
