//! Supported content locales.

use serde::Serialize;

/// A locale the back-office can hold asset metadata for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Locale {
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
}

pub const SUPPORTED_LOCALES: &[Locale] = &[
    Locale {
        code: "en",
        name: "English",
        flag: "🇺🇸",
    },
    Locale {
        code: "es",
        name: "Español",
        flag: "🇪🇸",
    },
    Locale {
        code: "fr",
        name: "Français",
        flag: "🇫🇷",
    },
    Locale {
        code: "de",
        name: "Deutsch",
        flag: "🇩🇪",
    },
    Locale {
        code: "it",
        name: "Italiano",
        flag: "🇮🇹",
    },
    Locale {
        code: "pt",
        name: "Português",
        flag: "🇵🇹",
    },
];

impl Locale {
    /// Look up a supported locale by code (case-insensitive).
    pub fn find(code: &str) -> Option<&'static Locale> {
        SUPPORTED_LOCALES
            .iter()
            .find(|l| l.code.eq_ignore_ascii_case(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_is_case_insensitive() {
        assert_eq!(Locale::find("ES").map(|l| l.flag), Some("🇪🇸"));
        assert!(Locale::find("xx").is_none());
    }

    #[test]
    fn default_locale_is_supported() {
        assert!(Locale::find(crate::constants::DEFAULT_LOCALE).is_some());
    }
}
