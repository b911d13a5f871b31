//! Display strings and date formatting per locale.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Supported display locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Japanese.
    #[default]
    Ja,
    /// English.
    En,
}

impl Locale {
    /// Shown in place of an empty author name.
    #[must_use]
    pub fn anonymous_label(self) -> &'static str {
        match self {
            Self::Ja => "匿名",
            Self::En => "anonymous",
        }
    }

    /// Shown when there are no posts.
    #[must_use]
    pub fn empty_message(self) -> &'static str {
        match self {
            Self::Ja => "まだ投稿がありません。最初のメッセージを投稿しましょう！",
            Self::En => "No posts yet. Be the first to leave a message!",
        }
    }

    /// Accessible label of a card's delete control.
    #[must_use]
    pub fn delete_label(self) -> &'static str {
        match self {
            Self::Ja => "投稿を削除",
            Self::En => "Delete post",
        }
    }

    /// `strftime` pattern for display times.
    #[must_use]
    pub fn time_pattern(self) -> &'static str {
        match self {
            Self::Ja => "%Y/%m/%d %H:%M",
            Self::En => "%Y-%m-%d %H:%M",
        }
    }

    /// BCP 47 tag, also used for the `lang` attribute of HTML output.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Ja => "ja-JP",
            Self::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ja => write!(f, "ja"),
            Self::En => write!(f, "en"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ja" | "ja-jp" => Ok(Self::Ja),
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}

/// Formats post timestamps for display.
///
/// Output depends only on the timestamp, the locale's pattern and the
/// configured offset. Without an offset the local time zone is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormatter {
    pattern: &'static str,
    offset: Option<FixedOffset>,
}

impl DateFormatter {
    /// Formatter for `locale` in the local time zone.
    #[must_use]
    pub fn local(locale: Locale) -> Self {
        Self {
            pattern: locale.time_pattern(),
            offset: None,
        }
    }

    /// Formatter for `locale` at a fixed offset from UTC.
    #[must_use]
    pub fn with_offset(locale: Locale, offset: FixedOffset) -> Self {
        Self {
            pattern: locale.time_pattern(),
            offset: Some(offset),
        }
    }

    /// Human-readable time, e.g. `2024/01/15 09:05`.
    ///
    /// Timestamps outside chrono's range fall back to the raw number.
    #[must_use]
    pub fn display(&self, timestamp: i64) -> String {
        let Some(utc) = DateTime::<Utc>::from_timestamp_millis(timestamp) else {
            return timestamp.to_string();
        };
        match self.offset {
            Some(offset) => utc.with_timezone(&offset).format(self.pattern).to_string(),
            None => utc.with_timezone(&Local).format(self.pattern).to_string(),
        }
    }

    /// Machine-readable UTC time with millisecond precision,
    /// e.g. `2024-01-15T00:05:00.000Z`.
    #[must_use]
    pub fn iso(timestamp: i64) -> String {
        DateTime::<Utc>::from_timestamp_millis(timestamp).map_or_else(
            || timestamp.to_string(),
            |utc| utc.to_rfc3339_opts(SecondsFormat::Millis, true),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-01-15T00:05:00Z
    const TS: i64 = 1_705_277_100_000;

    fn jst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    #[test]
    fn test_locale_default() {
        assert_eq!(Locale::default(), Locale::Ja);
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("ja".parse::<Locale>().unwrap(), Locale::Ja);
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("ja-JP".parse::<Locale>().unwrap(), Locale::Ja);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_locale_display_round_trips() {
        for locale in [Locale::Ja, Locale::En] {
            assert_eq!(locale.to_string().parse::<Locale>().unwrap(), locale);
        }
    }

    #[test]
    fn test_locale_serde() {
        assert_eq!(serde_json::to_string(&Locale::En).unwrap(), r#""en""#);
        let parsed: Locale = serde_json::from_str(r#""ja""#).unwrap();
        assert_eq!(parsed, Locale::Ja);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Locale::Ja.anonymous_label(), "匿名");
        assert_eq!(Locale::En.anonymous_label(), "anonymous");
        assert_eq!(Locale::Ja.delete_label(), "投稿を削除");
        assert!(!Locale::En.empty_message().is_empty());
    }

    #[test]
    fn test_display_ja_with_offset() {
        let dates = DateFormatter::with_offset(Locale::Ja, jst());
        assert_eq!(dates.display(TS), "2024/01/15 09:05");
    }

    #[test]
    fn test_display_en_utc() {
        let dates = DateFormatter::with_offset(Locale::En, FixedOffset::east_opt(0).unwrap());
        assert_eq!(dates.display(TS), "2024-01-15 00:05");
    }

    #[test]
    fn test_display_is_deterministic() {
        let dates = DateFormatter::with_offset(Locale::Ja, jst());
        assert_eq!(dates.display(TS), dates.display(TS));
    }

    #[test]
    fn test_display_local_does_not_panic() {
        let dates = DateFormatter::local(Locale::Ja);
        assert_eq!(dates.display(TS).len(), "2024/01/15 09:05".len());
    }

    #[test]
    fn test_iso() {
        assert_eq!(DateFormatter::iso(TS), "2024-01-15T00:05:00.000Z");
        assert_eq!(DateFormatter::iso(1000), "1970-01-01T00:00:01.000Z");
    }

    #[test]
    fn test_out_of_range_timestamp() {
        let dates = DateFormatter::with_offset(Locale::Ja, jst());
        assert_eq!(dates.display(i64::MAX), i64::MAX.to_string());
        assert_eq!(DateFormatter::iso(i64::MAX), i64::MAX.to_string());
    }
}
