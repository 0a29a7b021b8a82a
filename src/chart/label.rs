//! Timestamp labels for the chart's x axis.

use chrono::{DateTime, Datelike as _, FixedOffset, Offset as _, Timelike as _, Utc};

/// Which numbering the hour field uses.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HourCycle {
    /// Hours `00`..=`23`
    H23,
    /// Hours `01`..=`24`; midnight renders as `24`
    #[default]
    H24,
}

impl HourCycle {
    const fn display_hour(self, hour: u32) -> u32 {
        match (self, hour) {
            (Self::H24, 0) => 24,
            (_, hour) => hour,
        }
    }
}

/// Separator conventions for a locale tag.
///
/// Day always precedes month; the locale only decides the punctuation between
/// and after the date fields and between the date and the time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    tag: String,
    date_separator: char,
    date_suffix: &'static str,
    date_time_joiner: &'static str,
}

impl Locale {
    /// Build from a BCP 47 tag such as `en-GB`, `de` or `fr_CA`.
    ///
    /// Only the language subtag is consulted. Unknown languages fall back to
    /// slash-separated dates.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        let (date_separator, date_suffix, date_time_joiner) = match language.as_str() {
            "de" | "da" | "nb" | "no" | "fi" | "cs" | "sk" => ('.', ".", ", "),
            "ru" | "uk" | "pl" | "tr" | "ro" => ('.', "", ", "),
            "fr" | "it" | "pt" => ('/', "", " "),
            "nl" => ('-', "", " "),
            _ => ('/', "", ", "),
        };

        Self {
            tag: tag.to_owned(),
            date_separator,
            date_suffix,
            date_time_joiner,
        }
    }

    /// The tag this locale was built from.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::from_tag("en-GB")
    }
}

/// How sample timestamps become axis labels.
///
/// Rendering is deterministic: the locale, UTC offset and hour cycle are all
/// explicit rather than read from the environment.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFormat {
    pub locale: Locale,
    /// Offset applied before reading wall-clock fields
    pub offset: FixedOffset,
    pub hour_cycle: HourCycle,
}

impl Default for LabelFormat {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            offset: Utc.fix(),
            hour_cycle: HourCycle::default(),
        }
    }
}

impl LabelFormat {
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn with_hour_cycle(mut self, hour_cycle: HourCycle) -> Self {
        self.hour_cycle = hour_cycle;
        self
    }

    /// Render `timestamp` as two-digit day, month, hour and minute.
    #[must_use]
    pub fn format(&self, timestamp: &DateTime<Utc>) -> String {
        let local = timestamp.with_timezone(&self.offset);
        let locale = &self.locale;

        format!(
            "{:02}{}{:02}{}{}{:02}:{:02}",
            local.day(),
            locale.date_separator,
            local.month(),
            locale.date_suffix,
            locale.date_time_joiner,
            self.hour_cycle.display_hour(local.hour()),
            local.minute(),
        )
    }
}
