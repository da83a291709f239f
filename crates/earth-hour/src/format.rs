//! Human-readable rendering of instants.
//!
//! Month names come from chrono's locale tables (`unstable-locales`). The
//! locale is given as a BCP 47-ish tag (`"en"`, `"nl"`, `"en-GB"`, `"pt_BR"`);
//! only the language subtag decides between an English ordinal day
//! ("29th") and a bare numeral ("29").

use chrono::{DateTime, Datelike, Locale};
use chrono_tz::Tz;

/// How the day of month is rendered in [`friendly_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStyle {
    /// English ordinal: 1st, 2nd, 3rd, 4th, 11th, 21st.
    Ordinal,
    /// Plain numeral.
    Plain,
}

impl DayStyle {
    /// Pick the day style for a locale tag.
    pub fn for_locale(tag: &str) -> Self {
        match language(tag).as_str() {
            "en" => DayStyle::Ordinal,
            _ => DayStyle::Plain,
        }
    }

    fn render(self, day: u32) -> String {
        match self {
            DayStyle::Ordinal => format!("{day}{}", ordinal_suffix(day)),
            DayStyle::Plain => day.to_string(),
        }
    }
}

/// English ordinal suffix for `n`: "st", "nd", "rd", or "th" (11–13 take "th").
pub fn ordinal_suffix(n: u32) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Render the local date of `instant` as `"{day} {Month}[ {Year}]"`.
///
/// # Examples
///
/// ```
/// use earth_hour::format::friendly_date;
/// use earth_hour::recurrence::occurrence_start;
///
/// let start = occurrence_start(2025, "Europe/Amsterdam").unwrap();
/// assert_eq!(friendly_date(&start, "en", true), "29th March 2025");
/// assert_eq!(friendly_date(&start, "nl", true), "29 maart 2025");
/// ```
pub fn friendly_date(instant: &DateTime<Tz>, locale: &str, include_year: bool) -> String {
    let day = DayStyle::for_locale(locale).render(instant.day());
    let month = instant
        .format_localized("%B", chrono_locale(locale))
        .to_string();
    if include_year {
        format!("{day} {month} {}", instant.year())
    } else {
        format!("{day} {month}")
    }
}

/// Local time of `instant` as 24-hour `HH:mm`.
pub fn friendly_time(instant: &DateTime<Tz>) -> String {
    instant.format("%H:%M").to_string()
}

/// Local ISO 8601 datetime with milliseconds, followed by the UTC offset in
/// parentheses, e.g. `2025-03-29T20:30:00.000(+01:00)`.
pub fn iso_with_offset_bracket(instant: &DateTime<Tz>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%S%.3f(%:z)").to_string()
}

/// Lowercased language subtag of a locale tag.
fn language(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Map a locale tag onto chrono's locale table, falling back to `en_US`.
fn chrono_locale(tag: &str) -> Locale {
    let lang = language(tag);
    let region = tag
        .trim()
        .split(['-', '_'])
        .nth(1)
        .map(|r| r.to_ascii_uppercase());

    let mut candidates = Vec::with_capacity(2);
    if let Some(region) = region {
        candidates.push(format!("{lang}_{region}"));
    }
    candidates.push(match default_locale(&lang) {
        Some(name) => name.to_string(),
        None => format!("{lang}_{}", lang.to_ascii_uppercase()),
    });

    candidates
        .iter()
        .find_map(|name| Locale::try_from(name.as_str()).ok())
        .unwrap_or(Locale::en_US)
}

/// chrono locale for a bare language subtag whose region is not simply the
/// language uppercased (`nl` → `nl_NL` needs no entry).
fn default_locale(lang: &str) -> Option<&'static str> {
    let name = match lang {
        "en" => "en_US",
        "ar" => "ar_SA",
        "cs" => "cs_CZ",
        "da" => "da_DK",
        "el" => "el_GR",
        "et" => "et_EE",
        "he" => "he_IL",
        "ja" => "ja_JP",
        "ko" => "ko_KR",
        "no" | "nb" => "nb_NO",
        "nn" => "nn_NO",
        "sl" => "sl_SI",
        "sv" => "sv_SE",
        "uk" => "uk_UA",
        "zh" => "zh_CN",
        _ => return None,
    };
    Some(name)
}

// ── Tests ───────────────────────────────────────────────────────────────────
