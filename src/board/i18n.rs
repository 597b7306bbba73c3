//! Board messages and date formatting in the two supported languages.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Fr => write!(f, "fr"),
        }
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "fr" => Ok(Language::Fr),
            _ => anyhow::bail!("Unsupported language '{}'. Valid values: en, fr", s),
        }
    }
}

impl Language {
    /// Unknown codes fall back to English.
    pub fn from_code(code: &str) -> Self {
        code.parse().unwrap_or_default()
    }

    pub fn messages(self) -> &'static Messages {
        match self {
            Language::En => &EN,
            Language::Fr => &FR,
        }
    }
}

/// Fixed UI strings for one language.
#[derive(Debug)]
pub struct Messages {
    pub filter_text: &'static str,
    pub filter_status: &'static str,
    pub filter_label: &'static str,
    pub filter_state: &'static str,
    pub no_results: &'static str,
    pub updated: &'static str,
    showing_results: &'static str,
    months: [&'static str; 12],
}

impl Messages {
    /// "Showing {count} of {total} issues".
    pub fn showing_results(&self, count: usize, total: usize) -> String {
        self.showing_results
            .replace("{count}", &count.to_string())
            .replace("{total}", &total.to_string())
    }
}

static EN: Messages = Messages {
    filter_text: "Text",
    filter_status: "Status",
    filter_label: "Label",
    filter_state: "State",
    no_results: "No issues match your filters",
    updated: "Updated",
    showing_results: "Showing {count} of {total} issues",
    months: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
};

static FR: Messages = Messages {
    filter_text: "Texte",
    filter_status: "Statut",
    filter_label: "Étiquette",
    filter_state: "État",
    no_results: "Aucun ticket ne correspond à vos filtres",
    updated: "Mis à jour",
    showing_results: "{count} sur {total} tickets affichés",
    months: [
        "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
        "nov.", "déc.",
    ],
};

fn parse_date(iso: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(iso.get(..10)?, "%Y-%m-%d").ok()
}

/// Short date such as `Dec 31, 2025` / `31 déc. 2025`. Unparseable input yields `None`.
pub fn format_simple_date(iso: &str, lang: Language) -> Option<String> {
    let date = parse_date(iso)?;
    let month = lang.messages().months[date.month0() as usize];
    Some(match lang {
        Language::En => format!("{} {}, {}", month, date.day(), date.year()),
        Language::Fr => format!("{} {} {}", date.day(), month, date.year()),
    })
}

/// Date with time of day, used for the dataset's generation stamp.
pub fn format_date_time(iso: &str, lang: Language) -> Option<String> {
    let dt = DateTime::parse_from_rfc3339(iso).ok()?;
    let day = format_simple_date(iso, lang)?;
    Some(match lang {
        Language::En => {
            let (pm, hour) = dt.hour12();
            format!(
                "{}, {:02}:{:02} {}",
                day,
                hour,
                dt.minute(),
                if pm { "PM" } else { "AM" }
            )
        }
        Language::Fr => format!("{} {:02}:{:02}", day, dt.hour(), dt.minute()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parsing() {
        assert_eq!("FR".parse::<Language>().unwrap(), Language::Fr);
        assert!("de".parse::<Language>().is_err());
        assert_eq!(Language::from_code("de"), Language::En);
        assert_eq!(Language::Fr.to_string(), "fr");
    }

    #[test]
    fn test_showing_results_interpolates() {
        assert_eq!(
            Language::En.messages().showing_results(3, 12),
            "Showing 3 of 12 issues"
        );
        assert_eq!(
            Language::Fr.messages().showing_results(1, 2),
            "1 sur 2 tickets affichés"
        );
    }

    #[test]
    fn test_format_simple_date() {
        assert_eq!(
            format_simple_date("2025-12-31T00:00:00Z", Language::En).as_deref(),
            Some("Dec 31, 2025")
        );
        assert_eq!(
            format_simple_date("2025-12-31T00:00:00Z", Language::Fr).as_deref(),
            Some("31 déc. 2025")
        );
        assert_eq!(
            format_simple_date("2026-03-01", Language::En).as_deref(),
            Some("Mar 1, 2026")
        );
        assert_eq!(format_simple_date("soon", Language::En), None);
        assert_eq!(format_simple_date("", Language::En), None);
    }

    #[test]
    fn test_format_date_time() {
        assert_eq!(
            format_date_time("2025-06-02T14:05:00Z", Language::En).as_deref(),
            Some("Jun 2, 2025, 02:05 PM")
        );
        assert_eq!(
            format_date_time("2025-06-02T14:05:00Z", Language::Fr).as_deref(),
            Some("2 juin 2025 14:05")
        );
    }
}
