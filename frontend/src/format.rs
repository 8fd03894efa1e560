//! Locale-aware formatting of currency, dates and times.
//!
//! Only a handful of locales matter for the deployment, so the conventions
//! live in a small table instead of pulling ICU data into the wasm bundle.
//! Every formatter returns [`PLACEHOLDER`] instead of failing.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::{Decimal, RoundingStrategy};

/// Shown in place of a value that could not be parsed.
pub const PLACEHOLDER: &str = "N/A";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Conventions {
    tag: &'static str,
    group: &'static str,
    decimal: char,
    symbol_after: bool,
    date_pattern: &'static str,
}

const EN_US: Conventions = Conventions {
    tag: "en-us",
    group: ",",
    decimal: '.',
    symbol_after: false,
    date_pattern: "%-m/%-d/%Y",
};

const LOCALES: &[Conventions] = &[
    EN_US,
    Conventions {
        tag: "en-gb",
        group: ",",
        decimal: '.',
        symbol_after: false,
        date_pattern: "%d/%m/%Y",
    },
    Conventions {
        tag: "en-ke",
        group: ",",
        decimal: '.',
        symbol_after: false,
        date_pattern: "%d/%m/%Y",
    },
    Conventions {
        tag: "sw-ke",
        group: ",",
        decimal: '.',
        symbol_after: false,
        date_pattern: "%d/%m/%Y",
    },
    Conventions {
        tag: "de-de",
        group: ".",
        decimal: ',',
        symbol_after: true,
        date_pattern: "%d.%m.%Y",
    },
    Conventions {
        tag: "fr-fr",
        group: "\u{202f}",
        decimal: ',',
        symbol_after: true,
        date_pattern: "%d/%m/%Y",
    },
];

fn lookup_conventions(locale: &str) -> Conventions {
    let wanted = locale.trim().replace('_', "-").to_ascii_lowercase();
    if let Some(exact) = LOCALES.iter().find(|c| c.tag == wanted) {
        return *exact;
    }
    let language = wanted.split('-').next().unwrap_or_default();
    LOCALES
        .iter()
        .find(|c| c.tag.split('-').next() == Some(language))
        .copied()
        .unwrap_or(EN_US)
}

fn currency_symbol(code: &str) -> String {
    match code.to_ascii_uppercase().as_str() {
        "USD" => "$".to_string(),
        "KES" => "KSh".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        other => other.to_string(),
    }
}

/// Formatting rules for one locale / currency pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocaleFormat {
    locale: String,
    currency: String,
    symbol: String,
    conventions: Conventions,
}

impl Default for LocaleFormat {
    fn default() -> Self {
        Self::new("en-KE", "KES")
    }
}

impl LocaleFormat {
    /// Unknown locales fall back to `en-US` conventions.
    pub fn new(locale: &str, currency: &str) -> Self {
        let currency = currency.trim().to_ascii_uppercase();
        Self {
            locale: locale.trim().to_string(),
            symbol: currency_symbol(&currency),
            currency,
            conventions: lookup_conventions(locale),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn currency_code(&self) -> &str {
        &self.currency
    }

    /// Format a raw wire amount (`"1500"`, `"12.5"`) as currency.
    pub fn currency(&self, raw: &str) -> String {
        match parse_decimal(raw) {
            Some(value) => self.format_money(value),
            None => PLACEHOLDER.to_string(),
        }
    }

    pub fn format_money(&self, value: Decimal) -> String {
        let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let number = self.format_number(rounded.abs());
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let spaced = self.conventions.symbol_after || self.symbol.chars().all(char::is_alphabetic);
        match (self.conventions.symbol_after, spaced) {
            (true, _) => format!("{}{} {}", sign, number, self.symbol),
            (false, true) => format!("{}{} {}", sign, self.symbol, number),
            (false, false) => format!("{}{}{}", sign, self.symbol, number),
        }
    }

    /// Two decimals with locale separators; `value` is already rounded.
    fn format_number(&self, value: Decimal) -> String {
        let mut value = value;
        value.rescale(2);
        let plain = value.to_string();
        let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        let digits: Vec<char> = int_part.chars().collect();
        let mut grouped = String::new();
        for (i, digit) in digits.iter().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push_str(self.conventions.group);
            }
            grouped.push(*digit);
        }
        format!("{}{}{}", grouped, self.conventions.decimal, frac_part)
    }

    pub fn date(&self, raw: &str) -> String {
        match parse_date(raw) {
            Some(date) => date.format(self.conventions.date_pattern).to_string(),
            None => PLACEHOLDER.to_string(),
        }
    }

    /// Localised 12-hour clock, e.g. `2:05 PM`.
    pub fn time(&self, raw: &str) -> String {
        match parse_time(raw) {
            Some(time) => time.format("%-I:%M %p").to_string(),
            None => PLACEHOLDER.to_string(),
        }
    }
}

pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(stamp.date_naive());
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|stamp| stamp.date())
}

pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    ["%H:%M:%S%.f", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
}
