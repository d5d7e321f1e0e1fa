//! Moment-style date patterns (`YYYY/MM/DD`, `MMM Do, YYYY`, ...).
//!
//! Patterns are compiled once into a list of pieces and rendered per card
//! with chrono.

use crate::parsers::StyleParseError;
use chrono::{Datelike, NaiveDateTime, Timelike};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateToken {
    Year4,
    Year2,
    MonthName,
    MonthShort,
    Month2,
    Month,
    Day2,
    Day,
    DayOrdinal,
    WeekdayName,
    WeekdayShort,
    Hour24Padded,
    Hour24,
    Hour12Padded,
    Hour12,
    Minute2,
    Minute,
    Second2,
    Second,
    MeridiemUpper,
    MeridiemLower,
}

// Longest tokens first so "MMMM" wins over "MM".
const TOKENS: &[(&str, DateToken)] = &[
    ("YYYY", DateToken::Year4),
    ("MMMM", DateToken::MonthName),
    ("dddd", DateToken::WeekdayName),
    ("MMM", DateToken::MonthShort),
    ("ddd", DateToken::WeekdayShort),
    ("YY", DateToken::Year2),
    ("MM", DateToken::Month2),
    ("DD", DateToken::Day2),
    ("Do", DateToken::DayOrdinal),
    ("HH", DateToken::Hour24Padded),
    ("hh", DateToken::Hour12Padded),
    ("mm", DateToken::Minute2),
    ("ss", DateToken::Second2),
    ("M", DateToken::Month),
    ("D", DateToken::Day),
    ("H", DateToken::Hour24),
    ("h", DateToken::Hour12),
    ("m", DateToken::Minute),
    ("s", DateToken::Second),
    ("A", DateToken::MeridiemUpper),
    ("a", DateToken::MeridiemLower),
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Token(DateToken),
}

/// A compiled date pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    pieces: Vec<Piece>,
}

impl DateFormat {
    /// Compiles a moment-style pattern. Text inside `[...]` is copied verbatim.
    pub fn parse(pattern: &str) -> Result<Self, StyleParseError> {
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut rest = pattern;

        'outer: while !rest.is_empty() {
            if let Some(escaped) = rest.strip_prefix('[') {
                let end = escaped.find(']').ok_or_else(|| StyleParseError::InvalidValue {
                    property: "date_style".to_string(),
                    value: format!("unterminated '[' in '{}'", pattern),
                })?;
                literal.push_str(&escaped[..end]);
                rest = &escaped[end + 1..];
                continue;
            }
            for (text, token) in TOKENS {
                if let Some(after) = rest.strip_prefix(text) {
                    if !literal.is_empty() {
                        pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                    }
                    pieces.push(Piece::Token(*token));
                    rest = after;
                    continue 'outer;
                }
            }
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                literal.push(c);
            }
            rest = chars.as_str();
        }
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        Ok(Self {
            pattern: pattern.to_string(),
            pieces,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self, date: &NaiveDateTime) -> String {
        let mut out = String::with_capacity(self.pattern.len() + 8);
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Token(token) => write_token(&mut out, *token, date),
            }
        }
        out
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            pattern: "YYYY/MM/DD".to_string(),
            pieces: vec![
                Piece::Token(DateToken::Year4),
                Piece::Literal("/".to_string()),
                Piece::Token(DateToken::Month2),
                Piece::Literal("/".to_string()),
                Piece::Token(DateToken::Day2),
            ],
        }
    }
}

fn write_token(out: &mut String, token: DateToken, date: &NaiveDateTime) {
    let hour12 = match date.hour() % 12 {
        0 => 12,
        h => h,
    };
    // Writing into a String cannot fail.
    let _ = match token {
        DateToken::Year4 => write!(out, "{:04}", date.year()),
        DateToken::Year2 => write!(out, "{:02}", date.year().rem_euclid(100)),
        DateToken::MonthName => write!(out, "{}", date.format("%B")),
        DateToken::MonthShort => write!(out, "{}", date.format("%b")),
        DateToken::Month2 => write!(out, "{:02}", date.month()),
        DateToken::Month => write!(out, "{}", date.month()),
        DateToken::Day2 => write!(out, "{:02}", date.day()),
        DateToken::Day => write!(out, "{}", date.day()),
        DateToken::DayOrdinal => write!(out, "{}{}", date.day(), ordinal_suffix(date.day())),
        DateToken::WeekdayName => write!(out, "{}", date.format("%A")),
        DateToken::WeekdayShort => write!(out, "{}", date.format("%a")),
        DateToken::Hour24Padded => write!(out, "{:02}", date.hour()),
        DateToken::Hour24 => write!(out, "{}", date.hour()),
        DateToken::Hour12Padded => write!(out, "{:02}", hour12),
        DateToken::Hour12 => write!(out, "{}", hour12),
        DateToken::Minute2 => write!(out, "{:02}", date.minute()),
        DateToken::Minute => write!(out, "{}", date.minute()),
        DateToken::Second2 => write!(out, "{:02}", date.second()),
        DateToken::Second => write!(out, "{}", date.second()),
        DateToken::MeridiemUpper => out.write_str(if date.hour() < 12 { "AM" } else { "PM" }),
        DateToken::MeridiemLower => out.write_str(if date.hour() < 12 { "am" } else { "pm" }),
    };
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
