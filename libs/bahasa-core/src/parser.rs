//! Parser for plain-text vocabulary lists.
//!
//! # Format
//! ```text
//! # greetings
//! selamat pagi | good morning
//! makan | to eat | 1 | 120
//! memasak	to cook	2
//! ```
//!
//! Fields are separated by `|` or tabs: surface form, translation, then an
//! optional difficulty (1-5) and frequency.

use std::collections::HashMap;

use crate::error::{ParseError, ParseResult};
use crate::types::ItemKind;

/// Difficulty used when a line does not give one.
pub const DEFAULT_DIFFICULTY: u8 = 1;

/// One imported vocabulary line.
#[derive(Debug, Clone, PartialEq)]
pub struct VocabEntry {
    pub surface_form: String,
    pub translation: String,
    pub kind: ItemKind,
    pub difficulty: Option<u8>,
    pub frequency: Option<u32>,
    pub line_number: usize,
}

/// Parse a vocabulary list into entries, in file order.
pub fn parse(content: &str) -> ParseResult<Vec<VocabEntry>> {
    let mut entries = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (idx, line) in content.lines().enumerate() {
        let line_num = idx + 1;
        let Some(entry) = parse_line(line, line_num)? else {
            continue;
        };

        let key = entry.surface_form.to_lowercase();
        if seen.insert(key, line_num).is_some() {
            return Err(ParseError::DuplicateEntry {
                surface: entry.surface_form,
                line: line_num,
            });
        }
        entries.push(entry);
    }

    Ok(entries)
}

fn parse_line(line: &str, line_num: usize) -> ParseResult<Option<VocabEntry>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let mut fields = trimmed.split(['|', '\t']).map(str::trim);

    let surface = normalize_surface(fields.next().unwrap_or_default());
    let translation = fields.next().unwrap_or_default().to_string();
    if surface.is_empty() || translation.is_empty() {
        return Err(ParseError::MissingTranslation { line: line_num });
    }

    let difficulty = match fields.next().filter(|f| !f.is_empty()) {
        Some(value) => Some(parse_difficulty(value, line_num)?),
        None => None,
    };
    let frequency = match fields.next().filter(|f| !f.is_empty()) {
        Some(value) => Some(value.parse::<u32>().map_err(|_| ParseError::InvalidFrequency {
            line: line_num,
            value: value.to_string(),
        })?),
        None => None,
    };

    Ok(Some(VocabEntry {
        kind: ItemKind::infer(&surface),
        surface_form: surface,
        translation,
        difficulty,
        frequency,
        line_number: line_num,
    }))
}

fn parse_difficulty(value: &str, line_num: usize) -> ParseResult<u8> {
    match value.parse::<u8>() {
        Ok(d) if (1..=5).contains(&d) => Ok(d),
        _ => Err(ParseError::InvalidDifficulty {
            line: line_num,
            value: value.to_string(),
        }),
    }
}

fn normalize_surface(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_single_entry() {
        let entries = parse("makan | to eat").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].surface_form, "makan");
        assert_eq!(entries[0].translation, "to eat");
        assert_eq!(entries[0].kind, ItemKind::Word);
        assert_eq!(entries[0].difficulty, None);
        assert_eq!(entries[0].line_number, 1);
    }

    #[test]
    fn parse_optional_columns() {
        let entries = parse("makan | to eat | 2 | 120").unwrap();
        assert_eq!(entries[0].difficulty, Some(2));
        assert_eq!(entries[0].frequency, Some(120));
    }

    #[test]
    fn parse_tab_separated_phrase() {
        let entries = parse("selamat   pagi\tgood morning\t3").unwrap();
        assert_eq!(entries[0].surface_form, "selamat pagi");
        assert_eq!(entries[0].kind, ItemKind::Phrase);
        assert_eq!(entries[0].difficulty, Some(3));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let input = "# food\n\nmakan | to eat\n  # drinks\nminum | to drink\n";
        let entries = parse(input).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].line_number, 5);
    }

    #[test]
    fn reject_missing_translation() {
        assert!(matches!(
            parse("makan"),
            Err(ParseError::MissingTranslation { line: 1 })
        ));
        assert!(matches!(
            parse("makan | "),
            Err(ParseError::MissingTranslation { line: 1 })
        ));
    }

    #[test]
    fn reject_bad_numbers() {
        assert!(matches!(
            parse("makan | to eat | 9"),
            Err(ParseError::InvalidDifficulty { line: 1, .. })
        ));
        assert!(matches!(
            parse("makan | to eat | 2 | lots"),
            Err(ParseError::InvalidFrequency { line: 1, .. })
        ));
    }

    #[test]
    fn reject_duplicate_surfaces() {
        let input = "makan | to eat\nMakan | to dine";
        assert!(matches!(
            parse(input),
            Err(ParseError::DuplicateEntry { line: 2, .. })
        ));
    }

    #[test]
    fn parse_empty_content() {
        assert!(parse("").unwrap().is_empty());
    }
}
