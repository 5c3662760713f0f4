//! Rating a password configuration's strength.
//!
//! The rating looks only at the shape of the configuration (how long, how many classes), never at
//! the characters that were actually drawn.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ClassSet;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrengthLabel {
    TooWeak,
    Weak,
    Medium,
    Strong,
}

impl StrengthLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            StrengthLabel::TooWeak => "too-weak",
            StrengthLabel::Weak => "weak",
            StrengthLabel::Medium => "medium",
            StrengthLabel::Strong => "strong",
        }
    }

    fn from_score(score: u32) -> StrengthLabel {
        match score {
            0..=2 => StrengthLabel::TooWeak,
            3..=4 => StrengthLabel::Weak,
            5..=6 => StrengthLabel::Medium,
            // Four classes and the longest bracket top out at 7; anything above is still strong.
            _ => StrengthLabel::Strong,
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower bounds of the length brackets; a length's weight is the number of bounds it reaches.
pub const LENGTH_BRACKETS: [usize; 4] = [6, 9, 12, 16];

pub fn length_weight(length: usize) -> u32 {
    LENGTH_BRACKETS
        .iter()
        .filter(|lower| length >= **lower)
        .count() as u32
}

/// One point per enabled class beyond the first.
pub fn group_weight(classes: &ClassSet) -> u32 {
    (classes.count() as u32).saturating_sub(1)
}

pub fn score(classes: &ClassSet, length: usize) -> u32 {
    length_weight(length) + group_weight(classes)
}

pub fn rate(classes: &ClassSet, length: usize) -> StrengthLabel {
    StrengthLabel::from_score(score(classes, length))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lower_only() -> ClassSet {
        ClassSet {
            lower: true,
            ..ClassSet::default()
        }
    }

    #[test]
    fn length_brackets() {
        let expected = [
            (0, 0),
            (5, 0),
            (6, 1),
            (8, 1),
            (9, 2),
            (11, 2),
            (12, 3),
            (15, 3),
            (16, 4),
            (1000, 4),
        ];
        for (length, weight) in expected {
            assert_eq!(length_weight(length), weight, "length {length}");
        }
    }

    #[test]
    fn group_weight_is_floored() {
        assert_eq!(group_weight(&ClassSet::default()), 0);
        assert_eq!(group_weight(&lower_only()), 0);
        assert_eq!(group_weight(&ClassSet::all()), 3);
    }

    #[test]
    fn lower_only_six_is_too_weak() {
        assert_eq!(score(&lower_only(), 6), 1);
        assert_eq!(rate(&lower_only(), 6), StrengthLabel::TooWeak);
    }

    #[test]
    fn everything_sixteen_is_strong() {
        assert_eq!(score(&ClassSet::all(), 16), 7);
        assert_eq!(rate(&ClassSet::all(), 16), StrengthLabel::Strong);
    }

    #[test]
    fn no_classes_rates_on_length_alone() {
        assert_eq!(rate(&ClassSet::default(), 5), StrengthLabel::TooWeak);
        assert_eq!(rate(&ClassSet::default(), 16), StrengthLabel::Weak);
    }

    #[test]
    fn middle_bands() {
        let two = ClassSet {
            upper: true,
            lower: true,
            ..ClassSet::default()
        };
        // 3 + 1
        assert_eq!(rate(&two, 12), StrengthLabel::Weak);
        // 4 + 1
        assert_eq!(rate(&two, 20), StrengthLabel::Medium);
        // 3 + 3
        assert_eq!(rate(&ClassSet::all(), 12), StrengthLabel::Medium);
    }

    #[test]
    fn scores_past_the_top_band_are_strong() {
        assert_eq!(StrengthLabel::from_score(8), StrengthLabel::Strong);
        assert_eq!(StrengthLabel::from_score(42), StrengthLabel::Strong);
    }

    #[test]
    fn label_rendering() {
        assert_eq!(StrengthLabel::TooWeak.to_string(), "too-weak");
        assert_eq!(
            serde_json::to_string(&StrengthLabel::TooWeak).unwrap(),
            "\"too-weak\""
        );
    }
}
