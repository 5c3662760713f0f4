//! The fixed character classes a password can draw from.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four disjoint character classes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    Upper,
    Lower,
    Digit,
    Symbol,
}

impl CharacterClass {
    /// All classes, in dictionary order.
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Upper,
        CharacterClass::Lower,
        CharacterClass::Digit,
        CharacterClass::Symbol,
    ];

    /// The characters of this class, in ascending code-point order.
    pub fn chars(self) -> &'static [char] {
        match self {
            CharacterClass::Upper => &UPPER,
            CharacterClass::Lower => &LOWER,
            CharacterClass::Digit => &DIGITS,
            CharacterClass::Symbol => &SYMBOLS,
        }
    }

    pub fn contains(self, ch: char) -> bool {
        match self {
            CharacterClass::Upper => ch.is_ascii_uppercase(),
            CharacterClass::Lower => ch.is_ascii_lowercase(),
            CharacterClass::Digit => ch.is_ascii_digit(),
            CharacterClass::Symbol => is_symbol(ch),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CharacterClass::Upper => "uppercase letters",
            CharacterClass::Lower => "lowercase letters",
            CharacterClass::Digit => "digits",
            CharacterClass::Symbol => "symbols",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Printable ASCII, minus space and alphanumerics.
fn is_symbol(ch: char) -> bool {
    ch.is_ascii_graphic() && !ch.is_ascii_alphanumeric()
}

const fn ascii_range<const N: usize>(first: u8) -> [char; N] {
    let mut out = ['\0'; N];
    let mut i = 0;
    while i < N {
        out[i] = (first + i as u8) as char;
        i += 1;
    }
    out
}

const fn ascii_symbols() -> [char; 32] {
    let mut out = ['\0'; 32];
    let mut len = 0;
    let mut b = 0x21u8;
    while b <= 0x7e {
        if !(b.is_ascii_alphanumeric()) {
            out[len] = b as char;
            len += 1;
        }
        b += 1;
    }
    out
}

static UPPER: [char; 26] = ascii_range(b'A');
static LOWER: [char; 26] = ascii_range(b'a');
static DIGITS: [char; 10] = ascii_range(b'0');
static SYMBOLS: [char; 32] = ascii_symbols();

/// The set of enabled character classes for one request.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassSet {
    pub upper: bool,
    pub lower: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl ClassSet {
    pub fn all() -> ClassSet {
        ClassSet {
            upper: true,
            lower: true,
            digits: true,
            symbols: true,
        }
    }

    pub fn is_enabled(&self, class: CharacterClass) -> bool {
        match class {
            CharacterClass::Upper => self.upper,
            CharacterClass::Lower => self.lower,
            CharacterClass::Digit => self.digits,
            CharacterClass::Symbol => self.symbols,
        }
    }

    pub fn set(&mut self, class: CharacterClass, enabled: bool) {
        let flag = match class {
            CharacterClass::Upper => &mut self.upper,
            CharacterClass::Lower => &mut self.lower,
            CharacterClass::Digit => &mut self.digits,
            CharacterClass::Symbol => &mut self.symbols,
        };
        *flag = enabled;
    }

    /// Enabled classes, in dictionary order.
    pub fn iter(&self) -> impl Iterator<Item = CharacterClass> + '_ {
        CharacterClass::ALL
            .into_iter()
            .filter(move |class| self.is_enabled(*class))
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Concatenate the characters of every enabled class.
    ///
    /// The classes are disjoint, so the result never holds duplicates. It is empty exactly when
    /// no class is enabled.
    pub fn dictionary(&self) -> Vec<char> {
        let mut dictionary = Vec::new();
        for class in self.iter() {
            dictionary.extend_from_slice(class.chars());
        }
        dictionary
    }
}

impl FromIterator<CharacterClass> for ClassSet {
    fn from_iter<I: IntoIterator<Item = CharacterClass>>(iter: I) -> ClassSet {
        let mut set = ClassSet::default();
        for class in iter {
            set.set(class, true);
        }
        set
    }
}
