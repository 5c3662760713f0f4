//! Random password generation from toggled character classes, a strength rating for the chosen
//! configuration, and the drag arithmetic of a slider for picking the length.

use serde::{Deserialize, Serialize};

mod charset;
pub mod password_generation;
pub mod settings;
pub mod slider;
pub mod strength;

pub use charset::{CharacterClass, ClassSet};
pub use password_generation::{Generated, PasswordEngine, RetryPolicy};
pub use settings::{Settings, SettingsError};
pub use slider::{Geometry, RangeSelector, SliderError};
pub use strength::StrengthLabel;

#[derive(Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}
