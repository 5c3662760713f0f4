//! Utilities for generating passwords.

use std::num::NonZeroU32;

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::strength::{self, StrengthLabel};
use crate::{CharacterClass, ClassSet, Secret};

/// How many times the engine redraws a candidate that is missing an enabled class.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RetryPolicy {
    /// Keep drawing until a candidate passes. Near the feasibility floor with many classes this
    /// can take a very long time.
    #[default]
    Unbounded,
    /// Stop drawing after this many attempts and build a password that is valid by
    /// construction instead.
    Bounded(NonZeroU32),
}

/// The result of a generation request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Generated {
    /// A password. Empty when the length is zero or no class is enabled.
    Password(Secret),
    /// More classes were enabled than there are characters to hold one of each.
    Infeasible,
}

impl Generated {
    pub fn password(&self) -> Option<&Secret> {
        match self {
            Generated::Password(secret) => Some(secret),
            Generated::Infeasible => None,
        }
    }

    pub fn into_password(self) -> Option<Secret> {
        match self {
            Generated::Password(secret) => Some(secret),
            Generated::Infeasible => None,
        }
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, Generated::Infeasible)
    }
}

/// Generates passwords for one fixed configuration.
#[derive(Clone, Debug)]
pub struct PasswordEngine {
    classes: ClassSet,
    length: usize,
    retry: RetryPolicy,
}

impl PasswordEngine {
    pub fn new(classes: ClassSet, length: usize) -> PasswordEngine {
        PasswordEngine {
            classes,
            length,
            retry: RetryPolicy::Unbounded,
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> PasswordEngine {
        self.retry = retry;
        self
    }

    pub fn classes(&self) -> &ClassSet {
        &self.classes
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Whether there is room for at least one character per enabled class.
    ///
    /// This only short-circuits requests that are clearly impossible. A zero length is feasible:
    /// it asks for nothing and gets an empty password.
    pub fn is_feasible(&self) -> bool {
        self.length == 0 || self.classes.count() <= self.length
    }

    /// Generate a password by uniformly sampling the enabled classes until every enabled class
    /// shows up at least once.
    ///
    /// Any `Rng` works; pass a `CryptoRng` (such as `rand::thread_rng()`) when the password is
    /// going to be used for real. `rand`'s uniform sampler rejects out-of-range values rather than
    /// taking a modulus, so the draw is unbiased.
    pub fn generate<R>(&self, rng: &mut R) -> Generated
    where
        R: Rng + ?Sized,
    {
        if self.length == 0 {
            return Generated::Password(Secret::from(String::new()));
        }
        if !self.is_feasible() {
            return Generated::Infeasible;
        }
        let dictionary = self.classes.dictionary();
        if dictionary.is_empty() {
            return Generated::Password(Secret::from(String::new()));
        }

        let mut attempts: u32 = 0;
        loop {
            let candidate = draw(rng, &dictionary, self.length);
            attempts = attempts.saturating_add(1);
            if is_acceptable(&candidate, &self.classes) {
                debug!(
                    "generated a {}-character password after {} attempt(s)",
                    self.length, attempts
                );
                return Generated::Password(Secret::from(candidate));
            }
            if let RetryPolicy::Bounded(max) = self.retry {
                if attempts >= max.get() {
                    warn!(
                        "no acceptable password after {} attempts; placing one character per class",
                        attempts
                    );
                    let password = construct(rng, &self.classes, &dictionary, self.length);
                    return Generated::Password(Secret::from(password));
                }
            }
        }
    }

    pub fn rate(&self) -> StrengthLabel {
        strength::rate(&self.classes, self.length)
    }
}

fn draw<R>(rng: &mut R, dictionary: &[char], len: usize) -> String
where
    R: Rng + ?Sized,
{
    let mut password = String::with_capacity(len);
    for _ in 0..len {
        password.push(dictionary[rng.gen_range(0..dictionary.len())]);
    }
    password
}

/// Place one random character from each enabled class, fill the rest from the dictionary, then
/// shuffle so the forced characters don't sit at fixed positions.
fn construct<R>(rng: &mut R, classes: &ClassSet, dictionary: &[char], len: usize) -> String
where
    R: Rng + ?Sized,
{
    let mut chars = Vec::with_capacity(len);
    for class in classes.iter() {
        if let Some(ch) = class.chars().choose(rng) {
            chars.push(*ch);
        }
    }
    while chars.len() < len {
        chars.push(dictionary[rng.gen_range(0..dictionary.len())]);
    }
    chars.shuffle(rng);
    chars.into_iter().collect()
}

/// Check a candidate against the enabled classes.
///
/// The space check never fails today because no class contains a space.
pub fn is_acceptable(candidate: &str, classes: &ClassSet) -> bool {
    if candidate.contains(' ') {
        return false;
    }
    classes
        .iter()
        .all(|class| contains_class(candidate, class))
}

fn contains_class(candidate: &str, class: CharacterClass) -> bool {
    candidate.chars().any(|ch| class.contains(ch))
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    fn only(class: CharacterClass) -> ClassSet {
        std::iter::once(class).collect()
    }

    fn check(password: &str, classes: &ClassSet, length: usize) {
        assert_eq!(password.chars().count(), length);
        assert!(!password.contains(' '));
        for class in classes.iter() {
            assert!(
                password.chars().any(|ch| class.contains(ch)),
                "{password:?} has no {class}"
            );
        }
        let dictionary = classes.dictionary();
        assert!(password.chars().all(|ch| dictionary.contains(&ch)));
    }

    #[test]
    fn zero_length_is_empty() {
        let mut rng = rng();
        for classes in [ClassSet::default(), ClassSet::all()] {
            let engine = PasswordEngine::new(classes, 0);
            assert_eq!(
                engine.generate(&mut rng),
                Generated::Password(Secret::from(String::new()))
            );
        }
    }

    #[test]
    fn no_classes_is_empty() {
        let mut rng = rng();
        for length in [1, 5, 40] {
            let generated = PasswordEngine::new(ClassSet::default(), length).generate(&mut rng);
            assert_eq!(generated.password().map(Secret::as_str), Some(""));
        }
    }

    #[test]
    fn more_classes_than_length_is_infeasible() {
        let mut rng = rng();
        let engine = PasswordEngine::new(ClassSet::all(), 3);
        assert!(!engine.is_feasible());
        assert!(engine.generate(&mut rng).is_infeasible());

        let two = ClassSet {
            digits: true,
            symbols: true,
            ..ClassSet::default()
        };
        assert!(PasswordEngine::new(two, 1).generate(&mut rng).is_infeasible());
    }

    #[test]
    fn single_class_passwords() {
        let mut rng = rng();
        for class in CharacterClass::ALL {
            let classes = only(class);
            let generated = PasswordEngine::new(classes, 12).generate(&mut rng);
            let password = generated.password().unwrap();
            check(password.as_str(), &classes, 12);
            assert!(password.as_str().chars().all(|ch| class.contains(ch)));
        }
    }

    #[test]
    fn every_enabled_class_appears() {
        let mut rng = rng();
        for length in [4, 5, 8, 16, 64] {
            for _ in 0..50 {
                let engine = PasswordEngine::new(ClassSet::all(), length);
                let password = engine.generate(&mut rng).into_password().unwrap();
                check(password.as_str(), &ClassSet::all(), length);
            }
        }
    }

    #[test]
    fn bounded_retry_falls_back_to_construction() {
        let mut rng = rng();
        let engine = PasswordEngine::new(ClassSet::all(), 4)
            .with_retry_policy(RetryPolicy::Bounded(NonZeroU32::new(1).unwrap()));
        for _ in 0..100 {
            let password = engine.generate(&mut rng).into_password().unwrap();
            check(password.as_str(), &ClassSet::all(), 4);
        }
    }

    #[test]
    fn construction_places_each_class() {
        let mut rng = rng();
        let classes = ClassSet {
            upper: true,
            digits: true,
            symbols: true,
            ..ClassSet::default()
        };
        let password = construct(&mut rng, &classes, &classes.dictionary(), 3);
        check(&password, &classes, 3);
    }

    #[test]
    fn acceptance() {
        let classes = ClassSet {
            upper: true,
            digits: true,
            ..ClassSet::default()
        };
        assert!(is_acceptable("A1", &classes));
        assert!(is_acceptable("A1b", &classes));
        assert!(!is_acceptable("AB", &classes));
        assert!(!is_acceptable("A 1", &classes));
        assert!(is_acceptable("", &ClassSet::default()));
    }

    #[test]
    fn same_seed_same_password() {
        let engine = PasswordEngine::new(ClassSet::all(), 20);
        let a = engine.generate(&mut StdRng::seed_from_u64(7));
        let b = engine.generate(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn rate_ignores_drawn_characters() {
        let engine = PasswordEngine::new(ClassSet::all(), 16);
        assert_eq!(engine.rate(), StrengthLabel::Strong);
        assert_eq!(engine.rate(), engine.rate());
        let lower = PasswordEngine::new(only(CharacterClass::Lower), 6);
        assert_eq!(lower.rate(), StrengthLabel::TooWeak);
    }
}
