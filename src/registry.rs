//! Behavior registry: maps a key to a factory that builds a fresh behavior.
//!
//! Factories are zero-argument closures, so every `create` call returns an
//! independent instance with no state shared across calls.

use std::collections::HashMap;
use std::fmt;

use log::{debug, warn};
use serde::Deserialize;

use crate::config::RegistryConfig;
use crate::error::PatternError;
use crate::strategy::Behavior;

/// Zero-argument constructor stored for each key.
pub type BehaviorFactory = Box<dyn Fn() -> Box<dyn Behavior>>;

/// What `register` does when the key is already taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    #[default]
    Reject,
    Overwrite,
}

pub struct BehaviorDescriptor {
    key: String,
    factory: BehaviorFactory,
}

impl BehaviorDescriptor {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn build(&self) -> Box<dyn Behavior> {
        (self.factory)()
    }
}

impl fmt::Debug for BehaviorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorDescriptor")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct BehaviorRegistry {
    descriptors: HashMap<String, BehaviorDescriptor>,
    policy: DuplicatePolicy,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            descriptors: HashMap::new(),
            policy,
        }
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::with_policy(config.duplicate_policy)
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn register<F>(&mut self, key: impl Into<String>, factory: F) -> Result<(), PatternError>
    where
        F: Fn() -> Box<dyn Behavior> + 'static,
    {
        let key = key.into();
        if !is_valid_key(&key) {
            return Err(PatternError::InvalidKey(key));
        }

        if self.descriptors.contains_key(&key) {
            match self.policy {
                DuplicatePolicy::Reject => return Err(PatternError::DuplicateKey(key)),
                DuplicatePolicy::Overwrite => warn!("overwriting behavior '{key}'"),
            }
        }

        debug!("registered behavior '{key}'");
        self.descriptors.insert(
            key.clone(),
            BehaviorDescriptor {
                key,
                factory: Box::new(factory),
            },
        );
        Ok(())
    }

    /// Registers `T::default()` as the factory for `key`.
    pub fn register_default<T>(&mut self, key: impl Into<String>) -> Result<(), PatternError>
    where
        T: Behavior + Default + 'static,
    {
        self.register(key, || Box::new(T::default()))
    }

    pub fn create(&self, key: &str) -> Result<Box<dyn Behavior>, PatternError> {
        match self.descriptors.get(key) {
            Some(descriptor) => {
                debug!("creating behavior '{key}'");
                Ok(descriptor.build())
            }
            None => Err(PatternError::unknown_key(key, self.suggest(key))),
        }
    }

    pub fn descriptor(&self, key: &str) -> Option<&BehaviorDescriptor> {
        self.descriptors.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.descriptors.contains_key(key)
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.descriptors.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    fn suggest(&self, key: &str) -> Option<String> {
        find_similar_key(key, &self.keys())
    }
}

pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0; b_chars.len() + 1];

    for i in 1..=a_chars.len() {
        current[0] = i;
        for j in 1..=b_chars.len() {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            current[j] = (previous[j] + 1)
                .min(current[j - 1] + 1)
                .min(previous[j - 1] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}

/// Keys are non-empty and contain no whitespace.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && !key.chars().any(char::is_whitespace)
}

/// Closest key within an edit distance of 2, ties broken by key order.
pub fn find_similar_key(typo: &str, keys: &[&str]) -> Option<String> {
    const MAX_DISTANCE: usize = 2;

    let mut best_match = None;
    let mut best_distance = usize::MAX;
    for &key in keys {
        let distance = levenshtein_distance(typo, key);
        if distance < best_distance && distance <= MAX_DISTANCE {
            best_distance = distance;
            best_match = Some(key.to_string());
        }
    }
    best_match
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behaviors::{Cat, Dog, EmailBehavior, SmsBehavior};
    use proptest::prelude::*;

    fn notifier_registry() -> BehaviorRegistry {
        let mut registry = BehaviorRegistry::new();
        registry.register_default::<EmailBehavior>("email").unwrap();
        registry.register_default::<SmsBehavior>("sms").unwrap();
        registry
    }

    #[test]
    fn test_create_registered_key() {
        let registry = notifier_registry();
        let behavior = registry.create("email").unwrap();
        assert_eq!(behavior.name(), "email");
        assert_eq!(behavior.perform("hi").unwrap(), "Email sent: hi");
    }

    #[test]
    fn test_create_returns_fresh_instances() {
        let registry = notifier_registry();
        let first = registry.create("sms").unwrap();
        let second = registry.create("sms").unwrap();
        let first_ptr = first.as_ref() as *const dyn Behavior as *const ();
        let second_ptr = second.as_ref() as *const dyn Behavior as *const ();
        assert_ne!(first_ptr, second_ptr);
    }

    #[test]
    fn test_duplicate_key_rejected_by_default() {
        let mut registry = notifier_registry();
        let err = registry
            .register("email", || Box::new(Dog))
            .unwrap_err();
        assert!(matches!(err, PatternError::DuplicateKey(key) if key == "email"));
        // original factory still in place
        assert_eq!(registry.create("email").unwrap().name(), "email");
    }

    #[test]
    fn test_duplicate_key_overwrite_policy() {
        let mut registry = BehaviorRegistry::with_policy(DuplicatePolicy::Overwrite);
        registry.register_default::<Dog>("pet").unwrap();
        registry.register_default::<Cat>("pet").unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.create("pet").unwrap().perform("").unwrap(), "meow");
    }

    #[test]
    fn test_invalid_keys() {
        let mut registry = BehaviorRegistry::new();
        assert!(matches!(
            registry.register_default::<Dog>(""),
            Err(PatternError::InvalidKey(_))
        ));
        assert!(matches!(
            registry.register_default::<Dog>("big dog"),
            Err(PatternError::InvalidKey(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_key_rule() {
        assert!(is_valid_key("email"));
        assert!(is_valid_key("push-v2"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("e mail"));
        assert!(!is_valid_key("sms\n"));
    }

    #[test]
    fn test_unknown_key_suggests_close_match() {
        let registry = notifier_registry();
        match registry.create("emial") {
            Err(PatternError::UnknownKey { key, suggestion }) => {
                assert_eq!(key, "emial");
                assert_eq!(suggestion.as_deref(), Some("email"));
            }
            other => panic!("expected UnknownKey, got {:?}", other.map(|b| b.name().to_string())),
        }
    }

    #[test]
    fn test_unknown_key_without_suggestion() {
        let registry = notifier_registry();
        assert!(matches!(
            registry.create("carrier-pigeon"),
            Err(PatternError::UnknownKey { suggestion: None, .. })
        ));
    }

    #[test]
    fn test_keys_are_sorted() {
        let registry = notifier_registry();
        assert_eq!(registry.keys(), vec!["email", "sms"]);
        assert!(registry.contains("sms"));
        assert!(!registry.contains("push"));
        assert_eq!(registry.descriptor("sms").map(|d| d.key()), Some("sms"));
    }

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("abc", "abd"), 1);
        assert_eq!(levenshtein_distance("sitting", "kitten"), 3);
    }

    proptest! {
        #[test]
        fn prop_every_registered_key_creates(keys in prop::collection::hash_set("[a-z]{1,8}", 1..10)) {
            let mut registry = BehaviorRegistry::new();
            for key in &keys {
                registry.register_default::<Dog>(key.clone()).unwrap();
            }
            for key in &keys {
                prop_assert!(registry.create(key).is_ok());
            }
            prop_assert_eq!(registry.len(), keys.len());
        }

        #[test]
        fn prop_unknown_key_always_fails(key in "[A-Z0-9]{1,8}") {
            let registry = notifier_registry();
            let is_unknown = matches!(registry.create(&key), Err(PatternError::UnknownKey { .. }));
            prop_assert!(is_unknown);
        }
    }
}
