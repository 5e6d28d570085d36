//! Strategy context: holds the active behavior and delegates to it.

use std::fmt;

use log::debug;

use crate::error::PatternError;
use crate::registry::BehaviorRegistry;

/// An interchangeable unit of logic selected at runtime.
pub trait Behavior {
    fn name(&self) -> &str;

    /// Variants that leave this out report `NotImplemented` instead of
    /// silently succeeding.
    fn perform(&self, _input: &str) -> Result<String, PatternError> {
        Err(PatternError::not_implemented(self.name()))
    }
}

impl fmt::Debug for dyn Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Behavior({})", self.name())
    }
}

#[derive(Debug, Default)]
pub struct StrategyContext {
    active: Option<Box<dyn Behavior>>,
}

impl StrategyContext {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn with_behavior(behavior: Box<dyn Behavior>) -> Self {
        Self {
            active: Some(behavior),
        }
    }

    /// Replaces the active behavior; takes effect on the next `execute`.
    pub fn set_behavior(&mut self, behavior: Box<dyn Behavior>) {
        debug!("strategy switched to '{}'", behavior.name());
        self.active = Some(behavior);
    }

    /// Builds `key` from the registry and makes it active.
    pub fn select(&mut self, registry: &BehaviorRegistry, key: &str) -> Result<(), PatternError> {
        let behavior = registry.create(key)?;
        self.set_behavior(behavior);
        Ok(())
    }

    pub fn execute(&self, input: &str) -> Result<String, PatternError> {
        let behavior = self
            .active
            .as_deref()
            .ok_or(PatternError::NoBehaviorSelected)?;
        debug!("executing '{}'", behavior.name());
        behavior.perform(input)
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref().map(|b| b.name())
    }

    pub fn has_behavior(&self) -> bool {
        self.active.is_some()
    }
}

/// Compile-time strategy selection, no heap allocation.
#[derive(Debug, Clone, Default)]
pub struct StaticStrategy<B> {
    behavior: B,
}

impl<B: Behavior> StaticStrategy<B> {
    pub fn new(behavior: B) -> Self {
        Self { behavior }
    }

    pub fn execute(&self, input: &str) -> Result<String, PatternError> {
        self.behavior.perform(input)
    }

    pub fn behavior(&self) -> &B {
        &self.behavior
    }
}
