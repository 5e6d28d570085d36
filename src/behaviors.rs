//! Built-in behaviors: stub notifiers, animal voices and vehicle horns.
//!
//! None of these talk to anything external. Notifiers format the message
//! they would have sent; animals and vehicles ignore their input.

use crate::error::PatternError;
use crate::registry::BehaviorRegistry;
use crate::strategy::Behavior;

// ============================================================================
// Notifiers
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct EmailBehavior {
    recipient: Option<String>,
}

impl EmailBehavior {
    pub fn to(recipient: impl Into<String>) -> Self {
        Self {
            recipient: Some(recipient.into()),
        }
    }
}

impl Behavior for EmailBehavior {
    fn name(&self) -> &str {
        "email"
    }

    fn perform(&self, input: &str) -> Result<String, PatternError> {
        Ok(match &self.recipient {
            Some(to) => format!("Email sent to {to}: {input}"),
            None => format!("Email sent: {input}"),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SmsBehavior {
    number: Option<String>,
}

impl SmsBehavior {
    pub fn to(number: impl Into<String>) -> Self {
        Self {
            number: Some(number.into()),
        }
    }
}

impl Behavior for SmsBehavior {
    fn name(&self) -> &str {
        "sms"
    }

    fn perform(&self, input: &str) -> Result<String, PatternError> {
        Ok(match &self.number {
            Some(number) => format!("SMS sent to {number}: {input}"),
            None => format!("SMS sent: {input}"),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct PushBehavior;

impl Behavior for PushBehavior {
    fn name(&self) -> &str {
        "push"
    }

    fn perform(&self, input: &str) -> Result<String, PatternError> {
        Ok(format!("Push notification: {input}"))
    }
}

// ============================================================================
// Animals
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct Dog;

impl Behavior for Dog {
    fn name(&self) -> &str {
        "dog"
    }

    fn perform(&self, _input: &str) -> Result<String, PatternError> {
        Ok("woof".to_string())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Cat;

impl Behavior for Cat {
    fn name(&self) -> &str {
        "cat"
    }

    fn perform(&self, _input: &str) -> Result<String, PatternError> {
        Ok("meow".to_string())
    }
}

/// Has no voice: relies on the default `perform`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fish;

impl Behavior for Fish {
    fn name(&self) -> &str {
        "fish"
    }
}

// ============================================================================
// Vehicles
// ============================================================================

#[derive(Debug, Clone)]
pub struct Car {
    pub brand: String,
    pub model: String,
}

impl Car {
    pub fn new(brand: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
        }
    }
}

impl Default for Car {
    fn default() -> Self {
        Self::new("Ford", "Mustang")
    }
}

impl Behavior for Car {
    fn name(&self) -> &str {
        "car"
    }

    fn perform(&self, _input: &str) -> Result<String, PatternError> {
        Ok("Tuut, tuut!".to_string())
    }
}

#[derive(Debug, Clone)]
pub struct Bike {
    pub brand: String,
}

impl Default for Bike {
    fn default() -> Self {
        Self {
            brand: "Yamaha".to_string(),
        }
    }
}

impl Behavior for Bike {
    fn name(&self) -> &str {
        "bike"
    }

    fn perform(&self, _input: &str) -> Result<String, PatternError> {
        Ok("Peep, peep!".to_string())
    }
}

#[derive(Debug, Clone)]
pub struct Truck {
    pub brand: String,
}

impl Truck {
    pub fn start_engine(&self) -> String {
        format!("{} truck engine roars!", self.brand)
    }
}

impl Default for Truck {
    fn default() -> Self {
        Self {
            brand: "Volvo".to_string(),
        }
    }
}

impl Behavior for Truck {
    fn name(&self) -> &str {
        "truck"
    }

    fn perform(&self, _input: &str) -> Result<String, PatternError> {
        Ok("Hoooonk!".to_string())
    }
}

// ============================================================================
// Closures
// ============================================================================

/// Strategy as a closure.
pub struct FnBehavior<F> {
    name: String,
    perform_fn: F,
}

impl<F> FnBehavior<F>
where
    F: Fn(&str) -> Result<String, PatternError>,
{
    pub fn new(name: impl Into<String>, perform_fn: F) -> Self {
        Self {
            name: name.into(),
            perform_fn,
        }
    }
}

impl<F> Behavior for FnBehavior<F>
where
    F: Fn(&str) -> Result<String, PatternError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn perform(&self, input: &str) -> Result<String, PatternError> {
        (self.perform_fn)(input)
    }
}

/// Registers every built-in behavior under its `name()`.
pub fn register_builtins(registry: &mut BehaviorRegistry) -> Result<(), PatternError> {
    registry.register_default::<EmailBehavior>("email")?;
    registry.register_default::<SmsBehavior>("sms")?;
    registry.register_default::<PushBehavior>("push")?;
    registry.register_default::<Dog>("dog")?;
    registry.register_default::<Cat>("cat")?;
    registry.register_default::<Fish>("fish")?;
    registry.register_default::<Car>("car")?;
    registry.register_default::<Bike>("bike")?;
    registry.register_default::<Truck>("truck")?;
    Ok(())
}

pub fn builtin_registry() -> Result<BehaviorRegistry, PatternError> {
    let mut registry = BehaviorRegistry::new();
    register_builtins(&mut registry)?;
    Ok(registry)
}
