//! # behavior-kit
//!
//! A small pluggable-behavior library built from three classic patterns.
//!
//! ## Components
//!
//! - **Behavior Registry** (`registry`) - key to factory mapping (Factory)
//! - **Strategy Context** (`strategy`) - swap the active behavior at runtime (Strategy)
//! - **Notification Hub** (`hub`) - synchronous broadcast with snapshot delivery (Observer)
//! - **Command Log** (`command_log`) - reversible actions with undo/redo (Command)
//!
//! Concrete stubs live in `behaviors`, `subscribers` and `actions`; the
//! card-dealing actions run over the `deck` model.
//!
//! Everything is single-threaded: shared state uses `Rc`/`RefCell`, so
//! none of these types are `Send`.
//!
//! ## Running the tour
//!
//! ```bash
//! cargo run --bin pattern_tour
//! cargo run --bin pattern_tour -- behavior-kit.toml
//! RUST_LOG=debug cargo run --bin pattern_tour
//! ```

pub mod actions;
pub mod behaviors;
pub mod command_log;
pub mod config;
pub mod deck;
pub mod error;
pub mod hub;
pub mod registry;
pub mod strategy;
pub mod subscribers;

pub use command_log::{Action, CommandLog, Invocation};
pub use config::{BehaviorKitConfig, ConfigError};
pub use error::{BoxError, PatternError, SubscriberDeliveryError};
pub use hub::{DeliveryReport, NotificationHub, Subscriber, SubscriberHandle};
pub use registry::{BehaviorDescriptor, BehaviorRegistry, DuplicatePolicy};
pub use strategy::{Behavior, StaticStrategy, StrategyContext};

// ============================================================================
// End-to-end scenarios
// ============================================================================
