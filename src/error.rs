use thiserror::Error;

/// Boxed error returned by user-supplied subscribers and actions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by the registry, strategy context and command log.
#[derive(Error, Debug)]
pub enum PatternError {
    #[error("behavior key '{0}' is already registered")]
    DuplicateKey(String),

    #[error("unknown behavior key '{key}'{}", suggestion_suffix(.suggestion))]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
    },

    #[error("invalid behavior key '{0}': keys must be non-empty and contain no whitespace")]
    InvalidKey(String),

    #[error("no behavior selected; call set_behavior first")]
    NoBehaviorSelected,

    #[error("behavior '{behavior}' does not implement perform")]
    NotImplemented { behavior: String },

    #[error("command log is empty")]
    EmptyLog,

    #[error("nothing to redo")]
    NothingToRedo,

    #[error("action '{action}' failed to perform")]
    ActionFailed {
        action: String,
        #[source]
        source: BoxError,
    },

    #[error("action '{action}' failed to revert")]
    RevertFailed {
        action: String,
        #[source]
        source: BoxError,
    },
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(candidate) => format!(" (did you mean '{candidate}'?)"),
        None => String::new(),
    }
}

impl PatternError {
    pub fn unknown_key(key: impl Into<String>, suggestion: Option<String>) -> Self {
        Self::UnknownKey {
            key: key.into(),
            suggestion,
        }
    }

    pub fn not_implemented(behavior: impl Into<String>) -> Self {
        Self::NotImplemented {
            behavior: behavior.into(),
        }
    }

    pub fn action_failed(action: impl Into<String>, source: BoxError) -> Self {
        Self::ActionFailed {
            action: action.into(),
            source,
        }
    }

    pub fn revert_failed(action: impl Into<String>, source: BoxError) -> Self {
        Self::RevertFailed {
            action: action.into(),
            source,
        }
    }
}

/// A single subscriber failure captured during `publish`.
#[derive(Error, Debug)]
#[error("subscriber #{subscriber} failed to receive: {reason}")]
pub struct SubscriberDeliveryError {
    /// Position of the subscriber in the publish snapshot.
    pub subscriber: usize,
    pub reason: String,
    #[source]
    pub source: Option<BoxError>,
}

impl SubscriberDeliveryError {
    pub fn returned(subscriber: usize, source: BoxError) -> Self {
        Self {
            subscriber,
            reason: source.to_string(),
            source: Some(source),
        }
    }

    pub fn busy(subscriber: usize) -> Self {
        Self {
            subscriber,
            reason: "subscriber is already handling a message".to_string(),
            source: None,
        }
    }

    pub fn panicked(subscriber: usize, message: impl Into<String>) -> Self {
        Self {
            subscriber,
            reason: format!("panicked: {}", message.into()),
            source: None,
        }
    }
}
