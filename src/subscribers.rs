//! Stub subscribers. They print or record; nothing leaves the process.

use std::fmt::Display;

use crate::error::BoxError;
use crate::hub::Subscriber;

/// Appends every message it receives to a list.
#[derive(Debug, Clone, Default)]
pub struct RecordingSubscriber<M> {
    received: Vec<M>,
}

impl<M> RecordingSubscriber<M> {
    pub fn new() -> Self {
        Self {
            received: Vec::new(),
        }
    }

    pub fn received(&self) -> &[M] {
        &self.received
    }

    pub fn len(&self) -> usize {
        self.received.len()
    }

    pub fn is_empty(&self) -> bool {
        self.received.is_empty()
    }
}

impl<M: Clone> Subscriber<M> for RecordingSubscriber<M> {
    fn receive(&mut self, message: &M) -> Result<(), BoxError> {
        self.received.push(message.clone());
        Ok(())
    }
}

/// Prints each message to stdout, prefixed with its name.
#[derive(Debug, Clone)]
pub struct ConsoleSubscriber {
    name: String,
    seen: usize,
}

impl ConsoleSubscriber {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            seen: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn seen(&self) -> usize {
        self.seen
    }
}

impl<M: Display> Subscriber<M> for ConsoleSubscriber {
    fn receive(&mut self, message: &M) -> Result<(), BoxError> {
        self.seen += 1;
        println!("[{}] received: {} (total: {})", self.name, message, self.seen);
        Ok(())
    }
}

/// Subscriber backed by a closure.
pub struct FnSubscriber<M> {
    receive_fn: Box<dyn FnMut(&M) -> Result<(), BoxError>>,
}

impl<M> FnSubscriber<M> {
    pub fn new<F>(receive_fn: F) -> Self
    where
        F: FnMut(&M) -> Result<(), BoxError> + 'static,
    {
        Self {
            receive_fn: Box::new(receive_fn),
        }
    }
}

impl<M> Subscriber<M> for FnSubscriber<M> {
    fn receive(&mut self, message: &M) -> Result<(), BoxError> {
        (self.receive_fn)(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_subscriber_keeps_order() {
        let mut recorder = RecordingSubscriber::new();
        recorder.receive(&"a").unwrap();
        recorder.receive(&"b").unwrap();
        assert_eq!(recorder.received(), &["a", "b"]);
        assert_eq!(recorder.len(), 2);
    }

    #[test]
    fn test_console_subscriber_counts() {
        let mut console = ConsoleSubscriber::new("Main");
        Subscriber::<f32>::receive(&mut console, &25.5).unwrap();
        Subscriber::<&str>::receive(&mut console, &"hot").unwrap();
        assert_eq!(console.seen(), 2);
        assert_eq!(console.name(), "Main");
    }

    #[test]
    fn test_fn_subscriber_propagates_error() {
        let mut failing = FnSubscriber::new(|n: &u8| {
            if *n > 3 {
                Err(format!("{n} is too large").into())
            } else {
                Ok(())
            }
        });
        assert!(failing.receive(&1).is_ok());
        assert_eq!(failing.receive(&9).unwrap_err().to_string(), "9 is too large");
    }
}
