//! Notification hub: synchronous broadcast to an ordered subscriber set.
//!
//! `publish` copies the subscriber list before delivering, so subscribers may
//! call back into the hub (subscribe, unsubscribe, even publish) from inside
//! `receive`. Changes made that way only affect later publications.

use std::any::Any;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use log::{trace, warn};

use crate::error::{BoxError, SubscriberDeliveryError};

pub trait Subscriber<M> {
    fn receive(&mut self, message: &M) -> Result<(), BoxError>;
}

pub type SubscriberHandle<M> = Rc<RefCell<dyn Subscriber<M>>>;

/// Outcome of a single `publish` call.
#[must_use = "delivery failures are only reported through the returned DeliveryReport"]
#[derive(Debug, Default)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failures: Vec<SubscriberDeliveryError>,
}

impl DeliveryReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn attempted(&self) -> usize {
        self.delivered + self.failures.len()
    }
}

pub struct NotificationHub<M> {
    subscribers: RefCell<Vec<SubscriberHandle<M>>>,
}

impl<M> Default for NotificationHub<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> NotificationHub<M> {
    pub fn new() -> Self {
        Self {
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// Returns `false` if the subscriber was already present.
    pub fn subscribe(&self, subscriber: SubscriberHandle<M>) -> bool {
        if self.contains(&subscriber) {
            return false;
        }
        self.subscribers.borrow_mut().push(subscriber);
        true
    }

    /// Returns `false` if the subscriber was not present.
    pub fn unsubscribe<S: ?Sized>(&self, subscriber: &Rc<RefCell<S>>) -> bool {
        let target = address_of(subscriber);
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|existing| address_of(existing) != target);
        subscribers.len() != before
    }

    pub fn contains<S: ?Sized>(&self, subscriber: &Rc<RefCell<S>>) -> bool {
        let target = address_of(subscriber);
        self.subscribers
            .borrow()
            .iter()
            .any(|existing| address_of(existing) == target)
    }

    pub fn len(&self) -> usize {
        self.subscribers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.subscribers.borrow_mut().clear();
    }

    /// Delivers `message` to every subscriber present when the call starts.
    ///
    /// Errors and panics raised by a subscriber are recorded in the report;
    /// the remaining subscribers still receive the message.
    pub fn publish(&self, message: &M) -> DeliveryReport {
        let snapshot: Vec<SubscriberHandle<M>> = self.subscribers.borrow().clone();
        let mut report = DeliveryReport::default();

        for (position, subscriber) in snapshot.iter().enumerate() {
            match self.deliver(position, subscriber, message) {
                Ok(()) => {
                    trace!("delivered to subscriber #{position}");
                    report.delivered += 1;
                }
                Err(failure) => {
                    warn!("{failure}");
                    report.failures.push(failure);
                }
            }
        }
        report
    }

    fn deliver(
        &self,
        position: usize,
        subscriber: &SubscriberHandle<M>,
        message: &M,
    ) -> Result<(), SubscriberDeliveryError> {
        let mut receiver = subscriber
            .try_borrow_mut()
            .map_err(|_| SubscriberDeliveryError::busy(position))?;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| receiver.receive(message)))
            .map_err(|payload| {
                SubscriberDeliveryError::panicked(position, panic_message(payload.as_ref()))
            })?;

        outcome.map_err(|source| SubscriberDeliveryError::returned(position, source))
    }
}

fn address_of<S: ?Sized>(subscriber: &Rc<RefCell<S>>) -> *const () {
    Rc::as_ptr(subscriber) as *const ()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
