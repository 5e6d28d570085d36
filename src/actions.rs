//! Reversible actions for the command log.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::command_log::Action;
use crate::deck::{Card, Deck};
use crate::error::BoxError;

/// Flips a shared boolean.
#[derive(Debug, Clone)]
pub struct ToggleFlag {
    flag: Rc<Cell<bool>>,
}

impl ToggleFlag {
    pub fn new(flag: Rc<Cell<bool>>) -> Self {
        Self { flag }
    }
}

impl Action for ToggleFlag {
    fn describe(&self) -> String {
        "toggle flag".to_string()
    }

    fn perform(&mut self) -> Result<(), BoxError> {
        self.flag.set(!self.flag.get());
        Ok(())
    }

    fn revert(&mut self) -> Result<(), BoxError> {
        self.perform()
    }
}

/// Adds `by` to a shared counter.
#[derive(Debug, Clone)]
pub struct Increment {
    counter: Rc<Cell<i64>>,
    by: i64,
}

impl Increment {
    pub fn new(counter: Rc<Cell<i64>>, by: i64) -> Self {
        Self { counter, by }
    }
}

impl Action for Increment {
    fn describe(&self) -> String {
        format!("increment by {}", self.by)
    }

    fn perform(&mut self) -> Result<(), BoxError> {
        let next = self
            .counter
            .get()
            .checked_add(self.by)
            .ok_or("counter overflow")?;
        self.counter.set(next);
        Ok(())
    }

    fn revert(&mut self) -> Result<(), BoxError> {
        let previous = self
            .counter
            .get()
            .checked_sub(self.by)
            .ok_or("counter underflow")?;
        self.counter.set(previous);
        Ok(())
    }
}

type Step = Box<dyn FnMut() -> Result<(), BoxError>>;

/// Action built from a pair of closures.
pub struct FnAction {
    label: String,
    perform_fn: Step,
    revert_fn: Step,
}

impl FnAction {
    pub fn new<P, R>(label: impl Into<String>, perform_fn: P, revert_fn: R) -> Self
    where
        P: FnMut() -> Result<(), BoxError> + 'static,
        R: FnMut() -> Result<(), BoxError> + 'static,
    {
        Self {
            label: label.into(),
            perform_fn: Box::new(perform_fn),
            revert_fn: Box::new(revert_fn),
        }
    }
}

impl Action for FnAction {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn perform(&mut self) -> Result<(), BoxError> {
        (self.perform_fn)()
    }

    fn revert(&mut self) -> Result<(), BoxError> {
        (self.revert_fn)()
    }
}

// ============================================================================
// Card actions
// ============================================================================

/// Deals up to `count` cards from the deck into a hand.
#[derive(Debug)]
pub struct DealCards {
    deck: Rc<RefCell<Deck>>,
    hand: Rc<RefCell<Vec<Card>>>,
    count: usize,
    dealt: usize,
}

impl DealCards {
    pub fn new(deck: Rc<RefCell<Deck>>, hand: Rc<RefCell<Vec<Card>>>, count: usize) -> Self {
        Self {
            deck,
            hand,
            count,
            dealt: 0,
        }
    }
}

impl Action for DealCards {
    fn describe(&self) -> String {
        format!("deal {} card(s)", self.count)
    }

    fn perform(&mut self) -> Result<(), BoxError> {
        let cards = self.deck.borrow_mut().deal(self.count)?;
        self.dealt = cards.len();
        self.hand.borrow_mut().extend(cards);
        Ok(())
    }

    fn revert(&mut self) -> Result<(), BoxError> {
        let returned = {
            let mut hand = self.hand.borrow_mut();
            if hand.len() < self.dealt {
                return Err("hand no longer holds the dealt cards".into());
            }
            let split_at = hand.len() - self.dealt;
            hand.split_off(split_at)
        };
        self.deck.borrow_mut().restore(returned);
        self.dealt = 0;
        Ok(())
    }
}

/// Shuffles a full deck with a fixed seed; revert restores the prior order.
#[derive(Debug)]
pub struct ShuffleDeck {
    deck: Rc<RefCell<Deck>>,
    seed: u64,
    previous: Option<Vec<Card>>,
}

impl ShuffleDeck {
    pub fn new(deck: Rc<RefCell<Deck>>, seed: u64) -> Self {
        Self {
            deck,
            seed,
            previous: None,
        }
    }
}

impl Action for ShuffleDeck {
    fn describe(&self) -> String {
        format!("shuffle deck (seed {})", self.seed)
    }

    fn perform(&mut self) -> Result<(), BoxError> {
        let mut deck = self.deck.borrow_mut();
        let before = deck.cards().to_vec();
        let mut rng = StdRng::seed_from_u64(self.seed);
        deck.shuffle(&mut rng)?;
        self.previous = Some(before);
        Ok(())
    }

    fn revert(&mut self) -> Result<(), BoxError> {
        let previous = self.previous.take().ok_or("deck was never shuffled")?;
        self.deck.borrow_mut().replace_cards(previous);
        Ok(())
    }
}
