//! A standard 52-card deck used by the card-dealing actions.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

pub const FULL_DECK: usize = 52;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("All cards have been dealt")]
    AllDealt,
    #[error("Only full decks can be shuffled ({remaining} of 52 left)")]
    NotFull { remaining: usize },
    #[error("{0} is not a number card rank (expected 2 to 10)")]
    InvalidRank(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        };
        f.write_str(name)
    }
}

/// Value of a number card, always in `2..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pip(u8);

impl Pip {
    pub fn new(value: u8) -> Result<Self, DeckError> {
        if (2..=10).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DeckError::InvalidRank(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    Ace,
    Number(Pip),
    Jack,
    Queen,
    King,
}

impl Rank {
    pub fn number(value: u8) -> Result<Self, DeckError> {
        Pip::new(value).map(Rank::Number)
    }

    pub fn all() -> impl Iterator<Item = Rank> {
        std::iter::once(Rank::Ace)
            .chain((2..=10).map(|value| Rank::Number(Pip(value))))
            .chain([Rank::Jack, Rank::Queen, Rank::King])
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Ace => f.write_str("A"),
            Rank::Number(pip) => write!(f, "{}", pip.value()),
            Rank::Jack => f.write_str("J"),
            Rank::Queen => f.write_str("Q"),
            Rank::King => f.write_str("K"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

/// Cards are dealt from the end of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    pub fn new() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::all().map(move |rank| Card::new(rank, suit)))
            .collect();
        Self { cards }
    }

    pub fn count(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() == FULL_DECK
    }

    /// Removes at most `num` cards; fewer if the deck runs short.
    pub fn deal(&mut self, num: usize) -> Result<Vec<Card>, DeckError> {
        if self.cards.is_empty() {
            return Err(DeckError::AllDealt);
        }
        let actual = num.min(self.cards.len());
        let split_at = self.cards.len() - actual;
        Ok(self.cards.split_off(split_at))
    }

    pub fn deal_card(&mut self) -> Result<Card, DeckError> {
        self.deal(1)?.pop().ok_or(DeckError::AllDealt)
    }

    pub fn deal_hand(&mut self, hand_size: usize) -> Result<Vec<Card>, DeckError> {
        self.deal(hand_size)
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&mut Self, DeckError> {
        if !self.is_full() {
            return Err(DeckError::NotFull {
                remaining: self.count(),
            });
        }
        self.cards.shuffle(rng);
        Ok(self)
    }

    /// Puts previously dealt cards back on top, in the order given.
    pub fn restore(&mut self, cards: Vec<Card>) {
        self.cards.extend(cards);
    }

    pub(crate) fn replace_cards(&mut self, cards: Vec<Card>) {
        self.cards = cards;
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck of {} cards", self.count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_new_deck_is_complete() {
        let deck = Deck::new();
        assert_eq!(deck.count(), FULL_DECK);
        let unique: HashSet<&Card> = deck.cards().iter().collect();
        assert_eq!(unique.len(), FULL_DECK);
        assert_eq!(deck.to_string(), "Deck of 52 cards");
        assert_eq!(deck.cards()[0].to_string(), "A of Hearts");
        assert_eq!(deck.cards()[51].to_string(), "K of Spades");
    }

    #[test]
    fn test_card_display() {
        let ten = Rank::number(10).unwrap();
        assert_eq!(Card::new(ten, Suit::Diamonds).to_string(), "10 of Diamonds");
        assert_eq!(Card::new(Rank::Jack, Suit::Clubs).to_string(), "J of Clubs");
    }

    #[test]
    fn test_number_ranks_stay_in_range() {
        assert_eq!(Rank::number(1), Err(DeckError::InvalidRank(1)));
        assert_eq!(Rank::number(11), Err(DeckError::InvalidRank(11)));
        assert_eq!(Pip::new(0), Err(DeckError::InvalidRank(0)));
        assert_eq!(Pip::new(2).unwrap().value(), 2);
        assert_eq!(Rank::number(10).unwrap().to_string(), "10");

        let numbers: Vec<u8> = Rank::all()
            .filter_map(|rank| match rank {
                Rank::Number(pip) => Some(pip.value()),
                _ => None,
            })
            .collect();
        assert_eq!(numbers, (2..=10).collect::<Vec<u8>>());
    }

    #[test]
    fn test_deal_from_top() {
        let mut deck = Deck::new();
        let card = deck.deal_card().unwrap();
        assert_eq!(card.to_string(), "K of Spades");
        let hand = deck.deal_hand(5).unwrap();
        assert_eq!(hand.len(), 5);
        assert_eq!(deck.count(), 46);
    }

    #[test]
    fn test_deal_more_than_remaining() {
        let mut deck = Deck::new();
        deck.deal(50).unwrap();
        assert_eq!(deck.deal(10).unwrap().len(), 2);
        assert_eq!(deck.deal_card(), Err(DeckError::AllDealt));
        assert_eq!(deck.deal(0), Err(DeckError::AllDealt));
    }

    #[test]
    fn test_shuffle_requires_full_deck() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut deck = Deck::new();
        deck.shuffle(&mut rng).unwrap();
        assert_eq!(deck.count(), FULL_DECK);

        deck.deal_card().unwrap();
        assert_eq!(
            deck.shuffle(&mut rng).map(|d| d.count()),
            Err(DeckError::NotFull { remaining: 51 })
        );
    }

    #[test]
    fn test_restore_returns_cards() {
        let mut deck = Deck::new();
        let original = deck.clone();
        let hand = deck.deal_hand(3).unwrap();
        deck.restore(hand);
        assert_eq!(deck, original);
    }
}
