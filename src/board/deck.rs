//! Bird card supply: draw pile, face-up display, discard pile.

use serde::{Deserialize, Serialize};

use crate::cards::BirdCardId;
use crate::core::GameRng;

/// The shared bird card supply.
///
/// The top of the draw pile is the end of the vector. When the draw pile runs
/// out, the discard pile is shuffled back in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BirdDeck {
    draw_pile: Vec<BirdCardId>,
    display: Vec<BirdCardId>,
    discard_pile: Vec<BirdCardId>,
    display_size: usize,
}

impl BirdDeck {
    /// Create a supply from an already shuffled draw pile.
    #[must_use]
    pub fn new(draw_pile: Vec<BirdCardId>, display_size: usize) -> Self {
        Self {
            draw_pile,
            display: Vec::with_capacity(display_size),
            discard_pile: Vec::new(),
            display_size,
        }
    }

    /// Face-up cards, in slot order.
    #[must_use]
    pub fn display(&self) -> &[BirdCardId] {
        &self.display
    }

    #[must_use]
    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    #[must_use]
    pub fn discard_pile(&self) -> &[BirdCardId] {
        &self.discard_pile
    }

    /// Whether a blind draw can produce a card.
    #[must_use]
    pub fn can_draw(&self) -> bool {
        !self.draw_pile.is_empty() || !self.discard_pile.is_empty()
    }

    /// Whether any card can be gained, face-up or blind.
    #[must_use]
    pub fn has_cards(&self) -> bool {
        !self.display.is_empty() || self.can_draw()
    }

    /// Draw the top card, reshuffling the discard pile if needed.
    pub fn draw(&mut self, rng: &mut GameRng) -> Option<BirdCardId> {
        if self.draw_pile.is_empty() && !self.discard_pile.is_empty() {
            self.draw_pile.append(&mut self.discard_pile);
            rng.shuffle(&mut self.draw_pile);
        }
        self.draw_pile.pop()
    }

    /// Draw up to `count` cards.
    pub fn draw_many(&mut self, count: usize, rng: &mut GameRng) -> Vec<BirdCardId> {
        (0..count).map_while(|_| self.draw(rng)).collect()
    }

    /// Take the face-up card at `index`.
    pub fn take_from_display(&mut self, index: usize) -> Option<BirdCardId> {
        (index < self.display.len()).then(|| self.display.remove(index))
    }

    /// Put a card on the discard pile.
    pub fn discard(&mut self, card: BirdCardId) {
        self.discard_pile.push(card);
    }

    /// Top the display back up to its full size.
    pub fn refill_display(&mut self, rng: &mut GameRng) {
        while self.display.len() < self.display_size {
            match self.draw(rng) {
                Some(card) => self.display.push(card),
                None => break,
            }
        }
    }

    /// Discard the whole display and deal a fresh one.
    pub fn reset_display(&mut self, rng: &mut GameRng) {
        self.discard_pile.append(&mut self.display);
        self.refill_display(rng);
    }
}
