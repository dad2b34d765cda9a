//! Position tracking inside a filtered card sequence.

/// Where the user is within a study session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavState {
    /// No task selected.
    #[default]
    Idle,
    /// A card is on screen, front side up / unanswered.
    Browsing,
    /// Flashcard flipped, or multiple-choice answer submitted.
    Revealed,
}

/// Cursor over `len` cards with wraparound in both directions.
///
/// With `len == 0` there is no current card; every movement is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigator {
    len: usize,
    index: usize,
    state: NavState,
}

impl Navigator {
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// Enter `Browsing` at the first card.
    #[must_use]
    pub fn start(len: usize) -> Self {
        Self {
            len,
            index: 0,
            state: NavState::Browsing,
        }
    }

    /// Back to the first card of a (possibly resized) sequence.
    pub fn reset(&mut self, len: usize) {
        *self = Self::start(len);
    }

    /// Leave the session entirely.
    pub fn stop(&mut self) {
        *self = Self::idle();
    }

    #[must_use]
    pub fn state(&self) -> NavState {
        self.state
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == NavState::Idle
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.state == NavState::Revealed
    }

    /// Current index, `None` when idle or when the sequence is empty.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        if self.is_idle() || self.index >= self.len {
            None
        } else {
            Some(self.index)
        }
    }

    /// Advance one card, wrapping from the last card to the first.
    pub fn next(&mut self) -> Option<usize> {
        if self.is_idle() || self.len == 0 {
            return None;
        }
        self.index = if self.index + 1 < self.len {
            self.index + 1
        } else {
            0
        };
        self.state = NavState::Browsing;
        Some(self.index)
    }

    /// Step back one card, wrapping from the first card to the last.
    pub fn previous(&mut self) -> Option<usize> {
        if self.is_idle() || self.len == 0 {
            return None;
        }
        self.index = if self.index > 0 {
            self.index - 1
        } else {
            self.len - 1
        };
        self.state = NavState::Browsing;
        Some(self.index)
    }

    /// `Browsing -> Revealed`. Returns `false` if there is nothing to reveal
    /// or the card is already revealed.
    pub fn reveal(&mut self) -> bool {
        if self.state != NavState::Browsing || self.index().is_none() {
            return false;
        }
        self.state = NavState::Revealed;
        true
    }

    /// `Revealed -> Browsing` on the same card.
    pub fn conceal(&mut self) -> bool {
        if self.state != NavState::Revealed {
            return false;
        }
        self.state = NavState::Browsing;
        true
    }
}
