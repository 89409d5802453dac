//! Turn counting for a game session
//!
//! The game advances in whole turns. A session may have a fixed length
//! or run open-ended; the clock only counts, it never schedules.

use serde::{Deserialize, Serialize};

/// Counts played turns against an optional limit
///
/// # Example
/// ```
/// use portfolio_sim_core_rs::TurnClock;
///
/// let mut clock = TurnClock::new(Some(3));
/// assert_eq!(clock.current_turn(), 0);
/// assert_eq!(clock.next_turn(), 1);
///
/// clock.advance();
/// assert_eq!(clock.current_turn(), 1);
/// assert_eq!(clock.turns_remaining(), Some(2));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnClock {
    /// Turns played so far
    current_turn: u32,
    /// Game length, `None` for open-ended play
    max_turns: Option<u32>,
}

impl TurnClock {
    /// Create a new clock
    ///
    /// # Panics
    /// Panics if `max_turns` is `Some(0)`
    pub fn new(max_turns: Option<u32>) -> Self {
        assert!(max_turns != Some(0), "max_turns must be positive");
        Self {
            current_turn: 0,
            max_turns,
        }
    }

    /// Record one played turn
    pub fn advance(&mut self) {
        self.current_turn += 1;
    }

    /// Turns played so far
    pub fn current_turn(&self) -> u32 {
        self.current_turn
    }

    /// Number the next turn will carry (1-based)
    pub fn next_turn(&self) -> u32 {
        self.current_turn + 1
    }

    /// Game length, if limited
    pub fn max_turns(&self) -> Option<u32> {
        self.max_turns
    }

    /// Turns left to play, if limited
    pub fn turns_remaining(&self) -> Option<u32> {
        self.max_turns
            .map(|max| max.saturating_sub(self.current_turn))
    }

    /// Whether the last turn has been played
    ///
    /// # Example
    /// ```
    /// use portfolio_sim_core_rs::TurnClock;
    ///
    /// let mut clock = TurnClock::new(Some(1));
    /// assert!(!clock.is_finished());
    /// clock.advance();
    /// assert!(clock.is_finished());
    ///
    /// assert!(!TurnClock::new(None).is_finished());
    /// ```
    pub fn is_finished(&self) -> bool {
        self.turns_remaining() == Some(0)
    }
}
