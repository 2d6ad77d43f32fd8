use circular_buffer::CircularBuffer;

use crate::entity::direction::Direction;

/// Classifications remembered.
pub const HISTORY_LEN: usize = 6;
/// Consecutive identical classifications needed to act on one.
pub const REQUIRED_STABLE: usize = 3;

/// Smooths per-frame hand classifications so a single misread frame never steers.
#[derive(Debug)]
pub struct Stabilizer {
    recent: CircularBuffer<HISTORY_LEN, Option<Direction>>,
}

impl Default for Stabilizer {
    fn default() -> Self {
        Self {
            recent: CircularBuffer::new(),
        }
    }
}

impl Stabilizer {
    /// Records a classification (`None` for no gesture or no hand) and returns the stable direction,
    /// if the latest few agree.
    pub fn push(&mut self, gesture: Option<Direction>) -> Option<Direction> {
        self.recent.push_back(gesture);
        self.stable()
    }

    pub fn stable(&self) -> Option<Direction> {
        if self.recent.len() < REQUIRED_STABLE {
            return None;
        }
        let mut tail = self.recent.iter().rev().take(REQUIRED_STABLE);
        let first = (*tail.next()?)?;
        tail.all(|gesture| *gesture == Some(first)).then_some(first)
    }

    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    pub fn clear(&mut self) {
        self.recent.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_three_in_a_row() {
        let mut stabilizer = Stabilizer::default();
        assert_eq!(stabilizer.push(Some(Direction::Up)), None);
        assert_eq!(stabilizer.push(Some(Direction::Up)), None);
        assert_eq!(stabilizer.push(Some(Direction::Up)), Some(Direction::Up));
    }

    #[test]
    fn test_interruption_resets_the_run() {
        let mut stabilizer = Stabilizer::default();
        stabilizer.push(Some(Direction::Left));
        stabilizer.push(Some(Direction::Left));
        assert_eq!(stabilizer.push(None), None);
        assert_eq!(stabilizer.push(Some(Direction::Left)), None);
        assert_eq!(stabilizer.push(Some(Direction::Left)), None);
        assert_eq!(stabilizer.push(Some(Direction::Left)), Some(Direction::Left));
    }

    #[test]
    fn test_none_is_never_stable() {
        let mut stabilizer = Stabilizer::default();
        for _ in 0..5 {
            assert_eq!(stabilizer.push(None), None);
        }
    }

    #[test]
    fn test_history_is_bounded() {
        let mut stabilizer = Stabilizer::default();
        for _ in 0..10 {
            stabilizer.push(Some(Direction::Down));
        }
        assert_eq!(stabilizer.len(), HISTORY_LEN);
        stabilizer.clear();
        assert!(stabilizer.is_empty());
        assert_eq!(stabilizer.stable(), None);
    }
}
