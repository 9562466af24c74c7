//! Session leaderboard
//!
//! Tracks the top 10 finished runs for the lifetime of the process. Nothing
//! is written to disk.

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq)]
pub struct HighScoreEntry {
    /// Final score (may be negative)
    pub score: i64,
    /// Level reached
    pub level: u32,
    /// Driver tick at which the run ended
    pub tick: u64,
}

/// High score leaderboard, sorted by descending score
#[derive(Debug, Clone, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: i64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: i64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a finished run; returns the rank achieved (1-indexed) if it qualified
    pub fn add_score(&mut self, score: i64, level: u32, tick: u64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries
            .insert(rank - 1, HighScoreEntry { score, level, tick });
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<i64> {
        self.entries.first().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board() {
        let board = HighScores::new();
        assert!(board.is_empty());
        assert_eq!(board.top_score(), None);
        // Even negative scores make an empty board
        assert_eq!(board.potential_rank(-5), Some(1));
    }

    #[test]
    fn test_sorted_insert() {
        let mut board = HighScores::new();
        assert_eq!(board.add_score(10, 1, 100), Some(1));
        assert_eq!(board.add_score(30, 2, 200), Some(1));
        assert_eq!(board.add_score(20, 1, 300), Some(2));
        let scores: Vec<i64> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![30, 20, 10]);
        assert_eq!(board.top_score(), Some(30));
    }

    #[test]
    fn test_ties_rank_below_existing() {
        let mut board = HighScores::new();
        board.add_score(10, 1, 1);
        assert_eq!(board.add_score(10, 1, 2), Some(2));
    }

    #[test]
    fn test_full_board_truncates() {
        let mut board = HighScores::new();
        for i in 0..MAX_HIGH_SCORES as i64 {
            board.add_score(i * 10, 1, 0);
        }
        assert!(!board.qualifies(-1));
        assert_eq!(board.add_score(0, 1, 0), None);
        assert_eq!(board.add_score(55, 1, 0), Some(5));
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.entries.last().map(|e| e.score), Some(10));
    }
}
