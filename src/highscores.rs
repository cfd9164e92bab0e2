//! High score leaderboard system
//!
//! Persisted as JSON, tracks the top 10 scores.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistError};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Number of letters in a set of initials
pub const INITIALS_LEN: usize = 3;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's initials
    pub initials: String,
    /// Player's score
    pub score: u64,
    /// Date achieved, as displayed
    pub date: String,
}

/// Leaderboard the game reports finished sessions to
pub trait ScoreBoard {
    /// Current entries, best first
    fn entries(&self) -> &[HighScoreEntry];

    /// Insert a score. Returns the rank achieved (1-indexed) or None if it
    /// didn't qualify.
    fn record(&mut self, initials: &str, score: u64, date: &str) -> Option<usize>;

    /// Check if a score earns a place on the board
    fn qualifies(&self, score: u64) -> bool {
        let entries = self.entries();
        if entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        entries.last().map(|e| score > e.score).unwrap_or(true)
    }
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from a JSON file, starting fresh if it is missing or unreadable
    pub fn load(path: &Path) -> Self {
        let mut scores: Self = persistence::load_or_default(path);
        // Files edited by hand may be unsorted or oversized
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        log::info!("Loaded {} high scores", scores.entries.len());
        scores
    }

    /// Save high scores to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::save(path, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

impl ScoreBoard for HighScores {
    fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    fn record(&mut self, initials: &str, score: u64, date: &str) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            initials: initials.chars().take(INITIALS_LEN).collect(),
            score,
            date: date.to_string(),
        };

        // Find insertion point (sorted descending by score, ties keep older first)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        log::info!("High score {} recorded at rank {}", score, rank);
        Some(rank)
    }
}

/// Arcade-style initials editor: three letters, one active slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialsEntry {
    letters: [u8; INITIALS_LEN],
    slot: usize,
}

impl Default for InitialsEntry {
    fn default() -> Self {
        Self {
            letters: [b'A'; INITIALS_LEN],
            slot: 0,
        }
    }
}

impl InitialsEntry {
    /// Index of the letter being edited
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Advance the active letter, Z wraps to A
    pub fn next_letter(&mut self) {
        let c = &mut self.letters[self.slot];
        *c = if *c == b'Z' { b'A' } else { *c + 1 };
    }

    /// Step the active letter back, A wraps to Z
    pub fn prev_letter(&mut self) {
        let c = &mut self.letters[self.slot];
        *c = if *c == b'A' { b'Z' } else { *c - 1 };
    }

    /// Move the active slot right, stopping at the last letter
    pub fn move_right(&mut self) {
        if self.slot + 1 < INITIALS_LEN {
            self.slot += 1;
        }
    }

    /// Move the active slot left, stopping at the first letter
    pub fn move_left(&mut self) {
        self.slot = self.slot.saturating_sub(1);
    }

    pub fn as_string(&self) -> String {
        self.letters.iter().map(|&b| b as char).collect()
    }
}

/// Format a unix timestamp (seconds) as a `YYYY-MM-DD` date in UTC
pub fn format_date(timestamp_secs: u64) -> String {
    // Days-to-civil conversion over 400-year eras
    let days = (timestamp_secs / 86_400) as i64 + 719_468;
    let era = days.div_euclid(146_097);
    let doe = days.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// Today's date for a new entry
pub fn today() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format_date(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(scores: &[u64]) -> HighScores {
        let mut board = HighScores::new();
        for &s in scores {
            board.record("AAA", s, "2025-01-01");
        }
        board
    }

    #[test]
    fn test_record_keeps_descending_order() {
        let board = board_with(&[300, 900, 100, 600]);
        let scores: Vec<u64> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![900, 600, 300, 100]);
        assert_eq!(board.top_score(), Some(900));
    }

    #[test]
    fn test_record_returns_rank() {
        let mut board = board_with(&[500, 300]);
        assert_eq!(board.record("BOB", 400, "2025-02-02"), Some(2));
        assert_eq!(board.record("CAT", 50, "2025-02-02"), Some(4));
        assert_eq!(board.entries[1].initials, "BOB");
    }

    #[test]
    fn test_ties_rank_after_existing() {
        let mut board = board_with(&[500]);
        assert_eq!(board.record("NEW", 500, "2025-03-03"), Some(2));
        assert_eq!(board.entries[0].initials, "AAA");
    }

    #[test]
    fn test_cap_and_qualification() {
        let mut board = board_with(&[100, 200, 300, 400, 500, 600, 700, 800, 900, 1000]);
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert!(!board.qualifies(100));
        assert!(!board.qualifies(50));
        assert!(board.qualifies(101));
        assert_eq!(board.potential_rank(550), Some(6));
        assert_eq!(board.potential_rank(100), None);

        assert_eq!(board.record("ZED", 150, "2025-04-04"), Some(10));
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.entries.last().map(|e| e.score), Some(150));
        assert_eq!(board.record("LOW", 10, "2025-04-04"), None);
    }

    #[test]
    fn test_short_board_always_qualifies() {
        let board = board_with(&[1000]);
        assert!(board.qualifies(0));
        assert_eq!(board.potential_rank(0), Some(2));
    }

    #[test]
    fn test_initials_truncated() {
        let mut board = HighScores::new();
        board.record("ABCDE", 10, "2025-01-01");
        assert_eq!(board.entries[0].initials, "ABC");
    }

    #[test]
    fn test_initials_entry_wraps() {
        let mut entry = InitialsEntry::default();
        assert_eq!(entry.as_string(), "AAA");
        entry.prev_letter();
        assert_eq!(entry.as_string(), "ZAA");
        entry.next_letter();
        assert_eq!(entry.as_string(), "AAA");

        entry.move_right();
        entry.next_letter();
        entry.next_letter();
        entry.move_right();
        entry.move_right();
        entry.prev_letter();
        assert_eq!(entry.slot(), 2);
        assert_eq!(entry.as_string(), "ACZ");

        entry.move_left();
        entry.move_left();
        entry.move_left();
        assert_eq!(entry.slot(), 0);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(0), "1970-01-01");
        assert_eq!(format_date(951_782_400), "2000-02-29");
        assert_eq!(format_date(1_700_000_000), "2023-11-14");
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("cc-highscores-{}", std::process::id()));
        let path = dir.join("scores.json");
        let board = board_with(&[700, 200]);

        board.save(&path).expect("save");
        assert_eq!(HighScores::load(&path), board);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let path = std::env::temp_dir().join("cc-highscores-missing/none.json");
        assert!(HighScores::load(&path).is_empty());
    }
}
