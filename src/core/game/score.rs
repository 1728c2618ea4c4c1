//=========================================================================
// Score State
//=========================================================================
//
// Cursor into the reference plus the personal best.
//
// Invariants:
// - cursor <= reference.len()
// - best never decreases within a session
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::ReferenceDigits;

//=== ScoreState ==========================================================

/// Progress of the current run and the best run so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreState {
    reference: ReferenceDigits,
    cursor: usize,
    best: usize,
}

impl ScoreState {
    /// Starts at cursor 0 with a best loaded from the score store.
    pub fn new(reference: ReferenceDigits, best: usize) -> Self {
        Self {
            reference,
            cursor: 0,
            best,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn reference(&self) -> &ReferenceDigits {
        &self.reference
    }

    /// Index of the next expected digit.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn best(&self) -> usize {
        self.best
    }

    /// Digit expected at the cursor, `None` once the run is complete.
    pub fn expected(&self) -> Option<char> {
        self.reference.get(self.cursor)
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.reference.len()
    }

    //--- Mutation ---------------------------------------------------------

    /// Begins a run at `cursor`, clamped to the reference length.
    pub fn restart_at(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.reference.len());
    }

    /// Moves past the expected digit.
    pub fn advance(&mut self) {
        if !self.is_complete() {
            self.cursor += 1;
        }
    }

    /// Raises `best` to the cursor if the cursor is higher.
    ///
    /// Returns the previous best when it was beaten.
    pub fn commit_best(&mut self) -> Option<usize> {
        if self.cursor > self.best {
            let previous = self.best;
            self.best = self.cursor;
            Some(previous)
        } else {
            None
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
