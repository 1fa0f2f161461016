//
// ─── COMPLETION COUNTS ─────────────────────────────────────────────────────────
//

/// Result shape of the completion count queries.
///
/// `total` is the number of eligible units for one tier (completion
/// criteria configured on the course, or completion-tracked modules) and
/// `completed` how many of them the user has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompletionCounts {
    pub completed: u64,
    pub total: u64,
}

impl CompletionCounts {
    #[must_use]
    pub fn new(completed: u64, total: u64) -> Self {
        Self { completed, total }
    }

    /// True when the tier has no eligible units and therefore does not apply.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Integer completion percentage, `floor(100 * completed / total)`.
    ///
    /// A zero total is defined behavior, not an error: it yields 0. The
    /// result is clamped to 100 so an over-counting store can never push
    /// the percentage out of range.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let pct = (self.completed.min(self.total) * 100) / self.total;
        pct as u8
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
