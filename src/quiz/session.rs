//! Per-page quiz session state.

/// Mutable state of one quiz session.
///
/// Lives as long as the page; nothing here is persisted.
#[derive(Debug, Default, Clone)]
pub struct QuizSession {
    /// Region id waiting for an answer.
    pending: Option<String>,
    /// Normalized export currently chosen in the picker.
    chosen_export: Option<String>,
    /// Correct answers so far. Only ever increases.
    tally: u32,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Replaces any pending selection.
    pub fn select(&mut self, region_id: &str) {
        self.pending = Some(region_id.to_string());
    }

    /// Removes and returns the pending selection.
    pub fn take_pending(&mut self) -> Option<String> {
        self.pending.take()
    }

    pub fn chosen_export(&self) -> Option<&str> {
        self.chosen_export.as_deref()
    }

    /// `None` clears the choice.
    pub fn choose_export(&mut self, normalized: Option<String>) {
        self.chosen_export = normalized;
    }

    pub fn tally(&self) -> u32 {
        self.tally
    }

    pub fn record_correct(&mut self) -> u32 {
        self.tally = self.tally.saturating_add(1);
        self.tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_replaces() {
        let mut session = QuizSession::new();
        session.select("A1");
        session.select("B2");
        assert_eq!(session.pending(), Some("B2"));
        assert_eq!(session.take_pending().as_deref(), Some("B2"));
        assert_eq!(session.pending(), None);
    }

    #[test]
    fn test_export_choice_can_be_cleared() {
        let mut session = QuizSession::new();
        session.choose_export(Some("oil".to_string()));
        assert_eq!(session.chosen_export(), Some("oil"));
        session.choose_export(None);
        assert_eq!(session.chosen_export(), None);
    }

    #[test]
    fn test_tally_counts_up() {
        let mut session = QuizSession::new();
        assert_eq!(session.tally(), 0);
        assert_eq!(session.record_correct(), 1);
        assert_eq!(session.record_correct(), 2);
    }
}
