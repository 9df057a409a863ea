//! The experiments board: every backend-tracked experiment with status
//! counts, plus removal on delete. The listing is authoritative; each
//! refresh fully replaces the rows.

use simdash_core::types::{ExperimentRecord, ExperimentStatus};

/// Aggregate counts shown in the stats strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardStats {
    pub total: usize,
    pub running: usize,
    pub completed: usize,
    pub failed: usize,
}

#[derive(Debug, Default)]
pub struct ExperimentsBoard {
    rows: Vec<ExperimentRecord>,
}

impl ExperimentsBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the board contents with a fresh listing.
    pub fn apply_listing(&mut self, rows: Vec<ExperimentRecord>) {
        self.rows = rows;
    }

    /// Drop a row after a successful delete. Returns whether a row went away.
    pub fn remove(&mut self, experiment_id: &str) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.experiment_id != experiment_id);
        self.rows.len() < before
    }

    pub fn rows(&self) -> &[ExperimentRecord] {
        &self.rows
    }

    pub fn stats(&self) -> BoardStats {
        BoardStats {
            total: self.rows.len(),
            running: self.count(ExperimentStatus::Running),
            completed: self.count(ExperimentStatus::Completed),
            failed: self.count(ExperimentStatus::Failed),
        }
    }

    fn count(&self, status: ExperimentStatus) -> usize {
        self.rows.iter().filter(|r| r.status == status).count()
    }

    /// Plain-text table for the `experiments` subcommand.
    pub fn table_lines(&self) -> Vec<String> {
        if self.rows.is_empty() {
            return vec!["No experiments found.".to_string()];
        }
        let stats = self.stats();
        let mut lines = vec![
            format!(
                "{} experiments ({} running, {} completed, {} failed)",
                stats.total, stats.running, stats.completed, stats.failed
            ),
            String::new(),
        ];
        for row in &self.rows {
            lines.push(format!(
                "{} {:<12} {}  [{}]  {}",
                status_icon(row.status),
                row.status.to_string().to_uppercase(),
                row.experiment_id,
                row.template_id,
                row.created_at.as_deref().unwrap_or("unknown"),
            ));
            if !row.template_description.is_empty() {
                lines.push(format!("    {}", row.template_description));
            }
        }
        lines
    }
}

pub fn status_icon(status: ExperimentStatus) -> &'static str {
    match status {
        ExperimentStatus::Pending | ExperimentStatus::Running => "⏳",
        ExperimentStatus::Completed => "✅",
        ExperimentStatus::Failed => "❌",
        ExperimentStatus::Unknown => "❓",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, status: ExperimentStatus) -> ExperimentRecord {
        ExperimentRecord {
            experiment_id: id.to_string(),
            template_id: "template-default".to_string(),
            template_description: String::new(),
            status,
            created_at: None,
        }
    }

    #[test]
    fn test_delete_shrinks_board_by_one_row() {
        let mut board = ExperimentsBoard::new();
        board.apply_listing(vec![
            record("exp-1", ExperimentStatus::Completed),
            record("exp-2", ExperimentStatus::Running),
            record("exp-3", ExperimentStatus::Failed),
        ]);
        let before = board.rows().len();

        assert!(board.remove("exp-3"));

        assert_eq!(board.rows().len(), before - 1);
        assert!(!board.rows().iter().any(|r| r.experiment_id == "exp-3"));
    }

    #[test]
    fn test_remove_unknown_id_changes_nothing() {
        let mut board = ExperimentsBoard::new();
        board.apply_listing(vec![record("exp-1", ExperimentStatus::Completed)]);
        assert!(!board.remove("exp-9"));
        assert_eq!(board.rows().len(), 1);
    }

    #[test]
    fn test_stats_count_by_status() {
        let mut board = ExperimentsBoard::new();
        board.apply_listing(vec![
            record("a", ExperimentStatus::Running),
            record("b", ExperimentStatus::Running),
            record("c", ExperimentStatus::Completed),
            record("d", ExperimentStatus::Unknown),
        ]);
        let stats = board.stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.running, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.failed, 0);
    }

    #[test]
    fn test_listing_replaces_rows() {
        let mut board = ExperimentsBoard::new();
        board.apply_listing(vec![record("a", ExperimentStatus::Completed)]);
        board.apply_listing(vec![
            record("b", ExperimentStatus::Running),
            record("c", ExperimentStatus::Running),
        ]);
        assert_eq!(board.rows().len(), 2);
    }
}
