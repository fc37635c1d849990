use crate::model::Task;

/// Derived completion summary for a set of tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
}

impl ProgressSummary {
    pub fn new(completed: usize, total: usize) -> Self {
        ProgressSummary {
            completed,
            total,
            percentage: percentage(completed, total),
        }
    }

    /// Count completed tasks in a slice.
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.is_completed()).count();
        Self::new(completed, tasks.len())
    }
}

/// Completion percentage, rounded half-up and clamped to [0, 100].
///
/// `total == 0` is a valid empty state and yields 0. `completed > total`
/// can happen transiently when counts come from separate fetches; it
/// clamps to 100 rather than report an impossible value.
pub fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (200 * completed + total) / (2 * total);
    rounded.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_total_is_zero() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(5, 0), 0);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(percentage(14, 25), 56);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        // 12.5% rounds up
        assert_eq!(percentage(1, 8), 13);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(percentage(0, 10), 0);
        assert_eq!(percentage(10, 10), 100);
    }

    #[test]
    fn test_overshoot_clamps() {
        assert_eq!(percentage(7, 5), 100);
        assert_eq!(percentage(1000, 1), 100);
    }

    #[test]
    fn test_monotone_in_completed() {
        let total = 37;
        let mut prev = 0;
        for completed in 0..=total {
            let p = percentage(completed, total);
            assert!(p >= prev);
            assert!(p <= 100);
            prev = p;
        }
    }

    #[test]
    fn test_summary_from_tasks() {
        use crate::model::{Status, Task};
        use chrono::Utc;

        let task = |status: Status| Task {
            id: "t".into(),
            project_id: "p".into(),
            title: "task".into(),
            description: None,
            status,
            due_date: None,
            created_at: Utc::now(),
        };

        let tasks = vec![
            task(Status::Completed),
            task(Status::InProgress),
            task(Status::Completed),
            task(Status::Pending),
        ];
        let summary = ProgressSummary::from_tasks(&tasks);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.percentage, 50);

        let empty = ProgressSummary::from_tasks(&[]);
        assert_eq!(empty.percentage, 0);
    }
}
