//! Summary Figures
//!
//! Per-stage task counts and the time-of-day greeting.

use chrono::NaiveDate;

use crate::models::{Priority, Stage, Task};

/// Below this width the greeting first shows fullscreen
pub const GREETING_SPLASH_MAX_WIDTH: f64 = 1000.0;
pub const GREETING_SPLASH_MS: u32 = 2000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub all: usize,
    pub to_do: usize,
    pub in_progress: usize,
    pub await_feedback: usize,
    pub done: usize,
    pub urgent: usize,
}

impl TaskCounts {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut counts, task| {
            counts.all += 1;
            match task.stage {
                Stage::ToDo => counts.to_do += 1,
                Stage::InProgress => counts.in_progress += 1,
                Stage::AwaitFeedback => counts.await_feedback += 1,
                Stage::Done => counts.done += 1,
            }
            if task.priority == Priority::Urgent {
                counts.urgent += 1;
            }
            counts
        })
    }
}

/// Morning 5-11, afternoon 12-17, evening otherwise
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning",
        12..=17 => "Good afternoon",
        _ => "Good evening",
    }
}

/// `October 18, 2026`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskDraft;

    fn task(stage: Stage, priority: Priority) -> Task {
        TaskDraft { title: "t".into(), priority, ..TaskDraft::default() }.into_task(stage, 0)
    }

    #[test]
    fn test_counts() {
        let tasks = vec![
            task(Stage::ToDo, Priority::Urgent),
            task(Stage::ToDo, Priority::Low),
            task(Stage::AwaitFeedback, Priority::Urgent),
            task(Stage::Done, Priority::Medium),
        ];
        let counts = TaskCounts::from_tasks(&tasks);
        assert_eq!(
            counts,
            TaskCounts { all: 4, to_do: 2, in_progress: 0, await_feedback: 1, done: 1, urgent: 2 }
        );
        assert_eq!(TaskCounts::from_tasks(&[]), TaskCounts::default());
    }

    #[test]
    fn test_greeting_boundaries() {
        assert_eq!(greeting(4), "Good evening");
        assert_eq!(greeting(5), "Good morning");
        assert_eq!(greeting(11), "Good morning");
        assert_eq!(greeting(12), "Good afternoon");
        assert_eq!(greeting(17), "Good afternoon");
        assert_eq!(greeting(18), "Good evening");
        assert_eq!(greeting(0), "Good evening");
    }

    #[test]
    fn test_long_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 8).unwrap();
        assert_eq!(format_long_date(date), "October 8, 2026");
    }
}
