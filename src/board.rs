//! Board Projection
//!
//! Turns the task list into the four board columns and the pieces of
//! each card: description preview, avatar row, subtask progress.

use std::collections::HashMap;

use leptos_dragdrop::payload_key;

use crate::models::{Assignee, Person, Stage, Task, CARD_ID_PREFIX};
use crate::subtasks::Progress;

pub const DESCRIPTION_PREVIEW_CHARS: usize = 40;
pub const CARD_AVATARS: usize = 2;
pub const DETAIL_AVATARS: usize = 3;
pub const EMPTY_COLUMN_TEXT: &str = "No tasks to do";

/// Viewports at or below this width use the move menu instead of dragging
pub const TOUCH_BREAKPOINT_PX: f64 = 800.0;

/// Tasks of each stage, in stage order; relative order is kept
pub fn partition_by_stage(tasks: &[Task]) -> [Vec<Task>; 4] {
    let mut columns: [Vec<Task>; 4] = Default::default();
    for task in tasks {
        columns[task.stage.index()].push(task.clone());
    }
    columns
}

/// Task id and target stage of a drop, from the card payload and the
/// id of the column container it landed on
pub fn drop_target(payload: &str, container_id: &str) -> (String, Stage) {
    (payload_key(payload, CARD_ID_PREFIX).to_string(), Stage::from_container_id(container_id))
}

/// First 40 characters plus an ellipsis when longer
pub fn truncate_description(text: &str) -> String {
    if text.chars().count() <= DESCRIPTION_PREVIEW_CHARS {
        return text.to_string();
    }
    let mut preview: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    preview.push('…');
    preview
}

/// CSS class for a category label: `User Story` -> `user-story`
pub fn category_class(category: &str) -> String {
    category.trim().to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}

#[derive(Debug, Clone, PartialEq)]
pub struct AvatarRow {
    pub shown: Vec<Assignee>,
    /// Rendered as `+N` when non-zero
    pub hidden: usize,
}

pub fn avatar_row(assignees: &[Assignee], max: usize) -> AvatarRow {
    AvatarRow {
        shown: assignees.iter().take(max).cloned().collect(),
        hidden: assignees.len().saturating_sub(max),
    }
}

/// Person id -> current color
pub fn color_index(people: &[Person]) -> HashMap<String, String> {
    people
        .iter()
        .map(|p| (p.id().to_string(), p.info().color.clone()))
        .collect()
}

/// Prefer the person's current color over the copy stored on the task
pub fn refresh_colors(assignees: &[Assignee], colors: &HashMap<String, String>) -> Vec<Assignee> {
    assignees
        .iter()
        .map(|a| match colors.get(&a.id) {
            Some(color) => Assignee { color: color.clone(), ..a.clone() },
            None => a.clone(),
        })
        .collect()
}

/// Progress shown on a card; hidden when the task has no subtasks
pub fn card_progress(task: &Task) -> Option<Progress> {
    let progress = Progress::of(&task.subtasks);
    (progress.total > 0).then_some(progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PersonInfo, Subtask, SubtaskId, TaskDraft};

    fn task(title: &str, stage: Stage) -> Task {
        let mut task = TaskDraft { title: title.into(), ..TaskDraft::default() }.into_task(stage, 0);
        task.id = title.into();
        task
    }

    fn assignee(id: &str) -> Assignee {
        Assignee { id: id.into(), name: id.into(), email: String::new(), color: "#000000".into() }
    }

    #[test]
    fn test_partition_keeps_order() {
        let tasks = vec![
            task("a", Stage::Done),
            task("b", Stage::ToDo),
            task("c", Stage::Done),
        ];
        let columns = partition_by_stage(&tasks);
        assert_eq!(columns[0].len(), 1);
        assert!(columns[1].is_empty());
        assert!(columns[2].is_empty());
        let done: Vec<&str> = columns[3].iter().map(|t| t.id.as_str()).collect();
        assert_eq!(done, vec!["a", "c"]);
    }

    #[test]
    fn test_drop_target_decides_column() {
        assert_eq!(drop_target("task-Nabc", "awaitFeedback"), ("-Nabc".to_string(), Stage::AwaitFeedback));
        assert_eq!(drop_target("task7", Stage::Done.container_id()), ("7".to_string(), Stage::Done));
        // Raw ids and unknown containers
        assert_eq!(drop_target("-Nxyz", "sidebar"), ("-Nxyz".to_string(), Stage::ToDo));
    }

    #[test]
    fn test_truncate_description() {
        assert_eq!(truncate_description("short"), "short");
        let exact = "x".repeat(40);
        assert_eq!(truncate_description(&exact), exact);
        let long = "ü".repeat(45);
        let preview = truncate_description(&long);
        assert_eq!(preview.chars().count(), 41);
        assert!(preview.ends_with('…'));
    }

    #[test]
    fn test_avatar_overflow() {
        let list: Vec<Assignee> = ["a", "b", "c", "d", "e"].iter().map(|id| assignee(id)).collect();
        let row = avatar_row(&list, CARD_AVATARS);
        assert_eq!(row.shown.len(), 2);
        assert_eq!(row.hidden, 3);
        assert_eq!(avatar_row(&list[..1], CARD_AVATARS).hidden, 0);
    }

    #[test]
    fn test_colors_follow_people() {
        let people = vec![Person::Account(PersonInfo {
            id: "a".into(),
            name: "A".into(),
            email: String::new(),
            phone: String::new(),
            color: "#FF5EB3".into(),
        })];
        let refreshed = refresh_colors(&[assignee("a"), assignee("gone")], &color_index(&people));
        assert_eq!(refreshed[0].color, "#FF5EB3");
        assert_eq!(refreshed[1].color, "#000000");
    }

    #[test]
    fn test_card_progress() {
        let mut t = task("p", Stage::ToDo);
        assert_eq!(card_progress(&t), None);
        t.subtasks = vec![
            Subtask { id: SubtaskId(1), name: "a".into(), completed: true },
            Subtask { id: SubtaskId(2), name: "b".into(), completed: false },
        ];
        assert_eq!(card_progress(&t), Some(Progress { done: 1, total: 2 }));
    }

    #[tokio::test]
    async fn test_created_task_shows_on_board() {
        use crate::commands::{create_task, list_tasks, save_subtasks};
        use crate::remote::MemoryStore;
        use crate::subtasks::SubtaskList;

        let store = MemoryStore::new();
        let mut subtasks = SubtaskList::new();
        subtasks.add("Draft");
        subtasks.add("Review");
        let draft = TaskDraft {
            title: "Write spec".into(),
            due_date: "2025-03-01".into(),
            category: "User Story".into(),
            subtasks: subtasks.to_vec(),
            ..TaskDraft::default()
        };
        let created = create_task(&store, draft, Stage::ToDo, 1).await.unwrap();
        assert_eq!(store.snapshot(&format!("tasks/{}", created.id))["stage"], 0);

        let tasks = list_tasks(&store).await.unwrap();
        let columns = partition_by_stage(&tasks);
        assert_eq!(columns[Stage::ToDo.index()].len(), 1);
        let card = &columns[Stage::ToDo.index()][0];
        assert_eq!(card.title, "Write spec");
        assert!(card.subtasks.iter().all(|s| !s.completed));

        let progress = card_progress(card).unwrap();
        assert_eq!(progress.label(), "0/2 Subtasks");
        assert_eq!(progress.state_class(), "not-done");

        // Ticking both items flips the card to done
        let mut list = SubtaskList::from_subtasks(card.subtasks.clone());
        let ids: Vec<SubtaskId> = list.items().iter().map(|s| s.id).collect();
        list.toggle(ids[0]);
        assert_eq!(list.progress().state_class(), "not-done");
        list.toggle(ids[1]);
        save_subtasks(&store, &card.id, list.items()).await.unwrap();

        let tasks = list_tasks(&store).await.unwrap();
        let progress = card_progress(&tasks[0]).unwrap();
        assert_eq!(progress.label(), "2/2 Subtasks");
        assert_eq!(progress.state_class(), "all-done");
    }

    #[test]
    fn test_category_class() {
        assert_eq!(category_class("Technical Task"), "technical-task");
        assert_eq!(category_class("User Story"), "user-story");
    }
}
