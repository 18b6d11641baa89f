mod common;

use common::test_store;
use serde_json::json;
use workboard::commands;
use workboard::models::{ProjectStatus, Role, TaskStatus};
use workboard::store::TASKS;
use workboard::views::Board;

fn seed_project(store: &workboard::store::Store) -> (String, String) {
    let assignee = store
        .create_member("Ada Lovelace", "ada@example.com", Role::Developer)
        .unwrap();
    let project = store
        .create_project("Analytical Engine", &assignee, ProjectStatus::Active, None)
        .unwrap();
    (project, assignee)
}

#[test]
fn new_task_lands_in_its_status_lane() {
    let (store, _remote) = test_store();
    let (project, assignee) = seed_project(&store);

    let id = store
        .create_task(&project, "Design mill", &assignee, None, TaskStatus::Todo, None)
        .unwrap();

    let board = Board::from_tasks(store.list_tasks(&project));
    assert_eq!(board.todo.len(), 1);
    assert_eq!(board.todo[0].id, id);
    assert!(board.in_progress.is_empty());
    assert!(board.done.is_empty());
}

#[test]
fn board_is_scoped_to_one_project() {
    let (store, _remote) = test_store();
    let (project, assignee) = seed_project(&store);
    let other = store
        .create_project("Difference Engine", &assignee, ProjectStatus::Active, None)
        .unwrap();

    store
        .create_task(&project, "Mine", &assignee, None, TaskStatus::Todo, None)
        .unwrap();
    store
        .create_task(&other, "Theirs", &assignee, None, TaskStatus::Todo, None)
        .unwrap();

    let tasks = store.list_tasks(&project);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Mine");
}

#[test]
fn moving_a_task_changes_lane_membership_and_persists() {
    let (store, _remote) = test_store();
    let (project, assignee) = seed_project(&store);
    let id = store
        .create_task(&project, "Design mill", &assignee, None, TaskStatus::Todo, None)
        .unwrap();

    store.set_task_status(&id, TaskStatus::InProgress).unwrap();

    // First refetch sees the move.
    let board = Board::from_tasks(store.list_tasks(&project));
    assert!(board.todo.is_empty());
    assert_eq!(board.in_progress.len(), 1);
    assert_eq!(board.in_progress[0].id, id);

    // And so does a second, independent refetch.
    let board = Board::from_tasks(store.list_tasks(&project));
    assert_eq!(board.in_progress.len(), 1);

    // The patch touched only the status field.
    let task = store.get_task(&id).unwrap();
    assert_eq!(task.title, "Design mill");
    assert_eq!(task.assigned_to, assignee);
}

#[test]
fn move_command_rejects_unknown_task() {
    let (store, _remote) = test_store();

    let result = commands::task::move_status(&store, "-W999999", TaskStatus::Done);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("not found"));
}

#[test]
fn deleted_task_is_gone_from_every_lane() {
    let (store, _remote) = test_store();
    let (project, assignee) = seed_project(&store);
    let keep = store
        .create_task(&project, "Keep", &assignee, None, TaskStatus::Todo, None)
        .unwrap();
    let drop = store
        .create_task(&project, "Drop", &assignee, None, TaskStatus::InProgress, None)
        .unwrap();

    commands::task::remove(&store, &drop, true).unwrap();

    let board = Board::from_tasks(store.list_tasks(&project));
    assert!(!board.contains(&drop));
    assert!(board.contains(&keep));
    assert_eq!(board.len(), 1);
    assert!(store.get_task(&drop).is_none());
}

#[test]
fn task_update_patches_named_fields_only() {
    let (store, _remote) = test_store();
    let (project, assignee) = seed_project(&store);
    let due = "2026-09-15".parse().unwrap();
    let id = store
        .create_task(&project, "Design mill", &assignee, Some(due), TaskStatus::Todo, Some("first pass"))
        .unwrap();

    store
        .update_task(&id, Some("Design the mill"), None, None, None, None)
        .unwrap();

    let task = store.get_task(&id).unwrap();
    assert_eq!(task.title, "Design the mill");
    assert_eq!(task.assigned_to, assignee);
    assert_eq!(task.due_date, Some(due));
    assert_eq!(task.status, TaskStatus::Todo);
    assert_eq!(task.description.as_deref(), Some("first pass"));
}

#[test]
fn malformed_task_records_are_skipped() {
    let (store, remote) = test_store();
    let (project, assignee) = seed_project(&store);
    store
        .create_task(&project, "Good", &assignee, None, TaskStatus::Todo, None)
        .unwrap();
    remote.seed(TASKS, json!({ "garbage": true }));

    let tasks = store.list_tasks(&project);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Good");
}

#[test]
fn blank_due_date_from_other_clients_reads_as_none() {
    // Form-driven clients store "" for an unset due date.
    let (store, remote) = test_store();
    let (project, _assignee) = seed_project(&store);
    remote.seed(
        TASKS,
        json!({
            "project_id": project,
            "title": "Imported",
            "assigned_to": "-W999999",
            "due_date": "",
            "status": "done",
            "created_at": "2026-08-01T10:00:00Z"
        }),
    );

    let tasks = store.list_tasks(&project);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].due_date, None);
    assert_eq!(tasks[0].status, TaskStatus::Done);
}

#[test]
fn read_failure_renders_an_empty_board() {
    let (store, remote) = test_store();
    let (project, assignee) = seed_project(&store);
    store
        .create_task(&project, "Design mill", &assignee, None, TaskStatus::Todo, None)
        .unwrap();

    remote.set_offline(true);
    let board = Board::from_tasks(store.list_tasks(&project));
    assert!(board.is_empty());
}
