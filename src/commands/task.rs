use anyhow::{bail, Result};
use chrono::NaiveDate;

use crate::commands::{confirm, truncate};
use crate::models::TaskStatus;
use crate::store::Store;
use crate::views::{self, Board};

pub fn board(store: &Store, project_id: &str) -> Result<()> {
    let project = store.get_project(project_id);
    let members = store.list_members();
    let board = Board::from_tasks(store.list_tasks(project_id));

    match &project {
        Some(project) => println!("{}", project.title),
        None => println!("Project {}", project_id),
    }

    for status in Board::LANES {
        let lane = board.lane(status);
        println!("\n{} ({})", status.lane_title(), lane.len());

        if lane.is_empty() {
            println!("  (none)");
            continue;
        }

        for task in lane {
            let mut line = format!(
                "  {:<22} {:<36} {}",
                task.id,
                truncate(&task.title, 36),
                views::member_name(&members, &task.assigned_to)
            );
            if let Some(due) = task.due_date {
                line.push_str(&format!("  due {}", due));
            }
            println!("{}", line);
        }
    }

    Ok(())
}

pub fn add(
    store: &Store,
    project_id: &str,
    title: &str,
    assignee: &str,
    due_date: Option<NaiveDate>,
    status: TaskStatus,
    description: Option<&str>,
) -> Result<()> {
    if title.trim().is_empty() || assignee.trim().is_empty() {
        bail!("Title and assignee are required");
    }

    let id = store.create_task(project_id, title, assignee, due_date, status, description)?;

    match store.get_task(&id) {
        Some(task) => println!("Created task \"{}\" in {} ({})", task.title, task.status.lane_title(), task.id),
        None => println!("Created task {}", id),
    }

    Ok(())
}

pub fn update(
    store: &Store,
    id: &str,
    title: Option<&str>,
    assignee: Option<&str>,
    due_date: Option<NaiveDate>,
    status: Option<TaskStatus>,
    description: Option<&str>,
) -> Result<()> {
    if title.is_none()
        && assignee.is_none()
        && due_date.is_none()
        && status.is_none()
        && description.is_none()
    {
        bail!("Nothing to update. Use --title, --assignee, --due, --status, or --description");
    }

    if store.get_task(id).is_none() {
        bail!("Task {} not found", id);
    }

    store.update_task(id, title, assignee, due_date, status, description)?;

    match store.get_task(id) {
        Some(task) => println!("Updated task \"{}\" [{}]", task.title, task.status),
        None => println!("Updated task {}", id),
    }

    Ok(())
}

pub fn move_status(store: &Store, id: &str, status: TaskStatus) -> Result<()> {
    let task = match store.get_task(id) {
        Some(t) => t,
        None => bail!("Task {} not found", id),
    };

    store.set_task_status(id, status)?;

    // Lane counts come from a refetch of the board, not the local copy.
    let board = Board::from_tasks(store.list_tasks(&task.project_id));
    println!("Moved task {} to {}", id, status.lane_title());
    println!(
        "To Do: {}  In Progress: {}  Done: {}",
        board.todo.len(),
        board.in_progress.len(),
        board.done.len()
    );

    Ok(())
}

pub fn show(store: &Store, id: &str) -> Result<()> {
    let task = match store.get_task(id) {
        Some(t) => t,
        None => bail!("Task {} not found", id),
    };
    let members = store.list_members();

    println!("Task {}: {}", task.id, task.title);
    println!("Status: {}", task.status);
    println!("Assigned to: {}", views::member_name(&members, &task.assigned_to));
    if let Some(due) = task.due_date {
        println!("Due: {}", due);
    }
    println!("Created: {}", task.created_at.format("%Y-%m-%d %H:%M:%S"));

    if let Some(desc) = &task.description {
        if !desc.is_empty() {
            println!("\nDescription:");
            for line in desc.lines() {
                println!("  {}", line);
            }
        }
    }

    let comments = store.list_comments(&task.id);
    if !comments.is_empty() {
        println!("\nComments:");
        for comment in comments {
            println!(
                "  [{}] {}: {}",
                comment.timestamp.format("%Y-%m-%d %H:%M"),
                views::member_name(&members, &comment.author),
                comment.comment_text
            );
        }
    }

    Ok(())
}

pub fn remove(store: &Store, id: &str, force: bool) -> Result<()> {
    let task = match store.get_task(id) {
        Some(t) => t,
        None => bail!("Task {} not found", id),
    };

    if !force && !confirm(&format!("Delete task \"{}\"?", task.title))? {
        println!("Cancelled.");
        return Ok(());
    }

    store.delete_task(id)?;

    let board = Board::from_tasks(store.list_tasks(&task.project_id));
    if board.contains(id) {
        bail!("Task {} still present after delete", id);
    }
    println!("Deleted task {}", id);

    Ok(())
}
