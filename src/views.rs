//! Client-side derivation over fetched collections: foreign-key joins,
//! filtering, and the board lane grouping. Everything here is pure; the data
//! always comes from a fresh fetch.

use crate::models::{Comment, Project, ProjectStatus, Task, TaskStatus, TeamMember};

/// Display value for a dangling member reference.
pub const UNKNOWN_MEMBER: &str = "Unknown";

/// Resolve a member id to a display name.
pub fn member_name<'a>(members: &'a [TeamMember], id: &str) -> &'a str {
    members
        .iter()
        .find(|member| member.id == id)
        .map(|member| member.name.as_str())
        .unwrap_or(UNKNOWN_MEMBER)
}

/// Filter projects by status and/or owner. `None` means "all".
pub fn filter_projects<'a>(
    projects: &'a [Project],
    status: Option<ProjectStatus>,
    owner: Option<&str>,
) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|project| {
            let status_match = status.map_or(true, |s| project.status == s);
            let owner_match = owner.map_or(true, |o| project.owner == o);
            status_match && owner_match
        })
        .collect()
}

/// Tasks of one project grouped into the three status lanes.
pub struct Board {
    pub todo: Vec<Task>,
    pub in_progress: Vec<Task>,
    pub done: Vec<Task>,
}

impl Board {
    pub const LANES: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut board = Board {
            todo: Vec::new(),
            in_progress: Vec::new(),
            done: Vec::new(),
        };
        for task in tasks {
            board.lane_mut(task.status).push(task);
        }
        board
    }

    pub fn lane(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    fn lane_mut(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
        }
    }

    pub fn contains(&self, task_id: &str) -> bool {
        Self::LANES
            .iter()
            .any(|&status| self.lane(status).iter().any(|task| task.id == task_id))
    }

    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sort comments by timestamp descending. The sort is stable, so comments
/// sharing a timestamp keep their store order.
pub fn sort_newest_first(comments: &mut [Comment]) {
    comments.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
