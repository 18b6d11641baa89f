use anyhow::Result;
use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::models::{
    Comment, Project, ProjectStatus, Record, Role, Task, TaskStatus, TeamMember,
};
use crate::remote::{HttpStore, RemoteStore};
use crate::views;

pub const TEAM_MEMBERS: &str = "team_members";
pub const PROJECTS: &str = "projects";
pub const TASKS: &str = "tasks";
pub const COMMENTS: &str = "comments";

/// Typed CRUD over the four remote collections.
///
/// Error handling follows the read/write split: read methods swallow
/// transport failures (logged at warn level, empty result), write methods
/// propagate them to the caller. There is no caching; every call is a fresh
/// round trip, and callers re-read after every write instead of patching
/// in-memory state.
pub struct Store {
    remote: Box<dyn RemoteStore>,
}

impl Store {
    pub fn connect(base_url: &str) -> Result<Self> {
        Ok(Store::new(Box::new(HttpStore::new(base_url)?)))
    }

    pub fn new(remote: Box<dyn RemoteStore>) -> Self {
        Store { remote }
    }

    /// Fetch a whole collection and attach the map keys as record ids.
    /// Malformed records are skipped rather than failing the read.
    fn fetch_collection<T>(&self, collection: &str) -> Vec<T>
    where
        T: DeserializeOwned + Record,
    {
        let value = match self.remote.get_all(collection) {
            Ok(Some(value)) => value,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(collection, error = %err, "collection fetch failed");
                return Vec::new();
            }
        };

        let Value::Object(map) = value else {
            warn!(collection, "collection is not a map, ignoring");
            return Vec::new();
        };

        let mut records = Vec::with_capacity(map.len());
        for (id, raw) in map {
            match serde_json::from_value::<T>(raw) {
                Ok(mut record) => {
                    record.set_id(id);
                    records.push(record);
                }
                Err(err) => warn!(collection, id = %id, error = %err, "skipping malformed record"),
            }
        }
        records
    }

    fn fetch_record<T>(&self, collection: &str, id: &str) -> Option<T>
    where
        T: DeserializeOwned + Record,
    {
        let raw = match self.remote.get_one(collection, id) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(collection, id, error = %err, "record fetch failed");
                return None;
            }
        };

        match serde_json::from_value::<T>(raw) {
            Ok(mut record) => {
                record.set_id(id.to_string());
                Some(record)
            }
            Err(err) => {
                warn!(collection, id, error = %err, "malformed record");
                None
            }
        }
    }

    // Team members

    pub fn list_members(&self) -> Vec<TeamMember> {
        self.fetch_collection(TEAM_MEMBERS)
    }

    pub fn get_member(&self, id: &str) -> Option<TeamMember> {
        self.fetch_record(TEAM_MEMBERS, id)
    }

    pub fn create_member(&self, name: &str, email: &str, role: Role) -> Result<String> {
        let body = json!({
            "name": name,
            "email": email,
            "role": role,
        });
        self.remote.create(TEAM_MEMBERS, &body)
    }

    pub fn update_member(
        &self,
        id: &str,
        name: Option<&str>,
        email: Option<&str>,
        role: Option<Role>,
    ) -> Result<()> {
        let mut patch = Map::new();
        if let Some(name) = name {
            patch.insert("name".to_string(), json!(name));
        }
        if let Some(email) = email {
            patch.insert("email".to_string(), json!(email));
        }
        if let Some(role) = role {
            patch.insert("role".to_string(), json!(role));
        }
        self.remote.update(TEAM_MEMBERS, id, &Value::Object(patch))
    }

    pub fn delete_member(&self, id: &str) -> Result<()> {
        self.remote.remove(TEAM_MEMBERS, id)
    }

    // Projects

    pub fn list_projects(&self) -> Vec<Project> {
        self.fetch_collection(PROJECTS)
    }

    pub fn get_project(&self, id: &str) -> Option<Project> {
        self.fetch_record(PROJECTS, id)
    }

    pub fn create_project(
        &self,
        title: &str,
        owner: &str,
        status: ProjectStatus,
        description: Option<&str>,
    ) -> Result<String> {
        let mut body = json!({
            "title": title,
            "owner": owner,
            "status": status,
            "created_at": Utc::now(),
        });
        if let Some(description) = description {
            body["description"] = json!(description);
        }
        self.remote.create(PROJECTS, &body)
    }

    pub fn update_project(
        &self,
        id: &str,
        title: Option<&str>,
        owner: Option<&str>,
        status: Option<ProjectStatus>,
        description: Option<&str>,
    ) -> Result<()> {
        let mut patch = Map::new();
        if let Some(title) = title {
            patch.insert("title".to_string(), json!(title));
        }
        if let Some(owner) = owner {
            patch.insert("owner".to_string(), json!(owner));
        }
        if let Some(status) = status {
            patch.insert("status".to_string(), json!(status));
        }
        if let Some(description) = description {
            patch.insert("description".to_string(), json!(description));
        }
        self.remote.update(PROJECTS, id, &Value::Object(patch))
    }

    pub fn delete_project(&self, id: &str) -> Result<()> {
        self.remote.remove(PROJECTS, id)
    }

    // Tasks

    /// Tasks for one project. The store has no server-side queries, so this
    /// reads the whole collection and filters client-side.
    pub fn list_tasks(&self, project_id: &str) -> Vec<Task> {
        let mut tasks: Vec<Task> = self.fetch_collection(TASKS);
        tasks.retain(|task| task.project_id == project_id);
        tasks
    }

    pub fn get_task(&self, id: &str) -> Option<Task> {
        self.fetch_record(TASKS, id)
    }

    pub fn create_task(
        &self,
        project_id: &str,
        title: &str,
        assigned_to: &str,
        due_date: Option<NaiveDate>,
        status: TaskStatus,
        description: Option<&str>,
    ) -> Result<String> {
        let mut body = json!({
            "project_id": project_id,
            "title": title,
            "assigned_to": assigned_to,
            "status": status,
            "created_at": Utc::now(),
        });
        if let Some(due_date) = due_date {
            body["due_date"] = json!(due_date);
        }
        if let Some(description) = description {
            body["description"] = json!(description);
        }
        self.remote.create(TASKS, &body)
    }

    pub fn update_task(
        &self,
        id: &str,
        title: Option<&str>,
        assigned_to: Option<&str>,
        due_date: Option<NaiveDate>,
        status: Option<TaskStatus>,
        description: Option<&str>,
    ) -> Result<()> {
        let mut patch = Map::new();
        if let Some(title) = title {
            patch.insert("title".to_string(), json!(title));
        }
        if let Some(assigned_to) = assigned_to {
            patch.insert("assigned_to".to_string(), json!(assigned_to));
        }
        if let Some(due_date) = due_date {
            patch.insert("due_date".to_string(), json!(due_date));
        }
        if let Some(status) = status {
            patch.insert("status".to_string(), json!(status));
        }
        if let Some(description) = description {
            patch.insert("description".to_string(), json!(description));
        }
        self.remote.update(TASKS, id, &Value::Object(patch))
    }

    /// Inline status transition: patches only the status field.
    pub fn set_task_status(&self, id: &str, status: TaskStatus) -> Result<()> {
        self.remote.update(TASKS, id, &json!({ "status": status }))
    }

    pub fn delete_task(&self, id: &str) -> Result<()> {
        self.remote.remove(TASKS, id)
    }

    // Comments

    /// Comments for one task, newest first.
    pub fn list_comments(&self, task_id: &str) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self.fetch_collection(COMMENTS);
        comments.retain(|comment| comment.task_id == task_id);
        views::sort_newest_first(&mut comments);
        comments
    }

    /// Comments are append-only; there is no update or delete.
    pub fn add_comment(&self, task_id: &str, author: &str, text: &str) -> Result<String> {
        let body = json!({
            "task_id": task_id,
            "author": author,
            "comment_text": text,
            "timestamp": Utc::now(),
        });
        self.remote.create(COMMENTS, &body)
    }
}
