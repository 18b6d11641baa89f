use anyhow::{bail, Result};

use crate::commands::{confirm, truncate};
use crate::models::ProjectStatus;
use crate::store::Store;
use crate::views;

pub fn list(store: &Store, status: Option<ProjectStatus>, owner: Option<&str>) -> Result<()> {
    let projects = store.list_projects();
    let members = store.list_members();

    let filtered = views::filter_projects(&projects, status, owner);
    if filtered.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    for project in filtered {
        let status_display = format!("[{}]", project.status);
        println!(
            "{:<22} {:<11} {:<36} {:<20} {}",
            project.id,
            status_display,
            truncate(&project.title, 36),
            views::member_name(&members, &project.owner),
            project.created_at.format("%Y-%m-%d")
        );
    }

    Ok(())
}

pub fn add(
    store: &Store,
    title: &str,
    owner: &str,
    status: ProjectStatus,
    description: Option<&str>,
) -> Result<()> {
    if title.trim().is_empty() || owner.trim().is_empty() {
        bail!("Title and owner are required");
    }

    let id = store.create_project(title, owner, status, description)?;

    match store.get_project(&id) {
        Some(project) => println!("Created project \"{}\" ({})", project.title, project.id),
        None => println!("Created project {}", id),
    }

    Ok(())
}

pub fn update(
    store: &Store,
    id: &str,
    title: Option<&str>,
    owner: Option<&str>,
    status: Option<ProjectStatus>,
    description: Option<&str>,
) -> Result<()> {
    if title.is_none() && owner.is_none() && status.is_none() && description.is_none() {
        bail!("Nothing to update. Use --title, --owner, --status, or --description");
    }

    if store.get_project(id).is_none() {
        bail!("Project {} not found", id);
    }

    store.update_project(id, title, owner, status, description)?;

    match store.get_project(id) {
        Some(project) => println!("Updated project \"{}\" [{}]", project.title, project.status),
        None => println!("Updated project {}", id),
    }

    Ok(())
}

pub fn remove(store: &Store, id: &str, force: bool) -> Result<()> {
    let project = match store.get_project(id) {
        Some(p) => p,
        None => bail!("Project {} not found", id),
    };

    if !force && !confirm(&format!("Delete project \"{}\"?", project.title))? {
        println!("Cancelled.");
        return Ok(());
    }

    store.delete_project(id)?;
    println!("Deleted project {}", id);

    Ok(())
}
