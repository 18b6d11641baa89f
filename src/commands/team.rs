use anyhow::{bail, Result};

use crate::commands::{confirm, truncate};
use crate::models::Role;
use crate::store::Store;

pub fn list(store: &Store) -> Result<()> {
    let members = store.list_members();

    if members.is_empty() {
        println!("No team members found.");
        return Ok(());
    }

    for member in members {
        println!(
            "{:<22} {:<24} {:<30} {}",
            member.id,
            truncate(&member.name, 24),
            truncate(&member.email, 30),
            member.role
        );
    }

    Ok(())
}

pub fn add(store: &Store, name: &str, email: &str, role: Role) -> Result<()> {
    if name.trim().is_empty() || email.trim().is_empty() {
        bail!("Name and email are required");
    }

    let id = store.create_member(name, email, role)?;

    // Confirm from a fresh read of the directory, not from local state.
    match store.list_members().into_iter().find(|m| m.id == id) {
        Some(member) => println!("Added {} <{}> as {} ({})", member.name, member.email, member.role, member.id),
        None => println!("Added team member {}", id),
    }

    Ok(())
}

pub fn update(
    store: &Store,
    id: &str,
    name: Option<&str>,
    email: Option<&str>,
    role: Option<Role>,
) -> Result<()> {
    if name.is_none() && email.is_none() && role.is_none() {
        bail!("Nothing to update. Use --name, --email, or --role");
    }

    if store.get_member(id).is_none() {
        bail!("Team member {} not found", id);
    }

    store.update_member(id, name, email, role)?;

    match store.get_member(id) {
        Some(member) => println!("Updated {} <{}> ({})", member.name, member.email, member.role),
        None => println!("Updated team member {}", id),
    }

    Ok(())
}

pub fn remove(store: &Store, id: &str, force: bool) -> Result<()> {
    let member = match store.get_member(id) {
        Some(m) => m,
        None => bail!("Team member {} not found", id),
    };

    if !force && !confirm(&format!("Remove team member \"{}\"?", member.name))? {
        println!("Cancelled.");
        return Ok(());
    }

    store.delete_member(id)?;
    println!("Removed team member {}", id);

    Ok(())
}
