use anyhow::{bail, Result};

use crate::store::Store;
use crate::views;

pub fn list(store: &Store, task_id: &str) -> Result<()> {
    let comments = store.list_comments(task_id);
    let members = store.list_members();

    if comments.is_empty() {
        println!("No comments yet.");
        return Ok(());
    }

    for comment in comments {
        println!(
            "[{}] {}",
            comment.timestamp.format("%Y-%m-%d %H:%M"),
            views::member_name(&members, &comment.author)
        );
        for line in comment.comment_text.lines() {
            println!("  {}", line);
        }
    }

    Ok(())
}

pub fn add(store: &Store, task_id: &str, author: &str, text: &str) -> Result<()> {
    let text = text.trim();
    if text.is_empty() {
        bail!("Comment text is required");
    }

    store.add_comment(task_id, author, text)?;

    // Re-render the thread from a fresh fetch, newest first.
    println!("Added comment to task {}\n", task_id);
    list(store, task_id)
}
