mod common;

use common::test_store;
use serde_json::json;
use workboard::commands;
use workboard::models::Role;
use workboard::store::COMMENTS;
use workboard::views;

#[test]
fn added_comment_appears_in_the_thread() {
    let (store, _remote) = test_store();
    let author = store
        .create_member("Ada Lovelace", "ada@example.com", Role::Developer)
        .unwrap();

    store.add_comment("-T1", &author, "Looks good to me").unwrap();

    let comments = store.list_comments("-T1");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].comment_text, "Looks good to me");
    assert_eq!(
        views::member_name(&store.list_members(), &comments[0].author),
        "Ada Lovelace"
    );
}

#[test]
fn thread_is_scoped_to_one_task() {
    let (store, _remote) = test_store();
    store.add_comment("-T1", "-W1", "on the first task").unwrap();
    store.add_comment("-T2", "-W1", "on the second task").unwrap();

    let comments = store.list_comments("-T1");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].comment_text, "on the first task");
}

#[test]
fn comments_come_back_newest_first_regardless_of_insertion_order() {
    let (store, remote) = test_store();

    // Seed out of chronological order, with explicit timestamps.
    for (text, ts) in [
        ("middle", "2026-08-10T12:00:00Z"),
        ("oldest", "2026-08-01T09:00:00Z"),
        ("newest", "2026-08-20T18:30:00Z"),
    ] {
        remote.seed(
            COMMENTS,
            json!({
                "task_id": "-T1",
                "author": "-W1",
                "comment_text": text,
                "timestamp": ts
            }),
        );
    }

    let comments = store.list_comments("-T1");
    let texts: Vec<&str> = comments.iter().map(|c| c.comment_text.as_str()).collect();
    assert_eq!(texts, vec!["newest", "middle", "oldest"]);
}

#[test]
fn empty_thread_is_an_empty_list() {
    let (store, _remote) = test_store();
    assert!(store.list_comments("-T1").is_empty());
}

#[test]
fn add_command_rejects_blank_text() {
    let (store, _remote) = test_store();

    let result = commands::comment::add(&store, "-T1", "-W1", "   ");
    assert!(result.is_err());
    assert!(store.list_comments("-T1").is_empty());
}

#[test]
fn add_command_trims_text() {
    let (store, _remote) = test_store();

    commands::comment::add(&store, "-T1", "-W1", "  ship it  ").unwrap();

    let comments = store.list_comments("-T1");
    assert_eq!(comments[0].comment_text, "ship it");
}

#[test]
fn read_failure_falls_back_to_empty_thread() {
    let (store, remote) = test_store();
    store.add_comment("-T1", "-W1", "hello").unwrap();

    remote.set_offline(true);
    assert!(store.list_comments("-T1").is_empty());

    remote.set_offline(false);
    assert_eq!(store.list_comments("-T1").len(), 1);
}
