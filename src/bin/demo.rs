//! This is an example of how corkboard can be used.
//! It walks through signup, adding and searching records, and toggling a task's completion.

use std::error::Error;

use chrono::NaiveDate;

use corkboard::{CredentialStore, EventFields, EventStore, FileStorage, TaskFields, TaskStore};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("This example stores its data in a throwaway directory under the system temp dir.");
    println!("You can set the RUST_LOG environment variable to display more info about each operation.");
    println!();

    let dir = std::env::temp_dir().join("corkboard-demo");
    let storage = FileStorage::new(&dir)?;

    let mut identity = CredentialStore::open(storage.clone())?;
    let user = match identity.login("demo@example.com", "demo-password") {
        Ok(user) => user,
        Err(_) => identity.signup("demo@example.com", "demo-password")?,
    };
    println!("Logged in as {} ({})", user.email(), user.id());

    let mut events: EventStore<FileStorage> = EventStore::new(storage.clone());
    let launch = events.add(
        user.id(),
        EventFields {
            name: "Launch party".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 1),
            location: Some("Rooftop".to_string()),
            description: Some("Bring snacks".to_string()),
        },
    )?;
    println!("Added event '{}' on {}", launch.name(), launch.date());

    let mut tasks: TaskStore<FileStorage> = TaskStore::new(storage);
    let milk = tasks.add(
        user.id(),
        TaskFields {
            name: "Buy milk".to_string(),
            ..Default::default()
        },
    )?;
    let milk = tasks.toggle_completion(user.id(), milk.id())?;
    println!("Task '{}' completed: {}", milk.name(), milk.completed());

    println!();
    println!("Everything stored for this user:");
    for event in events.load(user.id())? {
        println!("  event {}\t{}", event.date(), event.name());
    }
    for task in tasks.load(user.id())? {
        let completion = if task.completed() { "✓" } else { " " };
        println!("  task  {} {}", completion, task.name());
    }

    println!();
    println!("Events matching 'snack':");
    for event in events.search(user.id(), "snack")? {
        println!("  {}", event.name());
    }

    identity.logout()?;
    Ok(())
}
