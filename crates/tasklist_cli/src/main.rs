//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `tasklist_core` linkage without the Flutter runtime.
//! - Walk one add/toggle/delete pass and print deterministic output.

use tasklist_core::{Priority, TaskItem, TaskListStore};

fn main() {
    println!("tasklist_core ping={}", tasklist_core::ping());
    println!("tasklist_core version={}", tasklist_core::core_version());

    let mut store = TaskListStore::new();
    store.subscribe(|items| println!("  snapshot: {}", render(items)));

    store.add("Task A", Priority::Low);
    store.add("Task B", Priority::High);
    let ids: Vec<_> = store.items().iter().map(|item| item.id).collect();
    if let [a, b] = ids[..] {
        store.toggle(a);
        store.delete(b);
    }
    println!("tasklist_core smoke tasks={}", store.len());
}

fn render(items: &[TaskItem]) -> String {
    let rows: Vec<String> = items
        .iter()
        .map(|item| {
            let mark = if item.completed { "x" } else { " " };
            format!("[{mark}] {} ({})", item.text, item.priority)
        })
        .collect();
    format!("[{}]", rows.join(", "))
}
