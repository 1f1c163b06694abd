//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose task list actions and snapshots to Dart via FRB.
//! - Own the single process-wide view session.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - IDs and enums cross the boundary as stable lowercase strings.
//! - Unknown task IDs are reported, never raised.

use log::warn;
use once_cell::sync::Lazy;
use std::sync::{Mutex, PoisonError};
use tasklist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Composer, Priority, TaskId, TaskListSession, TaskListStore, TaskPatch, TaskRow, Theme,
};
use uuid::Uuid;

const THEME_ENV_VAR: &str = "TASKLIST_THEME";

static SESSION: Lazy<Mutex<TaskListSession>> = Lazy::new(|| {
    Mutex::new(TaskListSession::with_store(
        TaskListStore::new(),
        resolve_initial_theme(),
    ))
});

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One rendered task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRowDto {
    /// Stable task ID in string form.
    pub id: String,
    pub text: String,
    pub completed: bool,
    /// `low|medium|high`.
    pub priority: String,
    /// `Low|Medium|High`.
    pub priority_label: String,
    pub editing: bool,
    /// Draft text while `editing`.
    pub draft_text: Option<String>,
    /// Draft priority (`low|medium|high`) while `editing`.
    pub draft_priority: Option<String>,
}

/// Result envelope for task mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the action changed task or draft state.
    pub ok: bool,
    /// Affected task ID, when one was resolved.
    pub task_id: Option<String>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, task_id: TaskId) -> Self {
        Self {
            ok: true,
            task_id: Some(task_id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }

    fn from_applied(applied: bool, message: &str, task_id: TaskId) -> Self {
        if applied {
            Self::success(message, task_id)
        } else {
            Self::failure(format!("task not found: {task_id}"))
        }
    }
}

/// Adds a task from the new-task form.
///
/// # FFI contract
/// - Blank `text` is declined with `ok=false`; the list is unchanged.
/// - `priority` must be `low|medium|high`.
/// - The form draft stays on the Dart side; see `can_add` for the submit state.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(text: String, priority: String) -> TaskActionResponse {
    let priority = match parse_priority(&priority) {
        Ok(priority) => priority,
        Err(message) => return TaskActionResponse::failure(message),
    };
    with_session(|session| {
        let store = session.store_mut();
        let before = store.len();
        let items = store.add(&text, priority);
        if items.len() > before {
            TaskActionResponse::success("Task added.", items[items.len() - 1].id)
        } else {
            TaskActionResponse::failure("task_add declined: text is blank")
        }
    })
}

/// Whether the Add affordance should be enabled for `text`.
#[flutter_rust_bridge::frb(sync)]
pub fn can_add(text: String) -> bool {
    let composer = Composer {
        text,
        priority: Priority::default(),
    };
    composer.can_submit()
}

/// Flips completion of one task.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(id: String) -> TaskActionResponse {
    with_task(&id, |session, id| {
        TaskActionResponse::from_applied(session.toggle(id), "Task toggled.", id)
    })
}

/// Applies an edit to one task and closes its open draft.
///
/// # FFI contract
/// - `text`, when present, is trimmed and must not be blank.
/// - Absent fields are left unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn task_update(id: String, text: Option<String>, priority: Option<String>) -> TaskActionResponse {
    let text = match text.map(|value| value.trim().to_string()) {
        Some(value) if value.is_empty() => {
            return TaskActionResponse::failure("task_update declined: text is blank");
        }
        other => other,
    };
    let priority = match priority.as_deref().map(parse_priority).transpose() {
        Ok(priority) => priority,
        Err(message) => return TaskActionResponse::failure(message),
    };

    with_task(&id, |session, id| {
        let applied = session.update(id, TaskPatch { text, priority });
        TaskActionResponse::from_applied(applied, "Task updated.", id)
    })
}

/// Removes one task and any open draft for it.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(id: String) -> TaskActionResponse {
    with_task(&id, |session, id| {
        TaskActionResponse::from_applied(session.delete(id), "Task deleted.", id)
    })
}

/// Opens edit mode for one task, seeding the draft from stored values.
#[flutter_rust_bridge::frb(sync)]
pub fn task_edit_begin(id: String) -> TaskActionResponse {
    with_task(&id, |session, id| {
        TaskActionResponse::from_applied(session.begin_edit(id), "Edit started.", id)
    })
}

/// Replaces the draft text of an open edit. Stored task is untouched.
#[flutter_rust_bridge::frb(sync)]
pub fn task_edit_set_text(id: String, text: String) -> TaskActionResponse {
    with_task(&id, |session, id| {
        if session.set_draft_text(id, text) {
            TaskActionResponse::success("Draft updated.", id)
        } else {
            TaskActionResponse::failure(format!("no open edit for task: {id}"))
        }
    })
}

/// Replaces the draft priority of an open edit. Stored task is untouched.
#[flutter_rust_bridge::frb(sync)]
pub fn task_edit_set_priority(id: String, priority: String) -> TaskActionResponse {
    let priority = match parse_priority(&priority) {
        Ok(priority) => priority,
        Err(message) => return TaskActionResponse::failure(message),
    };
    with_task(&id, |session, id| {
        if session.set_draft_priority(id, priority) {
            TaskActionResponse::success("Draft updated.", id)
        } else {
            TaskActionResponse::failure(format!("no open edit for task: {id}"))
        }
    })
}

/// Commits an open draft (Enter / Save).
///
/// # FFI contract
/// - A blank draft is declined with `ok=false` and stays open.
#[flutter_rust_bridge::frb(sync)]
pub fn task_edit_save(id: String) -> TaskActionResponse {
    with_task(&id, |session, id| {
        if !session.is_editing(id) {
            return TaskActionResponse::failure(format!("no open edit for task: {id}"));
        }
        if session.save_edit(id) {
            TaskActionResponse::success("Task updated.", id)
        } else {
            TaskActionResponse::failure("task_edit_save declined: text is blank")
        }
    })
}

/// Discards an open draft (Escape / Cancel).
#[flutter_rust_bridge::frb(sync)]
pub fn task_edit_cancel(id: String) -> TaskActionResponse {
    with_task(&id, |session, id| {
        if session.cancel_edit(id) {
            TaskActionResponse::success("Edit cancelled.", id)
        } else {
            TaskActionResponse::failure(format!("no open edit for task: {id}"))
        }
    })
}

/// Returns all tasks in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn task_list() -> Vec<TaskRowDto> {
    with_session(|session| session.view().rows.into_iter().map(to_row_dto).collect())
}

/// Returns the active theme (`dark|light`).
#[flutter_rust_bridge::frb(sync)]
pub fn theme_get() -> String {
    with_session(|session| session.theme().as_str().to_string())
}

/// Switches theme and returns the new value (`dark|light`).
#[flutter_rust_bridge::frb(sync)]
pub fn theme_toggle() -> String {
    with_session(|session| session.toggle_theme().as_str().to_string())
}

fn with_session<T>(f: impl FnOnce(&mut TaskListSession) -> T) -> T {
    // Store operations are total, so a poisoned guard still holds valid state.
    let mut guard = SESSION.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

fn with_task(
    id: &str,
    f: impl FnOnce(&mut TaskListSession, TaskId) -> TaskActionResponse,
) -> TaskActionResponse {
    match parse_task_id(id) {
        Ok(id) => with_session(|session| f(session, id)),
        Err(message) => TaskActionResponse::failure(message),
    }
}

fn resolve_initial_theme() -> Theme {
    parse_initial_theme(std::env::var(THEME_ENV_VAR).ok().as_deref())
}

fn parse_initial_theme(raw: Option<&str>) -> Theme {
    let Some(raw) = raw else {
        return Theme::default();
    };
    Theme::parse(raw).unwrap_or_else(|| {
        warn!("event=config_theme module=ffi status=invalid value_len={}", raw.len());
        Theme::default()
    })
}

fn parse_task_id(value: &str) -> Result<TaskId, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid task id `{}`", value.trim()))
}

fn parse_priority(value: &str) -> Result<Priority, String> {
    Priority::parse(value)
        .ok_or_else(|| format!("unsupported priority `{}`; expected low|medium|high", value.trim()))
}

fn to_row_dto(row: TaskRow) -> TaskRowDto {
    TaskRowDto {
        id: row.id.to_string(),
        text: row.text,
        completed: row.completed,
        priority: row.priority.as_str().to_string(),
        priority_label: row.priority_label.to_string(),
        editing: row.draft.is_some(),
        draft_text: row.draft.as_ref().map(|draft| draft.text.clone()),
        draft_priority: row.draft.map(|draft| draft.priority.as_str().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        can_add, core_version, init_logging, parse_initial_theme, ping, task_add, task_delete,
        task_edit_begin, task_edit_cancel, task_edit_save, task_edit_set_priority,
        task_edit_set_text, task_list, task_toggle, task_update, theme_get, theme_toggle,
    };
    use tasklist_core::Theme;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/tasklist-logs".to_string());
        assert!(error.contains("unsupported log level"));
    }

    #[test]
    fn init_logging_rejects_relative_dir() {
        let error = init_logging("info".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn task_add_then_list_contains_row() {
        let token = unique_token("add");
        let response = task_add(format!("  {token}  "), "HIGH".to_string());
        assert!(response.ok, "{}", response.message);
        let id = response.task_id.expect("add should return task_id");

        let row = find_row(&id).expect("added row should be listed");
        assert_eq!(row.text, token);
        assert_eq!(row.priority, "high");
        assert_eq!(row.priority_label, "High");
        assert!(!row.completed);
        assert!(!row.editing);
    }

    #[test]
    fn task_add_rejects_blank_text_and_bad_priority() {
        let blank = task_add("   ".to_string(), "low".to_string());
        assert!(!blank.ok);
        assert!(blank.task_id.is_none());

        let bad = task_add("valid".to_string(), "urgent".to_string());
        assert!(!bad.ok);
        assert!(bad.message.contains("unsupported priority"));
    }

    #[test]
    fn toggle_update_delete_roundtrip() {
        let id = task_add(unique_token("flow"), "low".to_string())
            .task_id
            .expect("add should return task_id");

        assert!(task_toggle(id.clone()).ok);
        assert!(find_row(&id).unwrap().completed);

        let updated = task_update(id.clone(), Some(" renamed ".to_string()), Some("medium".to_string()));
        assert!(updated.ok, "{}", updated.message);
        let row = find_row(&id).unwrap();
        assert_eq!(row.text, "renamed");
        assert_eq!(row.priority, "medium");
        assert!(row.completed);

        assert!(task_delete(id.clone()).ok);
        assert!(find_row(&id).is_none());
        assert!(!task_delete(id.clone()).ok);
        assert!(!task_toggle(id).ok);
    }

    #[test]
    fn task_update_rejects_blank_text() {
        let id = task_add(unique_token("blank-edit"), "low".to_string())
            .task_id
            .expect("add should return task_id");

        let response = task_update(id.clone(), Some("  ".to_string()), None);
        assert!(!response.ok);
        assert!(find_row(&id).unwrap().text.starts_with("blank-edit"));
    }

    #[test]
    fn malformed_ids_are_reported() {
        let response = task_toggle("not-a-uuid".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid task id"));
    }

    #[test]
    fn theme_toggle_flips_and_flips_back() {
        let start = theme_get();
        let flipped = theme_toggle();
        assert_ne!(flipped, start);
        assert!(flipped == "dark" || flipped == "light");
        assert_eq!(theme_toggle(), start);
    }

    #[test]
    fn can_add_tracks_trimmed_text() {
        assert!(can_add(" milk ".to_string()));
        assert!(!can_add(" \t ".to_string()));
    }

    #[test]
    fn edit_flow_saves_trimmed_draft() {
        let id = task_add(unique_token("edit-save"), "low".to_string())
            .task_id
            .expect("add should return task_id");

        assert!(task_edit_begin(id.clone()).ok);
        let row = find_row(&id).unwrap();
        assert!(row.editing);
        assert_eq!(row.draft_text.as_deref(), Some(row.text.as_str()));
        assert_eq!(row.draft_priority.as_deref(), Some("low"));

        assert!(task_edit_set_text(id.clone(), "  saved text ".to_string()).ok);
        assert!(task_edit_set_priority(id.clone(), "high".to_string()).ok);
        assert!(task_edit_save(id.clone()).ok);

        let row = find_row(&id).unwrap();
        assert!(!row.editing);
        assert_eq!(row.draft_text, None);
        assert_eq!(row.text, "saved text");
        assert_eq!(row.priority, "high");
    }

    #[test]
    fn edit_save_with_blank_draft_keeps_editing() {
        let token = unique_token("edit-blank");
        let id = task_add(token.clone(), "medium".to_string())
            .task_id
            .expect("add should return task_id");

        task_edit_begin(id.clone());
        task_edit_set_text(id.clone(), "   ".to_string());
        let response = task_edit_save(id.clone());
        assert!(!response.ok);

        let row = find_row(&id).unwrap();
        assert!(row.editing);
        assert_eq!(row.text, token);
    }

    #[test]
    fn edit_cancel_leaves_row_unchanged() {
        let id = task_add(unique_token("edit-cancel"), "medium".to_string())
            .task_id
            .expect("add should return task_id");
        let before = find_row(&id).unwrap();

        task_edit_begin(id.clone());
        task_edit_set_text(id.clone(), "discarded".to_string());
        task_edit_set_priority(id.clone(), "high".to_string());
        assert!(task_edit_cancel(id.clone()).ok);

        assert_eq!(find_row(&id).unwrap(), before);
        assert!(!task_edit_cancel(id.clone()).ok);
        assert!(!task_edit_save(id).ok);
    }

    #[test]
    fn task_update_closes_open_edit() {
        let id = task_add(unique_token("update-edit"), "low".to_string())
            .task_id
            .expect("add should return task_id");
        task_edit_begin(id.clone());

        assert!(task_update(id.clone(), None, Some("high".to_string())).ok);
        let row = find_row(&id).unwrap();
        assert!(!row.editing);
        assert_eq!(row.priority, "high");
    }

    #[test]
    fn edit_calls_on_unknown_task_are_reported() {
        let missing = uuid::Uuid::new_v4().to_string();
        assert!(!task_edit_begin(missing.clone()).ok);
        assert!(!task_edit_set_text(missing.clone(), "x".to_string()).ok);
        assert!(!task_edit_set_priority(missing, "low".to_string()).ok);
    }

    #[test]
    fn initial_theme_reads_setting_with_dark_fallback() {
        assert_eq!(parse_initial_theme(Some("light")), Theme::Light);
        assert_eq!(parse_initial_theme(Some(" DARK ")), Theme::Dark);
        assert_eq!(parse_initial_theme(Some("sepia")), Theme::Dark);
        assert_eq!(parse_initial_theme(None), Theme::Dark);
    }

    fn find_row(id: &str) -> Option<super::TaskRowDto> {
        task_list().into_iter().find(|row| row.id == id)
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
