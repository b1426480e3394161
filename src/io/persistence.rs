use std::collections::HashSet;

use tracing::{debug, warn};

use crate::io::storage::{Storage, StorageError};
use crate::model::task::{Task, normalize_text};

/// Sibling key that receives a copy of an unreadable value
pub fn backup_key(key: &str) -> String {
    format!("{}.bak", key)
}

/// Load the task list stored under `key`, or an empty list.
///
/// See [`read_tasks`]; a value that could be neither read nor backed up
/// also yields an empty list here.
pub fn load_tasks<S: Storage + ?Sized>(storage: &mut S, key: &str) -> Vec<Task> {
    read_tasks(storage, key).unwrap_or_default()
}

/// Read the task list stored under `key`.
///
/// Missing data yields an empty list. So does a value that is present but
/// unusable (unreadable, not text, malformed JSON), after it has been copied
/// to [`backup_key`]. Fails with [`StorageError::Protected`] when that copy
/// cannot be made; the caller must then leave `key` alone.
pub fn read_tasks<S: Storage + ?Sized>(
    storage: &mut S,
    key: &str,
) -> Result<Vec<Task>, StorageError> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "no stored task list");
            return Ok(Vec::new());
        }
        Err(e) => {
            warn!(key, error = %e, "could not read stored task list");
            back_up(storage, key)?;
            return Ok(Vec::new());
        }
    };

    match serde_json::from_str::<Vec<Task>>(&raw) {
        Ok(tasks) => {
            let tasks = sanitize(tasks);
            debug!(key, count = tasks.len(), "loaded task list");
            Ok(tasks)
        }
        Err(e) => {
            warn!(key, error = %e, "stored task list is corrupt");
            back_up(storage, key)?;
            Ok(Vec::new())
        }
    }
}

fn back_up<S: Storage + ?Sized>(storage: &mut S, key: &str) -> Result<(), StorageError> {
    let bak = backup_key(key);
    match storage.copy(key, &bak) {
        Ok(()) => {
            warn!(key, backup = %bak, "kept a copy of the stored task list, starting empty");
            Ok(())
        }
        Err(e) => {
            warn!(key, backup = %bak, error = %e, "could not back up stored task list");
            Err(StorageError::Protected {
                key: key.to_string(),
            })
        }
    }
}

/// Serialize the whole list and overwrite the value under `key`.
pub fn save_tasks<S: Storage + ?Sized>(
    storage: &mut S,
    key: &str,
    tasks: &[Task],
) -> Result<(), StorageError> {
    let json = encode_tasks(tasks)?;
    storage.set(key, &json)?;
    debug!(key, count = tasks.len(), "saved task list");
    Ok(())
}

/// The persisted representation: a JSON array of `{id, text, completed}`.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, serde_json::Error> {
    serde_json::to_string(tasks)
}

/// Enforce the store invariants on data written by someone else: text is
/// trimmed and non-empty, ids are unique (first occurrence wins).
fn sanitize(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(tasks.len());
    for task in tasks {
        let Some(text) = normalize_text(&task.text) else {
            warn!(id = %task.id, "dropping stored task with blank text");
            continue;
        };
        if !seen.insert(task.id) {
            warn!(id = %task.id, "dropping stored task with duplicate id");
            continue;
        }
        out.push(Task { text, ..task });
    }
    out
}
