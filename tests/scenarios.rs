//! End-to-end task list behavior through the library API, backed by a real
//! data directory.

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use taskpad::io::persistence::{load_tasks, save_tasks};
use taskpad::io::storage::{FileStorage, MemoryStorage, Storage};
use taskpad::model::filter::Tab;
use taskpad::model::task::{Task, TaskId};
use taskpad::ops::TaskList;

fn texts(list: &TaskList<impl Storage>) -> Vec<String> {
    list.visible().iter().map(|t| t.text.clone()).collect()
}

#[test]
fn tasks_survive_a_restart() {
    let tmp = TempDir::new().unwrap();

    let mut list = TaskList::load(FileStorage::new(tmp.path()), "todos");
    let milk = list.create("buy milk").unwrap().unwrap();
    list.create("write report").unwrap();
    list.toggle_completed(milk).unwrap();
    drop(list);

    let mut list = TaskList::load(FileStorage::new(tmp.path()), "todos");
    assert_eq!(list.tasks().len(), 2);
    assert!(list.get(milk).unwrap().completed);

    list.set_tab(Tab::Pending);
    assert_eq!(texts(&list), vec!["write report"]);
    list.set_tab(Tab::Completed);
    assert_eq!(texts(&list), vec!["buy milk"]);
}

#[test]
fn ids_stay_unique_after_reload() {
    let tmp = TempDir::new().unwrap();
    let mut list = TaskList::load(FileStorage::new(tmp.path()), "todos");
    let a = list.create("a").unwrap().unwrap();
    drop(list);

    let mut list = TaskList::load(FileStorage::new(tmp.path()), "todos");
    let b = list.create("b").unwrap().unwrap();
    assert!(b > a);
}

#[test]
fn separate_keys_are_separate_lists() {
    let tmp = TempDir::new().unwrap();
    let mut home = TaskList::load(FileStorage::new(tmp.path()), "todos");
    let mut work = TaskList::load(FileStorage::new(tmp.path()), "work");
    home.create("water plants").unwrap();
    work.create("ship release").unwrap();

    let home = TaskList::load(FileStorage::new(tmp.path()), "todos");
    assert_eq!(texts(&home), vec!["water plants"]);
}

#[test]
fn non_text_data_is_backed_up_before_the_first_save() {
    let tmp = TempDir::new().unwrap();
    let raw: &[u8] = b"[{\"id\":1,\"text\":\"caf\xe9\",\"completed\":false}]";
    std::fs::write(tmp.path().join("todos.json"), raw).unwrap();

    let mut list = TaskList::load(FileStorage::new(tmp.path()), "todos");
    assert!(list.tasks().is_empty());
    assert!(!list.is_protected());
    list.create("new").unwrap();

    assert_eq!(std::fs::read(tmp.path().join("todos.bak.json")).unwrap(), raw);
    let reloaded = TaskList::load(FileStorage::new(tmp.path()), "todos");
    assert_eq!(texts(&reloaded), vec!["new"]);
}

#[test]
fn save_then_load_preserves_tasks() {
    let mut storage = MemoryStorage::new();
    let tasks = vec![
        Task {
            id: TaskId(1),
            text: "quotes \" and \\ backslashes".into(),
            completed: false,
        },
        Task {
            id: TaskId(2),
            text: "emoji 🎉 and 你好".into(),
            completed: true,
        },
        Task {
            id: TaskId(3),
            text: "line\nbreak".into(),
            completed: false,
        },
    ];
    save_tasks(&mut storage, "todos", &tasks).unwrap();
    assert_eq!(load_tasks(&mut storage, "todos"), tasks);

    save_tasks(&mut storage, "todos", &[]).unwrap();
    assert_eq!(load_tasks(&mut storage, "todos"), Vec::<Task>::new());
}

#[test]
fn counts_stay_consistent_across_operations() {
    let mut list = TaskList::load(MemoryStorage::new(), "todos");
    let mut ids = Vec::new();
    for text in ["a", "b", "c", "d", "  ", "e"] {
        if let Some(id) = list.create(text).unwrap() {
            ids.push(id);
        }
    }
    assert_eq!(ids.len(), 5);

    list.toggle_completed(ids[0]).unwrap();
    list.toggle_completed(ids[2]).unwrap();
    list.toggle_completed(ids[2]).unwrap();
    list.toggle_completed(ids[3]).unwrap();
    list.delete(ids[1]).unwrap();
    list.delete(ids[1]).unwrap();
    list.edit_text(ids[4], "  E  ").unwrap();

    let counts = list.counts();
    assert_eq!(counts.total, 4);
    assert_eq!(counts.completed, 2);
    assert_eq!(counts.pending + counts.completed, counts.total);
    assert_eq!(list.get(ids[4]).unwrap().text, "E");
    assert!(!list.get(ids[2]).unwrap().completed);
}

#[test]
fn search_and_tab_combine() {
    let mut list = TaskList::load(MemoryStorage::new(), "todos");
    let milk = list.create("Buy milk").unwrap().unwrap();
    list.create("Walk dog").unwrap();
    list.create("MILK again").unwrap();
    list.toggle_completed(milk).unwrap();

    list.set_search_term("milk");
    assert_eq!(texts(&list), vec!["Buy milk", "MILK again"]);
    list.set_tab(Tab::Pending);
    assert_eq!(texts(&list), vec!["MILK again"]);
    list.set_search_term("");
    assert_eq!(texts(&list), vec!["Walk dog", "MILK again"]);
}

#[test]
fn edit_session_round_trip() {
    let mut list = TaskList::load(MemoryStorage::new(), "todos");
    let id = list.create("buy milk").unwrap().unwrap();

    // Blank draft is rejected and the session stays open
    assert!(list.begin_edit(id));
    list.update_draft("");
    assert!(!list.commit_edit().unwrap());
    assert_eq!(list.edit_session().editing_id(), Some(id));
    assert_eq!(list.get(id).unwrap().text, "buy milk");

    // Cancel leaves the text alone
    list.cancel_edit();
    assert!(!list.edit_session().is_active());
    assert_eq!(list.get(id).unwrap().text, "buy milk");

    // Commit writes the trimmed draft
    list.begin_edit(id);
    list.update_draft("  buy oat milk ");
    assert!(list.commit_edit().unwrap());
    assert_eq!(list.get(id).unwrap().text, "buy oat milk");

    // Deleting the edited task ends the session
    list.begin_edit(id);
    list.delete(id).unwrap();
    assert_eq!(list.edit_session().editing_id(), None);
}
