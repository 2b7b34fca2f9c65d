//! End-to-end board behaviour against real and in-memory storage

use std::collections::HashSet;
use taskboard::storage::TASKS_KEY;
use taskboard::{
    FileStorage, KanbanBoard, MemoryStorage, Priority, Status, Storage, StorageError, TaskId,
};

fn approve(_: &str) -> bool {
    true
}

fn create<S: Storage>(board: &mut KanbanBoard<S>, title: &str, status: Status) -> TaskId {
    board.open_modal(None);
    board.form_mut().title = title.to_string();
    board.form_mut().status = status;
    board.save_task().expect("valid task")
}

fn ids<S: Storage>(board: &KanbanBoard<S>) -> Vec<TaskId> {
    board.tasks().iter().map(|t| t.id).collect()
}

/// Counts storage writes so no-op operations can be checked.
#[derive(Default)]
struct CountingStorage {
    inner: MemoryStorage,
    writes: usize,
}

impl Storage for CountingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.writes += 1;
        self.inner.set(key, value)
    }
}

/// Reads nothing and rejects every write.
struct ReadOnlyStorage;

impl Storage for ReadOnlyStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io {
            key: key.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

#[test]
fn seed_create_delete_move_scenario() {
    let mut board = KanbanBoard::new(MemoryStorage::new());
    assert_eq!(ids(&board), vec![1, 2, 3, 4, 5]);

    let id = create(&mut board, "Write tests", Status::Todo);
    assert_eq!(id, 6);

    assert!(board.delete_task(2, &mut approve));
    let remaining: HashSet<TaskId> = ids(&board).into_iter().collect();
    assert_eq!(remaining, HashSet::from([1, 3, 4, 5, 6]));

    let before = board.task_counts();
    assert!(board.move_task(6, Status::Done));
    let after = board.task_counts();
    assert_eq!(after.todo, before.todo - 1);
    assert_eq!(after.done, before.done + 1);
}

#[test]
fn whitespace_title_leaves_everything_unchanged() {
    let mut board = KanbanBoard::new(CountingStorage::default());
    let counts = board.task_counts();

    board.open_modal(None);
    board.form_mut().title = "   ".into();
    assert!(board.save_task().is_err());

    assert!(board.is_modal_open());
    assert_eq!(board.tasks().len(), 5);
    assert_eq!(board.task_counts(), counts);
    assert_eq!(board.storage().writes, 0);
}

#[test]
fn moving_to_current_status_does_not_write() {
    let mut board = KanbanBoard::new(CountingStorage::default());
    assert!(!board.move_task(4, Status::Review));
    assert!(!board.move_task(99, Status::Done));
    assert!(!board.move_task_from_payload("not-an-id", Status::Done));
    assert_eq!(board.storage().writes, 0);

    assert!(board.move_task_from_payload("4", Status::Done));
    assert_eq!(board.storage().writes, 1);
}

#[test]
fn ids_stay_unique_and_stable_across_operations() {
    let mut board = KanbanBoard::new(MemoryStorage::new());
    let statuses = Status::COLUMNS;

    for round in 0..12 {
        let id = create(&mut board, &format!("task {round}"), statuses[round % 4].clone());
        board.move_task(id, statuses[(round + 1) % 4].clone());
        if round % 3 == 0 {
            board.delete_task(id, &mut approve);
        } else if round % 4 == 1 {
            board.open_modal(Some(id));
            board.form_mut().title = format!("edited {round}");
            assert_eq!(board.save_task().unwrap(), id);
        }

        let all = ids(&board);
        let unique: HashSet<TaskId> = all.iter().copied().collect();
        assert_eq!(unique.len(), all.len());
        assert_eq!(board.task_counts().total(), all.len());
    }
}

#[test]
fn file_storage_round_trip_reproduces_collection() {
    let dir = tempfile::tempdir().unwrap();

    let saved = {
        let mut board = KanbanBoard::new(FileStorage::new(dir.path()));
        create(&mut board, "Persist me", Status::Review);
        board.open_modal(Some(1));
        board.form_mut().description.clear();
        board.form_mut().assignee.clear();
        board.save_task().unwrap();
        board.tasks().to_vec()
    };
    assert!(dir.path().join(format!("{TASKS_KEY}.json")).exists());

    let reloaded = KanbanBoard::new(FileStorage::new(dir.path()));
    assert_eq!(reloaded.tasks(), saved.as_slice());
    assert_eq!(reloaded.next_id(), Some(7));
    assert_eq!(reloaded.get_task(1).unwrap().assignee_display(), "Unassigned");
}

#[test]
fn unreadable_file_falls_back_to_seed() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(format!("{TASKS_KEY}.json")), "[{broken").unwrap();

    let board = KanbanBoard::new(FileStorage::new(dir.path()));
    assert_eq!(ids(&board), vec![1, 2, 3, 4, 5]);
}

#[test]
fn unfamiliar_fields_keep_the_saved_board() {
    let mut storage = MemoryStorage::new();
    storage
        .set(
            TASKS_KEY,
            r#"[{"id":9,"title":"mine","priority":"urgent","status":"todo"},
                {"id":12,"title":"theirs","priority":"low","createdAt":"2024-05-01T10:00:00Z"}]"#,
        )
        .unwrap();

    let mut board = KanbanBoard::new(storage);
    assert_eq!(ids(&board), vec![9, 12]);
    assert_eq!(board.next_id(), Some(13));
    assert_eq!(board.get_task(9).unwrap().priority, Priority::Unknown("urgent".into()));
    assert_eq!(board.render().column(&Status::Todo).cards()[0].priority_label, "Urgent");

    assert!(board.move_task(12, Status::Done));
    let stored = board.storage().get(TASKS_KEY).unwrap().unwrap();
    assert!(stored.contains(r#""priority":"urgent""#));
}

#[test]
fn failed_writes_leave_memory_ahead_of_storage() {
    let mut board = KanbanBoard::new(ReadOnlyStorage);

    board.open_modal(None);
    board.form_mut().title = "Unsaved".into();
    assert_eq!(board.save_task().unwrap(), 6);
    assert!(!board.is_modal_open());
    assert_eq!(board.get_task(6).unwrap().title, "Unsaved");

    board.open_modal(Some(6));
    board.form_mut().title = "Still unsaved".into();
    assert_eq!(board.save_task().unwrap(), 6);
    assert!(!board.is_modal_open());
    assert_eq!(board.get_task(6).unwrap().title, "Still unsaved");

    assert!(board.delete_task(1, &mut approve));
    assert!(board.get_task(1).is_none());
    assert_eq!(ids(&board), vec![2, 3, 4, 5, 6]);
}
