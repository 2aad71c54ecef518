use nagging_bot_domain::{Entity, ID};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Useful functions for creating inmemory repositories

/// Rows of one in-memory table together with the id counter of that table.
/// Ids are handed out monotonically and never reused.
#[derive(Debug)]
pub struct Table<T> {
    pub rows: Vec<T>,
    next_id: ID,
}

impl<T> Table<T> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }

    pub fn next_id(&mut self) -> ID {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Makes sure an externally supplied id is never handed out later
    pub fn observe_id(&mut self, id: ID) {
        if id >= self.next_id {
            self.next_id = id + 1;
        }
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A panic while holding the lock leaves the rows consistent because every
/// helper mutates them with a single operation, so poisoning is ignored.
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Inserts a copy of `val` and returns the stored copy with its id assigned.
/// A row already stored under the id of `val` is replaced.
pub fn insert<T: Clone + Entity>(val: &T, collection: &Mutex<Table<T>>) -> T {
    let mut table = lock(collection);
    let mut val = val.clone();
    if val.is_persisted() {
        table.observe_id(val.id());
    } else {
        let id = table.next_id();
        val.set_id(id);
    }
    match table.rows.iter_mut().find(|row| row.id() == val.id()) {
        Some(row) => *row = val.clone(),
        None => table.rows.push(val.clone()),
    }
    val
}

pub fn find<T: Clone + Entity>(val_id: ID, collection: &Mutex<Table<T>>) -> Option<T> {
    let table = lock(collection);
    table.rows.iter().find(|row| row.id() == val_id).cloned()
}

pub fn find_by<T: Clone + Entity, F: FnMut(&T) -> bool>(
    collection: &Mutex<Table<T>>,
    mut compare: F,
) -> Vec<T> {
    let table = lock(collection);
    table.rows.iter().filter(|row| compare(row)).cloned().collect()
}

pub fn find_and_delete_by<T: Clone + Entity, F: Fn(&T) -> bool>(
    collection: &Mutex<Table<T>>,
    compare: F,
) -> Vec<T> {
    let mut table = lock(collection);
    let (deleted, kept): (Vec<T>, Vec<T>) = table.rows.drain(..).partition(|row| compare(row));
    table.rows = kept;
    deleted
}

/// Applies `update` to the row with the given id while holding the lock.
/// Returns whatever `update` returned, or `None` for an unknown id.
pub fn update_one<T: Clone + Entity, R, U: FnOnce(&mut T) -> R>(
    val_id: ID,
    collection: &Mutex<Table<T>>,
    update: U,
) -> Option<R> {
    let mut table = lock(collection);
    table.rows.iter_mut().find(|row| row.id() == val_id).map(update)
}
