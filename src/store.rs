//! Bookmark storage.
//!
//! [`BookmarkStore`] is the contract the HTTP layer talks to.
//! [`InMemoryStore`] keeps every bookmark in an insertion-ordered `Vec`
//! behind a `RwLock`: reads share the lock, mutations hold it exclusively
//! for the duration of a single call. Data is lost when the store is dropped.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use crate::error::{StoreError, StoreResult};
use crate::model::Bookmark;

pub trait BookmarkStore: Send + Sync {
    /// Append a new bookmark with the next sequential id.
    fn create(&self, title: &str, url: &str) -> StoreResult<Bookmark>;

    /// Snapshot of every bookmark in insertion order.
    fn get_all(&self) -> StoreResult<Vec<Bookmark>>;

    fn get_by_id(&self, id: &str) -> StoreResult<Option<Bookmark>>;

    /// Replace `title` and/or `url`; an empty argument leaves that field as is.
    fn update(&self, id: &str, title: &str, url: &str) -> StoreResult<Option<Bookmark>>;

    /// Returns `false` when no bookmark has this id.
    fn delete(&self, id: &str) -> StoreResult<bool>;
}

#[derive(Debug)]
struct Inner {
    bookmarks: Vec<Bookmark>,
    next_id: u64,
}

#[derive(Debug)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

const SAMPLES: &[(&str, &str)] = &[
    ("Google", "https://google.com"),
    ("GitHub", "https://github.com"),
    ("Go 官方文档", "https://go.dev/doc/"),
];

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                bookmarks: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// A store pre-populated with the sample bookmarks, ids `1..=3`.
    pub fn with_samples() -> Self {
        let now = Utc::now();
        let bookmarks: Vec<Bookmark> = SAMPLES
            .iter()
            .enumerate()
            .map(|(i, (title, url))| Bookmark {
                id: (i + 1).to_string(),
                title: title.to_string(),
                url: url.to_string(),
                created_at: now,
            })
            .collect();
        let next_id = bookmarks.len() as u64 + 1;

        Self {
            inner: RwLock::new(Inner { bookmarks, next_id }),
        }
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.bookmarks.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookmarkStore for InMemoryStore {
    fn create(&self, title: &str, url: &str) -> StoreResult<Bookmark> {
        let mut inner = self.write()?;

        let bookmark = Bookmark {
            id: inner.next_id.to_string(),
            title: title.to_string(),
            url: url.to_string(),
            created_at: Utc::now(),
        };
        inner.next_id += 1;
        inner.bookmarks.push(bookmark.clone());

        Ok(bookmark)
    }

    fn get_all(&self) -> StoreResult<Vec<Bookmark>> {
        Ok(self.read()?.bookmarks.clone())
    }

    fn get_by_id(&self, id: &str) -> StoreResult<Option<Bookmark>> {
        let inner = self.read()?;
        Ok(inner.bookmarks.iter().find(|b| b.id == id).cloned())
    }

    fn update(&self, id: &str, title: &str, url: &str) -> StoreResult<Option<Bookmark>> {
        let mut inner = self.write()?;

        let Some(bookmark) = inner.bookmarks.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        if !title.is_empty() {
            bookmark.title = title.to_string();
        }
        if !url.is_empty() {
            bookmark.url = url.to_string();
        }

        Ok(Some(bookmark.clone()))
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut inner = self.write()?;

        match inner.bookmarks.iter().position(|b| b.id == id) {
            Some(index) => {
                // Vec::remove shifts the tail, keeping the remaining order.
                inner.bookmarks.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
