//! Glossary bookmark state store.
//!
//! # Invariants
//! - Adding an already-bookmarked term surfaces `Conflict` and leaves
//!   storage untouched; the pre-check lives in the repository.
//! - Cached bookmarks stay sorted by `(created_at DESC, id)`.

use crate::feed::{ChangeEvent, ChangeFeed, ChangeKind, Subscription, Table};
use crate::model::bookmark::Bookmark;
use crate::repo::bookmark_repo::BookmarkRepository;
use crate::repo::{RepoError, RepoResult};
use uuid::Uuid;

/// State store for one owner's glossary bookmarks.
pub struct BookmarkStore {
    owner_id: Uuid,
    feed: ChangeFeed,
    subscription: Subscription,
    bookmarks: Vec<Bookmark>,
}

impl BookmarkStore {
    pub fn new(owner_id: Uuid, feed: &ChangeFeed) -> Self {
        Self {
            owner_id,
            feed: feed.clone(),
            subscription: feed.subscribe(),
            bookmarks: Vec::new(),
        }
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn is_bookmarked(&self, term: &str) -> bool {
        self.bookmarks.iter().any(|b| b.term == term)
    }

    pub fn refresh(&mut self, repo: &impl BookmarkRepository) -> RepoResult<()> {
        self.bookmarks = repo.list_bookmarks(self.owner_id)?;
        Ok(())
    }

    /// Bookmarks a glossary term once per owner.
    ///
    /// # Errors
    /// - `Conflict` when the term is already bookmarked.
    pub fn add_bookmark(
        &mut self,
        repo: &impl BookmarkRepository,
        term: impl Into<String>,
    ) -> RepoResult<Bookmark> {
        let bookmark = Bookmark::new(self.owner_id, term);
        let id = repo.create_bookmark(&bookmark)?;
        let stored = repo
            .get_bookmark(self.owner_id, id)?
            .ok_or(RepoError::InvalidData(
                "created bookmark not found in read-back".to_string(),
            ))?;

        self.upsert(stored.clone());
        self.publish(ChangeKind::Insert, id);
        Ok(stored)
    }

    pub fn remove_bookmark(&mut self, repo: &impl BookmarkRepository, id: Uuid) -> RepoResult<()> {
        repo.delete_bookmark(self.owner_id, id)?;
        self.bookmarks.retain(|b| b.id != id);
        self.publish(ChangeKind::Delete, id);
        Ok(())
    }

    /// Merges buffered bookmark events; skips foreign owners and tables.
    pub fn sync(&mut self, repo: &impl BookmarkRepository) -> RepoResult<usize> {
        let mut applied = 0;
        for event in self.subscription.drain() {
            if event.owner_id != self.owner_id || event.table != Table::Bookmarks {
                continue;
            }
            match event.kind {
                ChangeKind::Insert | ChangeKind::Update => {
                    match repo.get_bookmark(self.owner_id, event.row_id)? {
                        Some(bookmark) => self.upsert(bookmark),
                        None => self.bookmarks.retain(|b| b.id != event.row_id),
                    }
                }
                ChangeKind::Delete => self.bookmarks.retain(|b| b.id != event.row_id),
            }
            applied += 1;
        }
        Ok(applied)
    }

    fn upsert(&mut self, bookmark: Bookmark) {
        match self.bookmarks.iter_mut().find(|b| b.id == bookmark.id) {
            Some(cached) => *cached = bookmark,
            None => self.bookmarks.push(bookmark),
        }
        self.bookmarks
            .sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
    }

    fn publish(&self, kind: ChangeKind, row_id: Uuid) {
        self.feed.publish(ChangeEvent {
            table: Table::Bookmarks,
            kind,
            row_id,
            owner_id: self.owner_id,
        });
    }
}
