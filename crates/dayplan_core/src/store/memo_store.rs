//! Memo state store.
//!
//! # Invariants
//! - Cached memos stay sorted by `(updated_at DESC, id)` like the
//!   repository list order.
//! - Titles are first-class; a blank title is a validation error.

use crate::feed::{ChangeEvent, ChangeFeed, ChangeKind, Subscription, Table};
use crate::model::memo::Memo;
use crate::repo::memo_repo::MemoRepository;
use crate::repo::{RepoError, RepoResult};
use log::debug;
use uuid::Uuid;

/// State store for one owner's memos.
pub struct MemoStore {
    owner_id: Uuid,
    feed: ChangeFeed,
    subscription: Subscription,
    memos: Vec<Memo>,
}

impl MemoStore {
    pub fn new(owner_id: Uuid, feed: &ChangeFeed) -> Self {
        Self {
            owner_id,
            feed: feed.clone(),
            subscription: feed.subscribe(),
            memos: Vec::new(),
        }
    }

    pub fn memos(&self) -> &[Memo] {
        &self.memos
    }

    /// Most recently updated memos, newest first.
    pub fn recent(&self, count: usize) -> &[Memo] {
        &self.memos[..count.min(self.memos.len())]
    }

    pub fn refresh(&mut self, repo: &impl MemoRepository) -> RepoResult<()> {
        self.memos = repo.list_memos(self.owner_id)?;
        debug!(
            "event=store_refresh module=store table=memos owner_id={} rows={}",
            self.owner_id,
            self.memos.len()
        );
        Ok(())
    }

    pub fn add_memo(
        &mut self,
        repo: &impl MemoRepository,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> RepoResult<Memo> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(RepoError::Validation(
                "memo title must not be empty".to_string(),
            ));
        }

        let memo = Memo::new(self.owner_id, title, content);
        let id = repo.create_memo(&memo)?;
        let stored = repo.get_memo(self.owner_id, id)?.ok_or(RepoError::InvalidData(
            "created memo not found in read-back".to_string(),
        ))?;

        self.upsert(stored.clone());
        self.publish(ChangeKind::Insert, id);
        Ok(stored)
    }

    pub fn update_memo(
        &mut self,
        repo: &impl MemoRepository,
        id: Uuid,
        title: &str,
        content: &str,
    ) -> RepoResult<Memo> {
        if title.trim().is_empty() {
            return Err(RepoError::Validation(
                "memo title must not be empty".to_string(),
            ));
        }

        repo.update_memo(self.owner_id, id, title, content)?;
        let stored = repo.get_memo(self.owner_id, id)?.ok_or(RepoError::InvalidData(
            "updated memo not found in read-back".to_string(),
        ))?;

        self.upsert(stored.clone());
        self.publish(ChangeKind::Update, id);
        Ok(stored)
    }

    pub fn remove_memo(&mut self, repo: &impl MemoRepository, id: Uuid) -> RepoResult<()> {
        repo.delete_memo(self.owner_id, id)?;
        self.memos.retain(|m| m.id != id);
        self.publish(ChangeKind::Delete, id);
        Ok(())
    }

    /// Merges buffered memo events; skips foreign owners and tables.
    pub fn sync(&mut self, repo: &impl MemoRepository) -> RepoResult<usize> {
        let mut applied = 0;
        for event in self.subscription.drain() {
            if event.owner_id != self.owner_id || event.table != Table::Memos {
                continue;
            }
            match event.kind {
                ChangeKind::Insert | ChangeKind::Update => {
                    match repo.get_memo(self.owner_id, event.row_id)? {
                        Some(memo) => self.upsert(memo),
                        None => self.memos.retain(|m| m.id != event.row_id),
                    }
                }
                ChangeKind::Delete => self.memos.retain(|m| m.id != event.row_id),
            }
            applied += 1;
        }
        Ok(applied)
    }

    fn upsert(&mut self, memo: Memo) {
        match self.memos.iter_mut().find(|m| m.id == memo.id) {
            Some(cached) => *cached = memo,
            None => self.memos.push(memo),
        }
        self.memos
            .sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(a.id.cmp(&b.id)));
    }

    fn publish(&self, kind: ChangeKind, row_id: Uuid) {
        self.feed.publish(ChangeEvent {
            table: Table::Memos,
            kind,
            row_id,
            owner_id: self.owner_id,
        });
    }
}
