//! Shared identifier registry.
//!
//! Successful creation actions publish server-assigned identifiers here, and
//! dependent actions draw uniformly random operands from it. The registry is
//! shared by every virtual user across all scenarios, so reads vastly
//! outnumber writes once the account-creation ramp is underway.

use std::collections::HashSet;
use std::fmt;

use parking_lot::RwLock;
use rand::Rng;
use thiserror::Error;

/// The entity families tracked during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Account,
    PixKey,
    Card,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Account => "account",
            EntityKind::PixKey => "pix key",
            EntityKind::Card => "card",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`IdRegistry::pick_random`] when no identifier of the
/// requested kind has been published yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no {kind} identifiers registered yet")]
pub struct NotReady {
    pub kind: EntityKind,
}

/// Insertion-ordered identifier set with O(1) membership and random draw.
#[derive(Debug, Default)]
struct IdSet {
    ids: Vec<String>,
    seen: HashSet<String>,
}

impl IdSet {
    fn insert(&mut self, id: String) -> bool {
        if self.seen.contains(&id) {
            return false;
        }
        self.seen.insert(id.clone());
        self.ids.push(id);
        true
    }
}

/// Concurrent registry of server-assigned identifiers, one set per
/// [`EntityKind`].
#[derive(Debug, Default)]
pub struct IdRegistry {
    accounts: RwLock<IdSet>,
    pix_keys: RwLock<IdSet>,
    cards: RwLock<IdSet>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self, kind: EntityKind) -> &RwLock<IdSet> {
        match kind {
            EntityKind::Account => &self.accounts,
            EntityKind::PixKey => &self.pix_keys,
            EntityKind::Card => &self.cards,
        }
    }

    /// Publishes an identifier. Duplicate identifiers are ignored; returns
    /// `true` only when the identifier was newly inserted.
    pub fn add(&self, kind: EntityKind, id: impl Into<String>) -> bool {
        let id = id.into();
        let inserted = self.set(kind).write().insert(id.clone());
        if inserted {
            tracing::debug!(kind = kind.as_str(), %id, "registered identifier");
        }
        inserted
    }

    /// Number of distinct identifiers of `kind` published so far.
    pub fn len(&self, kind: EntityKind) -> usize {
        self.set(kind).read().ids.len()
    }

    pub fn is_empty(&self, kind: EntityKind) -> bool {
        self.len(kind) == 0
    }

    pub fn contains(&self, kind: EntityKind, id: &str) -> bool {
        self.set(kind).read().seen.contains(id)
    }

    /// Draws a uniformly random identifier of `kind`.
    ///
    /// Fails with [`NotReady`] until at least one identifier of that kind has
    /// been published, which callers treat as a skip condition rather than an
    /// error.
    pub fn pick_random(&self, kind: EntityKind) -> Result<String, NotReady> {
        let set = self.set(kind).read();
        if set.ids.is_empty() {
            return Err(NotReady { kind });
        }
        let index = rand::thread_rng().gen_range(0..set.ids.len());
        Ok(set.ids[index].clone())
    }
}
