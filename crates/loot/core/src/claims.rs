//! Shared ledger of which agent is pursuing which loot object.
//!
//! One [`ClaimCache`] is created per simulation session and shared (usually
//! behind an `Arc`) by every agent's scan. Entries are sharded by loot id over
//! a fixed set of mutexes: a check-then-claim on one id happens under a
//! single shard lock, so two agents can never both win the same object, while
//! claims on different ids mostly land on different shards.
//!
//! There is no expiry. Callers must `release` when the owning agent finishes,
//! abandons, or is destroyed (`release_all_for` covers the last case).

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::LootConfig;
use crate::error::{ErrorSeverity, LootError};
use crate::state::{AgentId, LootId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClaimError {
    #[error("{loot} is already claimed by {holder}")]
    Conflict { loot: LootId, holder: AgentId },
}

impl LootError for ClaimError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Conflict { .. } => "CLAIM_CONFLICT",
        }
    }
}

type Shard = HashMap<LootId, AgentId>;

#[derive(Debug)]
pub struct ClaimCache {
    shards: Box<[Mutex<Shard>]>,
}

impl ClaimCache {
    pub fn new() -> Self {
        Self::with_shards(LootConfig::CLAIM_SHARDS)
    }

    /// Creates a ledger with `count` lock shards (at least one).
    pub fn with_shards(count: usize) -> Self {
        let shards = (0..count.max(1))
            .map(|_| Mutex::new(Shard::new()))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self { shards }
    }

    fn shard(&self, loot: LootId) -> MutexGuard<'_, Shard> {
        // Fibonacci hashing spreads sequential ids across shards.
        let mixed = loot.0.wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 32;
        let index = (mixed as usize) % self.shards.len();
        // A panic while holding a shard cannot leave a half-written entry.
        self.shards[index]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Claims `loot` for `agent`.
    ///
    /// Re-claiming by the current holder succeeds.
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::Conflict` if another agent holds the claim.
    pub fn claim(&self, loot: LootId, agent: AgentId) -> Result<(), ClaimError> {
        let mut shard = self.shard(loot);
        match shard.get(&loot) {
            Some(&holder) if holder != agent => Err(ClaimError::Conflict { loot, holder }),
            Some(_) => Ok(()),
            None => {
                shard.insert(loot, agent);
                Ok(())
            }
        }
    }

    /// Drops the claim on `loot`. Returns the previous holder, if any.
    pub fn release(&self, loot: LootId) -> Option<AgentId> {
        self.shard(loot).remove(&loot)
    }

    pub fn is_claimed(&self, loot: LootId) -> bool {
        self.shard(loot).contains_key(&loot)
    }

    pub fn claimed_by(&self, loot: LootId) -> Option<AgentId> {
        self.shard(loot).get(&loot).copied()
    }

    /// True when some agent other than `agent` holds `loot`.
    pub fn is_claimed_by_other(&self, loot: LootId, agent: AgentId) -> bool {
        self.claimed_by(loot).is_some_and(|holder| holder != agent)
    }

    /// Releases every claim held by `agent`. Returns how many were dropped.
    pub fn release_all_for(&self, agent: AgentId) -> usize {
        let mut released = 0;
        for shard in self.shards.iter() {
            let mut shard = shard.lock().unwrap_or_else(PoisonError::into_inner);
            let before = shard.len();
            shard.retain(|_, holder| *holder != agent);
            released += before - shard.len();
        }
        released
    }

    pub fn len(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| shard.lock().unwrap_or_else(PoisonError::into_inner).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ClaimCache {
    fn default() -> Self {
        Self::new()
    }
}
