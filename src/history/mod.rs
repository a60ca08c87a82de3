// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git history mining module.
//!
//! Extracts the commit sequence and normalizes author identities.

mod identity;
mod miner;
mod repo;

#[cfg(test)]
pub(crate) mod testutil;

pub use identity::AuthorIdentity;
pub use miner::{
    mine_history, mine_history_with_budget, CommitRecord, FileStat, HistoryOutcome,
};
pub use repo::Repository;
