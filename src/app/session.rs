//! Voting session - the referenda still waiting for a decision and the votes
//! cast so far

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::models::{ReferendumIndex, ReferendumOngoing, Vote, VoteType};

/// Which screen the session is on. Always derived, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Voting,
    Summary,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VoteError {
    #[error("referendum #{0} is not waiting for a vote")]
    NotPending(ReferendumIndex),
    #[error("no referendum left to vote on")]
    NothingPending,
}

#[derive(Debug, Clone, Default)]
pub struct VotingSession {
    /// Pending referenda in chain iteration order, indices unique
    pending: Vec<(ReferendumIndex, ReferendumOngoing)>,
    votes: Vec<Vote>,
}

impl VotingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pending referenda with a fresh load.
    ///
    /// Order is kept; a repeated index keeps its first position and its last
    /// value. Votes already cast are kept.
    pub fn replace_pending<I>(&mut self, referenda: I)
    where
        I: IntoIterator<Item = (ReferendumIndex, ReferendumOngoing)>,
    {
        let mut pending: Vec<(ReferendumIndex, ReferendumOngoing)> = Vec::new();
        let mut positions: HashMap<ReferendumIndex, usize> = HashMap::new();
        for (index, referendum) in referenda {
            match positions.entry(index) {
                Entry::Occupied(slot) => pending[*slot.get()].1 = referendum,
                Entry::Vacant(slot) => {
                    slot.insert(pending.len());
                    pending.push((index, referendum));
                }
            }
        }
        self.pending = pending;
    }

    pub fn pending(&self) -> &[(ReferendumIndex, ReferendumOngoing)] {
        &self.pending
    }

    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, index: ReferendumIndex) -> bool {
        self.pending.iter().any(|(i, _)| *i == index)
    }

    /// The referendum on top of the stack: last in iteration order
    pub fn topmost(&self) -> Option<(ReferendumIndex, &ReferendumOngoing)> {
        self.pending.last().map(|(index, referendum)| (*index, referendum))
    }

    /// Record a decision and drop the referendum from the pending set
    pub fn vote_on(&mut self, index: ReferendumIndex, vote: VoteType) -> Result<(), VoteError> {
        let position = self
            .pending
            .iter()
            .position(|(i, _)| *i == index)
            .ok_or(VoteError::NotPending(index))?;

        self.pending.remove(position);
        self.votes.push(Vote { index, vote });
        Ok(())
    }

    /// Vote on whatever is currently on top
    pub fn vote_topmost(&mut self, vote: VoteType) -> Result<ReferendumIndex, VoteError> {
        let (index, _) = self.topmost().ok_or(VoteError::NothingPending)?;
        self.vote_on(index, vote)?;
        Ok(index)
    }

    pub fn phase(&self) -> SessionPhase {
        if self.pending.is_empty() && !self.votes.is_empty() {
            SessionPhase::Summary
        } else {
            SessionPhase::Voting
        }
    }

    pub fn count(&self, vote: VoteType) -> usize {
        self.votes.iter().filter(|v| v.vote == vote).count()
    }
}
