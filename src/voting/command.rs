//! Cast-one-vote command
//!
//! A [`VoteCastOperation`] binds one voter claim and one candidate to the
//! shared ballot, gate and registry. It carries its own id and creation time
//! so it can be logged and correlated, and `execute` consumes it so the same
//! operation can never be applied twice.

use crate::Result;
use crate::types::{Candidate, Voter};
use crate::voting::authentication::{AuthOutcome, Authenticator};
use crate::voting::ballot::Ballot;
use crate::voting::registry::VoterRegistry;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// What happened to a cast
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastOutcome {
    /// Vote counted
    Recorded {
        operation_id: Uuid,
        candidate: String,
        cast_at: DateTime<Utc>,
    },

    /// Authentication refused the claim; nothing was mutated
    Rejected {
        operation_id: Uuid,
        reason: AuthOutcome,
    },

    /// Candidate handle is not registered with this election; the voter was
    /// not authenticated and keeps their vote
    UnknownCandidate {
        operation_id: Uuid,
        candidate: String,
    },
}

impl CastOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, CastOutcome::Recorded { .. })
    }

    pub fn operation_id(&self) -> Uuid {
        match self {
            CastOutcome::Recorded { operation_id, .. }
            | CastOutcome::Rejected { operation_id, .. }
            | CastOutcome::UnknownCandidate { operation_id, .. } => *operation_id,
        }
    }
}

/// Single-use unit of work: authenticate, then record
pub struct VoteCastOperation<'a> {
    id: Uuid,
    created_at: DateTime<Utc>,
    voter: &'a Voter,
    candidate: &'a Candidate,
    ballot: &'a Ballot,
    authenticator: &'a dyn Authenticator,
    registry: &'a VoterRegistry,
}

impl<'a> VoteCastOperation<'a> {
    pub fn new(
        voter: &'a Voter,
        candidate: &'a Candidate,
        ballot: &'a Ballot,
        authenticator: &'a dyn Authenticator,
        registry: &'a VoterRegistry,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            voter,
            candidate,
            ballot,
            authenticator,
            registry,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Run the cast
    ///
    /// A rejected claim is an `Ok(CastOutcome::Rejected)`; `Err` is reserved
    /// for storage faults.
    pub fn execute(self) -> Result<CastOutcome> {
        let outcome = self.authenticator.verify(self.voter, self.registry)?;

        if !outcome.is_authenticated() {
            tracing::warn!(
                operation = %self.id,
                voter = self.voter.name(),
                reason = outcome.reason(),
                "🚫 Authentication failed or voter has already voted"
            );
            return Ok(CastOutcome::Rejected {
                operation_id: self.id,
                reason: outcome,
            });
        }

        let count = self.ballot.add_vote(self.candidate)?;

        tracing::info!(
            operation = %self.id,
            candidate = self.candidate.name(),
            count,
            "🗳️ Vote recorded"
        );

        Ok(CastOutcome::Recorded {
            operation_id: self.id,
            candidate: self.candidate.name().to_string(),
            cast_at: Utc::now(),
        })
    }
}
