//! One-vote-per-voter authentication gate
//!
//! The gate both checks eligibility and consumes it: a successful
//! authentication flips the stored voter's `has_voted` flag. The flip is a
//! compare-and-swap on that voter alone, so concurrent casts for the same
//! voter cannot both pass, while casts for different voters never contend.

use crate::Result;
use crate::types::Voter;
use crate::voting::registry::VoterRegistry;
use serde::{Deserialize, Serialize};

/// Result of checking a voter claim against the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthOutcome {
    /// Claim accepted and eligibility consumed
    Authenticated,

    /// No voter registered under the claimed name
    UnknownVoter,

    /// Credential does not match the stored one
    InvalidCredential,

    /// Voter exists and the credential matched, but the vote was already cast
    AlreadyVoted,
}

impl AuthOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthOutcome::Authenticated)
    }

    /// Short reason for logs and rejection outcomes
    pub fn reason(&self) -> &'static str {
        match self {
            AuthOutcome::Authenticated => "authenticated",
            AuthOutcome::UnknownVoter => "unknown voter",
            AuthOutcome::InvalidCredential => "invalid credential",
            AuthOutcome::AlreadyVoted => "voter has already voted",
        }
    }
}

/// Authentication strategy injected into the election service
///
/// Implementations must leave the registry untouched for every outcome
/// other than [`AuthOutcome::Authenticated`].
pub trait Authenticator: Send + Sync {
    /// Check `claimed` against the stored voter and consume eligibility on success
    fn verify(&self, claimed: &Voter, registry: &VoterRegistry) -> Result<AuthOutcome>;

    /// `true` only when the claim was accepted
    fn authenticate(&self, claimed: &Voter, registry: &VoterRegistry) -> Result<bool> {
        Ok(self.verify(claimed, registry)?.is_authenticated())
    }
}

/// Name + password authentication
#[derive(Debug, Default, Clone, Copy)]
pub struct PasswordAuthenticator;

impl PasswordAuthenticator {
    pub fn new() -> Self {
        Self
    }
}

impl Authenticator for PasswordAuthenticator {
    fn verify(&self, claimed: &Voter, registry: &VoterRegistry) -> Result<AuthOutcome> {
        let Some(stored) = registry.lookup(claimed.name())? else {
            return Ok(AuthOutcome::UnknownVoter);
        };

        if !stored.credential().matches(claimed.credential()) {
            return Ok(AuthOutcome::InvalidCredential);
        }

        if stored.try_mark_voted() {
            Ok(AuthOutcome::Authenticated)
        } else {
            Ok(AuthOutcome::AlreadyVoted)
        }
    }
}
