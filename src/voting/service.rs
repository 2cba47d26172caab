//! Election service facade
//!
//! The only entry point front ends use. It owns the registries and the
//! ballot, and is wired with an authentication strategy and a tally
//! obfuscation strategy at construction.

use crate::Result;
use crate::config::ElectionConfig;
use crate::types::{Candidate, Credential, ResultRow, Voter};
use crate::voting::authentication::{Authenticator, PasswordAuthenticator};
use crate::voting::ballot::{Ballot, BallotObserver, LoggingObserver};
use crate::voting::command::{CastOutcome, VoteCastOperation};
use crate::voting::obfuscation::{LabelObfuscator, TallyObfuscator};
use crate::voting::registry::{CandidateRegistry, VoterRegistry};
use std::sync::Arc;
use uuid::Uuid;

/// In-memory election
///
/// All methods take `&self`; share the service across tasks with an `Arc`.
///
/// # Examples
///
/// ```rust
/// use election::{ElectionService, ResultRow};
///
/// let election = ElectionService::new();
/// election.register_voter("Alice", "pw1")?;
/// election.add_candidate("John Doe", "Party A")?;
///
/// if let (Some(alice), Some(john)) = (
///     election.get_voter("Alice")?,
///     election.get_candidate("John Doe")?,
/// ) {
///     election.cast_vote(&alice, &john)?;
/// }
///
/// assert_eq!(
///     election.get_results()?,
///     vec![ResultRow::new("John Doe", "Party A", "encrypted_1")]
/// );
/// # Ok::<(), election::Error>(())
/// ```
pub struct ElectionService {
    voters: VoterRegistry,
    candidates: CandidateRegistry,
    ballot: Ballot,
    authenticator: Arc<dyn Authenticator>,
    obfuscator: Arc<dyn TallyObfuscator>,
}

impl ElectionService {
    /// Password authentication, `encrypted_<n>` tallies, logged ballot updates
    pub fn new() -> Self {
        Self::with_strategies(
            Arc::new(PasswordAuthenticator::new()),
            Arc::new(LabelObfuscator::new()),
        )
    }

    /// Wire the service with explicit strategies
    pub fn with_strategies(
        authenticator: Arc<dyn Authenticator>,
        obfuscator: Arc<dyn TallyObfuscator>,
    ) -> Self {
        Self {
            voters: VoterRegistry::new(),
            candidates: CandidateRegistry::new(),
            ballot: Ballot::with_observer(LoggingObserver),
            authenticator,
            obfuscator,
        }
    }

    /// Password authentication plus the configured tally strategy
    pub fn from_config(config: &ElectionConfig) -> Result<Self> {
        Ok(Self::with_strategies(
            Arc::new(PasswordAuthenticator::new()),
            config.tally.obfuscator()?,
        ))
    }

    pub fn register_voter(&self, name: &str, credential: impl Into<Credential>) -> Result<()> {
        self.voters.register(name, credential)?;
        tracing::info!(voter = name, "🪪 Voter registered");
        Ok(())
    }

    pub fn add_candidate(&self, name: &str, affiliation: &str) -> Result<()> {
        self.candidates.add(name, affiliation)?;
        tracing::info!(candidate = name, affiliation, "📋 Candidate added");
        Ok(())
    }

    pub fn get_voter(&self, name: &str) -> Result<Option<Arc<Voter>>> {
        self.voters.lookup(name)
    }

    pub fn get_candidate(&self, name: &str) -> Result<Option<Arc<Candidate>>> {
        self.candidates.lookup(name)
    }

    /// Cast one vote
    ///
    /// `voter` may be a registered handle or a claim built with
    /// [`Voter::new`]; either way the stored voter decides eligibility.
    /// Rejections are reported through the returned outcome and the log,
    /// never as an error. A candidate handle obtained from another election
    /// is refused before authentication, so the voter's eligibility is kept.
    pub fn cast_vote(&self, voter: &Voter, candidate: &Candidate) -> Result<CastOutcome> {
        if !self.is_registered_candidate(candidate)? {
            let operation_id = Uuid::new_v4();
            tracing::warn!(
                operation = %operation_id,
                candidate = candidate.name(),
                "🚫 Candidate is not registered with this election"
            );
            return Ok(CastOutcome::UnknownCandidate {
                operation_id,
                candidate: candidate.name().to_string(),
            });
        }

        VoteCastOperation::new(
            voter,
            candidate,
            &self.ballot,
            self.authenticator.as_ref(),
            &self.voters,
        )
        .execute()
    }

    fn is_registered_candidate(&self, candidate: &Candidate) -> Result<bool> {
        Ok(self
            .candidates
            .lookup(candidate.name())?
            .is_some_and(|registered| std::ptr::eq(Arc::as_ptr(&registered), candidate)))
    }

    /// Tally report in candidate registration order
    ///
    /// Recomputes every row and refreshes each candidate's cached
    /// obfuscated tally.
    pub fn get_results(&self) -> Result<Vec<ResultRow>> {
        let candidates = self.candidates.list()?;
        let mut rows = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let votes = self.ballot.get_votes(&candidate)?;
            let tally = self.obfuscator.obfuscate(votes);
            candidate.set_obfuscated_tally(tally.clone());

            rows.push(ResultRow::new(
                candidate.name(),
                candidate.affiliation(),
                tally,
            ));
        }

        tracing::info!(candidates = rows.len(), "📊 Results computed");
        Ok(rows)
    }

    /// Results rendered as a JSON array
    pub fn results_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.get_results()?)?)
    }

    /// Add a ballot observer after the default logging one
    pub fn subscribe(&self, observer: impl BallotObserver + 'static) -> Result<()> {
        self.ballot.subscribe(observer)
    }

    /// Raw (unobfuscated) count for a candidate
    pub fn votes_for(&self, candidate: &Candidate) -> Result<u64> {
        self.ballot.get_votes(candidate)
    }

    /// Registered voters in name order
    pub fn voters(&self) -> Result<Vec<Arc<Voter>>> {
        self.voters.list()
    }

    /// Registered candidates in registration order
    pub fn candidates(&self) -> Result<Vec<Arc<Candidate>>> {
        self.candidates.list()
    }
}

impl Default for ElectionService {
    fn default() -> Self {
        Self::new()
    }
}
