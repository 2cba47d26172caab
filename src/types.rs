//! # Core Types for the Election Core
//!
//! This module defines the entities every other component works with. They
//! are deliberately small: identity plus the one piece of mutable state each
//! entity carries.
//!
//! ## Type Categories
//!
//! ### Secrets
//! - [`Credential`]: opaque voter secret, zeroized on drop and compared in
//!   constant time
//!
//! ### Core Entities
//! - [`Voter`]: registered identity plus the one-way `has_voted` flag
//! - [`Candidate`]: candidate identity plus the cached obfuscated tally
//! - [`ResultRow`]: one line of an election report
//!
//! ## Usage Examples
//!
//! ```rust
//! use election::types::Voter;
//!
//! // A voter built outside the registry is a *claim*: the name and the
//! // credential the caller presents when casting a vote.
//! let claim = Voter::new("Alice", "pw1");
//! assert_eq!(claim.name(), "Alice");
//! assert!(!claim.has_voted());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// An opaque voter credential
///
/// Credentials are compared by exact byte match, in constant time so that a
/// mismatch does not leak how many leading bytes were correct. The backing
/// buffer is wiped when the credential is dropped and never appears in
/// `Debug` output.
///
/// # Examples
///
/// ```rust
/// use election::types::Credential;
///
/// let stored = Credential::from("pw1");
/// assert!(stored.matches(&Credential::from("pw1")));
/// assert!(!stored.matches(&Credential::from("PW1")));
/// assert_eq!(format!("{stored:?}"), "Credential(<redacted>)");
/// ```
#[derive(Clone)]
pub struct Credential(Zeroizing<String>);

impl Credential {
    /// Wrap a secret string
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    /// Exact-match comparison in constant time
    pub fn matches(&self, other: &Credential) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl From<&str> for Credential {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

impl From<String> for Credential {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// A voter identity with its one-time voting eligibility
///
/// Registered voters live inside the
/// [`VoterRegistry`](crate::voting::VoterRegistry) behind an `Arc`, so every
/// handle returned from a lookup observes the same `has_voted` flag.
///
/// # Lifecycle States
///
/// 1. **Not registered**: no entry in the registry
/// 2. **Registered, eligible**: `has_voted == false`
/// 3. **Registered, voted**: `has_voted == true` (terminal)
///
/// The last transition happens only inside a successful authentication and
/// is a single compare-and-swap, so two concurrent casts for the same voter
/// cannot both observe the eligible state.
///
/// # Examples
///
/// ```rust
/// use election::ElectionService;
///
/// let election = ElectionService::new();
/// election.register_voter("Alice", "pw1").unwrap();
///
/// let alice = election.get_voter("Alice").unwrap().expect("registered");
/// assert!(!alice.has_voted());
/// ```
#[derive(Debug)]
pub struct Voter {
    /// Unique, case-sensitive voter name
    name: String,

    /// Secret presented when casting a vote
    credential: Credential,

    /// One-way eligibility flag
    has_voted: AtomicBool,
}

impl Voter {
    /// Build a voter that has not voted yet
    ///
    /// Outside the registry this value acts as an authentication claim.
    pub fn new(name: impl Into<String>, credential: impl Into<Credential>) -> Self {
        Self {
            name: name.into(),
            credential: credential.into(),
            has_voted: AtomicBool::new(false),
        }
    }

    /// Voter name (registry key)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Credential stored for (or claimed by) this voter
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Whether this voter has already cast a vote
    pub fn has_voted(&self) -> bool {
        self.has_voted.load(Ordering::Acquire)
    }

    /// Flip `has_voted` from `false` to `true`
    ///
    /// Returns `false` when the flag was already set; exactly one caller can
    /// ever observe `true`.
    pub(crate) fn try_mark_voted(&self) -> bool {
        self.has_voted
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// A candidate standing in the election
///
/// Candidates are only created by the
/// [`CandidateRegistry`](crate::voting::CandidateRegistry), so any
/// `Candidate` a caller holds refers to a registered entry.
///
/// The obfuscated tally starts out absent and is overwritten every time the
/// results are computed; it is a cache of the last report, not a source of
/// truth.
#[derive(Debug)]
pub struct Candidate {
    /// Unique candidate name (registry key and ballot key)
    name: String,

    /// Party or group the candidate stands for
    affiliation: String,

    /// Last computed obfuscated tally
    obfuscated_tally: RwLock<Option<String>>,
}

impl Candidate {
    pub(crate) fn new(name: impl Into<String>, affiliation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            affiliation: affiliation.into(),
            obfuscated_tally: RwLock::new(None),
        }
    }

    /// Candidate name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Candidate affiliation
    pub fn affiliation(&self) -> &str {
        &self.affiliation
    }

    /// Obfuscated tally from the most recent results computation
    pub fn obfuscated_tally(&self) -> Option<String> {
        self.obfuscated_tally
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn set_obfuscated_tally(&self, tally: String) {
        *self
            .obfuscated_tally
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(tally);
    }
}

/// One row of an election report
///
/// Rows are produced in candidate registration order and serialize to JSON
/// with snake_case keys for HTTP front ends.
///
/// # Examples
///
/// ```rust
/// use election::types::ResultRow;
///
/// let row = ResultRow::new("John Doe", "Party A", "encrypted_1");
/// let json = serde_json::to_string(&row).unwrap();
/// assert_eq!(
///     json,
///     r#"{"candidate_name":"John Doe","affiliation":"Party A","obfuscated_tally":"encrypted_1"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub candidate_name: String,
    pub affiliation: String,
    pub obfuscated_tally: String,
}

impl ResultRow {
    pub fn new(
        candidate_name: impl Into<String>,
        affiliation: impl Into<String>,
        obfuscated_tally: impl Into<String>,
    ) -> Self {
        Self {
            candidate_name: candidate_name.into(),
            affiliation: affiliation.into(),
            obfuscated_tally: obfuscated_tally.into(),
        }
    }
}
