//! Voter and candidate storage
//!
//! Both registries are keyed by name and reject duplicate registration.
//! Entities are handed out as `Arc`s so that a handle obtained from a lookup
//! keeps observing the shared state (the voter's eligibility flag, the
//! candidate's cached tally).

use crate::types::{Candidate, Credential, Voter};
use crate::{EntityKind, Error, Result, voting_error};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

/// Registered voters, keyed by exact (case-sensitive) name
#[derive(Debug, Default)]
pub struct VoterRegistry {
    voters: RwLock<BTreeMap<String, Arc<Voter>>>,
}

impl VoterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a voter who has not voted yet
    pub fn register(
        &self,
        name: impl Into<String>,
        credential: impl Into<Credential>,
    ) -> Result<Arc<Voter>> {
        let voter = Arc::new(Voter::new(name, credential));

        let mut voters = self
            .voters
            .write()
            .map_err(|_| voting_error!("Voter registry write error"))?;

        if voters.contains_key(voter.name()) {
            return Err(Error::duplicate(EntityKind::Voter, voter.name()));
        }
        voters.insert(voter.name().to_string(), voter.clone());

        Ok(voter)
    }

    /// Find a voter by exact name
    pub fn lookup(&self, name: &str) -> Result<Option<Arc<Voter>>> {
        let voters = self
            .voters
            .read()
            .map_err(|_| voting_error!("Voter registry read error"))?;

        Ok(voters.get(name).cloned())
    }

    /// All voters in name order
    pub fn list(&self) -> Result<Vec<Arc<Voter>>> {
        let voters = self
            .voters
            .read()
            .map_err(|_| voting_error!("Voter registry read error"))?;

        Ok(voters.values().cloned().collect())
    }

    pub fn len(&self) -> Result<usize> {
        let voters = self
            .voters
            .read()
            .map_err(|_| voting_error!("Voter registry read error"))?;

        Ok(voters.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[derive(Debug, Default)]
struct CandidateTable {
    ordered: Vec<Arc<Candidate>>,
    by_name: HashMap<String, usize>,
}

/// Registered candidates in insertion order
///
/// Insertion order is the order rows appear in the results report.
#[derive(Debug, Default)]
pub struct CandidateRegistry {
    table: RwLock<CandidateTable>,
}

impl CandidateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a candidate
    pub fn add(
        &self,
        name: impl Into<String>,
        affiliation: impl Into<String>,
    ) -> Result<Arc<Candidate>> {
        let candidate = Arc::new(Candidate::new(name, affiliation));

        let mut table = self
            .table
            .write()
            .map_err(|_| voting_error!("Candidate registry write error"))?;

        if table.by_name.contains_key(candidate.name()) {
            return Err(Error::duplicate(EntityKind::Candidate, candidate.name()));
        }

        let index = table.ordered.len();
        table.by_name.insert(candidate.name().to_string(), index);
        table.ordered.push(candidate.clone());

        Ok(candidate)
    }

    /// Find a candidate by exact name
    pub fn lookup(&self, name: &str) -> Result<Option<Arc<Candidate>>> {
        let table = self
            .table
            .read()
            .map_err(|_| voting_error!("Candidate registry read error"))?;

        Ok(table
            .by_name
            .get(name)
            .and_then(|&index| table.ordered.get(index))
            .cloned())
    }

    /// All candidates in registration order
    pub fn list(&self) -> Result<Vec<Arc<Candidate>>> {
        let table = self
            .table
            .read()
            .map_err(|_| voting_error!("Candidate registry read error"))?;

        Ok(table.ordered.clone())
    }

    pub fn len(&self) -> Result<usize> {
        let table = self
            .table
            .read()
            .map_err(|_| voting_error!("Candidate registry read error"))?;

        Ok(table.ordered.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
