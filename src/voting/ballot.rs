//! Ballot: raw vote counters plus vote notifications
//!
//! Counters are per-candidate atomics, so concurrent votes for different
//! candidates never contend and votes for the same candidate are plain
//! atomic adds. The map lock is only taken for writing the first time a
//! candidate receives a vote. Observers are notified after the increment and
//! after every lock is released, so a slow or panicking observer can neither
//! corrupt a count nor block other casts.

use crate::types::Candidate;
use crate::{Result, voting_error};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

/// Receives one message per recorded vote
pub trait BallotObserver: Send + Sync {
    fn update(&self, message: &str);
}

impl<F> BallotObserver for F
where
    F: Fn(&str) + Send + Sync,
{
    fn update(&self, message: &str) {
        self(message)
    }
}

/// Writes every ballot update to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl BallotObserver for LoggingObserver {
    fn update(&self, message: &str) {
        tracing::info!("📬 Ballot Update: {}", message);
    }
}

/// Hands ballot updates to an async consumer
///
/// The send never blocks and never fails the vote. With [`ChannelObserver::channel`]
/// the queue is unbounded, so a consumer that stops reading lets it grow by
/// one message per vote. Use [`ChannelObserver::bounded`] when the consumer
/// may lag; updates that do not fit are dropped with a warning.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: UpdateSender,
}

#[derive(Debug, Clone)]
enum UpdateSender {
    Unbounded(mpsc::UnboundedSender<String>),
    Bounded(mpsc::Sender<String>),
}

impl ChannelObserver {
    pub fn new(sender: mpsc::UnboundedSender<String>) -> Self {
        Self {
            sender: UpdateSender::Unbounded(sender),
        }
    }

    /// Create an observer together with the receiving end
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }

    /// Observer holding at most `capacity` undelivered updates
    ///
    /// Panics if `capacity` is zero.
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (sender, receiver) = mpsc::channel(capacity);
        let observer = Self {
            sender: UpdateSender::Bounded(sender),
        };
        (observer, receiver)
    }
}

impl BallotObserver for ChannelObserver {
    fn update(&self, message: &str) {
        match &self.sender {
            UpdateSender::Unbounded(sender) => {
                if let Err(error) = sender.send(message.to_string()) {
                    tracing::warn!(%error, "Failed to deliver ballot update");
                }
            }
            UpdateSender::Bounded(sender) => match sender.try_send(message.to_string()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::warn!("Ballot update queue full, update dropped");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    tracing::warn!("Failed to deliver ballot update: receiver closed");
                }
            },
        }
    }
}

/// Raw tallies keyed by candidate name
#[derive(Default)]
pub struct Ballot {
    votes: RwLock<HashMap<String, Arc<AtomicU64>>>,
    observers: RwLock<Vec<Arc<dyn BallotObserver>>>,
}

impl Ballot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ballot with one observer already subscribed
    pub fn with_observer(observer: impl BallotObserver + 'static) -> Self {
        let observer: Arc<dyn BallotObserver> = Arc::new(observer);
        Self {
            votes: RwLock::default(),
            observers: RwLock::new(vec![observer]),
        }
    }

    /// Register an observer; observers are notified in subscription order
    pub fn subscribe(&self, observer: impl BallotObserver + 'static) -> Result<()> {
        let mut observers = self
            .observers
            .write()
            .map_err(|_| voting_error!("Ballot observer write error"))?;

        observers.push(Arc::new(observer));
        Ok(())
    }

    /// Number of subscribed observers
    pub fn observer_count(&self) -> Result<usize> {
        let observers = self
            .observers
            .read()
            .map_err(|_| voting_error!("Ballot observer read error"))?;

        Ok(observers.len())
    }

    /// Record one vote for `candidate` and notify observers
    ///
    /// Returns the candidate's count after the increment.
    pub fn add_vote(&self, candidate: &Candidate) -> Result<u64> {
        let counter = self.counter_for(candidate.name())?;
        let count = counter.fetch_add(1, Ordering::AcqRel) + 1;

        self.notify(&format!("Vote added for candidate: {}", candidate.name()))?;

        Ok(count)
    }

    /// Raw count for `candidate`, 0 if it never received a vote
    pub fn get_votes(&self, candidate: &Candidate) -> Result<u64> {
        self.votes_for(candidate.name())
    }

    /// Raw count by candidate name
    pub fn votes_for(&self, name: &str) -> Result<u64> {
        let votes = self
            .votes
            .read()
            .map_err(|_| voting_error!("Ballot read error"))?;

        Ok(votes
            .get(name)
            .map(|counter| counter.load(Ordering::Acquire))
            .unwrap_or(0))
    }

    /// Sum of all recorded votes
    pub fn total_votes(&self) -> Result<u64> {
        let votes = self
            .votes
            .read()
            .map_err(|_| voting_error!("Ballot read error"))?;

        Ok(votes
            .values()
            .map(|counter| counter.load(Ordering::Acquire))
            .sum())
    }

    fn counter_for(&self, name: &str) -> Result<Arc<AtomicU64>> {
        {
            let votes = self
                .votes
                .read()
                .map_err(|_| voting_error!("Ballot read error"))?;

            if let Some(counter) = votes.get(name) {
                return Ok(counter.clone());
            }
        }

        let mut votes = self
            .votes
            .write()
            .map_err(|_| voting_error!("Ballot write error"))?;

        // Another caller may have created the counter between the two locks
        Ok(votes.entry(name.to_string()).or_default().clone())
    }

    fn notify(&self, message: &str) -> Result<()> {
        let observers: Vec<Arc<dyn BallotObserver>> = self
            .observers
            .read()
            .map_err(|_| voting_error!("Ballot observer read error"))?
            .clone();

        for observer in observers {
            observer.update(message);
        }

        Ok(())
    }
}

impl std::fmt::Debug for Ballot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ballot")
            .field("votes", &self.votes)
            .field("observers", &self.observer_count().unwrap_or(0))
            .finish()
    }
}
