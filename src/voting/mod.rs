//! Voting subsystem: registries, authentication, ballot, vote casting and the
//! facade tying them together

pub mod authentication;
pub mod ballot;
pub mod command;
pub mod obfuscation;
pub mod registry;
pub mod service;

pub use authentication::{AuthOutcome, Authenticator, PasswordAuthenticator};
pub use ballot::{Ballot, BallotObserver, ChannelObserver, LoggingObserver};
pub use command::{CastOutcome, VoteCastOperation};
pub use obfuscation::{DigestObfuscator, LabelObfuscator, TallyObfuscator};
pub use registry::{CandidateRegistry, VoterRegistry};
pub use service::ElectionService;
