//! Logging initialization from configuration
//!
//! Kept in its own test binary because the global subscriber can only be
//! installed once per process.

use election::{
    ElectionService, Error, Result,
    config::{ElectionConfig, LogFormat},
};

#[test]
fn test_init_with_configured_logging() -> Result<()> {
    println!("📝 Testing logging initialization from config...");

    let config = ElectionConfig::for_testing();
    assert_eq!(config.logging.format, LogFormat::Pretty);

    election::init_with(&config.logging)?;
    println!("✅ Subscriber installed from LoggingConfig");

    // Logged operations work with the installed subscriber
    let election = ElectionService::from_config(&config)?;
    election.register_voter("Alice", "pw1")?;
    election.add_candidate("John Doe", "Party A")?;
    let alice = election.get_voter("Alice")?.expect("registered");
    let john = election.get_candidate("John Doe")?.expect("added");
    assert!(election.cast_vote(&alice, &john)?.is_recorded());

    // A second global subscriber is refused, not a panic
    assert!(matches!(election::init(), Err(Error::Internal { .. })));
    println!("✅ Second initialization rejected");

    Ok(())
}
