//! Simple test to verify compilation and basic functionality

use election::{
    ElectionService, Result,
    config::ElectionConfig,
    voting::{LabelObfuscator, TallyObfuscator},
};

#[tokio::test]
async fn test_basic_compilation() -> Result<()> {
    println!("🔧 Testing basic compilation and functionality...");

    // Test configuration
    let config = ElectionConfig::for_testing();
    assert_eq!(config.tally.label, "encrypted_");
    println!("✅ Configuration works");

    // Test obfuscation
    let obfuscator = LabelObfuscator::new();
    assert_eq!(obfuscator.obfuscate(3), "encrypted_3");
    println!("✅ Tally obfuscation works");

    // Test facade wiring
    let election = ElectionService::from_config(&config)?;
    election.register_voter("Alice", "pw1")?;
    election.add_candidate("John Doe", "Party A")?;

    let alice = election.get_voter("Alice")?.expect("Alice registered");
    let john = election.get_candidate("John Doe")?.expect("John Doe added");
    assert!(election.cast_vote(&alice, &john)?.is_recorded());
    assert!(alice.has_voted());
    println!("✅ Vote casting works");

    let results = election.get_results()?;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].obfuscated_tally, "encrypted_1");
    println!("✅ Results work");

    println!("🎉 All basic functionality verified!");
    Ok(())
}
