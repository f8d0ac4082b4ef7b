// tests for provider setup; the live call only runs with --features live-ai

use healthwise::{Ai, Provider};

#[test]
fn test_default_provider() {
    assert_eq!(Provider::default(), Provider::Gemini);
}

#[test]
fn test_provider_metadata() {
    assert_eq!(Provider::Gemini.default_model(), "gemini-2.0-flash");
    assert_eq!(Provider::Claude.default_model(), "claude-sonnet-4-20250514");
    assert!(Provider::Gemini.key_vars().contains(&"GEMINI_API_KEY"));
    assert!(Provider::Claude.key_vars().contains(&"ANTHROPIC_API_KEY"));

    for (i, provider) in Provider::ALL.iter().enumerate() {
        assert_eq!(provider.index(), i);
    }
}

#[test]
fn test_explicit_key_and_model() {
    let ai = Ai::new(Provider::Claude, Some("sk-test".to_string()), None).unwrap();
    assert_eq!(ai.provider(), Provider::Claude);
    assert_eq!(ai.model(), "claude-sonnet-4-20250514");

    let ai = Ai::new(
        Provider::Gemini,
        Some("key".to_string()),
        Some("gemini-1.5-pro".to_string()),
    )
    .unwrap();
    assert_eq!(ai.model(), "gemini-1.5-pro");
}

#[cfg(feature = "live-ai")]
#[tokio::test]
async fn test_live_diagnosis() {
    use healthwise::{Classifier, Diagnoser, SymptomReport};

    dotenvy::dotenv().ok();
    let ai = Ai::new(Provider::Gemini, None, None).expect("set GEMINI_API_KEY for live tests");
    let diagnoser = Diagnoser::new(Classifier::medical().unwrap(), ai);

    let report = SymptomReport::new("runny nose, sneezing and a mild sore throat", None);
    let result = diagnoser.diagnose(&report).await.unwrap();
    assert!(!result.diagnoses.is_empty());
}
