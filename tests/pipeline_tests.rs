// tests for the symptom report -> diagnosis pipeline, with fake ai providers

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use healthwise::{
    Classifier, Diagnoser, Error, Generate, MAX_SYMPTOM_CHARS, Rejection, SymptomReport,
    diagnosis_prompt,
};

const REPLY: &str = "```json\n{\"diagnoses\":[{\"name\":\"Tension Headache\",\"confidence\":0.8}],\"shouldSeekProfessionalCare\":false}\n```";

// answers every prompt with the same text and remembers what it was asked
struct Canned {
    reply: &'static str,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl Canned {
    fn new(reply: &'static str) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }
}

impl Generate for Canned {
    async fn generate(&self, prompt: &str) -> Result<String, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        Ok(self.reply.to_string())
    }
}

struct Down;

impl Generate for Down {
    async fn generate(&self, _prompt: &str) -> Result<String, Error> {
        Err(Error::Provider("quota exceeded".to_string()))
    }
}

fn diagnoser<G: Generate>(generator: G) -> Diagnoser<G> {
    Diagnoser::new(Classifier::medical().unwrap(), generator)
}

fn calls(d: &Diagnoser<Canned>) -> usize {
    d.generator().calls.load(Ordering::SeqCst)
}

#[tokio::test]
async fn test_diagnose_success() {
    let d = diagnoser(Canned::new(REPLY));
    let report = SymptomReport::new("I have a severe headache and fever", None);

    let result = d.diagnose(&report).await.unwrap();
    assert_eq!(result.diagnoses[0].name, "Tension Headache");
    assert!(!result.seek_care());
    assert_eq!(calls(&d), 1);
}

#[tokio::test]
async fn test_prompt_carries_report() {
    let d = diagnoser(Canned::new(REPLY));
    let report = SymptomReport::new("sore throat", Some("asthma".to_string()));
    d.diagnose(&report).await.unwrap();

    let prompt = d.generator().last_prompt.lock().unwrap().clone().unwrap();
    assert_eq!(prompt, diagnosis_prompt("sore throat", Some("asthma")));
    assert!(prompt.contains(r#"Symptoms: "sore throat""#));
    assert!(prompt.contains(r#"Medical History: "asthma""#));
}

#[test]
fn test_prompt_without_history() {
    let prompt = diagnosis_prompt("rash", None);
    assert!(prompt.contains(r#"Medical History: "None provided""#));
    assert_eq!(prompt, diagnosis_prompt("rash", Some("   ")));
}

#[tokio::test]
async fn test_off_topic_never_calls_ai() {
    let d = diagnoser(Canned::new(REPLY));
    let report = SymptomReport::new("Tell me about the stock market", None);

    let err = d.diagnose(&report).await.unwrap_err();
    assert!(matches!(err, Rejection::OutOfScope));
    assert_eq!(err.category(), "out_of_scope");
    assert!(err.is_user_correctable());
    assert_eq!(calls(&d), 0);
}

#[tokio::test]
async fn test_empty_symptoms_rejected() {
    let d = diagnoser(Canned::new(REPLY));

    for symptoms in ["", "   "] {
        let err = d
            .diagnose(&SymptomReport::new(symptoms, Some("diabetes".to_string())))
            .await
            .unwrap_err();
        assert_eq!(err.category(), "invalid_input");
        assert_eq!(
            err.to_string(),
            "Symptoms are required and must be a non-empty string."
        );
    }
    assert_eq!(calls(&d), 0);
}

#[tokio::test]
async fn test_length_limit() {
    let d = diagnoser(Canned::new(REPLY));

    let at_limit = format!("fever {}", "a".repeat(MAX_SYMPTOM_CHARS - 6));
    assert_eq!(at_limit.chars().count(), MAX_SYMPTOM_CHARS);
    assert!(d.diagnose(&SymptomReport::new(at_limit, None)).await.is_ok());

    let over = format!("fever {}", "a".repeat(MAX_SYMPTOM_CHARS - 5));
    let err = d.diagnose(&SymptomReport::new(over, None)).await.unwrap_err();
    assert!(matches!(err, Rejection::InvalidInput(_)));
    assert!(err.to_string().contains("too long"));

    assert_eq!(calls(&d), 1);
}

#[tokio::test]
async fn test_length_counts_chars_not_bytes() {
    let d = diagnoser(Canned::new(REPLY));
    let symptoms = format!("fever {}", "é".repeat(MAX_SYMPTOM_CHARS - 6));
    assert!(symptoms.len() > MAX_SYMPTOM_CHARS);
    assert!(d.diagnose(&SymptomReport::new(symptoms, None)).await.is_ok());
}

#[tokio::test]
async fn test_history_counts_for_classification() {
    let d = diagnoser(Canned::new(REPLY));

    // no term in the symptoms, but the history has one
    let report = SymptomReport::new("I feel off", Some("asthma".to_string()));
    assert!(d.screen(&report).is_ok());

    // and an off-topic history vetoes medical symptoms
    let report = SymptomReport::new("fever", Some("bitcoin trader".to_string()));
    assert!(matches!(d.screen(&report), Err(Rejection::OutOfScope)));
}

#[tokio::test]
async fn test_provider_failure() {
    let d = diagnoser(Down);
    let err = d
        .diagnose(&SymptomReport::new("chest pain", None))
        .await
        .unwrap_err();

    assert_eq!(err.category(), "upstream_unavailable");
    assert!(!err.is_user_correctable());
    assert_eq!(err.to_string(), "Something went wrong.");
    assert!(err.detail().contains("quota exceeded"));
}

#[tokio::test]
async fn test_unparseable_reply() {
    let d = diagnoser(Canned::new("I'm sorry, I can't provide medical advice."));
    let err = d
        .diagnose(&SymptomReport::new("chest pain", None))
        .await
        .unwrap_err();

    match err {
        Rejection::UpstreamParseFailure(e) => {
            assert_eq!(e.cleaned, "I'm sorry, I can't provide medical advice.");
        }
        other => panic!("expected parse failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_out_of_range_reply_is_parse_failure() {
    let d = diagnoser(Canned::new(
        r#"{"diagnoses":[{"name":"Flu","confidence":85}]}"#,
    ));
    let err = d
        .diagnose(&SymptomReport::new("fever", None))
        .await
        .unwrap_err();
    assert_eq!(err.category(), "upstream_parse_failure");
}

#[test]
fn test_report_wire_format() {
    let report: SymptomReport =
        serde_json::from_str(r#"{"symptoms":"cough","medicalHistory":"smoker"}"#).unwrap();
    assert_eq!(report.medical_history.as_deref(), Some("smoker"));

    let report: SymptomReport = serde_json::from_str(r#"{"symptoms":"cough"}"#).unwrap();
    assert_eq!(report.medical_history, None);
    assert_eq!(report.classification_input(), "cough ");
}
