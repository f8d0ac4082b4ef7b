// tests for turning ai replies into diagnoses

use healthwise::{DiagnosisResult, clean, extract};

const FULL: &str = r#"{
    "diagnoses": [
        {"name": "Common Cold", "confidence": 0.7},
        {"name": "Influenza", "confidence": 0.25}
    ],
    "shouldSeekProfessionalCare": false,
    "advice": "Rest and drink fluids.",
    "medicineRecommendations": {
        "recommendations": [
            {"medicineName": "Paracetamol", "dosageSuggestion": "500mg every 6 hours", "precautions": "Avoid alcohol."}
        ],
        "disclaimer": "Consult a pharmacist."
    }
}"#;

#[test]
fn test_fenced_empty_diagnoses() {
    let result = extract("```json\n{\"diagnoses\":[]}\n```").unwrap();
    assert_eq!(
        result,
        DiagnosisResult {
            diagnoses: vec![],
            should_seek_professional_care: None,
            advice: None,
            medicine_recommendations: None,
        }
    );
}

#[test]
fn test_not_json_keeps_cleaned_text() {
    let err = extract("not json at all").unwrap_err();
    assert_eq!(err.cleaned, "not json at all");
}

#[test]
fn test_fenced_garbage_reports_cleaned_text() {
    let err = extract("```json\nsorry, I can't help\n```").unwrap_err();
    assert_eq!(err.cleaned, "sorry, I can't help");
}

#[test]
fn test_full_shape() {
    let result = extract(FULL).unwrap();
    assert_eq!(result.diagnoses.len(), 2);
    assert_eq!(result.diagnoses[0].name, "Common Cold");
    assert_eq!(result.diagnoses[0].percent(), 70);
    assert!(!result.seek_care());
    assert_eq!(result.advice.as_deref(), Some("Rest and drink fluids."));

    let meds = result.recommendations();
    assert_eq!(meds.len(), 1);
    assert_eq!(meds[0].medicine_name, "Paracetamol");
    assert_eq!(meds[0].precautions.as_deref(), Some("Avoid alcohol."));
    assert_eq!(result.medicine_disclaimer(), Some("Consult a pharmacist."));
}

#[test]
fn test_clean_strips_fences() {
    assert_eq!(clean("```json\n{}\n```"), "{}");
    assert_eq!(clean("```\n{}\n```"), "{}");
    assert_eq!(clean("  {}  "), "{}");
    assert_eq!(clean("```JSON {} ```"), "{}");
}

#[test]
fn test_clean_idempotent() {
    for raw in ["```json\n{\"a\":1}\n```", "  plain text ", "```\n\n```", ""] {
        let once = clean(raw);
        assert_eq!(clean(once), once);
    }
}

#[test]
fn test_fenced_and_bare_agree() {
    let fenced = format!("```json\n{FULL}\n```");
    assert_eq!(extract(&fenced).unwrap(), extract(FULL).unwrap());
}

#[test]
fn test_text_around_object() {
    let raw = "Here is the analysis:\n{\"diagnoses\":[{\"name\":\"Flu\",\"confidence\":0.6}]}\nStay well!";
    let result = extract(raw).unwrap();
    assert_eq!(result.diagnoses[0].name, "Flu");
}

#[test]
fn test_confidence_out_of_range() {
    let err = extract(r#"{"diagnoses":[{"name":"Flu","confidence":1.5}]}"#).unwrap_err();
    assert!(err.reason.contains("outside"));

    assert!(extract(r#"{"diagnoses":[{"name":"Flu","confidence":-0.1}]}"#).is_err());
}

#[test]
fn test_blank_diagnosis_name() {
    let err = extract(r#"{"diagnoses":[{"name":"  ","confidence":0.5}]}"#).unwrap_err();
    assert!(err.reason.contains("empty name"));
}

#[test]
fn test_missing_diagnoses() {
    let err = extract(r#"{"advice":"rest"}"#).unwrap_err();
    assert_eq!(err.cleaned, r#"{"advice":"rest"}"#);
}

#[test]
fn test_recommendations_without_list() {
    let result = extract(r#"{"diagnoses":[],"medicineRecommendations":{"disclaimer":"x"}}"#).unwrap();
    assert!(result.recommendations().is_empty());
    assert_eq!(result.medicine_disclaimer(), Some("x"));
}

#[test]
fn test_full_precision_confidences_extract_back() {
    let raw = r#"{"diagnoses":[
        {"name":"Sinusitis","confidence":0.21291890726713458},
        {"name":"Allergic Rhinitis","confidence":0.9259338926496359},
        {"name":"Common Cold","confidence":0.9856906946328695}
    ]}"#;
    let result = extract(raw).unwrap();
    assert_eq!(result.diagnoses[0].confidence, 0.21291890726713458);
    assert_eq!(result.diagnoses[1].confidence, 0.9259338926496359);
    assert_eq!(result.diagnoses[2].confidence, 0.9856906946328695);

    let json = serde_json::to_string(&result).unwrap();
    assert_eq!(extract(&json).unwrap(), result);
}

#[test]
fn test_serialized_result_extracts_back() {
    let result = extract(FULL).unwrap();
    let json = serde_json::to_string(&result).unwrap();
    assert_eq!(extract(&json).unwrap(), result);
}
