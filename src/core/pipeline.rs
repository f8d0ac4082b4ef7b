// symptom report -> diagnosis
// everything that can be rejected locally is rejected before the ai is called

use serde::{Deserialize, Serialize};

use crate::Rejection;
use crate::core::ai::Generate;
use crate::core::classifier::{Classifier, Verdict};
use crate::core::diagnosis::DiagnosisResult;
use crate::core::prompt::diagnosis_prompt;
use crate::core::sanitizer::extract;

pub const MAX_SYMPTOM_CHARS: usize = 1000;

/// What a user submits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomReport {
    pub symptoms: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
}

impl SymptomReport {
    pub fn new(symptoms: impl Into<String>, medical_history: Option<String>) -> Self {
        Self {
            symptoms: symptoms.into(),
            medical_history,
        }
    }

    /// Symptoms and history joined, which is what the classifier looks at.
    pub fn classification_input(&self) -> String {
        format!(
            "{} {}",
            self.symptoms,
            self.medical_history.as_deref().unwrap_or_default()
        )
    }
}

pub struct Diagnoser<G> {
    classifier: Classifier,
    generator: G,
}

impl<G: Generate> Diagnoser<G> {
    pub fn new(classifier: Classifier, generator: G) -> Self {
        Self {
            classifier,
            generator,
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Input validation and classification, no external calls.
    pub fn screen(&self, report: &SymptomReport) -> Result<(), Rejection> {
        if report.symptoms.trim().is_empty() {
            return Err(Rejection::InvalidInput(
                "Symptoms are required and must be a non-empty string.".to_string(),
            ));
        }

        if report.symptoms.chars().count() > MAX_SYMPTOM_CHARS {
            return Err(Rejection::InvalidInput(format!(
                "Symptoms description is too long. Please keep it under {MAX_SYMPTOM_CHARS} characters."
            )));
        }

        match self.classifier.classify(&report.classification_input()) {
            Verdict::Accepted { term } => {
                tracing::debug!(%term, "query accepted");
                Ok(())
            }
            verdict => {
                tracing::info!(?verdict, "query rejected as out of scope");
                Err(Rejection::OutOfScope)
            }
        }
    }

    pub async fn diagnose(&self, report: &SymptomReport) -> Result<DiagnosisResult, Rejection> {
        self.screen(report)?;

        let prompt = diagnosis_prompt(&report.symptoms, report.medical_history.as_deref());

        let raw = self.generator.generate(&prompt).await.map_err(|e| {
            tracing::error!(error = %e, "ai provider call failed");
            Rejection::UpstreamUnavailable(e.to_string())
        })?;

        let result = extract(&raw).map_err(|e| {
            tracing::error!(reason = %e.reason, cleaned = %e.cleaned, "could not parse ai response");
            Rejection::UpstreamParseFailure(e)
        })?;

        tracing::info!(conditions = result.diagnoses.len(), "diagnosis ready");
        Ok(result)
    }
}
