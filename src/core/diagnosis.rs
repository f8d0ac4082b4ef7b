// what the model hands back, once sanitized
// field names on the wire match the json shape the prompt asks for

use serde::{Deserialize, Serialize};

pub const OVERALL_DISCLAIMER: &str = "HealthWise provides informational suggestions based on AI \
analysis and does not constitute medical advice. Always consult a qualified healthcare provider \
for any health concerns or before making any decisions related to your health or treatment.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    pub diagnoses: Vec<Diagnosis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_seek_professional_care: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medicine_recommendations: Option<MedicineRecommendations>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub name: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MedicineRecommendations {
    #[serde(default)]
    pub recommendations: Vec<MedicineRecommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineRecommendation {
    pub medicine_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage_suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precautions: Option<String>,
}

impl Diagnosis {
    /// Confidence as a whole percentage, for display.
    pub fn percent(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

impl DiagnosisResult {
    /// Checks the serde decode can't express: ranges and non-blank names.
    pub fn validate(&self) -> Result<(), String> {
        for (i, d) in self.diagnoses.iter().enumerate() {
            if d.name.trim().is_empty() {
                return Err(format!("diagnosis {i} has an empty name"));
            }
            if !d.confidence.is_finite() || !(0.0..=1.0).contains(&d.confidence) {
                return Err(format!(
                    "confidence {} for '{}' is outside [0, 1]",
                    d.confidence, d.name
                ));
            }
        }

        if let Some(meds) = &self.medicine_recommendations {
            for (i, m) in meds.recommendations.iter().enumerate() {
                if m.medicine_name.trim().is_empty() {
                    return Err(format!("medicine recommendation {i} has an empty name"));
                }
            }
        }

        Ok(())
    }

    pub fn seek_care(&self) -> bool {
        self.should_seek_professional_care.unwrap_or(false)
    }

    /// Title and body of the care recommendation card.
    pub fn recommendation(&self) -> (&'static str, &'static str) {
        if self.seek_care() {
            (
                "Seek Professional Care",
                "It is strongly recommended to consult a healthcare professional.",
            )
        } else {
            (
                "Monitor Symptoms",
                "Your symptoms may not require immediate attention. Monitor your condition.",
            )
        }
    }

    pub fn recommendations(&self) -> &[MedicineRecommendation] {
        self.medicine_recommendations
            .as_ref()
            .map(|m| m.recommendations.as_slice())
            .unwrap_or_default()
    }

    pub fn medicine_disclaimer(&self) -> Option<&str> {
        self.medicine_recommendations
            .as_ref()
            .and_then(|m| m.disclaimer.as_deref())
    }
}
