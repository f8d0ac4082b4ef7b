// the one prompt we send, with the json shape we expect back spelled out

pub fn diagnosis_prompt(symptoms: &str, medical_history: Option<&str>) -> String {
    let history = medical_history
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .unwrap_or("None provided");

    format!(
        r#"You are a medical AI assistant. Analyze the following symptoms and medical history to provide health insights.

Symptoms: "{symptoms}"
Medical History: "{history}"

Provide your analysis in the following JSON format ONLY (no other text):

{{
  "diagnoses": [
    {{
      "name": "Condition Name",
      "confidence": 0.XX
    }}
  ],
  "shouldSeekProfessionalCare": true/false,
  "advice": "General advice about the conditions",
  "medicineRecommendations": {{
    "recommendations": [
      {{
        "medicineName": "Medicine Name",
        "dosageSuggestion": "Dosage details",
        "precautions": "Precautions for the medicine"
      }}
    ],
    "disclaimer": "This is for informational purposes only. Always consult a healthcare provider before taking any medication."
  }}
}}

IMPORTANT: Respond ONLY with the JSON object above. Do not include any other text, explanations, or confirmations."#
    )
}
