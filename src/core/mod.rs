// core logic - query gate, ai call, and response cleanup

mod ai;
mod classifier;
mod diagnosis;
mod pipeline;
mod prompt;
mod sanitizer;

pub use ai::{Ai, Generate, Provider};
pub use classifier::{Classifier, MEDICAL_TERMS, OFF_TOPIC_PATTERNS, Verdict};
pub use diagnosis::{
    Diagnosis, DiagnosisResult, MedicineRecommendation, MedicineRecommendations,
    OVERALL_DISCLAIMER,
};
pub use pipeline::{Diagnoser, MAX_SYMPTOM_CHARS, SymptomReport};
pub use prompt::diagnosis_prompt;
pub use sanitizer::{ParseError, clean, extract};
