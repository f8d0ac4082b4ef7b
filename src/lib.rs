// healthwise library - symptom gate, ai call, and diagnosis cleanup

pub mod cli;
mod core;
mod error;
mod output;
mod server;
pub mod tui;

pub use crate::core::{
    Ai, Classifier, Diagnoser, Diagnosis, DiagnosisResult, Generate, MAX_SYMPTOM_CHARS,
    MEDICAL_TERMS, MedicineRecommendation, MedicineRecommendations, OFF_TOPIC_PATTERNS,
    OVERALL_DISCLAIMER, ParseError, Provider, SymptomReport, Verdict, clean, diagnosis_prompt,
    extract,
};
pub use error::{Error, Rejection};
pub use output::Output;
pub use server::Server;
