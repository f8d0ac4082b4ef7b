// output formatting - diagnosis cards for humans or raw json

use crate::core::{DiagnosisResult, OVERALL_DISCLAIMER, Verdict};

const BAR_WIDTH: usize = 20;
const WRAP_WIDTH: usize = 76;

pub struct Output;

impl Output {
    pub fn pretty(result: &DiagnosisResult) {
        println!("{}", Self::render(result));
    }

    /// The same cards `pretty` prints, as a string.
    pub fn render(result: &DiagnosisResult) -> String {
        let mut out = String::new();

        out.push_str("== Health Insights & Suggestions ==\n\n");

        out.push_str("Potential Conditions:\n");
        if result.diagnoses.is_empty() {
            out.push_str("  none reported\n");
        }
        for d in &result.diagnoses {
            out.push_str(&format!(
                "  {:<40} {} {:>3}%\n",
                truncate(&d.name, 40),
                confidence_bar(d.confidence, BAR_WIDTH),
                d.percent()
            ));
        }

        let (title, body) = result.recommendation();
        let marker = if result.seek_care() { "!" } else { "+" };
        out.push_str(&format!("\nRecommendation: [{marker}] {title}\n"));
        push_wrapped(&mut out, body, "  ");

        if let Some(advice) = result.advice.as_deref().filter(|a| !a.trim().is_empty()) {
            out.push_str("\nAdditional Advice:\n");
            push_wrapped(&mut out, advice, "  ");
        }

        out.push_str("\nPotential OTC Medication Suggestions:\n");
        let meds = result.recommendations();
        if meds.is_empty() {
            out.push_str("  No medication suggestions available.\n");
        }
        for med in meds {
            out.push_str(&format!("  * {}\n", med.medicine_name));
            if let Some(dosage) = &med.dosage_suggestion {
                push_wrapped(&mut out, &format!("Dosage: {dosage}"), "      ");
            }
            if let Some(precautions) = &med.precautions {
                push_wrapped(&mut out, &format!("Precautions: {precautions}"), "      ");
            }
            if med.dosage_suggestion.is_none() && med.precautions.is_none() {
                push_wrapped(
                    &mut out,
                    "No specific dosage or precaution info provided. Always follow package \
                     instructions and consult a doctor.",
                    "      ",
                );
            }
        }

        if let Some(disclaimer) = result.medicine_disclaimer() {
            out.push_str("\nImportant Disclaimer:\n");
            push_wrapped(&mut out, disclaimer, "  ");
        }

        out.push('\n');
        push_wrapped(&mut out, OVERALL_DISCLAIMER, "");
        out
    }

    // raw json for scripts
    pub fn raw(result: &DiagnosisResult) {
        println!("{}", serde_json::to_string(result).unwrap_or_default());
    }

    pub fn verdict(verdict: &Verdict) {
        match verdict {
            Verdict::Accepted { term } => println!("accepted (matched \"{term}\")"),
            Verdict::Empty => println!("rejected: empty input"),
            Verdict::NoMedicalTerms => println!("rejected: no medical terms found"),
            Verdict::OffTopic { pattern } => println!("rejected: off topic (/{pattern}/)"),
        }
    }
}

/// `[#####.....]` style bar for a confidence in [0, 1].
pub fn confidence_bar(confidence: f64, width: usize) -> String {
    let filled = (confidence.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        s.to_string()
    }
}

// greedy word wrap, each line prefixed with indent
fn push_wrapped(out: &mut String, text: &str, indent: &str) {
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && indent.len() + line.len() + 1 + word.len() > WRAP_WIDTH {
            out.push_str(indent);
            out.push_str(&line);
            out.push('\n');
            line.clear();
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        out.push_str(indent);
        out.push_str(&line);
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Diagnosis, MedicineRecommendation, MedicineRecommendations};

    #[test]
    fn bar_is_full_at_one_and_empty_at_zero() {
        assert_eq!(confidence_bar(1.0, 4), "[####]");
        assert_eq!(confidence_bar(0.0, 4), "[....]");
        assert_eq!(confidence_bar(0.5, 4), "[##..]");
    }

    #[test]
    fn render_shows_each_card() {
        let result = DiagnosisResult {
            diagnoses: vec![Diagnosis {
                name: "Tension headache".to_string(),
                confidence: 0.7,
            }],
            should_seek_professional_care: Some(true),
            advice: Some("Rest and hydrate.".to_string()),
            medicine_recommendations: Some(MedicineRecommendations {
                recommendations: vec![MedicineRecommendation {
                    medicine_name: "Ibuprofen".to_string(),
                    dosage_suggestion: None,
                    precautions: None,
                }],
                disclaimer: Some("Ask a pharmacist.".to_string()),
            }),
        };

        let text = Output::render(&result);
        assert!(text.contains("Tension headache"));
        assert!(text.contains("70%"));
        assert!(text.contains("Seek Professional Care"));
        assert!(text.contains("Rest and hydrate."));
        assert!(text.contains("* Ibuprofen"));
        assert!(text.contains("No specific dosage"));
        assert!(text.contains("Ask a pharmacist."));
    }

    #[test]
    fn render_without_medicines() {
        let result = DiagnosisResult {
            diagnoses: vec![],
            should_seek_professional_care: None,
            advice: None,
            medicine_recommendations: None,
        };

        let text = Output::render(&result);
        assert!(text.contains("none reported"));
        assert!(text.contains("Monitor Symptoms"));
        assert!(text.contains("No medication suggestions available."));
    }
}
