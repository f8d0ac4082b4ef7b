// medical query gate
// keywords decide "this is about health", regexes veto anything off topic

use crate::Error;
use regex::{RegexSet, RegexSetBuilder};

/// Allow-list: at least one of these must appear (as a substring) in the input.
pub const MEDICAL_TERMS: &[&str] = &[
    // pain and general discomfort
    "pain", "ache", "hurt", "sore", "tender", "swelling", "inflammation",
    // temperature
    "fever", "temperature", "hot", "cold", "chills", "sweating",
    // head
    "headache", "migraine", "dizziness", "vertigo", "lightheaded",
    // digestive
    "nausea", "vomiting", "diarrhea", "constipation", "stomach", "abdomen",
    // respiratory
    "cough", "sneeze", "runny nose", "congestion", "breathing", "shortness of breath",
    // cardiac
    "chest pain", "heart", "palpitations", "irregular heartbeat",
    // skin and allergy
    "rash", "itch", "hives", "allergic", "allergy", "skin",
    // musculoskeletal
    "joint", "muscle", "bone", "fracture", "sprain", "strain",
    // energy
    "fatigue", "tired", "weakness", "lethargy", "exhaustion",
    // sleep and mood
    "insomnia", "sleep", "restless", "anxiety", "depression", "mood",
    // appetite and weight
    "appetite", "weight", "loss", "gain", "thirst", "urination",
    // senses
    "vision", "eye", "blind", "blur", "hearing", "ear", "deaf",
    // neurological
    "memory", "confusion", "disorientation", "seizure", "convulsion",
    "numbness", "tingling", "paralysis", "tremor",
    // injury
    "bleeding", "bruise", "cut", "wound", "infection", "pus",
    // growths
    "lump", "tumor", "cancer", "cancerous", "benign", "malignant",
    // chronic conditions
    "diabetes", "hypertension", "blood pressure", "cholesterol",
    "asthma", "bronchitis", "pneumonia", "tuberculosis",
    "arthritis", "rheumatoid", "osteoarthritis", "gout",
    "ulcer", "gastritis", "acid reflux", "heartburn",
    // organs and systems
    "kidney", "liver", "gallbladder", "pancreas", "thyroid",
    "hormone", "endocrine", "metabolic", "immune", "autoimmune",
    // pathogens
    "virus", "bacterial", "fungal", "parasite",
    // medication
    "medication", "medicine", "drug", "prescription", "dosage",
    "side effect", "allergic reaction", "overdose", "withdrawal",
    // care vocabulary
    "symptom", "condition", "disease", "illness", "sick", "unwell",
    "diagnosis", "prognosis", "treatment", "therapy", "recovery",
    "prevention", "vaccine", "immunization", "screening", "test",
];

/// Deny-list: any match vetoes the request, even when medical terms are present.
pub const OFF_TOPIC_PATTERNS: &[&str] = &[
    // security and fraud
    r"how to hack",
    r"password",
    r"credit card",
    r"bank account",
    r"social security",
    r"spam",
    r"scam",
    r"phishing",
    r"malware",
    r"virus computer",
    // money
    r"make money",
    r"get rich",
    r"lottery",
    r"gambling",
    r"business",
    r"investment",
    r"stock market",
    r"crypto",
    r"bitcoin",
    // harmful or illegal
    r"illegal",
    r"weapon",
    r"bomb",
    r"explosive",
    r"drug dealer",
    r"buy drugs",
    r"sell drugs",
    r"porn",
    r"adult content",
    // "do my work for me"
    r"programming",
    r"code help",
    r"math problem",
    r"homework help",
    r"essay help",
    r"write for me",
    r"translate",
    // lifestyle and entertainment
    r"weather",
    r"sports",
    r"movie",
    r"music",
    r"recipe",
    r"cooking",
    r"travel",
    r"vacation",
    r"shopping",
    r"fashion",
    r"beauty tips",
    r"relationship advice",
    r"dating",
    r"love advice",
    r"career advice",
    r"job help",
    r"politics",
    r"news",
    r"gossip",
    r"celebrity",
    r"entertainment",
];

/// Outcome of classifying one input, with enough detail to log the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted { term: String },
    Empty,
    NoMedicalTerms,
    OffTopic { pattern: String },
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Classifier {
    // stored lower-cased
    terms: Vec<String>,
    deny: RegexSet,
}

impl Classifier {
    /// Build a classifier from an allow-list of terms and a deny-list of regexes.
    ///
    /// Terms are matched as lower-cased substrings, patterns case-insensitively.
    pub fn new<T, P>(terms: T, patterns: P) -> Result<Self, Error>
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        let deny = RegexSetBuilder::new(patterns)
            .case_insensitive(true)
            .build()?;

        Ok(Self { terms, deny })
    }

    /// The built-in medical term and off-topic pattern lists.
    pub fn medical() -> Result<Self, Error> {
        Self::new(MEDICAL_TERMS, OFF_TOPIC_PATTERNS)
    }

    pub fn classify(&self, text: &str) -> Verdict {
        if text.trim().is_empty() {
            return Verdict::Empty;
        }

        let lower = text.to_lowercase();

        // deny-list wins, so look there first
        if let Some(index) = self.deny.matches(&lower).iter().next() {
            return Verdict::OffTopic {
                pattern: self.deny.patterns()[index].clone(),
            };
        }

        match self.terms.iter().find(|t| lower.contains(t.as_str())) {
            Some(term) => Verdict::Accepted { term: term.clone() },
            None => Verdict::NoMedicalTerms,
        }
    }

    pub fn accept(&self, text: &str) -> bool {
        self.classify(text).is_accepted()
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn pattern_count(&self) -> usize {
        self.deny.len()
    }
}
