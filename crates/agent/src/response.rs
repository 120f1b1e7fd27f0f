//! Templated responses
//!
//! Loan intents have several phrasing variants; one is picked at random per
//! call. Templates may contain typed placeholders that are substituted at
//! render time. Intents without templates fall back to fixed texts.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashMap;

use loan_assistant_core::intents;
use loan_assistant_text_processing::ExtractedEntities;

/// Appended when the user sounds urgent
pub const URGENCY_SUFFIX: &str =
    " For urgent processing, please contact our support team immediately.";

pub const GREETING_FALLBACK: &str =
    "Hello! Welcome to our banking services. How can I help you today with your loan queries?";
pub const FAREWELL_FALLBACK: &str =
    "Thank you for chatting with us! Have a great day. Feel free to return if you have more questions.";
pub const UNKNOWN_FALLBACK: &str =
    "I'm here to help with your loan queries. You can ask me about loan types, application process, EMI details, documents, or contact information. What would you like to know?";

const DEFAULT_LOAN_TYPES: &str = "business loans, gold loans, and vehicle loans";

/// Template placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// Comma-separated list of offered loan products
    LoanTypes,
}

impl Placeholder {
    pub const ALL: [Placeholder; 1] = [Placeholder::LoanTypes];

    /// Token as written in templates
    pub fn token(&self) -> &'static str {
        match self {
            Placeholder::LoanTypes => "{loan_types}",
        }
    }
}

/// Response generator
pub struct ResponseGenerator {
    templates: HashMap<String, Vec<String>>,
    substitutions: HashMap<Placeholder, String>,
    rng: Mutex<StdRng>,
}

impl Default for ResponseGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseGenerator {
    /// Built-in templates, randomly seeded
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Built-in templates with a fixed seed for reproducible selection
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut substitutions = HashMap::new();
        substitutions.insert(Placeholder::LoanTypes, DEFAULT_LOAN_TYPES.to_string());

        Self {
            templates: Self::builtin_templates(),
            substitutions,
            rng: Mutex::new(rng),
        }
    }

    fn builtin_templates() -> HashMap<String, Vec<String>> {
        let entries: [(&str, [&str; 3]); 4] = [
            (
                intents::LOAN_GENERAL,
                [
                    "We offer {loan_types}. Which type interests you?",
                    "Our main loan products are {loan_types}. What would you like to know?",
                    "You can choose from {loan_types}. Which one are you interested in?",
                ],
            ),
            (
                intents::VEHICLE_LOAN,
                [
                    "We offer vehicle loans specifically for bikes and two-wheelers with competitive interest rates and flexible repayment options. You'll need valid ID proof, address proof, income proof, and bike details. The loan amount depends on the bike value and your eligibility. Contact us for current rates and application process.",
                    "Vehicle loans are available for bikes and two-wheelers. Our rates are competitive and we offer flexible terms. Required documents include ID proof, address proof, income proof, and bike details.",
                    "For vehicle loans (bikes and two-wheelers), we provide competitive rates and easy documentation. The loan amount is based on bike value and your eligibility.",
                ],
            ),
            (
                intents::GOLD_LOAN,
                [
                    "Yes, we provide gold loans. You'll need valid ID proof, address proof, and gold items to pledge. The loan amount depends on the gold value and purity.",
                    "Gold loans are available with your gold as collateral. Required documents include ID proof, address proof, and gold items. Loan amount depends on gold value and purity.",
                    "We offer gold loans where you can pledge your gold jewelry. Documentation includes ID proof, address proof, and gold items.",
                ],
            ),
            (
                intents::BUSINESS_LOAN,
                [
                    "You can apply for a business loan through our website, mobile app, or by visiting your nearest branch. Our team will guide you through the entire process.",
                    "Business loans are available online and offline. Our team provides complete guidance throughout the application process.",
                    "For business loans, you can apply online or visit any branch. We offer comprehensive support during the application.",
                ],
            ),
        ];

        entries
            .into_iter()
            .map(|(intent, variants)| {
                (
                    intent.to_string(),
                    variants.iter().map(|v| v.to_string()).collect(),
                )
            })
            .collect()
    }

    /// Override a placeholder value
    pub fn set_substitution(&mut self, placeholder: Placeholder, value: impl Into<String>) {
        self.substitutions.insert(placeholder, value.into());
    }

    /// Replace or add the variants of one intent
    pub fn set_templates(&mut self, intent: impl Into<String>, variants: Vec<String>) {
        self.templates.insert(intent.into(), variants);
    }

    pub fn has_templates(&self, intent: &str) -> bool {
        self.templates.get(intent).is_some_and(|v| !v.is_empty())
    }

    fn render(&self, template: &str) -> String {
        Placeholder::ALL
            .iter()
            .fold(template.to_string(), |text, placeholder| {
                match self.substitutions.get(placeholder) {
                    Some(value) => text.replace(placeholder.token(), value),
                    None => text,
                }
            })
    }

    /// Every rendered variant for an intent, without any suffix
    pub fn variants(&self, intent: &str) -> Vec<String> {
        match self.templates.get(intent).filter(|v| !v.is_empty()) {
            Some(variants) => variants.iter().map(|t| self.render(t)).collect(),
            None => vec![Self::fallback(intent).to_string()],
        }
    }

    /// Fixed text for intents without templates
    pub fn fallback(intent: &str) -> &'static str {
        match intent {
            intents::GREETING => GREETING_FALLBACK,
            intents::FAREWELL => FAREWELL_FALLBACK,
            _ => UNKNOWN_FALLBACK,
        }
    }

    /// Render a response for an intent
    ///
    /// Urgent requests get the urgency suffix appended to templated
    /// responses; fallbacks are returned unchanged.
    pub fn generate(&self, intent: &str, entities: &ExtractedEntities) -> String {
        let template = match self.templates.get(intent) {
            Some(variants) => variants.choose(&mut *self.rng.lock()).cloned(),
            None => None,
        };

        let Some(template) = template else {
            return Self::fallback(intent).to_string();
        };

        let mut response = self.render(&template);
        if entities.is_urgent() {
            response.push_str(URGENCY_SUFFIX);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_assistant_text_processing::Urgency;

    fn urgent() -> ExtractedEntities {
        ExtractedEntities {
            urgency: Some(Urgency::High),
            ..Default::default()
        }
    }

    #[test]
    fn test_loan_types_substituted() {
        let generator = ResponseGenerator::new();
        for variant in generator.variants("loan_general") {
            assert!(variant.contains("business loans, gold loans, and vehicle loans"));
            assert!(!variant.contains("{loan_types}"));
        }
    }

    #[test]
    fn test_generate_picks_a_variant() {
        let generator = ResponseGenerator::new();
        let variants = generator.variants("gold_loan");
        assert_eq!(variants.len(), 3);

        for _ in 0..20 {
            let response = generator.generate("gold_loan", &ExtractedEntities::default());
            assert!(variants.contains(&response));
        }
    }

    #[test]
    fn test_seeded_generators_agree() {
        let a = ResponseGenerator::with_seed(7);
        let b = ResponseGenerator::with_seed(7);
        let entities = ExtractedEntities::default();

        for _ in 0..10 {
            assert_eq!(
                a.generate("vehicle_loan", &entities),
                b.generate("vehicle_loan", &entities)
            );
        }
    }

    #[test]
    fn test_urgency_suffix() {
        let generator = ResponseGenerator::with_seed(1);
        let response = generator.generate("business_loan", &urgent());

        assert!(response.ends_with(URGENCY_SUFFIX));
        let base = response.trim_end_matches(URGENCY_SUFFIX).to_string();
        assert!(generator.variants("business_loan").contains(&base));
    }

    #[test]
    fn test_fallbacks() {
        let generator = ResponseGenerator::new();
        let none = ExtractedEntities::default();

        assert_eq!(generator.generate("greeting", &none), GREETING_FALLBACK);
        assert_eq!(generator.generate("farewell", &none), FAREWELL_FALLBACK);
        assert_eq!(generator.generate("unknown", &none), UNKNOWN_FALLBACK);
        assert_eq!(generator.generate("emi", &none), UNKNOWN_FALLBACK);
        // Fallbacks never carry the urgency suffix
        assert_eq!(generator.generate("urgent", &urgent()), UNKNOWN_FALLBACK);
    }

    #[test]
    fn test_custom_substitution_and_templates() {
        let mut generator = ResponseGenerator::with_seed(3);
        generator.set_substitution(Placeholder::LoanTypes, "gold loans");
        generator.set_templates("emi", vec!["EMI for {loan_types} is flexible.".to_string()]);

        assert!(generator.has_templates("emi"));
        assert_eq!(
            generator.generate("emi", &ExtractedEntities::default()),
            "EMI for gold loans is flexible."
        );
    }

    #[test]
    fn test_empty_template_list_uses_fallback() {
        let mut generator = ResponseGenerator::new();
        generator.set_templates("greeting", Vec::new());

        assert!(!generator.has_templates("greeting"));
        assert_eq!(
            generator.generate("greeting", &ExtractedEntities::default()),
            GREETING_FALLBACK
        );
    }
}
