//! Rule-based wellness analysis.
//!
//! Maps a validated [`Intake`] to an [`AnalysisResult`]. The rules are
//! evaluated in a fixed order and several of them look at how many entries
//! the earlier rules produced, so the order of the checks below is part of
//! the behavior.

use crate::models::{AnalysisResult, Deficiency, Imbalance, Intake, Product, Severity, Symptom};
use bigdecimal::BigDecimal;
use sha2::{Digest, Sha256};

/// Lowest score ever reported.
pub const SCORE_FLOOR: i64 = 50;
/// Points deducted per reported symptom.
pub const SYMPTOM_PENALTY: u32 = 2;
/// Maximum number of deficiencies in a result.
pub const MAX_DEFICIENCIES: usize = 3;
/// Maximum number of products in a result.
pub const MAX_PRODUCTS: usize = 4;

const MAGNESIUM: (&str, Severity, &str) = (
    "Magnesium",
    Severity::High,
    "Energy production, sleep quality, stress response",
);
const VITAMIN_D3: (&str, Severity, &str) = (
    "Vitamin D3",
    Severity::Moderate,
    "Immune function, mood regulation, bone health",
);
const OMEGA_3: (&str, Severity, &str) = (
    "Omega-3 Fatty Acids",
    Severity::Moderate,
    "Brain function, inflammation reduction, cardiovascular health",
);
const B_COMPLEX: (&str, Severity, &str) = (
    "B-Complex Vitamins",
    Severity::Low,
    "Energy metabolism, nervous system function",
);

const ADRENAL: (&str, &str, &str) = (
    "Adrenal System",
    "Depleted",
    "Your stress levels suggest adrenal fatigue.",
);
const DIGESTIVE: (&str, &str, &str) = (
    "Digestive System",
    "Compromised",
    "Digestive issues indicate potential gut dysbiosis.",
);
const DETOX: (&str, &str, &str) = (
    "Detoxification Pathways",
    "Sluggish",
    "Multiple symptoms suggest sluggish detoxification.",
);

/// Second action step when no deficiency was derived.
const FALLBACK_FOCUS: &str = "Focus on nutrient-dense whole foods";

/// (name, price in cents, benefit)
const PRODUCT_CATALOG: [(&str, i64, &str); 4] = [
    ("Bio-Optimized Magnesium Complex", 3499, "Energy and sleep support"),
    ("Vitamin D3 + K2 (5000 IU)", 2499, "Immune and mood support"),
    ("Premium Omega-3 Fish Oil", 4299, "Brain health and inflammation"),
    ("Adrenal Support Blend", 3999, "Stress resilience"),
];

/// Runs the full analysis for one intake.
pub fn analyze(intake: &Intake) -> AnalysisResult {
    let overall_score = wellness_score(
        intake.energy,
        intake.sleep_quality,
        intake.stress_level,
        intake.symptoms.len(),
    );
    let deficiencies = derive_deficiencies(intake);
    let imbalances = derive_imbalances(intake);
    let recommendations = build_recommendations(&deficiencies);
    let products = product_catalog().into_iter().take(MAX_PRODUCTS).collect();

    tracing::debug!(
        "Analysis complete: score={}, deficiencies={}, imbalances={}",
        overall_score,
        deficiencies.len(),
        imbalances.len()
    );

    AnalysisResult {
        overall_score,
        deficiencies,
        imbalances,
        recommendations,
        products,
    }
}

/// Computes the wellness score.
///
/// Energy, sleep and inverted stress are averaged and scaled by ten, each
/// symptom costs [`SYMPTOM_PENALTY`] points, and the result is truncated to
/// an integer before the floor of [`SCORE_FLOOR`] is applied.
pub fn wellness_score(energy: u8, sleep_quality: u8, stress_level: u8, symptom_count: usize) -> u32 {
    let stress_inverse = 10.0 - f64::from(stress_level);
    let penalty = f64::from(SYMPTOM_PENALTY) * symptom_count as f64;
    let base = ((f64::from(energy) + f64::from(sleep_quality) + stress_inverse) / 3.0) * 10.0;

    let raw = (base - penalty).trunc() as i64;
    raw.max(SCORE_FLOOR) as u32
}

/// Derives the likely deficiencies, in rule order.
///
/// The B-Complex fallback looks at the count after the first three rules
/// have all run, not after each one.
pub fn derive_deficiencies(intake: &Intake) -> Vec<Deficiency> {
    let mut found = Vec::with_capacity(MAX_DEFICIENCIES + 1);

    if intake.energy < 6 || intake.has_symptom(Symptom::ChronicFatigue) {
        found.push(deficiency(MAGNESIUM));
    }
    if intake.sleep_quality < 6 || intake.has_symptom(Symptom::SleepIssues) {
        found.push(deficiency(VITAMIN_D3));
    }
    if intake.has_symptom(Symptom::BrainFog) || intake.has_symptom(Symptom::Inflammation) {
        found.push(deficiency(OMEGA_3));
    }
    if found.len() < MAX_DEFICIENCIES {
        found.push(deficiency(B_COMPLEX));
    }

    found.truncate(MAX_DEFICIENCIES);
    found
}

/// Derives the system imbalances.
///
/// The adrenal check is independent. The digestive and detoxification
/// checks are an if / else-if pair, so at most one of them fires.
pub fn derive_imbalances(intake: &Intake) -> Vec<Imbalance> {
    let mut found = Vec::with_capacity(2);

    if intake.stress_level > 6 || intake.energy < 5 {
        found.push(imbalance(ADRENAL));
    }

    if intake.has_symptom(Symptom::DigestiveIssues) {
        found.push(imbalance(DIGESTIVE));
    } else if found.len() < 2 {
        found.push(imbalance(DETOX));
    }

    found
}

/// Builds the five action steps. The second one names the first deficiency.
pub fn build_recommendations(deficiencies: &[Deficiency]) -> Vec<String> {
    let focus = match deficiencies.first() {
        Some(first) => format!("Focus on {}-rich foods", first.name),
        None => FALLBACK_FOCUS.to_string(),
    };

    vec![
        "Begin with bio-energetic testing to identify precise deficiencies".to_string(),
        focus,
        "Optimize sleep hygiene: consistent bedtime, dark room".to_string(),
        "Incorporate stress-reduction practices daily".to_string(),
        "Consider an elimination diet to identify sensitivities".to_string(),
    ]
}

/// The fixed supplement catalog, in display order.
pub fn product_catalog() -> Vec<Product> {
    PRODUCT_CATALOG
        .iter()
        .map(|(name, cents, benefit)| Product {
            name: name.to_string(),
            price: BigDecimal::new((*cents).into(), 2),
            benefit: benefit.to_string(),
        })
        .collect()
}

fn deficiency((name, severity, impact): (&str, Severity, &str)) -> Deficiency {
    Deficiency {
        name: name.to_string(),
        severity,
        impact: impact.to_string(),
    }
}

fn imbalance((system, status, description): (&str, &str, &str)) -> Imbalance {
    Imbalance {
        system: system.to_string(),
        status: status.to_string(),
        description: description.to_string(),
    }
}

impl AnalysisResult {
    /// SHA-256 (hex) of the JSON encoding.
    ///
    /// Two results with the same fingerprint serialize to the same bytes.
    pub fn fingerprint(&self) -> String {
        let encoded = serde_json::to_vec(self).expect("AnalysisResult serializes");
        hex::encode(Sha256::digest(&encoded))
    }
}
