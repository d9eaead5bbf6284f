use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ============ Questionnaire Catalog ============

/// Symptoms a respondent can tick on the questionnaire.
///
/// The catalog is closed: anything outside these twelve labels is rejected
/// during intake validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Symptom {
    #[serde(rename = "Chronic Fatigue")]
    ChronicFatigue,
    #[serde(rename = "Brain Fog")]
    BrainFog,
    #[serde(rename = "Digestive Issues")]
    DigestiveIssues,
    #[serde(rename = "Joint Pain")]
    JointPain,
    #[serde(rename = "Anxiety/Depression")]
    AnxietyDepression,
    #[serde(rename = "Skin Problems")]
    SkinProblems,
    #[serde(rename = "Sleep Issues")]
    SleepIssues,
    #[serde(rename = "Weight Gain")]
    WeightGain,
    #[serde(rename = "Hormonal Imbalance")]
    HormonalImbalance,
    #[serde(rename = "Low Immunity")]
    LowImmunity,
    #[serde(rename = "Headaches")]
    Headaches,
    #[serde(rename = "Inflammation")]
    Inflammation,
}

impl Symptom {
    /// All symptoms in the order the questionnaire shows them.
    pub const ALL: [Symptom; 12] = [
        Symptom::ChronicFatigue,
        Symptom::BrainFog,
        Symptom::DigestiveIssues,
        Symptom::JointPain,
        Symptom::AnxietyDepression,
        Symptom::SkinProblems,
        Symptom::SleepIssues,
        Symptom::WeightGain,
        Symptom::HormonalImbalance,
        Symptom::LowImmunity,
        Symptom::Headaches,
        Symptom::Inflammation,
    ];

    /// Display label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Symptom::ChronicFatigue => "Chronic Fatigue",
            Symptom::BrainFog => "Brain Fog",
            Symptom::DigestiveIssues => "Digestive Issues",
            Symptom::JointPain => "Joint Pain",
            Symptom::AnxietyDepression => "Anxiety/Depression",
            Symptom::SkinProblems => "Skin Problems",
            Symptom::SleepIssues => "Sleep Issues",
            Symptom::WeightGain => "Weight Gain",
            Symptom::HormonalImbalance => "Hormonal Imbalance",
            Symptom::LowImmunity => "Low Immunity",
            Symptom::Headaches => "Headaches",
            Symptom::Inflammation => "Inflammation",
        }
    }

    /// Looks up a symptom by its label (surrounding whitespace ignored).
    pub fn from_label(label: &str) -> Option<Symptom> {
        let label = label.trim();
        Symptom::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diet {
    Standard,
    Mediterranean,
    Keto,
    Vegan,
    Paleo,
}

impl Diet {
    pub const ALL: [Diet; 5] = [
        Diet::Standard,
        Diet::Mediterranean,
        Diet::Keto,
        Diet::Vegan,
        Diet::Paleo,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Diet::Standard => "Standard",
            Diet::Mediterranean => "Mediterranean",
            Diet::Keto => "Keto",
            Diet::Vegan => "Vegan",
            Diet::Paleo => "Paleo",
        }
    }
}

/// Weekly exercise frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Exercise {
    Rarely,
    #[serde(rename = "1-2x/week")]
    OneToTwoPerWeek,
    #[serde(rename = "3-4x/week")]
    ThreeToFourPerWeek,
    #[serde(rename = "5+x/week")]
    FivePlusPerWeek,
}

impl Exercise {
    pub const ALL: [Exercise; 4] = [
        Exercise::Rarely,
        Exercise::OneToTwoPerWeek,
        Exercise::ThreeToFourPerWeek,
        Exercise::FivePlusPerWeek,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Exercise::Rarely => "Rarely",
            Exercise::OneToTwoPerWeek => "1-2x/week",
            Exercise::ThreeToFourPerWeek => "3-4x/week",
            Exercise::FivePlusPerWeek => "5+x/week",
        }
    }
}

// ============ Intake ============

/// Validated questionnaire answers.
///
/// Built by [`crate::intake::validate_intake`]; the wellness levels are
/// always within `1..=10` and the symptom set only holds catalog entries.
/// Contact and lifestyle fields are carried for the booking flow and never
/// read by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intake {
    pub name: String,
    pub email: String,
    pub age: u8,
    pub gender: Gender,
    /// Energy level, 1 (exhausted) to 10.
    pub energy: u8,
    /// Sleep quality, 1 (poor) to 10.
    pub sleep_quality: u8,
    /// Stress level, 1 (calm) to 10.
    pub stress_level: u8,
    pub symptoms: BTreeSet<Symptom>,
    pub diet: Option<Diet>,
    pub exercise: Option<Exercise>,
    pub goal: String,
}

impl Intake {
    pub fn has_symptom(&self, symptom: Symptom) -> bool {
        self.symptoms.contains(&symptom)
    }
}

/// Raw questionnaire submission, exactly as the form posts it.
///
/// Every field is optional here; presence and ranges are enforced by
/// [`crate::intake::validate_intake`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IntakeForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub energy: Option<i64>,
    /// Accepts `sleep` as well, the questionnaire's field name.
    #[serde(default, alias = "sleep")]
    pub sleep_quality: Option<i64>,
    #[serde(default, alias = "stress")]
    pub stress_level: Option<i64>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub diet: Option<String>,
    #[serde(default)]
    pub exercise: Option<String>,
    #[serde(default)]
    pub goal: Option<String>,
}

// ============ Analysis Output ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    High,
    Moderate,
    Low,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::High => "High",
            Severity::Moderate => "Moderate",
            Severity::Low => "Low",
        };
        f.write_str(label)
    }
}

/// A suspected nutrient shortfall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deficiency {
    pub name: String,
    pub severity: Severity,
    /// What the nutrient affects, shown as "Affects: ..." on the card.
    pub impact: String,
}

/// A suspected dysregulated body system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Imbalance {
    pub system: String,
    pub status: String,
    pub description: String,
}

/// A supplement from the fixed product catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    /// Price in USD, serialized as a decimal string (e.g. `"34.99"`).
    pub price: BigDecimal,
    pub benefit: String,
}

/// Outcome of a single analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Wellness score, never below 50.
    pub overall_score: u32,
    /// At most three, in rule order.
    pub deficiencies: Vec<Deficiency>,
    pub imbalances: Vec<Imbalance>,
    pub recommendations: Vec<String>,
    pub products: Vec<Product>,
}
