//! Questionnaire validation.
//!
//! Turns a raw [`IntakeForm`] into a validated [`Intake`], or a list of
//! messages (one per field that needs attention) that blocks submission.

use crate::models::{Diet, Exercise, Gender, Intake, IntakeForm, Symptom};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Slider bounds shared by energy, sleep quality and stress level.
pub const LEVEL_MIN: u8 = 1;
pub const LEVEL_MAX: u8 = 10;
/// Slider position before the respondent moves it.
pub const LEVEL_DEFAULT: u8 = 5;

pub const AGE_MIN: u8 = 18;
pub const AGE_MAX: u8 = 100;
pub const AGE_DEFAULT: u8 = 35;

/// Placeholder the select widgets show before a choice is made.
pub const SELECT_PLACEHOLDER: &str = "Select...";

// Simplified RFC 5322: local@domain.tld
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("email regex is valid")
});

/// Validates a questionnaire submission.
///
/// All fields are checked before returning, so the caller gets every
/// problem at once. Sliders are clamped rather than rejected, and duplicate
/// symptoms collapse into one.
pub fn validate_intake(form: IntakeForm) -> Result<Intake, Vec<String>> {
    let mut errors = Vec::new();

    let name = required_text(form.name.as_deref());
    if name.is_none() {
        errors.push("Full name is required".to_string());
    }

    let email = match required_text(form.email.as_deref()) {
        Some(email) if is_valid_email(&email) => Some(email),
        Some(email) => {
            errors.push(format!("Email address is not valid: {}", email));
            None
        }
        None => {
            errors.push("Email is required".to_string());
            None
        }
    };

    let gender = match selection(form.gender.as_deref()) {
        Some(raw) => {
            let gender = Gender::ALL.into_iter().find(|g| g.label() == raw);
            if gender.is_none() {
                errors.push(format!("Unknown gender: {}", raw));
            }
            gender
        }
        None => {
            errors.push("Please select a gender".to_string());
            None
        }
    };

    let goal = required_text(form.goal.as_deref());
    if goal.is_none() {
        errors.push("Primary health goal is required".to_string());
    }

    let age = match form.age {
        None => AGE_DEFAULT,
        Some(age) if (i64::from(AGE_MIN)..=i64::from(AGE_MAX)).contains(&age) => age as u8,
        Some(age) => {
            errors.push(format!(
                "Age must be between {} and {} (got {})",
                AGE_MIN, AGE_MAX, age
            ));
            AGE_DEFAULT
        }
    };

    let symptoms = match parse_symptoms(&form.symptoms) {
        Ok(symptoms) => symptoms,
        Err(unknown) => {
            errors.extend(unknown.into_iter().map(|s| format!("Unknown symptom: {}", s)));
            BTreeSet::new()
        }
    };

    let diet = match selection(form.diet.as_deref()) {
        Some(raw) => {
            let diet = Diet::ALL.into_iter().find(|d| d.label() == raw);
            if diet.is_none() {
                errors.push(format!("Unknown diet type: {}", raw));
            }
            diet
        }
        None => None,
    };

    let exercise = match selection(form.exercise.as_deref()) {
        Some(raw) => {
            let exercise = Exercise::ALL.into_iter().find(|e| e.label() == raw);
            if exercise.is_none() {
                errors.push(format!("Unknown exercise frequency: {}", raw));
            }
            exercise
        }
        None => None,
    };

    match (name, email, gender, goal) {
        (Some(name), Some(email), Some(gender), Some(goal)) if errors.is_empty() => Ok(Intake {
            name,
            email,
            age,
            gender,
            energy: clamp_level(form.energy),
            sleep_quality: clamp_level(form.sleep_quality),
            stress_level: clamp_level(form.stress_level),
            symptoms,
            diet,
            exercise,
            goal,
        }),
        _ => Err(errors),
    }
}

/// Clamps a slider value into `LEVEL_MIN..=LEVEL_MAX`; absent means the default.
pub fn clamp_level(value: Option<i64>) -> u8 {
    match value {
        Some(v) => v.clamp(i64::from(LEVEL_MIN), i64::from(LEVEL_MAX)) as u8,
        None => LEVEL_DEFAULT,
    }
}

/// Maps labels onto the symptom catalog, dropping duplicates.
///
/// Returns the unknown labels (in submission order) if any label is not in
/// the catalog.
pub fn parse_symptoms(labels: &[String]) -> Result<BTreeSet<Symptom>, Vec<String>> {
    let mut symptoms = BTreeSet::new();
    let mut unknown = Vec::new();

    for label in labels {
        match Symptom::from_label(label) {
            Some(symptom) => {
                symptoms.insert(symptom);
            }
            None => unknown.push(label.trim().to_string()),
        }
    }

    if unknown.is_empty() {
        Ok(symptoms)
    } else {
        Err(unknown)
    }
}

/// Basic email plausibility check: length, an `@`, and a dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < 5 || !email.contains('@') || !email.contains('.') {
        return false;
    }
    EMAIL_REGEX.is_match(email)
}

fn required_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// A select-box value; the placeholder counts as no selection.
fn selection(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != SELECT_PLACEHOLDER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_level() {
        assert_eq!(clamp_level(Some(0)), 1);
        assert_eq!(clamp_level(Some(-4)), 1);
        assert_eq!(clamp_level(Some(7)), 7);
        assert_eq!(clamp_level(Some(11)), 10);
        assert_eq!(clamp_level(None), 5);
    }

    #[test]
    fn test_parse_symptoms_dedupes() {
        let labels = vec![
            "Brain Fog".to_string(),
            " Brain Fog ".to_string(),
            "Headaches".to_string(),
        ];
        let symptoms = parse_symptoms(&labels).unwrap();
        assert_eq!(symptoms.len(), 2);
    }

    #[test]
    fn test_parse_symptoms_reports_unknown() {
        let labels = vec!["Brain Fog".to_string(), "Hiccups".to_string()];
        assert_eq!(parse_symptoms(&labels).unwrap_err(), vec!["Hiccups"]);
    }

    #[test]
    fn test_selection_placeholder() {
        assert_eq!(selection(Some("Select...")), None);
        assert_eq!(selection(Some("  ")), None);
        assert_eq!(selection(Some("Keto")), Some("Keto"));
    }

    #[test]
    fn test_email_plausibility() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.co"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user example@test.com"));
        assert!(!is_valid_email("a@b"));
    }
}
