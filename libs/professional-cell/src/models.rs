use serde::{Deserialize, Serialize};

use scheduling_cell::models::AvailabilityWindow;

/// Categories a professional can register under, with the specialties each
/// one admits. Profile writes are validated against this table before any
/// document is persisted.
pub const CATEGORY_SPECIALTIES: [(&str, &[&str]); 4] = [
    (
        "Médecin",
        &[
            "Médecine générale",
            "Cardiologie",
            "Dermatologie",
            "Pédiatrie",
            "Gynécologie",
        ],
    ),
    ("Psychologue", &["Psychologie clinique", "Psychothérapie"]),
    ("Nutritionniste", &["Nutrition", "Diététique"]),
    ("Sage-femme", &["Suivi de grossesse", "Planification familiale"]),
];

pub fn specialties_for_category(category: &str) -> Option<&'static [&'static str]> {
    CATEGORY_SPECIALTIES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, specialties)| *specialties)
}

pub fn category_for_specialty(specialty: &str) -> Option<&'static str> {
    CATEGORY_SPECIALTIES
        .iter()
        .find(|(_, specialties)| specialties.contains(&specialty))
        .map(|(name, _)| *name)
}

/// Silently persisting an inconsistent category/specialty pair would corrupt
/// later reads, so writes are checked eagerly and rejected with a message.
pub fn validate_category_consistency(
    category: &str,
    specialties: &[String],
) -> Result<(), String> {
    let Some(allowed) = specialties_for_category(category) else {
        return Err(format!("Unknown category '{}'", category));
    };

    for specialty in specialties {
        if !allowed.contains(&specialty.as_str()) {
            return Err(format!(
                "Specialty '{}' does not belong to category '{}'",
                specialty, category
            ));
        }
    }

    Ok(())
}

/// Canonical in-memory profile shape. Every read goes through
/// `ProfileDocument::normalize`; nothing downstream branches on which
/// document generation a profile was stored as.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalProfile {
    pub id: String,
    pub full_name: String,
    pub category: String,
    pub specialties: Vec<String>,
    pub bio: Option<String>,
    pub availability: Vec<AvailabilityWindow>,
}

/// Stored profile document, either generation. Current documents carry
/// `category`/`specialties`; legacy ones carry `specialty`/`type`. The
/// presence of `category` selects the current shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProfileDocument {
    Current(CurrentProfileDocument),
    Legacy(LegacyProfileDocument),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentProfileDocument {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub category: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub availability: Vec<AvailabilityWindow>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyProfileDocument {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub availability: Vec<AvailabilityWindow>,
}

impl ProfileDocument {
    /// Single migration step executed once on read. Legacy `type` becomes the
    /// category; when only `specialty` survives, the category is recovered
    /// through the fixed table, falling back to the specialty itself.
    pub fn normalize(self) -> ProfessionalProfile {
        match self {
            ProfileDocument::Current(doc) => ProfessionalProfile {
                id: doc.id,
                full_name: doc.full_name.unwrap_or_default(),
                category: doc.category,
                specialties: doc.specialties,
                bio: doc.bio,
                availability: doc.availability,
            },
            ProfileDocument::Legacy(doc) => {
                let category = doc
                    .kind
                    .clone()
                    .or_else(|| {
                        doc.specialty
                            .as_deref()
                            .and_then(category_for_specialty)
                            .map(String::from)
                    })
                    .or_else(|| doc.specialty.clone())
                    .unwrap_or_default();

                ProfessionalProfile {
                    id: doc.id,
                    full_name: doc.full_name.unwrap_or_default(),
                    category,
                    specialties: doc.specialty.into_iter().collect(),
                    bio: doc.bio,
                    availability: doc.availability,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub category: Option<String>,
    pub specialties: Option<Vec<String>>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityWindowInput {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetAvailabilityRequest {
    pub windows: Vec<AvailabilityWindowInput>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProfessionalError {
    #[error("Professional not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
