//! Edit-form working copy and validation.
//!
//! The form holds the raw text the user typed; [`SpeciesForm::validate`] is
//! the single pass that turns it into a [`SpeciesPatch`] (normalized values,
//! absent-value as `None`) or a [`FormErrors`] describing what is wrong.
//! The per-field functions are public so the UI can validate live while the
//! user types.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::species::{Kingdom, Species};

// ─── Working copy ────────────────────────────────────────────────────────────

/// In-progress, possibly-invalid field values for the edit form.
///
/// Distinct from the last-confirmed [`Species`] record: the form is rebuilt
/// from the record snapshot every time edit mode is entered, so dismissed
/// edits never leak back in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeciesForm {
    pub scientific_name: String,
    pub common_name: String,
    pub kingdom: Kingdom,
    pub total_population: String,
    pub image: String,
    pub description: String,
}

impl SpeciesForm {
    /// Pre-populate the working copy from the current record values.
    pub fn from_species(sp: &Species) -> Self {
        SpeciesForm {
            scientific_name: sp.scientific_name.clone(),
            common_name: sp.common_name.clone().unwrap_or_default(),
            kingdom: sp.kingdom,
            total_population: sp
                .total_population
                .map(|n| n.to_string())
                .unwrap_or_default(),
            image: sp.image.clone().unwrap_or_default(),
            description: sp.description.clone().unwrap_or_default(),
        }
    }

    /// Run every field validator and produce either the normalized patch or
    /// the full set of field errors.
    pub fn validate(&self) -> Result<SpeciesPatch, FormErrors> {
        let scientific_name = validate_scientific_name(&self.scientific_name);
        let total_population = validate_total_population(&self.total_population);
        let image = validate_image(&self.image);

        let errors = FormErrors {
            scientific_name: scientific_name.as_ref().err().cloned(),
            total_population: total_population.as_ref().err().cloned(),
            image: image.as_ref().err().cloned(),
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(SpeciesPatch {
            scientific_name: scientific_name.unwrap_or_default(),
            common_name: normalize_optional_text(&self.common_name),
            kingdom: self.kingdom,
            total_population: total_population.unwrap_or(None),
            image: image.unwrap_or(None),
            description: normalize_optional_text(&self.description),
        })
    }
}

/// The validated, normalized field set sent to the store on every submission.
///
/// Always the full editable set – partial updates are deliberately not a
/// thing.  Identifier and author are carried outside the patch and never
/// rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesPatch {
    pub scientific_name: String,
    pub common_name: Option<String>,
    pub kingdom: Kingdom,
    pub total_population: Option<i64>,
    pub image: Option<String>,
    pub description: Option<String>,
}

/// One optional message per fallible field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub scientific_name: Option<String>,
    pub total_population: Option<String>,
    pub image: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.scientific_name.is_none()
            && self.total_population.is_none()
            && self.image.is_none()
    }
}

// ─── Field validators ────────────────────────────────────────────────────────

/// Required, non-empty after trimming.
pub fn validate_scientific_name(input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Err("Scientific name is required.".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

/// Empty input means "not tracked"; anything else must be an integer ≥ 1.
pub fn validate_total_population(input: &str) -> Result<Option<i64>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<i64>() {
        Ok(n) if n >= 1 => Ok(Some(n)),
        Ok(_) => Err("Population must be at least 1.".to_string()),
        Err(_) => Err("Population must be a whole number.".to_string()),
    }
}

/// Empty input means "no image"; anything else must parse as a URL.
pub fn validate_image(input: &str) -> Result<Option<String>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match Url::parse(trimmed) {
        Ok(_) => Ok(Some(trimmed.to_string())),
        Err(_) => Err("Image must be a valid URL.".to_string()),
    }
}

/// Trim; empty or whitespace-only becomes the absent value.
pub fn normalize_optional_text(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> SpeciesForm {
        SpeciesForm {
            scientific_name: "  Turdus merula ".into(),
            common_name: " Eurasian Blackbird ".into(),
            kingdom: Kingdom::Animalia,
            total_population: " 162000000 ".into(),
            image: " https://example.org/blackbird.jpg ".into(),
            description: "  A true thrush.  ".into(),
        }
    }

    #[test]
    fn test_validate_trims_and_normalizes() {
        let patch = filled_form().validate().unwrap();
        assert_eq!(patch.scientific_name, "Turdus merula");
        assert_eq!(patch.common_name.as_deref(), Some("Eurasian Blackbird"));
        assert_eq!(patch.total_population, Some(162_000_000));
        assert_eq!(patch.image.as_deref(), Some("https://example.org/blackbird.jpg"));
        assert_eq!(patch.description.as_deref(), Some("A true thrush."));
    }

    #[test]
    fn test_blank_scientific_name_blocks_submission() {
        for input in ["", "   ", "\t\n"] {
            let mut form = filled_form();
            form.scientific_name = input.into();
            let errors = form.validate().unwrap_err();
            assert!(errors.scientific_name.is_some());
        }
    }

    #[test]
    fn test_optional_text_fields_normalize_to_none() {
        let mut form = filled_form();
        form.common_name = "   ".into();
        form.image = "".into();
        form.description = " \n ".into();
        let patch = form.validate().unwrap();
        assert_eq!(patch.common_name, None);
        assert_eq!(patch.image, None);
        assert_eq!(patch.description, None);
    }

    #[test]
    fn test_population_empty_is_absent() {
        assert_eq!(validate_total_population(""), Ok(None));
        assert_eq!(validate_total_population("   "), Ok(None));
    }

    #[test]
    fn test_population_must_be_positive_integer() {
        assert!(validate_total_population("0").is_err());
        assert!(validate_total_population("-5").is_err());
        assert!(validate_total_population("3.5").is_err());
        assert!(validate_total_population("many").is_err());
        assert_eq!(validate_total_population("1"), Ok(Some(1)));
        assert_eq!(validate_total_population("420000"), Ok(Some(420_000)));
    }

    #[test]
    fn test_image_must_be_url() {
        assert!(validate_image("not a url").is_err());
        assert!(validate_image("example.org/no-scheme.jpg").is_err());
        assert_eq!(
            validate_image("https://example.org/ok.png"),
            Ok(Some("https://example.org/ok.png".to_string()))
        );
    }

    #[test]
    fn test_form_round_trip_from_species() {
        let sp = Species {
            id: 7,
            scientific_name: "Amanita muscaria".into(),
            common_name: Some("Fly agaric".into()),
            kingdom: Kingdom::Fungi,
            total_population: None,
            image: None,
            description: Some("Iconic red-and-white toadstool.".into()),
            author: "naturalist-12".into(),
            updated_at: None,
        };
        let form = SpeciesForm::from_species(&sp);
        assert_eq!(form.scientific_name, "Amanita muscaria");
        assert_eq!(form.total_population, "");
        let patch = form.validate().unwrap();
        assert_eq!(patch.kingdom, Kingdom::Fungi);
        assert_eq!(patch.total_population, None);
        assert_eq!(patch.common_name.as_deref(), Some("Fly agaric"));
    }
}
