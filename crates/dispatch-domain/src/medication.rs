//! Medication payload items and their validation.

use serde::{Deserialize, Serialize};

use crate::error::{BatchLoadError, LoadFailure, ValidationError};

/// One medication payload item.
///
/// Validity is checked exactly once, at construction; a `Medication` is
/// immutable afterwards and owned by exactly one drone once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Medication {
    name: String,
    code: String,
    weight: u32,
    image: Option<String>,
}

/// Wire descriptor for a medication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationDescriptor {
    /// Allowed characters: letters, numbers, `-`, `_`.
    pub name: String,
    /// Allowed characters: upper-case letters, numbers, `_`.
    pub code: String,
    /// Weight in grams.
    pub weight: u32,
    /// Picture of the medication case, base64-encoded. Opaque: never
    /// decoded or validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Medication {
    /// Validate and construct a medication. Pure: no side effects.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidName`] or [`ValidationError::InvalidCode`]
    /// when the respective field is empty or contains a character outside
    /// its charset.
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        weight: u32,
        image: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if !valid_name(&name) {
            return Err(ValidationError::InvalidName(name));
        }

        let code = code.into();
        if !valid_code(&code) {
            return Err(ValidationError::InvalidCode(code));
        }

        Ok(Self {
            name,
            code,
            weight,
            image,
        })
    }

    /// Construct a medication from its wire descriptor.
    ///
    /// # Errors
    ///
    /// Same as [`Medication::new`].
    pub fn from_descriptor(dto: &MedicationDescriptor) -> Result<Self, ValidationError> {
        Self::new(
            dto.name.clone(),
            dto.code.clone(),
            dto.weight,
            dto.image.clone(),
        )
    }

    /// Convert a batch of descriptors, stopping at the first invalid one.
    ///
    /// # Errors
    ///
    /// On failure the error reports how many descriptors converted before
    /// the bad one; the already-converted items are dropped with it.
    pub fn from_descriptors(
        dtos: &[MedicationDescriptor],
    ) -> Result<Vec<Self>, BatchLoadError> {
        let mut medications = Vec::with_capacity(dtos.len());

        for dto in dtos {
            match Self::from_descriptor(dto) {
                Ok(medication) => medications.push(medication),
                Err(err) => {
                    return Err(BatchLoadError {
                        loaded: medications.len(),
                        total: dtos.len(),
                        source: LoadFailure::Invalid(err),
                    });
                }
            }
        }

        Ok(medications)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Weight in grams.
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Descriptor with the image payload stripped.
    pub fn descriptor(&self) -> MedicationDescriptor {
        MedicationDescriptor {
            name: self.name.clone(),
            code: self.code.clone(),
            weight: self.weight,
            image: None,
        }
    }

    /// Descriptor including the base64 image, when one was supplied.
    pub fn descriptor_with_image(&self) -> MedicationDescriptor {
        MedicationDescriptor {
            image: self.image.clone(),
            ..self.descriptor()
        }
    }
}

fn valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn valid_code(code: &str) -> bool {
    !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str, code: &str, weight: u32) -> MedicationDescriptor {
        MedicationDescriptor {
            name: name.to_owned(),
            code: code.to_owned(),
            weight,
            image: None,
        }
    }

    #[test]
    fn test_valid_names_accepted() {
        for name in ["Medication-A", "med_42", "A", "0-0_0"] {
            assert!(
                Medication::new(name, "CODE_A", 10, None).is_ok(),
                "name {name:?} should be accepted"
            );
        }
    }

    #[test]
    fn test_invalid_names_rejected() {
        for name in ["", "med name", "med!x", "áspirin", "a?b"] {
            let err = Medication::new(name, "CODE_A", 10, None).unwrap_err();
            assert_eq!(err, ValidationError::InvalidName(name.to_owned()));
        }
    }

    #[test]
    fn test_valid_codes_accepted() {
        for code in ["CODE_A", "X", "42", "A_1_B"] {
            assert!(
                Medication::new("med", code, 10, None).is_ok(),
                "code {code:?} should be accepted"
            );
        }
    }

    #[test]
    fn test_invalid_codes_rejected() {
        // Lower-case letters and hyphens are valid in names but not codes.
        for code in ["", "code_a", "CODE-A", "C O", "Ç"] {
            let err = Medication::new("med", code, 10, None).unwrap_err();
            assert_eq!(err, ValidationError::InvalidCode(code.to_owned()));
        }
    }

    #[test]
    fn test_zero_weight_allowed() {
        let medication = Medication::new("empty-case", "EMPTY", 0, None).unwrap();
        assert_eq!(medication.weight(), 0);
    }

    #[test]
    fn test_batch_conversion_reports_partial_progress() {
        let dtos = vec![
            descriptor("Medication-A", "CODE_A", 20),
            descriptor("Medication-B", "CODE_B", 40),
            descriptor("Medication-C", "bad-code", 25),
            descriptor("Medication-D", "CODE_D", 10),
        ];

        let err = Medication::from_descriptors(&dtos).unwrap_err();
        assert_eq!(err.loaded, 2);
        assert_eq!(err.total, 4);
        assert_eq!(
            err.source,
            LoadFailure::Invalid(ValidationError::InvalidCode("bad-code".to_owned()))
        );
    }

    #[test]
    fn test_batch_conversion_preserves_order() {
        let dtos = vec![
            descriptor("Medication-A", "CODE_A", 20),
            descriptor("Medication-B", "CODE_B", 40),
        ];

        let medications = Medication::from_descriptors(&dtos).unwrap();
        let codes: Vec<_> = medications.iter().map(Medication::code).collect();
        assert_eq!(codes, ["CODE_A", "CODE_B"]);
    }

    #[test]
    fn test_descriptor_strips_image() {
        let medication =
            Medication::new("med", "MED", 10, Some("aW1hZ2U=".to_owned())).unwrap();

        assert_eq!(medication.descriptor().image, None);
        assert_eq!(
            medication.descriptor_with_image().image,
            Some("aW1hZ2U=".to_owned())
        );
    }

    #[test]
    fn test_descriptor_json_omits_missing_image() {
        let medication = Medication::new("med", "MED", 10, None).unwrap();
        let json = serde_json::to_value(medication.descriptor_with_image()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"name": "med", "code": "MED", "weight": 10})
        );
    }
}
