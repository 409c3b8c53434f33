use chrono::NaiveDateTime;

use crate::error::{ModelError, Result};

/// One recorded instance of a patient receiving one or more medications.
///
/// Medication names keep their source spelling and order; repeated names are
/// preserved as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdministrationEvent {
    timestamp: NaiveDateTime,
    patient_id: String,
    medications: Vec<String>,
}

impl AdministrationEvent {
    pub fn new(
        timestamp: NaiveDateTime,
        patient_id: impl Into<String>,
        medications: Vec<String>,
    ) -> Result<Self> {
        let patient_id = patient_id.into();
        if patient_id.trim().is_empty() {
            return Err(ModelError::BlankPatient);
        }
        if medications.is_empty() {
            return Err(ModelError::EmptyMedications {
                patient_id,
                timestamp: timestamp.to_string(),
            });
        }
        Ok(Self {
            timestamp,
            patient_id,
            medications,
        })
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn medications(&self) -> &[String] {
        &self.medications
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn rejects_empty_medication_list() {
        let err = AdministrationEvent::new(at(8), "P1", vec![]).unwrap_err();
        assert!(matches!(err, ModelError::EmptyMedications { .. }));
    }

    #[test]
    fn rejects_blank_patient() {
        let err = AdministrationEvent::new(at(8), "  ", vec!["A".into()]).unwrap_err();
        assert_eq!(err, ModelError::BlankPatient);
    }

    #[test]
    fn keeps_duplicate_medications() {
        let event =
            AdministrationEvent::new(at(8), "P1", vec!["A".into(), "A".into()]).unwrap();
        assert_eq!(event.medications(), ["A", "A"]);
    }
}
