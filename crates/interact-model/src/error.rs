use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("administration for patient {patient_id} at {timestamp} lists no medications")]
    EmptyMedications {
        patient_id: String,
        timestamp: String,
    },
    #[error("patient identifier is blank")]
    BlankPatient,
}

pub type Result<T> = std::result::Result<T, ModelError>;
