use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlantDoctorError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] plant_doctor_common::Error),

    #[error(transparent)]
    Analysis(#[from] plant_doctor_common::AnalysisError),
}

impl From<reqwest::Error> for PlantDoctorError {
    fn from(err: reqwest::Error) -> Self {
        PlantDoctorError::Http(err.to_string())
    }
}

impl From<dialoguer::Error> for PlantDoctorError {
    fn from(err: dialoguer::Error) -> Self {
        PlantDoctorError::Prompt(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlantDoctorError>;
