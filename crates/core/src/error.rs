#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // Validation messages are user-facing and shown verbatim in the UI.
    #[error("진료명을 선택해주세요.")]
    TreatmentRequired,
    #[error("지역을 선택해주세요.")]
    RegionRequired,
}

pub type FlowResult<T> = std::result::Result<T, FlowError>;
