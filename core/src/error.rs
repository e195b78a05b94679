use thiserror::Error;

#[derive(Error, Debug)]
pub enum DistError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("Sampling exhausted: '{name}' rejected {attempts} draws outside its bounds")]
    SamplingExhausted { name: String, attempts: u32 },

    #[error("Amount {amount} cannot be represented as money")]
    AmountNotRepresentable { amount: f64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DistError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration { reason: reason.into() }
    }
}

pub type DistResult<T> = Result<T, DistError>;
