use dn_core::DnError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("planning error: {0}")]
    Planning(#[from] DnError),
}

pub type SimResult<T> = Result<T, SimError>;
