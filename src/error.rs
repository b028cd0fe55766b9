//! Error types for the Warfront engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Card identifier missing from the catalog. Fatal to the operation
    /// that needed the card, never to the match.
    #[error("Unknown card: {0}")]
    UnknownCard(String),

    /// Deck list rejected at match start or by gameplay validation.
    #[error("Invalid deck: {0}")]
    InvalidDeck(String),

    /// Affordability, attack-eligibility, Guard-rule or invalid-target
    /// violations. Always recovered locally: logged, state unchanged,
    /// selection reset.
    #[error("Illegal action: {0}")]
    IllegalAction(String),

    #[error("Invalid card format: {0}")]
    InvalidCardFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
