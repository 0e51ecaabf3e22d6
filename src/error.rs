//! Error types.
//!
//! Only configuration errors are surfaced to callers. Storage and audio
//! failures are recovered where they happen and only logged; their types
//! exist so the service traits can report what went wrong.

use thiserror::Error;

use crate::services::SoundCue;

/// Errors that abort an operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A deck was requested with more pairs than the catalog holds.
    #[error("catalog exhausted: {requested} pairs requested but only {available} catalog entries exist")]
    CatalogExhausted { requested: usize, available: usize },

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

/// Why a stored garden was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GardenError {
    #[error("expected {expected} plots, found {found}")]
    PlotCount { expected: usize, found: usize },

    #[error("plot {index} is named {id:?}")]
    PlotId { index: usize, id: String },

    /// A seed id without a planted soil state, or the reverse.
    #[error("plot {index} has a seed id that disagrees with its soil state")]
    SeedMismatch { index: usize },
}

/// Failure reported by a [`KeyValueStore`](crate::services::KeyValueStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend refused or failed the operation.
    #[error("storage backend failure: {0}")]
    Backend(String),

    /// A stored value could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failure reported by an [`AudioService`](crate::services::AudioService).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AudioError {
    #[error("failed to play {cue} cue: {reason}")]
    Playback { cue: SoundCue, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_exhausted_message() {
        let err = GameError::CatalogExhausted { requested: 20, available: 13 };
        assert_eq!(
            err.to_string(),
            "catalog exhausted: 20 pairs requested but only 13 catalog entries exist"
        );
    }

    #[test]
    fn test_store_error_from_serde() {
        let parse = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: StoreError = parse.into();
        assert!(matches!(err, StoreError::Serde(_)));
        assert!(err.to_string().starts_with("serialization error"));
    }

    #[test]
    fn test_audio_error_message() {
        let err = AudioError::Playback { cue: SoundCue::Match, reason: "device busy".into() };
        assert_eq!(err.to_string(), "failed to play match cue: device busy");
    }
}
