//! Error and warning types.
//!
//! Nothing in the core is fatal. Operations either complete, complete
//! partially and say so, or refuse with a [`Warning`] and leave the store
//! untouched. Only the persistence collaborator can fail for real.

use thiserror::Error;

use super::ids::{CardId, DeckId, HandId};
use crate::zones::SLOT_COUNT;

/// Non-fatal condition reported back to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Warning {
    #[error("hand {0} not found")]
    HandNotFound(HandId),

    #[error("deck {0} not found")]
    DeckNotFound(DeckId),

    #[error("card {0} not found")]
    CardNotFound(CardId),

    #[error("hand {0} has no linked deck")]
    NoLinkedDeck(HandId),

    #[error("hand {hand} is linked to deck {deck}, which does not exist")]
    LinkedDeckMissing { hand: HandId, deck: DeckId },

    #[error("slot index {0} is out of range (0..{max})", max = SLOT_COUNT)]
    SlotOutOfRange(usize),

    #[error("no catalog cards match pack {0}")]
    EmptyCandidatePool(String),

    #[error("pack {pack} came up short: {filled} of {requested} cards")]
    ShortPack {
        pack: String,
        requested: usize,
        filled: usize,
    },
}

/// Failure of the persistence collaborator.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),
}

/// Outcome of a failed session transaction.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The operation was refused; the store is unchanged.
    #[error(transparent)]
    Warning(#[from] Warning),

    /// The store advanced in memory but could not be saved.
    #[error("save failed: {0}")]
    Persist(#[from] PersistError),
}

impl SessionError {
    /// The refusal warning, if this is one.
    #[must_use]
    pub fn warning(&self) -> Option<&Warning> {
        match self {
            SessionError::Warning(w) => Some(w),
            SessionError::Persist(_) => None,
        }
    }
}

/// A zone reference string that could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid zone reference {0:?}")]
pub struct ParseZoneRefError(pub String);
