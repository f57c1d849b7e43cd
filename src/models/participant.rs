//! Participant model
//!
//! A member of the group that bills are split between.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ParticipantId;

/// A person taking part in the group's shared expenses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique identifier
    pub id: ParticipantId,

    /// Display name
    pub name: String,

    /// When the participant was added
    pub created_at: DateTime<Utc>,
}

impl Participant {
    /// Create a new participant
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ParticipantId::new(),
            name: name.into().trim().to_string(),
            created_at: Utc::now(),
        }
    }

    /// Normalize a name for case-insensitive lookups
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Whether this participant answers to the given name (case-insensitive)
    pub fn matches_name(&self, name: &str) -> bool {
        Self::normalize_name(&self.name) == Self::normalize_name(name)
    }

    /// Validate the participant
    pub fn validate(&self) -> Result<(), ParticipantValidationError> {
        if self.name.trim().is_empty() {
            return Err(ParticipantValidationError::EmptyName);
        }

        let chars = self.name.chars().count();
        if chars > 100 {
            return Err(ParticipantValidationError::NameTooLong(chars));
        }

        Ok(())
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for participants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantValidationError {
    /// Name is blank after trimming
    EmptyName,
    /// Name is longer than 100 characters; carries the character count
    NameTooLong(usize),
}

impl fmt::Display for ParticipantValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Participant name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Participant name too long ({} chars, max 100)",
                len
            ),
        }
    }
}

impl std::error::Error for ParticipantValidationError {}
