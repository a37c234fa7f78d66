//! Core data model: accounts and protocol records.
//!
//! `ProtocolDraft` is the lenient shape a generative fallback produces;
//! `ProtocolDraft::validate` turns it into a `ProtocolRecord` or rejects it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque unique account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Opaque identifier
    pub id: AccountId,
    /// Lower-cased email, unique
    pub email: String,
    /// Credential digest, owned by the authentication layer
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Anchors the trial window; never mutated
    pub created_at: DateTime<Utc>,
    /// Unconditional access bypass and role gate pass
    #[serde(default)]
    pub is_admin: bool,
    /// Paid extension expiry, if any
    #[serde(default)]
    pub subscription_end: Option<DateTime<Utc>>,
}

impl Account {
    /// Create a non-admin account without a subscription extension.
    pub fn new(email: impl AsRef<str>, password_hash: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: AccountId::new(),
            email: normalize_email(email.as_ref()),
            password_hash: password_hash.into(),
            created_at,
            is_admin: false,
            subscription_end: None,
        }
    }

    /// Mark the account as an administrator.
    pub fn with_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }

    /// Set the subscription expiry.
    pub fn with_subscription_end(mut self, end: DateTime<Utc>) -> Self {
        self.subscription_end = Some(end);
        self
    }
}

/// Canonical form of an email address used for storage and lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// One treatment modality of a protocol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modality {
    /// Modality type (e.g. "TENS (High Rate)") or indication for ultrasound
    pub kind: String,
    /// Dosage parameters
    pub parameters: String,
    /// Electrode or transducer placement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<String>,
    /// Clinical purpose
    pub purpose: String,
}

/// A treatment protocol, either persisted or synthesized on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolRecord {
    /// Store key; `None` for ephemeral records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub disease_name: String,
    /// Comma separated aliases, searched together with `disease_name`
    #[serde(default)]
    pub keywords: String,
    pub description: String,
    pub electrotherapy: Modality,
    pub ultrasound: Modality,
    pub exercises: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment_duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_recovery: Option<String>,
    pub reference: String,
    /// Opaque asset reference (path or URI)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub illustration: Option<String>,
}

impl ProtocolRecord {
    /// Whether the record has been persisted.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Case-insensitive substring match over `disease_name` and `keywords`.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.disease_name.to_lowercase().contains(&needle)
            || self.keywords.to_lowercase().contains(&needle)
    }
}

/// Strict schema violations in a synthesized protocol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required display field is absent or blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Modality as produced by a generative backend; every field optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModalityDraft {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub parameters: Option<String>,
    #[serde(default)]
    pub placement: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
}

/// Protocol as produced by a generative backend, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProtocolDraft {
    /// Set by the backend when the query is not a recognizable clinical condition
    #[serde(default)]
    pub not_applicable: bool,
    #[serde(default)]
    pub disease_name: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub electrotherapy: Option<ModalityDraft>,
    #[serde(default)]
    pub ultrasound: Option<ModalityDraft>,
    #[serde(default)]
    pub exercises: Option<String>,
    #[serde(default)]
    pub treatment_duration: Option<String>,
    #[serde(default)]
    pub expected_recovery: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub illustration: Option<String>,
}

impl ProtocolDraft {
    /// Apply the strict schema, producing an ephemeral record.
    pub fn validate(self) -> Result<ProtocolRecord, ValidationError> {
        let electrotherapy = self
            .electrotherapy
            .ok_or(ValidationError::MissingField("electrotherapy"))?;
        let ultrasound = self
            .ultrasound
            .ok_or(ValidationError::MissingField("ultrasound"))?;

        Ok(ProtocolRecord {
            id: None,
            disease_name: required(self.disease_name, "disease_name")?,
            keywords: optional(self.keywords).unwrap_or_default(),
            description: required(self.description, "description")?,
            electrotherapy: Modality {
                kind: required(electrotherapy.kind, "electrotherapy.kind")?,
                parameters: required(electrotherapy.parameters, "electrotherapy.parameters")?,
                placement: optional(electrotherapy.placement),
                purpose: required(electrotherapy.purpose, "electrotherapy.purpose")?,
            },
            ultrasound: Modality {
                kind: required(ultrasound.kind, "ultrasound.kind")?,
                parameters: required(ultrasound.parameters, "ultrasound.parameters")?,
                placement: optional(ultrasound.placement),
                purpose: required(ultrasound.purpose, "ultrasound.purpose")?,
            },
            exercises: required(self.exercises, "exercises")?,
            treatment_duration: optional(self.treatment_duration),
            expected_recovery: optional(self.expected_recovery),
            reference: required(self.reference, "reference")?,
            illustration: optional(self.illustration),
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    optional(value).ok_or(ValidationError::MissingField(field))
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn modality_draft(kind: &str) -> ModalityDraft {
        ModalityDraft {
            kind: Some(kind.to_string()),
            parameters: Some("Freq: 100 Hz. Time: 20 mins.".to_string()),
            placement: None,
            purpose: Some("Pain modulation.".to_string()),
        }
    }

    pub fn complete_draft(disease_name: &str) -> ProtocolDraft {
        ProtocolDraft {
            not_applicable: false,
            disease_name: Some(disease_name.to_string()),
            keywords: Some("stiffness, shoulder pain".to_string()),
            description: Some("Inflamed and stiff joint capsule.".to_string()),
            electrotherapy: Some(modality_draft("TENS (High Rate)")),
            ultrasound: Some(modality_draft("Indicated (Continuous)")),
            exercises: Some("1. Pendulum.\n2. Wall climb.".to_string()),
            treatment_duration: Some("Session: 45 mins.".to_string()),
            expected_recovery: None,
            reference: Some("JOSPT Guidelines".to_string()),
            illustration: None,
        }
    }

    pub fn record(id: i64, disease_name: &str, keywords: &str) -> ProtocolRecord {
        let mut record = complete_draft(disease_name)
            .validate()
            .expect("fixture draft is complete");
        record.id = Some(id);
        record.keywords = keywords.to_string();
        record
    }
}
