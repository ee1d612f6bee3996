//! Compatibility differences reported by rules

use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Diagnostic ids of the built-in rules
pub mod diagnostic_ids {
    pub const TYPE_MUST_EXIST: &str = "CP0001";
    pub const MEMBER_MUST_EXIST: &str = "CP0002";
    pub const ASSEMBLY_IDENTITY_MUST_MATCH: &str = "CP0003";
    pub const MATCHING_ASSEMBLY_MUST_EXIST: &str = "CP0004";
}

/// How the right side differs from the left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DifferenceType {
    /// Present on the left, missing on the right
    Removed,
    /// Present on the right only
    Added,
    /// Present on both sides but not equivalent
    Changed,
}

impl fmt::Display for DifferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifferenceType::Removed => f.write_str("removed"),
            DifferenceType::Added => f.write_str("added"),
            DifferenceType::Changed => f.write_str("changed"),
        }
    }
}

/// One reported incompatibility
///
/// Equality and hashing ignore ASCII case in the id, member id and message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatDifference {
    id: String,
    difference_type: DifferenceType,
    member_id: String,
    message: String,
}

impl CompatDifference {
    pub fn new(
        id: impl Into<String>,
        difference_type: DifferenceType,
        member_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            difference_type,
            member_id: member_id.into(),
            message: message.into(),
        }
    }

    /// Diagnostic code, e.g. `CP0001`
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn difference_type(&self) -> DifferenceType {
        self.difference_type
    }

    /// Canonical identity of the affected element
    pub fn member_id(&self) -> &str {
        &self.member_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl PartialEq for CompatDifference {
    fn eq(&self, other: &Self) -> bool {
        self.difference_type == other.difference_type
            && self.id.eq_ignore_ascii_case(&other.id)
            && self.member_id.eq_ignore_ascii_case(&other.member_id)
            && self.message.eq_ignore_ascii_case(&other.message)
    }
}

impl Eq for CompatDifference {}

impl Hash for CompatDifference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.to_ascii_lowercase().hash(state);
        self.member_id.to_ascii_lowercase().hash(state);
        self.message.to_ascii_lowercase().hash(state);
        self.difference_type.hash(state);
    }
}

impl fmt::Display for CompatDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.id, self.message)
    }
}
