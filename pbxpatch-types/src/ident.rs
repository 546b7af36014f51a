use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Number of hex digits in a manifest object identifier.
pub const OBJECT_ID_LEN: usize = 32;

/// An opaque manifest object identifier: 32 uppercase hex digits.
///
/// Fresh identifiers come from a random v4 UUID with the dashes dropped.
/// Nothing checks them against identifiers already present in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectIdError {
    #[error("object id must be {OBJECT_ID_LEN} characters, got {0}")]
    Length(usize),

    #[error("object id must be uppercase hex, found {0:?}")]
    Character(char),
}

impl ObjectId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string().to_uppercase())
    }

    pub fn parse(s: &str) -> Result<Self, ObjectIdError> {
        if s.len() != OBJECT_ID_LEN {
            return Err(ObjectIdError::Length(s.chars().count()));
        }
        if let Some(c) = s
            .chars()
            .find(|c| !matches!(c, '0'..='9' | 'A'..='F'))
        {
            return Err(ObjectIdError::Character(c));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ObjectId {
    type Error = ObjectIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

/// The two identifiers minted for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryIds {
    /// Key of the new `PBXFileReference` entry.
    pub file_ref: ObjectId,
    /// Key of the `PBXBuildFile` wrapper pointing at `file_ref`.
    pub build_file: ObjectId,
}

impl EntryIds {
    pub fn generate() -> Self {
        Self {
            file_ref: ObjectId::generate(),
            build_file: ObjectId::generate(),
        }
    }
}
