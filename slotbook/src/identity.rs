//! Identifier and caller types.
//!
//! Provider, requester and item identifiers are short case-folded names.
//! A [`Caller`] pairs an already-authenticated name with its [`Role`]; it is
//! passed explicitly into every operation so the engine keeps no session
//! state between calls.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::reservation::ValidationError;

/// Maximum length of any identifier, in bytes.
pub const MAX_IDENTIFIER_LEN: usize = 255;

/// Trims, validates and lower-cases a raw identifier.
fn normalize_identifier(field: &str, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError {
            field: field.into(),
            message: format!("{field} must be non-empty after trimming whitespace"),
        });
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(ValidationError {
            field: field.into(),
            message: format!("{field} must not contain whitespace"),
        });
    }
    if trimmed.len() > MAX_IDENTIFIER_LEN {
        return Err(ValidationError {
            field: field.into(),
            message: format!("{field} must be at most {MAX_IDENTIFIER_LEN} bytes"),
        });
    }
    Ok(trimmed.to_lowercase())
}

/// The name of a requester or provider.
///
/// # Examples
///
/// ```
/// use slotbook::Username;
///
/// let name: Username = "  Alice ".parse().unwrap();
/// assert_eq!(name.as_str(), "alice");
///
/// assert!("".parse::<Username>().is_err());
/// assert!("two words".parse::<Username>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Returns the normalized name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Username {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize_identifier("username", s).map(Self)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The name of an inventory item (for example a vaccine type).
///
/// # Examples
///
/// ```
/// use slotbook::ItemName;
///
/// let item: ItemName = "Moderna".parse().unwrap();
/// assert_eq!(item.to_string(), "moderna");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemName(String);

impl ItemName {
    /// Returns the normalized name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ItemName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize_identifier("item", s).map(Self)
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The role an authenticated caller acts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Books and cancels appointments (a patient).
    Requester,
    /// Publishes availability and provisions stock (a caregiver).
    Provider,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requester => write!(f, "requester"),
            Self::Provider => write!(f, "provider"),
        }
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    /// Parses a role name; `patient` and `caregiver` are accepted as aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "requester" | "patient" => Ok(Self::Requester),
            "provider" | "caregiver" => Ok(Self::Provider),
            other => Err(ValidationError {
                field: "role".into(),
                message: format!("unknown role '{other}' (expected requester or provider)"),
            }),
        }
    }
}

/// An authenticated caller.
///
/// # Examples
///
/// ```
/// use slotbook::{Caller, Role};
///
/// let caller = Caller::requester("alice".parse().unwrap());
/// assert_eq!(caller.role, Role::Requester);
/// assert_eq!(caller.to_string(), "alice (requester)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Caller {
    /// The caller's name.
    pub id: Username,
    /// The role the caller acts in.
    pub role: Role,
}

impl Caller {
    /// Creates a caller with the given name and role.
    #[must_use]
    pub const fn new(id: Username, role: Role) -> Self {
        Self { id, role }
    }

    /// Creates a caller acting as a requester.
    #[must_use]
    pub const fn requester(id: Username) -> Self {
        Self::new(id, Role::Requester)
    }

    /// Creates a caller acting as a provider.
    #[must_use]
    pub const fn provider(id: Username) -> Self {
        Self::new(id, Role::Provider)
    }

    /// Whether the caller acts in the given role.
    #[must_use]
    pub fn is(&self, role: Role) -> bool {
        self.role == role
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.role)
    }
}
