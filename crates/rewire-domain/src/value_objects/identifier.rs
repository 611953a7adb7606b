//! Injection point identifiers
//!
//! An [`Identifier`] names one rewireable injection point. Its canonical form
//! is a slash-separated path, which doubles as the node path of the wiring
//! preference:
//!
//! ```text
//! app/service/Greeter/__field__/greeters          (field)
//! app/service/Greeter/configure()/greeters        (method parameter)
//! ```
//!
//! Equality and hashing are derived from that path only, so an identifier
//! rebuilt from a persisted path equals the one built from a live request.

use crate::constants::{FIELD_MARKER, METHOD_MARKER, PATH_SEPARATOR};
use crate::error::{Error, Result};
use crate::value_objects::dependency::InjectionMember;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Kind of injection point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InjectionKind {
    /// Field injection
    Field,
    /// Method or constructor parameter injection
    MethodParameter,
}

/// Stable name of one rewireable injection point
#[derive(Debug, Clone)]
pub struct Identifier {
    owner: String,
    member: InjectionMember,
    path: String,
}

impl Identifier {
    /// Identifier of a field
    pub fn for_field(owner: &str, field: &str) -> Result<Self> {
        Self::for_member(owner, &InjectionMember::field(field))
    }

    /// Identifier of a method parameter
    pub fn for_method_parameter(owner: &str, method: &str, parameter: &str) -> Result<Self> {
        Self::for_member(owner, &InjectionMember::method_parameter(method, parameter))
    }

    /// Identifier of any injection member of `owner`
    pub fn for_member(owner: &str, member: &InjectionMember) -> Result<Self> {
        let owner_segments = owner_segments(owner)?;
        let mut path = owner_segments.join("/");

        match member {
            InjectionMember::Field { name } => {
                validate_segment("field name", name)?;
                path.push(PATH_SEPARATOR);
                path.push_str(FIELD_MARKER);
                path.push(PATH_SEPARATOR);
                path.push_str(name);
            }
            InjectionMember::MethodParameter { method, parameter } => {
                validate_segment("method name", method)?;
                validate_segment("parameter name", parameter)?;
                path.push(PATH_SEPARATOR);
                path.push_str(method);
                path.push_str(METHOD_MARKER);
                path.push(PATH_SEPARATOR);
                path.push_str(parameter);
            }
        }

        Ok(Self {
            owner: owner.to_string(),
            member: member.clone(),
            path,
        })
    }

    /// Rebuild an identifier from its canonical path
    pub fn from_path_string(path: &str) -> Result<Self> {
        let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
        if segments.len() < 3 {
            return Err(Error::parse(
                path,
                "expected <owner>/<marker>/<name> with at least three segments",
            ));
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(Error::parse(path, "empty path segment"));
        }

        let name = segments[segments.len() - 1];
        let marker = segments[segments.len() - 2];
        let owner = segments[..segments.len() - 2].join("::");

        let member = if marker == FIELD_MARKER {
            InjectionMember::field(name)
        } else if let Some(method) = marker.strip_suffix(METHOD_MARKER) {
            if method.is_empty() {
                return Err(Error::parse(path, "method marker without a method name"));
            }
            InjectionMember::method_parameter(method, name)
        } else {
            return Err(Error::parse(
                path,
                format!(
                    "segment '{marker}' is neither '{FIELD_MARKER}' nor '<method>{METHOD_MARKER}'"
                ),
            ));
        };

        Self::for_member(&owner, &member).map_err(|e| Error::parse(path, e.to_string()))
    }

    /// Canonical path, used as lookup key and preference node path
    pub fn to_path_string(&self) -> String {
        self.path.clone()
    }

    /// Canonical path, borrowed
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Owning type name as supplied at construction
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Injected member
    pub fn member(&self) -> &InjectionMember {
        &self.member
    }

    /// Field or method parameter
    pub fn kind(&self) -> InjectionKind {
        match self.member {
            InjectionMember::Field { .. } => InjectionKind::Field,
            InjectionMember::MethodParameter { .. } => InjectionKind::MethodParameter,
        }
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl std::str::FromStr for Identifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_path_string(s)
    }
}

/// Split an owner type name on `::` and `.` into path segments
fn owner_segments(owner: &str) -> Result<Vec<&str>> {
    if owner.trim().is_empty() {
        return Err(Error::invalid_argument("owner type name must not be empty"));
    }
    if owner.contains(PATH_SEPARATOR) {
        return Err(Error::invalid_argument(format!(
            "owner type name '{owner}' must not contain '{PATH_SEPARATOR}'"
        )));
    }

    let segments: Vec<&str> = owner.split("::").flat_map(|s| s.split('.')).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(Error::invalid_argument(format!(
            "owner type name '{owner}' has an empty segment"
        )));
    }
    Ok(segments)
}

fn validate_segment(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_argument(format!("{what} must not be empty")));
    }
    if value.contains(PATH_SEPARATOR) {
        return Err(Error::invalid_argument(format!(
            "{what} '{value}' must not contain '{PATH_SEPARATOR}'"
        )));
    }
    Ok(())
}
