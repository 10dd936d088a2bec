//! # Access
//!
//! The four access modes shared by both authorization models, and the
//! `Access` value that carries one boolean per mode.

use serde::{Deserialize, Serialize};
use std::ops::BitOr;

use crate::vocab::acl;

/// A single access mode.
///
/// - **Read**: view the resource
/// - **Append**: add data without removing any
/// - **Write**: modify or delete data
/// - **Control**: read and modify the resource's access controls
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// Read the resource.
    Read,
    /// Append to the resource.
    Append,
    /// Write to the resource.
    Write,
    /// Control access to the resource.
    Control,
}

impl AccessMode {
    /// Get the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessMode::Read => "read",
            AccessMode::Append => "append",
            AccessMode::Write => "write",
            AccessMode::Control => "control",
        }
    }

    /// Get the `acl:` IRI of the mode.
    ///
    /// Both WAC and ACP documents name modes with these IRIs.
    pub fn iri(&self) -> &'static str {
        match self {
            AccessMode::Read => acl::READ,
            AccessMode::Append => acl::APPEND,
            AccessMode::Write => acl::WRITE,
            AccessMode::Control => acl::CONTROL,
        }
    }

    /// Parse a mode from its `acl:` IRI.
    ///
    /// # Example
    ///
    /// ```
    /// use ldaccess_model::AccessMode;
    ///
    /// assert_eq!(
    ///     AccessMode::from_iri("http://www.w3.org/ns/auth/acl#Read"),
    ///     Some(AccessMode::Read)
    /// );
    /// assert_eq!(AccessMode::from_iri("http://example.org/Nope"), None);
    /// ```
    pub fn from_iri(iri: &str) -> Option<Self> {
        match iri {
            acl::READ => Some(AccessMode::Read),
            acl::APPEND => Some(AccessMode::Append),
            acl::WRITE => Some(AccessMode::Write),
            acl::CONTROL => Some(AccessMode::Control),
            _ => None,
        }
    }

    /// Get all modes.
    pub fn all() -> &'static [AccessMode] {
        &[
            AccessMode::Read,
            AccessMode::Append,
            AccessMode::Write,
            AccessMode::Control,
        ]
    }

    /// Check if this mode implies another.
    ///
    /// Write implies Append: anyone who may modify a resource may add to it.
    pub fn implies(&self, other: AccessMode) -> bool {
        *self == other || matches!((self, other), (AccessMode::Write, AccessMode::Append))
    }
}

impl std::fmt::Display for AccessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access granted to an actor: one independent flag per mode.
///
/// Always fully populated. Combining values is a per-field OR unless a
/// model defines explicit denial.
///
/// # Example
///
/// ```
/// use ldaccess_model::Access;
///
/// let read = Access::none().with_read(true);
/// let write = Access::none().with_write(true);
///
/// let both = read | write;
/// assert!(both.read && both.write);
/// assert!(!both.append && !both.control);
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Access {
    /// May read the resource.
    pub read: bool,
    /// May append to the resource.
    pub append: bool,
    /// May write to the resource.
    pub write: bool,
    /// May read and change the resource's access controls.
    pub control: bool,
}

impl Access {
    /// Access with every mode set to `false`.
    pub const fn none() -> Self {
        Self {
            read: false,
            append: false,
            write: false,
            control: false,
        }
    }

    /// Access with every mode set to `true`.
    pub const fn all() -> Self {
        Self {
            read: true,
            append: true,
            write: true,
            control: true,
        }
    }

    /// Build an `Access` from the modes it grants.
    pub fn from_modes<I>(modes: I) -> Self
    where
        I: IntoIterator<Item = AccessMode>,
    {
        modes.into_iter().fold(Self::none(), |access, mode| access.with_mode(mode, true))
    }

    /// Return a copy with the read flag set.
    pub fn with_read(mut self, value: bool) -> Self {
        self.read = value;
        self
    }

    /// Return a copy with the append flag set.
    pub fn with_append(mut self, value: bool) -> Self {
        self.append = value;
        self
    }

    /// Return a copy with the write flag set.
    pub fn with_write(mut self, value: bool) -> Self {
        self.write = value;
        self
    }

    /// Return a copy with the control flag set.
    pub fn with_control(mut self, value: bool) -> Self {
        self.control = value;
        self
    }

    /// Return a copy with the flag for `mode` set.
    pub fn with_mode(self, mode: AccessMode, value: bool) -> Self {
        match mode {
            AccessMode::Read => self.with_read(value),
            AccessMode::Append => self.with_append(value),
            AccessMode::Write => self.with_write(value),
            AccessMode::Control => self.with_control(value),
        }
    }

    /// Check whether `mode` is granted.
    pub fn has(&self, mode: AccessMode) -> bool {
        match mode {
            AccessMode::Read => self.read,
            AccessMode::Append => self.append,
            AccessMode::Write => self.write,
            AccessMode::Control => self.control,
        }
    }

    /// The modes that are granted, in `AccessMode::all()` order.
    pub fn modes(&self) -> Vec<AccessMode> {
        AccessMode::all()
            .iter()
            .copied()
            .filter(|mode| self.has(*mode))
            .collect()
    }

    /// Field-wise OR.
    pub fn union(&self, other: &Access) -> Access {
        Access {
            read: self.read || other.read,
            append: self.append || other.append,
            write: self.write || other.write,
            control: self.control || other.control,
        }
    }

    /// Field-wise AND.
    pub fn intersect(&self, other: &Access) -> Access {
        Access {
            read: self.read && other.read,
            append: self.append && other.append,
            write: self.write && other.write,
            control: self.control && other.control,
        }
    }

    /// Field-wise `self AND NOT denied`.
    pub fn without(&self, denied: &Access) -> Access {
        Access {
            read: self.read && !denied.read,
            append: self.append && !denied.append,
            write: self.write && !denied.write,
            control: self.control && !denied.control,
        }
    }

    /// Check if no mode is granted.
    pub fn is_empty(&self) -> bool {
        !(self.read || self.append || self.write || self.control)
    }
}

impl BitOr for Access {
    type Output = Access;

    fn bitor(self, rhs: Access) -> Access {
        self.union(&rhs)
    }
}

impl FromIterator<Access> for Access {
    fn from_iter<T: IntoIterator<Item = Access>>(iter: T) -> Self {
        iter.into_iter().fold(Access::none(), |acc, access| acc | access)
    }
}

/// Combine several `Access` values by field-wise OR.
///
/// An empty list yields `Access::none()`.
///
/// # Example
///
/// ```
/// use ldaccess_model::{combine_access_modes, Access};
///
/// assert_eq!(combine_access_modes(&[]), Access::none());
///
/// let combined = combine_access_modes(&[
///     Access::none().with_read(true),
///     Access::none().with_append(true),
/// ]);
/// assert!(combined.read && combined.append);
/// ```
pub fn combine_access_modes(access_list: &[Access]) -> Access {
    access_list.iter().copied().collect()
}
