// OS descriptor types
#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Operating system family of a node.
///
/// Families form a tree; [`OsFamily::lineage`] walks from a family to the
/// root so tool lookups can pick the most specific registered variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    /// Any POSIX system we could not classify further
    Posix,
    Linux,
    Debian,
    Ubuntu,
    Redhat,
    CentOs,
    Fedora,
    Suse,
    Bsd,
    FreeBsd,
}

impl OsFamily {
    pub fn parent(self) -> Option<OsFamily> {
        match self {
            OsFamily::Posix => None,
            OsFamily::Linux | OsFamily::Bsd => Some(OsFamily::Posix),
            OsFamily::Debian | OsFamily::Redhat | OsFamily::Suse => Some(OsFamily::Linux),
            OsFamily::Ubuntu => Some(OsFamily::Debian),
            OsFamily::CentOs | OsFamily::Fedora => Some(OsFamily::Redhat),
            OsFamily::FreeBsd => Some(OsFamily::Bsd),
        }
    }

    /// This family followed by its ancestors, most specific first
    pub fn lineage(self) -> Vec<OsFamily> {
        let mut lineage = vec![self];
        let mut current = self;
        while let Some(parent) = current.parent() {
            lineage.push(parent);
            current = parent;
        }
        lineage
    }

    pub fn is_a(self, other: OsFamily) -> bool {
        self.lineage().contains(&other)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OsFamily::Posix => "posix",
            OsFamily::Linux => "linux",
            OsFamily::Debian => "debian",
            OsFamily::Ubuntu => "ubuntu",
            OsFamily::Redhat => "redhat",
            OsFamily::CentOs => "centos",
            OsFamily::Fedora => "fedora",
            OsFamily::Suse => "suse",
            OsFamily::Bsd => "bsd",
            OsFamily::FreeBsd => "freebsd",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dotted numeric version, compared component by component.
/// Missing trailing components count as zero, so `7.8` == `7.8.0`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OsVersion {
    parts: Vec<u64>,
}

impl OsVersion {
    pub fn new(parts: impl Into<Vec<u64>>) -> Self {
        Self {
            parts: parts.into(),
        }
    }

    pub fn major(&self) -> u64 {
        self.part(0)
    }

    pub fn minor(&self) -> u64 {
        self.part(1)
    }

    fn part(&self, index: usize) -> u64 {
        self.parts.get(index).copied().unwrap_or(0)
    }
}

impl PartialEq for OsVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OsVersion {}

impl PartialOrd for OsVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OsVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|i| self.part(i).cmp(&other.part(i)))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid OS version: '{0}'")]
pub struct ParseVersionError(pub String);

impl FromStr for OsVersion {
    type Err = ParseVersionError;

    /// Reads the leading dotted digits, so `13.2-RELEASE` parses as `13.2`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let numeric: String = s
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        let parts = numeric
            .split('.')
            .filter(|p| !p.is_empty())
            .map(|p| p.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ParseVersionError(s.to_string()))?;

        if parts.is_empty() {
            return Err(ParseVersionError(s.to_string()));
        }
        Ok(Self { parts })
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.parts.iter().map(|p| p.to_string()).collect();
        f.write_str(&parts.join("."))
    }
}

/// Detected operating system of a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsInfo {
    pub family: OsFamily,
    pub version: OsVersion,
    /// Pretty name reported by the system, if any
    pub name: String,
}

impl OsInfo {
    pub fn new(family: OsFamily, version: OsVersion) -> Self {
        Self {
            family,
            version,
            name: family.to_string(),
        }
    }
}

/// Read access to a node's OS family and version
pub trait OsDescriptor {
    fn family(&self) -> OsFamily;
    fn version(&self) -> &OsVersion;
}

impl OsDescriptor for OsInfo {
    fn family(&self) -> OsFamily {
        self.family
    }

    fn version(&self) -> &OsVersion {
        &self.version
    }
}
