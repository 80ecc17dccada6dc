use std::fmt;

/// Version marker Pipfiles use for "any version"
pub const WILDCARD: &str = "*";

/// Dependency sections recognised in a Pipfile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// `[packages]`, the runtime dependencies
    Packages,
    /// `[dev-packages]`, the development dependencies
    DevPackages,
}

impl Section {
    /// Match a trimmed `[header]` line against the recognised sections
    pub fn from_header(line: &str) -> Option<Self> {
        match line {
            "[packages]" => Some(Self::Packages),
            "[dev-packages]" => Some(Self::DevPackages),
            _ => None,
        }
    }
}

/// A single dependency declaration: a package name plus an optional
/// version-constraint suffix such as `==1.2.3` or `>=2.0`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Requirement {
    pub name: String,
    pub constraint: Option<String>,
}

impl Requirement {
    /// Build a requirement from a Pipfile `name = "value"` pair.
    /// The wildcard marker means no constraint at all.
    pub fn from_pipfile_value(name: &str, value: &str) -> Self {
        let constraint = if value == WILDCARD {
            None
        } else {
            Some(value.to_string())
        };
        Self {
            name: name.to_string(),
            constraint,
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.constraint {
            Some(constraint) => write!(f, "{}{}", self.name, constraint),
            None => write!(f, "{}", self.name),
        }
    }
}

/// The dependency-bearing parts of a Pipfile, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipfile {
    pub packages: Vec<Requirement>,
    pub dev_packages: Vec<Requirement>,
}

impl Pipfile {
    pub fn section_mut(&mut self, section: Section) -> &mut Vec<Requirement> {
        match section {
            Section::Packages => &mut self.packages,
            Section::DevPackages => &mut self.dev_packages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty() && self.dev_packages.is_empty()
    }
}
