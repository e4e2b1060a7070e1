use std::fmt;

/// Recommended magnitude of a version increment.
///
/// Ordered from most to least significant, so the minimum over a set of commits is the
/// bump the whole set requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BumpLevel {
    Major,
    Minor,
    Patch,
    /// No conventional commit asked for a release
    NoBump,
}

impl BumpLevel {
    pub fn is_breaking(&self) -> bool {
        matches!(self, BumpLevel::Major)
    }
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpLevel::Major => "major",
            BumpLevel::Minor => "minor",
            BumpLevel::Patch => "patch",
            BumpLevel::NoBump => "none",
        };
        write!(f, "{}", name)
    }
}

/// Last released version and the version the pull request leads to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPair {
    /// Normalized form of the last tag, or the raw tag name when it is not semver
    pub last_version: String,
    /// Absent when no bump applies or the tag scheme is not semantic
    pub target_version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_most_significant_first() {
        assert!(BumpLevel::Major < BumpLevel::Minor);
        assert!(BumpLevel::Minor < BumpLevel::Patch);
        assert!(BumpLevel::Patch < BumpLevel::NoBump);
        let levels = [BumpLevel::Patch, BumpLevel::Major, BumpLevel::Minor];
        assert_eq!(levels.iter().min(), Some(&BumpLevel::Major));
    }

    #[test]
    fn test_display() {
        assert_eq!(BumpLevel::Minor.to_string(), "minor");
        assert_eq!(BumpLevel::NoBump.to_string(), "none");
    }
}
