use semver::Version;
use tracing::warn;

use crate::boundary::BoundaryWarning;
use crate::domain::{BumpLevel, Tag, VersionPair};

/// Parses a version from a git tag string.
///
/// Strips a leading 'v' or 'V' and parses the rest as a semantic version
/// (`major.minor.patch[-prerelease][+build]`).
///
/// # Returns
/// * `Some(Version)` - Successfully parsed version
/// * `None` - If the tag is not a semantic version
///
/// # Example
/// ```ignore
/// assert_eq!(parse_version_from_tag("v1.2.3").unwrap(), Version::new(1, 2, 3));
/// assert_eq!(parse_version_from_tag("1.2"), None);
/// ```
pub fn parse_version_from_tag(tag: &str) -> Option<Version> {
    let clean_tag = tag.trim().trim_start_matches('v').trim_start_matches('V');
    Version::parse(clean_tag).ok()
}

/// Bumps a version according to the specified bump level.
///
/// Increments the appropriate component, resets lower components to 0 and drops any
/// prerelease or build metadata:
/// - **Major**: major += 1, minor = 0, patch = 0
/// - **Minor**: minor += 1, patch = 0
/// - **Patch**: patch += 1
///
/// Returns `None` for [`BumpLevel::NoBump`].
pub fn bump_version(version: &Version, bump: BumpLevel) -> Option<Version> {
    match bump {
        BumpLevel::Major => Some(Version::new(version.major + 1, 0, 0)),
        BumpLevel::Minor => Some(Version::new(version.major, version.minor + 1, 0)),
        BumpLevel::Patch => Some(Version::new(
            version.major,
            version.minor,
            version.patch + 1,
        )),
        BumpLevel::NoBump => None,
    }
}

/// Applies the recommended bump to the last tag.
///
/// Calendar tags (`2024.03.1`) and unparsable tags never get a target version: no
/// semantic bump is proposed on top of a non-semantic tagging scheme.
pub fn compute_target(tag: &Tag, bump: BumpLevel) -> VersionPair {
    if tag.is_calendar_version() {
        warn!("{}", BoundaryWarning::NonSemanticTag { tag: tag.name.clone() });
        return VersionPair {
            last_version: tag.name.clone(),
            target_version: None,
        };
    }

    match parse_version_from_tag(&tag.name) {
        Some(last) => VersionPair {
            last_version: last.to_string(),
            target_version: bump_version(&last, bump).map(|v| v.to_string()),
        },
        None => {
            warn!(
                "{}",
                BoundaryWarning::UnparsableTag {
                    tag: tag.name.clone(),
                    reason: "not a semantic version".to_string(),
                }
            );
            VersionPair {
                last_version: tag.name.clone(),
                target_version: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version_from_tag() {
        assert_eq!(parse_version_from_tag("v1.2.3"), Some(Version::new(1, 2, 3)));
        assert_eq!(parse_version_from_tag("V0.1.0"), Some(Version::new(0, 1, 0)));
        assert_eq!(parse_version_from_tag("1.2"), None);
        assert_eq!(parse_version_from_tag("release-1.2.3"), None);
        let pre = parse_version_from_tag("2.0.0-rc.1").unwrap();
        assert_eq!(pre.pre.as_str(), "rc.1");
    }

    #[test]
    fn test_bump_version_rules() {
        let v = Version::new(1, 2, 3);
        assert_eq!(bump_version(&v, BumpLevel::Major), Some(Version::new(2, 0, 0)));
        assert_eq!(bump_version(&v, BumpLevel::Minor), Some(Version::new(1, 3, 0)));
        assert_eq!(bump_version(&v, BumpLevel::Patch), Some(Version::new(1, 2, 4)));
        assert_eq!(bump_version(&v, BumpLevel::NoBump), None);
    }

    #[test]
    fn test_bump_strips_prerelease_and_build() {
        let v = parse_version_from_tag("2.0.0-rc.1+build.7").unwrap();
        assert_eq!(bump_version(&v, BumpLevel::Major).unwrap().to_string(), "3.0.0");
        assert_eq!(bump_version(&v, BumpLevel::Minor).unwrap().to_string(), "2.1.0");
        assert_eq!(bump_version(&v, BumpLevel::Patch).unwrap().to_string(), "2.0.1");
    }

    #[test]
    fn test_compute_target_minor() {
        let pair = compute_target(&Tag::new("1.4.0"), BumpLevel::Minor);
        assert_eq!(pair.last_version, "1.4.0");
        assert_eq!(pair.target_version.as_deref(), Some("1.5.0"));
    }

    #[test]
    fn test_compute_target_normalizes_prefix() {
        let pair = compute_target(&Tag::new("v3.1.4"), BumpLevel::Patch);
        assert_eq!(pair.last_version, "3.1.4");
        assert_eq!(pair.target_version.as_deref(), Some("3.1.5"));
    }

    #[test]
    fn test_compute_target_no_bump() {
        let pair = compute_target(&Tag::new("1.4.0"), BumpLevel::NoBump);
        assert_eq!(pair.last_version, "1.4.0");
        assert_eq!(pair.target_version, None);
    }

    #[test]
    fn test_compute_target_calendar_tag() {
        for tag in ["2024.03.1", "2024.3.1", "v2023.11.0"] {
            let pair = compute_target(&Tag::new(tag), BumpLevel::Major);
            assert_eq!(pair.target_version, None, "tag {}", tag);
            assert_eq!(pair.last_version, tag);
        }
    }

    #[test]
    fn test_compute_target_unparsable_tag() {
        let pair = compute_target(&Tag::new("1.2.3.4"), BumpLevel::Minor);
        assert_eq!(pair.last_version, "1.2.3.4");
        assert_eq!(pair.target_version, None);
    }
}
