use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::{InvalidVersion, Version};

/// The position of one version relative to another.
///
/// `compare("1.0", "2.0")` answers for the *first* argument: it comes
/// [`Before`](VersionOrdering::Before) the second.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum VersionOrdering {
    /// The first version is older than the second
    Before,
    /// The versions are interchangeable, e.g. `1.0` and `1.0.0`
    Equal,
    /// The first version is newer than the second
    After,
}

impl From<Ordering> for VersionOrdering {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Self::Before,
            Ordering::Equal => Self::Equal,
            Ordering::Greater => Self::After,
        }
    }
}

impl Display for VersionOrdering {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Before => write!(f, "Before"),
            Self::Equal => write!(f, "Equal"),
            Self::After => write!(f, "After"),
        }
    }
}

/// Compares two parsed versions under the PEP 440 total order.
pub fn compare(left: &Version, right: &Version) -> VersionOrdering {
    left.cmp(right).into()
}

/// Parses both version strings, then compares them.
///
/// Fails on the first string that does not parse; the returned error carries
/// that string (see [`InvalidVersion::input`]), so `right` is never blamed
/// for a bad `left`.
pub fn parse_and_compare(left: &str, right: &str) -> Result<VersionOrdering, InvalidVersion> {
    let left = Version::from_str(left)?;
    let right = Version::from_str(right)?;
    Ok(compare(&left, &right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_is_cmp() {
        let left = Version::from_str("1.0a1").unwrap();
        let right = Version::from_str("1.0").unwrap();
        assert_eq!(compare(&left, &right), VersionOrdering::Before);
        assert_eq!(compare(&right, &left), VersionOrdering::After);
        assert_eq!(compare(&left, &left), VersionOrdering::Equal);
        assert_eq!(VersionOrdering::from(left.cmp(&right)), compare(&left, &right));
    }

    #[test]
    fn parse_and_compare_ok() {
        assert_eq!(parse_and_compare("2.0", "1.0"), Ok(VersionOrdering::After));
        assert_eq!(parse_and_compare("1.0", "1.0.0"), Ok(VersionOrdering::Equal));
        assert_eq!(parse_and_compare("1.0a1", "1.0"), Ok(VersionOrdering::Before));
        assert_eq!(parse_and_compare("1.0+1", "1.0+abc"), Ok(VersionOrdering::Before));
        assert_eq!(parse_and_compare("2!0.1", "1!9.9"), Ok(VersionOrdering::After));
    }

    #[test]
    fn parse_and_compare_fails_fast() {
        let err = parse_and_compare("1.0.", "also garbage").unwrap_err();
        assert_eq!(err.input(), "1.0.");
        assert_eq!(
            err.to_string(),
            "Invalid version `1.0.`: trailing characters `.`"
        );

        let err = parse_and_compare("1.0", "1.0.x1").unwrap_err();
        assert_eq!(err.input(), "1.0.x1");
        assert_eq!(
            err.to_string(),
            "Invalid version `1.0.x1`: unexpected qualifier `x`"
        );
    }

    #[test]
    fn ordering_display() {
        assert_eq!(VersionOrdering::Before.to_string(), "Before");
        assert_eq!(VersionOrdering::Equal.to_string(), "Equal");
        assert_eq!(VersionOrdering::After.to_string(), "After");
    }
}
