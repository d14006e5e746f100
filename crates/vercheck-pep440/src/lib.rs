//! A library for python version numbers, implementing the
//! [PEP 440](https://peps.python.org/pep-0440) version scheme and its total
//! order.
//!
//! ```rust
//! use std::str::FromStr;
//! use vercheck_pep440::{compare, parse_and_compare, Version, VersionOrdering};
//!
//! let older = Version::from_str("1.0a1").unwrap();
//! let newer = Version::from_str("1.0").unwrap();
//! assert_eq!(compare(&older, &newer), VersionOrdering::Before);
//!
//! // Spelling variants collapse: `1.0.0` and `v1.0` are the same version.
//! assert_eq!(parse_and_compare("v1.0", "1.0.0"), Ok(VersionOrdering::Equal));
//! ```
//!
//! PEP 440 has a lot of unintuitive features, including:
//!
//! * An epoch prefix, e.g. `1!1.2.3`, which trumps everything after it
//!   (`1.0 <= 2!0.1`)
//! * post versions, which can be attached to both stable releases and
//!   pre-releases
//! * dev versions, which can be attached to both stable releases and
//!   pre-releases. When attached to a pre-release the dev version is ordered
//!   just below the normal pre-release, however when attached to a stable
//!   version, the dev version is sorted before the pre-releases
//! * local versions on top of all the others, added with a `+` and carrying
//!   implicitly typed string and number segments. Number segments order
//!   before string segments here, so `1.0+1 < 1.0+abc`
//! * a permissive surface syntax where case, the `.`/`-`/`_` separators and
//!   keyword aliases (`alpha`/`a`, `c`/`pre`/`preview`/`rc`) don't matter
#![deny(missing_docs)]

pub use crate::compare::{compare, parse_and_compare, VersionOrdering};
pub use crate::version::{InvalidVersion, LocalSegment, Prerelease, PrereleaseKind, Version};

mod compare;
mod version;
