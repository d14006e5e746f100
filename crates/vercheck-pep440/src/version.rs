use std::cmp::{max, Ordering};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::iter;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use unscanny::Scanner;

/// The class of a [pre-release](https://peps.python.org/pep-0440/#pre-releases).
///
/// Alpha orders before beta, beta before release candidate. The surface
/// spellings `c`, `pre` and `preview` all normalize to `rc`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum PrereleaseKind {
    /// An alpha, written `a` or `alpha`
    Alpha,
    /// A beta, written `b` or `beta`
    Beta,
    /// A release candidate, written `rc`, `c`, `pre` or `preview`
    Rc,
}

impl Display for PrereleaseKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alpha => write!(f, "a"),
            Self::Beta => write!(f, "b"),
            Self::Rc => write!(f, "rc"),
        }
    }
}

/// A pre-release qualifier, e.g. the `a1` in `1.2.3a1`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Prerelease {
    /// Alpha, beta or release candidate
    pub kind: PrereleaseKind,
    /// The number after the keyword, 0 when omitted (`1.0a` is `1.0a0`)
    pub number: u64,
}

impl Display for Prerelease {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.kind, self.number)
    }
}

/// One dot-separated segment of a
/// [local version label](https://peps.python.org/pep-0440/#local-version-identifiers),
/// e.g. `ubuntu` and `1` in `1.0+ubuntu.1`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LocalSegment {
    /// A segment with at least one letter, lowercased
    String(String),
    /// An all-digit segment
    Number(u64),
}

impl From<&str> for LocalSegment {
    fn from(segment: &str) -> Self {
        if let Ok(number) = segment.parse::<u64>() {
            Self::Number(number)
        } else {
            // "that segment is compared lexicographically with case insensitivity"
            Self::String(segment.to_lowercase())
        }
    }
}

impl Display for LocalSegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(string) => write!(f, "{string}"),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

impl PartialOrd for LocalSegment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LocalSegment {
    /// Numeric segments compare numerically and string segments
    /// lexicographically. A numeric segment orders before any string segment,
    /// so `1.0+1 < 1.0+abc`.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(n1), Self::Number(n2)) => n1.cmp(n2),
            (Self::String(s1), Self::String(s2)) => s1.cmp(s2),
            (Self::Number(_), Self::String(_)) => Ordering::Less,
            (Self::String(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

/// A [PEP 440](https://peps.python.org/pep-0440/) version number, such as
/// `1.2.3` or `4!5.6.7a8.post9.dev0+abc.1`.
///
/// Values are canonical by construction: parsing normalizes spelling variants
/// away (`1.0RC1`, `1.0.rc-1` and `1.0c1` are the same version), and
/// [`Display`] renders the normal form. The [`Ord`] implementation is the
/// total order over versions, with equal meaning interchangeable
/// (`1.0 == 1.0.0`).
///
/// Parse with [`Version::from_str`]:
///
/// ```rust
/// use std::str::FromStr;
/// use vercheck_pep440::Version;
///
/// let version = Version::from_str("1.19").unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct Version {
    epoch: u64,
    release: Vec<u64>,
    pre: Option<Prerelease>,
    post: Option<u64>,
    dev: Option<u64>,
    local: Option<Vec<LocalSegment>>,
}

impl Version {
    /// Creates a version that is just a release, such as `3.8`.
    pub fn new(release: impl IntoIterator<Item = u64>) -> Self {
        Self {
            epoch: 0,
            release: release.into_iter().collect(),
            pre: None,
            post: None,
            dev: None,
            local: None,
        }
    }

    /// The [versioning epoch](https://peps.python.org/pep-0440/#version-epochs).
    /// Normally just 0, but it trumps everything else in the order:
    /// `1!1.0 > 99.9`.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The release segments, such as `[1, 2, 3]` in `4!1.2.3a8`. Trailing
    /// zeros are insignificant when comparing.
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    /// The [pre-release](https://peps.python.org/pep-0440/#pre-releases)
    /// qualifier, if any.
    pub fn pre(&self) -> Option<Prerelease> {
        self.pre
    }

    /// The [post-release](https://peps.python.org/pep-0440/#post-releases)
    /// number, if any. Higher post versions order over lower or absent ones.
    pub fn post(&self) -> Option<u64> {
        self.post
    }

    /// The [developmental release](https://peps.python.org/pep-0440/#developmental-releases)
    /// number, if any.
    pub fn dev(&self) -> Option<u64> {
        self.dev
    }

    /// The segments of the
    /// [local version label](https://peps.python.org/pep-0440/#local-version-identifiers),
    /// such as `+deadbeef` in `1.2.3+deadbeef`, if any.
    pub fn local(&self) -> Option<&[LocalSegment]> {
        self.local.as_deref()
    }

    /// Whether this is an alpha/beta/rc or dev version.
    pub fn any_prerelease(&self) -> bool {
        self.is_pre() || self.is_dev()
    }

    /// Whether this is an alpha/beta/rc version.
    pub fn is_pre(&self) -> bool {
        self.pre.is_some()
    }

    /// Whether this is a post version.
    pub fn is_post(&self) -> bool {
        self.post.is_some()
    }

    /// Whether this is a dev version.
    pub fn is_dev(&self) -> bool {
        self.dev.is_some()
    }

    /// Whether this version carries a local version label.
    pub fn is_local(&self) -> bool {
        self.local.is_some()
    }

    /// Returns this version with the given epoch.
    #[must_use]
    pub fn with_epoch(mut self, epoch: u64) -> Self {
        self.epoch = epoch;
        self
    }

    /// Returns this version with the given pre-release qualifier.
    #[must_use]
    pub fn with_pre(mut self, pre: Option<Prerelease>) -> Self {
        self.pre = pre;
        self
    }

    /// Returns this version with the given post-release number.
    #[must_use]
    pub fn with_post(mut self, post: Option<u64>) -> Self {
        self.post = post;
        self
    }

    /// Returns this version with the given dev-release number.
    #[must_use]
    pub fn with_dev(mut self, dev: Option<u64>) -> Self {
        self.dev = dev;
        self
    }

    /// Returns this version with the given local version segments.
    #[must_use]
    pub fn with_local(mut self, local: Vec<LocalSegment>) -> Self {
        self.local = if local.is_empty() { None } else { Some(local) };
        self
    }

    /// Orders the qualifiers attached to an equal release.
    ///
    /// Per the
    /// [summary of permitted suffixes](https://peps.python.org/pep-0440/#summary-of-permitted-suffixes-and-relative-ordering)
    /// the stages are `.devN < aN < bN < rcN < final < .postN`, but post and
    /// dev releases can also ride on a pre-release, so the key is
    /// `(stage, pre number, post number, dev slot, local)`. An absent post
    /// sorts first (`1.0a1 < 1.0a1.post0`). An absent dev sorts last, after
    /// every present dev number including `u64::MAX`, so absence is its own
    /// part of the dev slot instead of a sentinel number.
    fn suffix_key(&self) -> (u64, u64, Option<u64>, (u64, u64), Option<&[LocalSegment]>) {
        match (self.pre, self.post, self.dev) {
            (None, None, Some(dev)) => (0, 0, None, (0, dev), self.local()),
            (Some(Prerelease { kind, number }), post, dev) => {
                let stage = match kind {
                    PrereleaseKind::Alpha => 1,
                    PrereleaseKind::Beta => 2,
                    PrereleaseKind::Rc => 3,
                };
                (stage, number, post, dev_slot(dev), self.local())
            }
            (None, None, None) => (4, 0, None, dev_slot(None), self.local()),
            (None, Some(post), dev) => (5, 0, Some(post), dev_slot(dev), self.local()),
        }
    }
}

/// Shows the normalized form, e.g. `1.0-r5` as `1.0.post5`.
impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.epoch != 0 {
            write!(f, "{}!", self.epoch)?;
        }
        for (i, segment) in self.release.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{segment}")?;
        }
        if let Some(pre) = self.pre {
            write!(f, "{pre}")?;
        }
        if let Some(post) = self.post {
            write!(f, ".post{post}")?;
        }
        if let Some(dev) = self.dev {
            write!(f, ".dev{dev}")?;
        }
        if let Some(local) = self.local() {
            write!(f, "+")?;
            for (i, segment) in local.iter().enumerate() {
                if i > 0 {
                    write!(f, ".")?;
                }
                write!(f, "{segment}")?;
            }
        }
        Ok(())
    }
}

/// The dev part of the suffix key: `(absent, number)`. Any present dev
/// number orders before absence, `1.0a1.dev18446744073709551615 < 1.0a1`.
fn dev_slot(dev: Option<u64>) -> (u64, u64) {
    dev.map_or((1, 0), |dev| (0, dev))
}

/// Compares release segments, zero-padding the shorter side, so
/// `1.1.0 == 1.1` and `1.16 < 1.19`.
fn compare_release(this: &[u64], other: &[u64]) -> Ordering {
    // "When comparing release segments with different numbers of components,
    // the shorter segment is padded out with additional zeros as necessary"
    let len = max(this.len(), other.len());
    let this = this.iter().copied().chain(iter::repeat(0)).take(len);
    let other = other.iter().copied().chain(iter::repeat(0)).take(len);
    this.cmp(other)
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    /// Skips trailing release zeros so that hashing agrees with the
    /// zero-padding equality.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.epoch.hash(state);
        let mut release = self.release.as_slice();
        while let [rest @ .., 0] = release {
            release = rest;
        }
        release.hash(state);
        self.pre.hash(state);
        self.post.hash(state);
        self.dev.hash(state);
        self.local.hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    /// `1.0.dev456 < 1.0a1 < 1.0a2.dev456 < 1.0a12 < 1.0b1.dev456 < 1.0b2
    /// < 1.0b2.post345 < 1.0rc1 < 1.0 < 1.0+abc < 1.0.post456 < 1.1.dev1`
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| compare_release(&self.release, &other.release))
            .then_with(|| self.suffix_key().cmp(&other.suffix_key()))
    }
}

/// <https://github.com/serde-rs/serde/issues/1316#issue-332908452>
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        FromStr::from_str(&string).map_err(de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl FromStr for Version {
    type Err = InvalidVersion;

    /// Parses a version such as `1.19`, `1.0a1`, `4!1.2.post2.dev1+ubuntu.1`.
    ///
    /// The accepted syntax is the
    /// [permissive PEP 440 surface](https://peps.python.org/pep-0440/#normalization):
    /// letters are case-insensitive, `.`/`-`/`_` are interchangeable around
    /// qualifiers, qualifier numbers may be omitted (meaning 0), a post
    /// release can be spelled `-N`, and one leading `v` plus surrounding
    /// whitespace are ignored.
    fn from_str(version: &str) -> Result<Self, Self::Err> {
        Parser::new(version).parse()
    }
}

const PRE_KEYWORDS: &[(&str, PrereleaseKind)] = &[
    ("alpha", PrereleaseKind::Alpha),
    ("beta", PrereleaseKind::Beta),
    ("preview", PrereleaseKind::Rc),
    ("pre", PrereleaseKind::Rc),
    ("rc", PrereleaseKind::Rc),
    ("a", PrereleaseKind::Alpha),
    ("b", PrereleaseKind::Beta),
    ("c", PrereleaseKind::Rc),
];

const POST_KEYWORDS: &[&str] = &["post", "rev", "r"];

/// A left-to-right scanner over the version grammar
/// `[v][N!]N(.N)*[{a|b|rc}N][.postN][.devN][+local]`.
///
/// Each qualifier is committed greedily; where a separator could belong to a
/// later qualifier the scanner snapshots the cursor and backs up, so `1.0.rc1`
/// leaves the dot to the pre-release and `1.0.x1` reports `x` as the problem.
struct Parser<'a> {
    input: &'a str,
    s: Scanner<'a>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            s: Scanner::new(input),
        }
    }

    fn parse(mut self) -> Result<Version, InvalidVersion> {
        self.s.eat_while(|c: char| c.is_whitespace());
        if self.s.done() {
            return Err(self.error(Reason::Empty));
        }
        self.s.eat_if(['v', 'V']);

        let (epoch, first) = match self.number()? {
            Some(number) => {
                if self.s.eat_if('!') {
                    let first = self
                        .number()?
                        .ok_or_else(|| self.error(Reason::MissingRelease))?;
                    (number, first)
                } else {
                    (0, number)
                }
            }
            None => return Err(self.error(Reason::MissingRelease)),
        };

        let mut release = vec![first];
        loop {
            let snapshot = self.s.cursor();
            if !self.s.eat_if('.') {
                break;
            }
            // The dot may introduce a qualifier instead, as in `1.0.post1`.
            match self.number()? {
                Some(segment) => release.push(segment),
                None => {
                    self.s.jump(snapshot);
                    break;
                }
            }
        }

        let pre = self.pre_release()?;
        let post = self.post_release()?;
        let dev = self.dev_release()?;
        let local = self.local_label()?;

        self.s.eat_while(|c: char| c.is_whitespace());
        if !self.s.done() {
            return Err(self.trailing_error());
        }

        Ok(Version {
            epoch,
            release,
            pre,
            post,
            dev,
            local,
        })
    }

    /// Eats a run of ASCII digits. An empty run is `None`, not an error,
    /// since most numbers in the grammar are optional.
    fn number(&mut self) -> Result<Option<u64>, InvalidVersion> {
        let digits = self.s.eat_while(|c: char| c.is_ascii_digit());
        if digits.is_empty() {
            return Ok(None);
        }
        match digits.parse::<u64>() {
            Ok(number) => Ok(Some(number)),
            Err(_) => Err(self.error(Reason::NumberTooLarge {
                number: digits.to_string(),
            })),
        }
    }

    /// Eats one of the interchangeable qualifier separators.
    fn separator(&mut self) -> bool {
        self.s.eat_if(['.', '-', '_'])
    }

    /// Eats `keyword` case-insensitively.
    fn keyword(&mut self, keyword: &str) -> bool {
        let end = self.s.cursor() + keyword.len();
        match self.input.get(self.s.cursor()..end) {
            Some(candidate) if candidate.eq_ignore_ascii_case(keyword) => {
                self.s.jump(end);
                true
            }
            _ => false,
        }
    }

    fn pre_release(&mut self) -> Result<Option<Prerelease>, InvalidVersion> {
        let snapshot = self.s.cursor();
        self.separator();
        // Longest keyword first, so `alpha` isn't cut short as `a`.
        let Some(kind) = PRE_KEYWORDS
            .iter()
            .find(|(keyword, _)| self.keyword(keyword))
            .map(|(_, kind)| *kind)
        else {
            self.s.jump(snapshot);
            return Ok(None);
        };
        self.separator();
        let number = self.number()?.unwrap_or_default();
        Ok(Some(Prerelease { kind, number }))
    }

    fn post_release(&mut self) -> Result<Option<u64>, InvalidVersion> {
        let snapshot = self.s.cursor();
        // The implicit form: `1.0-5` is `1.0.post5`.
        if self.s.eat_if('-') {
            if let Some(number) = self.number()? {
                return Ok(Some(number));
            }
            self.s.jump(snapshot);
        }
        self.separator();
        if !POST_KEYWORDS.iter().any(|keyword| self.keyword(keyword)) {
            self.s.jump(snapshot);
            return Ok(None);
        }
        self.separator();
        Ok(Some(self.number()?.unwrap_or_default()))
    }

    fn dev_release(&mut self) -> Result<Option<u64>, InvalidVersion> {
        let snapshot = self.s.cursor();
        self.separator();
        if !self.keyword("dev") {
            self.s.jump(snapshot);
            return Ok(None);
        }
        self.separator();
        Ok(Some(self.number()?.unwrap_or_default()))
    }

    fn local_label(&mut self) -> Result<Option<Vec<LocalSegment>>, InvalidVersion> {
        if !self.s.eat_if('+') {
            return Ok(None);
        }
        let mut segments = Vec::new();
        loop {
            let segment = self.s.eat_while(|c: char| c.is_ascii_alphanumeric());
            if segment.is_empty() {
                return Err(self.error(Reason::EmptyLocalSegment));
            }
            segments.push(LocalSegment::from(segment));
            if !self.separator() {
                break;
            }
        }
        Ok(Some(segments))
    }

    /// The grammar is consumed but input remains. If the leftover starts with
    /// a word (after an optional separator) it was meant as a qualifier.
    fn trailing_error(&self) -> InvalidVersion {
        let after = self.s.after();
        let word: String = after
            .strip_prefix(['.', '-', '_'])
            .unwrap_or(after)
            .chars()
            .take_while(char::is_ascii_alphabetic)
            .collect();
        if word.is_empty() {
            self.error(Reason::Trailing {
                remainder: after.trim_end().to_string(),
            })
        } else {
            self.error(Reason::UnexpectedQualifier { word })
        }
    }

    fn error(&self, reason: Reason) -> InvalidVersion {
        InvalidVersion {
            inner: Box::new(InvalidVersionInner {
                input: self.input.to_string(),
                reason,
            }),
        }
    }
}

/// An error when parsing a [`Version`].
///
/// Carries the rejected input, so `parse_and_compare` callers can tell which
/// of their two strings was at fault. Boxed innards keep
/// `Result<Version, InvalidVersion>` at one word.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvalidVersion {
    inner: Box<InvalidVersionInner>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct InvalidVersionInner {
    input: String,
    reason: Reason,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Reason {
    Empty,
    MissingRelease,
    NumberTooLarge { number: String },
    UnexpectedQualifier { word: String },
    EmptyLocalSegment,
    Trailing { remainder: String },
}

impl InvalidVersion {
    /// The input that failed to parse, verbatim.
    pub fn input(&self) -> &str {
        &self.inner.input
    }
}

impl Display for InvalidVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid version `{}`: {}", self.inner.input, self.inner.reason)
    }
}

impl Display for Reason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "version string is empty"),
            Self::MissingRelease => write!(f, "expected a release number"),
            Self::NumberTooLarge { number } => {
                write!(f, "the number `{number}` is too large")
            }
            Self::UnexpectedQualifier { word } => {
                write!(f, "unexpected qualifier `{word}`")
            }
            Self::EmptyLocalSegment => {
                write!(f, "expected an alphanumeric segment in the local version label")
            }
            Self::Trailing { remainder } => {
                write!(f, "trailing characters `{remainder}`")
            }
        }
    }
}

impl std::error::Error for InvalidVersion {}
