use std::cmp::Ordering;
use std::fmt;

/// Parsed version components
///
/// Parsed from arbitrary version text against a grammar tolerant of
/// missing trailing segments: "1.2" and "1" are valid, a trailing
/// `-<integer>` is a build number, any other `-` suffix is a qualifier.
/// Input with a non-numeric leading segment degrades to all-zero
/// components with the whole text as qualifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionComponents {
    pub major: u32,
    pub minor: u32,
    pub incremental: u32,
    pub build_number: u32,
    pub qualifier: String,
}

impl VersionComponents {
    /// Create components with an empty qualifier
    pub fn new(major: u32, minor: u32, incremental: u32) -> Self {
        VersionComponents {
            major,
            minor,
            incremental,
            build_number: 0,
            qualifier: String::new(),
        }
    }

    /// Parse version text, degrading to qualifier-only on unparseable input.
    ///
    /// Never fails: `"not.a.version"` yields `{0,0,0,0,"not.a.version"}`.
    pub fn parse(text: &str) -> Self {
        Self::parse_strict(text).unwrap_or_else(|| VersionComponents {
            major: 0,
            minor: 0,
            incremental: 0,
            build_number: 0,
            qualifier: text.to_string(),
        })
    }

    /// Parse version text, or `None` when the leading numeric segments
    /// do not form a valid `major[.minor[.incremental[.build]]]` prefix.
    pub fn parse_strict(text: &str) -> Option<Self> {
        let (head, tail) = match text.split_once('-') {
            Some((head, tail)) => (head, Some(tail)),
            None => (text, None),
        };

        let segments: Vec<&str> = head.split('.').collect();
        if segments.is_empty() || segments.len() > 4 {
            return None;
        }

        let mut numbers = [0u32; 4];
        for (index, segment) in segments.iter().enumerate() {
            numbers[index] = segment.parse().ok()?;
        }

        let mut components = VersionComponents {
            major: numbers[0],
            minor: numbers[1],
            incremental: numbers[2],
            build_number: numbers[3],
            qualifier: String::new(),
        };

        if let Some(tail) = tail {
            match tail.parse::<u32>() {
                Ok(build) => components.build_number = build,
                Err(_) => components.qualifier = tail.to_string(),
            }
        }

        Some(components)
    }

    pub fn next_major(&self) -> u32 {
        self.major + 1
    }

    pub fn next_minor(&self) -> u32 {
        self.minor + 1
    }

    pub fn next_incremental(&self) -> u32 {
        self.incremental + 1
    }

    pub fn next_build_number(&self) -> u32 {
        self.build_number + 1
    }
}

/// Total order used for tag ranking: major, minor, incremental and
/// build number numerically, then qualifier with "no qualifier" ranked
/// above any qualifier (release > pre-release of the same triple) and
/// qualifiers compared byte-wise.
impl Ord for VersionComponents {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.incremental, self.build_number)
            .cmp(&(other.major, other.minor, other.incremental, other.build_number))
            .then_with(|| {
                match (self.qualifier.is_empty(), other.qualifier.is_empty()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    (false, false) => self.qualifier.cmp(&other.qualifier),
                }
            })
    }
}

impl PartialOrd for VersionComponents {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.incremental)
    }
}
