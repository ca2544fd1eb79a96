/// Parsed describe data: distance from an ancestor ref plus the
/// abbreviated commit, taken from a `<base>-<count>-g<abbrev>` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeFacts {
    pub distance: u32,
    pub abbrev: String,
}

impl DescribeFacts {
    /// Parse a describe string. The base ref name may itself contain
    /// hyphens, so the count and commit are taken from the right.
    pub fn parse(describe: &str) -> Option<Self> {
        let mut atoms = describe.rsplitn(3, '-');
        let commit_atom = atoms.next()?;
        let count_atom = atoms.next()?;

        let distance = count_atom.parse().ok()?;
        let abbrev = commit_atom.strip_prefix('g')?;
        if abbrev.is_empty() {
            return None;
        }

        Some(DescribeFacts {
            distance,
            abbrev: abbrev.to_string(),
        })
    }

    /// The abbreviated commit as it appears in the describe string
    pub fn gcommit(&self) -> String {
        format!("g{}", self.abbrev)
    }
}
