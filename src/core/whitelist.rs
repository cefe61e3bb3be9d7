use std::collections::BTreeSet;

/// Token produced by `git branch -r` for the `origin/HEAD -> origin/master` line.
pub const LISTING_ARROW: &str = "->";
pub const CANONICAL_MAINLINE: &str = "master";

/// Refs that must never be deleted during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Whitelist {
    refs: BTreeSet<String>,
}

impl Whitelist {
    /// Protects the target branch, the remote HEAD pointer, the listing arrow,
    /// every extra name given by the user, and always `<source>/master`.
    pub fn build<S: AsRef<str>>(source: &str, target: &str, extra: &[S]) -> Self {
        let mut refs = BTreeSet::new();
        refs.insert(format!("{}/{}", source, target));
        refs.insert(format!("{}/HEAD", source));
        refs.insert(LISTING_ARROW.to_string());

        for name in extra {
            refs.insert(format!("{}/{}", source, name.as_ref()));
        }

        refs.insert(format!("{}/{}", source, CANONICAL_MAINLINE));

        Self { refs }
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.refs.contains(reference)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.refs.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_whitelist() {
        let whitelist = Whitelist::build::<&str>("origin", "master", &[]);
        let refs: Vec<&str> = whitelist.iter().collect();
        assert_eq!(refs, vec!["->", "origin/HEAD", "origin/master"]);
    }

    #[test]
    fn test_master_protected_for_other_targets() {
        let whitelist = Whitelist::build("upstream", "develop", &["release", "hotfix/1.2"]);

        assert!(whitelist.contains("upstream/develop"));
        assert!(whitelist.contains("upstream/master"));
        assert!(whitelist.contains("upstream/HEAD"));
        assert!(whitelist.contains("upstream/release"));
        assert!(whitelist.contains("upstream/hotfix/1.2"));
        assert!(whitelist.contains(LISTING_ARROW));
        assert_eq!(whitelist.len(), 6);
    }

    #[test]
    fn test_whitelist_is_exact_match() {
        let whitelist = Whitelist::build("origin", "master", &["release"]);
        assert!(!whitelist.contains("origin/release-2"));
        assert!(!whitelist.contains("backup/release"));
        assert!(!whitelist.contains("release"));
    }

    #[test]
    fn test_duplicate_entries_collapse() {
        let whitelist = Whitelist::build("origin", "master", &["master", "HEAD"]);
        assert_eq!(whitelist.len(), 3);
        assert!(!whitelist.is_empty());
    }
}
