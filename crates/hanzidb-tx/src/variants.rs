use hanzidb_core::VARIANT_SEPARATOR;
use std::collections::BTreeSet;

/// Deduplicated set of variant glyphs for one character
///
/// Ordered by `(length in chars, value)`, which is also the order they are
/// joined in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantSet {
    entries: BTreeSet<(usize, String)>,
}

impl VariantSet {
    /// Collect the `|`-separated alternates of `character`
    ///
    /// Blank entries and the character itself are skipped.
    pub fn from_alternates(character: &str, alternates: &str) -> Self {
        let mut set = VariantSet::default();
        for variant in alternates.split(VARIANT_SEPARATOR) {
            let v = variant.trim();
            if !v.is_empty() && v != character {
                set.insert(v);
            }
        }
        set
    }

    pub fn insert(&mut self, variant: &str) {
        self.entries
            .insert((variant.chars().count(), variant.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, v)| v.as_str())
    }

    /// `|`-joined string form
    pub fn join(&self) -> String {
        self.iter().collect::<Vec<_>>().join(VARIANT_SEPARATOR)
    }
}
