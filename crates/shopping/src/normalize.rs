/// Plural suffix rewrite, applied to words longer than `min_len` characters.
struct SuffixRule {
    suffixes: &'static [&'static str],
    excludes: &'static [&'static str],
    min_len: usize,
    drop: usize,
    append: &'static str,
}

impl SuffixRule {
    fn matches(&self, word: &str, len: usize) -> bool {
        len > self.min_len
            && self.suffixes.iter().any(|s| word.ends_with(s))
            && !self.excludes.iter().any(|s| word.ends_with(s))
    }

    fn apply(&self, word: &str) -> String {
        // suffixes are ASCII so the cut always lands on a char boundary
        let mut singular = word[..word.len() - self.drop].to_owned();
        singular.push_str(self.append);
        singular
    }
}

/// Checked in order, first match wins.
const RULES: [SuffixRule; 5] = [
    // boxes -> box, dishes -> dish
    SuffixRule {
        suffixes: &["ches", "shes", "sses", "xes", "zes"],
        excludes: &[],
        min_len: 0,
        drop: 2,
        append: "",
    },
    // berries -> berry
    SuffixRule {
        suffixes: &["ies"],
        excludes: &[],
        min_len: 4,
        drop: 3,
        append: "y",
    },
    // leaves -> leaf
    SuffixRule {
        suffixes: &["ves"],
        excludes: &[],
        min_len: 4,
        drop: 3,
        append: "f",
    },
    // tomatoes -> tomato
    SuffixRule {
        suffixes: &["oes"],
        excludes: &[],
        min_len: 4,
        drop: 2,
        append: "",
    },
    // onions -> onion, but not glass or asparagus
    SuffixRule {
        suffixes: &["s"],
        excludes: &["ss", "us"],
        min_len: 2,
        drop: 1,
        append: "",
    },
];

/// Canonical form of an ingredient name or unit: trimmed, lowercased and
/// singularized with a fixed suffix heuristic.
///
/// The heuristic is approximate: `"caches"` becomes `"cach"` and irregular
/// plurals are left alone or mangled. Both sides of a comparison go through
/// the same rules, so the result only has to be consistent.
pub fn normalize(raw: &str) -> String {
    let word = raw.trim().to_lowercase();
    if word.is_empty() {
        return word;
    }

    let len = word.chars().count();

    match RULES.iter().find(|rule| rule.matches(&word, len)) {
        Some(rule) => rule.apply(&word),
        None => word,
    }
}

/// Two ingredients are summed together iff their merge keys are equal.
pub fn merge_key(name: &str, unit: &str) -> String {
    format!("{}|{}", normalize(name), normalize(unit))
}
