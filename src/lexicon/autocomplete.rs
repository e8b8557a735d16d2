//! Prefix completion over registered word-forms, backed by a radix trie.

use radix_trie::{Trie, TrieCommon};

/// Byte length of the longest common prefix, on a char boundary.
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()))
}

/// Auto-completer over a set of strings.
#[derive(Debug, Clone)]
pub struct Autocompleter {
    trie: Trie<String, ()>,
}

impl Default for Autocompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl Autocompleter {
    pub fn new() -> Self {
        Self { trie: Trie::new() }
    }

    /// Register a string. Duplicates are ignored.
    pub fn add(&mut self, key: &str) {
        self.trie.insert(key.to_string(), ());
    }

    /// Unregister a string. Absent strings are ignored.
    pub fn remove(&mut self, key: &str) {
        self.trie.remove(key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.trie.get(key).is_some()
    }

    /// Number of registered strings.
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.len() == 0
    }

    /// Registered strings starting with `prefix`, in trie order.
    fn matching(&self, prefix: &str) -> Vec<&str> {
        if prefix.is_empty() {
            return self.trie.keys().map(String::as_str).collect();
        }
        // The closest descendant may hold keys diverging inside the last
        // nibble of the prefix.
        self.trie
            .get_raw_descendant(prefix)
            .map(|sub| {
                sub.keys()
                    .map(String::as_str)
                    .filter(|k| k.starts_with(prefix))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Extend `prefix` as far as every registered string starting with it
    /// agrees. Returns `prefix` unchanged if no registered string starts with it.
    pub fn complete(&self, prefix: &str) -> String {
        let matching = self.matching(prefix);
        let Some((first, rest)) = matching.split_first() else {
            return prefix.to_string();
        };
        let len = rest
            .iter()
            .fold(first.len(), |len, k| common_prefix_len(&first[..len], k));
        first[..len].to_string()
    }

    /// Registered strings starting with `prefix`, ordered case-insensitively
    /// (ties broken by exact comparison) and truncated to `limit`.
    /// A negative limit returns every candidate.
    pub fn candidates(&self, prefix: &str, limit: i32) -> Vec<String> {
        let mut out: Vec<String> = self
            .matching(prefix)
            .into_iter()
            .map(str::to_string)
            .collect();
        out.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        if let Ok(limit) = usize::try_from(limit) {
            out.truncate(limit);
        }
        out
    }

    /// Every registered string starting with `prefix`.
    pub fn all_candidates(&self, prefix: &str) -> Vec<String> {
        self.candidates(prefix, -1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_to_shared_prefix() {
        let mut ac = Autocompleter::new();
        ac.add("leaf");
        ac.add("leaves");
        assert_eq!(ac.complete("lea"), "lea");
        assert_eq!(ac.complete("l"), "lea");
        assert_eq!(ac.complete("leav"), "leaves");

        ac.remove("leaves");
        assert_eq!(ac.complete("lea"), "leaf");
        assert_eq!(ac.len(), 1);
    }

    #[test]
    fn unknown_prefix_is_returned_unchanged() {
        let mut ac = Autocompleter::new();
        ac.add("dog");
        assert_eq!(ac.complete("cat"), "cat");
        assert_eq!(ac.complete("dogs"), "dogs");
        assert_eq!(Autocompleter::new().complete(""), "");
    }

    #[test]
    fn completion_stops_at_registered_word() {
        let mut ac = Autocompleter::new();
        ac.add("man");
        ac.add("mankind");
        assert_eq!(ac.complete("m"), "man");
        assert_eq!(ac.complete("mank"), "mankind");
    }

    #[test]
    fn duplicate_add_and_absent_remove_are_ignored() {
        let mut ac = Autocompleter::new();
        ac.add("dog");
        ac.add("dog");
        assert_eq!(ac.len(), 1);
        ac.remove("cat");
        ac.remove("do");
        assert_eq!(ac.len(), 1);
        assert!(ac.contains("dog"));
        assert!(!ac.contains("do"));
    }

    #[test]
    fn removal_keeps_the_other_words() {
        let mut ac = Autocompleter::new();
        for w in ["test", "team", "toast"] {
            ac.add(w);
        }
        ac.remove("team");
        assert!(ac.contains("test"));
        assert!(ac.contains("toast"));
        assert_eq!(ac.all_candidates("te"), vec!["test"]);
        ac.remove("test");
        ac.remove("toast");
        assert!(ac.is_empty());
        assert_eq!(ac.complete("t"), "t");
    }

    #[test]
    fn candidates_sorted_case_insensitively() {
        let mut ac = Autocompleter::new();
        for w in ["mary", "Mark", "marble", "Mars", "john"] {
            ac.add(w);
        }
        // Prefix matching is exact, ordering is not.
        assert_eq!(ac.all_candidates("mar"), vec!["marble", "mary"]);
        assert_eq!(
            ac.all_candidates(""),
            vec!["john", "marble", "Mark", "Mars", "mary"]
        );
        assert_eq!(ac.candidates("", 2), vec!["john", "marble"]);
        assert!(ac.candidates("x", -1).is_empty());
    }

    #[test]
    fn candidates_from_mid_edge_prefix() {
        let mut ac = Autocompleter::new();
        ac.add("elephant");
        ac.add("elephants");
        assert_eq!(ac.all_candidates("ele"), vec!["elephant", "elephants"]);
    }

    #[test]
    fn handles_multibyte_labels() {
        let mut ac = Autocompleter::new();
        ac.add("über");
        ac.add("übel");
        assert_eq!(ac.complete("ü"), "übe");
        ac.remove("übel");
        assert_eq!(ac.complete("ü"), "über");
    }

    #[test]
    fn prefix_sharing_only_a_nibble_matches_nothing() {
        let mut ac = Autocompleter::new();
        ac.add("apple");
        ac.add("banana");
        // 'c' shares its high nibble with 'a' and 'b'.
        assert_eq!(ac.complete("c"), "c");
        assert!(ac.all_candidates("c").is_empty());
        assert_eq!(ac.all_candidates("b"), vec!["banana"]);
    }
}
