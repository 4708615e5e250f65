use std::{collections::HashSet, ops::Range};

/// Produce the visible list for the current search.
///
/// Pinned labels that are also candidates come first, in pin order, followed by
/// the remaining candidates in their original order. Each label appears once.
/// A non-empty `input` keeps only labels containing it, ignoring case.
pub fn filter(candidates: &[String], pinned: &[String], input: &str) -> Vec<String> {
    let known: HashSet<&str> = candidates.iter().map(String::as_str).collect();
    let mut seen = HashSet::with_capacity(candidates.len());

    pinned
        .iter()
        .filter(|label| known.contains(label.as_str()))
        .chain(candidates)
        .filter(|label| seen.insert(label.as_str()))
        .filter(|label| input.is_empty() || match_range(label, input).is_some())
        .cloned()
        .collect()
}

/// Byte range of the first case-insensitive occurrence of `input` in `label`.
///
/// Bounds always fall on char boundaries of `label`, so the range can be used
/// to slice it directly.
pub fn match_range(label: &str, input: &str) -> Option<Range<usize>> {
    if input.is_empty() {
        return None;
    }
    let needle: Vec<char> = input.chars().flat_map(char::to_lowercase).collect();

    label.char_indices().find_map(|(start, _)| {
        let mut matched = 0;
        for (offset, c) in label[start..].char_indices() {
            for lower in c.to_lowercase() {
                if matched == needle.len() || lower != needle[matched] {
                    return None;
                }
                matched += 1;
            }
            if matched == needle.len() {
                return Some(start..start + offset + c.len_utf8());
            }
        }
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_filter_substring_keeps_original_order() {
        let candidates = labels(&["main", "dev", "feature/a", "feature/b"]);
        let visible = filter(&candidates, &[], "fe");
        assert_eq!(visible, labels(&["feature/a", "feature/b"]));
    }

    #[test]
    fn test_filter_greek_sigma_is_literal_substring() {
        let candidates = labels(&["ΟΣΑ", "ΟΔΟΣ", "main"]);
        assert_eq!(filter(&candidates, &[], "ΟΣ"), labels(&["ΟΣΑ", "ΟΔΟΣ"]));
        assert_eq!(filter(&candidates, &[], "σ"), labels(&["ΟΣΑ", "ΟΔΟΣ"]));
        assert_eq!(match_range("ΟΔΟΣ", "σ"), Some(6..8));
    }

    #[test]
    fn test_filter_pinned_first() {
        let candidates = labels(&["main", "dev"]);
        let visible = filter(&candidates, &labels(&["dev"]), "");
        assert_eq!(visible, labels(&["dev", "main"]));
    }

    #[test]
    fn test_filter_pinned_in_pin_order() {
        let candidates = labels(&["a", "b", "c", "d"]);
        let visible = filter(&candidates, &labels(&["d", "b"]), "");
        assert_eq!(visible, labels(&["d", "b", "a", "c"]));
    }

    #[test]
    fn test_filter_drops_stale_pins() {
        let candidates = labels(&["main", "dev"]);
        let visible = filter(&candidates, &labels(&["gone", "dev"]), "");
        assert_eq!(visible, labels(&["dev", "main"]));
    }

    #[test]
    fn test_filter_case_insensitive() {
        let candidates = labels(&["Feature/Login", "main", "HOTFIX"]);
        assert_eq!(
            filter(&candidates, &[], "fix"),
            labels(&["HOTFIX"])
        );
        assert_eq!(
            filter(&candidates, &[], "LOGIN"),
            labels(&["Feature/Login"])
        );
    }

    #[test]
    fn test_filter_pinned_first_survives_search() {
        let candidates = labels(&["feat/one", "main", "feat/two"]);
        let visible = filter(&candidates, &labels(&["feat/two"]), "feat");
        assert_eq!(visible, labels(&["feat/two", "feat/one"]));
    }

    #[test]
    fn test_filter_no_duplicates() {
        let candidates = labels(&["main", "dev", "main", "dev"]);
        let pinned = labels(&["dev", "dev"]);
        for input in ["", "d", "m", "x"] {
            let visible = filter(&candidates, &pinned, input);
            let unique: HashSet<&String> = visible.iter().collect();
            assert_eq!(unique.len(), visible.len(), "duplicates for input {input:?}");
        }
        assert_eq!(filter(&candidates, &pinned, ""), labels(&["dev", "main"]));
    }

    #[test]
    fn test_filter_is_deterministic() {
        let candidates = labels(&["main", "dev", "feature/a", "release/1.0"]);
        let pinned = labels(&["release/1.0"]);
        let first = filter(&candidates, &pinned, "e");
        let second = filter(&candidates, &pinned, "e");
        assert_eq!(first, second);
    }

    #[test]
    fn test_filter_every_pin_precedes_unpinned() {
        let candidates = labels(&["a", "b", "c", "d", "e"]);
        let pinned = labels(&["e", "c"]);
        let visible = filter(&candidates, &pinned, "");
        let last_pinned = visible
            .iter()
            .rposition(|label| pinned.contains(label))
            .unwrap();
        let first_unpinned = visible
            .iter()
            .position(|label| !pinned.contains(label))
            .unwrap();
        assert!(last_pinned < first_unpinned);
    }

    #[test]
    fn test_filter_no_match_is_empty() {
        let candidates = labels(&["main", "dev"]);
        assert!(filter(&candidates, &[], "zzz").is_empty());
    }

    #[test]
    fn test_match_range_basic() {
        assert_eq!(match_range("feature/login", "login"), Some(8..13));
        assert_eq!(match_range("main", "MA"), Some(0..2));
        assert_eq!(match_range("main", "x"), None);
        assert_eq!(match_range("main", ""), None);
    }

    #[test]
    fn test_match_range_first_occurrence() {
        assert_eq!(match_range("dev-dev", "dev"), Some(0..3));
    }

    #[test]
    fn test_match_range_multibyte() {
        let label = "fix/Über-bug";
        let range = match_range(label, "über").unwrap();
        assert_eq!(&label[range], "Über");
    }
}
