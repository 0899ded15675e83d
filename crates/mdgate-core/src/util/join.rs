//! List joining for the tool's comma-separated positional arguments.
//!
//! Entries are joined verbatim, keeping order and duplicates. An entry that
//! itself contains the separator cannot be told apart from two entries on
//! the tool side; such entries are reported, not escaped.

use std::borrow::Borrow;

/// Separator between entries of a joined argument.
pub const SEPARATOR: &str = ",";

/// Join `items` with [`SEPARATOR`].
pub fn join_list<S: Borrow<str>>(items: &[S]) -> String {
    items.join(SEPARATOR)
}

/// Entries that contain [`SEPARATOR`] and will be split by the tool.
pub fn ambiguous_entries<S: AsRef<str>>(items: &[S]) -> Vec<&str> {
    items
        .iter()
        .map(|item| item.as_ref())
        .filter(|item: &&str| item.contains(SEPARATOR))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_in_given_order_with_duplicates() {
        let items = ["/a/Foo.php", "/a/Bar.php", "/a/Foo.php"];
        assert_eq!(join_list(&items), "/a/Foo.php,/a/Bar.php,/a/Foo.php");
    }

    #[test]
    fn empty_list_joins_to_empty_argument() {
        let items: [&str; 0] = [];
        assert_eq!(join_list(&items), "");
    }

    #[test]
    fn single_entry_has_no_separator() {
        assert_eq!(join_list(&["cleancode"]), "cleancode");
    }

    #[test]
    fn embedded_separator_is_kept_and_reported() {
        let items = vec!["/src/a,b.php".to_string(), "/src/c.php".to_string()];
        assert_eq!(join_list(&items), "/src/a,b.php,/src/c.php");
        assert_eq!(ambiguous_entries(&items), vec!["/src/a,b.php"]);
    }

    #[test]
    fn clean_entries_are_not_ambiguous() {
        assert!(ambiguous_entries(&["codesize", "naming"]).is_empty());
    }
}
