//! Stable sorting utilities.
//!
//! Canonical ordering is byte-wise lexicographic order of serialized statement
//! texts. These helpers keep that rule in one auditable place:
//! - ordering never depends on `HashMap` iteration or document traversal
//! - equal keys keep their relative order (stable sort)
//! - received collections can be checked for sortedness

use crate::errors::{DisclosureError, DisclosureResult};

/// Sort items by the bytes of a string key, stably.
///
/// `str` ordering in Rust is byte-wise, which is exactly the canonical order.
pub fn sort_by_text_bytes<T, F>(items: &mut [T], key_fn: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| key_fn(a).as_bytes().cmp(key_fn(b).as_bytes()));
}

/// Ensure a slice is already sorted by a byte-wise string key.
///
/// Returns the position of the first out-of-order element in the error.
pub fn ensure_sorted<T, F>(items: &[T], key_fn: F) -> DisclosureResult<()>
where
    F: Fn(&T) -> &str,
{
    for (i, w) in items.windows(2).enumerate() {
        if key_fn(&w[0]).as_bytes() > key_fn(&w[1]).as_bytes() {
            return Err(DisclosureError::malformed_document(format!(
                "canonical set is not sorted at position {}",
                i + 1
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_bytewise_not_by_locale() {
        let mut v = vec!["b".to_string(), "B".to_string(), "a".to_string()];
        sort_by_text_bytes(&mut v, |s| s.as_str());
        assert_eq!(v, vec!["B", "a", "b"]);
    }

    #[test]
    fn ensure_sorted_detects_unsorted() {
        let v = vec!["a", "c", "b"];
        let err = ensure_sorted(&v, |s| *s).err().unwrap();
        assert!(err.to_string().contains("not sorted at position 2"));
    }

    #[test]
    fn ensure_sorted_accepts_duplicates() {
        let v = vec!["a", "a", "b"];
        ensure_sorted(&v, |s| *s).unwrap();
    }
}
