//! Name normalization utilities.
//!
//! Two normalizations with different jobs live here:
//!
//! - [`slugify`] builds the strict, filesystem-safe form that on-disk image
//!   files are named after. It is only used to construct file names.
//! - [`normalize_key`] builds the loose trim + lowercase form used to compare
//!   stored display names, which are never sanitized.
//!
//! Equality is exposed through two separately named functions,
//! [`names_match_exact`] and [`names_match_folded`]. Import upserts key on the
//! exact form while folder merges key on the folded form; keep them apart.

/// Default slug separator.
pub const SLUG_SEPARATOR: char = '-';

/// Converts a display name into a lowercase slug using [`SLUG_SEPARATOR`].
///
/// Every run of characters outside `[a-z0-9]` collapses into one separator,
/// and separators never lead or trail. The function is total: empty or
/// all-punctuation input yields an empty slug.
///
/// # Examples
///
/// ```
/// use tomebridge_domain::common::slugify;
///
/// assert_eq!(slugify("Bran Stark"), "bran-stark");
/// assert_eq!(slugify("  Sir  Eldon, the Bold! "), "sir-eldon-the-bold");
/// assert_eq!(slugify("???"), "");
/// ```
pub fn slugify(name: &str) -> String {
    slugify_with(name, SLUG_SEPARATOR)
}

/// [`slugify`] with an explicit separator.
pub fn slugify_with(name: &str, separator: char) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_separator = false;
    for ch in name.chars() {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push(separator);
            }
            pending_separator = false;
            out.push(ch);
        } else {
            pending_separator = true;
        }
    }
    out
}

/// Lowercases `name` and replaces every run of characters outside `[a-z0-9]`
/// with one `separator`, keeping leading and trailing runs.
///
/// Image refresh names its files this way, so `"Bran Stark!"` becomes
/// `"bran_stark_"` rather than the trimmed `"bran_stark"`.
pub fn slugify_untrimmed(name: &str, separator: char) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for ch in name.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            in_run = false;
            out.push(ch);
        } else if !in_run {
            in_run = true;
            out.push(separator);
        }
    }
    out
}

/// Trims and lowercases a display name for equality comparison.
///
/// Never use this to build file names; see [`slugify`].
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Raw string equality, as used by the import upsert lookup.
pub fn names_match_exact(a: &str, b: &str) -> bool {
    a == b
}

/// Trimmed, case-insensitive equality, as used by folder merges and folder lookup.
pub fn names_match_folded(a: &str, b: &str) -> bool {
    normalize_key(a) == normalize_key(b)
}

/// Percent-encodes `text` the way a URI component is encoded.
///
/// Bytes outside `A-Z a-z 0-9 - _ . ! ~ * ' ( )` are written as `%XX` with
/// uppercase hex, operating on the UTF-8 encoding.
///
/// ```
/// use tomebridge_domain::common::encode_uri_component;
///
/// assert_eq!(encode_uri_component("Bran Stark artwork"), "Bran%20Stark%20artwork");
/// ```
pub fn encode_uri_component(text: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        let unreserved = byte.is_ascii_alphanumeric()
            || matches!(byte, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')');
        if unreserved {
            out.push(char::from(byte));
        } else {
            out.push('%');
            out.push(char::from(HEX[usize::from(byte >> 4)]));
            out.push(char::from(HEX[usize::from(byte & 0x0f)]));
        }
    }
    out
}

/// Converts an empty string to `None`, otherwise returns `Some(value)`.
pub fn none_if_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_clean_slug(slug: &str, separator: char) -> bool {
        !slug.starts_with(separator)
            && !slug.ends_with(separator)
            && !slug.contains(&format!("{separator}{separator}"))
            && slug
                .chars()
                .all(|c| c == separator || c.is_ascii_lowercase() || c.is_ascii_digit())
    }

    #[test]
    fn test_slugify_lowercases_and_joins_words() {
        assert_eq!(slugify("Adrian"), "adrian");
        assert_eq!(slugify("Bran Stark"), "bran-stark");
        assert_eq!(slugify("Old Tom No. 7"), "old-tom-no-7");
    }

    #[test]
    fn test_slugify_collapses_punctuation_runs() {
        assert_eq!(slugify("Ser -- Jorah   (the Andal)"), "ser-jorah-the-andal");
        assert_eq!(slugify("O'Brien"), "o-brien");
    }

    #[test]
    fn test_slugify_is_total() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_output_is_always_clean() {
        let names = [
            " Lady  Mormont ",
            "--Guard--",
            "Élodie d'Arcy",
            "Captain #3: the Return",
            "a.b.c",
            "\tTabs\tand\nnewlines\n",
        ];
        for name in names {
            let slug = slugify(name);
            assert!(is_clean_slug(&slug, '-'), "{name:?} -> {slug:?}");
            let underscored = slugify_with(name, '_');
            assert!(is_clean_slug(&underscored, '_'), "{name:?} -> {underscored:?}");
        }
    }

    #[test]
    fn test_slugify_with_underscore() {
        assert_eq!(slugify_with("Bran Stark", '_'), "bran_stark");
    }

    #[test]
    fn test_slugify_untrimmed_keeps_edge_runs() {
        assert_eq!(slugify_untrimmed("Bran Stark", '_'), "bran_stark");
        assert_eq!(slugify_untrimmed("Bran Stark!", '_'), "bran_stark_");
        assert_eq!(slugify_untrimmed("  Old -- Tom ", '_'), "_old_tom_");
        assert_eq!(slugify_untrimmed("", '_'), "");
    }

    #[test]
    fn test_normalize_key_trims_and_lowercases() {
        assert_eq!(normalize_key("  Guard "), "guard");
        assert_eq!(normalize_key("NPCs"), "npcs");
        assert_eq!(normalize_key(""), "");
    }

    #[test]
    fn test_exact_and_folded_equality_differ() {
        assert!(!names_match_exact("Guard", "guard"));
        assert!(names_match_folded("Guard", " guard"));
        assert!(names_match_exact("Guard", "Guard"));
        assert!(!names_match_folded("Guard", "Guards"));
    }

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("Avarne artwork"), "Avarne%20artwork");
        assert_eq!(encode_uri_component("a/b?c&d"), "a%2Fb%3Fc%26d");
        assert_eq!(encode_uri_component("keep-_.!~*'()"), "keep-_.!~*'()");
        assert_eq!(encode_uri_component("é"), "%C3%A9");
    }

    #[test]
    fn test_none_if_empty() {
        assert_eq!(none_if_empty("hello"), Some("hello"));
        assert_eq!(none_if_empty(""), None);
        assert_eq!(none_if_empty(" "), Some(" "));
    }
}
