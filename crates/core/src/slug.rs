//! Slug derivation for public lookup keys.

/// Derive a URL slug from a display name.
///
/// Lowercases the input and collapses every run of non-`[a-z0-9]`
/// characters to a single `-`. The transform is deliberately identical to
/// what the directory has always stored, so existing slugs keep resolving.
///
/// # Examples
///
/// ```
/// use aidex_core::slug::slugify;
///
/// assert_eq!(slugify("Dall E 2"), "dall-e-2");
/// assert_eq!(slugify("WriteGenius"), "writegenius");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_separator = false;

    for ch in name.chars() {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            slug.push(ch);
            in_separator = false;
        } else if !in_separator {
            slug.push('-');
            in_separator = true;
        }
    }

    slug
}

/// Append a numeric suffix to a base slug (`foo` -> `foo-2`).
///
/// Used by the store layer to regenerate a slug on uniqueness collision.
pub fn with_suffix(base: &str, n: u32) -> String {
    format!("{base}-{n}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_become_hyphens() {
        assert_eq!(slugify("Dall E 2"), "dall-e-2");
    }

    #[test]
    fn single_word_lowercased() {
        assert_eq!(slugify("WriteGenius"), "writegenius");
    }

    #[test]
    fn punctuation_runs_collapse() {
        assert_eq!(slugify("GPT-4 (Turbo)!"), "gpt-4-turbo-");
    }

    #[test]
    fn digits_preserved() {
        assert_eq!(slugify("Tool2000"), "tool2000");
    }

    #[test]
    fn empty_input() {
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn leading_separator_not_trimmed() {
        // The historical transform never trimmed edge hyphens; keep it
        // deterministic against stored data.
        assert_eq!(slugify(" Foo"), "-foo");
    }

    #[test]
    fn suffix_format() {
        assert_eq!(with_suffix("dall-e-2", 3), "dall-e-2-3");
    }
}
