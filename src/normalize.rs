//! Text folding shared by the name index and the hint classifiers.
//!
//! Vendors disagree on case, accents, apostrophes and hyphenation, so every
//! comparison in the matcher happens on the folded form produced here.

fn fold_char(c: char, out: &mut String) {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => out.push('a'),
        'æ' => out.push_str("ae"),
        'ç' | 'č' => out.push('c'),
        'è' | 'é' | 'ê' | 'ë' | 'ē' => out.push('e'),
        'ì' | 'í' | 'î' | 'ï' => out.push('i'),
        'ñ' => out.push('n'),
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' => out.push('o'),
        'œ' => out.push_str("oe"),
        'ß' => out.push_str("ss"),
        'ù' | 'ú' | 'û' | 'ü' | 'ū' => out.push('u'),
        'ý' | 'ÿ' => out.push('y'),
        _ => out.push(c),
    }
}

/// Fold case and diacritics, drop punctuation and collapse whitespace.
///
/// Hyphens, slashes and underscores separate words; every other
/// non-alphanumeric character is removed.
pub fn normalize(input: &str) -> String {
    let mut folded = String::with_capacity(input.len());
    for c in input.chars().flat_map(char::to_lowercase) {
        fold_char(c, &mut folded);
    }

    let mut out = String::with_capacity(folded.len());
    let mut pending_space = false;
    for c in folded.chars() {
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else if c.is_whitespace() || matches!(c, '-' | '/' | '_' | '|') {
            pending_space = true;
        }
    }
    out
}

/// Whether the folded `text` contains `phrase` on word boundaries.
///
/// Both sides are expected to be normalized already.
pub fn has_phrase(text: &str, phrase: &str) -> bool {
    if phrase.is_empty() {
        return false;
    }
    format!(" {text} ").contains(&format!(" {phrase} "))
}

/// Whether the folded `text` starts with `phrase` as whole words.
pub fn starts_with_phrase(text: &str, phrase: &str) -> bool {
    text == phrase || text.starts_with(&format!("{phrase} "))
}
