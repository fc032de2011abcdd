// Locale-aware name ordering
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Letters with no canonical decomposition that still read as base letters
fn expand(c: char, out: &mut String) {
    match c {
        'ß' => out.push_str("ss"),
        'æ' => out.push_str("ae"),
        'œ' => out.push_str("oe"),
        'ø' => out.push('o'),
        'ł' => out.push('l'),
        'đ' => out.push('d'),
        'ı' => out.push('i'),
        _ => out.push(c),
    }
}

/// Primary collation key: lowercase with combining marks stripped after NFD
pub fn collation_key(s: &str) -> String {
    let mut key = String::with_capacity(s.len());
    for c in s
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
    {
        expand(c, &mut key);
    }
    key
}

/// Compare names the way a reader expects in an index: base letters first,
/// then accents and case only to break ties.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}
