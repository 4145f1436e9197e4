use std::sync::LazyLock;

use regex::Regex;

static NON_ALNUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Canonicalize label text for keyword comparison.
///
/// The page's markup is inconsistent across years, so all matching runs over
/// a flattened form: entities and en-dashes rewritten, ordinal indicators
/// (`º`/`ª`) dropped, accents folded to base letters, lowercased, and every
/// run of non-alphanumeric characters collapsed to a single space.
/// The rule order matters; later steps assume the earlier ones already ran.
pub fn normalize(text: &str) -> String {
    let text = text
        .replace("&nbsp;", " ")
        .replace('\u{a0}', " ")
        .replace('–', "-");
    let text = text.replace(['º', 'ª'], "");
    let folded: String = text.chars().map(fold_diacritic).collect();
    let lower = folded.to_lowercase();
    NON_ALNUM_RE.replace_all(&lower, " ").trim().to_string()
}

/// Map an accented Latin letter to its base letter. Covers the accented set
/// that occurs in the page's Portuguese labels; anything else passes through
/// (and falls to the non-alphanumeric collapse if it isn't a-z0-9).
fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        _ => c,
    }
}
