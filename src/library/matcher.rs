use std::sync::LazyLock;

use regex::Regex;

pub const DEFAULT_PLAYLIST_PREFIX: &str = "pitchfork best albums";

static MONTH_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}$").expect("static regex"));

const SEPARATORS: [char; 4] = [':', '-', '–', '|'];

/// Tests whether `name` is `<prefix> <yyyy-mm>`.
///
/// Case and surrounding whitespace are ignored, and separators such as
/// `:`, `-`, `–` or `|` may sit between prefix and date, so
/// `"Pitchfork Best Albums: 2024-05"` matches the default prefix.
pub fn matches_playlist_name(name: &str, prefix: &str) -> bool {
    let name = name.trim().to_lowercase();
    let prefix = prefix.trim().to_lowercase();

    let Some(rest) = name.strip_prefix(prefix.as_str()) else {
        return false;
    };

    let date = rest.trim().trim_start_matches(SEPARATORS).trim();
    MONTH_SUFFIX.is_match(date)
}
