use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for guide phone numbers: exactly 10 digits starting with 0
    /// - Valid: "0812345678", "0999999999"
    /// - Invalid: "812345678", "08123456789", "08-1234567"
    pub static ref TEL_REGEX: Regex = Regex::new(r"^0[0-9]{9}$").unwrap();
}

/// Build a `LIKE ... ESCAPE '\'` pattern matching rows that contain `term`
/// as a literal substring. `%`, `_` and `\` in the term are escaped so they
/// match themselves instead of acting as wildcards.
pub fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
