use lazy_static::lazy_static;
use ron::extensions::Extensions;

lazy_static! {
    /// Shared RON options for every config file read by the query modules.
    pub static ref RON: ron::Options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
}

/// Treats an empty string the same as a missing value.
pub fn non_empty(s: Option<String>) -> Option<String> {
    match s {
        Some(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}
