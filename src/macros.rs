/// Compile a regex literal once and hand out a `&'static Regex`.
///
/// Every pattern passed here is a fixed literal from this crate, so a failure
/// to compile is a programming error caught by the unit tests.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}
