//! Text helpers shared by the project and repository views

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters `encodeURIComponent` leaves untouched
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Turn a repository name into a display title.
///
/// Hyphens become spaces and the first letter of every word is upper-cased;
/// the rest of each word is left as written.
///
/// ```ignore
/// title_case("data-pipeline-automation") // -> "Data Pipeline Automation"
/// ```
pub fn title_case(name: &str) -> String {
    name.replace('-', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Percent-encode a string for use inside a URI component
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}
