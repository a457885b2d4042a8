/// Turn a kind name such as `TooManyRequests` into a human-readable reason phrase
///
/// A space is inserted before every capital followed by lowercase letters
/// and before every run of capitals that is not itself followed by a
/// lowercase letter. The result is trimmed. Characters outside those
/// segments (leading lowercase, digits) are copied through unchanged.
///
/// ```
/// use errata_core::derive_message;
///
/// assert_eq!(derive_message("IAmATeapot"), "I Am A Teapot");
/// assert_eq!(derive_message("HTTPVersionNotSupported"), "HTTP Version Not Supported");
/// ```
#[must_use]
pub fn derive_message(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut output = String::with_capacity(name.len() + chars.len() / 2);
    let mut i = 0;

    while i < chars.len() {
        if let Some(end) = segment_end(&chars, i) {
            output.push(' ');
            output.extend(&chars[i..end]);
            i = end;
        } else {
            output.push(chars[i]);
            i += 1;
        }
    }

    output.trim().to_owned()
}

/// End (exclusive) of the word segment starting at `start`, if one starts there
fn segment_end(chars: &[char], start: usize) -> Option<usize> {
    if !chars[start].is_ascii_uppercase() {
        return None;
    }

    // Capital followed by one or more lowercase letters
    let mut end = start + 1;
    while end < chars.len() && chars[end].is_ascii_lowercase() {
        end += 1;
    }
    if end > start + 1 {
        return Some(end);
    }

    // Run of capitals, giving back its last capital when that one starts a word
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_uppercase() {
        end += 1;
    }
    while end > start && end < chars.len() && chars[end].is_ascii_lowercase() {
        end -= 1;
    }

    (end > start).then_some(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_words() {
        assert_eq!(derive_message("Gone"), "Gone");
        assert_eq!(derive_message("Locked"), "Locked");
    }

    #[test]
    fn standard_reason_phrases() {
        assert_eq!(derive_message("NotFound"), "Not Found");
        assert_eq!(derive_message("EnhanceYourCalm"), "Enhance Your Calm");
        assert_eq!(derive_message("TooManyRequests"), "Too Many Requests");
        assert_eq!(derive_message("InternalServerError"), "Internal Server Error");
    }

    #[test]
    fn single_letter_words() {
        assert_eq!(derive_message("IAmATeapot"), "I Am A Teapot");
    }

    #[test]
    fn acronyms() {
        assert_eq!(derive_message("URITooLong"), "URI Too Long");
        assert_eq!(derive_message("HTTPVersionNotSupported"), "HTTP Version Not Supported");
        assert_eq!(derive_message("ParseJSON"), "Parse JSON");
    }

    #[test]
    fn non_segment_characters_pass_through() {
        assert_eq!(derive_message("lowerCase"), "lower Case");
        assert_eq!(derive_message("Error404Page"), "Error404 Page");
        assert_eq!(derive_message(""), "");
    }

    #[test]
    fn deterministic() {
        assert_eq!(derive_message("BadGateway"), derive_message("BadGateway"));
    }
}
