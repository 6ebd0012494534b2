/// Display adapter between typed characters and the tokens handed to a rendering surface.
///
/// **Token policy:**
/// Every character shown in the value row is converted to a numeric token `&#N;`.
/// Code 32 (space) and code 38 (`&`) both map to code 160 (non-breaking space), so
/// a literal `&` renders as a blank. The placeholder for "no current character" is
/// encoded through the same `&` lookup and therefore also renders as a blank.

/// Code point substituted for spaces and ampersands.
pub const NBSP_CODE: u32 = 160;

/// Character whose encoding stands in for an empty current-character marker.
pub const PLACEHOLDER: char = '&';

/// Upper-cased form of `ch` when `capitalize` is set and a single-character
/// case mapping exists; otherwise `ch` unchanged.
pub fn apply_case(ch: char, capitalize: bool) -> char {
    if !capitalize {
        return ch;
    }
    upper_of(ch).unwrap_or(ch)
}

/// Single-character upper-case mapping, if it differs from `ch`.
pub fn upper_of(ch: char) -> Option<char> {
    single(ch.to_uppercase()).filter(|&up| up != ch)
}

/// Single-character lower-case mapping (or `ch` itself when there is none).
pub fn lower_of(ch: char) -> char {
    single(ch.to_lowercase()).unwrap_or(ch)
}

fn single(mut it: impl Iterator<Item = char>) -> Option<char> {
    let first = it.next()?;
    if it.next().is_some() { None } else { Some(first) }
}

/// Numeric display token for a character.
pub fn entity_encode(ch: char) -> String {
    let code = match ch as u32 {
        32 | 38 => NBSP_CODE,
        code => code,
    };
    format!("&#{code};")
}

/// Encode a whole buffer, one token per character.
pub fn encode_str(text: &str) -> String {
    text.chars().map(entity_encode).collect()
}

/// Decode `&#N;` tokens back to characters. Malformed tokens are kept verbatim.
pub fn decode_entities(encoded: &str) -> String {
    let mut out = String::with_capacity(encoded.len());
    let mut rest = encoded;
    while let Some(start) = rest.find("&#") {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 2..];
        let decoded = tail.find(';').and_then(|end| {
            let ch = tail[..end].parse::<u32>().ok().and_then(char::from_u32)?;
            Some((ch, end))
        });
        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &tail[end + 1..];
            }
            None => {
                out.push_str("&#");
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_and_ampersand_share_token() {
        assert_eq!(entity_encode(' '), "&#160;");
        assert_eq!(entity_encode('&'), "&#160;");
        assert_eq!(entity_encode(' '), entity_encode('&'));
    }

    #[test]
    fn test_plain_characters_use_their_code() {
        assert_eq!(entity_encode('a'), "&#97;");
        assert_eq!(entity_encode('é'), "&#233;");
        assert_eq!(encode_str("Hi"), "&#72;&#105;");
    }

    #[test]
    fn test_apply_case() {
        assert_eq!(apply_case('a', true), 'A');
        assert_eq!(apply_case('a', false), 'a');
        assert_eq!(apply_case('ç', true), 'Ç');
        assert_eq!(apply_case('7', true), '7');
        assert_eq!(apply_case('.', true), '.');
        // Multi-character mapping has no single upper form
        assert_eq!(apply_case('ß', true), 'ß');
    }

    #[test]
    fn test_upper_and_lower_of() {
        assert_eq!(upper_of('ÿ'), Some('Ÿ'));
        assert_eq!(upper_of('1'), None);
        assert_eq!(lower_of('Ñ'), 'ñ');
        assert_eq!(lower_of('-'), '-');
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("&#72;&#105;&#160;"), "Hi\u{a0}");
        assert_eq!(decode_entities("&#;x"), "&#;x");
        assert_eq!(decode_entities("plain"), "plain");
    }
}
