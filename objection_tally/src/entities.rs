//! Decoding of HTML character references.
//!
//! Only the references are decoded: tags, comments and the rest of the markup
//! are left untouched.

// Longest reference body accepted between '&' and ';'.
const MAX_REFERENCE_LEN: usize = 32;

// The names of the code points U+00A0 to U+00FF, in order.
const LATIN1_NAMES: [&str; 96] = [
    "nbsp", "iexcl", "cent", "pound", "curren", "yen", "brvbar", "sect", "uml", "copy", "ordf",
    "laquo", "not", "shy", "reg", "macr", "deg", "plusmn", "sup2", "sup3", "acute", "micro",
    "para", "middot", "cedil", "sup1", "ordm", "raquo", "frac14", "frac12", "frac34", "iquest",
    "Agrave", "Aacute", "Acirc", "Atilde", "Auml", "Aring", "AElig", "Ccedil", "Egrave", "Eacute",
    "Ecirc", "Euml", "Igrave", "Iacute", "Icirc", "Iuml", "ETH", "Ntilde", "Ograve", "Oacute",
    "Ocirc", "Otilde", "Ouml", "times", "Oslash", "Ugrave", "Uacute", "Ucirc", "Uuml", "Yacute",
    "THORN", "szlig", "agrave", "aacute", "acirc", "atilde", "auml", "aring", "aelig", "ccedil",
    "egrave", "eacute", "ecirc", "euml", "igrave", "iacute", "icirc", "iuml", "eth", "ntilde",
    "ograve", "oacute", "ocirc", "otilde", "ouml", "divide", "oslash", "ugrave", "uacute", "ucirc",
    "uuml", "yacute", "thorn", "yuml",
];

/// Replaces all the recognized character references of `text` with the
/// characters they stand for.
///
/// Unknown names, invalid code points and lone ampersands are kept as they are.
/// The decoding is done in a single pass: `&amp;lt;` becomes `&lt;`.
///
/// ```
/// use objection_tally::entities::decode;
///
/// assert_eq!(decode("AT&amp;T &#8211; Fran&ccedil;ois"), "AT&T \u{2013} François");
/// assert_eq!(decode("&madeup; & co"), "&madeup; & co");
/// ```
pub fn decode(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp..];
        match decode_reference(candidate) {
            Some((c, consumed)) => {
                out.push(c);
                rest = &candidate[consumed..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

// `s` starts with '&'. Returns the decoded character and the length of the reference.
fn decode_reference(s: &str) -> Option<(char, usize)> {
    let semicolon = s[1..].find(';')? + 1;
    let body = &s[1..semicolon];
    if body.is_empty()
        || body.len() > MAX_REFERENCE_LEN
        || !body.chars().all(|c| c.is_ascii_alphanumeric() || c == '#')
    {
        return None;
    }
    let c = match body.strip_prefix('#') {
        Some(numeric) => numeric_reference(numeric)?,
        None => named_reference(body)?,
    };
    Some((c, semicolon + 1))
}

fn numeric_reference(digits: &str) -> Option<char> {
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) if !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()) => {
            u32::from_str_radix(hex, 16).ok()?
        }
        Some(_) => return None,
        None if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) => {
            digits.parse::<u32>().ok()?
        }
        None => return None,
    };
    if code == 0 {
        return None;
    }
    char::from_u32(windows_1252(code).unwrap_or(code))
}

// Browsers read the C1 control range as windows-1252, and so do the pages.
fn windows_1252(code: u32) -> Option<u32> {
    let mapped = match code {
        0x80 => 0x20AC,
        0x82 => 0x201A,
        0x83 => 0x0192,
        0x84 => 0x201E,
        0x85 => 0x2026,
        0x86 => 0x2020,
        0x87 => 0x2021,
        0x88 => 0x02C6,
        0x89 => 0x2030,
        0x8A => 0x0160,
        0x8B => 0x2039,
        0x8C => 0x0152,
        0x8E => 0x017D,
        0x91 => 0x2018,
        0x92 => 0x2019,
        0x93 => 0x201C,
        0x94 => 0x201D,
        0x95 => 0x2022,
        0x96 => 0x2013,
        0x97 => 0x2014,
        0x98 => 0x02DC,
        0x99 => 0x2122,
        0x9A => 0x0161,
        0x9B => 0x203A,
        0x9C => 0x0153,
        0x9E => 0x017E,
        0x9F => 0x0178,
        _ => return None,
    };
    Some(mapped)
}

fn named_reference(name: &str) -> Option<char> {
    if let Some(idx) = LATIN1_NAMES.iter().position(|n| *n == name) {
        return char::from_u32(0xA0 + idx as u32);
    }
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "OElig" => '\u{0152}',
        "oelig" => '\u{0153}',
        "Scaron" => '\u{0160}',
        "scaron" => '\u{0161}',
        "Yuml" => '\u{0178}',
        "fnof" => '\u{0192}',
        "circ" => '\u{02C6}',
        "tilde" => '\u{02DC}',
        "ensp" => '\u{2002}',
        "emsp" => '\u{2003}',
        "thinsp" => '\u{2009}',
        "zwnj" => '\u{200C}',
        "zwj" => '\u{200D}',
        "lrm" => '\u{200E}',
        "rlm" => '\u{200F}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "sbquo" => '\u{201A}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "bdquo" => '\u{201E}',
        "dagger" => '\u{2020}',
        "Dagger" => '\u{2021}',
        "bull" => '\u{2022}',
        "hellip" => '\u{2026}',
        "permil" => '\u{2030}',
        "prime" => '\u{2032}',
        "Prime" => '\u{2033}',
        "lsaquo" => '\u{2039}',
        "rsaquo" => '\u{203A}',
        "oline" => '\u{203E}',
        "euro" => '\u{20AC}',
        "trade" => '\u{2122}',
        "larr" => '\u{2190}',
        "uarr" => '\u{2191}',
        "rarr" => '\u{2192}',
        "darr" => '\u{2193}',
        "harr" => '\u{2194}',
        "minus" => '\u{2212}',
        "check" => '\u{2713}',
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::decode;

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(decode("Acme Corp"), "Acme Corp");
        assert_eq!(decode(""), "");
    }

    #[test]
    fn named_references() {
        assert_eq!(decode("Apple, Inc. &amp; co"), "Apple, Inc. & co");
        assert_eq!(decode("&lt;td&gt;"), "<td>");
        assert_eq!(decode("&quot;x&quot; &apos;y&apos;"), "\"x\" 'y'");
        assert_eq!(decode("Universit&auml;t"), "Universität");
        assert_eq!(decode("Fran&ccedil;ois &Eacute;cole"), "François École");
        assert_eq!(decode("a&nbsp;b"), "a\u{a0}b");
        assert_eq!(decode("&yuml;&iexcl;"), "ÿ¡");
        assert_eq!(decode("Charter&mdash;extension"), "Charter\u{2014}extension");
    }

    #[test]
    fn numeric_references() {
        assert_eq!(decode("W3C&#39;s"), "W3C's");
        assert_eq!(decode("W3C&#x2019;s"), "W3C\u{2019}s");
        assert_eq!(decode("&#X41;"), "A");
        // C1 range read as windows-1252
        assert_eq!(decode("&#150;"), "\u{2013}");
        assert_eq!(decode("&#146;"), "\u{2019}");
    }

    #[test]
    fn unknown_references_pass_through() {
        assert_eq!(decode("&madeup;"), "&madeup;");
        assert_eq!(decode("R&D"), "R&D");
        assert_eq!(decode("a & b; c"), "a & b; c");
        assert_eq!(decode("&;"), "&;");
        assert_eq!(decode("&#;"), "&#;");
        assert_eq!(decode("&#x;"), "&#x;");
        assert_eq!(decode("&#0;"), "&#0;");
        assert_eq!(decode("&#xD800;"), "&#xD800;");
        assert_eq!(decode("&#x110000;"), "&#x110000;");
        assert_eq!(decode("&#+12;"), "&#+12;");
        assert_eq!(decode("trailing &amp"), "trailing &amp");
    }

    #[test]
    fn single_pass() {
        assert_eq!(decode("&amp;lt;"), "&lt;");
        assert_eq!(decode("&&amp;&"), "&&&");
    }
}
