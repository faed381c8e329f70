//! Hard-error-code classification.
//!
//! A denial carrying a code in this class is surfaced on the error page
//! instead of navigating away. The class is 403, 404 and the 50x family.
//! The literal `"50X"` spelling is also accepted; some upstream payloads use
//! it as a wildcard for the whole family.

/// Whether `code` selects the hard-error surface (403 / 404 / 50x).
pub fn is_hard_error_code(code: &str) -> bool {
    let code = code.trim();
    match code {
        "403" | "404" => true,
        _ => {
            let bytes = code.as_bytes();
            bytes.len() == 3
                && bytes[0] == b'5'
                && bytes[1] == b'0'
                && (bytes[2].is_ascii_digit() || bytes[2].eq_ignore_ascii_case(&b'x'))
        }
    }
}
