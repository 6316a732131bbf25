//! Byte array explanation
//!
//! A byte slice is shown twice: as comma separated decimal values and as
//! (lossy) UTF-8 text.

/// Label used when the caller does not give one
pub const DEFAULT_LABEL: &str = "Byte Data";

/// Decimal values joined with `,`
pub fn join_bytes(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 4);
    for (i, byte) in data.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&byte.to_string());
    }
    out
}

/// The two message bodies printed for a byte slice
pub fn explain(data: &[u8], label: &str) -> [String; 2] {
    [
        format!("{} :data: {}", label, join_bytes(data)),
        format!("{} :string: {}", label, String::from_utf8_lossy(data)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(&[], "")]
    #[case(&[7], "7")]
    #[case(&[104, 105], "104,105")]
    #[case(&[0, 255, 128], "0,255,128")]
    fn test_join_bytes(#[case] data: &[u8], #[case] expected: &str) {
        assert_eq!(join_bytes(data), expected);
    }

    #[test]
    fn test_explain_text() {
        let [data, string] = explain(b"hi", DEFAULT_LABEL);
        assert_eq!(data, "Byte Data :data: 104,105");
        assert_eq!(string, "Byte Data :string: hi");
    }

    #[test]
    fn test_explain_invalid_utf8() {
        let [_, string] = explain(&[0x66, 0xff], "raw");
        assert_eq!(string, "raw :string: f\u{fffd}");
    }

    #[test]
    fn test_explain_empty() {
        let [data, string] = explain(&[], "empty");
        assert_eq!(data, "empty :data: ");
        assert_eq!(string, "empty :string: ");
    }
}
