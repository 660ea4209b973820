//! Decoder for the escaped comment-argument wire format.
//!
//! On the wire, every literal character is individually backslash-escaped
//! and arguments are joined with unescaped commas. `\a\r\g\1,\a\r\g\2`
//! carries `["arg1", "arg2"]`; `\f\o\o\,\b\a\r` carries `["foo,bar"]`.

use super::types::DecodeError;

/// Decode an escaped comment-argument string into its ordered argument list.
///
/// The empty string decodes to an empty list; every other input decodes to
/// at least one argument or fails. No partial result is ever returned.
///
/// Splitting on every comma and re-joining pieces that end in an odd run of
/// backslashes resolves escaped separators without lookbehind: an odd run
/// means the last backslash was escaping the comma the split consumed.
pub fn decode(raw: &str) -> Result<Vec<String>, DecodeError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let pieces: Vec<&str> = raw.split(',').collect();

    let mut segments: Vec<String> = Vec::new();
    let mut current = String::new();
    for (idx, piece) in pieces.iter().enumerate() {
        let run = piece.chars().rev().take_while(|&c| c == '\\').count();
        if run % 2 == 0 {
            // Trailing backslashes pair off; the comma after this piece
            // (if any) was a real separator.
            current.push_str(piece);
            segments.push(std::mem::take(&mut current));
        } else if idx + 1 == pieces.len() {
            // Odd run on the final piece: the input ends mid-escape.
            return Err(DecodeError::DanglingEscape);
        } else {
            // The split consumed an escaped comma; restore it and keep
            // accumulating.
            current.push_str(piece);
            current.push(',');
        }
    }

    if segments.iter().any(|s| s == r"\,") {
        return Err(DecodeError::AmbiguousInput);
    }

    // Segments are contiguous slices of `raw` (pieces re-joined with the
    // same commas), so byte offsets accumulate exactly.
    let mut args = Vec::with_capacity(segments.len());
    let mut offset = 0;
    for segment in &segments {
        args.push(unescape(segment, offset)?);
        offset += segment.len() + 1;
    }
    Ok(args)
}

/// Encode an argument list into the escaped wire form.
///
/// Every character is backslash-escaped and arguments are joined with
/// unescaped commas. `decode` inverts this except for inputs it rejects
/// (a lone `","` argument encodes to the ambiguous `\,`) and a single
/// trailing empty argument, which the wire form cannot represent.
pub fn encode<S: AsRef<str>>(args: &[S]) -> String {
    let mut out = String::new();
    for (idx, arg) in args.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        for ch in arg.as_ref().chars() {
            out.push('\\');
            out.push(ch);
        }
    }
    out
}

/// Unescape one segment with a single escape-pending flag.
///
/// `base` is the segment's byte offset in the raw input, used to report
/// improper escapes against the original string.
fn unescape(segment: &str, base: usize) -> Result<String, DecodeError> {
    let mut out = String::with_capacity(segment.len() / 2);
    let mut pending = false;
    for (pos, ch) in segment.char_indices() {
        if pending {
            // Anything may follow a backslash, including '\\' and ','.
            out.push(ch);
            pending = false;
        } else if ch == '\\' {
            pending = true;
        } else {
            return Err(DecodeError::ImproperEscape {
                ch,
                pos: base + pos,
            });
        }
    }
    if pending {
        return Err(DecodeError::DanglingEscape);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_decodes_to_empty_list() {
        assert_eq!(decode("").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn unescaped_text_fails() {
        assert_eq!(
            decode("abc"),
            Err(DecodeError::ImproperEscape { ch: 'a', pos: 0 })
        );
    }

    #[test]
    fn improper_escape_reports_position_in_raw_input() {
        // First segment is fine; 'b' sits at byte 3 of the raw string.
        assert_eq!(
            decode(r"\a,bc"),
            Err(DecodeError::ImproperEscape { ch: 'b', pos: 3 })
        );
    }

    #[test]
    fn lone_escaped_separator_is_ambiguous() {
        assert_eq!(decode(r"\,"), Err(DecodeError::AmbiguousInput));
    }

    #[test]
    fn lone_escaped_separator_among_other_args_is_ambiguous() {
        assert_eq!(decode(r"\a,\,"), Err(DecodeError::AmbiguousInput));
        assert_eq!(decode(r"\,,\a"), Err(DecodeError::AmbiguousInput));
    }

    #[test]
    fn escaped_separator_with_content_is_fine() {
        assert_eq!(decode(r"\,\a").unwrap(), vec![",a"]);
    }

    #[test]
    fn single_backslash() {
        assert_eq!(decode(r"\\").unwrap(), vec![r"\"]);
    }

    #[test]
    fn double_backslash() {
        assert_eq!(decode(r"\\\\").unwrap(), vec![r"\\"]);
    }

    #[test]
    fn two_args_simple() {
        assert_eq!(decode(r"\a\r\g\1,\a\r\g\2").unwrap(), vec!["arg1", "arg2"]);
    }

    #[test]
    fn escaped_commas_do_not_split() {
        assert_eq!(
            decode(r"\a\r\g\1,\f\o\o\,\b\a\r\,,\a\r\g\2").unwrap(),
            vec!["arg1", "foo,bar,", "arg2"]
        );
    }

    #[test]
    fn json_payloads_survive() {
        let raw = r#"\{\"\h\e\l\l\o\"\:\"\f\o\o\\\n\b\a\r\\\n\b\a\z\\\n\"\,\"\w\o\r\l\d\"\:\"\x\\\n\y\\\n\z\"\},\{\"\h\e\l\l\o\"\:\"\f\o\o\\\n\b\a\r\\\n\b\a\z\\\n\"\}"#;
        assert_eq!(
            decode(raw).unwrap(),
            vec![
                r#"{"hello":"foo\nbar\nbaz\n","world":"x\ny\nz"}"#,
                r#"{"hello":"foo\nbar\nbaz\n"}"#,
            ]
        );
    }

    #[test]
    fn dangling_escape_at_end_fails() {
        assert_eq!(decode(r"\"), Err(DecodeError::DanglingEscape));
        assert_eq!(decode(r"\a\"), Err(DecodeError::DanglingEscape));
        assert_eq!(decode(r"\a,\b\c\"), Err(DecodeError::DanglingEscape));
    }

    #[test]
    fn odd_backslash_run_before_comma_escapes_it() {
        // Three trailing backslashes: one escaped backslash, then an
        // escaped comma.
        assert_eq!(decode(r"\\\,\a").unwrap(), vec![r"\,a"]);
    }

    #[test]
    fn empty_middle_argument() {
        assert_eq!(decode(r"\a,,\b").unwrap(), vec!["a", "", "b"]);
    }

    #[test]
    fn trailing_separator_yields_trailing_empty_argument() {
        assert_eq!(decode(r"\a,").unwrap(), vec!["a", ""]);
    }

    #[test]
    fn encode_round_trips() {
        let cases: &[&[&str]] = &[
            &["arg1", "arg2"],
            &["arg1", "foo,bar,", "arg2"],
            &[r"\"],
            &[r"\\"],
            &["", "a"],
            &[r#"{"hello":"foo\nbar\nbaz\n"}"#],
        ];
        for args in cases {
            assert_eq!(&decode(&encode(args)).unwrap(), args, "args: {args:?}");
        }
    }

    #[test]
    fn encode_empty_list_is_empty_string() {
        assert_eq!(encode::<&str>(&[]), "");
    }

    #[test]
    fn decode_is_deterministic() {
        let raw = r"\a\r\g\1,\f\o\o\,\b\a\r\,,\a\r\g\2";
        assert_eq!(decode(raw), decode(raw));
    }
}
