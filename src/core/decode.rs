// EventSheet - core/decode.rs
//
// Byte-to-line decoding under an explicit `DecodePolicy`.
// Core layer: operates on in-memory bytes, never touches the filesystem.
//
// Lines are split before decoding so an invalid sequence can be attributed
// to a line number and never swallows a line break. A line ends at "\n",
// "\r\n" or a lone "\r", and the terminator is not part of the line.

use crate::core::model::DecodePolicy;

/// Lines produced from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedText {
    pub lines: Vec<String>,

    /// Number of invalid UTF-8 sequences dropped or replaced.
    pub invalid_sequences: usize,
}

/// Returned under `DecodePolicy::Strict` when the input is not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingViolation {
    /// 1-based line number of the first invalid sequence.
    pub line_number: u64,

    /// Total invalid sequences in the input.
    pub invalid_sequences: usize,
}

/// Split `bytes` into lines and decode each according to `policy`.
///
/// A final segment after the last terminator is a line only if it is
/// non-empty, so "a\nb\n" and "a\nb" both yield two lines.
pub fn decode_lines(bytes: &[u8], policy: DecodePolicy) -> Result<DecodedText, EncodingViolation> {
    let segments = split_lines(bytes);

    let mut text = DecodedText {
        lines: Vec::with_capacity(segments.len()),
        invalid_sequences: 0,
    };
    let mut first_invalid_line: Option<u64> = None;

    for (idx, segment) in segments.into_iter().enumerate() {
        let mut line = String::with_capacity(segment.len());
        let invalid = decode_segment(segment, policy, &mut line);
        if invalid > 0 {
            text.invalid_sequences += invalid;
            first_invalid_line.get_or_insert(idx as u64 + 1);
        }
        text.lines.push(line);
    }

    match (policy, first_invalid_line) {
        (DecodePolicy::Strict, Some(line_number)) => Err(EncodingViolation {
            line_number,
            invalid_sequences: text.invalid_sequences,
        }),
        _ => Ok(text),
    }
}

/// Split on "\n", "\r\n" and lone "\r". Both bytes are ASCII, so a split
/// never lands inside a multi-byte sequence.
fn split_lines(bytes: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&bytes[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&bytes[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    if start < bytes.len() {
        lines.push(&bytes[start..]);
    }
    lines
}

/// Decode one line into `out`, returning the number of invalid sequences.
fn decode_segment(mut bytes: &[u8], policy: DecodePolicy, out: &mut String) -> usize {
    let mut invalid = 0;
    loop {
        match std::str::from_utf8(bytes) {
            Ok(s) => {
                out.push_str(s);
                return invalid;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                if let Ok(s) = std::str::from_utf8(valid) {
                    out.push_str(s);
                }
                invalid += 1;
                if policy == DecodePolicy::Replace {
                    out.push(char::REPLACEMENT_CHARACTER);
                }
                match e.error_len() {
                    Some(len) => bytes = &rest[len..],
                    // Truncated sequence at the end of the line.
                    None => return invalid,
                }
            }
        }
    }
}
