pub const CR_MARKER: &[u8] = b"<CR>";

const LF_ENCODED: &[u8] = b"<LF>\n";

/// Transcript representation of a single byte.
pub fn encode_byte(byte: &u8) -> &[u8] {
    match *byte {
        b'\n' => LF_ENCODED,
        b'\r' => CR_MARKER,
        _ => std::slice::from_ref(byte),
    }
}

pub fn encode(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    for b in bytes {
        out.extend_from_slice(encode_byte(b));
    }
    out
}

/// Reverse of [`encode`].
///
/// A bare newline only ever appears right after an `<LF>` marker, so
/// `<LF>\n` is unambiguous. A literal `<CR>` in the original stream cannot be
/// told apart from a carriage return and decodes to `0x0D`.
pub fn decode_transcript(log: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(log.len());
    let mut i = 0;
    while i < log.len() {
        let rest = &log[i..];
        if rest.starts_with(LF_ENCODED) {
            out.push(b'\n');
            i += LF_ENCODED.len();
        } else if rest.starts_with(CR_MARKER) {
            out.push(b'\r');
            i += CR_MARKER.len();
        } else {
            out.push(log[i]);
            i += 1;
        }
    }
    out
}
