use chardetng::EncodingDetector;
use encoding_rs::{Encoding, MACINTOSH, UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use tracing::debug;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One entry in the ordered list of encodings the loader tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    /// Whatever the charset detector guessed for these bytes.
    Detected(&'static Encoding),
    /// UTF-8, dropping a leading byte-order mark.
    Utf8Sig,
    /// UTF-8, keeping a leading byte-order mark as data.
    Utf8,
    Windows1252,
    Latin1,
    Iso8859_1,
    MacRoman,
}

/// Tried after the detected encoding, in this order.
pub const FALLBACKS: [Candidate; 6] = [
    Candidate::Utf8Sig,
    Candidate::Utf8,
    Candidate::Windows1252,
    Candidate::Latin1,
    Candidate::Iso8859_1,
    Candidate::MacRoman,
];

impl Candidate {
    pub fn label(&self) -> &'static str {
        match self {
            Candidate::Detected(enc) => enc.name(),
            Candidate::Utf8Sig => "utf-8-sig",
            Candidate::Utf8 => "utf-8",
            Candidate::Windows1252 => "cp1252",
            Candidate::Latin1 => "latin1",
            Candidate::Iso8859_1 => "iso-8859-1",
            Candidate::MacRoman => "mac_roman",
        }
    }

    /// Decode without replacement characters. `None` means the bytes are not
    /// valid in this encoding.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            Candidate::Detected(enc) => decode_strict(enc, strip_own_bom(enc, bytes)),
            Candidate::Utf8Sig => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                std::str::from_utf8(body).ok().map(Cow::Borrowed)
            }
            Candidate::Utf8 => std::str::from_utf8(bytes).ok().map(Cow::Borrowed),
            Candidate::Windows1252 => decode_strict(WINDOWS_1252, bytes),
            // encoding_rs treats these labels as windows-1252; a true Latin-1
            // decode maps each byte to the code point of the same value.
            Candidate::Latin1 | Candidate::Iso8859_1 => {
                Some(Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()))
            }
            Candidate::MacRoman => decode_strict(MACINTOSH, bytes),
        }
    }
}

fn decode_strict<'a>(enc: &'static Encoding, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
    enc.decode_without_bom_handling_and_without_replacement(bytes)
}

fn strip_own_bom<'a>(enc: &'static Encoding, bytes: &'a [u8]) -> &'a [u8] {
    match Encoding::for_bom(bytes) {
        Some((bom_enc, len)) if bom_enc == enc => &bytes[len..],
        _ => bytes,
    }
}

/// Best-effort charset guess. `None` for empty input or when the detector
/// has no preference over its alternatives.
pub fn detect(bytes: &[u8]) -> Option<&'static Encoding> {
    if bytes.is_empty() {
        return None;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let (enc, confident) = detector.guess_assess(None, true);
    debug!(encoding = enc.name(), confident, "charset detection");
    confident.then_some(enc)
}

/// The detected encoding (if any) followed by [`FALLBACKS`].
pub fn candidates(detected: Option<&'static Encoding>) -> Vec<Candidate> {
    detected
        .map(Candidate::Detected)
        .into_iter()
        .chain(FALLBACKS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_order() {
        let c = candidates(Some(UTF_8));
        assert_eq!(c.len(), 7);
        assert_eq!(c[0], Candidate::Detected(UTF_8));
        assert_eq!(&c[1..], &FALLBACKS[..]);

        let labels: Vec<_> = candidates(None).iter().map(Candidate::label).collect();
        assert_eq!(
            labels,
            vec!["utf-8-sig", "utf-8", "cp1252", "latin1", "iso-8859-1", "mac_roman"]
        );
    }

    #[test]
    fn utf8_sig_strips_bom_and_utf8_keeps_it() {
        let bytes = b"\xEF\xBB\xBFid\n";
        assert_eq!(Candidate::Utf8Sig.decode(bytes).unwrap(), "id\n");
        assert_eq!(Candidate::Utf8.decode(bytes).unwrap(), "\u{feff}id\n");
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let bytes = b"Jos\xE9";
        assert!(Candidate::Utf8.decode(bytes).is_none());
        assert!(Candidate::Utf8Sig.decode(bytes).is_none());
        assert_eq!(Candidate::Windows1252.decode(bytes).unwrap(), "José");
        assert_eq!(Candidate::Latin1.decode(bytes).unwrap(), "José");
    }

    #[test]
    fn latin1_maps_bytes_to_code_points() {
        // 0x80 is the euro sign in cp1252 but U+0080 in Latin-1
        let decoded = Candidate::Iso8859_1.decode(b"\x80").unwrap();
        assert_eq!(decoded, "\u{80}");
        assert_eq!(Candidate::Windows1252.decode(b"\x80").unwrap(), "€");
    }

    #[test]
    fn mac_roman() {
        // 0x8E is e-acute in Mac Roman
        assert_eq!(Candidate::MacRoman.decode(b"Jos\x8E").unwrap(), "José");
    }

    #[test]
    fn detect_empty_is_absent() {
        assert!(detect(b"").is_none());
    }
}
