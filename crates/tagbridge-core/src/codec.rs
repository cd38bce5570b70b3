//! Transport codec: reversible substitution for the five characters that
//! cannot survive a URL path segment or the engine's own markup.
//!
//! Each structurally significant character maps to a rare Unicode code point
//! not expected in ordinary scripts. If a caller's script already contains
//! one of the markers the round trip silently collides; inputs are passed
//! through verbatim, never rejected.

const MARKERS: [(char, char); 5] = [
    ('\\', 'Ꜳ'),
    ('/', '₩'),
    ('<', 'ꜳ'),
    ('>', 'ꜵ'),
    ('.', 'Ꜷ'),
];

/// Replaces each marker code point with the character it stands for.
pub fn decode(text: &str) -> String {
    text.chars()
        .map(|c| {
            MARKERS
                .iter()
                .find(|(_, marker)| *marker == c)
                .map(|(original, _)| *original)
                .unwrap_or(c)
        })
        .collect()
}

/// Replaces each structurally significant character with its marker.
pub fn encode(text: &str) -> String {
    text.chars()
        .map(|c| {
            MARKERS
                .iter()
                .find(|(original, _)| *original == c)
                .map(|(_, marker)| *marker)
                .unwrap_or(c)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_maps_every_marker_character() {
        assert_eq!(encode(r"a\b/c<d>e.f"), "aꜲb₩cꜳdꜵeꜶf");
    }

    #[test]
    fn decode_is_the_inverse() {
        assert_eq!(decode("aꜲb₩cꜳdꜵeꜶf"), r"a\b/c<d>e.f");
    }

    #[test]
    fn round_trip_law_on_marker_free_text() {
        // decode . encode is lossless as long as the input carries none of the
        // marker code points.
        let samples = [
            "",
            "plain text",
            r"{if(1==1):a/b|c.d}",
            "emoji ☃ and unicode é",
            r"\<>./\\",
        ];
        for t in samples {
            assert_eq!(decode(&encode(t)), t, "decode(encode({t:?}))");
        }
        // The reverse composition additionally needs the input free of the
        // five raw characters themselves.
        for t in ["", "plain text", "{if(1==1):a|b}", "emoji ☃"] {
            assert_eq!(encode(&decode(t)), t, "encode(decode({t:?}))");
        }
    }

    #[test]
    fn unrelated_text_is_untouched() {
        assert_eq!(encode("hello world"), "hello world");
        assert_eq!(decode("hello world"), "hello world");
    }
}
