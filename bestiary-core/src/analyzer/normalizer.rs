#[inline(always)]
const fn is_ascii_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\t' | b'\r' | b'\x0c')
}

/// Configuration options for key normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// When enabled, strips diacritical marks from Latin characters.
    /// For example, "Dhàmpir" becomes "dhampir".
    pub strip_diacritics: bool,
}

/// Normalizer for index keys and search text.
///
/// Performs the following operations:
/// - Converts all characters to lowercase (Unicode-aware)
/// - Collapses consecutive whitespace into single spaces
/// - Removes leading/trailing whitespace
/// - Optionally strips diacritical marks from Latin characters
///
/// Two values are the same filter value exactly when their normalized forms
/// are equal, so the builder, the evaluator and the predictive counter all go
/// through the same normalizer.
///
/// # Examples
///
/// ```
/// use bestiary_core::analyzer::{KeyNormalizer, NormalizerConfig};
///
/// let normalizer = KeyNormalizer::default();
/// assert_eq!(normalizer.normalize("  Cold   IRON "), "cold iron");
///
/// let stripper = KeyNormalizer::new(NormalizerConfig { strip_diacritics: true });
/// assert_eq!(stripper.normalize("Dhàmpir"), "dhampir");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyNormalizer {
    config: NormalizerConfig,
}

impl KeyNormalizer {
    /// Creates a new normalizer with the specified configuration.
    pub const fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[inline(always)]
    pub fn config(&self) -> NormalizerConfig {
        self.config
    }

    /// Normalizes text into an existing String buffer.
    ///
    /// Clears the buffer before writing and reuses its capacity.
    #[inline]
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();
        let input = input.trim();
        out.reserve(input.len());

        if input.is_ascii() {
            let mut prev_space = false;
            for &b in input.as_bytes() {
                if is_ascii_ws(b) {
                    if !prev_space {
                        out.push(' ');
                        prev_space = true;
                    }
                } else {
                    out.push(b.to_ascii_lowercase() as char);
                    prev_space = false;
                }
            }
            return;
        }

        let strip = self.config.strip_diacritics;
        let mut prev_space = false;
        for ch in input.chars() {
            if ch.is_whitespace() {
                if !prev_space {
                    out.push(' ');
                    prev_space = true;
                }
                continue;
            }
            for lowered in ch.to_lowercase() {
                let folded = if strip { fold_latin1(lowered) } else { lowered };
                if strip && folded == '\0' {
                    continue;
                }
                out.push(folded);
            }
            prev_space = false;
        }
    }

    /// Normalizes text and returns a new String.
    #[inline]
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }

    /// Returns `true` if both inputs normalize to the same key.
    pub fn same_key(&self, a: &str, b: &str) -> bool {
        self.normalize(a) == self.normalize(b)
    }
}

#[inline(always)]
fn fold_latin1(c: char) -> char {
    if ('\u{0300}'..='\u{036F}').contains(&c) {
        return '\0';
    }

    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' | 'ĉ' | 'ċ' => 'c',
        'ð' | 'đ' => 'd',
        'é' | 'è' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'í' | 'ì' | 'î' | 'ï' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ñ' | 'ń' | 'ň' | 'ņ' => 'n',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ō' | 'ŏ' | 'ő' | 'ø' => 'o',
        'ú' | 'ù' | 'û' | 'ü' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ý' | 'ÿ' => 'y',
        'ś' | 'š' | 'ş' | 'ß' => 's',
        'ź' | 'ž' | 'ż' => 'z',
        'ł' => 'l',
        'æ' => 'a',
        'œ' => 'o',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(input: &str) -> String {
        KeyNormalizer::default().normalize(input)
    }

    fn norm_strip(input: &str) -> String {
        KeyNormalizer::new(NormalizerConfig {
            strip_diacritics: true,
        })
        .normalize(input)
    }

    #[test]
    fn ascii_lowercase_and_trim() {
        assert_eq!(norm("Dragon"), "dragon");
        assert_eq!(norm("  Magical Beast\t"), "magical beast");
        assert_eq!(norm("cold   iron"), "cold iron");
        assert_eq!(norm("good\r\nand evil"), "good and evil");
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert_eq!(norm(""), "");
        assert_eq!(norm(" \t\n\r "), "");
    }

    #[test]
    fn punctuation_unchanged() {
        assert_eq!(norm("Bestiary 2 (PF1)"), "bestiary 2 (pf1)");
        assert_eq!(norm("spell-like"), "spell-like");
    }

    #[test]
    fn unicode_lowercase() {
        assert_eq!(norm("ÜBER Café"), "über café");
        assert_eq!(norm("ПРИВЕТ"), "привет");
    }

    #[test]
    fn unicode_whitespace_collapses() {
        assert_eq!(norm("Tiamat\u{00a0}\u{00a0}Café"), "tiamat café");
    }

    #[test]
    fn expanding_lowercase_is_valid_utf8() {
        let out = norm("İstanbul");
        assert!(std::str::from_utf8(out.as_bytes()).is_ok());
    }

    #[test]
    fn diacritics_preserved_when_disabled() {
        assert_eq!(norm("Dhàmpir"), "dhàmpir");
    }

    #[test]
    fn diacritics_stripped_when_enabled() {
        assert_eq!(norm_strip("Dhàmpir"), "dhampir");
        assert_eq!(norm_strip("Żółć"), "zolc");
        assert_eq!(norm_strip("STRAßE"), "strase");
        assert_eq!(norm_strip("caf\u{0301}e"), "cafe");
    }

    #[test]
    fn idempotent() {
        let n = KeyNormalizer::new(NormalizerConfig {
            strip_diacritics: true,
        });
        for s in ["Cold  Iron", "Müller São", " Fire "] {
            let once = n.normalize(s);
            assert_eq!(n.normalize(&once), once);
        }
    }

    #[test]
    fn normalize_into_reuses_buffer() {
        let normalizer = KeyNormalizer::default();
        let mut buf = String::with_capacity(64);
        let cap = buf.capacity();
        normalizer.normalize_into("FIRE", &mut buf);
        assert_eq!(buf, "fire");
        normalizer.normalize_into("COLD", &mut buf);
        assert_eq!(buf, "cold");
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn same_key_ignores_case_and_spacing() {
        let n = KeyNormalizer::default();
        assert!(n.same_key("Cold Iron", " cold  iron"));
        assert!(!n.same_key("cold", "cold iron"));
    }
}
