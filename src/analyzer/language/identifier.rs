/// One ranked guess from a language identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageCandidate {
    pub code: String,
    pub probability: f64,
}

impl LanguageCandidate {
    #[must_use]
    pub fn new(code: impl Into<String>, probability: f64) -> Self {
        Self {
            code: code.into(),
            probability,
        }
    }
}

/// Probabilistic language identification.
///
/// Returns candidates ranked by descending probability; an empty list means
/// the identifier could not decide.
pub trait LanguageIdentifier: Send + Sync {
    fn name(&self) -> &'static str;

    fn identify(&self, text: &str) -> Vec<LanguageCandidate>;
}

/// Identifier backed by the `whatlang` trigram models.
#[cfg(feature = "whatlang")]
#[derive(Debug, Default, Clone, Copy)]
pub struct WhatlangIdentifier;

#[cfg(feature = "whatlang")]
impl LanguageIdentifier for WhatlangIdentifier {
    fn name(&self) -> &'static str {
        "whatlang"
    }

    fn identify(&self, text: &str) -> Vec<LanguageCandidate> {
        whatlang::detect(text)
            .map(|info| {
                vec![LanguageCandidate::new(
                    iso_639_1(info.lang().code()),
                    info.confidence(),
                )]
            })
            .unwrap_or_default()
    }
}

/// Map an ISO 639-3 code to its two-letter ISO 639-1 form where one exists.
#[must_use]
pub fn iso_639_1(code: &str) -> String {
    let short = match code {
        "eng" => "en",
        "spa" => "es",
        "fra" => "fr",
        "deu" => "de",
        "por" => "pt",
        "ita" => "it",
        "nld" => "nl",
        "rus" => "ru",
        "ukr" => "uk",
        "pol" => "pl",
        "ces" => "cs",
        "slk" => "sk",
        "ron" => "ro",
        "hun" => "hu",
        "ell" => "el",
        "tur" => "tr",
        "swe" => "sv",
        "dan" => "da",
        "nob" => "no",
        "fin" => "fi",
        "cmn" => "zh",
        "jpn" => "ja",
        "kor" => "ko",
        "ara" => "ar",
        "heb" => "he",
        "pes" => "fa",
        "hin" => "hi",
        "ben" => "bn",
        "urd" => "ur",
        "tha" => "th",
        "vie" => "vi",
        "ind" => "id",
        other => return other.to_string(),
    };
    short.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_mapping_shortens_known_codes() {
        assert_eq!(iso_639_1("eng"), "en");
        assert_eq!(iso_639_1("cmn"), "zh");
    }

    #[test]
    fn iso_mapping_passes_unknown_codes_through() {
        assert_eq!(iso_639_1("epo"), "epo");
    }

    #[cfg(feature = "whatlang")]
    #[test]
    fn whatlang_identifies_long_english_text() {
        let text = "The parties agree that any dispute arising out of or relating to \
                    these terms will be resolved through binding arbitration rather than in court.";
        let candidates = WhatlangIdentifier.identify(text);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].code, "en");
        assert!(candidates[0].probability > 0.0);
    }
}
