use url::Url;

pub struct GeminiApi;

pub(crate) const GOOG_API_KEY_HEADER: &str = "x-goog-api-key";

impl GeminiApi {
    /// `{api_base}/models/{model}:generateContent`.
    ///
    /// The model name is pushed as a single path segment, so stray `/` or `?`
    /// in a configured identifier are percent-encoded instead of changing the route.
    pub fn generate_url(api_base: &Url, model: &str) -> Option<Url> {
        let mut url = api_base.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push("models")
            .push(&format!("{model}:generateContent"));
        Some(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_with_and_without_trailing_slash() {
        let with = Url::parse("https://generativelanguage.googleapis.com/v1beta/").unwrap();
        let without = Url::parse("https://generativelanguage.googleapis.com/v1beta").unwrap();

        let expected =
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";
        assert_eq!(
            GeminiApi::generate_url(&with, "gemini-2.0-flash")
                .unwrap()
                .as_str(),
            expected
        );
        assert_eq!(
            GeminiApi::generate_url(&without, "gemini-2.0-flash")
                .unwrap()
                .as_str(),
            expected
        );
    }

    #[test]
    fn model_cannot_escape_its_segment() {
        let base = Url::parse("http://127.0.0.1:8080/v1beta/").unwrap();
        let url = GeminiApi::generate_url(&base, "evil/../x?y").unwrap();
        assert_eq!(url.path(), "/v1beta/models/evil%2F..%2Fx%3Fy:generateContent");
        assert!(url.query().is_none());
    }

    #[test]
    fn cannot_be_a_base_url_yields_none() {
        let base = Url::parse("mailto:someone@example.com").unwrap();
        assert!(GeminiApi::generate_url(&base, "gemini-2.0-flash").is_none());
    }
}
