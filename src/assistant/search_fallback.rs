use std::sync::LazyLock;
use url::Url;

static SEARCH_BASE: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("https://www.google.com/search").expect("fixed search URL must parse")
});

/// Manual verification path shown when the grounded call cannot answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFallback {
    pub queries: [String; 3],
    /// External search for the claim itself; `q` is form-encoded.
    pub search_url: Url,
}

impl SearchFallback {
    pub fn for_claim(claim: &str) -> Self {
        let claim = claim.trim();
        let mut search_url = SEARCH_BASE.clone();
        search_url.query_pairs_mut().append_pair("q", claim);

        Self {
            queries: [
                format!("\"{claim}\" fact check"),
                format!("{claim} evidence"),
                format!("{claim} debunked"),
            ],
            search_url,
        }
    }
}
