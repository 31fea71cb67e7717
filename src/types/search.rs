use serde::Serialize;

/// A web search provider selectable from the search box.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SearchEngine {
    pub name: &'static str,
    pub display_name: &'static str,
    /// Query URL prefix; the encoded search term is appended.
    pub url: &'static str,
    pub icon: &'static str,
}

pub static SEARCH_ENGINES: [SearchEngine; 3] = [
    SearchEngine {
        name: "google",
        display_name: "Google",
        url: "https://www.google.com/search?q=",
        icon: "https://www.google.com/favicon.ico",
    },
    SearchEngine {
        name: "bing",
        display_name: "Bing",
        url: "https://www.bing.com/search?q=",
        icon: "https://www.bing.com/favicon.ico",
    },
    SearchEngine {
        name: "duckduckgo",
        display_name: "DuckDuckGo",
        url: "https://duckduckgo.com/?q=",
        icon: "https://duckduckgo.com/favicon.ico",
    },
];
