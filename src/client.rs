//! Definition page lookups
//!
//! Fetches a word's definition page and runs it through [`parse`]. A page
//! answered with a non-success status means the word was not found.

use std::time::Duration;

use url::Url;

use crate::constants::{BASE_URL, DEFINITION_PATH, PREFERENCES_COOKIE};
use crate::error::Result;
use crate::options::{DictionaryFlags, ParserOptions};
use crate::parser::{parse, Results};

/// Connection settings for lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            user_agent: concat!("dexonline-parser/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
        }
    }
}

/// Link to the definition page of `word` under `base_url`
pub fn definition_url(base_url: &str, word: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .push(DEFINITION_PATH)
        .push(word);
    Ok(url)
}

/// Cookie header value carrying the dictionary flags
pub fn preferences_cookie(flags: DictionaryFlags) -> String {
    format!("{PREFERENCES_COOKIE}={flags}")
}

fn lookup_options(word: &str, options: &ParserOptions) -> ParserOptions {
    let mut options = options.clone();
    if options.word.is_empty() {
        options.word = word.to_string();
    }
    options
}

/// Async lookups over `reqwest`
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    /// Fetch the definition page of `word`, or `None` if the site has no page
    pub async fn fetch(&self, word: &str, flags: DictionaryFlags) -> Result<Option<String>> {
        let url = definition_url(&self.config.base_url, word)?;
        let response = self
            .http
            .get(url.as_str())
            .header(reqwest::header::COOKIE, preferences_cookie(flags))
            .send()
            .await?;

        log::info!("GET {url} -> {}", response.status());
        if !response.status().is_success() {
            return Ok(None);
        }

        Ok(Some(response.text().await?))
    }

    /// Look `word` up and parse its page
    pub async fn fetch_and_parse(&self, word: &str, options: &ParserOptions) -> Result<Option<Results>> {
        let Some(body) = self.fetch(word, options.flags).await? else {
            return Ok(None);
        };
        parse(&body, &lookup_options(word, options)).map(Some)
    }
}

/// Blocking lookups over `ureq` (no async runtime needed)
#[derive(Debug, Clone)]
pub struct BlockingClient {
    agent: ureq::Agent,
    config: ClientConfig,
}

impl BlockingClient {
    pub fn new(config: ClientConfig) -> Self {
        let agent = ureq::Agent::new_with_config(
            ureq::Agent::config_builder()
                .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
                .user_agent(config.user_agent.as_str())
                .http_status_as_error(false)
                .build(),
        );
        Self { agent, config }
    }

    pub fn fetch(&self, word: &str, flags: DictionaryFlags) -> Result<Option<String>> {
        let url = definition_url(&self.config.base_url, word)?;
        let response = self
            .agent
            .get(url.as_str())
            .header("Cookie", preferences_cookie(flags))
            .call()?;

        log::info!("GET {url} -> {}", response.status());
        if !response.status().is_success() {
            return Ok(None);
        }

        Ok(Some(response.into_body().read_to_string()?))
    }

    pub fn fetch_and_parse(&self, word: &str, options: &ParserOptions) -> Result<Option<Results>> {
        let Some(body) = self.fetch(word, options.flags)? else {
            return Ok(None);
        };
        parse(&body, &lookup_options(word, options)).map(Some)
    }
}

/// Look `word` up on dexonline with the default client settings
pub async fn fetch_and_parse(word: &str, options: &ParserOptions) -> Result<Option<Results>> {
    Client::new(ClientConfig::default())?
        .fetch_and_parse(word, options)
        .await
}

/// Blocking variant of [`fetch_and_parse`]
pub fn fetch_and_parse_blocking(word: &str, options: &ParserOptions) -> Result<Option<Results>> {
    BlockingClient::new(ClientConfig::default()).fetch_and_parse(word, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::MatchingMode;

    #[test]
    fn test_definition_url() {
        let url = definition_url(BASE_URL, "întregime").unwrap();
        assert_eq!(url.as_str(), "https://dexonline.ro/definitie/%C3%AEntregime");

        let url = definition_url("https://example.com/dex/", "a/b").unwrap();
        assert_eq!(url.as_str(), "https://example.com/dex/definitie/a%2Fb");

        assert!(definition_url("not a url", "da").is_err());
        assert!(definition_url("mailto:someone@example.com", "da").is_err());
    }

    #[test]
    fn test_preferences_cookie() {
        let flags = DictionaryFlags::USE_CEDILLAS | DictionaryFlags::MATCH_DIACRITICS;
        assert_eq!(preferences_cookie(flags), "prefs[anonymousPrefs]=3");
        assert_eq!(preferences_cookie(DictionaryFlags::NONE), "prefs[anonymousPrefs]=0");
    }

    #[test]
    fn test_lookup_options_fill_word() {
        let options = lookup_options("da", &ParserOptions::default());
        assert_eq!(options.word, "da");

        let options = lookup_options("da", &ParserOptions::strict("dare"));
        assert_eq!(options.word, "dare");
        assert_eq!(options.mode, MatchingMode::Strict);
    }

    #[tokio::test]
    #[ignore = "requires network access to dexonline.ro"]
    async fn test_fetch_single_entry() {
        let results = fetch_and_parse("întregime", &ParserOptions::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(results.synthesis.len(), 1);
        assert_eq!(results.synthesis[0].kind, "substantiv feminin");
        assert_eq!(results.inflection.len(), 1);
    }

    #[tokio::test]
    #[ignore = "requires network access to dexonline.ro"]
    async fn test_fetch_missing_word() {
        let results = fetch_and_parse("dexonline", &ParserOptions::default()).await.unwrap();
        assert!(results.is_none());
    }

    #[test]
    #[ignore = "requires network access to dexonline.ro"]
    fn test_fetch_blocking_with_cedillas() {
        let options = ParserOptions {
            flags: DictionaryFlags::USE_CEDILLAS,
            ..ParserOptions::default()
        };
        let results = fetch_and_parse_blocking("și", &options).unwrap().unwrap();
        let json = serde_json::to_string(&results).unwrap();
        assert!(!json.contains('ș') && !json.contains('ț'));
    }
}
