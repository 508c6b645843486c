//! Optional remote moderation fallback.
//!
//! The filter can consult an external moderation service when its own
//! dictionaries find nothing. The service is reached through the
//! [`ModerationClient`] trait; [`ModerationGateway`] adds a timeout and
//! swallows failures so a slow or broken service never fails a query.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

/// How long a remote check may take before it is abandoned.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Languages sent with every request.
const DEFAULT_LANGUAGES: &[&str] = &["en"];

/// Codes the service spells differently from ISO 639-1.
const LANGUAGE_CONVERSIONS: &[(&str, &str)] = &[("es", "sp"), ("ko", "kr"), ("ja", "jp")];

/// Language codes the service accepts (after conversion).
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "en", "ar", "fr", "de", "hi", "jp", "it", "pt", "ru", "sp", "th", "tr", "zh", "kr", "pa",
];

/// A remote service that counts profane words in a phrase.
#[async_trait]
pub trait ModerationClient: Send + Sync {
    /// Number of profane words in `phrase`. `languages` is a comma-separated
    /// list of service language codes.
    async fn check_count(&self, phrase: &str, languages: &str) -> anyhow::Result<u32>;
}

/// Wraps a [`ModerationClient`] with a timeout and graceful degradation.
#[derive(Clone)]
pub struct ModerationGateway {
    client: Arc<dyn ModerationClient>,
    timeout: Duration,
}

impl std::fmt::Debug for ModerationGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModerationGateway")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ModerationGateway {
    pub fn new(client: Arc<dyn ModerationClient>) -> Self {
        Self {
            client,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Ask the service for a profanity count.
    ///
    /// Returns `None` when the call fails or exceeds the timeout; the caller
    /// falls back to its local result.
    pub async fn count(&self, phrase: &str, lang: Option<&str>) -> Option<u32> {
        let languages = language_list(lang);
        debug!(languages = %languages, "querying moderation service");

        match tokio::time::timeout(self.timeout, self.client.check_count(phrase, &languages)).await {
            Ok(Ok(count)) => Some(count),
            Ok(Err(err)) => {
                warn!(error = %err, "moderation service failed; using local result");
                None
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "moderation service timed out; using local result"
                );
                None
            }
        }
    }
}

/// Build the comma-separated language list for a request.
///
/// The default languages are always present. A requested language is cut to
/// its first two lowercase characters (`zh-Hant` → `zh`), converted to the
/// service's spelling (`es` → `sp`) and added only if supported.
pub fn language_list(lang: Option<&str>) -> String {
    let mut langs: Vec<&str> = DEFAULT_LANGUAGES.to_vec();

    if let Some(lang) = lang {
        let short: String = lang.to_lowercase().chars().take(2).collect();
        let converted = LANGUAGE_CONVERSIONS
            .iter()
            .find(|(from, _)| *from == short)
            .map(|(_, to)| *to)
            .unwrap_or(short.as_str());
        if let Some(supported) = SUPPORTED_LANGUAGES.iter().find(|l| **l == converted) {
            if !langs.contains(supported) {
                langs.push(*supported);
            }
        }
    }

    langs.join(",")
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// Scripted moderation client for tests.
    pub(crate) struct FakeClient {
        pub count: u32,
        pub fail: bool,
        pub delay: Duration,
        pub calls: AtomicUsize,
        pub languages: Mutex<Vec<String>>,
    }

    impl FakeClient {
        pub(crate) fn returning(count: u32) -> Self {
            Self {
                count,
                fail: false,
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
                languages: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                fail: true,
                ..Self::returning(0)
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ModerationClient for FakeClient {
        async fn check_count(&self, _phrase: &str, languages: &str) -> anyhow::Result<u32> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.languages.lock().unwrap().push(languages.to_string());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.fail {
                anyhow::bail!("service unavailable");
            }
            Ok(self.count)
        }
    }

    #[test]
    fn default_language_only() {
        assert_eq!(language_list(None), "en");
        assert_eq!(language_list(Some("en")), "en");
        assert_eq!(language_list(Some("EN-us")), "en");
    }

    #[test]
    fn converts_language_codes() {
        assert_eq!(language_list(Some("es")), "en,sp");
        assert_eq!(language_list(Some("ko")), "en,kr");
        assert_eq!(language_list(Some("ja")), "en,jp");
        assert_eq!(language_list(Some("fr")), "en,fr");
    }

    #[test]
    fn shortens_long_language_codes() {
        assert_eq!(language_list(Some("zh-Hant")), "en,zh");
        assert_eq!(language_list(Some("pt_BR")), "en,pt");
    }

    #[test]
    fn drops_unsupported_languages() {
        assert_eq!(language_list(Some("bogus")), "en");
        assert_eq!(language_list(Some("")), "en");
    }

    #[tokio::test]
    async fn count_passes_through() {
        let client = Arc::new(FakeClient::returning(2));
        let gateway = ModerationGateway::new(client.clone());
        assert_eq!(gateway.count("tits fuck", Some("es")).await, Some(2));
        assert_eq!(client.calls(), 1);
        assert_eq!(client.languages.lock().unwrap().as_slice(), ["en,sp"]);
    }

    #[tokio::test]
    async fn failure_yields_none() {
        let gateway = ModerationGateway::new(Arc::new(FakeClient::failing()));
        assert_eq!(gateway.count("foo", None).await, None);
    }

    #[tokio::test]
    async fn timeout_yields_none() {
        let slow = FakeClient {
            delay: Duration::from_millis(200),
            ..FakeClient::returning(1)
        };
        let gateway =
            ModerationGateway::new(Arc::new(slow)).with_timeout(Duration::from_millis(20));
        assert_eq!(gateway.count("tits", Some("bogus")).await, None);

        let fast = ModerationGateway::new(Arc::new(FakeClient::returning(1)))
            .with_timeout(Duration::from_millis(100));
        assert_eq!(fast.count("tits", Some("bogus")).await, Some(1));
    }

    #[test]
    fn default_timeout_is_five_seconds() {
        let gateway = ModerationGateway::new(Arc::new(FakeClient::returning(0)));
        assert_eq!(gateway.timeout(), Duration::from_secs(5));
    }
}
