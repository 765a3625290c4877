use crate::config::{Config, RuntimeContext};
use crate::error::FetchError;
use crate::{manifest, markdown, repository};
use futures::future::try_join_all;
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::OnceCell;
use tracing::{debug, info};

const LANGUAGE_FILE: &str = "languages";
const INDEX_FILE: &str = "index";

/// One converted content file: rendered HTML plus its front-matter metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsItem {
    pub content: String,
    pub metadata: HashMap<String, String>,
}

/// Aggregates the news repository for one external request.
///
/// Construct one instance per request and discard it afterwards. The first
/// [`fetch_news`](Self::fetch_news) call performs the aggregation and caches
/// the result on the instance; later calls on the same instance return the
/// cached collection without touching the network, whatever locale they pass.
/// Instances are never shared across requests, so one request's locale can
/// never leak into another's.
pub struct NewsService {
    config: Config,
    context: RuntimeContext,
    client: reqwest::Client,
    news: OnceCell<Vec<NewsItem>>,
}

impl NewsService {
    pub fn new(config: Config, context: RuntimeContext) -> Self {
        Self {
            config,
            context,
            client: reqwest::Client::new(),
            news: OnceCell::new(),
        }
    }

    /// Fetch, convert and cache the news collection for a locale preference.
    ///
    /// Items come back in the order of the language's index file. Any fetch
    /// failure, for the manifests or any single content file, aborts the
    /// whole call with a [`FetchError`] and caches nothing.
    pub async fn fetch_news(&self, locale_preference: &str) -> Result<&[NewsItem], FetchError> {
        self.news
            .get_or_try_init(|| self.aggregate(locale_preference))
            .await
            .map(Vec::as_slice)
    }

    async fn aggregate(&self, locale_preference: &str) -> Result<Vec<NewsItem>, FetchError> {
        let base_url = repository::resolve_base_url(&self.config.repo_url_template, &self.context);

        let language_file_url = format!("{base_url}{LANGUAGE_FILE}");
        debug!(url = %language_file_url, "reading language manifest");
        let languages = manifest::read_lines(&self.client, &language_file_url).await?;

        let language = self.resolve_language(&languages, locale_preference);
        debug!(requested = locale_preference, effective = language, "resolved language");

        let index_url = format!("{base_url}{language}/{INDEX_FILE}");
        debug!(url = %index_url, "reading file index");
        let index = manifest::read_lines(&self.client, &index_url).await?;

        // Launch every file fetch before awaiting any of them; the first
        // failure aborts the lot.
        let fetches = index.iter().map(|file_name| {
            let url = format!("{base_url}{language}/{file_name}");
            debug!(url = %url, "fetching news file");
            let client = &self.client;
            async move { manifest::fetch_text(client, &url).await }
        });
        let bodies = try_join_all(fetches).await?;

        let items = bodies
            .iter()
            .map(|body| {
                let (content, metadata) = markdown::convert(body);
                NewsItem { content, metadata }
            })
            .collect();

        info!(count = index.len(), language, "news aggregation complete");
        Ok(items)
    }

    /// Exact, case-sensitive membership check; anything else falls back to
    /// the configured default. No prefix matching: "en-US" does not match a
    /// manifest entry of "en".
    fn resolve_language<'a>(&'a self, available: &'a [String], requested: &'a str) -> &'a str {
        if available.iter().any(|language| language == requested) {
            requested
        } else {
            &self.config.default_language
        }
    }
}
