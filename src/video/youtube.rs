use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{VideoDescriptor, VideoSearch, MAX_VIDEOS_PER_LOOKUP};
use crate::error::LookupError;

/// Safe-search level sent with every lookup; not configurable
pub const SAFE_SEARCH: &str = "strict";

/// Relevance language sent with every lookup; not configurable
pub const RELEVANCE_LANGUAGE: &str = "en";

/// Video search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSearchConfig {
    /// YouTube Data API search endpoint
    pub endpoint: String,

    /// API key; normally taken from `YOUTUBE_API_KEY`
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Results requested per lookup (capped at 3)
    pub max_results: usize,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for VideoSearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.googleapis.com/youtube/v3/search".to_string(),
            api_key: None,
            max_results: MAX_VIDEOS_PER_LOOKUP,
            timeout_seconds: 30,
        }
    }
}

/// YouTube Data API v3 search client
pub struct YouTubeSearchClient {
    config: VideoSearchConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: SearchResultId,
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
struct SearchResultId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    medium: Option<Thumbnail>,
    high: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

impl Thumbnails {
    fn preferred_url(self) -> String {
        self.medium
            .or(self.high)
            .or(self.default)
            .map(|t| t.url)
            .unwrap_or_default()
    }
}

impl YouTubeSearchClient {
    pub fn new(config: VideoSearchConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { config, client })
    }

    fn max_results(&self) -> usize {
        self.config.max_results.clamp(1, MAX_VIDEOS_PER_LOOKUP)
    }

    /// Query string for `search.list`, minus the API key
    fn search_params(&self, query: &str) -> Vec<(&'static str, String)> {
        vec![
            ("part", "snippet".to_string()),
            ("q", query.to_string()),
            ("type", "video".to_string()),
            ("videoEmbeddable", "true".to_string()),
            ("maxResults", self.max_results().to_string()),
            ("relevanceLanguage", RELEVANCE_LANGUAGE.to_string()),
            ("safeSearch", SAFE_SEARCH.to_string()),
        ]
    }
}

/// Convert a search response into descriptors, dropping non-video hits
fn descriptors_from_response(response: SearchListResponse, limit: usize) -> Vec<VideoDescriptor> {
    response
        .items
        .into_iter()
        .filter_map(|item| {
            let video_id = item.id.video_id?;
            let snippet = item.snippet?;
            Some(VideoDescriptor {
                title: snippet.title,
                video_id,
                thumbnail_url: snippet.thumbnails.preferred_url(),
                description: snippet.description,
            })
        })
        .take(limit)
        .collect()
}

#[async_trait]
impl VideoSearch for YouTubeSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<VideoDescriptor>, LookupError> {
        let api_key = self.config.api_key.as_deref().unwrap_or_default();

        debug!("Searching YouTube for: {}", query);

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&self.search_params(query))
            .query(&[("key", api_key)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Service { status, body });
        }

        let search_response: SearchListResponse = response.json().await?;
        let videos = descriptors_from_response(search_response, self.max_results());

        debug!("YouTube returned {} videos for: {}", videos.len(), query);
        Ok(videos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
      "kind": "youtube#searchListResponse",
      "items": [
        {"id": {"kind": "youtube#video", "videoId": "v1"},
         "snippet": {"title": "How to treat a burn", "description": "Cool the burn",
                     "thumbnails": {"default": {"url": "d1"}, "medium": {"url": "m1"}}}},
        {"id": {"kind": "youtube#channel", "channelId": "c1"},
         "snippet": {"title": "First Aid Channel", "description": ""}},
        {"id": {"kind": "youtube#video", "videoId": "v2"},
         "snippet": {"title": "Burn care", "thumbnails": {"high": {"url": "h2"}}}},
        {"id": {"kind": "youtube#video", "videoId": "v3"},
         "snippet": {"title": "Third", "description": "x", "thumbnails": {}}},
        {"id": {"kind": "youtube#video", "videoId": "v4"},
         "snippet": {"title": "Fourth", "description": "y", "thumbnails": {}}}
      ]
    }"#;

    #[test]
    fn test_descriptors_skip_non_videos_and_cap() {
        let response: SearchListResponse = serde_json::from_str(SAMPLE).unwrap();
        let videos = descriptors_from_response(response, MAX_VIDEOS_PER_LOOKUP);

        let ids: Vec<_> = videos.iter().map(|v| v.video_id.as_str()).collect();
        assert_eq!(ids, vec!["v1", "v2", "v3"]);
    }

    #[test]
    fn test_thumbnail_preference() {
        let response: SearchListResponse = serde_json::from_str(SAMPLE).unwrap();
        let videos = descriptors_from_response(response, MAX_VIDEOS_PER_LOOKUP);

        assert_eq!(videos[0].thumbnail_url, "m1");
        assert_eq!(videos[1].thumbnail_url, "h2");
        assert_eq!(videos[2].thumbnail_url, "");
        assert_eq!(videos[1].description, "");
    }

    #[test]
    fn test_empty_response() {
        let response: SearchListResponse = serde_json::from_str("{}").unwrap();
        assert!(descriptors_from_response(response, 3).is_empty());
    }

    #[test]
    fn test_max_results_is_capped() {
        let client = YouTubeSearchClient::new(VideoSearchConfig {
            max_results: 25,
            ..VideoSearchConfig::default()
        })
        .unwrap();
        assert_eq!(client.max_results(), MAX_VIDEOS_PER_LOOKUP);
    }

    #[test]
    fn test_search_params_are_strict_and_english() {
        let client = YouTubeSearchClient::new(VideoSearchConfig::default()).unwrap();
        let params = client.search_params("severe burn");

        let value = |name: &str| {
            params
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.as_str())
        };
        assert_eq!(value("safeSearch"), Some("strict"));
        assert_eq!(value("relevanceLanguage"), Some("en"));
        assert_eq!(value("type"), Some("video"));
        assert_eq!(value("videoEmbeddable"), Some("true"));
        assert_eq!(value("maxResults"), Some("3"));
        assert_eq!(value("q"), Some("severe burn"));
    }
}
