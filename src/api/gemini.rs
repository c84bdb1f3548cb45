use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::prompt::build_prompt;
use crate::config::GeminiConfig;
use crate::domain::{Coordinates, GroundingChunk};
use crate::error::ScanError;
use crate::parser::{DelimitedTextParser, PlaceExtractor};
use crate::search::{CrowdSource, ScanResult};

const USER_AGENT: &str = "crowdscan/0.1.0 (https://github.com/shantanugoel/crowdscan)";

/// `generateContent` request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_config: Option<ToolConfig>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_maps: GoogleMaps,
}

#[derive(Debug, Serialize)]
struct GoogleMaps {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolConfig {
    retrieval_config: RetrievalConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RetrievalConfig {
    lat_lng: Coordinates,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
}

impl GenerateContentRequest {
    fn new(query: &str, location: Option<Coordinates>, temperature: f64) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: build_prompt(query, location),
                }],
            }],
            tools: vec![Tool {
                google_maps: GoogleMaps {},
            }],
            tool_config: location.map(|lat_lng| ToolConfig {
                retrieval_config: RetrievalConfig { lat_lng },
            }),
            generation_config: GenerationConfig { temperature },
        }
    }
}

/// `generateContent` response, reduced to the fields a scan reads
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, skipping thoughts
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter(|p| !p.thought)
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Grounding references of the first candidate
    pub fn grounding_chunks(&self) -> Vec<GroundingChunk> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|m| m.grounding_chunks.clone())
            .unwrap_or_default()
    }
}

/// Client for the Gemini `generateContent` endpoint with Google Maps grounding
pub struct GeminiClient<E = DelimitedTextParser> {
    http: reqwest::blocking::Client,
    config: GeminiConfig,
    extractor: E,
}

impl GeminiClient<DelimitedTextParser> {
    pub fn new(config: GeminiConfig) -> Result<Self, ScanError> {
        Self::with_extractor(config, DelimitedTextParser)
    }
}

impl<E: PlaceExtractor> GeminiClient<E> {
    pub fn with_extractor(config: GeminiConfig, extractor: E) -> Result<Self, ScanError> {
        // No timeout unless configured: the call resolves when the transport does
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout_secs.map(Duration::from_secs))
            .build()
            .map_err(ScanError::Client)?;

        Ok(Self {
            http,
            config,
            extractor,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Read the API key at call time so a missing key only fails searches
    fn api_key(&self) -> Result<String, ScanError> {
        std::env::var(&self.config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ScanError::MissingApiKey(self.config.api_key_env.clone()))
    }

    /// Send one `generateContent` request. No retries.
    pub fn generate(
        &self,
        query: &str,
        location: Option<Coordinates>,
    ) -> Result<GenerateContentResponse, ScanError> {
        let api_key = self.api_key()?;
        let body = GenerateContentRequest::new(query, location, self.config.temperature);

        tracing::debug!(model = %self.config.model, query, has_location = location.is_some(), "sending scan request");

        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ScanError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json()?)
    }
}

impl<E: PlaceExtractor> CrowdSource for GeminiClient<E> {
    fn scan(&self, query: &str, location: Option<Coordinates>) -> Result<ScanResult, ScanError> {
        let response = self.generate(query, location)?;
        let text = response.text();
        let grounding = response.grounding_chunks();
        let places = self.extractor.extract(&text, &grounding);

        tracing::debug!(
            text_len = text.len(),
            grounding = grounding.len(),
            places = places.len(),
            "scan response parsed"
        );

        Ok(ScanResult { places, grounding })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_without_location() {
        let request = GenerateContentRequest::new("Gyms", None, 0.7);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["tools"], json!([{ "googleMaps": {} }]));
        assert!(value.get("toolConfig").is_none());
        assert_eq!(value["contents"][0]["role"], "user");
        assert!(
            value["contents"][0]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .contains("\"Gyms\"")
        );
        let temperature = value["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_request_with_location_bias() {
        let request =
            GenerateContentRequest::new("Parks", Some(Coordinates::new(48.8566, 2.3522)), 0.7);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value["toolConfig"],
            json!({ "retrievalConfig": { "latLng": { "latitude": 48.8566, "longitude": 2.3522 } } })
        );
        assert!(
            value["contents"][0]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .contains("latitude: 48.8566")
        );
    }

    #[test]
    fn test_parse_response_text_and_grounding() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "thinking about bars", "thought": true},
                        {"text": "---PLACE_START---\nNAME: Joe's Bar\n"},
                        {"text": "CROWD_SCORE: 85\n---PLACE_END---"}
                    ]
                },
                "groundingMetadata": {
                    "groundingChunks": [
                        {"maps": {"uri": "https://maps.google.com/?cid=7", "title": "Joe's Bar", "placeId": "places/abc"}},
                        {"web": {"uri": "https://example.com", "title": "Example"}}
                    ]
                }
            }]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.text(),
            "---PLACE_START---\nNAME: Joe's Bar\nCROWD_SCORE: 85\n---PLACE_END---"
        );

        let grounding = response.grounding_chunks();
        assert_eq!(grounding.len(), 2);
        assert_eq!(grounding[0].maps_title(), Some("Joe's Bar"));
        assert_eq!(grounding[1].maps, None);

        let places = DelimitedTextParser.extract(&response.text(), &grounding);
        assert_eq!(places.len(), 1);
        assert_eq!(
            places[0].maps_uri.as_deref(),
            Some("https://maps.google.com/?cid=7")
        );
    }

    #[test]
    fn test_empty_response_is_not_an_error() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text(), "");
        assert!(response.grounding_chunks().is_empty());
    }

    #[test]
    fn test_missing_api_key_fails_on_use() {
        let config = GeminiConfig {
            api_key_env: "CROWDSCAN_TEST_UNSET_KEY".to_string(),
            ..GeminiConfig::default()
        };
        let client = GeminiClient::new(config).unwrap();

        match client.scan("Parks", None) {
            Err(ScanError::MissingApiKey(var)) => assert_eq!(var, "CROWDSCAN_TEST_UNSET_KEY"),
            other => panic!("expected missing key, got {:?}", other.map(|r| r.places.len())),
        }
    }

    #[test]
    fn test_url_joins_endpoint_and_model() {
        let config = GeminiConfig {
            endpoint: "https://example.test/v1beta/".to_string(),
            ..GeminiConfig::default()
        };
        let client = GeminiClient::new(config).unwrap();
        assert_eq!(
            client.url(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
