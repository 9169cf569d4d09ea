//! Generation service backed by the HTTP proxy in front of the model API.
//!
//! The proxy takes `{model, contents, config}` as a `text/plain` body and
//! answers `{text}` on success or `{error: {message}}` on failure, often with
//! a 200 status either way. Everything coming back is parsed into typed
//! records and checked before it reaches the session.
use super::error::{ProxyFailure, ServiceError, PROXY_FALLBACK_MESSAGE};
use super::generation::GenerationService;
use super::prompt;
use crate::model::{MenuItem, OrderConfirmation, OrderDraft, Restaurant};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Connection settings for [`ProxyGenerationService`].
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub url: String,
    pub model: String,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ProxyGenerationService {
    config: ProxyConfig,
    http: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProxyRequest<'a> {
    model: &'a str,
    contents: String,
    config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    text: Option<String>,
    error: Option<EnvelopeError>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeError {
    message: Option<String>,
}

impl ProxyGenerationService {
    pub fn new(config: ProxyConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { config, http })
    }

    /// One round trip to the proxy. Returns the trimmed `text` document.
    async fn call(
        &self,
        contents: String,
        schema: serde_json::Value,
    ) -> Result<String, ProxyFailure> {
        let request = ProxyRequest {
            model: &self.config.model,
            contents,
            config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            },
        };
        let body = serde_json::to_string(&request)?;

        let response = self
            .http
            .post(&self.config.url)
            .header(CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(%status, bytes = text.len(), "Proxy answered");
        decode_envelope(status, &text)
    }

    async fn restaurants(&self) -> Result<Vec<Restaurant>, ProxyFailure> {
        let text = self
            .call(prompt::restaurants_prompt(), prompt::restaurants_schema())
            .await?;
        let restaurants: Vec<Restaurant> = decode_payload(&text)?;
        check_restaurants(&restaurants)?;
        Ok(restaurants)
    }

    async fn menu(&self, restaurant_name: &str) -> Result<Vec<MenuItem>, ProxyFailure> {
        let text = self
            .call(prompt::menu_prompt(restaurant_name), prompt::menu_schema())
            .await?;
        let menu: Vec<MenuItem> = decode_payload(&text)?;
        check_menu(&menu)?;
        Ok(menu)
    }

    async fn confirmation(&self, draft: &OrderDraft) -> Result<OrderConfirmation, ProxyFailure> {
        let text = self
            .call(
                prompt::confirmation_prompt(draft),
                prompt::confirmation_schema(),
            )
            .await?;
        decode_payload(&text)
    }
}

#[async_trait]
impl GenerationService for ProxyGenerationService {
    #[instrument(skip(self))]
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, ServiceError> {
        self.restaurants().await.map_err(|e| {
            error!(error = %e, "Fetching restaurants via proxy failed");
            ServiceError::Restaurants(e)
        })
    }

    #[instrument(skip(self))]
    async fn fetch_menu(&self, restaurant_name: &str) -> Result<Vec<MenuItem>, ServiceError> {
        self.menu(restaurant_name).await.map_err(|e| {
            error!(error = %e, "Fetching menu via proxy failed");
            ServiceError::Menu(e)
        })
    }

    #[instrument(
        skip(self, draft),
        fields(restaurant = %draft.restaurant_name, total = draft.total)
    )]
    async fn confirm_order(&self, draft: &OrderDraft) -> Result<OrderConfirmation, ServiceError> {
        self.confirmation(draft).await.map_err(|e| {
            error!(error = %e, "Submitting order via proxy failed");
            ServiceError::Confirmation(e)
        })
    }
}

/// Interprets a proxy answer. Succeeds only with a 2xx status, no `error`
/// object and a `text` field; the text is returned trimmed.
pub fn decode_envelope(status: StatusCode, body: &str) -> Result<String, ProxyFailure> {
    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => {
            return Err(ProxyFailure::Rejected(PROXY_FALLBACK_MESSAGE.to_string()))
        }
        Err(e) => return Err(e.into()),
    };

    if !status.is_success() || envelope.error.is_some() {
        let message = envelope
            .error
            .and_then(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| PROXY_FALLBACK_MESSAGE.to_string());
        return Err(ProxyFailure::Rejected(message));
    }

    envelope
        .text
        .map(|text| text.trim().to_string())
        .ok_or_else(|| ProxyFailure::InvalidResponse("missing `text` field".to_string()))
}

pub fn decode_payload<T: DeserializeOwned>(text: &str) -> Result<T, ProxyFailure> {
    Ok(serde_json::from_str(text)?)
}

pub fn check_restaurants(restaurants: &[Restaurant]) -> Result<(), ProxyFailure> {
    let mut seen = HashSet::new();
    for restaurant in restaurants {
        if !seen.insert(&restaurant.id) {
            return Err(ProxyFailure::InvalidResponse(format!(
                "duplicate restaurant id {}",
                restaurant.id
            )));
        }
        if !restaurant.has_valid_rating() {
            return Err(ProxyFailure::InvalidResponse(format!(
                "rating {} of {} is outside 0-{}",
                restaurant.rating,
                restaurant.id,
                Restaurant::MAX_RATING
            )));
        }
    }
    Ok(())
}

pub fn check_menu(menu: &[MenuItem]) -> Result<(), ProxyFailure> {
    let mut seen = HashSet::new();
    match menu.iter().find(|item| !seen.insert(&item.id)) {
        Some(item) => Err(ProxyFailure::InvalidResponse(format!(
            "duplicate menu item id {}",
            item.id
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_trimmed() {
        let body = r#"{"text": "  [{\"id\":\"m1\",\"name\":\"湯麵\",\"price\":120}]\n"}"#;
        let text = decode_envelope(StatusCode::OK, body).unwrap();
        let menu: Vec<MenuItem> = decode_payload(&text).unwrap();
        assert_eq!(menu, vec![MenuItem::new("m1", "湯麵", 120)]);
    }

    #[test]
    fn test_error_object_fails_even_with_ok_status() {
        let body = r#"{"error": {"message": "API key not valid"}}"#;
        assert_eq!(
            decode_envelope(StatusCode::OK, body),
            Err(ProxyFailure::Rejected("API key not valid".into()))
        );
    }

    #[test]
    fn test_bad_status_without_message_uses_fallback() {
        let fallback = Err(ProxyFailure::Rejected(PROXY_FALLBACK_MESSAGE.into()));
        assert_eq!(
            decode_envelope(StatusCode::INTERNAL_SERVER_ERROR, r#"{"text": "[]"}"#),
            fallback
        );
        assert_eq!(
            decode_envelope(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>"),
            fallback
        );
        assert_eq!(
            decode_envelope(StatusCode::OK, r#"{"error": {}}"#),
            fallback
        );
    }

    #[test]
    fn test_missing_text_is_invalid() {
        assert!(matches!(
            decode_envelope(StatusCode::OK, "{}"),
            Err(ProxyFailure::InvalidResponse(_))
        ));
        assert!(matches!(
            decode_envelope(StatusCode::OK, "not json"),
            Err(ProxyFailure::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_wrong_shape_fails_closed() {
        // Price must be a non-negative integer.
        let result: Result<Vec<MenuItem>, _> =
            decode_payload(r#"[{"id":"m1","name":"湯麵","price":-5}]"#);
        assert!(matches!(result, Err(ProxyFailure::InvalidResponse(_))));

        let result: Result<OrderConfirmation, _> = decode_payload(r#"{"orderNumber":"GEM-1"}"#);
        assert!(result.is_err());
    }

    fn restaurant(id: &str, rating: f64) -> Restaurant {
        Restaurant {
            id: id.into(),
            name: format!("Restaurant {id}"),
            category: "台式料理".into(),
            image: "https://images.unsplash.com/photo".into(),
            rating,
            reviews: 120,
            delivery_time: "20-30 分鐘".into(),
            min_order: 100,
        }
    }

    #[test]
    fn test_restaurant_checks() {
        assert!(check_restaurants(&[restaurant("a", 4.1), restaurant("b", 5.0)]).is_ok());
        assert!(check_restaurants(&[restaurant("a", 4.1), restaurant("a", 3.9)]).is_err());
        assert!(check_restaurants(&[restaurant("a", 5.5)]).is_err());
        assert!(check_restaurants(&[restaurant("a", -0.1)]).is_err());
    }

    #[test]
    fn test_menu_rejects_duplicate_ids() {
        let menu = [MenuItem::new("x", "A", 10), MenuItem::new("x", "B", 20)];
        assert!(check_menu(&menu).is_err());
        assert!(check_menu(&menu[..1]).is_ok());
    }

    #[test]
    fn test_request_body_shape() {
        let request = ProxyRequest {
            model: "gemini-2.5-flash",
            contents: "hello".into(),
            config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: prompt::menu_schema(),
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gemini-2.5-flash");
        assert_eq!(value["contents"], "hello");
        assert_eq!(value["config"]["responseMimeType"], "application/json");
        assert_eq!(value["config"]["responseSchema"]["type"], "ARRAY");
    }
}
