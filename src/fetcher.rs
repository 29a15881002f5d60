//! Proxied requests to the activity API.
//!
//! Every request goes out as `{relay_base}{encodeURIComponent(upstream_url)}`.
//! The relay is opaque: when it fails, that failure looks the same as a
//! network failure.

use crate::config::Config;
use crate::errors::FetchError;
use crate::models::{Activity, CategoryResult, ResponseMode, UpstreamBody};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

/// Characters `encodeURIComponent` leaves untouched.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

#[derive(Debug, Clone)]
pub struct ActivityFetcher {
    client: Client,
    relay_base: String,
    api_base: String,
}

impl ActivityFetcher {
    pub fn new(client: Client, relay_base: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client,
            relay_base: relay_base.into(),
            api_base: api_base.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Client::new(), &config.relay_base, &config.api_base)
    }

    pub fn proxied_url(&self, upstream: &str) -> String {
        format!("{}{}", self.relay_base, encode_component(upstream))
    }

    pub fn random_url(&self) -> String {
        self.proxied_url(&format!("{}/random", self.api_base))
    }

    pub fn category_url(&self, category: &str) -> String {
        self.proxied_url(&format!(
            "{}/filter?type={}",
            self.api_base,
            encode_component(category)
        ))
    }

    pub async fn fetch_random(&self) -> Result<Activity, FetchError> {
        match self.get(&self.random_url()).await? {
            UpstreamBody::Single(record) => Ok(record.activity),
            UpstreamBody::List(items) => items
                .into_iter()
                .next()
                .ok_or_else(|| FetchError::Upstream("no activities found".to_string())),
        }
    }

    pub async fn fetch_by_category(
        &self,
        category: &str,
        mode: ResponseMode,
    ) -> Result<CategoryResult, FetchError> {
        let body = self.get(&self.category_url(category)).await?;
        normalize(body, mode)
    }

    async fn get(&self, url: &str) -> Result<UpstreamBody, FetchError> {
        debug!(%url, "requesting activity");
        let result = async {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            let bytes = response.bytes().await?;
            interpret_body(status, &bytes)
        }
        .await;

        if let Err(err) = &result {
            warn!(%url, "activity request failed: {err}");
        }
        result
    }
}

/// Classifies a relay response. An in-band `error` wins over the HTTP
/// status; any other non-success status counts as a network failure.
pub fn interpret_body(status: StatusCode, bytes: &[u8]) -> Result<UpstreamBody, FetchError> {
    let parsed = serde_json::from_slice::<UpstreamBody>(bytes);

    if let Ok(UpstreamBody::Single(record)) = &parsed {
        if let Some(message) = record.error.as_deref().filter(|m| !m.is_empty()) {
            return Err(FetchError::Upstream(message.to_string()));
        }
    }

    if !status.is_success() {
        return Err(FetchError::Network(format!("relay returned {status}")));
    }

    Ok(parsed?)
}

pub fn normalize(body: UpstreamBody, mode: ResponseMode) -> Result<CategoryResult, FetchError> {
    match (mode, body) {
        (ResponseMode::List, UpstreamBody::List(items)) => Ok(CategoryResult::Many(items)),
        (ResponseMode::List, UpstreamBody::Single(record)) => {
            Ok(CategoryResult::Many(vec![record.activity]))
        }
        (ResponseMode::Single, UpstreamBody::Single(record)) => {
            Ok(CategoryResult::One(record.activity))
        }
        (ResponseMode::Single, UpstreamBody::List(items)) => items
            .into_iter()
            .next()
            .map(CategoryResult::One)
            .ok_or_else(|| FetchError::Upstream("no activities found".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> ActivityFetcher {
        ActivityFetcher::new(
            Client::new(),
            "https://api.allorigins.win/raw?url=",
            "https://bored-api.appbrewery.com",
        )
    }

    #[test]
    fn random_url_wraps_encoded_upstream() {
        assert_eq!(
            fetcher().random_url(),
            "https://api.allorigins.win/raw?url=https%3A%2F%2Fbored-api.appbrewery.com%2Frandom"
        );
    }

    #[test]
    fn category_url_encodes_query() {
        assert_eq!(
            fetcher().category_url("charity"),
            "https://api.allorigins.win/raw?url=https%3A%2F%2Fbored-api.appbrewery.com%2Ffilter%3Ftype%3Dcharity"
        );
    }

    #[test]
    fn component_encoding_matches_browser_unreserved_set() {
        assert_eq!(encode_component("a-b_c.d!e~f*g'h(i)"), "a-b_c.d!e~f*g'h(i)");
        assert_eq!(encode_component("a b&c/d"), "a%20b%26c%2Fd");
    }

    #[test]
    fn in_band_error_is_upstream_error() {
        let err = interpret_body(StatusCode::OK, br#"{"error":"No activity found"}"#).unwrap_err();
        assert_eq!(err, FetchError::Upstream("No activity found".to_string()));

        let err = interpret_body(StatusCode::NOT_FOUND, br#"{"error":"No activity found"}"#)
            .unwrap_err();
        assert!(matches!(err, FetchError::Upstream(_)));
    }

    #[test]
    fn empty_error_field_is_ignored() {
        let body = interpret_body(
            StatusCode::OK,
            br#"{"activity":"Bake bread","type":"cooking","participants":1,"price":0.2,"accessibility":0.1,"error":""}"#,
        )
        .unwrap();
        let UpstreamBody::Single(record) = body else {
            panic!("expected single body");
        };
        assert_eq!(record.activity.kind, "cooking");
        assert_eq!(record.activity.price, Some(0.2));
    }

    #[test]
    fn malformed_body_and_bad_status_are_network_errors() {
        let err = interpret_body(StatusCode::OK, b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));

        let err = interpret_body(StatusCode::BAD_GATEWAY, br#"{"activity":"x"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    fn single_activity(body: &[u8]) -> Activity {
        match interpret_body(StatusCode::OK, body).unwrap() {
            UpstreamBody::Single(record) => record.activity,
            other => panic!("expected single body, got {other:?}"),
        }
    }

    #[test]
    fn null_text_fields_render_blank_instead_of_failing() {
        let item = single_activity(
            br#"{"activity":"Read","type":null,"participants":1,"price":0.1,"accessibility":0.2}"#,
        );
        assert_eq!(item.activity, "Read");
        assert_eq!(item.kind, "");
        assert_eq!(item.participants, Some(1));

        let item = single_activity(br#"{"activity":null,"type":"social","participants":2}"#);
        assert_eq!(item.activity, "");
        assert_eq!(item.kind, "social");
    }

    #[test]
    fn loosely_typed_numbers_are_accepted() {
        let item = single_activity(
            br#"{"activity":"Run","type":"recreational","participants":1.0,"price":"0.5","accessibility":null}"#,
        );
        assert_eq!(item.participants, Some(1));
        assert_eq!(item.price, Some(0.5));
        assert_eq!(item.accessibility, None);

        let item = single_activity(br#"{"activity":"Run","participants":"2","price":true}"#);
        assert_eq!(item.participants, Some(2));
        assert_eq!(item.price, None);

        let item = single_activity(br#"{"activity":"Run","participants":1.5,"type":7}"#);
        assert_eq!(item.participants, None);
        assert_eq!(item.kind, "7");
    }

    #[test]
    fn one_bad_list_entry_keeps_the_others() {
        let body = interpret_body(
            StatusCode::OK,
            br#"[{"activity":"Cook pasta","type":"cooking","participants":1,"price":0.2,"accessibility":0.1},
                {"activity":["bad"],"type":null,"participants":"many","price":{},"accessibility":null},
                null]"#,
        )
        .unwrap();
        let UpstreamBody::List(items) = body else {
            panic!("expected list body");
        };
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].activity, "Cook pasta");
        assert_eq!(items[0].price, Some(0.2));
        assert_eq!(items[1], Activity::default());
        assert_eq!(items[2], Activity::default());
    }

    #[test]
    fn null_error_field_is_not_an_error() {
        let item = single_activity(br#"{"activity":"Nap","type":"relaxation","error":null}"#);
        assert_eq!(item.activity, "Nap");
    }

    #[test]
    fn normalize_by_mode() {
        let two = UpstreamBody::List(vec![
            Activity {
                activity: "first".to_string(),
                ..Activity::default()
            },
            Activity {
                activity: "second".to_string(),
                ..Activity::default()
            },
        ]);
        match normalize(two.clone(), ResponseMode::Single).unwrap() {
            CategoryResult::One(activity) => assert_eq!(activity.activity, "first"),
            other => panic!("unexpected {other:?}"),
        }
        match normalize(two, ResponseMode::List).unwrap() {
            CategoryResult::Many(items) => assert_eq!(items.len(), 2),
            other => panic!("unexpected {other:?}"),
        }

        let single = interpret_body(StatusCode::OK, br#"{"activity":"solo","type":"social"}"#).unwrap();
        match normalize(single, ResponseMode::List).unwrap() {
            CategoryResult::Many(items) => assert_eq!(items[0].activity, "solo"),
            other => panic!("unexpected {other:?}"),
        }

        let err = normalize(UpstreamBody::List(vec![]), ResponseMode::Single).unwrap_err();
        assert!(matches!(err, FetchError::Upstream(_)));
    }
}
