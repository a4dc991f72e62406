//! Cursor-driven pagination over list endpoints.
//!
//! Each page request reuses the caller's fixed parameters and only varies
//! `cursor`. The loop ends on the first empty `next_cursor` or the first
//! error; on error nothing accumulated so far is returned. The platform is
//! trusted to eventually return an empty cursor, and `max_pages` bounds the
//! loop against a server that never does.

use crate::api::envelope;
use crate::api::params::Params;
use crate::api::transport::Transport;
use crate::error::ApiError;
use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

const CURSOR_PARAM: &str = "cursor";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: Option<String>,
}

pub(crate) struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: String,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, metadata: Option<ResponseMetadata>) -> Self {
        let next_cursor = metadata.and_then(|m| m.next_cursor).unwrap_or_default();
        Self { items, next_cursor }
    }
}

/// A list endpoint's typed response: knows which field holds the items.
pub(crate) trait Paged: DeserializeOwned {
    type Item;

    fn into_page(self) -> Page<Self::Item>;
}

pub(crate) async fn paginate<T, P>(
    transport: &T,
    endpoint: &str,
    params: &Params,
    max_pages: usize,
) -> Result<Vec<P::Item>, ApiError>
where
    T: Transport + ?Sized,
    P: Paged,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;

    for page_number in 1..=max_pages {
        let mut request = params.clone();
        if let Some(cursor) = cursor.take() {
            request.set(CURSOR_PARAM, cursor);
        }

        debug!(endpoint, page = page_number, "fetching page");
        let value = transport.call(Method::GET, endpoint, &request).await?;
        let page = envelope::into_result::<P>(endpoint, value)?.into_page();
        items.extend(page.items);

        if page.next_cursor.is_empty() {
            debug!(endpoint, pages = page_number, items = items.len(), "pagination done");
            return Ok(items);
        }
        cursor = Some(page.next_cursor);
    }

    Err(ApiError::Protocol {
        endpoint: endpoint.to_string(),
        message: format!(
            "server still returned a next_cursor after {} pages",
            max_pages
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::params::ParamValue;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    #[derive(Debug, Deserialize)]
    struct NumberList {
        #[serde(default)]
        numbers: Vec<u32>,
        response_metadata: Option<ResponseMetadata>,
    }

    impl Paged for NumberList {
        type Item = u32;

        fn into_page(self) -> Page<u32> {
            Page::new(self.numbers, self.response_metadata)
        }
    }

    /// Replays canned bodies and records every request it receives.
    struct ScriptedTransport {
        responses: Mutex<VecDeque<Value>>,
        requests: Mutex<Vec<Params>>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<Value>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<Params> {
            self.requests.lock().expect("lock poisoned").clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn call(
            &self,
            _method: Method,
            _endpoint: &str,
            params: &Params,
        ) -> Result<Value, ApiError> {
            self.requests.lock().expect("lock poisoned").push(params.clone());
            Ok(self
                .responses
                .lock()
                .expect("lock poisoned")
                .pop_front()
                .unwrap_or_else(|| json!({"ok": true, "numbers": []})))
        }
    }

    fn page(numbers: &[u32], cursor: &str) -> Value {
        json!({
            "ok": true,
            "numbers": numbers,
            "response_metadata": {"next_cursor": cursor}
        })
    }

    fn cursor_of(params: &Params) -> Option<String> {
        params.get("cursor").map(ParamValue::to_query_value)
    }

    #[test]
    fn test_concatenates_pages_in_request_order() {
        let transport = ScriptedTransport::new(vec![
            page(&[1, 2], "c1"),
            page(&[3], "c2"),
            page(&[4, 5], ""),
        ]);
        let params = Params::new().with("limit", 2u32);

        let items = tokio_test::block_on(paginate::<_, NumberList>(
            &transport, "numbers.list", &params, 100,
        ))
        .expect("pagination should succeed");

        assert_eq!(items, vec![1, 2, 3, 4, 5]);

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(cursor_of(&requests[0]), None);
        assert_eq!(cursor_of(&requests[1]), Some("c1".to_string()));
        assert_eq!(cursor_of(&requests[2]), Some("c2".to_string()));
        for request in &requests {
            assert_eq!(request.get("limit"), Some(&ParamValue::Int(2)));
        }
    }

    #[test]
    fn test_missing_metadata_ends_after_one_page() {
        let transport = ScriptedTransport::new(vec![json!({"ok": true, "numbers": [7]})]);

        let items = tokio_test::block_on(paginate::<_, NumberList>(
            &transport,
            "numbers.list",
            &Params::new(),
            100,
        ))
        .expect("pagination should succeed");

        assert_eq!(items, vec![7]);
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn test_empty_cursor_stops_even_with_items() {
        let transport = ScriptedTransport::new(vec![page(&[1, 2, 3], ""), page(&[9], "")]);

        let items = tokio_test::block_on(paginate::<_, NumberList>(
            &transport,
            "numbers.list",
            &Params::new(),
            100,
        ))
        .expect("pagination should succeed");

        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn test_error_on_second_page_aborts() {
        let transport = ScriptedTransport::new(vec![
            page(&[1], "c1"),
            json!({"ok": false, "error": "ratelimited"}),
            page(&[3], ""),
        ]);

        let err = tokio_test::block_on(paginate::<_, NumberList>(
            &transport,
            "numbers.list",
            &Params::new(),
            100,
        ))
        .expect_err("second page failure should abort");

        assert_eq!(err.code(), Some("ratelimited"));
        assert_eq!(transport.requests().len(), 2);
    }

    #[test]
    fn test_page_guard_returns_protocol_error() {
        let transport = ScriptedTransport::new(vec![
            page(&[1], "a"),
            page(&[2], "b"),
            page(&[3], "c"),
        ]);

        let err = tokio_test::block_on(paginate::<_, NumberList>(
            &transport,
            "numbers.list",
            &Params::new(),
            2,
        ))
        .expect_err("guard should trip");

        assert!(matches!(err, ApiError::Protocol { .. }));
        assert_eq!(transport.requests().len(), 2);
    }
}
