//! HTTP dispatch and result normalization.
//!
//! One network call per [`request`] invocation, no retries. The backend
//! answers `200` with an envelope of the shape
//! `{ "success": bool, "data": ..., "msg": ... }`; anything that breaks
//! that shape (including non-2xx statuses and socket faults) is normalized
//! into [`BridgeError::Transport`].

use crate::config::{FaultMessageSource, ResponseOptions};
use crate::error::{BridgeError, BridgeResult};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};

/// Fallback when neither the body nor the configuration yields a message.
const FALLBACK_MESSAGE: &str = "request failed without a server message";

/// Normalized success reply.
#[derive(Debug, Clone)]
pub struct ApiSuccess {
    /// Full parsed response body.
    pub body: Value,
    /// Server message extracted from the configured message field.
    pub message: Option<String>,
}

impl ApiSuccess {
    /// The `data` member of the body, or `Null` when absent.
    #[must_use]
    pub fn data(&self) -> &Value {
        self.body.get("data").unwrap_or(&Value::Null)
    }

    /// Consume the reply, keeping only the `data` member.
    #[must_use]
    pub fn into_data(mut self) -> Value {
        match self.body.get_mut("data") {
            Some(data) => data.take(),
            None => Value::Null,
        }
    }

    /// Top-level `id` of the body. Create-style replies report the new
    /// resource id here, outside the `data` member.
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.body.get("id").and_then(Value::as_i64)
    }
}

/// Issue one HTTP call and normalize the outcome.
///
/// Outcomes:
/// 1. 2xx with a truthy `success` flag: `Ok(ApiSuccess)`.
/// 2. 2xx with the flag false or absent: [`BridgeError::Application`]
///    carrying the body's message field (fallback text when absent) and the
///    full body.
/// 3. Non-2xx status, unparseable body, or transport fault:
///    [`BridgeError::Transport`] with the message resolved per
///    [`FaultMessageSource`] and the best available diagnostic payload.
pub async fn request(
    http: &reqwest::Client,
    method: Method,
    url: &str,
    body: Option<&Value>,
    options: &ResponseOptions,
) -> BridgeResult<ApiSuccess> {
    let endpoint = url.split('?').next().unwrap_or(url);
    debug!("{method} {endpoint}");

    let mut builder = http.request(method, url);
    if let Some(body) = body {
        builder = builder.json(body);
    }

    let response = match builder.send().await {
        Ok(response) => response,
        Err(fault) => {
            warn!("transport fault for {endpoint}: {fault}");
            let message = match options.fault_message {
                FaultMessageSource::ServerField => FALLBACK_MESSAGE.to_string(),
                FaultMessageSource::TransportText => fault.to_string(),
            };
            return Err(BridgeError::Transport {
                message,
                diagnostic: Value::String(fault.to_string()),
            });
        }
    };

    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let payload: Option<Value> = serde_json::from_str(&text).ok();

    if !status.is_success() {
        warn!("{endpoint} answered {status}");
        let message = match options.fault_message {
            FaultMessageSource::ServerField => payload
                .as_ref()
                .and_then(|body| body.get(&options.message_field))
                .and_then(Value::as_str)
                .map_or_else(|| FALLBACK_MESSAGE.to_string(), str::to_owned),
            FaultMessageSource::TransportText => format!("HTTP {status}"),
        };
        return Err(BridgeError::Transport {
            message,
            diagnostic: payload.unwrap_or(Value::String(text)),
        });
    }

    let Some(payload) = payload else {
        return Err(BridgeError::Transport {
            message: match options.fault_message {
                FaultMessageSource::ServerField => FALLBACK_MESSAGE.to_string(),
                FaultMessageSource::TransportText => "response body was not valid JSON".to_string(),
            },
            diagnostic: Value::String(text),
        });
    };

    if is_truthy(payload.get("success")) {
        let message = payload
            .get(&options.message_field)
            .and_then(Value::as_str)
            .map(str::to_owned);
        return Ok(ApiSuccess {
            body: payload,
            message,
        });
    }

    let message = payload
        .get(&options.message_field)
        .and_then(Value::as_str)
        .map_or_else(|| FALLBACK_MESSAGE.to_string(), str::to_owned);
    Err(BridgeError::Application {
        message,
        payload,
    })
}

/// Loose truthiness matching the backend's flag semantics: `false`, `0`,
/// `""`, `null`, and absence all count as failure.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}
