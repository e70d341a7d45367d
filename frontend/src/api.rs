//! HTTP client for the backend API.

use gloo_net::http::Request;
use runhub_core::api::{self, ApiRequest};
use runhub_core::ApiError;

/// Origin of the API; empty means same origin as the console.
const API_BASE: &str = match option_env!("RUNHUB_API_BASE") {
    Some(base) => base,
    None => "",
};

pub async fn call<R: ApiRequest>(token: &str, req: &R) -> Result<R::Response, ApiError> {
    let url = format!("{}{}", API_BASE, req.path());
    log::debug!("POST {}", url);

    let resp = Request::post(&url)
        .header("Authorization", &api::bearer(token))
        .json(req)
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let result = api::decode::<R>(status, &text);
    if let Err(e) = &result {
        log::warn!("POST {} failed: {}", url, e);
    }
    result
}
