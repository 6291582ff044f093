use renewables_core::{FetchError, Project};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// GETs the projects endpoint through the browser's fetch API.
pub async fn fetch_projects(url: &str) -> Result<Vec<Project>, FetchError> {
    let window =
        web_sys::window().ok_or_else(|| FetchError::Transport("no browser window".into()))?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts).map_err(transport)?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?;
    let response: Response = value.dyn_into().map_err(transport)?;

    if !response.ok() {
        let reason = response.status_text();
        return Err(FetchError::Status {
            code: response.status(),
            reason: if reason.is_empty() {
                "Unknown Status".to_string()
            } else {
                reason
            },
        });
    }

    let body = JsFuture::from(response.json().map_err(transport)?)
        .await
        .map_err(|value| FetchError::Malformed(describe(&value)))?;

    serde_wasm_bindgen::from_value::<Vec<Project>>(body)
        .map_err(|e| FetchError::Malformed(e.to_string()))
}

fn transport(value: JsValue) -> FetchError {
    FetchError::Transport(describe(&value))
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
