use serde::Deserialize;

use crate::i18n::Labels;
use crate::models::{NavTaxpayerResponse, PublicCompany};

pub const DEFAULT_API_URL: &str = "https://cegverzum.hu";

/// NAV lookup failures, kept apart so each renders its own message: a 200
/// whose payload says no taxpayer exists, an HTTP error status, and a request
/// that never got a response at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavLookupError {
    NoTaxpayer { message: Option<String> },
    Status { status: u16, detail: Option<String> },
    Network,
}

impl NavLookupError {
    /// User-facing text. Server-supplied wording wins; the fallbacks come
    /// from the label table.
    pub fn message(&self, labels: &Labels) -> String {
        match self {
            NavLookupError::NoTaxpayer { message } => message
                .clone()
                .unwrap_or_else(|| labels.error_no_taxpayer.to_string()),
            NavLookupError::Status { status, detail } => detail
                .clone()
                .unwrap_or_else(|| format!("{}: {}", labels.error_generic, status)),
            NavLookupError::Network => labels.error_network.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[allow(dead_code)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Official taxpayer lookup. `root8` is the 8-digit taxpayer root id the
    /// classifier extracted.
    pub async fn nav_lookup(&self, root8: &str) -> Result<NavTaxpayerResponse, NavLookupError> {
        let url = format!("{}/api/integrations/nav/lookup/{}", self.base_url, root8);
        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|_| NavLookupError::Network)?;

        let status = res.status();
        if status.is_success() {
            let body: NavTaxpayerResponse =
                res.json().await.map_err(|_| NavLookupError::Network)?;
            nav_domain_result(body)
        } else {
            let detail = res.json::<ErrorBody>().await.ok().and_then(|b| b.detail);
            Err(NavLookupError::Status {
                status: status.as_u16(),
                detail,
            })
        }
    }

    /// Public company search. Best-effort: a failed request, an error status
    /// and an unparseable body all collapse to an empty result list. This
    /// path never surfaces an error of its own.
    pub async fn company_search(&self, q: &str) -> Vec<PublicCompany> {
        let url = format!("{}/api/companies/public", self.base_url);
        let res = match self.http.get(&url).query(&[("q", q)]).send().await {
            Ok(res) => res,
            Err(_) => return Vec::new(),
        };
        if !res.status().is_success() {
            return Vec::new();
        }
        res.json().await.unwrap_or_default()
    }
}

/// A 200 from the lookup endpoint still carries a domain-level `success`
/// flag; false means the id resolved to no taxpayer.
fn nav_domain_result(body: NavTaxpayerResponse) -> Result<NavTaxpayerResponse, NavLookupError> {
    if body.success {
        Ok(body)
    } else {
        Err(NavLookupError::NoTaxpayer {
            message: body.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Lang;

    fn nav_body(json: &str) -> NavTaxpayerResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_success_false_becomes_no_taxpayer() {
        let result = nav_domain_result(nav_body(r#"{"success": false, "message": "nincs adózó"}"#));
        assert_eq!(
            result.unwrap_err(),
            NavLookupError::NoTaxpayer {
                message: Some("nincs adózó".to_string())
            }
        );
    }

    #[test]
    fn test_success_true_passes_through() {
        let result =
            nav_domain_result(nav_body(r#"{"success": true, "taxpayerName": "TESZT KFT"}"#));
        assert_eq!(result.unwrap().taxpayer_name.as_deref(), Some("TESZT KFT"));
    }

    #[test]
    fn test_no_taxpayer_message_prefers_payload() {
        let labels = Lang::En.labels();
        let err = NavLookupError::NoTaxpayer {
            message: Some("custom".to_string()),
        };
        assert_eq!(err.message(labels), "custom");

        let err = NavLookupError::NoTaxpayer { message: None };
        assert_eq!(err.message(labels), "No taxpayer found for this tax number.");
    }

    #[test]
    fn test_status_message_prefers_detail() {
        let labels = Lang::En.labels();
        let err = NavLookupError::Status {
            status: 503,
            detail: Some("NAV API nincs konfigurálva".to_string()),
        };
        assert_eq!(err.message(labels), "NAV API nincs konfigurálva");

        let err = NavLookupError::Status {
            status: 502,
            detail: None,
        };
        assert_eq!(err.message(labels), "An error occurred: 502");
    }

    #[test]
    fn test_three_failure_modes_render_distinct_text() {
        let labels = Lang::En.labels();
        let domain = NavLookupError::NoTaxpayer { message: None }.message(labels);
        let http = NavLookupError::Status {
            status: 500,
            detail: None,
        }
        .message(labels);
        let transport = NavLookupError::Network.message(labels);
        assert_ne!(domain, http);
        assert_ne!(http, transport);
        assert_ne!(domain, transport);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
