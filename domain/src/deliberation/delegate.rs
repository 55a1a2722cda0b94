//! Wire types for external agent delegation

use super::request::DeliberationContext;
use serde::{Deserialize, Serialize};

/// Request body sent to an external agent service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAgentRequest {
    pub prompt: String,
    pub context: DeliberationContext,
    pub request_id: String,
}

/// Response body returned by an external agent service
///
/// `proposal` is kept as raw JSON; it is untrusted and goes through the
/// same response validation as locally generated output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAgentResponse {
    pub success: bool,
    #[serde(default)]
    pub proposal: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub payment_ref: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case() {
        let req = ExternalAgentRequest {
            prompt: "swap".into(),
            context: DeliberationContext::new("0xabc"),
            request_id: "r-1".into(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["requestId"], "r-1");
        assert_eq!(value["context"]["userAddress"], "0xabc");
    }

    #[test]
    fn test_response_optional_fields() {
        let resp: ExternalAgentResponse = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.proposal.is_none());
        assert!(resp.payment_ref.is_none());

        let resp: ExternalAgentResponse = serde_json::from_str(
            r#"{"success":true,"proposal":{"type":"trade"},"paymentRef":"pay_1"}"#,
        )
        .unwrap();
        assert_eq!(resp.payment_ref.as_deref(), Some("pay_1"));
        assert_eq!(resp.proposal.unwrap()["type"], "trade");
    }
}
