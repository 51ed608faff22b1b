use serde::{Deserialize, Serialize};

/// Response from `POST /api/payment/create-checkout`.
///
/// The hosted checkout itself is an opaque third-party redirect; the client
/// only forwards the browser to `checkout_url`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutSessionResponse {
    /// Identifier of the checkout session, echoed back on return.
    #[serde(rename = "sessionId")]
    pub session_id: String,

    /// Hosted payment page to navigate to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,
}

/// Response from `POST /api/payment/verify`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyPaymentResponse {
    /// Whether the backend has confirmed the entitlement.
    #[serde(default)]
    pub paid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_session_uses_backend_field_name() {
        let response: CheckoutSessionResponse =
            serde_json::from_str(r#"{"sessionId":"cs_123"}"#).unwrap();
        assert_eq!(response.session_id, "cs_123");
        assert!(response.checkout_url.is_none());
    }

    #[test]
    fn verify_payment_defaults_to_unpaid() {
        let response: VerifyPaymentResponse = serde_json::from_str("{}").unwrap();
        assert!(!response.paid);
    }
}
