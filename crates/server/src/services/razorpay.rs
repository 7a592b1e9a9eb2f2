//! Razorpay payment-gateway client.
//!
//! Orders are created server side against the gateway's REST API, and the
//! checkout callback is verified with an HMAC-SHA256 signature over
//! `"{gateway_order_id}|{payment_id}"` keyed by the API secret.

use hmac::{Hmac, Mac};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Errors from payment-gateway operations.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Online payments are switched off in settings.
    #[error("payments are disabled")]
    Disabled,

    /// The callback signature did not match.
    #[error("invalid payment signature")]
    InvalidSignature,

    /// The callback referenced a different gateway order.
    #[error("payment does not belong to this order")]
    OrderMismatch,

    /// The gateway returned a non-success response.
    #[error("gateway returned {status}: {body}")]
    Gateway { status: StatusCode, body: String },

    /// The request never reached the gateway.
    #[error("gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Credentials and endpoint for one round of gateway calls, resolved from
/// settings at request time so admin changes apply without a restart.
#[derive(Debug, Clone)]
pub struct GatewayCredentials {
    pub key_id: String,
    pub key_secret: SecretString,
}

/// An order registered with the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    /// Amount in paise.
    pub amount: i64,
    pub currency: String,
}

#[derive(Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
    /// 1 = capture automatically on authorization.
    payment_capture: u8,
}

/// HTTP client for the gateway REST API.
pub struct RazorpayClient {
    http: reqwest::Client,
    base_url: String,
}

impl RazorpayClient {
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Register an order with the gateway.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::Gateway` on a non-success response and
    /// `PaymentError::Transport` if the request fails outright.
    pub async fn create_order(
        &self,
        credentials: &GatewayCredentials,
        amount_paise: i64,
        receipt: &str,
    ) -> Result<GatewayOrder, PaymentError> {
        let response = self
            .http
            .post(format!("{}/v1/orders", self.base_url))
            .basic_auth(
                &credentials.key_id,
                Some(credentials.key_secret.expose_secret()),
            )
            .json(&CreateOrderBody {
                amount: amount_paise,
                currency: "INR",
                receipt,
                payment_capture: 1,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PaymentError::Gateway { status, body });
        }
        let order = response.json::<GatewayOrder>().await?;
        Ok(order)
    }
}

/// Verify the checkout callback signature.
///
/// The signed payload is `"{gateway_order_id}|{payment_id}"`; the signature
/// is hex encoded. Comparison is constant time via the MAC verifier.
///
/// # Errors
///
/// Returns `PaymentError::InvalidSignature` when the signature is not valid
/// hex or does not match.
pub fn verify_payment_signature(
    key_secret: &SecretString,
    gateway_order_id: &str,
    payment_id: &str,
    signature: &str,
) -> Result<(), PaymentError> {
    let mut mac = HmacSha256::new_from_slice(key_secret.expose_secret().as_bytes())
        .map_err(|_| PaymentError::InvalidSignature)?;
    mac.update(format!("{gateway_order_id}|{payment_id}").as_bytes());
    let expected = hex::decode(signature).map_err(|_| PaymentError::InvalidSignature)?;
    mac.verify_slice(&expected)
        .map_err(|_| PaymentError::InvalidSignature)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sign(secret: &str, payload: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn valid_signature_accepted() {
        let secret = SecretString::from("rzp_test_secret");
        let signature = sign("rzp_test_secret", "order_ABC|pay_XYZ");
        assert!(
            verify_payment_signature(&secret, "order_ABC", "pay_XYZ", &signature).is_ok()
        );
    }

    #[test]
    fn wrong_secret_rejected() {
        let secret = SecretString::from("rzp_test_secret");
        let signature = sign("some_other_secret", "order_ABC|pay_XYZ");
        assert!(matches!(
            verify_payment_signature(&secret, "order_ABC", "pay_XYZ", &signature),
            Err(PaymentError::InvalidSignature)
        ));
    }

    #[test]
    fn swapped_ids_rejected() {
        let secret = SecretString::from("rzp_test_secret");
        let signature = sign("rzp_test_secret", "order_ABC|pay_XYZ");
        assert!(matches!(
            verify_payment_signature(&secret, "pay_XYZ", "order_ABC", &signature),
            Err(PaymentError::InvalidSignature)
        ));
    }

    #[test]
    fn non_hex_signature_rejected() {
        let secret = SecretString::from("rzp_test_secret");
        assert!(matches!(
            verify_payment_signature(&secret, "order_ABC", "pay_XYZ", "not-hex!"),
            Err(PaymentError::InvalidSignature)
        ));
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let client = RazorpayClient::new("https://api.razorpay.com/".to_string());
        assert_eq!(client.base_url, "https://api.razorpay.com");
    }
}
