//! Settings documents, one per configuration area.
//!
//! The `settings` collection holds one document per area, keyed by a
//! `type` field. Secrets are stored in the database by choice of the
//! store operator; admin read endpoints mask them before responding.

use serde::{Deserialize, Serialize};

/// SMTP delivery settings, `type: "smtp"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpSettings {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
}

impl SmtpSettings {
    /// Copy with the password replaced by a placeholder for admin reads.
    #[must_use]
    pub fn masked(&self) -> Self {
        Self {
            password: mask_secret(&self.password),
            ..self.clone()
        }
    }
}

/// Payment-gateway settings, `type: "payment"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RazorpaySettings {
    pub enabled: bool,
    pub key_id: String,
    pub key_secret: String,
}

impl RazorpaySettings {
    #[must_use]
    pub fn masked(&self) -> Self {
        Self {
            key_secret: mask_secret(&self.key_secret),
            ..self.clone()
        }
    }
}

/// WhatsApp contact settings, `type: "whatsapp"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatsAppSettings {
    pub number: String,
    #[serde(default)]
    pub default_message: String,
}

/// The public site-settings view assembled for the storefront.
#[derive(Debug, Clone, Serialize)]
pub struct SiteSettings {
    pub whatsapp_number: String,
    pub whatsapp_message: String,
    pub instagram_url: String,
    pub razorpay_enabled: bool,
}

/// Keep the last four characters so the admin can recognize which
/// credential is stored without the endpoint ever returning it whole.
fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return String::new();
    }
    let tail: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masking_keeps_last_four() {
        assert_eq!(mask_secret("rzp_secret_abcdef"), "****cdef");
        assert_eq!(mask_secret(""), "");
        assert_eq!(mask_secret("ab"), "****ab");
    }

    #[test]
    fn masked_smtp_hides_password() {
        let settings = SmtpSettings {
            server: "mail.example".to_string(),
            port: 2525,
            username: "user".to_string(),
            password: "topsecretvalue".to_string(),
            from_email: "noreply@example.com".to_string(),
        };
        let masked = settings.masked();
        assert_eq!(masked.password, "****alue");
        assert_eq!(masked.server, settings.server);
    }
}
