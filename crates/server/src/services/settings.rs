//! Runtime-editable settings with a short-lived cache.
//!
//! Each configuration area (SMTP, payment gateway, WhatsApp) is stored as
//! one document in the settings collection. Reads go through a moka cache
//! with a short TTL; writes invalidate immediately so admin changes apply
//! on the next request.

use std::time::Duration;

use mongodb::Database;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{RazorpayDefaults, SmtpDefaults};
use crate::db::{RepositoryError, SettingsRepository};
use crate::models::{RazorpaySettings, SiteSettings, SmtpSettings, WhatsAppSettings};

const CACHE_TTL: Duration = Duration::from_secs(30);

const AREA_SMTP: &str = "smtp";
const AREA_PAYMENT: &str = "payment";
const AREA_WHATSAPP: &str = "whatsapp";

/// Cached, fallback-aware access to the settings store.
///
/// When no document has been stored for an area, values fall back to the
/// environment defaults the server booted with.
pub struct SettingsService {
    db: Database,
    cache: moka::future::Cache<String, Option<serde_json::Value>>,
    smtp_defaults: SmtpDefaults,
    razorpay_defaults: RazorpayDefaults,
    whatsapp_default: String,
    instagram_url: String,
}

impl SettingsService {
    #[must_use]
    pub fn new(
        db: Database,
        smtp_defaults: SmtpDefaults,
        razorpay_defaults: RazorpayDefaults,
        whatsapp_default: String,
        instagram_url: String,
    ) -> Self {
        Self {
            db,
            cache: moka::future::Cache::builder()
                .time_to_live(CACHE_TTL)
                .max_capacity(8)
                .build(),
            smtp_defaults,
            razorpay_defaults,
            whatsapp_default,
            instagram_url,
        }
    }

    /// Effective SMTP settings: stored document or environment fallback.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the settings store cannot be read.
    pub async fn smtp(&self) -> Result<SmtpSettings, RepositoryError> {
        if let Some(stored) = self.load::<SmtpSettings>(AREA_SMTP).await? {
            return Ok(stored);
        }
        Ok(SmtpSettings {
            server: self.smtp_defaults.server.clone(),
            port: self.smtp_defaults.port,
            username: self.smtp_defaults.username.clone(),
            password: self.smtp_defaults.password.expose_secret().to_string(),
            from_email: self.smtp_defaults.from_email.clone(),
        })
    }

    /// Effective payment-gateway settings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the settings store cannot be read.
    pub async fn razorpay(&self) -> Result<RazorpaySettings, RepositoryError> {
        if let Some(stored) = self.load::<RazorpaySettings>(AREA_PAYMENT).await? {
            return Ok(stored);
        }
        Ok(RazorpaySettings {
            enabled: self.razorpay_defaults.enabled,
            key_id: self.razorpay_defaults.key_id.clone(),
            key_secret: self
                .razorpay_defaults
                .key_secret
                .expose_secret()
                .to_string(),
        })
    }

    /// The gateway API secret as a redactable value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the settings store cannot be read.
    pub async fn razorpay_secret(&self) -> Result<SecretString, RepositoryError> {
        let settings = self.razorpay().await?;
        Ok(SecretString::from(settings.key_secret))
    }

    /// Effective WhatsApp contact settings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the settings store cannot be read.
    pub async fn whatsapp(&self) -> Result<WhatsAppSettings, RepositoryError> {
        if let Some(stored) = self.load::<WhatsAppSettings>(AREA_WHATSAPP).await? {
            return Ok(stored);
        }
        Ok(WhatsAppSettings {
            number: self.whatsapp_default.clone(),
            default_message: String::new(),
        })
    }

    /// The public site-settings view served to the storefront.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the settings store cannot be read.
    pub async fn site(&self) -> Result<SiteSettings, RepositoryError> {
        let whatsapp = self.whatsapp().await?;
        let razorpay = self.razorpay().await?;
        Ok(SiteSettings {
            whatsapp_number: whatsapp.number,
            whatsapp_message: whatsapp.default_message,
            instagram_url: self.instagram_url.clone(),
            razorpay_enabled: razorpay.enabled,
        })
    }

    /// Store new SMTP settings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the write fails.
    pub async fn set_smtp(&self, settings: &SmtpSettings) -> Result<(), RepositoryError> {
        self.store(AREA_SMTP, settings).await
    }

    /// Store new payment-gateway settings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the write fails.
    pub async fn set_razorpay(&self, settings: &RazorpaySettings) -> Result<(), RepositoryError> {
        self.store(AREA_PAYMENT, settings).await
    }

    /// Store new WhatsApp settings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the write fails.
    pub async fn set_whatsapp(&self, settings: &WhatsAppSettings) -> Result<(), RepositoryError> {
        self.store(AREA_WHATSAPP, settings).await
    }

    async fn load<T: Serialize + DeserializeOwned>(
        &self,
        area: &'static str,
    ) -> Result<Option<T>, RepositoryError> {
        if let Some(cached) = self.cache.get(area).await {
            return match cached {
                Some(value) => serde_json::from_value(value)
                    .map(Some)
                    .map_err(|e| {
                        RepositoryError::DataCorruption(format!("cached settings `{area}`: {e}"))
                    }),
                None => Ok(None),
            };
        }

        let stored: Option<T> = SettingsRepository::new(&self.db).get(area).await?;
        let cached = match &stored {
            Some(value) => Some(serde_json::to_value(value).map_err(|e| {
                RepositoryError::DataCorruption(format!("settings `{area}`: {e}"))
            })?),
            None => None,
        };
        self.cache.insert(area.to_string(), cached).await;
        Ok(stored)
    }

    async fn store<T: Serialize>(
        &self,
        area: &'static str,
        value: &T,
    ) -> Result<(), RepositoryError> {
        SettingsRepository::new(&self.db).put(area, value).await?;
        self.cache.invalidate(area).await;
        Ok(())
    }
}
