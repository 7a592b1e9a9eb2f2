//! Shared application state.

use std::sync::Arc;

use mongodb::Database;

use crate::config::AppConfig;
use crate::services::{AssetStore, AuthService, Mailer, RazorpayClient, SettingsService};

/// Shared state handed to every handler. Cloning is cheap; everything
/// lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    db: Database,
    auth: AuthService,
    mailer: Mailer,
    razorpay: RazorpayClient,
    settings: SettingsService,
    assets: AssetStore,
}

impl AppState {
    #[must_use]
    pub fn new(db: Database, config: AppConfig) -> Self {
        let auth = AuthService::new(&config.jwt_secret);
        let razorpay = RazorpayClient::new(config.razorpay.base_url.clone());
        let settings = SettingsService::new(
            db.clone(),
            config.smtp.clone(),
            config.razorpay.clone(),
            config.whatsapp_number.clone(),
            config.instagram_url.clone(),
        );
        let assets = AssetStore::new(config.upload_dir.clone());
        Self {
            inner: Arc::new(AppStateInner {
                db,
                auth,
                mailer: Mailer::new(),
                razorpay,
                settings,
                assets,
            }),
        }
    }

    #[must_use]
    pub fn db(&self) -> &Database {
        &self.inner.db
    }

    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    #[must_use]
    pub fn mailer(&self) -> &Mailer {
        &self.inner.mailer
    }

    #[must_use]
    pub fn razorpay(&self) -> &RazorpayClient {
        &self.inner.razorpay
    }

    #[must_use]
    pub fn settings(&self) -> &SettingsService {
        &self.inner.settings
    }

    #[must_use]
    pub fn assets(&self) -> &AssetStore {
        &self.inner.assets
    }
}
