//! Business logic services.

pub mod assets;
pub mod auth;
pub mod email;
pub mod razorpay;
pub mod settings;

pub use assets::AssetStore;
pub use auth::AuthService;
pub use email::Mailer;
pub use razorpay::RazorpayClient;
pub use settings::SettingsService;
