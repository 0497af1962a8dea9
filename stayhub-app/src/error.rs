use stayhub_catalog::CatalogError;
use stayhub_checkout::CheckoutError;
use stayhub_core::Route;
use stayhub_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("Sign in required for {0}")]
    SignInRequired(Route),
}
