//! # Firewood Storefront Library
//!
//! The controller for Honest Abe's firewood storefront and its terminal
//! adapter.
//!
//! ## Module Organization
//! ```text
//! firewood_storefront/
//! ├── lib.rs          ◄─── You are here (startup & shutdown)
//! ├── terminal.rs     ◄─── Line-oriented adapter (stdin → commands → JSON)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── shop.rs     ◄─── Cart, dialogs, page chrome (Arc<Mutex>)
//! │   ├── db.rs       ◄─── Database + document output
//! │   ├── config.rs   ◄─── Configuration state
//! │   └── hero.rs     ◄─── Hero carousel ticker task
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── Steppers, promo, checkout, load/unload
//! │   ├── order.rs    ◄─── Order form and submission
//! │   └── page.rs     ◄─── Hero, scroll header, dropdowns
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;
pub mod terminal;

use std::path::PathBuf;
use std::sync::Arc;

use directories::ProjectDirs;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use firewood_core::chrome::HERO_INTERVAL;
use firewood_store::{Database, DbConfig, DocumentStore};
use firewood_sync::{OrderSink, WebhookClient, WebhookConfig};

use error::{ApiError, ErrorCode};
use state::{ConfigState, DbState, HeroTicker, Shop, ShopState};

/// Everything the adapter drives.
pub struct Storefront<S> {
    pub shop: ShopState,
    pub db: DbState,
    pub config: ConfigState,
    pub hero: HeroTicker,
    pub sink: Arc<S>,
}

impl<S: OrderSink> Storefront<S> {
    /// Restores the saved cart and starts the hero ticker.
    pub async fn start(db: DbState, config: ConfigState, sink: S) -> Result<Self, ApiError> {
        let cart = commands::cart::restore_cart(&db).await?;
        Ok(Storefront {
            shop: ShopState::new(Shop::new(cart)),
            db,
            config,
            hero: HeroTicker::spawn(HERO_INTERVAL),
            sink: Arc::new(sink),
        })
    }

    /// Saves the cart, stops the ticker and closes the database.
    pub async fn shutdown(self) -> Result<(), ApiError> {
        let saved = commands::cart::save_cart(&self.shop, &self.db).await;
        self.hero.shutdown();
        self.db.inner().close().await;
        saved
    }
}

/// Runs the storefront until stdin closes or `quit`.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  1. Logging ─────────► tracing-subscriber, stderr, RUST_LOG override    │
/// │  2. Config ──────────► ConfigState::from_env, WebhookConfig::load       │
/// │  3. Database ────────► SQLite file, migrations                          │
/// │  4. Load ────────────► saved cart restored from "firewoodCart"          │
/// │  5. Hero ticker ─────► background task, every 3 seconds                 │
/// │  6. Terminal ────────► read / execute / print loop                      │
/// │  7. Unload ──────────► cart saved, ticker stopped, pool closed          │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), ApiError> {
    init_tracing();
    info!("Starting firewood storefront");

    let config = ConfigState::from_env();
    let webhook = WebhookClient::new(WebhookConfig::load_or_default(None))?;
    if !webhook.config().is_configured() {
        warn!("No webhook URL configured; order submissions will fail");
    }

    let db_path = database_path(&config)?;
    info!(?db_path, output_dir = %config.output_dir.display(), "Paths determined");
    let db = Database::new(DbConfig::new(db_path)).await?;
    let db = DbState::new(db, DocumentStore::new(&config.output_dir));

    let app = Storefront::start(db, config, webhook).await?;
    let result = terminal::run(&app).await;
    app.shutdown().await?;

    info!("Storefront closed");
    result
}

/// Initializes the tracing subscriber. Output goes to stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=firewood_sync=trace` - Trace one crate
/// - Default: `info,firewood=debug,sqlx=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,firewood=debug,sqlx=warn"));

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Determines the database file path.
///
/// `FIREWOOD_DB_PATH` wins; otherwise `storefront.db` in the platform data
/// directory.
fn database_path(config: &ConfigState) -> Result<PathBuf, ApiError> {
    if let Some(path) = &config.db_path {
        return Ok(path.clone());
    }

    let dirs = ProjectDirs::from("com", "honestabes", "firewood").ok_or_else(|| {
        ApiError::new(ErrorCode::ConfigError, "Could not determine app data directory")
    })?;
    Ok(dirs.data_dir().join("storefront.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use firewood_core::submission::SUBMIT_LABEL;
    use firewood_core::OrderSubmission;
    use firewood_sync::{Delivery, DeliveryMode, SyncResult};

    struct AcceptAll;

    impl OrderSink for AcceptAll {
        async fn deliver(&self, _order: &OrderSubmission) -> SyncResult<Delivery> {
            Ok(Delivery {
                status: 200,
                mode: DeliveryMode::Opaque,
            })
        }
    }

    #[test]
    fn test_database_path_override() {
        let config = ConfigState {
            db_path: Some(PathBuf::from("/tmp/firewood/test.db")),
            ..ConfigState::default()
        };
        assert_eq!(database_path(&config).unwrap(), PathBuf::from("/tmp/firewood/test.db"));
    }

    async fn open(dir: &std::path::Path) -> DbState {
        let db = Database::new(DbConfig::new(dir.join("storefront.db"))).await.unwrap();
        DbState::new(db, DocumentStore::new(dir))
    }

    #[tokio::test]
    async fn test_cart_persists_across_sessions() {
        let tmp = tempfile::tempdir().unwrap();

        let app = Storefront::start(open(tmp.path()).await, ConfigState::default(), AcceptAll)
            .await
            .unwrap();
        commands::cart::adjust_quantity(&app.shop, "oak", 2).unwrap();
        commands::cart::adjust_quantity(&app.shop, "hickory", 1).unwrap();
        app.shutdown().await.unwrap();

        let app = Storefront::start(open(tmp.path()).await, ConfigState::default(), AcceptAll)
            .await
            .unwrap();
        let view = commands::cart::get_shop(&app.shop);
        assert_eq!(view.tiles[0].quantity, 2);
        assert_eq!(view.tiles[2].quantity, 1);
        assert_eq!(view.summary.total, "50.23");
        app.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_execute_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let db = DbState::new(
            Database::new(DbConfig::in_memory()).await.unwrap(),
            DocumentStore::new(tmp.path()),
        );
        let app = Storefront::start(db, ConfigState::default(), AcceptAll)
            .await
            .unwrap();

        let reply = app.execute(terminal::parse("add maple 2").unwrap()).await.unwrap();
        let terminal::Reply::View(value) = reply else {
            panic!("expected a view");
        };
        assert_eq!(value["summary"]["total"], "26.98");

        let reply = app.execute(terminal::parse("promo CAMPFIRE10").unwrap()).await.unwrap();
        let terminal::Reply::View(value) = reply else {
            panic!("expected a view");
        };
        assert_eq!(value["notice"], "Promo code applied! $10 discount.");
        assert_eq!(value["cart"]["total"], "16.98");

        assert_eq!(
            app.execute(terminal::Command::Quit).await.unwrap(),
            terminal::Reply::Quit
        );
        app.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_submit_never_shows_submitting() {
        let tmp = tempfile::tempdir().unwrap();
        let db = DbState::new(
            Database::new(DbConfig::in_memory()).await.unwrap(),
            DocumentStore::new(tmp.path()),
        );
        let app = Storefront::start(db, ConfigState::default(), AcceptAll)
            .await
            .unwrap();
        app.execute(terminal::Command::OpenForm).await.unwrap();

        let reply = app.execute(terminal::Command::Submit).await.unwrap();
        assert_eq!(reply, terminal::Reply::Pending);

        let form = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let form = commands::order::get_order_form(&app.shop).unwrap();
                if form.errors.is_some() {
                    break form;
                }
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
        assert_eq!(form.errors.unwrap().messages[0], "Store ID is required");
        assert_eq!(form.submit.label, SUBMIT_LABEL);
        assert!(!form.submit.disabled);
        app.shutdown().await.unwrap();
    }
}
