use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};

use crate::{traits::OrderStore, SqliteDatabase};

/// Creates a fresh database at `url`, runs the migrations, and hands back a connected store. Call once per test
/// with a [`random_db_path`] url.
pub async fn prepare_test_env(url: &str) -> SqliteDatabase {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    debug!("🚀️ Logging initialised");
    create_database(url).await;
    let db = SqliteDatabase::new_with_url(url, 5).await.expect("Error creating connection to database");
    db.run_migrations().await.expect("Error running DB migrations");
    info!("🚀️ Migrations complete");
    db
}

pub fn random_db_path() -> String {
    format!("sqlite://{}/cpg_test_orders_{}.sqlite3", std::env::temp_dir().display(), rand::random::<u64>())
}

/// Closes the store and deletes the backing database file. The inverse of [`prepare_test_env`].
pub async fn tear_down(db: SqliteDatabase) {
    let url = db.url().to_string();
    if let Err(e) = db.close().await {
        error!("🚀️ Failed to close database: {e}");
    }
    Sqlite::drop_database(&url).await.expect("Error dropping database");
}

pub async fn create_database(url: &str) {
    if let Err(e) = Sqlite::drop_database(url).await {
        warn!("Error dropping database {url}: {e:?}");
    }
    Sqlite::create_database(url).await.expect("Error creating database");
    info!("Created Sqlite database {url}");
}
