#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;
use wardrobe::db::{DbPool, establish_connection_pool, run_migrations};
use wardrobe::repository::DieselRepository;

/// SQLite database living in a temporary directory with every migration applied.
///
/// The directory and the database files inside it are removed on drop.
pub struct TestDb {
    _dir: TempDir,
    path: PathBuf,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("temp path is valid UTF-8");

        let pool = establish_connection_pool(url).expect("failed to create pool");
        run_migrations(&pool).expect("failed to run migrations");

        Self {
            _dir: dir,
            path,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn repository(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}
