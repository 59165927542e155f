pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use crate::database::Store;
use crate::services::Directory;

#[derive(Clone)]
pub struct AppState {
    pub directory: Directory,
    pub jwt_secret: String,
}

impl AppState {
    pub fn new(store: Store, jwt_secret: impl Into<String>) -> Self {
        Self::with_directory(Directory::from_store(store), jwt_secret)
    }

    pub fn with_directory(directory: Directory, jwt_secret: impl Into<String>) -> Self {
        Self {
            directory,
            jwt_secret: jwt_secret.into(),
        }
    }
}
