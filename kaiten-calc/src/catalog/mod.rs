//! Restaurant catalog
//!
//! One JSON document per restaurant, loaded from a list of file names. A file
//! that cannot be read, parsed or validated is logged and skipped; loading
//! only fails when nothing at all could be loaded.

use std::path::{Path, PathBuf};

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::Restaurant;

/// Restaurants available for selection, in load order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    restaurants: Vec<Restaurant>,
}

impl Catalog {
    /// Build a catalog, keeping the first restaurant for each id
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        let mut catalog = Self::default();
        for restaurant in restaurants {
            catalog.insert(restaurant);
        }
        catalog
    }

    fn insert(&mut self, restaurant: Restaurant) {
        if self.find(&restaurant.id).is_some() {
            tracing::warn!(restaurant = %restaurant.id, "Duplicate restaurant id, keeping the first");
            return;
        }
        self.restaurants.push(restaurant);
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn find(&self, id: &str) -> Option<&Restaurant> {
        self.restaurants.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }
}

/// Parse and validate one restaurant document
pub fn parse_restaurant(json: &str) -> AppResult<Restaurant> {
    let restaurant: Restaurant = serde_json::from_str(json)?;
    restaurant.validate()?;
    Ok(restaurant)
}

/// Read one restaurant document from disk
pub async fn load_restaurant(path: impl AsRef<Path>) -> AppResult<Restaurant> {
    let path = path.as_ref();
    let file = path.display().to_string();

    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::catalog_load(&file, e.to_string()))?;

    parse_restaurant(&json).map_err(|e| match e.code {
        ErrorCode::InvalidRestaurant => e.with_detail("file", file.as_str()),
        _ => AppError::catalog_load(&file, e.message),
    })
}

/// Load every listed file from `dir`
///
/// Per-file failures are logged and skipped. Returns `CatalogEmpty` when no
/// restaurant could be loaded.
pub async fn load_catalog(dir: impl AsRef<Path>, files: &[String]) -> AppResult<Catalog> {
    let dir = dir.as_ref();
    let mut catalog = Catalog::default();

    for file in files {
        let path: PathBuf = dir.join(file);
        match load_restaurant(&path).await {
            Ok(restaurant) => {
                tracing::debug!(file = %file, restaurant = %restaurant.id, "Restaurant loaded");
                catalog.insert(restaurant);
            }
            Err(e) if e.code == ErrorCode::InvalidRestaurant => {
                tracing::warn!(file = %file, error = %e, "Skipping invalid restaurant");
            }
            Err(e) => {
                tracing::error!(file = %file, error = %e, "Failed to load restaurant");
            }
        }
    }

    if catalog.is_empty() {
        return Err(AppError::new(ErrorCode::CatalogEmpty)
            .with_detail("dir", dir.display().to_string())
            .with_detail("files", files.len()));
    }

    tracing::info!(count = catalog.len(), "Restaurant catalog loaded");
    Ok(catalog)
}
