use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use shared::session::SessionSnapshot;

use crate::billing::BillingSession;
use crate::catalog::{self, Catalog};
use crate::core::Config;
use crate::session::SessionStore;
use crate::summary::BillSummary;

/// Page the user is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Loading,
    RestaurantSelection,
    Calculator,
    Summary,
}

/// Calculator application state
///
/// Owns the catalog, the billing session and the snapshot store, and moves
/// between stages:
///
/// ```text
/// Loading ──start──▶ RestaurantSelection ──choose_restaurant──▶ Calculator
///                          ▲                                   │    ▲
///                          └──── back_to_restaurants/reset ────┤    │
///                                                 show_summary ▼    │ back_to_calculator
///                                                            Summary
/// ```
///
/// A failed transition leaves the stage unchanged.
#[derive(Debug)]
pub struct Calculator {
    config: Config,
    catalog: Catalog,
    session: BillingSession,
    store: SessionStore,
    stage: Stage,
}

impl Calculator {
    pub fn new(config: Config) -> Self {
        let store = SessionStore::new(config.session_file.clone());
        Self {
            config,
            catalog: Catalog::default(),
            session: BillingSession::new(),
            store,
            stage: Stage::Loading,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session(&self) -> &BillingSession {
        &self.session
    }

    /// Session being edited; only reachable on the calculator page
    pub fn session_mut(&mut self) -> AppResult<&mut BillingSession> {
        self.require(Stage::Calculator)?;
        Ok(&mut self.session)
    }

    /// Load the catalog and show the restaurant list
    ///
    /// Stays in `Loading` when no restaurant could be loaded.
    pub async fn start(&mut self) -> AppResult<()> {
        self.require(Stage::Loading)?;

        match catalog::load_catalog(&self.config.config_dir, &self.config.restaurant_files).await
        {
            Ok(catalog) => {
                self.catalog = catalog;
                self.switch_to(Stage::RestaurantSelection);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load restaurants");
                Err(e)
            }
        }
    }

    /// Pick a restaurant and start a fresh table
    pub fn choose_restaurant(&mut self, restaurant_id: &str) -> AppResult<()> {
        self.require(Stage::RestaurantSelection)?;

        let restaurant = self
            .catalog
            .find(restaurant_id)
            .cloned()
            .ok_or_else(|| AppError::restaurant_not_found(restaurant_id))?;

        self.session.select_restaurant(restaurant);
        self.switch_to(Stage::Calculator);
        Ok(())
    }

    /// Build the summary and show it
    ///
    /// Without any plate selected this fails with `NoPlatesSelected` and the
    /// calculator page stays open.
    pub fn show_summary(&mut self) -> AppResult<BillSummary> {
        self.require(Stage::Calculator)?;

        let summary = BillSummary::build(&self.session)?;
        self.switch_to(Stage::Summary);
        Ok(summary)
    }

    pub fn back_to_calculator(&mut self) -> AppResult<()> {
        self.require(Stage::Summary)?;
        self.switch_to(Stage::Calculator);
        Ok(())
    }

    pub fn back_to_restaurants(&mut self) -> AppResult<()> {
        if self.stage == Stage::Loading {
            return Err(AppError::invalid_stage("Restaurants are not loaded yet"));
        }
        self.switch_to(Stage::RestaurantSelection);
        Ok(())
    }

    /// Clear the saved session and the table, back to the restaurant list
    ///
    /// When the stored session cannot be removed nothing changes.
    pub async fn reset_all(&mut self) -> AppResult<()> {
        if self.stage == Stage::Loading {
            return Err(AppError::invalid_stage("Restaurants are not loaded yet"));
        }
        self.store.clear().await?;
        self.session.reset();
        self.switch_to(Stage::RestaurantSelection);
        Ok(())
    }

    /// Persist the current table
    pub async fn save_session(&self) -> AppResult<SessionSnapshot> {
        let snapshot = self.session.snapshot()?;
        self.store.save(&snapshot).await?;
        Ok(snapshot)
    }

    /// Resume a saved table, if one is stored and its restaurant still exists
    ///
    /// Returns whether a session was resumed.
    pub async fn resume_session(&mut self) -> AppResult<bool> {
        self.require(Stage::RestaurantSelection)?;

        let Some(snapshot) = self.store.load().await else {
            return Ok(false);
        };
        match BillingSession::restore(&snapshot, &self.catalog) {
            Ok(session) => {
                self.session = session;
                self.switch_to(Stage::Calculator);
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Saved session cannot be resumed");
                Ok(false)
            }
        }
    }

    fn require(&self, expected: Stage) -> AppResult<()> {
        if self.stage != expected {
            return Err(AppError::invalid_stage(format!(
                "expected stage {:?}, currently {:?}",
                expected, self.stage
            ))
            .with_detail("stage", format!("{:?}", self.stage)));
        }
        Ok(())
    }

    fn switch_to(&mut self, stage: Stage) {
        tracing::debug!(from = ?self.stage, to = ?stage, "Stage change");
        self.stage = stage;
    }
}
