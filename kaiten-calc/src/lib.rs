//! Kaiten Calc - conveyor-belt sushi bill splitter
//!
//! # Overview
//!
//! A table picks a restaurant, counts the colored plates each diner took,
//! and gets a bill with service charge and VAT split in proportion to what
//! everyone ate.
//!
//! - **Catalog** (`catalog`): restaurant documents loaded from JSON files
//! - **Billing** (`billing`): participants and plate counts for one table
//! - **Apportion** (`apportion`): tax breakdown and per-participant shares
//! - **Summary** (`summary`): report data for the summary page
//! - **Session** (`session`): snapshot persistence
//!
//! # Layout
//!
//! ```text
//! kaiten-calc/src/
//! ├── core/        # config, application stages
//! ├── money/       # decimal helpers, currency formatting
//! ├── apportion/   # tax breakdown, proportional split
//! ├── billing/     # billing session
//! ├── summary/     # bill summary
//! ├── catalog/     # restaurant loading
//! ├── session/     # snapshot store
//! └── utils/       # logging
//! ```
//!
//! # Example
//!
//! ```no_run
//! use kaiten_calc::{Calculator, Config};
//!
//! # async fn run() -> shared::error::AppResult<()> {
//! let config = Config::from_env();
//! kaiten_calc::utils::init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
//!
//! let mut calc = Calculator::new(config);
//! calc.start().await?;
//! calc.choose_restaurant("katsu_midori")?;
//! calc.session_mut()?.adjust_plate_count("red", 2);
//! let summary = calc.show_summary()?;
//! println!("{}", summary.grand_total);
//! # Ok(())
//! # }
//! ```

pub mod apportion;
pub mod billing;
pub mod catalog;
pub mod core;
pub mod money;
pub mod session;
pub mod summary;
pub mod utils;

pub use apportion::{Bill, ParticipantShare, TaxBreakdown, TaxRates};
pub use billing::{BillingSession, RunningTotals};
pub use catalog::{Catalog, load_catalog};
pub use core::{Calculator, Config, Stage};
pub use session::SessionStore;
pub use summary::{BillSummary, ChargeRow, PlateBreakdown};
