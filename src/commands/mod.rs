pub mod categories;
pub mod check;
pub mod context;
pub mod init;
pub mod thresholds;

pub use categories::{format_categories_text, run_categories, run_categories_impl};
pub use check::{run_check, run_check_impl};
pub use init::{generate_thresholds_template, run_init, run_init_impl};
pub use thresholds::{format_thresholds_text, run_thresholds, run_thresholds_impl};
