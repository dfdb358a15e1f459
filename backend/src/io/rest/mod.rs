pub mod calendar_apis;
pub mod profile_apis;
pub mod settings_apis;
pub mod summary_apis;
pub mod transaction_apis;

pub use calendar_apis::{get_daily_totals, get_day_detail, select_date};
pub use profile_apis::{get_profile, save_profile};
pub use settings_apis::{get_settings, set_currency, toggle_dark_mode};
pub use summary_apis::get_summary;
pub use transaction_apis::{
    create_transaction, delete_transaction, list_transactions, reset_transactions,
    update_transaction,
};
