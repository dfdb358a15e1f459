use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A single income or expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, assigned by the store on insert. Zero means
    /// "not yet assigned".
    pub id: i64,
    /// Non-negative magnitude; the sign is implied by `transaction_type`.
    pub amount: f64,
    /// Free-text description (1 to 256 characters).
    pub description: String,
    /// Timestamp with millisecond precision.
    pub date: DateTime<Utc>,
    /// Whether the amount counts toward or against the balance.
    pub transaction_type: TransactionType,
    /// User-facing classification of the transaction.
    pub category: TransactionCategory,
}

impl Transaction {
    /// Net contribution to any sum: `+amount` for income, `-amount` for
    /// expense.
    pub fn signed_amount(&self) -> f64 {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Stable persistence tag, decoupled from the Rust identifier.
    pub fn tag(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// Resolve a persisted tag. There is no safe fallback for an unknown
    /// type tag: a record without a sign convention cannot contribute to
    /// any sum, so the caller must treat `None` as a storage fault.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }
}

/// User-facing classification of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionCategory {
    Salary,
    Subscription,
    DailyExpense,
    Leisure,
    MonthlyExpense,
    Other,
}

impl TransactionCategory {
    /// Every category, in display order.
    pub const ALL: [TransactionCategory; 6] = [
        TransactionCategory::Salary,
        TransactionCategory::Subscription,
        TransactionCategory::DailyExpense,
        TransactionCategory::Leisure,
        TransactionCategory::MonthlyExpense,
        TransactionCategory::Other,
    ];

    /// Stable persistence tag, decoupled from the Rust identifier.
    pub fn tag(&self) -> &'static str {
        match self {
            TransactionCategory::Salary => "salary",
            TransactionCategory::Subscription => "subscription",
            TransactionCategory::DailyExpense => "daily_expense",
            TransactionCategory::Leisure => "leisure",
            TransactionCategory::MonthlyExpense => "monthly_expense",
            TransactionCategory::Other => "other",
        }
    }

    /// Resolve a persisted tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "salary" => Some(TransactionCategory::Salary),
            "subscription" => Some(TransactionCategory::Subscription),
            "daily_expense" => Some(TransactionCategory::DailyExpense),
            "leisure" => Some(TransactionCategory::Leisure),
            "monthly_expense" => Some(TransactionCategory::MonthlyExpense),
            "other" => Some(TransactionCategory::Other),
            _ => None,
        }
    }

    /// Resolve a persisted tag, mapping anything unrecognized (for example
    /// after a schema change) to `Other`.
    pub fn from_tag_or_other(tag: &str) -> Self {
        Self::from_tag(tag).unwrap_or(TransactionCategory::Other)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TransactionCategory::Salary => "Salary",
            TransactionCategory::Subscription => "Subscription",
            TransactionCategory::DailyExpense => "Daily expense",
            TransactionCategory::Leisure => "Leisure",
            TransactionCategory::MonthlyExpense => "Monthly expenses",
            TransactionCategory::Other => "Other",
        }
    }
}

impl fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Currency used for rendering amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Euro,
    Dollar,
    Yen,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Euro, Currency::Dollar, Currency::Yen];

    /// Stable persistence tag, decoupled from the Rust identifier.
    pub fn tag(&self) -> &'static str {
        match self {
            Currency::Euro => "euro",
            Currency::Dollar => "dollar",
            Currency::Yen => "yen",
        }
    }

    /// Resolve a persisted tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "euro" => Some(Currency::Euro),
            "dollar" => Some(Currency::Dollar),
            "yen" => Some(Currency::Yen),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Currency::Euro => "Euro",
            Currency::Dollar => "Dollar",
            Currency::Yen => "Yen",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Euro => "€",
            Currency::Dollar => "$",
            Currency::Yen => "¥",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Euro
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Employment status shown on the profile screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    Student,
    Retired,
}

impl EmploymentStatus {
    /// Stable persistence tag, decoupled from the Rust identifier.
    pub fn tag(&self) -> &'static str {
        match self {
            EmploymentStatus::Employed => "employed",
            EmploymentStatus::SelfEmployed => "self_employed",
            EmploymentStatus::Student => "student",
            EmploymentStatus::Retired => "retired",
        }
    }

    /// Resolve a persisted tag. Unknown tags resolve to `None` at the call
    /// site (the profile simply has no status).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "employed" => Some(EmploymentStatus::Employed),
            "self_employed" => Some(EmploymentStatus::SelfEmployed),
            "student" => Some(EmploymentStatus::Student),
            "retired" => Some(EmploymentStatus::Retired),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EmploymentStatus::Employed => "Employed",
            EmploymentStatus::SelfEmployed => "Self-employed",
            EmploymentStatus::Student => "Student",
            EmploymentStatus::Retired => "Retired",
        }
    }
}

/// User profile. One per installation, saved wholesale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub employment_status: Option<EmploymentStatus>,
    /// Reference to a profile photo (a path or URI); the image itself is
    /// never stored here.
    pub photo: Option<String>,
}

/// Application settings. One per installation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    pub currency: Currency,
    pub dark_mode: bool,
}

/// Request body for creating a transaction (and for replacing one via the
/// update path).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    /// Non-negative magnitude; the sign is implied by `transaction_type`.
    pub amount: f64,
    /// Description of the transaction (1 to 256 characters).
    pub description: String,
    pub transaction_type: TransactionType,
    pub category: TransactionCategory,
    /// Optional timestamp override; the current time is used when absent.
    pub date: Option<DateTime<Utc>>,
}

/// Monthly dashboard summary: net balance plus per-category expense totals
/// for the current calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub balance: f64,
    pub category_totals: Vec<CategoryTotal>,
}

/// Expense total for one category over the current month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: TransactionCategory,
    pub total: f64,
}

/// Signed per-day totals for the calendar view. Days without transactions
/// are absent from the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotalsResponse {
    pub totals: HashMap<NaiveDate, f64>,
}

/// Detail view for a single calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayDetail {
    pub date: NaiveDate,
    /// Signed sum for the date; `0.0` when the date has no transactions.
    pub balance: f64,
    pub transactions: Vec<Transaction>,
}

/// Request body for selecting a calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectDateRequest {
    pub date: NaiveDate,
}
