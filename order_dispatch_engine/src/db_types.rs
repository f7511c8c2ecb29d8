use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use log::error;
use odg_common::Money;
use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

//--------------------------------------       OrderId       ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct OrderId(pub i64);

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl OrderId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

//--------------------------------------      OrderType      ---------------------------------------------------------
/// The declared type of an order. The vocabulary is open: anything other than the three known tokens is carried
/// verbatim in [`OrderType::Other`] and resolves to the `unknown_type` terminal status.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderType {
    A,
    B,
    C,
    Other(String),
}

impl Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderType::A => write!(f, "A"),
            OrderType::B => write!(f, "B"),
            OrderType::C => write!(f, "C"),
            OrderType::Other(t) => write!(f, "{t}"),
        }
    }
}

impl From<String> for OrderType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "A" => Self::A,
            "B" => Self::B,
            "C" => Self::C,
            _ => Self::Other(value),
        }
    }
}

impl FromStr for OrderType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

//--------------------------------------     OrderStatus     ---------------------------------------------------------
/// The processing status of an order. Every dispatch pass overwrites the status exactly once with one of the
/// terminal values; `New` is only ever the starting state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStatus {
    /// The order is newly created and has not been through a dispatch pass.
    New,
    /// A type A order whose CSV row was written successfully.
    Exported,
    /// A type A order whose CSV row could not be written.
    ExportFailed,
    /// A type B order that is waiting on more data, or was explicitly flagged to hold.
    Pending,
    /// A type B order that passed validation.
    Processed,
    /// A type B order that failed validation.
    Error,
    /// The decision service rejected a type B order (it answered, but not with success).
    ApiError,
    /// The decision service could not be reached for a type B order.
    ApiFailure,
    /// A type C order with its completion flag set.
    Completed,
    /// A type C order still in progress.
    InProgress,
    /// The order's type is not one the engine knows how to handle.
    UnknownType,
    /// The store failed to persist the computed outcome. Never written back, since the write is what failed.
    DbError,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::New => write!(f, "new"),
            OrderStatus::Exported => write!(f, "exported"),
            OrderStatus::ExportFailed => write!(f, "export_failed"),
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Processed => write!(f, "processed"),
            OrderStatus::Error => write!(f, "error"),
            OrderStatus::ApiError => write!(f, "api_error"),
            OrderStatus::ApiFailure => write!(f, "api_failure"),
            OrderStatus::Completed => write!(f, "completed"),
            OrderStatus::InProgress => write!(f, "in_progress"),
            OrderStatus::UnknownType => write!(f, "unknown_type"),
            OrderStatus::DbError => write!(f, "db_error"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid conversion: {0}")]
pub struct ConversionError(String);

impl FromStr for OrderStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "exported" => Ok(Self::Exported),
            "export_failed" => Ok(Self::ExportFailed),
            "pending" => Ok(Self::Pending),
            "processed" => Ok(Self::Processed),
            "error" => Ok(Self::Error),
            "api_error" => Ok(Self::ApiError),
            "api_failure" => Ok(Self::ApiFailure),
            "completed" => Ok(Self::Completed),
            "in_progress" => Ok(Self::InProgress),
            "unknown_type" => Ok(Self::UnknownType),
            "db_error" => Ok(Self::DbError),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid order status: {value}. But this conversion cannot fail. Defaulting to new");
            OrderStatus::New
        })
    }
}

//--------------------------------------      Priority       ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

impl FromStr for Priority {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            s => Err(ConversionError(format!("Invalid priority: {s}"))),
        }
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid priority: {value}. But this conversion cannot fail. Defaulting to medium");
            Priority::Medium
        })
    }
}

//--------------------------------------        Order        ---------------------------------------------------------
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub user_id: String,
    pub order_type: OrderType,
    pub amount: Money,
    pub flag: bool,
    pub status: OrderStatus,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------       NewOrder      ---------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// The user the order belongs to
    pub user_id: String,
    /// The declared type, which selects the rule branch during dispatch
    pub order_type: OrderType,
    /// The order amount
    pub amount: Money,
    /// A per-type boolean input to the rules (hold flag for type B, completion flag for type C)
    pub flag: bool,
    /// The starting priority. Dispatch only rewrites this on branches that say so.
    pub priority: Priority,
}

impl NewOrder {
    pub fn new(user_id: impl Into<String>, order_type: OrderType, amount: Money) -> Self {
        Self { user_id: user_id.into(), order_type, amount, flag: false, priority: Priority::Medium }
    }

    pub fn with_flag(mut self, flag: bool) -> Self {
        self.flag = flag;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

//--------------------------------------       Decision      ---------------------------------------------------------
/// The answer the external decision service gives for a single type B order. Ephemeral: consumed by the rule branch
/// that requested it and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// `"success"` or any rejection token the service chooses to answer with (the vocabulary is open)
    pub status: String,
    /// An opaque numeric payload. Only its magnitude matters to the rules.
    pub payload: i64,
}

pub const DECISION_SUCCESS: &str = "success";

impl Decision {
    pub fn new(status: impl Into<String>, payload: i64) -> Self {
        Self { status: status.into(), payload }
    }

    pub fn success(payload: i64) -> Self {
        Self::new(DECISION_SUCCESS, payload)
    }

    pub fn is_success(&self) -> bool {
        self.status == DECISION_SUCCESS
    }
}
