mod dispatch_api;
mod errors;

pub use dispatch_api::{DispatchApi, HIGH_PRIORITY_LIMIT, HIGH_VALUE_NOTE_LIMIT, TYPE_B_AMOUNT_LIMIT, TYPE_B_PAYLOAD_LIMIT};
pub use errors::DispatchError;
