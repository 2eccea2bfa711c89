//! Lunch Money API model types.

mod asset;
mod budget;
mod crypto;
mod group;
mod plaid_account;
mod recurring;
mod transaction;

pub use asset::*;
pub use budget::*;
pub use crypto::*;
pub use group::*;
pub use plaid_account::*;
pub use recurring::*;
pub use transaction::*;
