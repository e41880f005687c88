//! Client-side surface of the CAPY contract.
//!
//! Everything here is pure: entity types, entry/view payload builders,
//! response decoding, and the [`client::CapyClient`] adapter, which is
//! generic over a wallet gateway and a ledger reader so binaries can plug
//! in the browser extension, an HTTP node, or test doubles.

pub mod client;
pub mod consts;
pub mod decode;
pub mod error;
pub mod format;
pub mod payload;
pub mod session;
pub mod types;

pub mod prelude {
    pub use crate::client::{CapyClient, LedgerReader, RawAccount, WalletGateway};
    pub use crate::consts;
    pub use crate::decode;
    pub use crate::error::CapyError;
    pub use crate::format::{account_type_color, shorten_address};
    pub use crate::payload::{self, EntryPayload, ViewRequest};
    pub use crate::session::{Connection, Pairing};
    pub use crate::types::*;
}
