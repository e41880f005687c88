#![allow(non_snake_case)]

mod catalog;
mod components;
mod games;
mod hooks;
mod pages;
mod route;

use capy_api::session::{Connection, Pairing};
use dioxus::prelude::*;
use route::Route;

// Configuration; env-style overrides with deployed-testnet fallbacks.
pub const CONTRACT_ADDRESS: &str = match option_env!("CAPY_CONTRACT_ADDRESS") {
    Some(address) => address,
    None => capy_api::consts::DEFAULT_CONTRACT_ADDRESS,
};
pub const NODE_URL: &str = match option_env!("CAPY_NODE_URL") {
    Some(url) => url,
    None => capy_api::consts::DEFAULT_NODE_URL,
};

fn main() {
    #[cfg(feature = "web")]
    {
        tracing_wasm::set_as_global_default();
        dioxus::launch(App);
    }

    #[cfg(feature = "desktop")]
    {
        dioxus::launch(App);
    }
}

#[component]
fn App() -> Element {
    // Global state providers
    use_context_provider(|| Signal::new(Session::default()));
    use_context_provider(|| Signal::new(hooks::InvitationsState::default()));
    use_context_provider(|| Signal::new(hooks::PetsState::default()));
    use_context_provider(|| Signal::new(hooks::InventoryState::default()));

    // Session coroutine: handles connection, invitations, and pet care.
    hooks::use_session_service();

    rsx! {
        Router::<Route> {}
    }
}

/// Process-wide session state. The connection and pairing machines are the
/// single source of truth for every derived flag the screens read.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub connection: Connection,
    pub pairing: Pairing,
    /// True while any session action is in flight; screens disable
    /// duplicate submissions off this flag.
    pub loading: bool,
    /// The most recent action failure, overwritten by each new one.
    pub error: Option<String>,
}

impl Session {
    pub fn connected(&self) -> bool {
        self.connection.is_connected()
    }

    pub fn account(&self) -> Option<&capy_api::types::WalletAccount> {
        self.connection.account()
    }
}
