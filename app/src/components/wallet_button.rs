use capy_api::format::shorten_address;
use dioxus::prelude::*;

use crate::hooks::SessionAction;
use crate::Session;

#[component]
pub fn WalletButton() -> Element {
    let session = use_context::<Signal<Session>>();
    let service = use_coroutine_handle::<SessionAction>();

    let session_read = session.read();
    let loading = session_read.loading;

    if let Some(account) = session_read.account() {
        let short_address = shorten_address(&account.address);
        rsx! {
            div { class: "flex items-center space-x-2",
                span { class: "text-sm text-gray-400 font-mono", "{short_address}" }
                button {
                    class: "btn btn-secondary text-sm",
                    disabled: loading,
                    onclick: move |_| service.send(SessionAction::Disconnect),
                    "Disconnect"
                }
            }
        }
    } else {
        rsx! {
            button {
                class: "btn btn-primary",
                disabled: loading || session_read.connection.is_connecting(),
                onclick: move |_| service.send(SessionAction::Connect),
                if session_read.connection.is_connecting() { "Connecting..." } else { "Connect Wallet" }
            }
        }
    }
}
