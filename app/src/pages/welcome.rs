use dioxus::prelude::*;

use crate::hooks::SessionAction;
use crate::route::Route;
use crate::Session;

#[component]
pub fn Welcome() -> Element {
    let session = use_context::<Signal<Session>>();
    let service = use_coroutine_handle::<SessionAction>();
    let nav = use_navigator();

    // Route on session state: paired users land on the dashboard,
    // connected-but-unpaired users on the invitation screen.
    use_effect(move || {
        let session = session.read();
        if session.connected() {
            if session.pairing.is_paired() {
                nav.push(Route::Dashboard {});
            } else {
                nav.push(Route::Invite {});
            }
        }
    });

    let session_read = session.read();
    let busy = session_read.loading || session_read.connection.is_connecting();
    let error = session_read
        .error
        .clone()
        .or_else(|| session_read.connection.error().map(String::from));
    drop(session_read);

    rsx! {
        div { class: "min-h-screen flex flex-col items-center justify-center p-8",
            div { class: "text-center max-w-2xl",
                h1 { class: "font-pixel text-6xl md:text-8xl text-foreground mb-8 tracking-wider",
                    "CAPY"
                }

                // Cat sprites
                div { class: "flex justify-center items-center gap-8 mb-8 text-6xl",
                    span { "\u{1F431}" }
                    span { "\u{1F408}" }
                    span { "\u{1F63B}" }
                }

                p { class: "font-nunito text-xl md:text-2xl text-foreground mb-12 leading-relaxed",
                    "Adopt a pixel pet with your favorite person"
                }

                button {
                    class: "retro-button bg-primary text-primary-foreground hover:bg-primary/90 text-lg px-12 py-4 disabled:opacity-50",
                    disabled: busy,
                    onclick: move |_| service.send(SessionAction::Connect),
                    if busy { "Connecting..." } else { "Connect Aptos Wallet" }
                }

                if let Some(error) = error {
                    div { class: "mt-6 text-red-500 text-sm bg-red-500/10 border border-red-500/20 rounded p-3",
                        "{error}"
                    }
                }

                div { class: "mt-16 text-center",
                    div { class: "font-pixel text-xs text-muted-foreground",
                        "\u{2605} POWERED BY BLOCKCHAIN \u{2605}"
                    }
                }
            }
        }
    }
}
