use capy_api::format::shorten_address;
use dioxus::prelude::*;

use crate::hooks::{use_invitations, SessionAction};
use crate::route::Route;
use crate::Session;

#[component]
pub fn Invite() -> Element {
    let session = use_context::<Signal<Session>>();
    let service = use_coroutine_handle::<SessionAction>();
    let invitations = use_invitations();
    let nav = use_navigator();

    let mut wallet_address = use_signal(String::new);

    use_effect(move || {
        let session = session.read();
        if !session.connected() {
            nav.push(Route::Welcome {});
        } else if session.pairing.is_paired() {
            nav.push(Route::Dashboard {});
        }
    });

    let session_read = session.read();
    let loading = session_read.loading;
    let invite_sent = session_read.pairing.invitation_sent();
    let error = session_read.error.clone();
    drop(session_read);

    let pending = invitations.read().pending.clone();

    if invite_sent {
        return rsx! {
            div { class: "min-h-screen flex flex-col items-center justify-center p-8 pixel-grid",
                div { class: "retro-panel max-w-lg w-full p-8 text-center",
                    h1 { class: "font-pixel text-2xl md:text-3xl text-card-foreground mb-8",
                        "INVITE SENT!"
                    }

                    div { class: "flex justify-center mb-8",
                        div { class: "text-6xl animate-bounce", "\u{1F431}" }
                    }

                    p { class: "font-nunito text-lg text-card-foreground leading-relaxed mb-6",
                        "Waiting for your co-parent to accept. We'll take you to your new pet as soon as they do!"
                    }

                    div { class: "flex justify-center space-x-2",
                        div { class: "w-3 h-3 bg-card-foreground animate-pulse" }
                        div { class: "w-3 h-3 bg-card-foreground animate-pulse" }
                        div { class: "w-3 h-3 bg-card-foreground animate-pulse" }
                    }
                }
            }
        };
    }

    rsx! {
        div { class: "min-h-screen flex flex-col items-center justify-center p-8 pixel-grid",
            div { class: "retro-panel max-w-lg w-full p-8",
                h1 { class: "font-pixel text-2xl md:text-3xl text-card-foreground mb-8 text-center",
                    "INVITE YOUR CO-PARENT"
                }

                p { class: "font-nunito text-base text-card-foreground leading-relaxed mb-8",
                    "Your pet can only be minted once your co-parent accepts the on-chain "
                    "invitation. Enter their wallet address below to send the invite."
                }

                div { class: "mb-8",
                    label { class: "font-nunito text-sm font-semibold text-card-foreground block mb-3",
                        "Wallet Address"
                    }
                    input {
                        r#type: "text",
                        value: "{wallet_address}",
                        placeholder: "0x...",
                        class: "w-full px-4 py-3 border-2 border-border bg-input text-foreground font-nunito text-sm focus:outline-none focus:ring-2 focus:ring-ring",
                        oninput: move |event| wallet_address.set(event.value()),
                    }
                }

                button {
                    class: "retro-button bg-primary text-primary-foreground hover:bg-primary/90 disabled:opacity-50 disabled:cursor-not-allowed w-full text-lg py-4",
                    disabled: loading || wallet_address.read().trim().is_empty(),
                    onclick: move |_| {
                        let to = wallet_address.read().trim().to_string();
                        if !to.is_empty() {
                            service.send(SessionAction::SendInvitation(to));
                        }
                    },
                    if loading { "Sending..." } else { "Send Invite" }
                }

                if let Some(error) = error {
                    div { class: "mt-4 text-red-500 text-sm bg-red-500/10 border border-red-500/20 rounded p-3",
                        "{error}"
                    }
                }

                // Inbound invitations
                if !pending.is_empty() {
                    div { class: "mt-10 border-t border-border pt-6",
                        h2 { class: "font-pixel text-lg text-card-foreground mb-4",
                            "PENDING INVITATIONS"
                        }
                        {pending.iter().map(|invitation| {
                            let from_short = shorten_address(&invitation.from);
                            let id = invitation.id;
                            rsx! {
                                div { class: "flex items-center justify-between p-3 bg-muted rounded mb-2",
                                    div {
                                        div { class: "font-mono text-sm text-foreground", "{from_short}" }
                                        div { class: "text-xs text-muted-foreground",
                                            "wants to co-parent a pet with you"
                                        }
                                    }
                                    if let Some(id) = id {
                                        button {
                                            class: "retro-button bg-secondary text-secondary-foreground hover:bg-secondary/90 disabled:opacity-50 px-4 py-2 text-sm",
                                            disabled: loading,
                                            onclick: move |_| service.send(SessionAction::AcceptInvitation(id)),
                                            "Accept"
                                        }
                                    }
                                }
                            }
                        })}
                    }
                }

                div { class: "flex justify-center mt-8 text-3xl", "\u{1F483}\u{1F431}" }
            }
        }
    }
}
