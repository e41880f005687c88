use std::cell::Cell;
use std::rc::Rc;

use capy_api::format::shorten_address;
use capy_api::types::WalletAccount;
use dioxus::prelude::*;

use crate::components::{PetMood, PetView};
use crate::hooks::{self, load_inventory, load_pets, use_inventory, use_pets, SessionAction};
use crate::route::Route;
use crate::Session;

/// How long a care action holds the pet's mood before it reverts to idle.
const MOOD_RESET_MS: u32 = 2_000;
const DIARY_LIMIT: usize = 5;

#[derive(Clone, Debug, PartialEq)]
struct DiaryEntry {
    icon: &'static str,
    text: String,
}

#[component]
pub fn Dashboard() -> Element {
    let session = use_context::<Signal<Session>>();
    let service = use_coroutine_handle::<SessionAction>();
    let nav = use_navigator();

    let happiness = use_signal(|| 75u32);
    let mood = use_signal(PetMood::default);
    let diary = use_signal(Vec::<DiaryEntry>::new);

    use_effect(move || {
        if !session.read().connected() {
            nav.push(Route::Welcome {});
        }
    });

    // Load NFT and inventory data once an account is present.
    let pets = use_pets();
    let inventory = use_inventory();
    let loaded = use_hook(|| Rc::new(Cell::new(false)));
    use_effect(move || {
        let account = session.read().account().cloned();
        if let Some(account) = account {
            if !loaded.get() {
                loaded.set(true);
                spawn(load_pets(pets, account.clone()));
                spawn(load_inventory(inventory, account));
            }
        }
    });

    let session_read = session.read();
    let loading = session_read.loading;
    let error = session_read.error.clone();
    let me = session_read.account().map(|a| a.address.clone());
    let co_parent = me
        .as_deref()
        .and_then(|me| session_read.pairing.co_parent_of(me))
        .map(shorten_address);
    let has_pair = session_read.pairing.is_paired();
    drop(session_read);

    let feed = move |_| {
        service.send(SessionAction::FeedPet);
        record_care(happiness, mood, diary, "\u{1F356}", "Fed", 15, PetMood::Eating);
    };

    let show_love = move |_| {
        service.send(SessionAction::ShowLove);
        record_care(happiness, mood, diary, "\u{2764}", "Showed love", 10, PetMood::Excited);
    };

    let diary_entries = diary.read().clone();

    rsx! {
        div { class: "min-h-screen pixel-grid p-6",
            div { class: "max-w-7xl mx-auto",
                div { class: "text-center mb-8",
                    h1 { class: "font-pixel text-3xl md:text-4xl text-foreground", "YOUR CAPY PET" }
                    if let Some(co_parent) = co_parent {
                        p { class: "text-sm text-muted-foreground mt-2 font-mono",
                            "co-parenting with " span { class: "text-primary", "{co_parent}" }
                        }
                    }
                }

                if let Some(error) = error {
                    div { class: "retro-panel p-4 bg-destructive text-destructive-foreground mb-8",
                        p { class: "font-nunito text-sm", "{error}" }
                    }
                }

                div { class: "grid grid-cols-1 lg:grid-cols-2 gap-8",
                    // Pet room
                    div { class: "retro-panel p-8 min-h-96",
                        h2 { class: "font-pixel text-lg text-card-foreground mb-6 text-center",
                            "PET ROOM"
                        }
                        PetView { mood: mood(), happiness: happiness() }
                    }

                    div { class: "space-y-6",
                        // Actions
                        div { class: "retro-panel p-6",
                            h3 { class: "font-pixel text-md text-card-foreground mb-4", "ACTIONS" }
                            if !has_pair {
                                p { class: "text-sm text-muted-foreground mb-4",
                                    "No co-parent pair yet. Send or accept an invitation to adopt a pet together."
                                }
                            }
                            div { class: "flex gap-4",
                                button {
                                    class: "retro-button bg-secondary text-secondary-foreground hover:bg-secondary/90 disabled:opacity-50 flex-1",
                                    disabled: loading || !has_pair,
                                    onclick: feed,
                                    "FEED"
                                }
                                button {
                                    class: "retro-button bg-accent text-accent-foreground hover:bg-accent/90 disabled:opacity-50 flex-1",
                                    disabled: loading || !has_pair,
                                    onclick: show_love,
                                    "SHOW LOVE"
                                }
                            }
                            button {
                                class: "retro-button bg-muted text-muted-foreground hover:bg-muted/80 disabled:opacity-50 w-full mt-4 text-sm",
                                disabled: loading,
                                onclick: move |_| service.send(SessionAction::Refresh),
                                "Refresh co-parent data"
                            }
                        }

                        // Arcade shortcut
                        div { class: "retro-panel p-6",
                            h3 { class: "font-pixel text-md text-card-foreground mb-4", "ARCADE" }
                            p { class: "text-sm text-muted-foreground mb-3",
                                "Play mini-games to earn APT rewards for your pet."
                            }
                            Link {
                                to: Route::Arcade {},
                                class: "retro-button bg-primary text-primary-foreground hover:bg-primary/90 inline-block px-6 py-2",
                                "Go to Arcade"
                            }
                        }

                        // Pet diary
                        div { class: "retro-panel p-6",
                            h3 { class: "font-pixel text-md text-card-foreground mb-4", "PET DIARY" }
                            if diary_entries.is_empty() {
                                p { class: "text-xs text-muted-foreground", "Nothing yet. Feed your pet!" }
                            }
                            div { class: "space-y-2 font-mono text-xs",
                                {diary_entries.iter().map(|entry| {
                                    let icon = entry.icon;
                                    let text = entry.text.clone();
                                    rsx! {
                                        div { class: "flex items-center gap-2 text-card-foreground",
                                            span { class: "text-sm", "{icon}" }
                                            span { class: "flex-1", "{text}" }
                                        }
                                    }
                                })}
                            }
                        }
                    }
                }

                NftSection { pets, session }
                InventorySection { inventory, session }
            }
        }
    }
}

#[component]
fn NftSection(
    pets: Signal<hooks::PetsState>,
    session: Signal<Session>,
) -> Element {
    let state = pets.read();
    let loading = state.loading;
    let error = state.error.clone();
    let collection = state.collection.clone();
    let pet_list = state.pets.clone();
    let owned = pet_list.len();
    drop(state);

    let account = session.read().account().cloned();

    let refresh = {
        let account = account.clone();
        move |_| {
            if let Some(account) = account.clone() {
                spawn(load_pets(pets, account));
            }
        }
    };

    rsx! {
        div { class: "mt-12",
            h2 { class: "font-pixel text-2xl text-foreground mb-6 text-center",
                "\u{1F43E} MY PET COLLECTION"
            }

            if let Some(info) = collection {
                div { class: "retro-panel p-6 mb-8 bg-muted",
                    h3 { class: "font-pixel text-xl text-foreground mb-4", "Collection Stats" }
                    div { class: "grid grid-cols-1 md:grid-cols-3 gap-4",
                        div { class: "text-center",
                            div { class: "font-pixel text-2xl text-primary", "{info.total_supply}" }
                            div { class: "text-sm text-muted-foreground", "Total Pets" }
                        }
                        div { class: "text-center",
                            div { class: "font-pixel text-2xl text-secondary", "{info.claimed_supply}" }
                            div { class: "text-sm text-muted-foreground", "Claimed" }
                        }
                        div { class: "text-center",
                            div { class: "font-pixel text-2xl text-accent", "{owned}" }
                            div { class: "text-sm text-muted-foreground", "Your Pets" }
                        }
                    }
                }
            }

            if loading {
                div { class: "text-center py-8",
                    div { class: "font-pixel text-lg text-muted-foreground", "Loading your pets..." }
                }
            }

            if let Some(error) = error {
                div { class: "retro-panel p-4 bg-destructive text-destructive-foreground mb-8",
                    p { class: "font-nunito text-sm", "{error}" }
                }
            }

            if !loading && pet_list.is_empty() {
                div { class: "text-center py-12",
                    div { class: "font-pixel text-xl text-foreground mb-2", "No Pets Yet" }
                    div { class: "text-muted-foreground",
                        "Create your first collaborative pet by sending an invitation!"
                    }
                }
            }

            div { class: "grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6",
                {pet_list.iter().map(|pet| {
                    let name = pet.name.clone();
                    let description = pet.description.clone();
                    let co_parent_short = shorten_address(&pet.co_parent);
                    let metadata_uri = pet.metadata_uri.clone();
                    let claimed = pet.claimed;
                    let pair_id = pet.pair_id;
                    let account = account.clone();
                    rsx! {
                        div { class: "retro-panel p-6 hover:shadow-lg transition-shadow",
                            div { class: "flex items-center justify-between mb-4",
                                h3 { class: "font-pixel text-lg text-foreground", "{name}" }
                                if claimed {
                                    div { class: "bg-green-500/10 text-green-500 px-2 py-1 rounded text-xs font-pixel",
                                        "CLAIMED"
                                    }
                                } else {
                                    div { class: "bg-yellow-500/10 text-yellow-500 px-2 py-1 rounded text-xs font-pixel",
                                        "PENDING"
                                    }
                                }
                            }

                            p { class: "text-sm text-muted-foreground mb-4", "{description}" }

                            div { class: "mb-4 p-3 bg-muted rounded",
                                div { class: "text-xs text-muted-foreground mb-1", "Co-parent:" }
                                div { class: "font-mono text-sm text-foreground", "{co_parent_short}" }
                            }

                            a {
                                href: "{metadata_uri}",
                                target: "_blank",
                                class: "text-sm text-primary hover:text-primary/80 transition-colors",
                                "View Metadata"
                            }

                            if !claimed {
                                button {
                                    class: "retro-button bg-primary text-primary-foreground hover:bg-primary/90 disabled:opacity-50 w-full py-2 mt-4",
                                    disabled: loading,
                                    onclick: move |_| {
                                        if let Some(account) = account.clone() {
                                            spawn(claim_pet(pets, account, pair_id));
                                        }
                                    },
                                    "Claim NFT"
                                }
                            }
                        }
                    }
                })}
            }

            div { class: "text-center mt-8",
                button {
                    class: "retro-button bg-muted text-muted-foreground hover:bg-muted/80 disabled:opacity-50 px-6 py-2",
                    disabled: loading,
                    onclick: refresh,
                    if loading { "Refreshing..." } else { "Refresh Pets" }
                }
            }
        }
    }
}

async fn claim_pet(mut pets: Signal<hooks::PetsState>, account: WalletAccount, pair_id: u64) {
    pets.write().loading = true;
    match hooks::client().claim_pet_nft(&account, pair_id).await {
        Ok(()) => load_pets(pets, account).await,
        Err(err) => {
            let mut state = pets.write();
            state.error = Some(format!("Failed to claim pet: {err}"));
            state.loading = false;
        }
    }
}

#[component]
fn InventorySection(
    inventory: Signal<hooks::InventoryState>,
    session: Signal<Session>,
) -> Element {
    let state = inventory.read();
    let loading = state.loading;
    let error = state.error.clone();
    let items = state.items.clone();
    drop(state);

    let account = session.read().account().cloned();

    rsx! {
        div { class: "mt-12",
            h2 { class: "font-pixel text-2xl text-foreground mb-6 text-center",
                "\u{1F392} MY INVENTORY"
            }

            if loading {
                div { class: "text-center py-8",
                    div { class: "font-pixel text-lg text-muted-foreground", "Loading inventory..." }
                }
            }

            if let Some(error) = error {
                div { class: "retro-panel p-4 bg-destructive text-destructive-foreground mb-8",
                    p { class: "font-nunito text-sm", "{error}" }
                }
            }

            if !loading && items.is_empty() {
                div { class: "text-center py-8",
                    div { class: "font-pixel text-xl text-foreground mb-2", "Empty Inventory" }
                    div { class: "text-muted-foreground", "Visit the marketplace to purchase items!" }
                }
            }

            div { class: "grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4 gap-6",
                {items.iter().map(|item| {
                    let emoji = crate::catalog::kind_emoji(item.kind);
                    let name = item.name.clone();
                    let kind_label = item.kind.label();
                    let description = item.description.clone();
                    let id = item.id;
                    let price = item.price;
                    rsx! {
                        div { class: "retro-panel p-6 text-center",
                            div { class: "text-4xl mb-3", "{emoji}" }
                            h3 { class: "font-pixel text-lg text-foreground mb-2", "{name}" }
                            div { class: "inline-block px-3 py-1 rounded-full text-sm mb-3 text-muted-foreground",
                                "{kind_label}"
                            }
                            p { class: "text-sm text-muted-foreground mb-4", "{description}" }
                            div { class: "flex items-center justify-between text-sm",
                                span { class: "text-muted-foreground", "ID: {id}" }
                                span { class: "text-primary font-bold", "{price} APT" }
                            }
                        }
                    }
                })}
            }

            div { class: "text-center mt-8",
                button {
                    class: "retro-button bg-muted text-muted-foreground hover:bg-muted/80 disabled:opacity-50 px-6 py-2",
                    disabled: loading,
                    onclick: move |_| {
                        if let Some(account) = account.clone() {
                            spawn(load_inventory(inventory, account));
                        }
                    },
                    "Refresh Inventory"
                }
            }
        }
    }
}

/// Optimistic local reaction to a care action: bump happiness, flip the
/// sprite mood, log a diary line, and revert to idle on a timer.
fn record_care(
    mut happiness: Signal<u32>,
    mut mood: Signal<PetMood>,
    mut diary: Signal<Vec<DiaryEntry>>,
    icon: &'static str,
    what: &str,
    boost: u32,
    new_mood: PetMood,
) {
    happiness.set((happiness() + boost).min(100));
    mood.set(new_mood);
    {
        let mut entries = diary.write();
        entries.insert(
            0,
            DiaryEntry {
                icon,
                text: format!("{what} at {}", now_time()),
            },
        );
        entries.truncate(DIARY_LIMIT);
    }
    spawn(async move {
        gloo_timers::future::TimeoutFuture::new(MOOD_RESET_MS).await;
        mood.set(PetMood::Idle);
    });
}

fn now_time() -> String {
    #[cfg(feature = "web")]
    {
        js_sys::Date::new_0().to_locale_time_string("en-US").into()
    }
    #[cfg(not(feature = "web"))]
    {
        String::new()
    }
}
