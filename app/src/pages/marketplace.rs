use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use capy_api::error::CapyError;
use capy_api::types::{InventoryItem, ItemKind, WalletAccount};
use dioxus::prelude::*;

use crate::catalog::{CatalogItem, CATALOG};
use crate::hooks;
use crate::route::Route;
use crate::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Category {
    All,
    Food,
    Toys,
    Decorations,
    Furniture,
}

impl Category {
    const ALL: [Category; 5] = [
        Category::All,
        Category::Food,
        Category::Toys,
        Category::Decorations,
        Category::Furniture,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::All => "\u{1F3EA} All Items",
            Self::Food => "\u{1F37D} Food",
            Self::Toys => "\u{1F3BE} Toys",
            Self::Decorations => "\u{1F3A8} Decorations",
            Self::Furniture => "\u{1F6CF} Furniture",
        }
    }

    fn matches(self, kind: ItemKind) -> bool {
        match self {
            Self::All => true,
            Self::Food => kind == ItemKind::Food,
            Self::Toys => kind == ItemKind::Toy,
            Self::Decorations => kind == ItemKind::Decoration,
            Self::Furniture => kind == ItemKind::Furniture,
        }
    }
}

#[component]
pub fn Marketplace() -> Element {
    let session = use_context::<Signal<Session>>();
    let nav = use_navigator();

    let mut selected_category = use_signal(|| Category::All);
    let mut cart = use_signal(Vec::<u64>::new);
    let mut show_cart = use_signal(|| false);
    let mut purchasing = use_signal(|| false);
    let mut purchase_result = use_signal(|| None::<Result<usize, String>>);

    // Live price/availability per catalog id, refreshed from the ledger.
    let live = use_signal(HashMap::<u64, InventoryItem>::new);

    use_effect(move || {
        if !session.read().connected() {
            nav.push(Route::Welcome {});
        }
    });

    // One live-catalog refresh per visit.
    let refreshed = use_hook(|| Rc::new(Cell::new(false)));
    use_effect(move || {
        if !refreshed.get() {
            refreshed.set(true);
            spawn(refresh_live_catalog(live));
        }
    });

    let loading = session.read().loading;
    let account = session.read().account().cloned();

    let category = selected_category();
    let live_read = live.read();
    let items: Vec<(CatalogItem, Option<InventoryItem>)> = CATALOG
        .iter()
        .filter(|item| category.matches(item.kind))
        .map(|item| (*item, live_read.get(&item.id).cloned()))
        .collect();
    drop(live_read);

    let cart_ids = cart.read().clone();
    let cart_total: u64 = cart_ids
        .iter()
        .filter_map(|id| CATALOG.iter().find(|item| item.id == *id))
        .map(|item| item.price)
        .sum();
    let cart_len = cart_ids.len();

    rsx! {
        div { class: "min-h-screen bg-background p-8",
            div { class: "max-w-6xl mx-auto",
                // Header
                div { class: "flex items-center justify-between mb-8",
                    div {
                        h1 { class: "font-pixel text-4xl text-foreground mb-2", "\u{1F6D2} Pet Marketplace" }
                        p { class: "text-muted-foreground", "Buy items to make your pet happy!" }
                    }
                    button {
                        class: "retro-button bg-primary text-primary-foreground hover:bg-primary/90 flex items-center gap-2",
                        onclick: move |_| {
                            let showing = show_cart();
                            show_cart.set(!showing);
                        },
                        "Cart ({cart_len})"
                    }
                }

                // Category filter
                div { class: "flex flex-wrap gap-2 mb-8",
                    {Category::ALL.iter().map(|&cat| {
                        let active = cat == category;
                        let label = cat.label();
                        let class = if active {
                            "retro-button px-4 py-2 bg-primary text-primary-foreground"
                        } else {
                            "retro-button px-4 py-2 bg-muted text-muted-foreground hover:bg-muted/80"
                        };
                        rsx! {
                            button {
                                class: "{class}",
                                onclick: move |_| selected_category.set(cat),
                                "{label}"
                            }
                        }
                    })}
                }

                // Items grid
                div { class: "grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4 gap-6",
                    {items.iter().map(|(item, live_item)| {
                        let id = item.id;
                        let name = item.name;
                        let description = item.description;
                        let emoji = item.emoji;
                        let rarity_label = item.rarity.label();
                        let rarity_color = item.rarity.color();
                        // Prefer the ledger record when we have one.
                        let price = live_item.as_ref().map_or(item.price, |i| i.price);
                        let available = live_item.as_ref().map_or(true, |i| i.available);
                        rsx! {
                            div { class: "retro-panel p-6 hover:shadow-lg transition-shadow",
                                div { class: "aspect-square bg-muted rounded-lg mb-4 flex items-center justify-center text-6xl",
                                    "{emoji}"
                                }
                                div { class: "space-y-2",
                                    div { class: "flex items-center justify-between",
                                        h3 { class: "font-pixel text-lg text-foreground", "{name}" }
                                        span { class: "text-sm font-bold {rarity_color}", "{rarity_label}" }
                                    }
                                    p { class: "text-sm text-muted-foreground", "{description}" }
                                    div { class: "flex items-center justify-between",
                                        span { class: "font-pixel text-xl text-primary", "{price} APT" }
                                        if available {
                                            button {
                                                class: "retro-button bg-secondary text-secondary-foreground hover:bg-secondary/90 px-3 py-1 text-sm",
                                                onclick: move |_| cart.write().push(id),
                                                "Add to Cart"
                                            }
                                        } else {
                                            span { class: "text-xs text-muted-foreground", "SOLD OUT" }
                                        }
                                    }
                                }
                            }
                        }
                    })}
                }

                // Cart overlay
                if show_cart() {
                    div { class: "fixed inset-0 bg-black/50 flex items-center justify-center z-50",
                        div { class: "bg-background border-2 border-foreground p-6 max-w-md w-full mx-4 max-h-[80vh] overflow-y-auto",
                            div { class: "flex items-center justify-between mb-4",
                                h2 { class: "font-pixel text-2xl text-foreground", "Shopping Cart" }
                                button {
                                    class: "text-muted-foreground hover:text-foreground",
                                    onclick: move |_| show_cart.set(false),
                                    "\u{2715}"
                                }
                            }

                            if cart_ids.is_empty() {
                                p { class: "text-muted-foreground text-center py-8", "Your cart is empty" }
                            } else {
                                div { class: "space-y-4",
                                    {cart_ids.iter().enumerate().map(|(index, id)| {
                                        let item = CATALOG.iter().find(|item| item.id == *id);
                                        let name = item.map_or("Unknown item", |i| i.name);
                                        let price = item.map_or(0, |i| i.price);
                                        rsx! {
                                            div { class: "flex items-center justify-between p-3 bg-muted rounded",
                                                div {
                                                    h4 { class: "font-pixel text-sm", "{name}" }
                                                    p { class: "text-xs text-muted-foreground", "{price} APT" }
                                                }
                                                button {
                                                    class: "text-destructive hover:text-destructive/80",
                                                    onclick: move |_| { cart.write().remove(index); },
                                                    "Remove"
                                                }
                                            }
                                        }
                                    })}

                                    div { class: "border-t pt-4",
                                        div { class: "flex items-center justify-between mb-4",
                                            span { class: "font-pixel text-lg", "Total:" }
                                            span { class: "font-pixel text-xl text-primary", "{cart_total} APT" }
                                        }
                                        button {
                                            class: "retro-button bg-primary text-primary-foreground hover:bg-primary/90 w-full py-3 disabled:opacity-50",
                                            disabled: purchasing() || loading,
                                            onclick: move |_| {
                                                if let Some(account) = account.clone() {
                                                    let ids = cart.read().clone();
                                                    spawn(purchase_cart(
                                                        account,
                                                        ids,
                                                        cart,
                                                        purchasing,
                                                        purchase_result,
                                                    ));
                                                }
                                            },
                                            if purchasing() { "Processing..." } else { "Purchase Items" }
                                        }

                                        {match purchase_result() {
                                            Some(Ok(count)) => rsx! {
                                                div { class: "mt-3 text-green-500 text-sm bg-green-500/10 border border-green-500/20 rounded p-2",
                                                    "Purchased {count} item(s)!"
                                                }
                                            },
                                            Some(Err(message)) => rsx! {
                                                div { class: "mt-3 text-red-500 text-sm bg-red-500/10 border border-red-500/20 rounded p-2",
                                                    "{message}"
                                                }
                                            },
                                            None => rsx! {},
                                        }}
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Refresh price/availability for every known catalog id. Per-item read
/// failures keep the built-in listing; this storefront must render even
/// when the ledger is unreachable.
async fn refresh_live_catalog(mut live: Signal<HashMap<u64, InventoryItem>>) {
    let client = hooks::client();
    for item in CATALOG {
        match client.marketplace_item(item.id).await {
            Ok(record) => {
                live.write().insert(item.id, record);
            }
            Err(err) => tracing::warn!("live catalog refresh failed for {}: {err}", item.id),
        }
    }
}

/// Purchase every item in the cart, one transaction each, stopping at the
/// first failure. Domain failures arrive classified from the client.
async fn purchase_cart(
    account: WalletAccount,
    ids: Vec<u64>,
    mut cart: Signal<Vec<u64>>,
    mut purchasing: Signal<bool>,
    mut result: Signal<Option<Result<usize, String>>>,
) {
    purchasing.set(true);
    result.set(None);

    let client = hooks::client();
    let mut bought = 0usize;
    let mut failure: Option<String> = None;

    for id in ids {
        match client.purchase_item(&account, id).await {
            Ok(()) => bought += 1,
            Err(err) => {
                let message = match err {
                    CapyError::ItemNotFound(_) => format!("Item {id} was not found"),
                    CapyError::AlreadyOwned(_) => format!("You already own item {id}"),
                    other => format!("Purchase failed: {other}"),
                };
                failure = Some(message);
                break;
            }
        }
    }

    match failure {
        Some(message) => result.set(Some(Err(message))),
        None => {
            cart.write().clear();
            result.set(Some(Ok(bought)));
        }
    }
    purchasing.set(false);
}
