//! Owned-item inventory state.

use capy_api::types::{InventoryItem, WalletAccount};
use dioxus::prelude::*;

use super::service;

#[derive(Clone, Debug, Default)]
pub struct InventoryState {
    pub items: Vec<InventoryItem>,
    pub loading: bool,
    pub error: Option<String>,
}

pub fn use_inventory() -> Signal<InventoryState> {
    use_context::<Signal<InventoryState>>()
}

pub async fn load_inventory(mut state: Signal<InventoryState>, account: WalletAccount) {
    {
        let mut s = state.write();
        s.loading = true;
        s.error = None;
    }

    match service::client().detailed_inventory(&account).await {
        Ok(items) => state.write().items = items,
        Err(err) => state.write().error = Some(format!("Failed to load inventory: {err}")),
    }

    state.write().loading = false;
}
