//! Pet NFT collection state.

use capy_api::types::{CollectionInfo, PetNft, WalletAccount};
use dioxus::prelude::*;

use super::service;

#[derive(Clone, Debug, Default)]
pub struct PetsState {
    pub pets: Vec<PetNft>,
    pub collection: Option<CollectionInfo>,
    pub loading: bool,
    pub error: Option<String>,
}

pub fn use_pets() -> Signal<PetsState> {
    use_context::<Signal<PetsState>>()
}

/// Reload the caller's pet NFTs and the collection stats. Collection stats
/// are auxiliary: a failure there is logged and skipped so the pet listing
/// still renders.
pub async fn load_pets(mut state: Signal<PetsState>, account: WalletAccount) {
    {
        let mut s = state.write();
        s.loading = true;
        s.error = None;
    }

    let client = service::client();
    match client.pet_nfts(&account).await {
        Ok(pets) => state.write().pets = pets,
        Err(err) => state.write().error = Some(format!("Failed to load pets: {err}")),
    }

    match client.collection_info().await {
        Ok(info) => state.write().collection = Some(info),
        Err(err) => tracing::warn!("failed to load collection info: {err}"),
    }

    state.write().loading = false;
}
