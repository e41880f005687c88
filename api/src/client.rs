//! The contract client.
//!
//! `CapyClient` translates application intents into ledger writes (an
//! entry-function payload signed and submitted by the wallet gateway, then
//! confirmed through the ledger reader) or side-effect-free view reads. It
//! holds no account state of its own: the connected account is passed
//! explicitly into every operation, so the session container stays the
//! single owner and tests can run against doubles.

use serde_json::Value;

use crate::consts::{contract_is_deployed, data_resource_type};
use crate::decode;
use crate::error::CapyError;
use crate::payload::{self, EntryPayload, ViewRequest};
use crate::types::{
    AccountType, CoParentPair, CollectionInfo, GameKind, InventoryItem, Invitation,
    InvitationStatus, PetNft, WalletAccount,
};

/// Raw key material as reported by the wallet extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawAccount {
    pub address: String,
    pub public_key: String,
}

/// The injected wallet extension: session introspection plus transaction
/// signing and submission. Signing never happens in this crate.
pub trait WalletGateway {
    async fn is_connected(&self) -> Result<bool, CapyError>;
    async fn account(&self) -> Result<RawAccount, CapyError>;
    /// Sign and submit an entry-function payload, returning the
    /// transaction hash.
    async fn sign_and_submit(&self, payload: &EntryPayload) -> Result<String, CapyError>;
}

/// Read access to the ledger: view calls, transaction confirmation, and
/// the resource probe used as an initialization check.
pub trait LedgerReader {
    async fn view(&self, request: &ViewRequest) -> Result<Vec<Value>, CapyError>;
    /// Block until the transaction leaves the pending state; failed
    /// transactions surface their VM status as a classified error.
    async fn wait_for_transaction(&self, hash: &str) -> Result<(), CapyError>;
    async fn has_resource(&self, address: &str, resource_type: &str) -> Result<bool, CapyError>;
}

pub struct CapyClient<W, L> {
    wallet: W,
    ledger: L,
    contract: String,
}

impl<W: WalletGateway, L: LedgerReader> CapyClient<W, L> {
    pub fn new(wallet: W, ledger: L, contract: impl Into<String>) -> Self {
        Self {
            wallet,
            ledger,
            contract: contract.into(),
        }
    }

    pub fn contract(&self) -> &str {
        &self.contract
    }

    /// Wrap the wallet-reported key material into the account shape the
    /// rest of the app uses. The extension does not expose the key scheme,
    /// so Ed25519 is assumed.
    pub fn connect(&self, raw: RawAccount) -> WalletAccount {
        WalletAccount {
            address: raw.address,
            public_key: raw.public_key,
            account_type: AccountType::Ed25519,
        }
    }

    /// Probe for the caller's on-chain `CapyData` resource and submit
    /// `initialize` when it is absent. A probe failure is read as "not yet
    /// created"; an `E_ALREADY_INITIALIZED` abort counts as success.
    pub async fn ensure_initialized(&self, account: &WalletAccount) -> Result<(), CapyError> {
        let resource = data_resource_type(&self.contract);
        let initialized = match self.ledger.has_resource(&account.address, &resource).await {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!("resource probe failed, assuming uninitialized: {err}");
                false
            }
        };
        if initialized {
            return Ok(());
        }

        tracing::info!("initializing on-chain account for {}", account.address);
        let hash = match self.wallet.sign_and_submit(&payload::initialize(&self.contract)).await {
            Ok(hash) => hash,
            Err(CapyError::AlreadyInitialized) => return Ok(()),
            Err(err) => return Err(err),
        };
        match self.ledger.wait_for_transaction(&hash).await {
            Ok(()) | Err(CapyError::AlreadyInitialized) => Ok(()),
            Err(err) => Err(err),
        }
    }

    async fn submit_and_wait(&self, payload: &EntryPayload) -> Result<(), CapyError> {
        let hash = self.wallet.sign_and_submit(payload).await?;
        self.ledger.wait_for_transaction(&hash).await
    }

    /// Uniform write path: ensure the initialization precondition, submit,
    /// and retry exactly once when the ledger still reports the account as
    /// uninitialized (the probe can race a brand-new account).
    async fn submit_checked(
        &self,
        account: &WalletAccount,
        payload: &EntryPayload,
    ) -> Result<(), CapyError> {
        self.ensure_initialized(account).await?;
        match self.submit_and_wait(payload).await {
            Err(err) if err.is_not_initialized() => {
                tracing::warn!("write hit E_NOT_INITIALIZED, retrying once: {err}");
                self.ensure_initialized(account).await?;
                self.submit_and_wait(payload).await
            }
            other => other,
        }
    }

    /// Submit an invitation naming the recipient. The returned record is
    /// locally synthesized: its id and ledger timestamp are only canonical
    /// once the invitation is read back.
    pub async fn send_invitation(
        &self,
        account: &WalletAccount,
        to: &str,
    ) -> Result<Invitation, CapyError> {
        if !contract_is_deployed(&self.contract) {
            return Err(CapyError::NotDeployed);
        }
        self.submit_checked(account, &payload::send_invitation(&self.contract, to))
            .await?;
        Ok(Invitation {
            id: None,
            from: account.address.clone(),
            to: to.to_string(),
            status: InvitationStatus::Pending,
            timestamp: 0,
        })
    }

    /// Invitations addressed to the caller that are still pending. One
    /// detail read per id; records that fail to fetch or decode are logged
    /// and skipped so one bad entry does not abort the listing.
    pub async fn pending_invitations(
        &self,
        account: &WalletAccount,
    ) -> Result<Vec<Invitation>, CapyError> {
        let listing = self
            .ledger
            .view(&payload::user_invitations(&self.contract, &account.address))
            .await?;
        let ids = listing.first().map(decode::parse_id_list).unwrap_or_default();

        let mut pending = Vec::new();
        for id in ids {
            let detail = match self.ledger.view(&payload::invitation(&self.contract, id)).await {
                Ok(values) => values,
                Err(err) => {
                    tracing::warn!("skipping invitation {id}: {err}");
                    continue;
                }
            };
            let invitation = match decode::invitation_from_view(id, &detail) {
                Ok(invitation) => invitation,
                Err(err) => {
                    tracing::warn!("skipping undecodable invitation {id}: {err}");
                    continue;
                }
            };
            if invitation.to == account.address && invitation.status == InvitationStatus::Pending {
                pending.push(invitation);
            }
        }
        Ok(pending)
    }

    /// Accept an invitation by id, then return the resulting pair as the
    /// ledger records it. Pairing is ledger-authoritative: nothing is
    /// synthesized client-side.
    pub async fn accept_invitation(
        &self,
        account: &WalletAccount,
        invitation_id: u64,
    ) -> Result<CoParentPair, CapyError> {
        self.submit_checked(
            account,
            &payload::accept_invitation(&self.contract, invitation_id),
        )
        .await?;

        let pairs = self.co_parent_pairs(account).await?;
        pairs.into_iter().next().ok_or(CapyError::NoPair)
    }

    /// The caller's co-parent pairs, freshly read from the ledger.
    pub async fn co_parent_pairs(
        &self,
        account: &WalletAccount,
    ) -> Result<Vec<CoParentPair>, CapyError> {
        let listing = self
            .ledger
            .view(&payload::user_pairs(&self.contract, &account.address))
            .await?;
        let ids = listing.first().map(decode::parse_id_list).unwrap_or_default();

        let mut pairs = Vec::new();
        for id in ids {
            let detail = match self.ledger.view(&payload::pair(&self.contract, id)).await {
                Ok(values) => values,
                Err(err) => {
                    tracing::warn!("skipping pair {id}: {err}");
                    continue;
                }
            };
            match decode::pair_from_view(id, &detail) {
                Ok(pair) if pair.involves(&account.address) => pairs.push(pair),
                Ok(_) => tracing::warn!("pair {id} does not involve the caller, skipping"),
                Err(err) => tracing::warn!("skipping undecodable pair {id}: {err}"),
            }
        }
        Ok(pairs)
    }

    pub async fn feed_pet(&self, account: &WalletAccount, pair_id: u64) -> Result<(), CapyError> {
        self.submit_checked(account, &payload::feed_pet(&self.contract, pair_id))
            .await
    }

    pub async fn show_love_to_pet(
        &self,
        account: &WalletAccount,
        pair_id: u64,
    ) -> Result<(), CapyError> {
        self.submit_checked(account, &payload::show_love_to_pet(&self.contract, pair_id))
            .await
    }

    /// Purchase a marketplace item. The uniform write path retries once on
    /// the initialization precondition; remaining failures arrive already
    /// classified (item not found, already owned, generic).
    pub async fn purchase_item(
        &self,
        account: &WalletAccount,
        item_id: u64,
    ) -> Result<(), CapyError> {
        self.submit_checked(account, &payload::purchase_item(&self.contract, item_id))
            .await
    }

    pub async fn claim_game_reward(
        &self,
        account: &WalletAccount,
        game: GameKind,
        score: u64,
    ) -> Result<(), CapyError> {
        self.submit_checked(
            account,
            &payload::claim_game_reward(&self.contract, game, score),
        )
        .await
    }

    pub async fn claim_pet_nft(
        &self,
        account: &WalletAccount,
        pair_id: u64,
    ) -> Result<(), CapyError> {
        self.submit_checked(account, &payload::claim_pet_nft(&self.contract, pair_id))
            .await
    }

    /// The caller's inventory with full item details, one read per id.
    pub async fn detailed_inventory(
        &self,
        account: &WalletAccount,
    ) -> Result<Vec<InventoryItem>, CapyError> {
        let listing = self
            .ledger
            .view(&payload::user_inventory(&self.contract, &account.address))
            .await?;
        let ids = listing.first().map(decode::parse_id_list).unwrap_or_default();

        let mut items = Vec::new();
        for id in ids {
            let detail = match self
                .ledger
                .view(&payload::marketplace_item(&self.contract, id))
                .await
            {
                Ok(values) => values,
                Err(err) => {
                    tracing::warn!("skipping inventory item {id}: {err}");
                    continue;
                }
            };
            match decode::marketplace_item_from_view(id, &detail) {
                Ok(item) => items.push(item),
                Err(err) => tracing::warn!("skipping undecodable item {id}: {err}"),
            }
        }
        Ok(items)
    }

    /// A single marketplace item record.
    pub async fn marketplace_item(&self, item_id: u64) -> Result<InventoryItem, CapyError> {
        let detail = self
            .ledger
            .view(&payload::marketplace_item(&self.contract, item_id))
            .await?;
        decode::marketplace_item_from_view(item_id, &detail)
    }

    /// The caller's pet NFTs, one detail read per pair id.
    pub async fn pet_nfts(&self, account: &WalletAccount) -> Result<Vec<PetNft>, CapyError> {
        let listing = self
            .ledger
            .view(&payload::user_pet_nfts(&self.contract, &account.address))
            .await?;
        let ids = listing.first().map(decode::parse_id_list).unwrap_or_default();

        let mut pets = Vec::new();
        for id in ids {
            match self.pet_nft(id).await {
                Ok(pet) => pets.push(pet),
                Err(err) => tracing::warn!("skipping pet {id}: {err}"),
            }
        }
        Ok(pets)
    }

    pub async fn pet_nft(&self, pair_id: u64) -> Result<PetNft, CapyError> {
        let detail = self
            .ledger
            .view(&payload::pet_nft(&self.contract, pair_id))
            .await?;
        decode::pet_nft_from_view(pair_id, &detail)
    }

    pub async fn collection_info(&self) -> Result<CollectionInfo, CapyError> {
        let values = self
            .ledger
            .view(&payload::nft_collection_info(&self.contract))
            .await?;
        decode::collection_info_from_view(&values)
    }
}
