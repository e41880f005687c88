//! End-to-end client scenarios against scripted wallet/ledger doubles.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};

use serde_json::{json, Value};

use capy_api::client::{CapyClient, LedgerReader, RawAccount, WalletGateway};
use capy_api::error::CapyError;
use capy_api::payload::{self, EntryPayload, ViewRequest};
use capy_api::types::{AccountType, GameKind, InvitationStatus, WalletAccount};

const CONTRACT: &str = "0x36c37bf5fa363357720f8b231afc1d736d361832d61ff6bee66718001b7c6ede";
const ME: &str = "0xaaa0000000000000000000000000000000000000000000000000000000000001";
const OTHER: &str = "0xbbb0000000000000000000000000000000000000000000000000000000000002";

fn me() -> WalletAccount {
    WalletAccount {
        address: ME.into(),
        public_key: "0xkey".into(),
        account_type: AccountType::Ed25519,
    }
}

/// Wallet double: records every submitted payload, hands out sequential
/// fake hashes, and optionally fails every signing attempt.
#[derive(Default)]
struct StubWallet {
    submitted: RefCell<Vec<EntryPayload>>,
    fail_with: Option<CapyError>,
}

impl StubWallet {
    fn failing(err: CapyError) -> Self {
        Self {
            submitted: RefCell::new(Vec::new()),
            fail_with: Some(err),
        }
    }

    fn submitted_functions(&self) -> Vec<String> {
        self.submitted
            .borrow()
            .iter()
            .map(|p| p.function.clone())
            .collect()
    }
}

impl WalletGateway for &StubWallet {
    async fn is_connected(&self) -> Result<bool, CapyError> {
        Ok(self.fail_with.is_none())
    }

    async fn account(&self) -> Result<RawAccount, CapyError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        Ok(RawAccount {
            address: ME.into(),
            public_key: "0xkey".into(),
        })
    }

    async fn sign_and_submit(&self, payload: &EntryPayload) -> Result<String, CapyError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        let mut submitted = self.submitted.borrow_mut();
        submitted.push(payload.clone());
        Ok(format!("0xhash{}", submitted.len()))
    }
}

/// Ledger double: view responses keyed by the serialized request, scripted
/// wait outcomes consumed in order (defaulting to success), and a set of
/// addresses that own the `CapyData` resource.
#[derive(Default)]
struct StubLedger {
    views: HashMap<String, Result<Vec<Value>, CapyError>>,
    wait_results: RefCell<VecDeque<Result<(), CapyError>>>,
    initialized: HashSet<String>,
}

impl StubLedger {
    fn on_view(&mut self, request: &ViewRequest, response: Vec<Value>) {
        self.views
            .insert(serde_json::to_string(request).unwrap(), Ok(response));
    }

    fn on_view_error(&mut self, request: &ViewRequest, err: CapyError) {
        self.views
            .insert(serde_json::to_string(request).unwrap(), Err(err));
    }

    fn script_wait(&self, result: Result<(), CapyError>) {
        self.wait_results.borrow_mut().push_back(result);
    }
}

impl LedgerReader for &StubLedger {
    async fn view(&self, request: &ViewRequest) -> Result<Vec<Value>, CapyError> {
        let key = serde_json::to_string(request).unwrap();
        match self.views.get(&key) {
            Some(result) => result.clone(),
            None => Err(CapyError::Rpc(format!("unscripted view {}", request.function))),
        }
    }

    async fn wait_for_transaction(&self, _hash: &str) -> Result<(), CapyError> {
        self.wait_results.borrow_mut().pop_front().unwrap_or(Ok(()))
    }

    async fn has_resource(&self, address: &str, _resource_type: &str) -> Result<bool, CapyError> {
        Ok(self.initialized.contains(address))
    }
}

fn client<'a>(
    wallet: &'a StubWallet,
    ledger: &'a StubLedger,
) -> CapyClient<&'a StubWallet, &'a StubLedger> {
    CapyClient::new(wallet, ledger, CONTRACT)
}

#[tokio::test]
async fn connect_wraps_raw_key_material() {
    let wallet = StubWallet::default();
    let ledger = StubLedger::default();
    let client = client(&wallet, &ledger);

    let account = client.connect(RawAccount {
        address: ME.into(),
        public_key: "0xkey".into(),
    });
    assert_eq!(account.address, ME);
    assert_eq!(account.account_type, AccountType::Ed25519);
}

#[tokio::test]
async fn send_invitation_synthesizes_a_pending_record() {
    let wallet = StubWallet::default();
    let mut ledger = StubLedger::default();
    ledger.initialized.insert(ME.into());
    let client = client(&wallet, &ledger);

    let invitation = client.send_invitation(&me(), OTHER).await.unwrap();
    assert_eq!(invitation.id, None);
    assert_eq!(invitation.from, ME);
    assert_eq!(invitation.to, OTHER);
    assert_eq!(invitation.status, InvitationStatus::Pending);
    assert_eq!(
        wallet.submitted_functions(),
        vec![format!("{CONTRACT}::capy::send_invitation")]
    );
}

#[tokio::test]
async fn send_invitation_requires_a_deployed_contract() {
    let wallet = StubWallet::default();
    let ledger = StubLedger::default();
    let client = CapyClient::new(&wallet, &ledger, "0x123");

    let err = client.send_invitation(&me(), OTHER).await.unwrap_err();
    assert_eq!(err, CapyError::NotDeployed);
    assert!(wallet.submitted.borrow().is_empty());
}

#[tokio::test]
async fn declined_signature_propagates_with_the_original_message() {
    let wallet = StubWallet::failing(CapyError::Declined("user dismissed the popup".into()));
    let mut ledger = StubLedger::default();
    ledger.initialized.insert(ME.into());
    let client = client(&wallet, &ledger);

    let err = client.send_invitation(&me(), OTHER).await.unwrap_err();
    assert!(matches!(err, CapyError::Declined(_)));
    assert!(err.to_string().contains("user dismissed the popup"));
}

#[tokio::test]
async fn pending_invitations_filters_recipient_and_status() {
    let wallet = StubWallet::default();
    let mut ledger = StubLedger::default();

    // Heterogeneous id shapes in one listing, plus one unparseable entry.
    ledger.on_view(
        &payload::user_invitations(CONTRACT, ME),
        vec![json!(["7", 8, [9], {"inner": "10"}, "junk"])],
    );
    // 7: pending, addressed to me — the only survivor.
    ledger.on_view(
        &payload::invitation(CONTRACT, 7),
        vec![json!(OTHER), json!(ME), json!("0"), json!("100")],
    );
    // 8: addressed to someone else.
    ledger.on_view(
        &payload::invitation(CONTRACT, 8),
        vec![json!(OTHER), json!(OTHER), json!("0"), json!("101")],
    );
    // 9: already accepted.
    ledger.on_view(
        &payload::invitation(CONTRACT, 9),
        vec![json!(OTHER), json!(ME), json!("1"), json!("102")],
    );
    // 10: detail fetch fails; skipped, not fatal.
    ledger.on_view_error(
        &payload::invitation(CONTRACT, 10),
        CapyError::Rpc("boom".into()),
    );

    let client = client(&wallet, &ledger);
    let pending = client.pending_invitations(&me()).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, Some(7));
    assert_eq!(pending[0].from, OTHER);
    assert_eq!(pending[0].status, InvitationStatus::Pending);
}

#[tokio::test]
async fn accept_invitation_returns_the_ledger_pair() {
    let wallet = StubWallet::default();
    let mut ledger = StubLedger::default();
    ledger.initialized.insert(ME.into());
    ledger.on_view(&payload::user_pairs(CONTRACT, ME), vec![json!(["3"])]);
    ledger.on_view(
        &payload::pair(CONTRACT, 3),
        vec![json!(OTHER), json!(ME), json!(true), json!("555")],
    );

    let client = client(&wallet, &ledger);
    let pair = client.accept_invitation(&me(), 7).await.unwrap();

    // Exactly one parent is the caller; the other is the original sender.
    assert_eq!(pair.co_parent(ME), Some(OTHER));
    assert!(pair.pet_created);
    assert_eq!(
        wallet.submitted_functions(),
        vec![format!("{CONTRACT}::capy::accept_invitation")]
    );
}

#[tokio::test]
async fn accept_invitation_without_a_ledger_pair_is_an_error() {
    let wallet = StubWallet::default();
    let mut ledger = StubLedger::default();
    ledger.initialized.insert(ME.into());
    ledger.on_view(&payload::user_pairs(CONTRACT, ME), vec![json!([])]);

    let client = client(&wallet, &ledger);
    let err = client.accept_invitation(&me(), 7).await.unwrap_err();
    assert_eq!(err, CapyError::NoPair);
}

#[tokio::test]
async fn pairs_not_involving_the_caller_are_dropped() {
    let wallet = StubWallet::default();
    let mut ledger = StubLedger::default();
    ledger.on_view(&payload::user_pairs(CONTRACT, ME), vec![json!(["1", "2"])]);
    ledger.on_view(
        &payload::pair(CONTRACT, 1),
        vec![json!(ME), json!(OTHER), json!(false), json!("1")],
    );
    ledger.on_view(
        &payload::pair(CONTRACT, 2),
        vec![json!(OTHER), json!(OTHER), json!(false), json!("2")],
    );

    let client = client(&wallet, &ledger);
    let pairs = client.co_parent_pairs(&me()).await.unwrap();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].id, 1);
}

#[tokio::test]
async fn writes_initialize_uninitialized_accounts_first() {
    let wallet = StubWallet::default();
    let ledger = StubLedger::default(); // nobody initialized
    let client = client(&wallet, &ledger);

    client.feed_pet(&me(), 3).await.unwrap();
    assert_eq!(
        wallet.submitted_functions(),
        vec![
            format!("{CONTRACT}::capy::initialize"),
            format!("{CONTRACT}::capy::feed_pet"),
        ]
    );
}

#[tokio::test]
async fn purchase_retries_exactly_once_on_the_init_precondition() {
    let wallet = StubWallet::default();
    let mut ledger = StubLedger::default();
    ledger.initialized.insert(ME.into());
    // First confirmation reports the precondition abort, second succeeds.
    ledger.script_wait(Err(CapyError::NotInitialized("E_NOT_INITIALIZED".into())));
    ledger.script_wait(Ok(()));

    let client = client(&wallet, &ledger);
    client.purchase_item(&me(), 5).await.unwrap();
    assert_eq!(
        wallet.submitted_functions(),
        vec![
            format!("{CONTRACT}::capy::purchase_item"),
            format!("{CONTRACT}::capy::purchase_item"),
        ]
    );
}

#[tokio::test]
async fn purchase_gives_up_after_the_single_retry() {
    let wallet = StubWallet::default();
    let mut ledger = StubLedger::default();
    ledger.initialized.insert(ME.into());
    ledger.script_wait(Err(CapyError::NotInitialized("E_NOT_INITIALIZED".into())));
    ledger.script_wait(Err(CapyError::NotInitialized("E_NOT_INITIALIZED".into())));

    let client = client(&wallet, &ledger);
    let err = client.purchase_item(&me(), 5).await.unwrap_err();
    assert!(err.is_not_initialized());
    // Two purchase submissions, no third attempt.
    assert_eq!(wallet.submitted.borrow().len(), 2);
}

#[tokio::test]
async fn purchase_surfaces_classified_domain_errors() {
    let wallet = StubWallet::default();
    let mut ledger = StubLedger::default();
    ledger.initialized.insert(ME.into());
    ledger.script_wait(Err(CapyError::classify("Move abort E_ALREADY_OWNED")));

    let client = client(&wallet, &ledger);
    let err = client.purchase_item(&me(), 5).await.unwrap_err();
    assert!(matches!(err, CapyError::AlreadyOwned(_)));
}

#[tokio::test]
async fn already_initialized_abort_counts_as_success() {
    let wallet = StubWallet::default();
    let ledger = StubLedger::default(); // probe says uninitialized
    ledger.script_wait(Err(CapyError::AlreadyInitialized)); // init confirm aborts

    let client = client(&wallet, &ledger);
    client.ensure_initialized(&me()).await.unwrap();
}

#[tokio::test]
async fn claim_game_reward_submits_the_score() {
    let wallet = StubWallet::default();
    let mut ledger = StubLedger::default();
    ledger.initialized.insert(ME.into());

    let client = client(&wallet, &ledger);
    client
        .claim_game_reward(&me(), GameKind::Target, 55)
        .await
        .unwrap();
    let submitted = wallet.submitted.borrow();
    assert_eq!(submitted[0].arguments, vec![json!("target"), json!("55")]);
}

#[tokio::test]
async fn detailed_inventory_decodes_byte_fields_and_skips_bad_records() {
    let wallet = StubWallet::default();
    let mut ledger = StubLedger::default();
    ledger.on_view(&payload::user_inventory(CONTRACT, ME), vec![json!(["1", "2"])]);
    ledger.on_view(
        &payload::marketplace_item(CONTRACT, 1),
        vec![
            json!("0x46697368"), // "Fish"
            json!("1"),
            json!("8"),
            json!("0x59756d"), // "Yum"
            json!("0x2f666973682e706e67"),
            json!(true),
        ],
    );
    ledger.on_view_error(
        &payload::marketplace_item(CONTRACT, 2),
        CapyError::Rpc("gone".into()),
    );

    let client = client(&wallet, &ledger);
    let items = client.detailed_inventory(&me()).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Fish");
    assert_eq!(items[0].description, "Yum");
    assert_eq!(items[0].image_url, "/fish.png");
}

#[tokio::test]
async fn pet_listing_tolerates_individual_failures() {
    let wallet = StubWallet::default();
    let mut ledger = StubLedger::default();
    ledger.on_view(&payload::user_pet_nfts(CONTRACT, ME), vec![json!(["4", "5"])]);
    ledger.on_view(
        &payload::pet_nft(CONTRACT, 4),
        vec![
            json!(ME),
            json!(OTHER),
            json!("0x4361707962617261"), // "Capybara"
            json!("0x4f757220706574"),   // "Our pet"
            json!("ipfs://meta/4"),
            json!("900"),
            json!(false),
        ],
    );
    ledger.on_view_error(&payload::pet_nft(CONTRACT, 5), CapyError::Rpc("gone".into()));

    let client = client(&wallet, &ledger);
    let pets = client.pet_nfts(&me()).await.unwrap();
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].name, "Capybara");
    assert_eq!(pets[0].co_parent, OTHER);
    assert!(!pets[0].claimed);
}

#[tokio::test]
async fn collection_info_decodes_supply_counters() {
    let wallet = StubWallet::default();
    let mut ledger = StubLedger::default();
    ledger.on_view(
        &payload::nft_collection_info(CONTRACT),
        vec![
            json!("0x43415059"),
            json!("0x436f2d706172656e746564206361747320"),
            json!("https://capy.pet/collection"),
            json!("12"),
            json!("5"),
        ],
    );

    let client = client(&wallet, &ledger);
    let info = client.collection_info().await.unwrap();
    assert_eq!(info.name, "CAPY");
    assert_eq!(info.total_supply, 12);
    assert_eq!(info.claimed_supply, 5);
}
