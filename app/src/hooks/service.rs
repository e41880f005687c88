//! The session container.
//!
//! One coroutine owns every session mutation: connection, invitations, and
//! pet care all funnel through [`SessionAction`]s so screens never touch
//! the wallet or the ledger directly for session-scoped state. Each action
//! holds the `loading` flag for its duration and records failures into the
//! single shared `error` field.

use capy_api::client::CapyClient;
use capy_api::session::Pairing;
use capy_api::types::WalletAccount;
use dioxus::prelude::*;
use futures::StreamExt;

use super::{petra, PetraWallet, RestLedger};
use crate::Session;

pub type CapyService = CapyClient<PetraWallet, RestLedger>;

/// A fresh client over the injected wallet and the configured node.
pub fn client() -> CapyService {
    CapyClient::new(
        PetraWallet,
        RestLedger::new(crate::NODE_URL),
        crate::CONTRACT_ADDRESS,
    )
}

#[derive(Clone, Debug)]
pub enum SessionAction {
    Connect,
    Disconnect,
    SendInvitation(String),
    AcceptInvitation(u64),
    FeedPet,
    ShowLove,
    Refresh,
}

pub fn use_session_service() -> Coroutine<SessionAction> {
    let session = use_context::<Signal<Session>>();

    use_coroutine(move |mut rx: UnboundedReceiver<SessionAction>| {
        async move {
            let service = client();

            // Adopt an already-approved extension session on startup.
            adopt_existing(&service, session).await;

            while let Some(action) = rx.next().await {
                match action {
                    SessionAction::Connect => connect(&service, session).await,
                    SessionAction::Disconnect => disconnect(session).await,
                    SessionAction::SendInvitation(to) => {
                        send_invitation(&service, session, &to).await
                    }
                    SessionAction::AcceptInvitation(id) => {
                        accept_invitation(&service, session, id).await
                    }
                    SessionAction::FeedPet => pet_care(&service, session, PetCare::Feed).await,
                    SessionAction::ShowLove => pet_care(&service, session, PetCare::Love).await,
                    SessionAction::Refresh => refresh(&service, session).await,
                }
            }
        }
    })
}

fn begin_action(mut session: Signal<Session>) {
    let mut s = session.write();
    s.loading = true;
    s.error = None;
}

fn current_account(mut session: Signal<Session>) -> Option<WalletAccount> {
    let account = session.read().account().cloned();
    if account.is_none() {
        session.write().error = Some("Wallet not connected".into());
    }
    account
}

async fn adopt_existing(service: &CapyService, mut session: Signal<Session>) {
    match petra::existing_account().await {
        Ok(Some(raw)) => {
            let account = service.connect(raw);
            tracing::info!("adopted existing wallet session for {}", account.address);
            session.write().connection.complete(account.clone());
            load_pairing(service, session, &account).await;
        }
        Ok(None) => {}
        Err(err) => tracing::info!("no existing wallet session: {err}"),
    }
}

async fn connect(service: &CapyService, mut session: Signal<Session>) {
    {
        let mut s = session.write();
        s.loading = true;
        s.error = None;
        s.connection.begin();
    }

    match petra::connect().await {
        Ok(raw) => {
            let account = service.connect(raw);
            session.write().connection.complete(account.clone());
            load_pairing(service, session, &account).await;
        }
        Err(err) => {
            let message = err.to_string();
            tracing::error!("wallet connection failed: {message}");
            let mut s = session.write();
            s.connection.fail(message.clone());
            s.error = Some(message);
        }
    }
    session.write().loading = false;
}

async fn disconnect(mut session: Signal<Session>) {
    session.write().loading = true;
    if let Err(err) = petra::disconnect().await {
        tracing::warn!("wallet disconnect failed: {err}");
    }
    // Reset everything, including pairing and any sticky error.
    session.set(Session::default());
}

async fn send_invitation(service: &CapyService, mut session: Signal<Session>, to: &str) {
    let Some(account) = current_account(session) else {
        return;
    };
    begin_action(session);

    match service.send_invitation(&account, to).await {
        Ok(invitation) => {
            session.write().pairing = Pairing::InvitationSent { to: invitation.to };
        }
        Err(err) => {
            session.write().error = Some(format!("Failed to send invitation: {err}"));
        }
    }
    session.write().loading = false;
}

async fn accept_invitation(service: &CapyService, mut session: Signal<Session>, invitation_id: u64) {
    let Some(account) = current_account(session) else {
        return;
    };
    begin_action(session);

    match service.accept_invitation(&account, invitation_id).await {
        Ok(pair) => {
            session.write().pairing = Pairing::Paired { pair };
        }
        Err(err) => {
            session.write().error = Some(format!("Failed to accept invitation: {err}"));
        }
    }
    session.write().loading = false;
}

enum PetCare {
    Feed,
    Love,
}

async fn pet_care(service: &CapyService, mut session: Signal<Session>, care: PetCare) {
    let Some(account) = current_account(session) else {
        return;
    };
    let pair_id = session.read().pairing.pair().map(|pair| pair.id);
    let Some(pair_id) = pair_id else {
        session.write().error =
            Some("No co-parent pair found. Please accept an invitation first.".into());
        return;
    };
    begin_action(session);

    let result = match care {
        PetCare::Feed => service.feed_pet(&account, pair_id).await,
        PetCare::Love => service.show_love_to_pet(&account, pair_id).await,
    };
    if let Err(err) = result {
        let what = match care {
            PetCare::Feed => "feed pet",
            PetCare::Love => "show love to pet",
        };
        session.write().error = Some(format!("Failed to {what}: {err}"));
    }
    session.write().loading = false;
}

async fn refresh(service: &CapyService, mut session: Signal<Session>) {
    let Some(account) = current_account(session) else {
        return;
    };
    begin_action(session);
    load_pairing(service, session, &account).await;
    session.write().loading = false;
}

/// Re-read the caller's pairs from the ledger and derive the pairing state.
/// The "not initialized" condition is expected for new users and stays out
/// of the error field.
async fn load_pairing(service: &CapyService, mut session: Signal<Session>, account: &WalletAccount) {
    match service.co_parent_pairs(account).await {
        Ok(pairs) => {
            let mut s = session.write();
            match pairs.into_iter().next() {
                Some(pair) => s.pairing = Pairing::Paired { pair },
                // Keep a locally-known InvitationSent while waiting for the
                // recipient; otherwise there is simply no pairing yet.
                None if !s.pairing.invitation_sent() => s.pairing = Pairing::Unpaired,
                None => {}
            }
        }
        Err(err) if err.is_not_initialized() => {
            tracing::info!("no co-parent data yet: {err}");
        }
        Err(err) => {
            session.write().error = Some(format!("Failed to refresh co-parent data: {err}"));
        }
    }
}
