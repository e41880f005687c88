//! Pending-invitation polling.

use std::cell::Cell;
use std::rc::Rc;

use capy_api::types::Invitation;
use dioxus::prelude::*;

use super::service;
use crate::Session;

/// Poll cadence while connected and unpaired.
const POLL_INTERVAL_MS: u32 = 5_000;

#[derive(Clone, Debug, Default)]
pub struct InvitationsState {
    pub pending: Vec<Invitation>,
    pub loading: bool,
}

pub fn use_invitations() -> Signal<InvitationsState> {
    let invitations = use_context::<Signal<InvitationsState>>();
    let session = use_context::<Signal<Session>>();

    // Track if polling has started to prevent multiple loops
    let polling_started = use_hook(|| Rc::new(Cell::new(false)));

    use_effect(move || {
        if !polling_started.get() {
            polling_started.set(true);
            spawn(poll_invitations(invitations, session));
        }
    });

    invitations
}

async fn poll_invitations(mut invitations: Signal<InvitationsState>, session: Signal<Session>) {
    let client = service::client();
    loop {
        let account = session.read().account().cloned();
        let paired = session.read().pairing.is_paired();

        if let (Some(account), false) = (account, paired) {
            match client.pending_invitations(&account).await {
                Ok(pending) => {
                    let mut state = invitations.write();
                    state.pending = pending;
                    state.loading = false;
                }
                Err(err) => {
                    tracing::error!("invitation fetch error: {err}");
                    invitations.write().loading = false;
                }
            }
        }

        gloo_timers::future::TimeoutFuture::new(POLL_INTERVAL_MS).await;
    }
}
