//! Session state machines.
//!
//! Connection status is a single tagged union: every derived flag the UI
//! needs comes from the current variant, so there is exactly one source of
//! truth for "connected" instead of several overlapping signals.

use crate::types::{CoParentPair, WalletAccount};

/// Wallet connection lifecycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Connection {
    #[default]
    Disconnected,
    Connecting,
    Connected {
        account: WalletAccount,
    },
    Failed {
        error: String,
    },
}

impl Connection {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self, Self::Connecting)
    }

    pub fn account(&self) -> Option<&WalletAccount> {
        match self {
            Self::Connected { account } => Some(account),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// A connection attempt is starting.
    pub fn begin(&mut self) {
        *self = Self::Connecting;
    }

    /// The wallet reported an account; the session is now connected.
    pub fn complete(&mut self, account: WalletAccount) {
        *self = Self::Connected { account };
    }

    /// The attempt failed; the error sticks until the next attempt.
    pub fn fail(&mut self, error: impl Into<String>) {
        *self = Self::Failed {
            error: error.into(),
        };
    }

    pub fn reset(&mut self) {
        *self = Self::Disconnected;
    }
}

/// Invitation / co-parenting progress within a connected session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Pairing {
    #[default]
    Unpaired,
    InvitationSent {
        to: String,
    },
    Paired {
        pair: CoParentPair,
    },
}

impl Pairing {
    pub fn is_paired(&self) -> bool {
        matches!(self, Self::Paired { .. })
    }

    pub fn invitation_sent(&self) -> bool {
        matches!(self, Self::InvitationSent { .. })
    }

    pub fn pair(&self) -> Option<&CoParentPair> {
        match self {
            Self::Paired { pair } => Some(pair),
            _ => None,
        }
    }

    /// The co-parent's address, when paired and `me` is one of the parents.
    pub fn co_parent_of(&self, me: &str) -> Option<&str> {
        self.pair().and_then(|pair| pair.co_parent(me))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountType;

    fn account(address: &str) -> WalletAccount {
        WalletAccount {
            address: address.into(),
            public_key: "0xkey".into(),
            account_type: AccountType::Ed25519,
        }
    }

    #[test]
    fn connect_happy_path() {
        let mut connection = Connection::default();
        assert!(!connection.is_connected());

        connection.begin();
        assert!(connection.is_connecting());
        assert!(!connection.is_connected());

        connection.complete(account("0xme"));
        assert!(connection.is_connected());
        assert_eq!(connection.account().unwrap().address, "0xme");
        assert!(connection.error().is_none());
    }

    #[test]
    fn failure_keeps_the_error_and_is_not_connected() {
        let mut connection = Connection::default();
        connection.begin();
        connection.fail("Petra wallet not found");
        assert!(!connection.is_connected());
        assert_eq!(connection.error(), Some("Petra wallet not found"));

        // A new attempt clears the sticky error.
        connection.begin();
        assert!(connection.error().is_none());
    }

    #[test]
    fn reset_returns_to_disconnected() {
        let mut connection = Connection::default();
        connection.complete(account("0xme"));
        connection.reset();
        assert_eq!(connection, Connection::Disconnected);
    }

    #[test]
    fn pairing_progress() {
        let mut pairing = Pairing::default();
        assert!(!pairing.is_paired());
        assert!(!pairing.invitation_sent());

        pairing = Pairing::InvitationSent { to: "0xyou".into() };
        assert!(pairing.invitation_sent());
        assert!(!pairing.is_paired());

        let pair = CoParentPair {
            id: 3,
            parent1: "0xme".into(),
            parent2: "0xyou".into(),
            pet_created: true,
            created_at: 1,
        };
        pairing = Pairing::Paired { pair };
        assert!(pairing.is_paired());
        assert_eq!(pairing.co_parent_of("0xme"), Some("0xyou"));
        assert_eq!(pairing.co_parent_of("0xother"), None);
    }
}
