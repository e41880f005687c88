use serde::{Deserialize, Serialize};

/// Key scheme of a connected account, as reported by the wallet adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    #[default]
    Ed25519,
    Keyless,
    Secp256k1,
}

impl AccountType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ed25519 => "Ed25519",
            Self::Keyless => "Keyless",
            Self::Secp256k1 => "Secp256k1",
        }
    }
}

/// The connected wallet account. At most one exists at a time; it is owned
/// by the session container and passed explicitly into every client call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAccount {
    pub address: String,
    pub public_key: String,
    pub account_type: AccountType,
}

/// Invitation status wire codes used by the contract views.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl InvitationStatus {
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(Self::Pending),
            1 => Some(Self::Accepted),
            2 => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// A co-parenting invitation. The authoritative copy lives on the ledger;
/// instances are reconstructed from view responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    /// `None` on a freshly sent invitation: the canonical id is only known
    /// once the record is read back from the ledger.
    pub id: Option<u64>,
    pub from: String,
    pub to: String,
    pub status: InvitationStatus,
    /// Ledger timestamp in microseconds; zero until read back.
    pub timestamp: u64,
}

/// An accepted co-parenting pair. Parents are addresses, not full accounts:
/// the ledger never reports a co-parent's public key and we do not invent
/// one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoParentPair {
    pub id: u64,
    pub parent1: String,
    pub parent2: String,
    pub pet_created: bool,
    pub created_at: u64,
}

impl CoParentPair {
    /// The other parent's address, when `me` is one of the two.
    pub fn co_parent(&self, me: &str) -> Option<&str> {
        if self.parent1 == me {
            Some(&self.parent2)
        } else if self.parent2 == me {
            Some(&self.parent1)
        } else {
            None
        }
    }

    pub fn involves(&self, address: &str) -> bool {
        self.parent1 == address || self.parent2 == address
    }
}

/// Item category wire codes used by the marketplace views.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Food,
    Toy,
    Furniture,
    Decoration,
    Unknown(u8),
}

impl ItemKind {
    pub fn from_code(code: u64) -> Self {
        match code {
            1 => Self::Food,
            2 => Self::Toy,
            3 => Self::Furniture,
            4 => Self::Decoration,
            other => Self::Unknown(other as u8),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Toy => "Toy",
            Self::Furniture => "Furniture",
            Self::Decoration => "Decoration",
            Self::Unknown(_) => "Unknown",
        }
    }
}

/// An item the user owns, decoded from the inventory views.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: u64,
    pub name: String,
    pub kind: ItemKind,
    /// Price in whole APT.
    pub price: u64,
    pub description: String,
    pub image_url: String,
    pub available: bool,
}

/// A pet NFT record keyed by the co-parent pair that minted it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetNft {
    pub pair_id: u64,
    pub owner: String,
    pub co_parent: String,
    pub name: String,
    pub description: String,
    pub metadata_uri: String,
    pub created_at: u64,
    pub claimed: bool,
}

/// Aggregate stats of the pet NFT collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    pub description: String,
    pub uri: String,
    pub total_supply: u64,
    pub claimed_supply: u64,
}

/// The three arcade mini-games, with the wire names the contract expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameKind {
    Target,
    Chase,
    Puzzle,
}

impl GameKind {
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Target => "target",
            Self::Chase => "chase",
            Self::Puzzle => "puzzle",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Target => "Target Practice",
            Self::Chase => "Chase Game",
            Self::Puzzle => "Puzzle Time",
        }
    }
}

/// Reward for a final game score, mirroring the contract rule:
/// 1 APT per 10 points, at least 1, at most 10.
pub fn game_reward(score: u64) -> u64 {
    (score / 10).clamp(1, 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reward_is_clamped() {
        assert_eq!(game_reward(0), 1);
        assert_eq!(game_reward(9), 1);
        assert_eq!(game_reward(10), 1);
        assert_eq!(game_reward(55), 5);
        assert_eq!(game_reward(100), 10);
        assert_eq!(game_reward(200), 10);
    }

    #[test]
    fn status_codes_round_trip() {
        assert_eq!(InvitationStatus::from_code(0), Some(InvitationStatus::Pending));
        assert_eq!(InvitationStatus::from_code(1), Some(InvitationStatus::Accepted));
        assert_eq!(InvitationStatus::from_code(2), Some(InvitationStatus::Rejected));
        assert_eq!(InvitationStatus::from_code(7), None);
    }

    #[test]
    fn co_parent_is_the_other_address() {
        let pair = CoParentPair {
            id: 1,
            parent1: "0xaaa".into(),
            parent2: "0xbbb".into(),
            pet_created: true,
            created_at: 0,
        };
        assert_eq!(pair.co_parent("0xaaa"), Some("0xbbb"));
        assert_eq!(pair.co_parent("0xbbb"), Some("0xaaa"));
        assert_eq!(pair.co_parent("0xccc"), None);
    }

    #[test]
    fn item_kind_codes() {
        assert_eq!(ItemKind::from_code(1), ItemKind::Food);
        assert_eq!(ItemKind::from_code(4), ItemKind::Decoration);
        assert_eq!(ItemKind::from_code(9), ItemKind::Unknown(9));
    }
}
