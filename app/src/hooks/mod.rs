mod node;
mod petra;
mod service;
mod use_inventory;
mod use_invitations;
mod use_pets;

pub use node::RestLedger;
pub use petra::PetraWallet;
pub use service::{client, use_session_service, CapyService, SessionAction};
pub use use_inventory::{load_inventory, use_inventory, InventoryState};
pub use use_invitations::{use_invitations, InvitationsState};
pub use use_pets::{load_pets, use_pets, PetsState};
