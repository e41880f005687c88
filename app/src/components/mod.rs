mod layout;
mod pet_view;
mod wallet_button;

pub use layout::Layout;
pub use pet_view::{PetMood, PetView};
pub use wallet_button::WalletButton;
