//! Display helpers shared by the app and the CLI.

use crate::types::AccountType;

/// `"<first 6>...<last 4>"` for addresses long enough to shorten; empty
/// string otherwise.
pub fn shorten_address(address: &str) -> String {
    if address.len() < 10 {
        return String::new();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

/// CSS class used to tint an account-type badge.
pub fn account_type_color(account_type: AccountType) -> &'static str {
    match account_type {
        AccountType::Ed25519 => "text-primary",
        AccountType::Keyless => "text-secondary",
        AccountType::Secp256k1 => "text-accent",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortens_long_addresses() {
        assert_eq!(shorten_address("0x1234567890abcdef"), "0x1234...cdef");
        // Exactly at the threshold.
        assert_eq!(shorten_address("0x12345678"), "0x1234...5678");
    }

    #[test]
    fn short_input_yields_empty() {
        assert_eq!(shorten_address(""), "");
        assert_eq!(shorten_address("0x1234"), "");
        assert_eq!(shorten_address("123456789"), "");
    }

    #[test]
    fn account_colors() {
        assert_eq!(account_type_color(AccountType::Ed25519), "text-primary");
        assert_eq!(account_type_color(AccountType::Keyless), "text-secondary");
        assert_eq!(account_type_color(AccountType::Secp256k1), "text-accent");
    }
}
