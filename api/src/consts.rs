/// Deployed contract address on Aptos testnet. Binaries may override it
/// through their own env-style configuration.
pub const DEFAULT_CONTRACT_ADDRESS: &str =
    "0x36c37bf5fa363357720f8b231afc1d736d361832d61ff6bee66718001b7c6ede";

/// Aptos testnet fullnode REST endpoint.
pub const DEFAULT_NODE_URL: &str = "https://fullnode.testnet.aptoslabs.com";

/// Move module that hosts every entry and view function we call.
pub const MODULE: &str = "capy";

/// Per-user resource created by `initialize`. Its presence is the
/// initialization probe used before every write.
pub const DATA_RESOURCE: &str = "CapyData";

/// Superficial "looks deployed" check: not the placeholder address and long
/// enough to be a full 32-byte account address.
pub fn contract_is_deployed(address: &str) -> bool {
    address != "0x123" && address.len() >= 60
}

/// Fully-qualified `<address>::capy::<name>` function id.
pub fn qualified(contract: &str, name: &str) -> String {
    format!("{contract}::{MODULE}::{name}")
}

/// Fully-qualified type of the per-user data resource.
pub fn data_resource_type(contract: &str) -> String {
    format!("{contract}::{MODULE}::{DATA_RESOURCE}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deployed_check_rejects_placeholder() {
        assert!(!contract_is_deployed("0x123"));
        assert!(!contract_is_deployed("0xabc"));
        assert!(contract_is_deployed(DEFAULT_CONTRACT_ADDRESS));
    }

    #[test]
    fn qualified_names() {
        assert_eq!(qualified("0xcafe", "feed_pet"), "0xcafe::capy::feed_pet");
        assert_eq!(data_resource_type("0xcafe"), "0xcafe::capy::CapyData");
    }
}
