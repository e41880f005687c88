use thiserror::Error;

/// Failure taxonomy for wallet and ledger interactions.
///
/// Writes are never silently swallowed: the adapter maps every rejection
/// onto one of these variants, preserving the original message. Read
/// failures for auxiliary records are the caller's business (listing code
/// logs and skips them).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapyError {
    #[error("Petra wallet not found. Please install the Petra wallet extension.")]
    WalletMissing,

    #[error("smart contract not deployed; set CAPY_CONTRACT_ADDRESS to the deployed address")]
    NotDeployed,

    #[error("signature request declined: {0}")]
    Declined(String),

    #[error("account not initialized: {0}")]
    NotInitialized(String),

    #[error("account already initialized")]
    AlreadyInitialized,

    #[error("item not found: {0}")]
    ItemNotFound(String),

    #[error("item already owned: {0}")]
    AlreadyOwned(String),

    #[error("no pending invitation found")]
    NoInvitation,

    #[error("no co-parent pair found")]
    NoPair,

    #[error("transaction timed out: {0}")]
    Timeout(String),

    #[error("transaction failed: {0}")]
    Transaction(String),

    #[error("ledger request failed: {0}")]
    Rpc(String),

    #[error("unexpected response shape: {0}")]
    Decode(String),
}

impl CapyError {
    /// Map a raw failure string from the wallet extension or the node onto
    /// the taxonomy. The contract signals preconditions through abort
    /// markers embedded in the VM status text.
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.contains("E_NOT_INITIALIZED") {
            Self::NotInitialized(message)
        } else if message.contains("E_ALREADY_INITIALIZED") {
            Self::AlreadyInitialized
        } else if message.contains("E_ITEM_NOT_FOUND") {
            Self::ItemNotFound(message)
        } else if message.contains("E_ALREADY_OWNED") {
            Self::AlreadyOwned(message)
        } else if message.contains("rejected") || message.contains("declined") {
            Self::Declined(message)
        } else {
            Self::Transaction(message)
        }
    }

    pub fn is_not_initialized(&self) -> bool {
        matches!(self, Self::NotInitialized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_abort_markers() {
        assert!(CapyError::classify("Move abort: E_NOT_INITIALIZED(0x1)").is_not_initialized());
        assert_eq!(
            CapyError::classify("E_ALREADY_INITIALIZED"),
            CapyError::AlreadyInitialized
        );
        assert!(matches!(
            CapyError::classify("abort E_ITEM_NOT_FOUND in capy"),
            CapyError::ItemNotFound(_)
        ));
        assert!(matches!(
            CapyError::classify("abort E_ALREADY_OWNED in capy"),
            CapyError::AlreadyOwned(_)
        ));
    }

    #[test]
    fn classifies_user_rejection() {
        assert!(matches!(
            CapyError::classify("The user rejected the request"),
            CapyError::Declined(_)
        ));
    }

    #[test]
    fn everything_else_is_a_transaction_failure() {
        let err = CapyError::classify("INSUFFICIENT_BALANCE_FOR_TRANSACTION_FEE");
        assert!(matches!(err, CapyError::Transaction(_)));
        assert!(err.to_string().contains("INSUFFICIENT_BALANCE"));
    }
}
