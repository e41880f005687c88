//! Builders for the two wire shapes the node understands: entry-function
//! payloads (signed and submitted by the wallet extension) and view
//! requests (side-effect-free reads).
//!
//! u64 arguments are encoded as JSON strings per the node's conventions.

use serde::Serialize;
use serde_json::{json, Value};

use crate::consts::qualified;
use crate::types::GameKind;

/// Payload handed to the wallet extension's `signAndSubmitTransaction`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EntryPayload {
    #[serde(rename = "type")]
    pub payload_type: &'static str,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Value>,
}

impl EntryPayload {
    fn new(contract: &str, name: &str, arguments: Vec<Value>) -> Self {
        Self {
            payload_type: "entry_function_payload",
            function: qualified(contract, name),
            type_arguments: Vec::new(),
            arguments,
        }
    }
}

pub fn initialize(contract: &str) -> EntryPayload {
    EntryPayload::new(contract, "initialize", vec![])
}

pub fn send_invitation(contract: &str, to: &str) -> EntryPayload {
    EntryPayload::new(contract, "send_invitation", vec![json!(to)])
}

pub fn accept_invitation(contract: &str, invitation_id: u64) -> EntryPayload {
    EntryPayload::new(
        contract,
        "accept_invitation",
        vec![json!(invitation_id.to_string())],
    )
}

pub fn feed_pet(contract: &str, pair_id: u64) -> EntryPayload {
    EntryPayload::new(contract, "feed_pet", vec![json!(pair_id.to_string())])
}

pub fn show_love_to_pet(contract: &str, pair_id: u64) -> EntryPayload {
    EntryPayload::new(
        contract,
        "show_love_to_pet",
        vec![json!(pair_id.to_string())],
    )
}

pub fn purchase_item(contract: &str, item_id: u64) -> EntryPayload {
    EntryPayload::new(contract, "purchase_item", vec![json!(item_id.to_string())])
}

pub fn claim_game_reward(contract: &str, game: GameKind, score: u64) -> EntryPayload {
    EntryPayload::new(
        contract,
        "claim_game_reward",
        vec![json!(game.wire_name()), json!(score.to_string())],
    )
}

pub fn claim_pet_nft(contract: &str, pair_id: u64) -> EntryPayload {
    EntryPayload::new(contract, "claim_pet_nft", vec![json!(pair_id.to_string())])
}

/// Body of a POST to the node's `/v1/view` endpoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViewRequest {
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Value>,
}

impl ViewRequest {
    fn new(contract: &str, name: &str, arguments: Vec<Value>) -> Self {
        Self {
            function: qualified(contract, name),
            type_arguments: Vec::new(),
            arguments,
        }
    }
}

pub fn user_invitations(contract: &str, address: &str) -> ViewRequest {
    ViewRequest::new(contract, "get_user_invitations_view", vec![json!(address)])
}

pub fn invitation(contract: &str, invitation_id: u64) -> ViewRequest {
    ViewRequest::new(
        contract,
        "get_invitation_view",
        vec![json!(invitation_id.to_string())],
    )
}

pub fn user_pairs(contract: &str, address: &str) -> ViewRequest {
    ViewRequest::new(contract, "get_user_pairs_view", vec![json!(address)])
}

pub fn pair(contract: &str, pair_id: u64) -> ViewRequest {
    ViewRequest::new(contract, "get_pair_view", vec![json!(pair_id.to_string())])
}

pub fn user_inventory(contract: &str, address: &str) -> ViewRequest {
    ViewRequest::new(contract, "get_user_inventory_view", vec![json!(address)])
}

pub fn marketplace_item(contract: &str, item_id: u64) -> ViewRequest {
    ViewRequest::new(
        contract,
        "get_marketplace_item_view",
        vec![json!(item_id.to_string())],
    )
}

pub fn user_pet_nfts(contract: &str, address: &str) -> ViewRequest {
    ViewRequest::new(contract, "get_user_pet_nfts_view", vec![json!(address)])
}

pub fn pet_nft(contract: &str, pair_id: u64) -> ViewRequest {
    ViewRequest::new(
        contract,
        "get_pet_nft_view",
        vec![json!(pair_id.to_string())],
    )
}

pub fn nft_collection_info(contract: &str) -> ViewRequest {
    ViewRequest::new(contract, "get_nft_collection_info_view", vec![])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_payload_wire_shape() {
        let payload = send_invitation("0xcafe", "0xabc");
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["type"], "entry_function_payload");
        assert_eq!(value["function"], "0xcafe::capy::send_invitation");
        assert_eq!(value["type_arguments"], json!([]));
        assert_eq!(value["arguments"], json!(["0xabc"]));
    }

    #[test]
    fn numeric_arguments_are_strings() {
        let payload = feed_pet("0xcafe", 42);
        assert_eq!(payload.arguments, vec![json!("42")]);

        let payload = claim_game_reward("0xcafe", GameKind::Puzzle, 120);
        assert_eq!(payload.arguments, vec![json!("puzzle"), json!("120")]);
    }

    #[test]
    fn view_request_targets_the_view_function() {
        let request = invitation("0xcafe", 8);
        assert_eq!(request.function, "0xcafe::capy::get_invitation_view");
        assert_eq!(request.arguments, vec![json!("8")]);

        let request = nft_collection_info("0xcafe");
        assert!(request.arguments.is_empty());
    }
}
