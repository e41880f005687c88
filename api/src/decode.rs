//! Decoding of ledger view responses.
//!
//! The node returns one JSON value per declared return type, but id fields
//! have been observed in several structural shapes across contract
//! revisions (bare number, numeric string, one-element wrapper array,
//! struct-like object exposing `inner`/`value`). [`parse_id`] is the single
//! normalization routine for all of them; record decoders are explicit
//! per-view mappings that fail hard on a wrong-shape response.

use serde_json::Value;

use crate::error::CapyError;
use crate::types::{
    CoParentPair, CollectionInfo, InventoryItem, Invitation, InvitationStatus, ItemKind, PetNft,
};

/// Normalize any known id shape to an integer. Returns `None` for empty
/// wrappers and shapes with no recoverable digits; never panics.
pub fn parse_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok().or_else(|| scan_digits(s)),
        Value::Array(items) => match items.as_slice() {
            [inner] => parse_id(inner),
            _ => None,
        },
        Value::Object(map) => map
            .get("inner")
            .or_else(|| map.get("value"))
            .and_then(parse_id)
            .or_else(|| scan_digits(&value.to_string())),
        _ => None,
    }
}

/// Best-effort scan for the first embedded digit run.
fn scan_digits(text: &str) -> Option<u64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Decode an id-list view return, discarding unparseable entries.
pub fn parse_id_list(value: &Value) -> Vec<u64> {
    match value {
        Value::Array(items) => items.iter().filter_map(parse_id).collect(),
        other => parse_id(other).into_iter().collect(),
    }
}

pub fn parse_u64(value: &Value) -> Result<u64, CapyError> {
    parse_id(value).ok_or_else(|| CapyError::Decode(format!("expected integer, got {value}")))
}

pub fn parse_bool(value: &Value) -> Result<bool, CapyError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) if s == "true" => Ok(true),
        Value::String(s) if s == "false" => Ok(false),
        other => Err(CapyError::Decode(format!("expected bool, got {other}"))),
    }
}

pub fn parse_address(value: &Value) -> Result<String, CapyError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(CapyError::Decode(format!("expected address, got {other}"))),
    }
}

/// Decode a byte-array return (`vector<u8>`) to text. The node renders
/// these as `0x`-prefixed hex; arrays of byte values and plain strings are
/// tolerated too.
pub fn decode_text(value: &Value) -> String {
    match value {
        Value::String(s) => match s.strip_prefix("0x") {
            Some(stripped) => hex::decode(stripped)
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                .unwrap_or_else(|_| s.clone()),
            None => s.clone(),
        },
        Value::Array(items) => {
            let bytes: Vec<u8> = items
                .iter()
                .filter_map(Value::as_u64)
                .map(|b| b as u8)
                .collect();
            String::from_utf8_lossy(&bytes).into_owned()
        }
        _ => String::new(),
    }
}

fn expect_len<'v>(values: &'v [Value], len: usize, what: &str) -> Result<&'v [Value], CapyError> {
    if values.len() < len {
        return Err(CapyError::Decode(format!(
            "{what} view returned {} values, expected {len}",
            values.len()
        )));
    }
    Ok(values)
}

/// `get_invitation_view` → `(from, to, status, timestamp)`.
pub fn invitation_from_view(id: u64, values: &[Value]) -> Result<Invitation, CapyError> {
    let values = expect_len(values, 4, "invitation")?;
    let status_code = parse_u64(&values[2])?;
    let status = InvitationStatus::from_code(status_code)
        .ok_or_else(|| CapyError::Decode(format!("unknown invitation status {status_code}")))?;
    Ok(Invitation {
        id: Some(id),
        from: parse_address(&values[0])?,
        to: parse_address(&values[1])?,
        status,
        timestamp: parse_u64(&values[3])?,
    })
}

/// `get_pair_view` → `(parent1, parent2, pet_created, created_at)`.
pub fn pair_from_view(id: u64, values: &[Value]) -> Result<CoParentPair, CapyError> {
    let values = expect_len(values, 4, "pair")?;
    Ok(CoParentPair {
        id,
        parent1: parse_address(&values[0])?,
        parent2: parse_address(&values[1])?,
        pet_created: parse_bool(&values[2])?,
        created_at: parse_u64(&values[3])?,
    })
}

/// `get_marketplace_item_view` →
/// `(name, item_type, price, description, image_url, available)`.
pub fn marketplace_item_from_view(id: u64, values: &[Value]) -> Result<InventoryItem, CapyError> {
    let values = expect_len(values, 6, "marketplace item")?;
    Ok(InventoryItem {
        id,
        name: decode_text(&values[0]),
        kind: ItemKind::from_code(parse_u64(&values[1])?),
        price: parse_u64(&values[2])?,
        description: decode_text(&values[3]),
        image_url: decode_text(&values[4]),
        available: parse_bool(&values[5])?,
    })
}

/// `get_pet_nft_view` →
/// `(owner, co_parent, name, description, uri, created_at, claimed)`.
pub fn pet_nft_from_view(pair_id: u64, values: &[Value]) -> Result<PetNft, CapyError> {
    let values = expect_len(values, 7, "pet NFT")?;
    Ok(PetNft {
        pair_id,
        owner: parse_address(&values[0])?,
        co_parent: parse_address(&values[1])?,
        name: decode_text(&values[2]),
        description: decode_text(&values[3]),
        metadata_uri: decode_text(&values[4]),
        created_at: parse_u64(&values[5])?,
        claimed: parse_bool(&values[6])?,
    })
}

/// `get_nft_collection_info_view` →
/// `(name, description, uri, total_supply, claimed_supply)`.
pub fn collection_info_from_view(values: &[Value]) -> Result<CollectionInfo, CapyError> {
    let values = expect_len(values, 5, "collection info")?;
    Ok(CollectionInfo {
        name: decode_text(&values[0]),
        description: decode_text(&values[1]),
        uri: decode_text(&values[2]),
        total_supply: parse_u64(&values[3])?,
        claimed_supply: parse_u64(&values[4])?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_id_accepts_every_known_shape() {
        assert_eq!(parse_id(&json!(8)), Some(8));
        assert_eq!(parse_id(&json!("8")), Some(8));
        assert_eq!(parse_id(&json!(" 8 ")), Some(8));
        assert_eq!(parse_id(&json!([8])), Some(8));
        assert_eq!(parse_id(&json!(["8"])), Some(8));
        assert_eq!(parse_id(&json!({"inner": 8})), Some(8));
        assert_eq!(parse_id(&json!({"value": "8"})), Some(8));
        assert_eq!(parse_id(&json!({"inner": [8]})), Some(8));
    }

    #[test]
    fn parse_id_scans_embedded_digits_as_a_last_resort() {
        assert_eq!(parse_id(&json!("inv_42")), Some(42));
        assert_eq!(parse_id(&json!({"handle": "id-7-of-9"})), Some(7));
    }

    #[test]
    fn parse_id_rejects_hopeless_shapes() {
        assert_eq!(parse_id(&json!([])), None);
        assert_eq!(parse_id(&json!([1, 2])), None);
        assert_eq!(parse_id(&json!({"other": true})), None);
        assert_eq!(parse_id(&json!(null)), None);
        assert_eq!(parse_id(&json!("garbage")), None);
    }

    #[test]
    fn id_lists_skip_unparseable_entries() {
        let ids = parse_id_list(&json!(["7", 8, [9], {"inner": "10"}, "junk", []]));
        assert_eq!(ids, vec![7, 8, 9, 10]);
        assert_eq!(parse_id_list(&json!("3")), vec![3]);
    }

    #[test]
    fn decodes_hex_and_byte_array_text() {
        assert_eq!(decode_text(&json!("0x43617079")), "Capy");
        assert_eq!(decode_text(&json!([67, 97, 112, 121])), "Capy");
        assert_eq!(decode_text(&json!("plain")), "plain");
        assert_eq!(decode_text(&json!(null)), "");
    }

    #[test]
    fn decodes_an_invitation_record() {
        let values = vec![json!("0xaaa"), json!("0xbbb"), json!("0"), json!("1700000000")];
        let invitation = invitation_from_view(8, &values).unwrap();
        assert_eq!(invitation.id, Some(8));
        assert_eq!(invitation.from, "0xaaa");
        assert_eq!(invitation.to, "0xbbb");
        assert_eq!(invitation.status, InvitationStatus::Pending);
        assert_eq!(invitation.timestamp, 1_700_000_000);
    }

    #[test]
    fn rejects_short_records() {
        assert!(invitation_from_view(1, &[json!("0xaaa")]).is_err());
        assert!(collection_info_from_view(&[]).is_err());
    }

    #[test]
    fn decodes_a_marketplace_item() {
        let values = vec![
            json!("0x46697368"),
            json!("1"),
            json!("8"),
            json!("0x44656c6963696f7573"),
            json!("0x2f666973682e706e67"),
            json!(true),
        ];
        let item = marketplace_item_from_view(3, &values).unwrap();
        assert_eq!(item.name, "Fish");
        assert_eq!(item.kind, ItemKind::Food);
        assert_eq!(item.price, 8);
        assert_eq!(item.description, "Delicious");
        assert_eq!(item.image_url, "/fish.png");
        assert!(item.available);
    }

    #[test]
    fn decodes_collection_info() {
        let values = vec![
            json!("0x43415059"),
            json!("0x50657473"),
            json!("https://capy.pet/collection"),
            json!("12"),
            json!("5"),
        ];
        let info = collection_info_from_view(&values).unwrap();
        assert_eq!(info.name, "CAPY");
        assert_eq!(info.total_supply, 12);
        assert_eq!(info.claimed_supply, 5);
    }
}
