//! Petra wallet interop.
//!
//! The extension injects a global `aptos` object; everything here goes
//! through `Reflect` so a missing or outdated extension degrades into a
//! typed error instead of a panic.

use capy_api::client::{RawAccount, WalletGateway};
use capy_api::error::CapyError;
use capy_api::payload::EntryPayload;

/// [`WalletGateway`] over the injected `window.aptos` object.
pub struct PetraWallet;

#[cfg(feature = "web")]
mod web {
    use super::*;
    use js_sys::{Function, Promise, Reflect};
    use wasm_bindgen::{JsCast, JsValue};

    pub(super) fn injected_wallet() -> Result<JsValue, CapyError> {
        let window = web_sys::window().ok_or_else(|| CapyError::Rpc("no window".into()))?;
        let aptos = Reflect::get(&window, &JsValue::from_str("aptos"))
            .map_err(|_| CapyError::WalletMissing)?;
        if aptos.is_undefined() || aptos.is_null() {
            return Err(CapyError::WalletMissing);
        }
        Ok(aptos)
    }

    pub(super) async fn call_method(
        target: &JsValue,
        name: &str,
        arg: Option<&JsValue>,
    ) -> Result<JsValue, CapyError> {
        let method = Reflect::get(target, &JsValue::from_str(name))
            .map_err(|_| CapyError::Rpc(format!("wallet method {name} missing")))?;
        let method: Function = method
            .dyn_into()
            .map_err(|_| CapyError::Rpc(format!("wallet method {name} is not callable")))?;

        let result = match arg {
            Some(arg) => method.call1(target, arg),
            None => method.call0(target),
        }
        .map_err(|e| CapyError::classify(format!("{name} call failed: {e:?}")))?;

        let promise: Promise = result
            .dyn_into()
            .map_err(|_| CapyError::Rpc(format!("{name} did not return a promise")))?;
        wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map_err(|e| CapyError::classify(format!("{name} rejected: {e:?}")))
    }

    /// Read a string field; key material sometimes arrives as an object
    /// exposing only `toString`.
    pub(super) fn string_field(value: &JsValue, name: &str) -> Result<String, CapyError> {
        let field = Reflect::get(value, &JsValue::from_str(name))
            .map_err(|_| CapyError::Rpc(format!("no {name} in wallet response")))?;
        if let Some(text) = field.as_string() {
            return Ok(text);
        }
        let to_string = Reflect::get(&field, &JsValue::from_str("toString"))
            .map_err(|_| CapyError::Rpc(format!("{name} has no toString")))?;
        let to_string: Function = to_string
            .dyn_into()
            .map_err(|_| CapyError::Rpc(format!("{name}.toString is not callable")))?;
        to_string
            .call0(&field)
            .ok()
            .and_then(|v| v.as_string())
            .ok_or_else(|| CapyError::Rpc(format!("{name} is not a string")))
    }

    pub(super) fn raw_account(value: &JsValue) -> Result<RawAccount, CapyError> {
        Ok(RawAccount {
            address: string_field(value, "address")?,
            public_key: string_field(value, "publicKey")?,
        })
    }
}

/// Prompt the extension for a connection and return the approved account.
#[cfg(feature = "web")]
pub async fn connect() -> Result<RawAccount, CapyError> {
    let wallet = web::injected_wallet()?;
    let response = web::call_method(&wallet, "connect", None).await?;
    web::raw_account(&response)
}

#[cfg(feature = "web")]
pub async fn disconnect() -> Result<(), CapyError> {
    let wallet = web::injected_wallet()?;
    web::call_method(&wallet, "disconnect", None).await.map(|_| ())
}

/// Adopt an already-approved extension session without prompting. `None`
/// when no extension is injected or no session exists.
#[cfg(feature = "web")]
pub async fn existing_account() -> Result<Option<RawAccount>, CapyError> {
    let wallet = match web::injected_wallet() {
        Ok(wallet) => wallet,
        Err(_) => return Ok(None),
    };
    let connected = web::call_method(&wallet, "isConnected", None)
        .await?
        .as_bool()
        .unwrap_or(false);
    if !connected {
        return Ok(None);
    }
    let response = web::call_method(&wallet, "account", None).await?;
    Ok(Some(web::raw_account(&response)?))
}

#[cfg(feature = "web")]
impl WalletGateway for PetraWallet {
    async fn is_connected(&self) -> Result<bool, CapyError> {
        let wallet = web::injected_wallet()?;
        Ok(web::call_method(&wallet, "isConnected", None)
            .await?
            .as_bool()
            .unwrap_or(false))
    }

    async fn account(&self) -> Result<RawAccount, CapyError> {
        let wallet = web::injected_wallet()?;
        let response = web::call_method(&wallet, "account", None).await?;
        web::raw_account(&response)
    }

    async fn sign_and_submit(&self, payload: &EntryPayload) -> Result<String, CapyError> {
        let wallet = web::injected_wallet()?;
        let json = serde_json::to_string(payload)
            .map_err(|e| CapyError::Rpc(format!("payload encode failed: {e}")))?;
        let js_payload = js_sys::JSON::parse(&json)
            .map_err(|e| CapyError::Rpc(format!("payload parse failed: {e:?}")))?;
        let response = web::call_method(&wallet, "signAndSubmitTransaction", Some(&js_payload))
            .await?;
        web::string_field(&response, "hash")
    }
}

#[cfg(not(feature = "web"))]
pub async fn connect() -> Result<RawAccount, CapyError> {
    Err(CapyError::Rpc("Petra wallet only available in web mode".into()))
}

#[cfg(not(feature = "web"))]
pub async fn disconnect() -> Result<(), CapyError> {
    Err(CapyError::Rpc("Petra wallet only available in web mode".into()))
}

#[cfg(not(feature = "web"))]
pub async fn existing_account() -> Result<Option<RawAccount>, CapyError> {
    Ok(None)
}

#[cfg(not(feature = "web"))]
impl WalletGateway for PetraWallet {
    async fn is_connected(&self) -> Result<bool, CapyError> {
        Ok(false)
    }

    async fn account(&self) -> Result<RawAccount, CapyError> {
        Err(CapyError::Rpc("Petra wallet only available in web mode".into()))
    }

    async fn sign_and_submit(&self, _payload: &EntryPayload) -> Result<String, CapyError> {
        Err(CapyError::Rpc("Petra wallet only available in web mode".into()))
    }
}
