//! Session signature verification.
//!
//! # Responsibilities
//! - Validate required envelope fields before any RPC activity
//! - Recover the signer over the EIP-191 personal-sign digest
//! - Fall back to an EIP-1271 contract-wallet check on mismatch
//! - Enforce message expiration and the nonce echo check

use alloy::primitives::{eip191_hash_message, hex, Address, Signature};
use alloy::sol;
use chrono::{DateTime, Utc};

use crate::config::ProviderConfig;
use crate::provider::{ChainId, SessionProvider};
use crate::session::message::SessionMessage;
use crate::session::types::{SessionError, SessionResult};

sol! {
    /// Minimal EIP-1271 surface. The wallets this service was written
    /// against declare a plain `bool` return rather than the standard
    /// `bytes4` magic value.
    #[sol(rpc)]
    contract Eip1271Wallet {
        function isValidSignature(bytes32 _message, bytes _signature) public view returns (bool);
    }
}

/// Verify a wallet-signed session message.
///
/// Succeeds iff the recovered signer matches the claimed address (directly,
/// or via the contract-wallet check) and the message has not expired.
pub async fn verify_session(
    message: &SessionMessage,
    config: &ProviderConfig,
) -> SessionResult<()> {
    let input_nonce = message.nonce().cloned();

    let verified = match validate(message, config).await {
        Ok(verified) => verified,
        Err(e) => {
            tracing::warn!(error = %e, "session verification failed");
            return Err(e);
        }
    };

    // The nonce echoed back by validation must equal the caller's nonce.
    if verified.nonce() != input_nonce.as_ref() {
        tracing::warn!("session verification failed: nonce mismatch");
        return Err(SessionError::NonceMismatch);
    }

    tracing::info!(
        address = verified.address().unwrap_or_default(),
        "session verified"
    );
    Ok(())
}

/// Core validation pipeline; returns the verified envelope.
async fn validate<'a>(
    message: &'a SessionMessage,
    config: &ProviderConfig,
) -> SessionResult<&'a SessionMessage> {
    let signature_hex = message.signature();
    let address_hex = message.address();

    let mut missing = Vec::new();
    if signature_hex.is_none() {
        missing.push("signature");
    }
    if address_hex.is_none() {
        missing.push("address");
    }
    let (Some(signature_hex), Some(address_hex)) = (signature_hex, address_hex) else {
        return Err(SessionError::MalformedSession { missing });
    };

    let chain_id = message.chain_id().ok_or_else(|| {
        SessionError::Malformed("`chainId` missing or not an integer".to_string())
    })?;
    let chain = ChainId::from_id(chain_id)?;
    let provider = SessionProvider::connect(chain, config).await?;

    let claimed: Address = address_hex.parse().map_err(|_| {
        SessionError::Malformed(format!("`address` is not a valid address: {}", address_hex))
    })?;

    let payload = message.signed_payload();
    let recovered = recover_signer(&payload, signature_hex);
    let direct_match = recovered.as_ref().is_ok_and(|addr| *addr == claimed);

    if !direct_match {
        // EIP-1271: the claimed address may be a contract wallet.
        let accepted = is_valid_contract_signature(message, claimed, &provider).await?;
        if !accepted {
            let recovered = match &recovered {
                Ok(addr) => addr.to_string(),
                Err(_) => "unrecoverable".to_string(),
            };
            return Err(SessionError::InvalidSignature {
                recovered,
                claimed: claimed.to_string(),
            });
        }
    }

    if let Some(expiry) = message.expiration_time() {
        check_expiration(expiry)?;
    }

    Ok(message)
}

/// Recover the signer address from the signed payload text and a hex-encoded
/// 65-byte ECDSA signature, over the EIP-191 personal-sign digest.
pub(crate) fn recover_signer(payload: &str, signature_hex: &str) -> SessionResult<Address> {
    let bytes = hex::decode(signature_hex)
        .map_err(|e| SessionError::Malformed(format!("signature is not valid hex: {}", e)))?;
    let signature = Signature::try_from(bytes.as_slice())
        .map_err(|e| SessionError::Malformed(format!("signature: {}", e)))?;
    signature
        .recover_address_from_msg(payload.as_bytes())
        .map_err(|e| SessionError::Malformed(format!("signature recovery: {}", e)))
}

/// Ask the contract at the claimed address whether it accepts the signature.
///
/// The digest is taken over the full envelope including the `signature`
/// field, which is what the deployed wallets expect; the primary recovery
/// path hashes the envelope without it.
pub(crate) async fn is_valid_contract_signature(
    message: &SessionMessage,
    wallet: Address,
    provider: &SessionProvider,
) -> SessionResult<bool> {
    let Some(signature_hex) = message.signature() else {
        return Ok(false);
    };
    let signature_bytes = hex::decode(signature_hex)
        .map_err(|e| SessionError::Malformed(format!("signature is not valid hex: {}", e)))?;

    let digest = eip191_hash_message(message.canonical_json());
    let contract = Eip1271Wallet::new(wallet, provider.provider().clone());
    contract
        .isValidSignature(digest, signature_bytes.into())
        .call()
        .await
        .map_err(|e| SessionError::Rpc(e.to_string()))
}

/// Fail unless the expiration timestamp is strictly in the future.
pub(crate) fn check_expiration(expiry: &str) -> SessionResult<()> {
    let expires_at = DateTime::parse_from_rfc3339(expiry)
        .map_err(|e| {
            SessionError::Malformed(format!("`expirationTime` is not ISO-8601: {}", e))
        })?
        .with_timezone(&Utc);

    if Utc::now() >= expires_at {
        return Err(SessionError::Expired {
            expired_at: expiry.to_string(),
        });
    }
    Ok(())
}
