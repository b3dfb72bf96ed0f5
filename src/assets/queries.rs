//! The four asset query operations.
//!
//! Each operation builds its own provider from the message's chain id,
//! issues its contract reads sequentially, and returns token IDs as a
//! `Result` rather than a sentinel. Failures are logged and propagated.

use alloy::primitives::{Address, U256};

use crate::assets::contracts::{
    BabyMiceContract, CheethContract, MiceContract, BABY_MICE_CONTRACT, CHEETH_CONTRACT,
    MICE_CONTRACT,
};
use crate::assets::types::{AssetError, AssetResult};
use crate::config::ProviderConfig;
use crate::provider::{ChainId, SessionProvider};
use crate::session::SessionMessage;

/// Adult mice held by the message's address.
///
/// `balanceOf` cannot enumerate token IDs, so a non-empty holding is
/// reported as the placeholder `[1]`.
pub async fn get_adult_mice(
    message: &SessionMessage,
    config: &ProviderConfig,
) -> AssetResult<Vec<u64>> {
    tracing::debug!(address = message.address().unwrap_or_default(), "querying adult mice");
    fetch_adult_mice(message, config)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "adult mice query failed"))
}

async fn fetch_adult_mice(
    message: &SessionMessage,
    config: &ProviderConfig,
) -> AssetResult<Vec<u64>> {
    let (provider, owner) = prepare(message, config).await?;
    let contract = MiceContract::new(MICE_CONTRACT, provider.provider().clone());
    let balance = contract
        .balanceOf(owner)
        .call()
        .await
        .map_err(|e| AssetError::Rpc(e.to_string()))?;
    Ok(balance_to_placeholder(balance))
}

/// Baby mice held by the message's address, with the same placeholder
/// semantics as [`get_adult_mice`].
pub async fn get_baby_mice(
    message: &SessionMessage,
    config: &ProviderConfig,
) -> AssetResult<Vec<u64>> {
    tracing::debug!(address = message.address().unwrap_or_default(), "querying baby mice");
    fetch_baby_mice(message, config)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "baby mice query failed"))
}

async fn fetch_baby_mice(
    message: &SessionMessage,
    config: &ProviderConfig,
) -> AssetResult<Vec<u64>> {
    let (provider, owner) = prepare(message, config).await?;
    let contract = BabyMiceContract::new(BABY_MICE_CONTRACT, provider.provider().clone());
    let balance = contract
        .balanceOf(owner)
        .call()
        .await
        .map_err(|e| AssetError::Rpc(e.to_string()))?;
    Ok(balance_to_placeholder(balance))
}

/// Token IDs of mice the address has staked for cheeth grinding.
pub async fn get_cheeth_grinding_mice(
    message: &SessionMessage,
    config: &ProviderConfig,
) -> AssetResult<Vec<u64>> {
    tracing::debug!(
        address = message.address().unwrap_or_default(),
        "querying cheeth grinding mice"
    );
    fetch_cheeth_grinding_mice(message, config)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "cheeth grinding query failed"))
}

async fn fetch_cheeth_grinding_mice(
    message: &SessionMessage,
    config: &ProviderConfig,
) -> AssetResult<Vec<u64>> {
    let (provider, owner) = prepare(message, config).await?;
    let contract = CheethContract::new(CHEETH_CONTRACT, provider.provider().clone());
    let staked = contract
        .getTokensStaked(owner)
        .call()
        .await
        .map_err(|e| AssetError::Rpc(e.to_string()))?;
    to_token_ids(staked)
}

/// Parent token IDs across all of the address's breeding events, flattened
/// as `(parentId1, parentId2)` pairs in event order.
pub async fn get_breeding_mice(
    message: &SessionMessage,
    config: &ProviderConfig,
) -> AssetResult<Vec<u64>> {
    tracing::debug!(
        address = message.address().unwrap_or_default(),
        "querying breeding mice"
    );
    fetch_breeding_mice(message, config)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "breeding mice query failed"))
}

async fn fetch_breeding_mice(
    message: &SessionMessage,
    config: &ProviderConfig,
) -> AssetResult<Vec<u64>> {
    let (provider, owner) = prepare(message, config).await?;
    let contract = BabyMiceContract::new(BABY_MICE_CONTRACT, provider.provider().clone());

    let count = contract
        .getBreedingEventsLengthByAddress(owner)
        .call()
        .await
        .map_err(|e| AssetError::Rpc(e.to_string()))?;
    let count = u64::try_from(count).map_err(|_| AssetError::ValueOutOfRange(count.to_string()))?;

    // One read per event; the contract getter only exposes indexed access.
    let mut pairs = Vec::with_capacity(count as usize);
    for index in 0..count {
        let event = contract
            ._addressToBreedingEvents(owner, U256::from(index))
            .call()
            .await
            .map_err(|e| AssetError::Rpc(e.to_string()))?;
        pairs.push((event.parentId1, event.parentId2));
    }
    flatten_breeding_pairs(&pairs)
}

/// Resolve the message into a connected provider plus the holder address.
async fn prepare(
    message: &SessionMessage,
    config: &ProviderConfig,
) -> AssetResult<(SessionProvider, Address)> {
    let owner: Address = message
        .address()
        .ok_or_else(|| AssetError::InvalidAddress("missing `address` field".to_string()))?
        .parse()
        .map_err(|e| AssetError::InvalidAddress(format!("{}", e)))?;

    let chain_id = message
        .chain_id()
        .ok_or_else(|| AssetError::Malformed("`chainId` missing or not an integer".to_string()))?;
    let chain = ChainId::from_id(chain_id)?;
    let provider = SessionProvider::connect(chain, config).await?;
    Ok((provider, owner))
}

/// Map a balance to the placeholder holding list.
fn balance_to_placeholder(balance: U256) -> Vec<u64> {
    if balance.is_zero() {
        Vec::new()
    } else {
        vec![1]
    }
}

/// Flatten `(parentId1, parentId2)` pairs in order, checking each fits u64.
fn flatten_breeding_pairs(pairs: &[(U256, U256)]) -> AssetResult<Vec<u64>> {
    let mut ids = Vec::with_capacity(pairs.len() * 2);
    for &(parent1, parent2) in pairs {
        ids.push(to_token_id(parent1)?);
        ids.push(to_token_id(parent2)?);
    }
    Ok(ids)
}

fn to_token_ids(values: Vec<U256>) -> AssetResult<Vec<u64>> {
    values.into_iter().map(to_token_id).collect()
}

fn to_token_id(value: U256) -> AssetResult<u64> {
    u64::try_from(value).map_err(|_| AssetError::ValueOutOfRange(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_balance_mapping() {
        assert_eq!(balance_to_placeholder(U256::ZERO), Vec::<u64>::new());
        assert_eq!(balance_to_placeholder(U256::from(5)), vec![1]);
        assert_eq!(balance_to_placeholder(U256::from(1)), vec![1]);
    }

    #[test]
    fn test_breeding_pairs_flatten_in_event_order() {
        let pairs = [
            (U256::from(3), U256::from(4)),
            (U256::from(7), U256::from(9)),
        ];
        assert_eq!(flatten_breeding_pairs(&pairs).unwrap(), vec![3, 4, 7, 9]);
        assert!(flatten_breeding_pairs(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_token_id_out_of_range() {
        let result = to_token_ids(vec![U256::from(12), U256::MAX]);
        assert!(matches!(result, Err(AssetError::ValueOutOfRange(_))));
    }

    #[tokio::test]
    async fn test_missing_address_rejected() {
        // The same failure surfaces through each query's logging wrapper.
        let config = ProviderConfig::default();
        let message = SessionMessage::from_value(json!({"chainId": 1})).unwrap();
        assert!(matches!(
            get_adult_mice(&message, &config).await,
            Err(AssetError::InvalidAddress(_))
        ));
        assert!(matches!(
            get_baby_mice(&message, &config).await,
            Err(AssetError::InvalidAddress(_))
        ));
        assert!(matches!(
            get_cheeth_grinding_mice(&message, &config).await,
            Err(AssetError::InvalidAddress(_))
        ));
        assert!(matches!(
            get_breeding_mice(&message, &config).await,
            Err(AssetError::InvalidAddress(_))
        ));
    }

    #[tokio::test]
    async fn test_unparseable_address_rejected() {
        let config = ProviderConfig::default();
        let message = SessionMessage::from_value(json!({
            "address": "0xnot-an-address",
            "chainId": 1,
        }))
        .unwrap();
        assert!(matches!(
            get_cheeth_grinding_mice(&message, &config).await,
            Err(AssetError::InvalidAddress(_))
        ));
    }

    #[tokio::test]
    async fn test_balance_mapping_over_rpc() {
        use crate::test_support::{spawn_rpc_server, WORD_ONE, WORD_ZERO};

        let message = SessionMessage::from_value(json!({
            "address": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
            "chainId": 1,
        }))
        .unwrap();

        // balanceOf answers 1.
        let endpoint = spawn_rpc_server("0x1", WORD_ONE).await;
        let config = ProviderConfig {
            endpoint_override: Some(endpoint),
            ..ProviderConfig::default()
        };
        assert_eq!(get_adult_mice(&message, &config).await.unwrap(), vec![1]);

        // balanceOf answers 0.
        let endpoint = spawn_rpc_server("0x1", WORD_ZERO).await;
        let config = ProviderConfig {
            endpoint_override: Some(endpoint),
            ..ProviderConfig::default()
        };
        assert!(get_baby_mice(&message, &config).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_chain_rejected() {
        let config = ProviderConfig::default();
        let message = SessionMessage::from_value(json!({
            "address": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
            "chainId": 250,
        }))
        .unwrap();
        let result = get_breeding_mice(&message, &config).await;
        match result {
            Err(AssetError::Provider(e)) => {
                assert!(e.to_string().contains("unsupported chain id: 250"));
            }
            other => panic!("expected UnsupportedChain, got {:?}", other),
        }
    }
}
