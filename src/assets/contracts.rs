//! Fixed contract addresses and their call surfaces.
//!
//! The bindings cover exactly the read methods the queries use; the contracts
//! expose far more, none of it needed here.

use alloy::primitives::{address, Address};
use alloy::sol;

/// Adult mice ERC-721 collection.
pub const MICE_CONTRACT: Address = address!("c7492fde60f2ea4dba3d7660e9b6f651b2841f00");

/// Cheeth staking/token contract.
pub const CHEETH_CONTRACT: Address = address!("5f7ba84c7984aa5ef329b66e313498f0aed6d23a");

/// Baby mice collection, which also records breeding events.
pub const BABY_MICE_CONTRACT: Address = address!("15cc16bfe6fac624247490aa29b6d632be549f00");

sol! {
    #[sol(rpc)]
    contract MiceContract {
        function balanceOf(address owner) external view returns (uint256);
    }

    #[sol(rpc)]
    contract BabyMiceContract {
        function balanceOf(address owner) external view returns (uint256);
        function getBreedingEventsLengthByAddress(address owner) external view returns (uint256);
        function _addressToBreedingEvents(address owner, uint256 index) external view returns (uint256 parentId1, uint256 parentId2);
    }

    #[sol(rpc)]
    contract CheethContract {
        function getTokensStaked(address owner) external view returns (uint256[] memory);
    }
}
