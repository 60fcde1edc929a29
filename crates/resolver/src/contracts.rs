//! Registry and resolver contract bindings.
//!
//! Only the view functions resolution needs are declared. Selectors must match the
//! deployed contracts byte for byte.

use alloy::primitives::{Address, Bytes};
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::error::GatewayError;
use crate::gateway::ChainGateway;

sol! {
    /// ENS-style registry: node → owner, node → resolver.
    #[allow(missing_docs)]
    interface ENSRegistry {
        function owner(bytes32 node) external view returns (address);
        function resolver(bytes32 node) external view returns (address);
    }

    /// Reverse resolver: node → name.
    #[allow(missing_docs)]
    interface NameResolver {
        function name(bytes32 node) external view returns (string);
    }
}

/// Run a view call through the gateway and decode its return values.
///
/// The `sol!` call type carries the method selector and arguments; return data that does
/// not decode against it is reported as [`GatewayError::MalformedResponse`]. An empty
/// response (calling an address with no code) lands there too.
pub async fn call_view<G, C>(gateway: &G, to: Address, call: &C) -> Result<C::Return, GatewayError>
where
    G: ChainGateway + ?Sized,
    C: SolCall + Sync,
{
    let input = Bytes::from(call.abi_encode());
    let output = gateway.call(to, input).await?;

    decode_returns::<C>(&output)
}

/// Like [`call_view`], but empty return data yields `None` instead of a decode error.
///
/// A node answers `0x` for calls to an address without code, so callers that may target
/// stale contract addresses can treat that as "nothing there".
pub async fn try_call_view<G, C>(
    gateway: &G,
    to: Address,
    call: &C,
) -> Result<Option<C::Return>, GatewayError>
where
    G: ChainGateway + ?Sized,
    C: SolCall + Sync,
{
    let input = Bytes::from(call.abi_encode());
    let output = gateway.call(to, input).await?;
    if output.is_empty() {
        return Ok(None);
    }

    decode_returns::<C>(&output).map(Some)
}

fn decode_returns<C: SolCall>(output: &[u8]) -> Result<C::Return, GatewayError> {
    C::abi_decode_returns(output, true).map_err(|e| GatewayError::MalformedResponse {
        method: C::SIGNATURE.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::B256;

    #[test]
    fn test_selectors() {
        // Standard ENS selectors
        assert_eq!(ENSRegistry::ownerCall::SELECTOR, [0x02, 0x57, 0x1b, 0xe3]);
        assert_eq!(ENSRegistry::resolverCall::SELECTOR, [0x01, 0x78, 0xb8, 0xbf]);
        assert_eq!(NameResolver::nameCall::SELECTOR, [0x69, 0x1f, 0x34, 0x31]);
    }

    #[test]
    fn test_owner_call_encoding() {
        let node = B256::repeat_byte(0x42);
        let encoded = ENSRegistry::ownerCall { node }.abi_encode();

        assert_eq!(encoded.len(), 4 + 32);
        assert_eq!(&encoded[..4], &ENSRegistry::ownerCall::SELECTOR);
        assert_eq!(&encoded[4..], node.as_slice());
    }
}
