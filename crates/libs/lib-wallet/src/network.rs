//! Supported networks
//!
//! The wallet accepts a network identifier on connect. Wire names are the
//! camelCase identifiers the extension understands (`bellsTestnet`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NetworkParseError;

/// Network the wallet should connect to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Network {
    BellsMainnet,
    #[default]
    BellsTestnet,
    DogeMainnet,
    DogeTestnet,
    PepeMainnet,
    PepeTestnet,
}

impl Network {
    /// Every selectable network, in display order.
    pub const ALL: [Network; 6] = [
        Network::BellsMainnet,
        Network::BellsTestnet,
        Network::DogeMainnet,
        Network::DogeTestnet,
        Network::PepeMainnet,
        Network::PepeTestnet,
    ];

    /// Identifier passed to `provider.connect`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::BellsMainnet => "bellsMainnet",
            Network::BellsTestnet => "bellsTestnet",
            Network::DogeMainnet => "dogeMainnet",
            Network::DogeTestnet => "dogeTestnet",
            Network::PepeMainnet => "pepeMainnet",
            Network::PepeTestnet => "pepeTestnet",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Network::BellsMainnet => "Bells Mainnet",
            Network::BellsTestnet => "Bells Testnet",
            Network::DogeMainnet => "Doge Mainnet",
            Network::DogeTestnet => "Doge Testnet",
            Network::PepeMainnet => "Pepe Mainnet",
            Network::PepeTestnet => "Pepe Testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = NetworkParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::ALL
            .iter()
            .copied()
            .find(|network| network.as_str() == s.trim())
            .ok_or_else(|| NetworkParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_bells_testnet() {
        assert_eq!(Network::default(), Network::BellsTestnet);
    }

    #[test]
    fn test_wire_names_parse_back() {
        for network in Network::ALL {
            assert_eq!(network.as_str().parse::<Network>().unwrap(), network);
            assert_eq!(network.to_string(), network.as_str());
        }
    }

    #[test]
    fn test_unknown_network_is_rejected() {
        let err = "bitcoinMainnet".parse::<Network>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown network: bitcoinMainnet");
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let json = serde_json::to_string(&Network::DogeMainnet).unwrap();
        assert_eq!(json, "\"dogeMainnet\"");
        let parsed: Network = serde_json::from_str("\"pepeTestnet\"").unwrap();
        assert_eq!(parsed, Network::PepeTestnet);
    }
}
