//! Tagged-envelope serialization for [`WalletMap`]
//!
//! JSON has no native representation for an ordered key-value map, so the
//! map serializes as `{"_type": "Map", "data": [[key, value], ...]}` with
//! entries in iteration order, and decoding inverts the transform. Because
//! these impls live on the map type itself, serde applies them wherever
//! the map is nested inside a larger structure.
//!
//! The `_type` marker doubles as the wire-format version tag; any other
//! marker is rejected on decode.

use serde::de::Error as DeError;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::model::{WalletMap, WalletState};
use crate::wallets::WalletId;

const MARKER_FIELD: &str = "_type";
const MAP_MARKER: &str = "Map";
const DATA_FIELD: &str = "data";

impl Serialize for WalletMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut envelope = serializer.serialize_struct("WalletMap", 2)?;
        envelope.serialize_field(MARKER_FIELD, MAP_MARKER)?;
        envelope.serialize_field(DATA_FIELD, &self.entries)?;
        envelope.end()
    }
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "_type")]
    marker: String,
    data: Vec<(WalletId, WalletState)>,
}

impl<'de> Deserialize<'de> for WalletMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let envelope = Envelope::deserialize(deserializer)?;
        if envelope.marker != MAP_MARKER {
            return Err(D::Error::custom(format!(
                "expected map envelope tagged \"{}\", got \"{}\"",
                MAP_MARKER, envelope.marker
            )));
        }
        // Duplicate keys resolve last-wins via FromIterator
        Ok(envelope.data.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::network::NetworkId;
    use crate::state::{State, WalletAccount, WalletMap, WalletState};
    use crate::wallets::WalletId;

    fn account(name: &str, address: &str) -> WalletAccount {
        WalletAccount {
            name: name.to_string(),
            address: address.to_string(),
        }
    }

    fn wallet(accounts: Vec<WalletAccount>) -> WalletState {
        let active_account = accounts.first().cloned();
        WalletState {
            accounts,
            active_account,
        }
    }

    #[test]
    fn test_empty_map_envelope() {
        let map = WalletMap::new();
        let value = serde_json::to_value(&map).unwrap();
        assert_eq!(value, json!({ "_type": "Map", "data": [] }));
    }

    #[test]
    fn test_envelope_shape() {
        let mut map = WalletMap::new();
        map.insert(WalletId::Defly, wallet(vec![account("Defly Wallet 1", "addr1")]));

        let value = serde_json::to_value(&map).unwrap();
        assert_eq!(
            value,
            json!({
                "_type": "Map",
                "data": [[
                    "defly",
                    {
                        "accounts": [{ "name": "Defly Wallet 1", "address": "addr1" }],
                        "activeAccount": { "name": "Defly Wallet 1", "address": "addr1" }
                    }
                ]]
            })
        );
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let mut map = WalletMap::new();
        map.insert(WalletId::Pera, wallet(vec![account("P", "p1")]));
        map.insert(WalletId::Defly, wallet(vec![account("D", "d1")]));
        map.insert(WalletId::Exodus, wallet(vec![]));

        let encoded = serde_json::to_string(&map).unwrap();
        let decoded: WalletMap = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, map);
        let keys: Vec<WalletId> = decoded.keys().copied().collect();
        assert_eq!(keys, vec![WalletId::Pera, WalletId::Defly, WalletId::Exodus]);
    }

    #[test]
    fn test_round_trip_full_state() {
        // Zero, one, and many wallet entries all survive nesting inside State
        for count in [0usize, 1, 3] {
            let ids = [WalletId::Defly, WalletId::Pera, WalletId::Exodus];
            let mut state = State::default();
            for id in ids.iter().take(count) {
                state
                    .wallets
                    .insert(*id, wallet(vec![account("A", &format!("addr-{id}"))]));
            }
            state.active_wallet = ids.first().copied().filter(|_| count > 0);
            state.active_network = NetworkId::Mainnet;

            let encoded = serde_json::to_string(&state).unwrap();
            let decoded: State = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, state);
        }
    }

    #[test]
    fn test_rejects_wrong_marker() {
        let raw = json!({ "_type": "Set", "data": [] }).to_string();
        assert!(serde_json::from_str::<WalletMap>(&raw).is_err());
    }

    #[test]
    fn test_rejects_plain_object() {
        let raw = json!({ "defly": { "accounts": [], "activeAccount": null } }).to_string();
        assert!(serde_json::from_str::<WalletMap>(&raw).is_err());
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let raw = json!({
            "_type": "Map",
            "data": [
                ["defly", { "accounts": [{ "name": "A", "address": "x" }], "activeAccount": null }],
                ["defly", { "accounts": [{ "name": "B", "address": "y" }], "activeAccount": null }]
            ]
        })
        .to_string();

        let decoded: WalletMap = serde_json::from_str(&raw).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded.get(&WalletId::Defly).unwrap().accounts[0].address, "y");
    }
}
