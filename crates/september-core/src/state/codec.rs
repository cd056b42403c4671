use std::collections::HashSet;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Two-way codec between a slot's domain type and its stored JSON value.
///
/// Supplied per slot, so non-JSON-native types (sets, interned handles,
/// whatever a widget invents next) are converted at the storage boundary
/// instead of leaking special cases into [`Slot`](super::Slot).
pub trait SlotCodec<T>: Send + Sync {
    fn encode(&self, value: &T) -> Result<Value, serde_json::Error>;
    fn decode(&self, raw: Value) -> Result<T, serde_json::Error>;
}

/// Passthrough codec: serde to/from `serde_json::Value`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl<T> SlotCodec<T> for JsonCodec
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    fn encode(&self, value: &T) -> Result<Value, serde_json::Error> {
        serde_json::to_value(value)
    }

    fn decode(&self, raw: Value) -> Result<T, serde_json::Error> {
        serde_json::from_value(raw)
    }
}

/// Codec for set-valued slots: `HashSet<T>` ⇄ sorted JSON array.
///
/// Hash sets iterate in arbitrary order, so encoding sorts the elements to
/// keep the stored document stable across saves. Decoding accepts any array
/// and collapses duplicates.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortedSetCodec;

impl<T> SlotCodec<HashSet<T>> for SortedSetCodec
where
    T: Serialize + DeserializeOwned + Ord + Hash + Eq + Clone + Send + Sync,
{
    fn encode(&self, value: &HashSet<T>) -> Result<Value, serde_json::Error> {
        let mut items: Vec<T> = value.iter().cloned().collect();
        items.sort();
        serde_json::to_value(items)
    }

    fn decode(&self, raw: Value) -> Result<HashSet<T>, serde_json::Error> {
        let items: Vec<T> = serde_json::from_value(raw)?;
        Ok(items.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn json_codec_round_trip() {
        let codec = JsonCodec;
        let encoded = SlotCodec::<u32>::encode(&codec, &70).unwrap();
        assert_eq!(encoded, json!(70));
        assert_eq!(SlotCodec::<u32>::decode(&codec, encoded).unwrap(), 70);
    }

    #[test]
    fn set_codec_encodes_sorted() {
        let codec = SortedSetCodec;
        let set: HashSet<u32> = [2, 0, 5].into_iter().collect();
        assert_eq!(codec.encode(&set).unwrap(), json!([0, 2, 5]));
    }

    #[test]
    fn set_codec_decodes_array() {
        let codec = SortedSetCodec;
        let set: HashSet<u32> = codec.decode(json!([0, 2])).unwrap();
        assert_eq!(set, [0, 2].into_iter().collect());
    }

    #[test]
    fn set_codec_collapses_duplicates() {
        let codec = SortedSetCodec;
        let set: HashSet<u32> = codec.decode(json!([1, 1, 2])).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn set_codec_rejects_non_array() {
        let codec = SortedSetCodec;
        assert!(SlotCodec::<HashSet<u32>>::decode(&codec, json!("nope")).is_err());
    }
}
