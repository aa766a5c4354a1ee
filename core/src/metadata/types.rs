// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! The persisted metadata record and its JSON field encodings.
//!
//! The JSON shape matches what the Go node writes: PascalCase keys, raw
//! byte fields as standard base64, `NonceValue` as hex, and the optional
//! progress fields left out until they have a value.

use serde::{Deserialize, Serialize};

/// Progress and identity of one post data directory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProofMetadata {
    /// Identity of the node that owns the data.
    #[serde(with = "base64_bytes")]
    pub node_id: Vec<u8>,

    /// ATX the labels are committed to.
    #[serde(with = "base64_bytes")]
    pub commitment_atx_id: Vec<u8>,

    pub labels_per_unit: u64,
    pub num_units: u32,
    pub max_file_size: u64,

    /// Discovered nonce. `Some` means the search is finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,

    /// Label bytes produced for the nonce, when the oracle returned them.
    #[serde(default, with = "hex_bytes_opt", skip_serializing_if = "Option::is_none")]
    pub nonce_value: Option<Vec<u8>>,

    /// Start of the last batch a search attempted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_position: Option<u64>,
}

impl ProofMetadata {
    /// Total labels in the data directory, `None` if the product overflows.
    pub fn num_labels(&self) -> Option<u64> {
        u64::from(self.num_units).checked_mul(self.labels_per_unit)
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&STANDARD.encode(bytes))
    }

    // Go marshals a nil slice as `null`.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(s) => STANDARD.decode(s).map_err(D::Error::custom),
            None => Ok(Vec::new()),
        }
    }
}

mod hex_bytes_opt {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(b) => s.serialize_str(&hex::encode(b)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(s) if !s.is_empty() => hex::decode(s).map(Some).map_err(D::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_go_written_file() {
        let json = r#"{
            "NodeId": "AQID",
            "CommitmentAtxId": "BAUG",
            "LabelsPerUnit": 4294967296,
            "NumUnits": 4,
            "MaxFileSize": 4294967296,
            "Nonce": null,
            "LastPosition": 17179869184
        }"#;
        let meta: ProofMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.node_id, vec![1, 2, 3]);
        assert_eq!(meta.commitment_atx_id, vec![4, 5, 6]);
        assert_eq!(meta.num_units, 4);
        assert_eq!(meta.nonce, None);
        assert_eq!(meta.nonce_value, None);
        assert_eq!(meta.last_position, Some(17_179_869_184));
    }

    #[test]
    fn absent_progress_fields_are_omitted() {
        let meta = ProofMetadata {
            node_id: vec![0xFF],
            commitment_atx_id: vec![],
            labels_per_unit: 10,
            num_units: 1,
            max_file_size: 1024,
            ..Default::default()
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains(r#""NodeId":"/w==""#), "{json}");
        assert!(!json.contains("Nonce"));
        assert!(!json.contains("LastPosition"));
    }

    #[test]
    fn nonce_value_is_hex() {
        let meta = ProofMetadata {
            nonce: Some(9),
            nonce_value: Some(vec![0xAB, 0xCD]),
            ..Default::default()
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains(r#""NonceValue":"abcd""#), "{json}");
        let back: ProofMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, meta);
    }

    #[test]
    fn num_labels_checks_overflow() {
        let meta = ProofMetadata {
            labels_per_unit: 100,
            num_units: 3,
            ..Default::default()
        };
        assert_eq!(meta.num_labels(), Some(300));

        let huge = ProofMetadata {
            labels_per_unit: u64::MAX,
            num_units: 2,
            ..Default::default()
        };
        assert_eq!(huge.num_labels(), None);
    }
}
