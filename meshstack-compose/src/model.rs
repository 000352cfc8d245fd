//! The composition model produced by aggregation

use serde::{Deserialize, Serialize};

/// One service wired into a gateway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subgraph {
    /// Entry name, also used as the subgraph key.
    pub name: String,
    /// Fully qualified service type path.
    pub type_name: String,
}

/// One gateway with its linked services in resolution order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Gateway {
    pub name: String,
    /// Fully qualified gateway type path.
    pub type_name: String,
    pub subgraphs: Vec<Subgraph>,
}

/// The resolved gateway topology for one pass.
///
/// Gateway names are unique; gateways and subgraphs keep the order fixed by
/// aggregation so the model serializes and renders identically across runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompositionModel {
    pub gateways: Vec<Gateway>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
}

/// Outcome of one aggregation pass. The empty case is first-class so the
/// synthesizer cannot forget it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    /// No composable topology was declared.
    NoOp,
    Composed(CompositionModel),
}

impl CompositionModel {
    pub fn new(gateways: Vec<Gateway>) -> Self {
        Self {
            gateways,
            content_hash: None,
        }
    }

    /// Compute the deterministic content hash (SHA-256 of canonical JSON).
    ///
    /// The hash covers the whole model except the `content_hash` field
    /// itself, so the same topology always hashes the same regardless of
    /// when or where it was generated.
    pub fn compute_content_hash(&self) -> String {
        use sha2::{Digest, Sha256};

        let mut model_for_hash = self.clone();
        model_for_hash.content_hash = None;

        let json = serde_json::to_string(&model_for_hash)
            .expect("Failed to serialize model for hashing");

        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Set `content_hash` to the computed hash.
    pub fn with_content_hash(mut self) -> Self {
        self.content_hash = Some(self.compute_content_hash());
        self
    }

    /// Verify `content_hash` against the computed hash. Returns true when
    /// the hash matches or was never set.
    pub fn verify_content_hash(&self) -> bool {
        match &self.content_hash {
            Some(hash) => hash == &self.compute_content_hash(),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CompositionModel {
        CompositionModel::new(vec![Gateway {
            name: "edge".to_string(),
            type_name: "crate::EdgeGateway".to_string(),
            subgraphs: vec![Subgraph {
                name: "AccountsService".to_string(),
                type_name: "crate::AccountsService".to_string(),
            }],
        }])
    }

    #[test]
    fn test_content_hash_is_stable() {
        let a = sample().compute_content_hash();
        let b = sample().compute_content_hash();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64, "sha256 hex digest");
    }

    #[test]
    fn test_content_hash_ignores_stored_hash() {
        let plain = sample();
        let hashed = sample().with_content_hash();
        assert_eq!(plain.compute_content_hash(), hashed.compute_content_hash());
        assert!(hashed.verify_content_hash());
    }

    #[test]
    fn test_content_hash_tracks_topology_changes() {
        let mut changed = sample();
        changed.gateways[0].subgraphs[0].name = "BillingService".to_string();
        assert_ne!(
            sample().compute_content_hash(),
            changed.compute_content_hash()
        );
    }

    #[test]
    fn test_manifest_round_trip() {
        let model = sample().with_content_hash();
        let json = serde_json::to_string_pretty(&model).unwrap();
        let back: CompositionModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, model);
        assert!(back.verify_content_hash());
    }

    #[test]
    fn test_manifest_serializes_topology_fields_only() {
        fn keys_of(value: &serde_json::Value) -> Vec<&str> {
            let mut keys: Vec<&str> = value
                .as_object()
                .expect("expected a JSON object")
                .keys()
                .map(|k| k.as_str())
                .collect();
            keys.sort_unstable();
            keys
        }

        let value = serde_json::to_value(sample().with_content_hash()).unwrap();
        assert_eq!(keys_of(&value), vec!["content_hash", "gateways"]);
        assert_eq!(
            keys_of(&value["gateways"][0]),
            vec!["name", "subgraphs", "type_name"]
        );
        assert_eq!(
            keys_of(&value["gateways"][0]["subgraphs"][0]),
            vec!["name", "type_name"]
        );
    }
}
