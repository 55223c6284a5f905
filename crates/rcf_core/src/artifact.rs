//! Trained model artifacts and their byte format
//!
//! An artifact is one of two payloads behind a single envelope:
//!
//! ```text
//! ArtifactEnvelope {
//!     magic:     b"RCFM",
//!     version:   "1.0.0",
//!     algorithm: BatchRcf | RcfSummarize,
//!     checksum:  blake3(payload) as hex,
//!     payload:   bincode(ModelPayload),
//! }
//! ```
//!
//! Envelope and payload are encoded with bincode. Deserialization rejects
//! bad magic, unknown versions, checksum mismatches and an algorithm tag
//! that disagrees with the payload variant.

use serde::{Deserialize, Serialize};

use crate::errors::{RcfError, Result};
use crate::forest::RandomForest;
use crate::summary::SampleSummary;

/// Schema version written into every artifact
pub const MODEL_VERSION: &str = "1.0.0";

const MAGIC: [u8; 4] = *b"RCFM";

/// Algorithm identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionName {
    BatchRcf,
    RcfSummarize,
}

impl FunctionName {
    pub fn name(&self) -> &'static str {
        match self {
            FunctionName::BatchRcf => "BATCH_RCF",
            FunctionName::RcfSummarize => "RCF_SUMMARIZE",
        }
    }
}

impl std::fmt::Display for FunctionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Trained state, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModelPayload {
    Forest(RandomForest),
    Summary(SampleSummary),
}

impl ModelPayload {
    pub fn function_name(&self) -> FunctionName {
        match self {
            ModelPayload::Forest(_) => FunctionName::BatchRcf,
            ModelPayload::Summary(_) => FunctionName::RcfSummarize,
        }
    }
}

/// Immutable snapshot produced by training
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifact {
    algorithm: FunctionName,
    version: String,
    payload: ModelPayload,
}

#[derive(Serialize, Deserialize)]
struct ArtifactEnvelope {
    magic: [u8; 4],
    version: String,
    algorithm: FunctionName,
    checksum: String,
    payload: Vec<u8>,
}

impl ModelArtifact {
    pub fn forest(forest: RandomForest) -> Self {
        Self {
            algorithm: FunctionName::BatchRcf,
            version: MODEL_VERSION.to_string(),
            payload: ModelPayload::Forest(forest),
        }
    }

    pub fn summary(summary: SampleSummary) -> Self {
        Self {
            algorithm: FunctionName::RcfSummarize,
            version: MODEL_VERSION.to_string(),
            payload: ModelPayload::Summary(summary),
        }
    }

    pub fn algorithm(&self) -> FunctionName {
        self.algorithm
    }

    /// Algorithm identifier, e.g. `BATCH_RCF`
    pub fn name(&self) -> &'static str {
        self.algorithm.name()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn payload(&self) -> &ModelPayload {
        &self.payload
    }

    pub fn as_forest(&self) -> Option<&RandomForest> {
        match &self.payload {
            ModelPayload::Forest(forest) => Some(forest),
            ModelPayload::Summary(_) => None,
        }
    }

    pub fn as_summary(&self) -> Option<&SampleSummary> {
        match &self.payload {
            ModelPayload::Summary(summary) => Some(summary),
            ModelPayload::Forest(_) => None,
        }
    }

    fn payload_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(&self.payload)
            .map_err(|e| RcfError::invalid_state(format!("payload encoding failed: {e}")))
    }

    /// Blake3 hash of the encoded payload as hex
    pub fn content_hash_hex(&self) -> Result<String> {
        Ok(blake3::hash(&self.payload_bytes()?).to_hex().to_string())
    }

    /// Encode to self-describing bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let payload = self.payload_bytes()?;
        let envelope = ArtifactEnvelope {
            magic: MAGIC,
            version: self.version.clone(),
            algorithm: self.algorithm,
            checksum: blake3::hash(&payload).to_hex().to_string(),
            payload,
        };
        bincode::serialize(&envelope)
            .map_err(|e| RcfError::invalid_state(format!("envelope encoding failed: {e}")))
    }

    /// Decode bytes written by [`ModelArtifact::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let envelope: ArtifactEnvelope = bincode::deserialize(bytes)
            .map_err(|e| RcfError::corrupt(format!("malformed envelope: {e}")))?;
        if envelope.magic != MAGIC {
            return Err(RcfError::corrupt("bad magic bytes"));
        }
        if envelope.version != MODEL_VERSION {
            return Err(RcfError::corrupt(format!(
                "unsupported model version {}, expected {MODEL_VERSION}",
                envelope.version
            )));
        }
        let checksum = blake3::hash(&envelope.payload).to_hex().to_string();
        if checksum != envelope.checksum {
            return Err(RcfError::corrupt("payload checksum mismatch"));
        }

        let payload: ModelPayload = bincode::deserialize(&envelope.payload)
            .map_err(|e| RcfError::corrupt(format!("malformed payload: {e}")))?;
        if payload.function_name() != envelope.algorithm {
            return Err(RcfError::corrupt(format!(
                "algorithm {} does not match payload type {}",
                envelope.algorithm,
                payload.function_name()
            )));
        }
        let structural = match &payload {
            ModelPayload::Forest(forest) => forest.validate(),
            ModelPayload::Summary(summary) => summary.validate(),
        };
        structural.map_err(|e| RcfError::corrupt(e.to_string()))?;

        Ok(Self {
            algorithm: envelope.algorithm,
            version: envelope.version,
            payload,
        })
    }

    /// Pretty JSON of the payload for inspection
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.payload)
            .map_err(|e| RcfError::invalid_state(format!("json encoding failed: {e}")))
    }

    /// Wrap into a lifecycle record
    pub fn to_record(&self) -> Result<MlModel> {
        Ok(MlModel {
            name: self.name().to_string(),
            version: self.version.clone(),
            content: self.to_bytes()?,
        })
    }
}

/// Named, versioned model record handed to persistence layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MlModel {
    pub name: String,
    pub version: String,
    #[serde(with = "serde_bytes_hex")]
    pub content: Vec<u8>,
}

impl MlModel {
    /// Decode the record's content, checking it against the record name
    pub fn artifact(&self) -> Result<ModelArtifact> {
        let artifact = ModelArtifact::from_bytes(&self.content)?;
        if artifact.name() != self.name {
            return Err(RcfError::corrupt(format!(
                "record name {} does not match artifact {}",
                self.name,
                artifact.name()
            )));
        }
        Ok(artifact)
    }
}

mod serde_bytes_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(serde::de::Error::custom)
    }
}
