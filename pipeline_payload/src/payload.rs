use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const STATUS_OK: u16 = 200;

/// Object location as it may arrive on the wire: `storage_*` wins over the
/// legacy `s3_*` spelling when both are present.
#[derive(Debug, Deserialize)]
pub struct RawLocation {
    storage_bucket: Option<String>,
    s3_bucket: Option<String>,
    storage_key: Option<String>,
    s3_key: Option<String>,
}

impl RawLocation {
    fn resolve(self) -> Result<(String, String), String> {
        let bucket = self
            .storage_bucket
            .or(self.s3_bucket)
            .ok_or_else(|| "missing field `storage_bucket`".to_string())?;
        let key = self
            .storage_key
            .or(self.s3_key)
            .ok_or_else(|| "missing field `storage_key`".to_string())?;
        Ok((bucket, key))
    }
}

/// Location of the source image, as handed to the fetcher by the orchestrator.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "RawLocation")]
pub struct FetchRequest {
    pub storage_bucket: String,
    pub storage_key: String,
}

impl TryFrom<RawLocation> for FetchRequest {
    type Error = String;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        let (storage_bucket, storage_key) = raw.resolve()?;
        Ok(Self {
            storage_bucket,
            storage_key,
        })
    }
}

impl FetchRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.storage_bucket.trim().is_empty() {
            return Err("storage_bucket must not be empty".to_string());
        }
        if self.storage_key.trim().is_empty() {
            return Err("storage_key must not be empty".to_string());
        }
        Ok(())
    }
}

/// The document threaded through fetch, classify and gate.
///
/// Fields the stages do not know about are kept in `extra` and written back
/// out unchanged.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "RawPayload")]
pub struct Payload {
    pub image_data: String,
    pub storage_bucket: String,
    pub storage_key: String,
    pub inferences: Vec<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct RawPayload {
    #[serde(default)]
    image_data: String,
    #[serde(flatten)]
    location: RawLocation,
    #[serde(default)]
    inferences: Vec<f64>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<RawPayload> for Payload {
    type Error = String;

    fn try_from(raw: RawPayload) -> Result<Self, Self::Error> {
        let (storage_bucket, storage_key) = raw.location.resolve()?;
        Ok(Self {
            image_data: raw.image_data,
            storage_bucket,
            storage_key,
            inferences: raw.inferences,
            extra: raw.extra,
        })
    }
}

impl Payload {
    pub fn new(request: FetchRequest, image_data: String) -> Self {
        Self {
            image_data,
            storage_bucket: request.storage_bucket,
            storage_key: request.storage_key,
            inferences: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_inferences(self, inferences: Vec<f64>) -> Self {
        Self { inferences, ..self }
    }

    pub fn best_score(&self) -> Option<f64> {
        self.inferences
            .iter()
            .copied()
            .filter(|score| !score.is_nan())
            .reduce(f64::max)
    }
}

fn default_status_code() -> u16 {
    STATUS_OK
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Envelope {
    #[serde(
        rename = "statusCode",
        alias = "status_code",
        default = "default_status_code"
    )]
    pub status_code: u16,
    pub body: Payload,
}

impl Envelope {
    pub fn ok(body: Payload) -> Self {
        Self {
            status_code: STATUS_OK,
            body,
        }
    }
}
