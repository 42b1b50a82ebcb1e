mod codec;
mod payload;

pub mod config;
pub mod telemetry;

pub use codec::{decode_image, encode_image};
pub use payload::{Envelope, FetchRequest, Payload, STATUS_OK};
