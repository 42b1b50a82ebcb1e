use lambda_runtime::Diagnostic;
use pipeline_payload::Envelope;
use thiserror::Error;
use tracing::instrument;

/// A result is accepted only if some score is strictly greater than this.
pub const THRESHOLD: f64 = 0.9;

pub const THRESHOLD_NOT_MET: &str = "THRESHOLD_CONFIDENCE_NOT_MET";

#[derive(Error, Debug, PartialEq)]
pub enum GateError {
    #[error(
        "THRESHOLD_CONFIDENCE_NOT_MET: best score {} does not exceed {threshold}",
        describe_best(.best)
    )]
    ThresholdNotMet { best: Option<f64>, threshold: f64 },
}

fn describe_best(best: &Option<f64>) -> String {
    match best {
        Some(score) => score.to_string(),
        None => "none".to_string(),
    }
}

impl From<GateError> for Diagnostic {
    fn from(err: GateError) -> Self {
        match err {
            GateError::ThresholdNotMet { .. } => Diagnostic {
                error_type: THRESHOLD_NOT_MET.to_string(),
                error_message: err.to_string(),
            },
        }
    }
}

pub fn check_confidence(inferences: &[f64]) -> Result<(), GateError> {
    if inferences.iter().any(|&confidence| confidence > THRESHOLD) {
        return Ok(());
    }

    Err(GateError::ThresholdNotMet {
        best: inferences
            .iter()
            .copied()
            .filter(|score| !score.is_nan())
            .reduce(f64::max),
        threshold: THRESHOLD,
    })
}

/// Passes the envelope through untouched when the classification is confident.
#[instrument(skip(envelope), fields(bucket = %envelope.body.storage_bucket, key = %envelope.body.storage_key))]
pub fn gate(envelope: Envelope) -> Result<Envelope, GateError> {
    match check_confidence(&envelope.body.inferences) {
        Ok(()) => {
            tracing::info!("Accepted, best score {:?}", envelope.body.best_score());
            Ok(Envelope::ok(envelope.body))
        }
        Err(e) => {
            tracing::warn!("Rejected: {}", e);
            Err(e)
        }
    }
}
