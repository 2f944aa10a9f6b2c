use chrono::{DateTime, Utc};
use fairseed_core::{FairError, ProvablyFair, WeightedOption};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutcomeKind {
    Integer { min: i64, max: i64 },
    Boolean,
    Weighted { options: Vec<WeightedOption> },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OutcomeRequest {
    pub client_seed: String,
    pub server_seed: String,
    pub nonce: u64,
    pub kind: OutcomeKind,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeValue {
    Integer(i64),
    Boolean(bool),
    /// `None` when there was nothing to select from.
    Selection(Option<String>),
}

/// One derived outcome together with everything needed to re-derive it.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutcomeRecord {
    pub ts: DateTime<Utc>,
    #[serde(flatten)]
    pub request: OutcomeRequest,
    pub digest: String,
    pub value: OutcomeValue,
}

impl OutcomeRequest {
    pub fn round(&self) -> ProvablyFair {
        ProvablyFair::new(self.client_seed.as_str(), self.server_seed.as_str(), self.nonce)
    }

    pub fn evaluate(&self) -> Result<OutcomeValue, FairError> {
        let round = self.round();
        let value = match &self.kind {
            OutcomeKind::Integer { min, max } => OutcomeValue::Integer(round.integer(*min, *max)?),
            OutcomeKind::Boolean => OutcomeValue::Boolean(round.boolean()),
            OutcomeKind::Weighted { options } => {
                OutcomeValue::Selection(round.select(options)?.map(str::to_owned))
            }
        };
        Ok(value)
    }

    pub fn record(self, ts: DateTime<Utc>) -> ApiResult<OutcomeRecord> {
        let value = self.evaluate()?;
        let digest = self.round().digest_hex();
        Ok(OutcomeRecord {
            ts,
            request: self,
            digest,
            value,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    pub digest_matches: bool,
    pub value_matches: bool,
    pub expected_digest: String,
    pub expected_value: OutcomeValue,
}

impl VerifyReport {
    pub fn ok(&self) -> bool {
        self.digest_matches && self.value_matches
    }
}

impl OutcomeRecord {
    /// Recompute the record from its own inputs and compare.
    pub fn verify(&self) -> ApiResult<VerifyReport> {
        let expected_value = self.request.evaluate()?;
        let expected_digest = self.request.round().digest_hex();
        Ok(VerifyReport {
            digest_matches: expected_digest.eq_ignore_ascii_case(&self.digest),
            value_matches: expected_value == self.value,
            expected_digest,
            expected_value,
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    Invalid(String),
    #[error(transparent)]
    Derivation(#[from] FairError),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn dice(nonce: u64) -> OutcomeRequest {
        OutcomeRequest {
            client_seed: "clientX".into(),
            server_seed: "serverY".into(),
            nonce,
            kind: OutcomeKind::Integer { min: 1, max: 6 },
        }
    }

    #[test]
    fn record_verifies() {
        let record = dice(1).record(Utc::now()).unwrap();
        assert_eq!(record.value, OutcomeValue::Integer(6));
        assert!(record.verify().unwrap().ok());
    }

    #[test]
    fn tampered_value_fails() {
        let mut record = dice(1).record(Utc::now()).unwrap();
        record.value = OutcomeValue::Integer(3);
        let report = record.verify().unwrap();
        assert!(report.digest_matches);
        assert!(!report.value_matches);
        assert_eq!(report.expected_value, OutcomeValue::Integer(6));
    }

    #[test]
    fn record_json_shape() {
        let record = dice(1).record(Utc::now()).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["client_seed"], "clientX");
        assert_eq!(json["kind"]["type"], "integer");
        assert_eq!(json["value"]["integer"], 6);
        let back: OutcomeRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.request, record.request);
    }

    #[test]
    fn inverted_range_surfaces_error() {
        let mut req = dice(1);
        req.kind = OutcomeKind::Integer { min: 6, max: 1 };
        assert!(matches!(req.record(Utc::now()), Err(ApiError::Derivation(_))));
    }

    #[test]
    fn empty_selection_is_recorded() {
        let mut req = dice(2);
        req.kind = OutcomeKind::Weighted { options: vec![] };
        let record = req.record(Utc::now()).unwrap();
        assert_eq!(record.value, OutcomeValue::Selection(None));
        assert!(record.verify().unwrap().ok());
    }
}
