//! Train Tracker arrivals response DTOs.
//!
//! The payload is kept exactly as the upstream sent it and that is what gets
//! serialized back out. The typed fields are a read-only view used for
//! logging and the convenience helpers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::domain::Line;
use crate::lenient;

/// Top-level response: everything lives under a single `ctatt` key.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainTrackerResponse {
    #[serde(rename = "ctatt")]
    pub payload: ArrivalsPayload,
}

/// The unwrapped body of an arrivals response.
///
/// Serializes to the object received under `ctatt`, byte for byte at the
/// JSON value level: nulls, numeric codes and unknown keys all survive.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrivalsPayload {
    /// When the response was generated (`yyyy-MM-ddTHH:mm:ss`, local time).
    pub tmst: String,

    /// Application error code. `"0"` means success.
    pub err_cd: String,

    /// Application error message, if any.
    pub err_nm: Option<String>,

    /// Predicted arrivals. Empty when omitted or `null` upstream.
    pub eta: Vec<ArrivalRecord>,

    raw: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayloadView {
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    tmst: String,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    err_cd: String,
    #[serde(default, deserialize_with = "lenient::opt_string_or_number")]
    err_nm: Option<String>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    eta: Vec<ArrivalRecord>,
}

impl ArrivalsPayload {
    /// Whether the upstream reported an application-level error.
    ///
    /// Such payloads are still delivered to callers as ordinary data.
    pub fn is_error(&self) -> bool {
        let code = self.err_cd.trim();
        !code.is_empty() && code != "0"
    }

    /// The object as received, including fields the view does not model.
    pub fn as_json(&self) -> &Map<String, Value> {
        &self.raw
    }
}

impl<'de> Deserialize<'de> for ArrivalsPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        let view: PayloadView =
            serde_json::from_value(Value::Object(raw.clone())).map_err(serde::de::Error::custom)?;

        Ok(Self {
            tmst: view.tmst,
            err_cd: view.err_cd,
            err_nm: view.err_nm,
            eta: view.eta,
            raw,
        })
    }
}

impl Serialize for ArrivalsPayload {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.raw.serialize(serializer)
    }
}

/// Typed view of one predicted arrival at a platform.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalRecord {
    /// Station map id.
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub sta_id: String,

    /// Stop (platform) id.
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub stp_id: String,

    /// Station name.
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub sta_nm: String,

    /// Platform description, e.g. "Service toward Loop".
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub stp_de: String,

    /// Run number.
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub rn: String,

    /// Route code (`Red`, `Brn`, `G`, ...).
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub rt: String,

    /// Destination stop id.
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub dest_st: String,

    /// Destination name.
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub dest_nm: String,

    /// Train direction code.
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub tr_dr: String,

    /// When the prediction was made.
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub prdt: String,

    /// Predicted arrival time.
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub arr_t: String,

    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub is_app: String,

    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub is_sch: String,

    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub is_dly: String,

    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub is_flt: String,

    /// Reserved by the upstream, normally `null`.
    #[serde(default)]
    pub flags: Option<Value>,

    /// Train position. `None` when the upstream sends `null`, as it does
    /// for schedule-based predictions.
    #[serde(default, deserialize_with = "lenient::opt_string_or_number")]
    pub lat: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string_or_number")]
    pub lon: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string_or_number")]
    pub heading: Option<String>,

    /// Fields this type does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ArrivalRecord {
    /// The line this train runs on, if the route code is recognised.
    pub fn line(&self) -> Option<Line> {
        Line::parse(&self.rt).ok()
    }

    /// Train is approaching or at the station.
    pub fn is_approaching(&self) -> bool {
        lenient::str_is_truthy(&self.is_app)
    }

    /// Prediction is schedule-based rather than live.
    pub fn is_scheduled(&self) -> bool {
        lenient::str_is_truthy(&self.is_sch)
    }

    /// Train is delayed.
    pub fn is_delayed(&self) -> bool {
        lenient::str_is_truthy(&self.is_dly)
    }

    /// A fault was detected in the prediction.
    pub fn is_fault(&self) -> bool {
        lenient::str_is_truthy(&self.is_flt)
    }
}
