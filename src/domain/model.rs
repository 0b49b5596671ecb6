use crate::utils::error::IntelError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// 儀表板使用的 ISO-8601 格式 (UTC、毫秒、Z 結尾)
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

mod iso_date {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(at) => serializer.serialize_str(&super::iso_timestamp(*at)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(serde::de::Error::custom)
        })
        .transpose()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub address: String,
    pub family: String,
    pub amount: f64,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryRecord {
    pub title: String,
    #[serde(with = "iso_date")]
    pub date: Option<DateTime<Utc>>,
    pub description: String,
    pub is_ransomware: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    pub title: String,
    #[serde(with = "iso_date")]
    pub date: Option<DateTime<Utc>>,
    pub is_recent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Success,
    Error,
}

/// 單一來源的結果；`data` 與 `error` 恰好一個非空
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceResult<T> {
    pub status: SourceStatus,
    pub data: Option<Vec<T>>,
    pub error: Option<String>,
}

impl<T> SourceResult<T> {
    pub fn success(data: Vec<T>) -> Self {
        Self {
            status: SourceStatus::Success,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: SourceStatus::Error,
            data: None,
            error: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SourceStatus::Success
    }

    pub fn len(&self) -> usize {
        self.data.as_ref().map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> From<Result<Vec<T>, IntelError>> for SourceResult<T> {
    fn from(outcome: Result<Vec<T>, IntelError>) -> Self {
        match outcome {
            Ok(data) => Self::success(data),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}

/// 固定三個來源，序列化順序與欄位名稱不可變
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sources {
    pub ransomwhere: SourceResult<PaymentRecord>,
    pub cisa: SourceResult<AdvisoryRecord>,
    pub canadian: SourceResult<AlertRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub timestamp: String,
    pub sources: Sources,
}

impl ResponseEnvelope {
    pub fn new(generated_at: DateTime<Utc>, sources: Sources) -> Self {
        Self {
            timestamp: iso_timestamp(generated_at),
            sources,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorBody {
    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            error: "Failed to fetch ransomware data".to_string(),
            message: message.into(),
            timestamp: iso_timestamp(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_iso_timestamp_uses_millis_and_z() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(iso_timestamp(at), "2024-01-15T10:30:00.000Z");
    }

    #[test]
    fn test_source_result_from_error_keeps_only_message() {
        let outcome: Result<Vec<PaymentRecord>, IntelError> = Err(IntelError::FetchError {
            source_name: "Ransomwhere".to_string(),
            status: 502,
        });
        let result = SourceResult::from(outcome);

        assert_eq!(result.status, SourceStatus::Error);
        assert!(result.data.is_none());
        assert_eq!(result.error.as_deref(), Some("Ransomwhere API failed: 502"));
    }

    #[test]
    fn test_source_result_serializes_nulls() {
        let result: SourceResult<AlertRecord> = SourceResult::success(vec![]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "success", "data": [], "error": null})
        );
    }

    #[test]
    fn test_advisory_record_camel_case_and_null_date() {
        let record = AdvisoryRecord {
            title: "Ransomware advisory".to_string(),
            date: None,
            description: "...".to_string(),
            is_ransomware: true,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["isRansomware"], true);
        assert!(json["date"].is_null());

        let back: AdvisoryRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_alert_record_date_round_trips_through_iso() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let record = AlertRecord {
            title: "Guidance".to_string(),
            date: Some(at),
            is_recent: false,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2025-03-01T08:00:00.000Z");
        assert_eq!(json["isRecent"], false);
    }

    #[test]
    fn test_error_body_shape() {
        let body = ErrorBody::fatal("boom");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "Failed to fetch ransomware data");
        assert_eq!(json["message"], "boom");
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    }
}
