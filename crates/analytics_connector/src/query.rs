use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;
use crate::req::AnalyticsClient;

/// Core Reporting API v3 report-data endpoint.
pub const DATA_ENDPOINT: &str = "/analytics/v3/data/ga";

/// Query parameters for one report request.
///
/// Field values are passed to the API verbatim; the caller is trusted. Wire
/// names are the hyphenated forms the v3 API expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportQuery {
    /// View to query, always of the form `ga:<profile id>`.
    pub ids: String,
    #[serde(rename = "start-date")]
    pub start_date: String,
    #[serde(rename = "end-date")]
    pub end_date: String,
    pub metrics: String,
    pub dimensions: String,
    pub segment: String,
}

impl ReportQuery {
    pub(crate) async fn fetch(&self, client: &AnalyticsClient, token: &str) -> Result<ReportData> {
        client.get(DATA_ENDPOINT, self, token).await
    }
}

/// Subset of the report-data response we care about.
///
/// Row values arrive positionally, ordered dimensions first then metrics in
/// request order. `rows` is absent entirely when the report matched no data.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub rows: Option<Vec<Vec<Value>>>,

    #[serde(default)]
    pub column_headers: Vec<ColumnHeader>,
    pub total_results: Option<i64>,
    pub contains_sampled_data: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnHeader {
    pub name: String,
    pub column_type: String,
    pub data_type: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn query_params_use_wire_names() {
        let query = ReportQuery {
            ids: "ga:12345".to_string(),
            start_date: "2012-04-01".to_string(),
            end_date: "today".to_string(),
            metrics: "ga:sessions".to_string(),
            dimensions: "ga:year,ga:month".to_string(),
            segment: "sessions::condition::ga:customVarValue2!@student".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "ids": "ga:12345",
                "start-date": "2012-04-01",
                "end-date": "today",
                "metrics": "ga:sessions",
                "dimensions": "ga:year,ga:month",
                "segment": "sessions::condition::ga:customVarValue2!@student",
            })
        );
    }

    #[test]
    fn decode_report_data() {
        let body = json!({
            "kind": "analytics#gaData",
            "totalResults": 2,
            "containsSampledData": false,
            "columnHeaders": [
                {"name": "ga:year", "columnType": "DIMENSION", "dataType": "STRING"},
                {"name": "ga:sessions", "columnType": "METRIC", "dataType": "INTEGER"},
            ],
            "rows": [["2021", "100"], ["2022", "150"]],
        });

        let data: ReportData = serde_json::from_value(body).unwrap();
        assert_eq!(Some(2), data.total_results);
        assert_eq!(2, data.column_headers.len());
        assert_eq!(
            Some(vec![
                vec![json!("2021"), json!("100")],
                vec![json!("2022"), json!("150")],
            ]),
            data.rows
        );
    }

    #[test]
    fn decode_empty_report() {
        let data: ReportData =
            serde_json::from_value(json!({"kind": "analytics#gaData", "totalResults": 0})).unwrap();
        assert_eq!(None, data.rows);
        assert!(data.column_headers.is_empty());
    }
}
