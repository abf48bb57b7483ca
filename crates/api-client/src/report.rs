//! Price report fetches against `/result/reports`.

use crate::{ApiClient, ApiResult};
use chrono::Utc;
use eolmadak_types::{PriceReport, ReportRequest, ReportSnapshot};

const REPORTS_PATH: &str = "result/reports";

impl ApiClient {
    /// Fetch a price report for the given criteria (`POST /result/reports`).
    ///
    /// The snapshot is stamped with the client-side fetch time. No retry or
    /// backoff: a failure is returned to the caller, which owns the
    /// terminal error state and any user-initiated retry.
    pub async fn fetch_report(&self, request: &ReportRequest) -> ApiResult<ReportSnapshot> {
        let report: PriceReport = self.post_json(REPORTS_PATH, request).await?;
        tracing::info!(
            clinic_code = %request.clinic_code,
            result_count = report.result_count,
            "fetched price report"
        );
        Ok(ReportSnapshot {
            report,
            fetched_at: Utc::now(),
        })
    }

    /// Session-based report variant (`GET /result/reports`): the backend
    /// derives the criteria from the server-side session.
    pub async fn fetch_report_session(&self) -> ApiResult<ReportSnapshot> {
        let report: PriceReport = self.get_json(REPORTS_PATH, &[]).await?;
        Ok(ReportSnapshot {
            report,
            fetched_at: Utc::now(),
        })
    }
}
