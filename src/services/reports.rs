//! `/api/reports` — bug reports, optionally filtered by originating page.

use std::sync::Arc;

use serde_json::json;

use crate::errors::HttpError;
use crate::http::{CallOptions, HttpClient, MiddlewareSet, RequestConfig};
use crate::models::{BugReport, Envelope, Page};

const REPORTS_BASE_URI: &str = "/api/reports";

pub struct ReportsService {
    client: Arc<HttpClient>,
    middlewares: MiddlewareSet,
}

impl ReportsService {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self {
            client,
            middlewares: MiddlewareSet::new(),
        }
    }

    pub async fn create_bug_report(
        &self,
        report: &BugReport,
        options: CallOptions,
    ) -> Result<Envelope<BugReport>, HttpError> {
        self.client
            .send(
                RequestConfig::post(REPORTS_BASE_URI).with_json(report),
                &self.middlewares,
                options,
            )
            .await
    }

    pub async fn get_bug_reports(
        &self,
        options: CallOptions,
    ) -> Result<Envelope<Vec<BugReport>>, HttpError> {
        self.client
            .send(
                RequestConfig::get(REPORTS_BASE_URI),
                &self.middlewares,
                options,
            )
            .await
    }

    pub async fn get_bug_reports_by_page(
        &self,
        page: Page,
        options: CallOptions,
    ) -> Result<Envelope<Vec<BugReport>>, HttpError> {
        self.client
            .send(
                RequestConfig::post(format!("{REPORTS_BASE_URI}/page"))
                    .with_json(&json!({ "page": page })),
                &self.middlewares,
                options,
            )
            .await
    }

    pub async fn delete_bug_report(
        &self,
        id: &str,
        options: CallOptions,
    ) -> Result<Envelope<BugReport>, HttpError> {
        self.client
            .send(
                RequestConfig::delete(format!("{REPORTS_BASE_URI}/{id}")),
                &self.middlewares,
                options,
            )
            .await
    }
}
