use async_trait::async_trait;
use anx_types::Dataset;

use crate::builder::SheetSourceBuilder;
use crate::error::{LoaderError, Result};
use crate::parse::{parse_flows, parse_lines};
use crate::source::LineSource;

/// Reads the `lines` and `flows` sheets of a Google spreadsheet through its CSV export
#[derive(Debug, Clone)]
pub struct SheetSource {
    client: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    lines_sheet: String,
    flows_sheet: String,
}

impl SheetSource {
    pub fn builder() -> SheetSourceBuilder {
        SheetSourceBuilder::new()
    }

    pub(crate) fn new(
        client: reqwest::Client,
        base_url: String,
        spreadsheet_id: String,
        lines_sheet: String,
        flows_sheet: String,
    ) -> Self {
        Self {
            client,
            base_url,
            spreadsheet_id,
            lines_sheet,
            flows_sheet,
        }
    }

    /// Export endpoint, without the sheet query
    pub fn export_url(&self) -> String {
        format!(
            "{}/spreadsheets/d/{}/gviz/tq",
            self.base_url.trim_end_matches('/'),
            self.spreadsheet_id
        )
    }

    async fn download(&self, sheet: &str) -> Result<String> {
        tracing::debug!(sheet = %sheet, url = %self.export_url(), "downloading sheet");

        let response = self
            .client
            .get(self.export_url())
            .query(&[("tqx", "out:csv"), ("sheet", sheet)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoaderError::Status {
                sheet: sheet.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl LineSource for SheetSource {
    async fn fetch(&self) -> Result<Dataset> {
        let (lines_body, flows_body) = futures::try_join!(
            self.download(&self.lines_sheet),
            self.download(&self.flows_sheet)
        )?;

        let lines = parse_lines(&self.lines_sheet, &lines_body)?;
        let flows = parse_flows(&self.flows_sheet, &flows_body)?;

        tracing::info!(
            spreadsheet = %self.spreadsheet_id,
            lines = lines.len(),
            flows = flows.len(),
            "fetched bot lines and flows"
        );

        Ok(Dataset::new(lines, flows))
    }

    fn name(&self) -> &str {
        "google-sheets"
    }
}
