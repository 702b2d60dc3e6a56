use std::time::Duration;

use crate::error::{LoaderError, Result};
use crate::sheet::SheetSource;

pub const DEFAULT_BASE_URL: &str = "https://docs.google.com";

pub struct SheetSourceBuilder {
    base_url: String,
    spreadsheet_id: Option<String>,
    lines_sheet: String,
    flows_sheet: String,
    timeout: Duration,
}

impl SheetSourceBuilder {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            spreadsheet_id: None,
            lines_sheet: "lines".to_string(),
            flows_sheet: "flows".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn spreadsheet_id(mut self, id: impl Into<String>) -> Self {
        self.spreadsheet_id = Some(id.into());
        self
    }

    pub fn lines_sheet(mut self, name: impl Into<String>) -> Self {
        self.lines_sheet = name.into();
        self
    }

    pub fn flows_sheet(mut self, name: impl Into<String>) -> Self {
        self.flows_sheet = name.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<SheetSource> {
        let spreadsheet_id = self
            .spreadsheet_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| LoaderError::Config("spreadsheet_id is required".to_string()))?;

        let client = reqwest::Client::builder().timeout(self.timeout).build()?;

        Ok(SheetSource::new(
            client,
            self.base_url,
            spreadsheet_id,
            self.lines_sheet,
            self.flows_sheet,
        ))
    }
}

impl Default for SheetSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
