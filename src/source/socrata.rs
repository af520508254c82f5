use std::future::Future;
use std::ops::RangeInclusive;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::{StreamExt, TryStreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::SourceConfig;
use crate::models::ContractRecord;

/// Paginated reader for the SECOP II contracts dataset on datos.gov.co.
pub struct SocrataClient {
    client: Client,
    config: SourceConfig,
}

impl SocrataClient {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("secop-taxonomy/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Query parameters for one page of `year`, starting at `offset`.
    pub fn page_params(&self, year: i32, offset: usize) -> Vec<(&'static str, String)> {
        vec![
            ("$limit", self.config.chunk_size.to_string()),
            ("$offset", offset.to_string()),
            ("$select", self.config.columns.join(", ")),
            (
                "$where",
                format!(
                    "orden='{}' AND tipo_de_contrato='{}' AND date_extract_y(fecha_de_firma)={}",
                    self.config.orden, self.config.tipo_de_contrato, year
                ),
            ),
        ]
    }

    async fn fetch_page(&self, year: i32, offset: usize) -> Result<Vec<ContractRecord>> {
        let params = self.page_params(year, offset);
        let delay = Duration::from_millis(self.config.page_delay_ms);
        let (client, url, params) = (&self.client, &self.config.base_url, &params);

        let body = with_retry(self.config.max_retries, delay, || async move {
            let response = client
                .get(url)
                .query(params)
                .send()
                .await?
                .error_for_status()?;
            Ok(response.json::<serde_json::Value>().await?)
        })
        .await
        .with_context(|| format!("fetching {} page at offset {}", year, offset))?;

        decode_page(body, year)
    }

    /// Download every page for `year`, stopping at the first empty page.
    pub async fn fetch_year(&self, year: i32, pb: Option<&ProgressBar>) -> Result<Vec<ContractRecord>> {
        let pause = Duration::from_millis(self.config.page_delay_ms);
        collect_pages(self.config.chunk_size, pause, move |offset| async move {
            let page = self.fetch_page(year, offset).await?;
            debug!(year, offset, rows = page.len(), "page downloaded");
            if let Some(pb) = pb {
                pb.inc(page.len() as u64);
            }
            Ok(page)
        })
        .await
    }

    /// Download a range of signing years, in year order.
    pub async fn fetch_years(
        &self,
        years: RangeInclusive<i32>,
        quiet: bool,
    ) -> Result<Vec<ContractRecord>> {
        let pb = if !quiet {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {pos} records {msg}")?,
            );
            pb.enable_steady_tick(Duration::from_millis(120));
            pb.set_message(format!("({}-{})", years.start(), years.end()));
            Some(pb)
        } else {
            None
        };

        let progress = pb.as_ref();
        let per_year: Vec<Vec<ContractRecord>> = futures::stream::iter(years)
            .map(move |year| self.fetch_year(year, progress))
            .buffered(self.config.concurrent_years.max(1))
            .try_collect()
            .await?;

        if let Some(pb) = pb {
            pb.finish_with_message("Done");
        }

        Ok(per_year.into_iter().flatten().collect())
    }
}

/// Decode a page body (a JSON array of rows) and stamp the signing year.
pub fn decode_page(body: serde_json::Value, year: i32) -> Result<Vec<ContractRecord>> {
    let mut rows: Vec<ContractRecord> =
        serde_json::from_value(body).context("unexpected page format")?;
    for row in &mut rows {
        row.anio = Some(year);
    }
    Ok(rows)
}

/// Request pages at offsets `0, page_size, 2 * page_size, ...`, pausing
/// between requests, until a page comes back empty.
pub async fn collect_pages<T, F, Fut>(page_size: usize, pause: Duration, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut offset = 0;
    let mut rows = Vec::new();

    loop {
        let page = fetch(offset).await?;
        if page.is_empty() {
            return Ok(rows);
        }
        rows.extend(page);
        offset += page_size;
        tokio::time::sleep(pause).await;
    }
}

/// Run `op` up to `max_retries` times, doubling the pause after each failure.
pub async fn with_retry<T, F, Fut>(max_retries: u32, initial_delay: Duration, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let attempts = max_retries.max(1);
    let mut delay = initial_delay;
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < attempts => {
                warn!(attempt, error = %err, "request failed, retrying");
                tokio::time::sleep(delay).await;
                delay *= 2;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
