use crate::core::scorer;
use crate::core::{ConfigProvider, Pipeline, RawAttributes, ScreenResult, Storage};
use crate::utils::error::{Result, ScreenError};
use reqwest::Client;
use std::fmt::Write as _;
use std::io::Write;
use tokio::task::JoinSet;
use zip::write::{FileOptions, ZipWriter};

pub struct ScreenPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> ScreenPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    async fn fetch_universe(&self) -> Result<Vec<String>> {
        let endpoint = self.config.universe_endpoint();
        tracing::debug!("Fetching ticker universe from: {}", endpoint);

        let response = self.client.get(endpoint).send().await?;
        tracing::debug!("Universe response status: {}", response.status());

        if !response.status().is_success() {
            return Err(ScreenError::ProcessingError {
                message: format!(
                    "universe request to {} returned {}",
                    endpoint,
                    response.status()
                ),
            });
        }

        let tickers: Vec<String> = response.json().await?;
        if tickers.is_empty() {
            return Err(ScreenError::ProcessingError {
                message: format!("universe endpoint {} returned no tickers", endpoint),
            });
        }
        Ok(tickers)
    }
}

/// Fetches the attribute bag for one ticker. Never fails: any transport or
/// decode problem degrades to an empty bag so one bad ticker cannot abort
/// the batch.
async fn fetch_quote(client: &Client, url: &str) -> RawAttributes {
    match client.get(url).send().await {
        Ok(response) if response.status().is_success() => {
            match response.json::<RawAttributes>().await {
                Ok(attrs) => attrs,
                Err(e) => {
                    tracing::warn!("Malformed quote body from {}: {}", url, e);
                    RawAttributes::default()
                }
            }
        }
        Ok(response) => {
            tracing::warn!("Quote request to {} returned {}", url, response.status());
            RawAttributes::default()
        }
        Err(e) => {
            tracing::warn!("Quote request to {} failed: {}", url, e);
            RawAttributes::default()
        }
    }
}

fn csv_field(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn render_summary(result_ranked: &[crate::core::ScoreRecord], excluded: usize) -> String {
    let mut out = String::new();

    if result_ranked.is_empty() {
        out.push_str("No stocks met the criteria or data fetching failed.\n");
        return out;
    }

    let top = &result_ranked[0];
    let _ = writeln!(out, "{}", "=".repeat(40));
    let _ = writeln!(out, "TOP RECOMMENDATION: {}", top.ticker);
    let _ = writeln!(out, "{}", "=".repeat(40));
    let _ = writeln!(out, "Score: {}/5", top.score);
    out.push_str("Details:\n");
    for detail in &top.details {
        let _ = writeln!(out, " - {}", detail);
    }

    out.push_str("\nTop 5 Candidates:\n");
    for (i, record) in result_ranked.iter().take(5).enumerate() {
        let peg = record
            .metrics
            .peg_raw
            .map(|p| format!("{:.2}", p))
            .unwrap_or_else(|| "N/A".to_string());
        let _ = writeln!(
            out,
            "{}. {} (Score: {}, PEG: {})",
            i + 1,
            record.ticker,
            record.score,
            peg
        );
        for detail in &record.details {
            let _ = writeln!(out, " - {}", detail);
        }
    }

    if excluded > 0 {
        let _ = writeln!(out, "\nExcluded for missing data: {}", excluded);
    }

    out
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ScreenPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<(String, RawAttributes)>> {
        let mut tickers = self.fetch_universe().await?;
        tracing::info!("Universe holds {} tickers", tickers.len());

        if let Some(max) = self.config.max_tickers() {
            tickers.truncate(max);
        }

        let concurrency = self.config.concurrent_requests().max(1);
        let quote_base = self.config.quote_endpoint().trim_end_matches('/').to_string();

        // Fetch quotes one chunk at a time so at most `concurrency` requests
        // are in flight. Results go back into their universe slot to keep
        // the input order, which the ranking tie-break relies on.
        let mut records = Vec::with_capacity(tickers.len());
        for chunk in tickers.chunks(concurrency) {
            let mut set = JoinSet::new();
            for (i, ticker) in chunk.iter().enumerate() {
                let client = self.client.clone();
                let url = format!("{}/{}", quote_base, ticker);
                let ticker = ticker.clone();
                set.spawn(async move {
                    let attrs = fetch_quote(&client, &url).await;
                    (i, ticker, attrs)
                });
            }

            let mut slots: Vec<Option<(String, RawAttributes)>> = vec![None; chunk.len()];
            while let Some(joined) = set.join_next().await {
                let (i, ticker, attrs) = joined.map_err(|e| ScreenError::ProcessingError {
                    message: format!("quote fetch task failed: {}", e),
                })?;
                slots[i] = Some((ticker, attrs));
            }
            records.extend(slots.into_iter().flatten());
        }

        Ok(records)
    }

    async fn transform(&self, data: Vec<(String, RawAttributes)>) -> Result<ScreenResult> {
        let excluded: Vec<String> = data
            .iter()
            .filter(|(_, attrs)| attrs.is_empty())
            .map(|(ticker, _)| ticker.clone())
            .collect();

        let ranked = scorer::rank_stocks(data);
        tracing::info!(
            "Ranked {} stocks ({} excluded for missing data)",
            ranked.len(),
            excluded.len()
        );

        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        let universe = self.config.universe_label();

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "date",
            "universe",
            "ticker",
            "score",
            "roe",
            "margin",
            "rev_growth",
            "debt_to_equity",
            "peg",
            "pe",
            "details",
        ])?;
        for record in &ranked {
            writer.write_record([
                date.clone(),
                universe.to_string(),
                record.ticker.clone(),
                record.score.to_string(),
                csv_field(record.metrics.roe),
                csv_field(record.metrics.margin),
                csv_field(record.metrics.rev_growth),
                csv_field(record.metrics.debt_to_equity),
                csv_field(record.metrics.peg_raw),
                csv_field(record.metrics.pe),
                record.details.join("; "),
            ])?;
        }
        let csv_bytes = writer
            .into_inner()
            .map_err(|e| ScreenError::ProcessingError {
                message: format!("csv writer flush failed: {}", e),
            })?;
        let csv_output =
            String::from_utf8(csv_bytes).map_err(|e| ScreenError::ProcessingError {
                message: format!("csv output was not valid UTF-8: {}", e),
            })?;

        let summary_output = render_summary(&ranked, excluded.len());

        Ok(ScreenResult {
            ranked,
            excluded,
            csv_output,
            summary_output,
        })
    }

    async fn load(&self, result: ScreenResult) -> Result<String> {
        let output_path = format!("{}/screen_output.zip", self.config.output_path());

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file::<_, ()>("picks.csv", FileOptions::default())?;
            zip.write_all(result.csv_output.as_bytes())?;

            zip.start_file::<_, ()>("summary.txt", FileOptions::default())?;
            zip.write_all(result.summary_output.as_bytes())?;

            zip.start_file::<_, ()>("picks.json", FileOptions::default())?;
            let json_data = serde_json::to_string_pretty(&result.ranked)?;
            zip.write_all(json_data.as_bytes())?;

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing report archive ({} bytes) to storage", zip_data.len());
        self.storage
            .write_file("screen_output.zip", &zip_data)
            .await?;

        Ok(output_path)
    }
}
