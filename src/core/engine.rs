use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ScreenerEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ScreenerEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting screening run...");

        tracing::info!("Fetching universe and quotes...");
        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Fetched attributes for {} tickers", raw_data.len());

        tracing::info!("Scoring and ranking...");
        let result = self.pipeline.transform(raw_data).await?;
        tracing::info!(
            "Shortlist holds {} stocks, {} excluded",
            result.ranked.len(),
            result.excluded.len()
        );

        tracing::info!("Writing report...");
        let summary = result.summary_output.clone();
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Report saved to: {}", output_path);

        println!("{}", summary);

        Ok(output_path)
    }
}
