use httpmock::prelude::*;
use qgarp_screener::core::Pipeline;
use qgarp_screener::{CliConfig, LocalStorage, ScreenPipeline, ScreenerEngine};

fn test_config(server: &MockServer, output_path: &str) -> CliConfig {
    CliConfig {
        universe_endpoint: server.url("/universe"),
        quote_endpoint: server.url("/quote"),
        output_path: output_path.to_string(),
        universe: "test-universe".to_string(),
        concurrent_requests: 3,
        max_tickers: None,
        verbose: false,
    }
}

fn mock_quote(server: &MockServer, ticker: &str, body: serde_json::Value) {
    server.mock(|when, then| {
        when.method(GET).path(format!("/quote/{}", ticker));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(body);
    });
}

/// Universe of four tickers: one scores 5, two score 4 with different PEGs,
/// one fails to fetch entirely.
fn mock_standard_universe(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/universe");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!(["STAR", "FOURB", "FOURA", "DEAD"]));
    });

    mock_quote(
        server,
        "STAR",
        serde_json::json!({
            "returnOnEquity": 0.28,
            "profitMargins": 0.22,
            "revenueGrowth": 0.15,
            "debtToEquity": 25.0,
            "pegRatio": 1.1,
            "trailingPE": 24.0,
            "earningsGrowth": 0.2
        }),
    );
    // Fails the leverage criterion; PEG derived from PE and growth.
    mock_quote(
        server,
        "FOURB",
        serde_json::json!({
            "returnOnEquity": 0.20,
            "profitMargins": 0.15,
            "revenueGrowth": 0.10,
            "debtToEquity": 120.0,
            "trailingPE": 30.0,
            "earningsGrowth": 0.2
        }),
    );
    // Same score as FOURB but a cheaper PEG.
    mock_quote(
        server,
        "FOURA",
        serde_json::json!({
            "returnOnEquity": 0.18,
            "profitMargins": 0.12,
            "revenueGrowth": 0.08,
            "debtToEquity": 110.0,
            "pegRatio": 0.7
        }),
    );
    server.mock(|when, then| {
        when.method(GET).path("/quote/DEAD");
        then.status(500);
    });
}

#[tokio::test]
async fn test_full_run_produces_ranked_report_archive() {
    let server = MockServer::start();
    mock_standard_universe(&server);

    let output_dir = tempfile::tempdir().unwrap();
    let output_path = output_dir.path().to_str().unwrap().to_string();

    let config = test_config(&server, &output_path);
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = ScreenPipeline::new(storage, config);
    let engine = ScreenerEngine::new(pipeline);

    let report_path = engine.run().await.unwrap();
    assert_eq!(report_path, format!("{}/screen_output.zip", output_path));

    let zip_bytes = std::fs::read(&report_path).unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_bytes)).unwrap();

    let json_content = {
        let mut file = archive.by_name("picks.json").unwrap();
        let mut content = String::new();
        std::io::Read::read_to_string(&mut file, &mut content).unwrap();
        content
    };
    let records: Vec<serde_json::Value> = serde_json::from_str(&json_content).unwrap();

    // DEAD is excluded; the rest rank by score desc, then PEG asc.
    let tickers: Vec<&str> = records.iter().map(|r| r["ticker"].as_str().unwrap()).collect();
    assert_eq!(tickers, vec!["STAR", "FOURA", "FOURB"]);
    assert_eq!(records[0]["score"], 5);
    assert_eq!(records[1]["score"], 4);
    assert_eq!(records[2]["score"], 4);

    // FOURB's PEG was derived: 30 / (0.2 * 100) = 1.5.
    assert_eq!(records[2]["metrics"]["peg"], 1.5);

    let summary = {
        let mut file = archive.by_name("summary.txt").unwrap();
        let mut content = String::new();
        std::io::Read::read_to_string(&mut file, &mut content).unwrap();
        content
    };
    assert!(summary.contains("TOP RECOMMENDATION: STAR"));
    assert!(summary.contains("Score: 5/5"));
    assert!(summary.contains("Excluded for missing data: 1"));

    let csv_content = {
        let mut file = archive.by_name("picks.csv").unwrap();
        let mut content = String::new();
        std::io::Read::read_to_string(&mut file, &mut content).unwrap();
        content
    };
    let lines: Vec<&str> = csv_content.trim_end().split('\n').collect();
    assert_eq!(lines.len(), 4); // header + 3 survivors
    assert!(lines[1].contains("STAR"));
    assert!(lines[1].contains("test-universe"));
    assert!(!csv_content.contains("DEAD"));
}

#[tokio::test]
async fn test_details_are_in_rubric_order_for_every_record() {
    let server = MockServer::start();
    mock_standard_universe(&server);

    let config = test_config(&server, "unused");
    let storage = LocalStorage::new("unused".to_string());
    let pipeline = ScreenPipeline::new(storage, config);

    let data = pipeline.extract().await.unwrap();
    let result = pipeline.transform(data).await.unwrap();

    for record in &result.ranked {
        let prefixes: Vec<&str> = record
            .details
            .iter()
            .map(|d| d.split(':').next().unwrap())
            .collect();
        assert_eq!(prefixes, vec!["ROE", "Margin", "Rev Growth", "D/E", "PEG"]);
    }
}

#[tokio::test]
async fn test_repeated_runs_are_deterministic() {
    let server = MockServer::start();
    mock_standard_universe(&server);

    let config = test_config(&server, "unused");
    let storage = LocalStorage::new("unused".to_string());
    let pipeline = ScreenPipeline::new(storage, config);

    let data = pipeline.extract().await.unwrap();
    let first = pipeline.transform(data.clone()).await.unwrap();
    let second = pipeline.transform(data).await.unwrap();

    assert_eq!(first.ranked, second.ranked);
    assert_eq!(first.csv_output, second.csv_output);
    assert_eq!(first.summary_output, second.summary_output);
}

#[tokio::test]
async fn test_unfetchable_universe_fails_the_run() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/universe");
        then.status(503);
    });

    let config = test_config(&server, "unused");
    let storage = LocalStorage::new("unused".to_string());
    let pipeline = ScreenPipeline::new(storage, config);
    let engine = ScreenerEngine::new(pipeline);

    assert!(engine.run().await.is_err());
}
