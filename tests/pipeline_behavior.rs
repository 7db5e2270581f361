//! Behavior-driven tests for the report pipeline
//!
//! These tests run the full resolve, fetch, enrich, write sequence over
//! a scripted transport and verify both the returned summary and the
//! CSV that lands on disk.

use std::fs;
use std::path::Path;

use kursblatt_tests::{
    compact_timestamp, daily_series_payload, iso_day, mapping_payload, news_payload, parse_report,
    recent_day, test_config, Arc, FetchError, HttpError, HttpMethod, HttpResponse, Identifier,
    PipelineError, ReportPipeline, ResolutionError, ScriptedHttpClient,
};
use tempfile::tempdir;

fn pipeline_with_script(
    dir: &Path,
    window_days: u32,
    script: Vec<Result<HttpResponse, HttpError>>,
) -> (ReportPipeline, Arc<ScriptedHttpClient>) {
    let http = Arc::new(ScriptedHttpClient::new(script));
    let config = test_config(dir, window_days);
    let pipeline = ReportPipeline::new(&config, http.clone());
    (pipeline, http)
}

fn read_report(path: &Path) -> Vec<Vec<String>> {
    let content = fs::read_to_string(path).expect("report file should exist");
    parse_report(&content)
}

// =============================================================================
// Pipeline: End-to-End Success
// =============================================================================

#[tokio::test]
async fn when_isin_resolves_full_report_is_written() {
    // Given: five recent trading days and one news item for one of them
    let dir = tempdir().expect("tempdir");
    let days: Vec<_> = (0..5).map(recent_day).collect();
    let news_day = days[1];
    let (pipeline, http) = pipeline_with_script(
        dir.path(),
        30,
        vec![
            Ok(HttpResponse::ok_json(mapping_payload("AAPL"))),
            Ok(HttpResponse::ok_json(daily_series_payload(&days))),
            Ok(HttpResponse::ok_json(news_payload(&[(
                "Apple announces results",
                "Earnings beat expectations",
                &compact_timestamp(news_day),
            )]))),
        ],
    );

    // When: the pipeline runs for a US ISIN
    let identifier = Identifier::parse("US0378331005").expect("valid identifier");
    let summary = pipeline
        .run(&identifier)
        .await
        .expect("pipeline should succeed");

    // Then: the summary reflects what was written
    assert_eq!(summary.ticker.as_str(), "AAPL");
    assert_eq!(summary.rows, 5);
    assert_eq!(summary.enriched_rows, 1);
    assert_eq!(summary.path, dir.path().join("AAPL.csv"));
    assert!(summary.news_warning.is_none());

    // And: the file has a header plus one row per day, oldest first
    let rows = read_report(&summary.path);
    assert_eq!(rows.len(), 6);
    assert_eq!(
        rows[0],
        vec!["Date", "Open", "High", "Low", "Close", "Volume", "News Title", "News Summary"]
    );
    let dates: Vec<&str> = rows[1..].iter().map(|row| row[0].as_str()).collect();
    let mut sorted = dates.clone();
    sorted.sort_unstable();
    assert_eq!(dates, sorted, "rows should be in ascending date order");

    // And: exactly the news day carries the headline
    let news_row = rows[1..]
        .iter()
        .find(|row| row[0] == iso_day(news_day))
        .expect("news day should be present");
    assert_eq!(news_row[6], "Apple announces results");
    assert_eq!(news_row[7], "Earnings beat expectations");
    let with_news = rows[1..].iter().filter(|row| !row[6].is_empty()).count();
    assert_eq!(with_news, 1);

    // And: the ISIN was sent to the mapping endpoint as ID_ISIN
    let requests = http.recorded_requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert!(requests[0].url.contains("api.openfigi.com/v3/mapping"));
    let mapping_body = requests[0].body.as_deref().expect("mapping request body");
    assert!(mapping_body.contains("ID_ISIN"));
    assert!(mapping_body.contains("US0378331005"));
    assert!(requests[1].url.contains("function=TIME_SERIES_DAILY"));
    assert!(requests[1].url.contains("symbol=AAPL"));
    assert!(requests[1].url.contains("outputsize=full"));
    assert!(requests[2].url.contains("function=NEWS_SENTIMENT"));
}

#[tokio::test]
async fn when_wkn_is_used_mapping_requests_the_wertpapier_scheme() {
    // Given: a six-character German WKN
    let dir = tempdir().expect("tempdir");
    let days = vec![recent_day(1)];
    let (pipeline, http) = pipeline_with_script(
        dir.path(),
        30,
        vec![
            Ok(HttpResponse::ok_json(mapping_payload("SAP"))),
            Ok(HttpResponse::ok_json(daily_series_payload(&days))),
            Ok(HttpResponse::ok_json(news_payload(&[]))),
        ],
    );

    // When: the pipeline runs
    let identifier = Identifier::parse("716460").expect("valid identifier");
    let summary = pipeline
        .run(&identifier)
        .await
        .expect("pipeline should succeed");

    // Then: the lookup used the WKN scheme and the file is named after
    // the resolved ticker
    let requests = http.recorded_requests();
    let mapping_body = requests[0].body.as_deref().expect("mapping request body");
    assert!(mapping_body.contains("ID_WERTPAPIER"));
    assert!(mapping_body.contains("716460"));
    assert_eq!(summary.ticker.as_str(), "SAP");
    assert!(dir.path().join("SAP.csv").is_file());
}

// =============================================================================
// Pipeline: Resolution Failures
// =============================================================================

#[tokio::test]
async fn when_mapping_finds_no_match_no_downstream_calls_are_made() {
    // Given: a mapping response with no match groups
    let dir = tempdir().expect("tempdir");
    let (pipeline, http) =
        pipeline_with_script(dir.path(), 30, vec![Ok(HttpResponse::ok_json("[]"))]);

    // When: the pipeline runs
    let identifier = Identifier::parse("XX0000000000").expect("valid identifier");
    let result = pipeline.run(&identifier).await;

    // Then: the run fails with a not-found resolution error
    let error = result.expect_err("unresolved identifier should fail");
    assert!(matches!(
        error,
        PipelineError::Resolution(ResolutionError::NotFound { .. })
    ));

    // And: no price or news request was ever made, and nothing was written
    assert_eq!(http.recorded_requests().len(), 1);
    assert_eq!(fs::read_dir(dir.path()).expect("read dir").count(), 0);
}

// =============================================================================
// Pipeline: Fetch Failures
// =============================================================================

#[tokio::test]
async fn when_provider_returns_empty_series_no_report_is_created() {
    // Given: a resolved ticker whose daily series comes back empty
    let dir = tempdir().expect("tempdir");
    let (pipeline, http) = pipeline_with_script(
        dir.path(),
        30,
        vec![
            Ok(HttpResponse::ok_json(mapping_payload("AAPL"))),
            Ok(HttpResponse::ok_json("{}")),
        ],
    );

    // When: the pipeline runs
    let identifier = Identifier::parse("US0378331005").expect("valid identifier");
    let result = pipeline.run(&identifier).await;

    // Then: the run fails before the news stage and before any write
    let error = result.expect_err("empty series should fail");
    assert!(matches!(
        error,
        PipelineError::Fetch(FetchError::Empty { .. })
    ));
    assert_eq!(http.recorded_requests().len(), 2);
    assert_eq!(fs::read_dir(dir.path()).expect("read dir").count(), 0);
}

// =============================================================================
// Pipeline: News Degradation
// =============================================================================

#[tokio::test]
async fn when_news_transport_fails_report_is_still_written_price_only() {
    // Given: prices resolve and fetch fine but the news call cannot connect
    let dir = tempdir().expect("tempdir");
    let days = vec![recent_day(2), recent_day(1)];
    let (pipeline, http) = pipeline_with_script(
        dir.path(),
        30,
        vec![
            Ok(HttpResponse::ok_json(mapping_payload("AAPL"))),
            Ok(HttpResponse::ok_json(daily_series_payload(&days))),
            Err(HttpError::non_retryable("connection refused")),
        ],
    );

    // When: the pipeline runs
    let identifier = Identifier::parse("US0378331005").expect("valid identifier");
    let summary = pipeline
        .run(&identifier)
        .await
        .expect("news failure must not abort the run");

    // Then: the summary carries the warning and no row has news
    let warning = summary.news_warning.expect("warning should be set");
    assert!(warning.contains("connection refused"));
    assert_eq!(summary.rows, 2);
    assert_eq!(summary.enriched_rows, 0);

    let rows = read_report(&summary.path);
    assert_eq!(rows.len(), 3);
    for row in &rows[1..] {
        assert_eq!(row[6], "");
        assert_eq!(row[7], "");
    }
    assert_eq!(http.recorded_requests().len(), 3);
}

#[tokio::test]
async fn when_news_endpoint_returns_server_error_report_is_price_only() {
    // Given: the news endpoint answers with a 500
    let dir = tempdir().expect("tempdir");
    let days = vec![recent_day(1)];
    let (pipeline, _http) = pipeline_with_script(
        dir.path(),
        30,
        vec![
            Ok(HttpResponse::ok_json(mapping_payload("AAPL"))),
            Ok(HttpResponse::ok_json(daily_series_payload(&days))),
            Ok(HttpResponse {
                status: 500,
                body: "internal error".to_string(),
            }),
        ],
    );

    // When: the pipeline runs
    let identifier = Identifier::parse("US0378331005").expect("valid identifier");
    let summary = pipeline
        .run(&identifier)
        .await
        .expect("news failure must not abort the run");

    // Then: the report exists and the warning names the status
    let warning = summary.news_warning.expect("warning should be set");
    assert!(warning.contains("500"), "warning should name the status: {warning}");
    assert!(summary.path.is_file());
    assert_eq!(summary.enriched_rows, 0);
}

// =============================================================================
// Pipeline: Window Filtering
// =============================================================================

#[tokio::test]
async fn when_stale_days_fall_outside_the_window_they_are_dropped() {
    // Given: a series with two recent days and one day far past the window
    let dir = tempdir().expect("tempdir");
    let stale = recent_day(40);
    let days = vec![stale, recent_day(2), recent_day(0)];
    let (pipeline, _http) = pipeline_with_script(
        dir.path(),
        30,
        vec![
            Ok(HttpResponse::ok_json(mapping_payload("AAPL"))),
            Ok(HttpResponse::ok_json(daily_series_payload(&days))),
            Ok(HttpResponse::ok_json(news_payload(&[]))),
        ],
    );

    // When: the pipeline runs with a 30-day window
    let identifier = Identifier::parse("US0378331005").expect("valid identifier");
    let summary = pipeline
        .run(&identifier)
        .await
        .expect("pipeline should succeed");

    // Then: only the days inside the window are written
    assert_eq!(summary.rows, 2);
    let rows = read_report(&summary.path);
    assert!(
        rows[1..].iter().all(|row| row[0] != iso_day(stale)),
        "stale day should not appear in the report"
    );
}
