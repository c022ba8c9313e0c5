use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct SeriesPoint {
    date: String,
    value: f64,
}

#[derive(Debug, Deserialize)]
struct Series {
    region: Option<String>,
    points: Vec<SeriesPoint>,
}

#[derive(Debug, Deserialize)]
struct ViewResponse {
    series: Vec<Series>,
    conclusion: String,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    mean_before: f64,
    mean_after: f64,
    percent_change_first_to_last: f64,
    first_date: String,
    last_date: String,
    conclusion: String,
}

const FIXTURE_CSV: &str = "\
sales,date,region
$100.0,2021-01-10,north
$150.0,2021-01-11,south
$200.0,2021-01-12,north
$130.0,2021-01-13,south
$170.0,2021-01-14,north
$180.0,2021-01-15,south
";

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn write_fixture() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("sales_viz_http_{}_{}.csv", std::process::id(), nanos));
    std::fs::write(&path, FIXTURE_CSV).expect("write fixture csv");
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/summary")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = write_fixture();
    let child = Command::new(env!("CARGO_BIN_EXE_sales_viz"))
        .env("PORT", port.to_string())
        .env("SALES_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

// All endpoints are read-only, so every test shares one server.
async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

#[tokio::test]
async fn http_daily_view_returns_every_record() {
    let server = shared_server().await;
    let client = Client::new();

    let view: ViewResponse = client
        .get(format!(
            "{}/api/view?series=daily&region=all",
            server.base_url
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(view.series.len(), 1);
    assert_eq!(view.series[0].region, None);
    assert_eq!(view.series[0].points.len(), 6);
    assert_eq!(view.series[0].points[0].date, "2021-01-10");
    assert_eq!(view.series[0].points[0].value, 100.0);
    assert!(view.conclusion.contains("80.00%"));
}

#[tokio::test]
async fn http_cumulative_view_splits_regions() {
    let server = shared_server().await;
    let client = Client::new();

    let view: ViewResponse = client
        .get(format!(
            "{}/api/view?series=cumulative&region=all",
            server.base_url
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(view.series.len(), 2);
    assert_eq!(view.series[0].region.as_deref(), Some("north"));
    assert_eq!(view.series[0].points.last().unwrap().value, 470.0);
    assert_eq!(view.series[1].region.as_deref(), Some("south"));
    assert_eq!(view.series[1].points.last().unwrap().value, 460.0);
}

#[tokio::test]
async fn http_cumulative_view_single_region() {
    let server = shared_server().await;
    let client = Client::new();

    let view: ViewResponse = client
        .get(format!(
            "{}/api/view?series=cumulative&region=north",
            server.base_url
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(view.series.len(), 1);
    assert_eq!(view.series[0].region.as_deref(), Some("north"));
    let values: Vec<f64> = view.series[0].points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![100.0, 300.0, 470.0]);
}

#[tokio::test]
async fn http_unknown_region_is_bad_request() {
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/api/view?series=daily&region=atlantis",
            server.base_url
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("atlantis"));
}

#[tokio::test]
async fn http_unknown_series_is_bad_request() {
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/view?series=pie", server.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_summary_reports_split_means() {
    let server = shared_server().await;
    let client = Client::new();

    let summary: SummaryResponse = client
        .get(format!("{}/api/summary", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(summary.mean_before, 150.0);
    assert_eq!(summary.mean_after, 180.0);
    assert_eq!(summary.percent_change_first_to_last, 80.0);
    assert_eq!(summary.first_date, "2021-01-10");
    assert_eq!(summary.last_date, "2021-01-15");
    assert!(summary.conclusion.contains("$150.00"));
    assert!(summary.conclusion.contains("$180.00"));
}

#[tokio::test]
async fn http_regions_are_sorted_and_distinct() {
    let server = shared_server().await;
    let client = Client::new();

    let body: serde_json::Value = client
        .get(format!("{}/api/regions", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["regions"], serde_json::json!(["north", "south"]));
}
