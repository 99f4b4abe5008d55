// Fake DPC3848V admin UI for integration tests
//
// Serves the login page, the WPS page and the radio settings form with the
// element ids the real firmware exposes, and records what gets saved.

use axum::Router;
use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use axum::routing::get;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
    <h1>Gateway Login</h1>
    <form action="/login" method="get">
        <input id="username_login" name="username" type="text">
        <input id="password_login" name="password" type="password">
        <input type="submit" value="Log In">
    </form>
</body>
</html>"#;

const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
    <h1>Gateway Status</h1>
    <a href="WPS.php">Wireless</a>
</body>
</html>"#;

const WPS_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
    <h1>WPS</h1>
    <a href="WRadioSettings.php">Radio Settings</a>
</body>
</html>"#;

/// Shared state of the fake gateway, inspectable from tests
#[derive(Clone, Default)]
pub struct FakeGateway {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    logged_in: bool,
    last_username: Option<String>,
    radio24_enabled: bool,
    radio5_enabled: bool,
    saved: bool,
}

impl FakeGateway {
    pub fn saved(&self) -> bool {
        self.inner.lock().unwrap().saved
    }

    pub fn radio24_enabled(&self) -> bool {
        self.inner.lock().unwrap().radio24_enabled
    }

    pub fn radio5_enabled(&self) -> bool {
        self.inner.lock().unwrap().radio5_enabled
    }

    pub fn last_username(&self) -> Option<String> {
        self.inner.lock().unwrap().last_username.clone()
    }

    /// Preseed the radio state before a test run
    pub fn set_radios(&self, ghz24: bool, ghz5: bool) {
        let mut inner = self.inner.lock().unwrap();
        inner.radio24_enabled = ghz24;
        inner.radio5_enabled = ghz5;
    }
}

async fn root(State(gateway): State<FakeGateway>) -> Html<String> {
    let logged_in = gateway.inner.lock().unwrap().logged_in;
    if logged_in {
        Html(LANDING_PAGE.to_string())
    } else {
        Html(LOGIN_PAGE.to_string())
    }
}

async fn login(
    State(gateway): State<FakeGateway>,
    Query(params): Query<HashMap<String, String>>,
) -> Redirect {
    let mut inner = gateway.inner.lock().unwrap();
    inner.logged_in = true;
    inner.last_username = params.get("username").cloned();
    Redirect::to("/")
}

async fn wps() -> Html<&'static str> {
    Html(WPS_PAGE)
}

async fn radio_settings(State(gateway): State<FakeGateway>) -> Html<String> {
    let (ghz24, ghz5) = {
        let inner = gateway.inner.lock().unwrap();
        (inner.radio24_enabled, inner.radio5_enabled)
    };

    let checked = |on: bool| if on { "checked" } else { "" };

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<body>
    <h1>Radio Settings</h1>
    <form action="/save" method="get">
        <input type="radio" id="wifi_enable_en" name="radio24" value="en" {en24}>
        <input type="radio" id="wifi_enable_dis" name="radio24" value="dis" {dis24}>
        <input type="radio" id="wifi_enable_en_5g" name="radio5" value="en" {en5}>
        <input type="radio" id="wifi_enable_dis_5g" name="radio5" value="dis" {dis5}>
        <input type="submit" id="save" value="Save Settings">
    </form>
</body>
</html>"#,
        en24 = checked(ghz24),
        dis24 = checked(!ghz24),
        en5 = checked(ghz5),
        dis5 = checked(!ghz5),
    ))
}

async fn save(
    State(gateway): State<FakeGateway>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<&'static str> {
    let mut inner = gateway.inner.lock().unwrap();
    if let Some(value) = params.get("radio24") {
        inner.radio24_enabled = value == "en";
    }
    if let Some(value) = params.get("radio5") {
        inner.radio5_enabled = value == "en";
    }
    inner.saved = true;
    Html("<html><body>Settings saved</body></html>")
}

/// Start the fake gateway on an ephemeral port and return its base URL
pub async fn spawn_fake_gateway() -> (FakeGateway, String) {
    let gateway = FakeGateway::default();

    let app = Router::new()
        .route("/", get(root))
        .route("/login", get(login))
        .route("/WPS.php", get(wps))
        .route("/WRadioSettings.php", get(radio_settings))
        .route("/save", get(save))
        .with_state(gateway.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (gateway, format!("http://{}", addr))
}

/// Poll the fake gateway until the condition holds or the timeout elapses
pub async fn wait_until<F>(gateway: &FakeGateway, condition: F, timeout: Duration) -> bool
where
    F: Fn(&FakeGateway) -> bool,
{
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition(gateway) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    condition(gateway)
}
