use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, DataConfig};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::{routes, startup};

fn cors() -> CorsLayer { CorsLayer::very_permissive() }

struct TestApp {
    base_url: String,
    data_path: std::path::PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.data_path);
    }
}

async fn start_server() -> anyhow::Result<TestApp> {
    // isolated seed file per test run
    let data_path = std::env::temp_dir().join(format!("vehicles_e2e_{}.json", Uuid::new_v4()));
    let seed = json!([
        {"id": 1, "brand": "Chevrolet", "model": "Onix", "registration": "CH-1", "color": "Silver",
         "year": 2019, "passengers": 5, "max_speed": 175.0, "fuel_type": "gasoline",
         "transmission": "manual", "weight": 1050.0, "height": 1.47, "length": 4.16, "width": 1.73},
        {"id": 2, "brand": "Chevrolet", "model": "Cruze", "registration": "CH-2", "color": "Black",
         "year": 2021, "passengers": 5, "max_speed": 205.0, "fuel_type": "gasoline",
         "transmission": "automatic", "weight": 1350.0,
         "height": 1.48, "length": 4.67, "width": 1.80}
    ]);
    tokio::fs::write(&data_path, serde_json::to_vec(&seed)?).await?;

    let cfg = AppConfig {
        data: DataConfig { vehicles_path: data_path.to_string_lossy().into_owned() },
        ..Default::default()
    };
    let state = startup::build_state(&cfg).await?;
    let app: Router = routes::build_router(state, cors());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, data_path })
}

#[tokio::test]
async fn e2e_seeded_store_is_served() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.get(format!("{}/vehicles", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"]["2"]["model"], "Cruze");

    let res = c
        .get(format!("{}/vehicles/average-speed/brand/Chevrolet", app.base_url))
        .send()
        .await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["average_speed"], 190.0);
    Ok(())
}

#[tokio::test]
async fn e2e_create_update_delete_cycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.post(format!("{}/vehicles", app.base_url))
        .json(&json!({
            "brand": "Fiat", "model": "Uno", "registration": "FI-1", "color": "Red", "year": 2010
        }))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["id"], 3);

    let res = c.patch(format!("{}/vehicles/3/update-fuel", app.base_url))
        .json(&json!({"fuel_type": "BIODIESEL"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.get(format!("{}/vehicles/fuel-type/biodiesel", app.base_url)).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["count"], 1);

    let res = c.delete(format!("{}/vehicles/3", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    // deleted ids are not handed out again
    let res = c.post(format!("{}/vehicles", app.base_url))
        .json(&json!({
            "brand": "Fiat", "model": "Palio", "registration": "FI-2", "color": "Red", "year": 2012
        }))
        .send().await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["id"], 4);
    Ok(())
}

#[tokio::test]
async fn e2e_missing_data_file_starts_empty() -> anyhow::Result<()> {
    let cfg = AppConfig {
        data: DataConfig { vehicles_path: format!("/nonexistent/{}.json", Uuid::new_v4()) },
        ..Default::default()
    };
    let state = startup::build_state(&cfg).await?;
    assert!(state.vehicles.find_all().await?.is_empty());
    Ok(())
}
