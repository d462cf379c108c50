use std::error::Error;
use std::sync::Arc;

use route_cors_rs::{Cors, CorsPolicy};

pub type SharedCors = Arc<Cors>;
pub type SharedAppState = Arc<AppState>;

/// Route policy in the shape the routing layer hands over.
const ROUTE_POLICY: &str = r#"{
    "allowOrigins": ["http://api.example.com", "https://*.example.com"],
    "allowCredentials": true,
    "allowMethods": ["GET", "POST", "OPTIONS"],
    "allowHeaders": ["Content-Type", "X-Requested-With", "X-Example-Trace"],
    "exposeHeaders": ["X-Example-Trace"],
    "maxAge": 600
}"#;

#[derive(Clone)]
pub struct AppState {
    pub cors: SharedCors,
    pub greeting: &'static str,
}

pub fn build_state() -> Result<SharedAppState, Box<dyn Error + Send + Sync>> {
    let policy: CorsPolicy = serde_json::from_str(ROUTE_POLICY)?;
    let cors = Arc::new(Cors::new(policy)?);

    Ok(Arc::new(AppState {
        cors,
        greeting: "Welcome to the Hyper CORS example!",
    }))
}

pub mod middleware;
