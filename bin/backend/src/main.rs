//! Teller Backend Binary
//!
//! Reads configuration from the environment, initializes logging, and
//! serves the session API on BIND_ADDR (default 127.0.0.1:8000).

#[tokio::main]
async fn main() {
    let config = teller_server::Config::from_env();
    teller_core::log(config.debug);
    teller_server::run(config).await.unwrap();
}
