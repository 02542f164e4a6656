//! Parity CLI
//!

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    parity_lib::cli().await
}
