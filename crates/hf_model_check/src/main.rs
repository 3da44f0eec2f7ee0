#!/usr/bin/env rust
//! hf_model_check - verify Hugging Face model access for the plant diagnostic system
//!
//! Reads HUGGINGFACE_API_KEY and HF_MODEL (from the environment or .env),
//! POSTs a 1x1 test image to the model, and reports whether it answered.
//! If it did not, a few alternative models are probed so the user can see
//! whether the key works at all.
//!
//! Usage:
//!     cargo run -p hf_model_check

use anyhow::Result;
use hf_model_check::{http_client, run, Config};
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    let client = http_client()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    // The outcome is only advisory; the exit status stays 0 either way
    run(&client, &config, &mut out).await?;
    out.flush()?;

    Ok(())
}
