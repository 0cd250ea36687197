//! Decoder output boundary.
//!
//! The PDF decoder is an external collaborator. Its contract: raw PDF bytes
//! in, JSON out — an array of pages, each an array of `{x, y, text}` runs in
//! decode order. Text runs arrive percent-encoded and are decoded here
//! before anything looks at them.

use anyhow::{Context, Result};
use percent_encoding::percent_decode_str;
use serde::Deserialize;

use crate::text::{Fragment, Page};

#[derive(Debug, Deserialize)]
struct RawFragment {
    x: f64,
    y: f64,
    text: String,
}

/// Deserialize decoder output and percent-decode every text run.
pub fn load_pages(json: &str) -> Result<Vec<Page>> {
    let raw: Vec<Vec<RawFragment>> =
        serde_json::from_str(json).context("decoder output is not pages of {x, y, text} runs")?;

    raw.into_iter()
        .map(|page| page.into_iter().map(decode_fragment).collect())
        .collect()
}

fn decode_fragment(raw: RawFragment) -> Result<Fragment> {
    let text = percent_decode_str(&raw.text)
        .decode_utf8()
        .with_context(|| format!("text run at ({}, {}) is not valid UTF-8", raw.x, raw.y))?
        .into_owned();

    Ok(Fragment {
        x: raw.x,
        y: raw.y,
        text,
    })
}
