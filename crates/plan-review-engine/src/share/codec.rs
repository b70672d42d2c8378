//! Plan <-> URL fragment encoding.
//!
//! The payload is the plan's JSON compressed with LZ-String's URI-component
//! alphabet, so links interoperate with the web and desktop clients.

use crate::models::ShareablePlan;

use super::ShareError;

/// Compressed payloads at or above this length may not survive every browser.
pub const SIZE_WARNING_THRESHOLD: usize = 6000;

/// Path segment between the share origin and the payload.
pub const SHARE_PATH: &str = "/share#";

pub fn compress(plan: &ShareablePlan) -> Result<String, ShareError> {
    let json = serde_json::to_string(plan)?;
    Ok(lz_str::compress_to_encoded_uri_component(json.as_str()))
}

/// Decodes a payload. Anything that is not a compressed plan yields `None`.
pub fn decompress(payload: &str) -> Option<ShareablePlan> {
    let Some(wide) = lz_str::decompress_from_encoded_uri_component(payload) else {
        log::debug!("share payload is not LZ-String data");
        return None;
    };
    let json = String::from_utf16(&wide).ok()?;
    if json.is_empty() {
        return None;
    }
    match serde_json::from_str(&json) {
        Ok(plan) => Some(plan),
        Err(e) => {
            log::debug!("share payload is not a plan: {e}");
            None
        }
    }
}

/// `<base>/share#<payload>`.
pub fn build_share_url(base_url: &str, plan: &ShareablePlan) -> Result<String, ShareError> {
    Ok(format!(
        "{}{SHARE_PATH}{}",
        base_url.trim_end_matches('/'),
        compress(plan)?
    ))
}

/// The payload of a share URL, or the input itself when it has no fragment.
pub fn payload_from_url(input: &str) -> &str {
    let input = input.trim();
    input.split_once('#').map_or(input, |(_, fragment)| fragment)
}

/// Decodes a share URL or bare payload.
pub fn open_share(input: &str) -> Option<ShareablePlan> {
    decompress(payload_from_url(input))
}

pub fn compressed_size(plan: &ShareablePlan) -> Result<usize, ShareError> {
    Ok(compress(plan)?.len())
}

/// Whether the plan's link stays under [`SIZE_WARNING_THRESHOLD`].
pub fn is_size_safe(plan: &ShareablePlan) -> bool {
    compressed_size(plan).is_ok_and(|size| size < SIZE_WARNING_THRESHOLD)
}

/// A share link plus the soft size warning shown next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    pub url: String,
    pub payload_len: usize,
    pub size_safe: bool,
}

pub fn share_link(base_url: &str, plan: &ShareablePlan) -> Result<ShareLink, ShareError> {
    let payload = compress(plan)?;
    let payload_len = payload.len();
    let size_safe = payload_len < SIZE_WARNING_THRESHOLD;
    if !size_safe {
        log::warn!(
            "share payload is {payload_len} characters; links over {SIZE_WARNING_THRESHOLD} may be truncated"
        );
    }
    Ok(ShareLink {
        url: format!("{}{SHARE_PATH}{payload}", base_url.trim_end_matches('/')),
        payload_len,
        size_safe,
    })
}
