use anyhow::Result;
use disclosure_core::config::DisclosureConfig;
use disclosure_core::mapping::disclose_with;
use disclosure_core::project::project_with_limits;
use serde::Serialize;

use crate::io::input;
use crate::output;

pub fn run(cfg: &DisclosureConfig, doc_path: &str, paths: &[String]) -> Result<bool> {
    let doc = input::read_document(doc_path, &cfg.limits)?;
    let projected = project_with_limits(&doc, paths, &cfg.limits)?;
    output::print(&projected)?;
    Ok(true)
}

#[derive(Debug, Serialize)]
pub struct IndicesOut {
    pub projected_document: serde_json::Value,
    pub revealed_indices: Vec<usize>,
}

pub fn run_indices(cfg: &DisclosureConfig, doc_path: &str, paths: &[String]) -> Result<bool> {
    let doc = input::read_document(doc_path, &cfg.limits)?;
    let d = disclose_with(&doc, paths, cfg)?;
    output::print(&IndicesOut {
        projected_document: d.projected,
        revealed_indices: d.indices,
    })?;
    Ok(true)
}
