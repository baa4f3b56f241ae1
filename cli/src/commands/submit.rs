//! Submit command

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

use agency_forms::{InquiryPayload, InquirySubmitter, SubmissionReceipt};

use crate::output::OutputFormat;

#[derive(Debug, Serialize, Tabled)]
struct ReceiptRow {
    id: String,
    timestamp: String,
}

impl From<&SubmissionReceipt> for ReceiptRow {
    fn from(receipt: &SubmissionReceipt) -> Self {
        Self {
            id: receipt.id.clone(),
            timestamp: receipt.timestamp.to_rfc3339(),
        }
    }
}

pub fn read_payload(path: &Path) -> anyhow::Result<InquiryPayload> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let payload: InquiryPayload = serde_json::from_str(&content)
        .with_context(|| format!("{} is not an inquiry payload", path.display()))?;
    if payload.missing_required_fields() {
        anyhow::bail!("{} needs fullName, email and companyName", path.display());
    }
    Ok(payload)
}

pub async fn handle(
    path: &Path,
    submitter: &dyn InquirySubmitter,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let payload = read_payload(path)?;
    let receipt = submitter.submit(&payload).await?;

    if matches!(format, OutputFormat::Table) {
        println!("{}", "✓ Inquiry submitted".green().bold());
    }
    format.print(&[ReceiptRow::from(&receipt)])
}
