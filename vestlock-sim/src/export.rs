//! Claim export rendering.
//!
//! Pure formatting transforms over already-computed claim fields; no
//! lifecycle logic lives here.

use vestlock_core::types::{ClaimStatus, WithdrawalClaim};

fn status_label(status: ClaimStatus) -> &'static str {
    match status {
        ClaimStatus::Cleared => "Cleared",
        ClaimStatus::Pending => "Pending Approval",
    }
}

fn csv_cell(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Render the claims record as CSV with a quoted header row
pub fn claims_to_csv(claims: &[WithdrawalClaim]) -> String {
    let headers = [
        "Client Name",
        "Scheme Name",
        "Amount",
        "Wallet Address",
        "Requested At",
        "Cleared At",
        "Status",
    ];

    let mut out = headers
        .iter()
        .map(|h| csv_cell(h))
        .collect::<Vec<_>>()
        .join(",");
    out.push('\n');

    for claim in claims {
        let cleared = claim
            .cleared_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "N/A".to_string());
        let row = [
            csv_cell(&claim.owner_name),
            csv_cell(&claim.scheme_name),
            csv_cell(&claim.amount.to_string()),
            csv_cell(claim.wallet.as_str()),
            csv_cell(&claim.requested_at.to_rfc3339()),
            csv_cell(&cleared),
            csv_cell(status_label(claim.status)),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

/// Render the claims record as a plain-text report
pub fn claims_to_text(claims: &[WithdrawalClaim]) -> String {
    claims
        .iter()
        .map(|claim| {
            let cleared = claim
                .cleared_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "N/A".to_string());
            format!(
                "Client: {}, Scheme: {}, Amount: {}, Wallet: {}, Requested: {}, Cleared: {}, Status: {}",
                claim.owner_name,
                claim.scheme_name,
                claim.amount,
                claim.wallet,
                claim.requested_at.to_rfc3339(),
                cleared,
                status_label(claim.status),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
