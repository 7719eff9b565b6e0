use std::fs;

use chrono::Utc;

use crate::events::ActivityEntry;
use crate::utils;

/// Export the session activity log to CSV.
///
/// Columns: timestamp, action, amount_wei, amount_eth, status, tx_hash, detail
pub fn export_activity_csv(entries: &[ActivityEntry], path: &str) -> Result<String, String> {
    let file = fs::File::create(path).map_err(|e| format!("Failed to create file: {e}"))?;
    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record([
        "timestamp",
        "action",
        "amount_wei",
        "amount_eth",
        "status",
        "tx_hash",
        "detail",
    ])
    .map_err(|e| format!("Failed to write CSV header: {e}"))?;

    for entry in entries {
        wtr.write_record(&[
            entry.timestamp.to_string(),
            entry.action.to_string(),
            entry.amount.to_string(),
            utils::format_eth_decimal(entry.amount),
            entry.status.to_string(),
            entry
                .tx_hash
                .map(|h| format!("{h:#x}"))
                .unwrap_or_default(),
            entry.detail.clone().unwrap_or_default(),
        ])
        .map_err(|e| format!("Failed to write CSV row: {e}"))?;
    }

    wtr.flush().map_err(|e| format!("Failed to flush CSV: {e}"))?;

    Ok(format!("Exported {} entries to {path}", entries.len()))
}

/// Default export destination in the working directory, stamped to the second.
pub fn default_export_path() -> String {
    format!(
        "vault-activity-{}.csv",
        Utc::now().format("%Y%m%d-%H%M%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Action, ActivityStatus};
    use alloy::primitives::{B256, U256};
    use std::fs;

    fn sample_entries() -> Vec<ActivityEntry> {
        vec![
            ActivityEntry {
                id: 1,
                action: Action::Deposit,
                amount: U256::from(1_000_000_000_000_000_000u64),
                status: ActivityStatus::Confirmed,
                tx_hash: Some(B256::from_slice(&[0xab; 32])),
                detail: None,
                timestamp: 1700000000,
            },
            ActivityEntry {
                id: 2,
                action: Action::Withdraw,
                amount: U256::from(500_000_000_000_000_000u64),
                status: ActivityStatus::Failed,
                tx_hash: None,
                detail: Some("insufficient balance".to_string()),
                timestamp: 1700000060,
            },
        ]
    }

    #[test]
    fn test_export_activity_csv() {
        let path = "/tmp/vault-tui-test-activity.csv";
        let result = export_activity_csv(&sample_entries(), path);
        assert!(result.is_ok());

        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.contains("timestamp"));
        assert!(contents.contains("Deposit"));
        assert!(contents.contains("1000000000000000000"));
        assert!(contents.contains("0.5"));
        assert!(contents.contains("insufficient balance"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_export_activity_csv_empty() {
        let path = "/tmp/vault-tui-test-activity-empty.csv";
        let result = export_activity_csv(&[], path);
        assert!(result.is_ok());
        assert!(result.unwrap().contains("0 entries"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_default_export_path_shape() {
        let path = default_export_path();
        assert!(path.starts_with("vault-activity-"));
        assert!(path.ends_with(".csv"));
    }
}
