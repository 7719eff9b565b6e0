use alloy::primitives::{Address, B256, U256};
use chrono::Utc;

/// Number of decimals in the chain's native unit.
const ETH_DECIMALS: usize = 18;

fn wei_per_eth() -> U256 {
    U256::from(10u64).pow(U256::from(ETH_DECIMALS as u64))
}

/// Parse a user-entered decimal ETH amount into wei.
///
/// Rejects empty input, non-digit characters, multiple dots, and more than
/// 18 fractional digits. "1." and ".5" are accepted.
pub fn parse_eth(input: &str) -> Result<U256, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Enter an amount".to_string());
    }

    let (whole, frac) = match input.split_once('.') {
        Some((w, f)) => (w, f),
        None => (input, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(format!("Invalid amount: {input}"));
    }
    if frac.contains('.')
        || !whole.bytes().all(|b| b.is_ascii_digit())
        || !frac.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(format!("Invalid amount: {input}"));
    }
    if frac.len() > ETH_DECIMALS {
        return Err(format!("Too many decimal places (max {ETH_DECIMALS})"));
    }

    let whole_wei = if whole.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(whole, 10)
            .ok()
            .and_then(|w| w.checked_mul(wei_per_eth()))
            .ok_or_else(|| "Amount too large".to_string())?
    };

    // Right-pad the fractional digits to 18 places
    let frac_padded = format!("{frac:0<width$}", width = ETH_DECIMALS);
    let frac_wei = if frac.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(&frac_padded, 10)
            .map_err(|_| format!("Invalid amount: {input}"))?
    };

    whole_wei
        .checked_add(frac_wei)
        .ok_or_else(|| "Amount too large".to_string())
}

/// Format a wei value as a decimal ETH string with the unit appended.
pub fn format_eth(wei: U256) -> String {
    format!("{} ETH", format_eth_decimal(wei))
}

/// Format a wei value as a bare decimal string, showing at most 6
/// fractional digits.
pub fn format_eth_decimal(wei: U256) -> String {
    let divisor = wei_per_eth();
    let whole = wei / divisor;
    let frac = wei % divisor;

    if frac.is_zero() {
        return format!("{whole}.0");
    }

    let padded = format!("{:0>width$}", frac.to_string(), width = ETH_DECIMALS);
    let trimmed = padded.trim_end_matches('0');
    let shown = trimmed.len().min(6);
    format!("{whole}.{}", &trimmed[..shown])
}

/// Truncate an address to "0xabcd...ef12" form
pub fn truncate_address(addr: &Address) -> String {
    let s = format!("{addr}");
    format!("{}...{}", &s[..8], &s[s.len() - 4..])
}

/// Truncate a 32-byte hash to "0xabcd...ef12" form
pub fn truncate_hash(hash: &B256) -> String {
    let s = format!("{hash}");
    format!("{}...{}", &s[..8], &s[s.len() - 4..])
}

/// Format a Unix timestamp as "Xs ago", "Xm ago", etc.
pub fn format_time_ago(timestamp: u64) -> String {
    let now = Utc::now().timestamp() as u64;
    if timestamp >= now {
        return "just now".to_string();
    }
    match now - timestamp {
        d if d < 60 => format!("{d}s ago"),
        d if d < 3600 => format!("{}m ago", d / 60),
        d if d < 86400 => format!("{}h ago", d / 3600),
        d => format!("{}d ago", d / 86400),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_one_eth() {
        assert_eq!(
            parse_eth("1.0").unwrap(),
            U256::from(10u64).pow(U256::from(18u64))
        );
    }

    #[test]
    fn test_parse_half_eth() {
        assert_eq!(
            parse_eth("0.5").unwrap(),
            U256::from(500_000_000_000_000_000u64)
        );
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(
            parse_eth("2").unwrap(),
            U256::from(2_000_000_000_000_000_000u64)
        );
    }

    #[test]
    fn test_parse_bare_fraction() {
        assert_eq!(
            parse_eth(".25").unwrap(),
            U256::from(250_000_000_000_000_000u64)
        );
        assert_eq!(
            parse_eth("1.").unwrap(),
            U256::from(1_000_000_000_000_000_000u64)
        );
    }

    #[test]
    fn test_parse_full_precision() {
        // 18 fractional digits resolve to exact wei
        assert_eq!(parse_eth("0.000000000000000001").unwrap(), U256::from(1u64));
    }

    #[test]
    fn test_parse_empty_rejected() {
        assert!(parse_eth("").is_err());
        assert!(parse_eth("   ").is_err());
    }

    #[test]
    fn test_parse_malformed_rejected() {
        assert!(parse_eth(".").is_err());
        assert!(parse_eth("1.2.3").is_err());
        assert!(parse_eth("abc").is_err());
        assert!(parse_eth("1,5").is_err());
        assert!(parse_eth("-1").is_err());
    }

    #[test]
    fn test_parse_too_many_decimals() {
        assert!(parse_eth("0.0000000000000000001").is_err());
    }

    #[test]
    fn test_format_zero() {
        assert_eq!(format_eth_decimal(U256::ZERO), "0.0");
    }

    #[test]
    fn test_format_round_value() {
        let one_eth = U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(format_eth(one_eth), "1.0 ETH");
    }

    #[test]
    fn test_format_fractional() {
        assert_eq!(
            format_eth_decimal(U256::from(1_500_000_000_000_000_000u64)),
            "1.5"
        );
    }

    #[test]
    fn test_format_truncates_to_six_places() {
        // 1 wei shows as 0.000000 (six places of eighteen)
        assert_eq!(format_eth_decimal(U256::from(1u64)), "0.000000");
    }

    #[test]
    fn test_parse_format_round_trip() {
        let wei = parse_eth("12.25").unwrap();
        assert_eq!(format_eth_decimal(wei), "12.25");
    }

    #[test]
    fn test_truncate_address() {
        let addr: Address = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"
            .parse()
            .unwrap();
        let t = truncate_address(&addr);
        assert!(t.starts_with("0x"));
        assert!(t.contains("..."));
        assert_eq!(t.len(), 15);
    }
}
