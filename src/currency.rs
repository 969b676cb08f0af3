use chrono::NaiveDate;

/// Normalize an Indonesian-format money string for parsing.
/// "Rp 3.113.000,00" becomes "3113000.00": dots are thousands separators,
/// the comma is the decimal point. The convention is fixed, no autodetection.
pub fn clean_currency(raw: &str) -> String {
    raw.trim()
        .replace("Rp", "")
        .replace(' ', "")
        .replace('"', "")
        .replace('.', "")
        .replace(',', ".")
}

/// Parse a cleaned money string. Empty and "-" mean the cell was blank,
/// which is zero, not an error.
pub fn parse_amount(s: &str) -> Result<f64, std::num::ParseFloatError> {
    if s.is_empty() || s == "-" {
        return Ok(0.0);
    }
    s.parse()
}

/// Parse "DD/MM/YY" or "DD/MM/YYYY". A trailing annotation after " - "
/// (e.g. "20/07/25 - Akhir Event") is stripped before parsing.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let mut s = raw.trim();
    if let Some((head, _)) = s.split_once(" - ") {
        s = head.trim();
    }
    NaiveDate::parse_from_str(s, "%d/%m/%y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_currency() {
        assert_eq!(clean_currency("Rp 3.113.000,00"), "3113000.00");
        assert_eq!(clean_currency("  Rp 50.000  "), "50000");
        assert_eq!(clean_currency("\"1.000,50\""), "1000.50");
        assert_eq!(clean_currency("-"), "-");
        assert_eq!(clean_currency(""), "");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("3113000.00").unwrap(), 3113000.0);
        assert_eq!(parse_amount("").unwrap(), 0.0);
        assert_eq!(parse_amount("-").unwrap(), 0.0);
        assert_eq!(parse_amount("0").unwrap(), 0.0);
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn test_cleaned_amount_round_trip() {
        let cleaned = clean_currency("Rp 3.113.000,00");
        assert_eq!(parse_amount(&cleaned).unwrap(), 3113000.0);
    }

    #[test]
    fn test_parse_date_two_digit_year() {
        assert_eq!(
            parse_date("20/07/25"),
            NaiveDate::from_ymd_opt(2025, 7, 20)
        );
    }

    #[test]
    fn test_parse_date_four_digit_year() {
        assert_eq!(
            parse_date("05/12/2024"),
            NaiveDate::from_ymd_opt(2024, 12, 5)
        );
    }

    #[test]
    fn test_parse_date_strips_annotation() {
        assert_eq!(
            parse_date("20/07/25 - Akhir Event"),
            NaiveDate::from_ymd_opt(2025, 7, 20)
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2025-07-20"), None);
        assert_eq!(parse_date("31/02/25"), None);
    }
}
