// shopcart/src/helpers.rs

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

static EMAIL_RE: Lazy<Option<Regex>> = Lazy::new(|| {
  Regex::new(r"^[A-Za-z0-9._%+'-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").ok()
});

pub fn is_valid_email(email: &str) -> bool {
  let email = email.trim();
  if email.is_empty() {
    return false;
  }
  EMAIL_RE.as_ref().map_or(false, |re| re.is_match(email))
}

pub fn html_encode(s: &str) -> String {
  s.replace('&', "&amp;")
    .replace('<', "&lt;")
    .replace('>', "&gt;")
    .replace('"', "&quot;")
    .replace('\'', "&#39;")
}

/// Formats an amount for display, two decimals and the currency code. No conversion happens.
pub fn format_price(amount: Decimal, currency_code: &str) -> String {
  let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
  match currency_code {
    "USD" => format!("${:.2}", rounded),
    _ => format!("{:.2} {}", rounded, currency_code),
  }
}

/// Money comparison at cent precision.
pub fn round_price(amount: Decimal) -> Decimal {
  amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::str::FromStr;

  #[test]
  fn email_validation() {
    assert!(is_valid_email("ann@example.com"));
    assert!(is_valid_email(" o'neil+gift@mail.example.co.uk "));
    assert!(!is_valid_email(""));
    assert!(!is_valid_email("ann@"));
    assert!(!is_valid_email("ann example.com"));
    assert!(!is_valid_email("ann@example"));
  }

  #[test]
  fn html_encode_escapes_markup() {
    assert_eq!(html_encode("<b>Tom & \"Jerry\"</b>"), "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;");
  }

  #[test]
  fn prices_are_formatted_with_two_decimals() {
    assert_eq!(format_price(Decimal::from(5), "USD"), "$5.00");
    assert_eq!(format_price(Decimal::from_str("12.345").unwrap(), "EUR"), "12.35 EUR");
    assert_eq!(round_price(Decimal::from_str("1.005").unwrap()), Decimal::from_str("1.01").unwrap());
  }
}
