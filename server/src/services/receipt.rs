// server/src/services/receipt.rs

//! HTML order receipt sent after a successful checkout.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
  pub title: String,
  /// Unit price in major currency units, as shown in the catalog.
  pub price: f64,
  #[serde(default = "default_quantity")]
  pub quantity: u32,
}

fn default_quantity() -> u32 {
  1
}

pub const RECEIPT_SUBJECT: &str = "Your Leafix order receipt";

/// Renders the receipt. `amount` is the charged total in minor units.
pub fn render_receipt_html(items: &[CartItem], amount: u64, currency: &str, payment_id: &str) -> String {
  let currency = currency.to_ascii_uppercase();
  let mut rows = String::new();
  for item in items {
    let line_total = item.price * f64::from(item.quantity);
    rows.push_str(&format!(
      "<tr><td>{}</td><td style=\"text-align:center\">{}</td><td style=\"text-align:right\">{:.2} {}</td></tr>",
      escape_html(&item.title),
      item.quantity,
      line_total,
      currency
    ));
  }
  if rows.is_empty() {
    rows.push_str("<tr><td colspan=\"3\">Online Nursery Order</td></tr>");
  }

  format!(
    concat!(
      "<div style=\"font-family:sans-serif\">",
      "<h2>Thank you for shopping with <span style=\"color:#4ef037\">Leafix</span>!</h2>",
      "<p>Your payment was received. Reference: <code>{payment_id}</code></p>",
      "<table style=\"border-collapse:collapse;width:100%\">",
      "<thead><tr><th style=\"text-align:left\">Item</th><th>Qty</th><th style=\"text-align:right\">Total</th></tr></thead>",
      "<tbody>{rows}</tbody>",
      "</table>",
      "<p style=\"text-align:right\"><strong>Amount charged: {total} {currency}</strong></p>",
      "</div>"
    ),
    payment_id = escape_html(payment_id),
    rows = rows,
    total = format_minor_units(amount),
    currency = currency,
  )
}

/// `1999` -> `"19.99"`.
pub fn format_minor_units(amount: u64) -> String {
  format!("{}.{:02}", amount / 100, amount % 100)
}

fn escape_html(raw: &str) -> String {
  let mut escaped = String::with_capacity(raw.len());
  for c in raw.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&quot;"),
      '\'' => escaped.push_str("&#39;"),
      _ => escaped.push(c),
    }
  }
  escaped
}
