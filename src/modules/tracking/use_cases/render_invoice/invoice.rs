// Renders one week of billable work as a standalone HTML invoice.
//
// The document embeds its styling and references nothing external, so it
// can be saved and opened as is. Output depends only on the arguments.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::modules::tracking::use_cases::weekly_report::aggregation::WeekBucket;
use crate::shared::core::time::short_date;

pub const DEFAULT_CLIENT_NAME: &str = "Client Name";
pub const DEFAULT_CLIENT_EMAIL: &str = "client@example.com";
pub const DEFAULT_INVOICE_NUMBER: &str = "INV-001";

const STYLE: &str = "    body { font-family: Arial, sans-serif; max-width: 800px; margin: 40px auto; padding: 20px; }
    .header { text-align: center; margin-bottom: 40px; }
    .invoice-details { margin-bottom: 30px; }
    .invoice-details div { margin: 5px 0; }
    table { width: 100%; border-collapse: collapse; margin: 20px 0; }
    th, td { padding: 12px; text-align: left; border-bottom: 1px solid #ddd; }
    th { background-color: #4f46e5; color: white; }
    .total-row { font-weight: bold; background-color: #f9fafb; }
    .right-align { text-align: right; }
";

/// Who gets billed. Blank fields fall back to placeholders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetails {
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ClientDetails {
    pub fn client_name(&self) -> &str {
        or_placeholder(&self.client_name, DEFAULT_CLIENT_NAME)
    }

    pub fn client_email(&self) -> &str {
        or_placeholder(&self.client_email, DEFAULT_CLIENT_EMAIL)
    }

    pub fn invoice_number(&self) -> &str {
        or_placeholder(&self.invoice_number, DEFAULT_INVOICE_NUMBER)
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.trim().is_empty())
    }
}

fn or_placeholder<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(placeholder)
}

/// `invoice-<number>.html`, with characters unsafe in file names replaced.
pub fn invoice_file_name(client: &ClientDetails) -> String {
    let number: String = client
        .invoice_number()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("invoice-{number}.html")
}

pub fn render_invoice(week: &WeekBucket, client: &ClientDetails, issued_on: NaiveDate) -> String {
    let mut html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Invoice {number}</title>
  <style>
{STYLE}  </style>
</head>
<body>
  <div class="header">
    <h1>INVOICE</h1>
    <p>Invoice #{number}</p>
  </div>

  <div class="invoice-details">
    <div><strong>Bill To:</strong> {name}</div>
    <div><strong>Email:</strong> {email}</div>
    <div><strong>Period:</strong> {period_start} - {period_end}</div>
    <div><strong>Invoice Date:</strong> {issued}</div>
  </div>

  <table>
    <thead>
      <tr>
        <th>Project</th>
        <th class="right-align">Hours</th>
        <th class="right-align">Rate</th>
        <th class="right-align">Amount</th>
      </tr>
    </thead>
    <tbody>
"#,
        number = escape_html(client.invoice_number()),
        name = escape_html(client.client_name()),
        email = escape_html(client.client_email()),
        period_start = short_date(week.week_key),
        period_end = short_date(week.week_end()),
        issued = short_date(issued_on),
    );

    for line in week.projects.values() {
        html.push_str(&format!(
            r#"      <tr>
        <td>{name}</td>
        <td class="right-align">{hours:.2}</td>
        <td class="right-align">${rate:.2}</td>
        <td class="right-align">${amount:.2}</td>
      </tr>
"#,
            name = escape_html(&line.name),
            hours = line.hours(),
            rate = line.hourly_rate,
            amount = line.earnings,
        ));
    }

    html.push_str(&format!(
        r#"      <tr class="total-row">
        <td colspan="3" class="right-align">Total</td>
        <td class="right-align">${total:.2}</td>
      </tr>
    </tbody>
  </table>
"#,
        total = week.total_earnings,
    ));

    if let Some(notes) = client.notes() {
        html.push_str(&format!(
            "\n  <div><strong>Notes:</strong><br/>{}</div>\n",
            escape_html(notes)
        ));
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
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
