use super::customer_name;
use crate::shared::number_format::{format_price, format_price_field, format_thousands};
use contracts::domain::common::{display_value, Record};
use leptos::prelude::*;
use serde_json::Value;

/// `totalRevenue` / `total_revenue` -> `Total Revenue`
fn humanize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut word_start = true;
    for ch in key.chars() {
        if ch == '_' || ch == '-' {
            word_start = true;
            continue;
        }
        if ch.is_uppercase() && !out.is_empty() {
            word_start = true;
        }
        if word_start {
            if !out.is_empty() {
                out.push(' ');
            }
            out.extend(ch.to_uppercase());
            word_start = false;
        } else {
            out.push(ch);
        }
    }
    out
}

fn is_money_key(key: &str) -> bool {
    let key = key.to_lowercase();
    ["revenue", "amount", "sales", "value"]
        .iter()
        .any(|k| key.contains(k))
}

fn stat_value(key: &str, value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => {
            let n = n.as_f64()?;
            Some(if is_money_key(key) {
                format_price(n)
            } else if n.fract() == 0.0 {
                format_thousands(n as i64)
            } else {
                format!("{:.2}", n)
            })
        }
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Cards of the stats strip. An object gives one card per scalar field; an
/// aggregation array gives one card per `{_id, count}` group.
pub fn stat_entries(stats: Option<&Value>) -> Vec<(String, String)> {
    match stats {
        Some(Value::Object(map)) => map
            .iter()
            .filter_map(|(k, v)| Some((humanize_key(k), stat_value(k, v)?)))
            .collect(),
        Some(Value::Array(groups)) => groups
            .iter()
            .filter_map(|g| {
                let label = g.get("_id").map(display_value).filter(|s| !s.is_empty())?;
                let count = g.get("count").and_then(|c| stat_value("count", c))?;
                Some((label, count))
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn address_lines(record: &Record) -> Vec<String> {
    let Some(addr) = record.get("shippingAddress").and_then(|a| a.as_object()) else {
        return Vec::new();
    };
    let part = |k: &str| addr.get(k).map(display_value).unwrap_or_default();
    let join = |parts: Vec<String>, sep: &str| {
        parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(sep)
    };
    let city_line = join(
        vec![
            join(vec![part("city"), part("state")], ", "),
            part("postalCode"),
        ],
        " ",
    );
    [
        join(vec![part("firstName"), part("lastName")], " "),
        part("address"),
        city_line,
        part("country"),
    ]
    .into_iter()
    .filter(|l| !l.is_empty())
    .collect()
}

fn order_items(record: &Record) -> Vec<Record> {
    match record.get("items") {
        Some(Value::Array(items)) => items.iter().cloned().filter_map(Record::from_value).collect(),
        _ => Vec::new(),
    }
}

fn item_row(item: Record) -> impl IntoView {
    let name = match item.display("productName") {
        n if n.is_empty() => item.display("productSku"),
        n => n,
    };
    let ready = item.str_field("itemType") == Some("rts");
    let design = (item.str_field("itemType") == Some("dyo")).then(|| {
        format!(
            "Metal: {} | Shape: {} | Carat: {}",
            item.display("selectedMetal"),
            item.display("selectedShape"),
            item.display("selectedCarat")
        )
    });
    let variant_sku = item.display("variant_sku");
    view! {
        <tr>
            <td>
                <div>{name}</div>
                {design.map(|d| view! { <div class="text--muted">{d}</div> })}
                {(!variant_sku.is_empty()).then(|| view! { <div class="cell--mono text--muted">{variant_sku}</div> })}
            </td>
            <td>
                <span class="tag" class:tag--success=ready class:tag--custom=!ready>
                    {if ready { "Ready" } else { "Custom" }}
                </span>
            </td>
            <td class="cell--center">{item.display("quantity")}</td>
            <td class="cell--price">{format_price_field(&item, "totalPrice")}</td>
        </tr>
    }
}

/// Expansion row of an order: customer, shipping, line items and totals.
pub fn order_details(row: &Record) -> AnyView {
    let phone = match row.display("contactPhone") {
        p if p.is_empty() => "N/A".to_string(),
        p => p,
    };
    let discount = row.f64_field("discount").filter(|d| *d > 0.0);
    let notes = row.display("adminNotes");
    let tracking = row.display("trackingNumber");
    let items = order_items(row);

    view! {
        <div class="details">
            <div class="details__section">
                <h4 class="details__title">"Customer Details"</h4>
                <div>{format!("Name: {}", customer_name(row))}</div>
                <div>{format!("Email: {}", row.display("contactEmail"))}</div>
                <div>{format!("Phone: {}", phone)}</div>
                {(!tracking.is_empty()).then(|| view! { <div>{format!("Tracking #: {}", tracking)}</div> })}
            </div>
            <div class="details__section">
                <h4 class="details__title">"Shipping Address"</h4>
                {address_lines(row).into_iter().map(|l| view! { <div>{l}</div> }).collect_view()}
            </div>
            <table class="details__items">
                <thead>
                    <tr>
                        <th>"Item"</th>
                        <th>"Type"</th>
                        <th class="cell--center">"Qty"</th>
                        <th class="cell--price">"Price"</th>
                    </tr>
                </thead>
                <tbody>{items.into_iter().map(item_row).collect_view()}</tbody>
                <tfoot>
                    <tr>
                        <td colspan="3">"Subtotal:"</td>
                        <td class="cell--price">{format_price_field(row, "subtotal")}</td>
                    </tr>
                    {discount.map(|d| view! {
                        <tr class="text--success">
                            <td colspan="3">"Discount:"</td>
                            <td class="cell--price">{format!("-{}", format_price(d))}</td>
                        </tr>
                    })}
                    <tr>
                        <td colspan="3"><strong>"Total:"</strong></td>
                        <td class="cell--price price">{format_price_field(row, "total")}</td>
                    </tr>
                </tfoot>
            </table>
            {(!notes.is_empty()).then(|| view! {
                <div class="details__section">
                    <h4 class="details__title">"Internal Notes"</h4>
                    <p>{notes}</p>
                </div>
            })}
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keys_are_humanized() {
        assert_eq!(humanize_key("totalOrders"), "Total Orders");
        assert_eq!(humanize_key("pending_orders"), "Pending Orders");
        assert_eq!(humanize_key("revenue"), "Revenue");
    }

    #[test]
    fn stats_from_object() {
        let stats = json!({"totalOrders": 1250, "totalRevenue": 9800.5, "note": null});
        let entries = stat_entries(Some(&stats));
        assert_eq!(entries.len(), 2);
        assert!(entries.contains(&("Total Orders".to_string(), "1,250".to_string())));
        assert!(entries
            .iter()
            .any(|(label, value)| label == "Total Revenue" && value.contains("9,800")));
    }

    #[test]
    fn stats_from_groups() {
        let stats = json!([{"_id": "Pending", "count": 4}, {"_id": null, "count": 1}]);
        assert_eq!(
            stat_entries(Some(&stats)),
            vec![("Pending".to_string(), "4".to_string())]
        );
        assert!(stat_entries(None).is_empty());
    }

    #[test]
    fn address_skips_blank_parts() {
        let r = Record::new().with(
            "shippingAddress",
            json!({"firstName": "Ann", "lastName": "Lee", "city": "Austin", "state": "TX", "postalCode": "73301", "country": "US"}),
        );
        assert_eq!(address_lines(&r), vec!["Ann Lee", "Austin, TX 73301", "US"]);
        assert!(address_lines(&Record::new()).is_empty());
    }
}
