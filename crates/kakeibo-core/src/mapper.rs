// SPDX-License-Identifier: AGPL-3.0
// Kakeibo Core - Notion schema mapping
//
// The Notion database carries exactly four properties:
//   金額 (number), 支払い方法 (select), 用途 (title), 日付 (date).
// Encoding is bit-exact against that schema. Decoding is defensive: any
// missing or malformed nested level resolves to a default value instead of
// failing, so one damaged page never poisons a whole query.

use crate::types::{Expense, NewExpense};
use serde::{Deserialize, Serialize};

/// One page of the Notion database, as returned by a query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemotePage {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub properties: RemoteProperties,
}

/// The four mapped properties of an expense page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteProperties {
    #[serde(rename = "金額", default)]
    pub amount: NumberProperty,
    #[serde(rename = "支払い方法", default)]
    pub payment_method: SelectProperty,
    #[serde(rename = "用途", default)]
    pub purpose: TitleProperty,
    #[serde(rename = "日付", default)]
    pub date: DateProperty,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberProperty {
    #[serde(default)]
    pub number: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectProperty {
    #[serde(default)]
    pub select: Option<SelectOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleProperty {
    #[serde(default)]
    pub title: Vec<RichTextItem>,
}

/// One run of rich text; `text` is absent for mention and equation runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichTextItem {
    #[serde(default)]
    pub text: Option<TextContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateProperty {
    #[serde(default)]
    pub date: Option<DateValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateValue {
    #[serde(default)]
    pub start: String,
}

/// Encode an expense into the fixed Notion property layout
pub fn to_remote_document(expense: &NewExpense) -> RemoteProperties {
    RemoteProperties {
        amount: NumberProperty {
            number: Some(expense.amount),
        },
        payment_method: SelectProperty {
            select: Some(SelectOption {
                name: expense.payment_method.clone(),
            }),
        },
        purpose: TitleProperty {
            title: vec![RichTextItem {
                text: Some(TextContent {
                    content: expense.purpose.clone(),
                }),
            }],
        },
        date: DateProperty {
            date: Some(DateValue {
                start: expense.date.clone(),
            }),
        },
    }
}

/// Decode a page back into an expense, defaulting every absent level.
/// The id comes from the page itself; this function never invents one.
pub fn from_remote_document(page: &RemotePage) -> Expense {
    let props = &page.properties;

    Expense {
        id: page.id.clone(),
        amount: props.amount.number.unwrap_or(0.0),
        payment_method: props
            .payment_method
            .select
            .as_ref()
            .map(|s| s.name.clone())
            .unwrap_or_default(),
        purpose: props
            .purpose
            .title
            .first()
            .and_then(|run| run.text.as_ref())
            .map(|t| t.content.clone())
            .unwrap_or_default(),
        date: props
            .date
            .date
            .as_ref()
            .map(|d| d.start.clone())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> NewExpense {
        NewExpense {
            amount: 1500.0,
            payment_method: "現金".to_string(),
            purpose: "昼食".to_string(),
            date: "2024-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_encode_matches_notion_schema_exactly() {
        let encoded = serde_json::to_value(to_remote_document(&sample())).unwrap();

        assert_eq!(
            encoded,
            json!({
                "金額": { "number": 1500.0 },
                "支払い方法": { "select": { "name": "現金" } },
                "用途": { "title": [{ "text": { "content": "昼食" } }] },
                "日付": { "date": { "start": "2024-01-01T00:00:00.000Z" } },
            })
        );
    }

    #[test]
    fn test_round_trip_preserves_all_fields_except_id() {
        let expense = sample();
        let page = RemotePage {
            id: String::new(),
            properties: to_remote_document(&expense),
        };

        let decoded = from_remote_document(&page);

        assert_eq!(decoded.amount, expense.amount);
        assert_eq!(decoded.payment_method, expense.payment_method);
        assert_eq!(decoded.purpose, expense.purpose);
        assert_eq!(decoded.date, expense.date);
        assert_eq!(decoded.id, "");
    }

    #[test]
    fn test_missing_date_property_decodes_to_empty_string() {
        let page: RemotePage = serde_json::from_value(json!({
            "id": "page-1",
            "properties": {
                "金額": { "number": 300.0 },
                "支払い方法": { "select": { "name": "現金" } },
                "用途": { "title": [{ "text": { "content": "電車代" } }] },
            }
        }))
        .unwrap();

        let decoded = from_remote_document(&page);
        assert_eq!(decoded.date, "");
        assert_eq!(decoded.amount, 300.0);
    }

    #[test]
    fn test_null_and_empty_nesting_decode_to_defaults() {
        let page: RemotePage = serde_json::from_value(json!({
            "id": "page-2",
            "properties": {
                "金額": { "number": null },
                "支払い方法": { "select": null },
                "用途": { "title": [] },
                "日付": { "date": null },
            }
        }))
        .unwrap();

        let decoded = from_remote_document(&page);
        assert_eq!(decoded.amount, 0.0);
        assert_eq!(decoded.payment_method, "");
        assert_eq!(decoded.purpose, "");
        assert_eq!(decoded.date, "");
    }

    #[test]
    fn test_mention_title_run_without_text_decodes_to_empty_purpose() {
        let page: RemotePage = serde_json::from_value(json!({
            "id": "page-3",
            "properties": {
                "用途": { "title": [{ "mention": { "type": "user" } }] },
            }
        }))
        .unwrap();

        assert_eq!(from_remote_document(&page).purpose, "");
    }

    #[test]
    fn test_missing_properties_object_decodes_to_all_defaults() {
        let page: RemotePage = serde_json::from_value(json!({ "id": "page-4" })).unwrap();

        let decoded = from_remote_document(&page);
        assert_eq!(decoded.id, "page-4");
        assert_eq!(decoded.amount, 0.0);
        assert_eq!(decoded.payment_method, "");
        assert_eq!(decoded.purpose, "");
        assert_eq!(decoded.date, "");
    }

    #[test]
    fn test_unknown_notion_fields_are_ignored() {
        let page: RemotePage = serde_json::from_value(json!({
            "id": "page-5",
            "object": "page",
            "created_time": "2024-01-01T00:00:00.000Z",
            "properties": {
                "金額": { "id": "abcd", "type": "number", "number": 1200.0 },
            }
        }))
        .unwrap();

        assert_eq!(from_remote_document(&page).amount, 1200.0);
    }
}
