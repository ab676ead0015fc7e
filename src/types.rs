//! Type definitions for the Veryfi SDK.
//!
//! Request option types used by the endpoint clients, and the response types.
//! Responses are kept as raw JSON in [`Document`]; [`VeryfiDocument`] is an
//! optional typed view of a processed receipt or invoice.

use crate::envelope::unwrap_data;
use crate::error::Result;
use crate::request::{AdditionalFields, RequestArguments};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Categories sent with receipts and invoices when the caller gives none.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Advertising & Marketing",
    "Automotive",
    "Bank Charges & Fees",
    "Legal & Professional Services",
    "Insurance",
    "Meals & Entertainment",
    "Office Supplies & Software",
    "Taxes & Licenses",
    "Travel",
    "Rent & Lease",
    "Repairs & Maintenance",
    "Payroll",
    "Utilities",
    "Job Supplies",
    "Grocery",
];

/// A document returned by the API.
///
/// The client does not validate the schema; use [`Document::parse`] for a
/// typed view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Value);

impl Document {
    /// Wrap a response, unwrapping a `data` envelope when present.
    pub fn from_response(response: Value) -> Self {
        Self(unwrap_data(response))
    }

    /// Document ID, if the payload has a numeric `id`.
    pub fn id(&self) -> Option<u64> {
        self.0.get("id").and_then(Value::as_u64)
    }

    /// Top-level field lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// JSON pointer lookup, e.g. `/vendor/name`.
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.0.pointer(pointer)
    }

    /// Borrow the raw JSON.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Take the raw JSON.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Deserialize into a typed view such as [`VeryfiDocument`].
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(T::deserialize(&self.0)?)
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Geometry attached to a field when bounding boxes are requested.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BoundingElement<T> {
    /// Extracted value.
    pub value: Option<T>,
    /// Box as `[page, x1, y1, x2, y2]`.
    pub bounding_box: Option<Vec<f64>>,
    /// Polygon region.
    pub bounding_region: Option<Vec<f64>>,
    /// Rotation in degrees.
    pub rotation: Option<f64>,
}

/// A field that is either a plain value or a [`BoundingElement`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Field<T> {
    /// Plain value.
    Plain(T),
    /// Value with geometry.
    Bounded(BoundingElement<T>),
}

impl<T> Field<T> {
    /// The extracted value regardless of representation.
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Plain(v) => Some(v),
            Field::Bounded(b) => b.value.as_ref(),
        }
    }
}

/// Vendor block of a processed document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Vendor {
    /// Vendor name.
    #[serde(default)]
    pub name: Option<Field<String>>,
    /// Name as printed.
    #[serde(default)]
    pub raw_name: Option<String>,
    /// Address.
    #[serde(default)]
    pub address: Option<Field<String>>,
    /// Category.
    #[serde(default)]
    pub category: Option<Field<String>>,
    /// Email.
    #[serde(default)]
    pub email: Option<Field<String>>,
    /// Phone number.
    #[serde(default)]
    pub phone_number: Option<Field<String>>,
    /// Registration number.
    #[serde(default)]
    pub vendor_reg_number: Option<Field<String>>,
    /// Website.
    #[serde(default)]
    pub web: Option<Field<String>>,
}

/// Billing party.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BillTo {
    /// Name.
    #[serde(default)]
    pub name: Option<Field<String>>,
    /// Address.
    #[serde(default)]
    pub address: Option<Field<String>>,
    /// Email.
    #[serde(default)]
    pub email: Option<Field<String>>,
    /// VAT number.
    #[serde(default)]
    pub vat_number: Option<Field<Value>>,
}

/// One line item.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LineItem {
    /// Line item ID.
    #[serde(default)]
    pub id: Option<u64>,
    /// Position on the document.
    #[serde(default)]
    pub order: Option<u32>,
    /// Description.
    #[serde(default)]
    pub description: Option<Field<String>>,
    /// Quantity.
    #[serde(default)]
    pub quantity: Option<Field<f64>>,
    /// Unit price.
    #[serde(default)]
    pub price: Option<Field<f64>>,
    /// Line total.
    #[serde(default)]
    pub total: Option<Field<f64>>,
    /// Tax amount.
    #[serde(default)]
    pub tax: Option<Field<f64>>,
    /// SKU.
    #[serde(default)]
    pub sku: Option<Field<String>>,
    /// Line type (e.g. "food", "fee").
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// One tax line.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TaxLine {
    /// Tax name.
    #[serde(default)]
    pub name: Option<Field<String>>,
    /// Rate in percent.
    #[serde(default)]
    pub rate: Option<Field<f64>>,
    /// Taxable base.
    #[serde(default)]
    pub base: Option<Field<f64>>,
    /// Tax total.
    #[serde(default)]
    pub total: Option<Field<f64>>,
}

/// Payment details.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Payment {
    /// Card number (last digits).
    #[serde(default)]
    pub card_number: Option<Field<String>>,
    /// Display name, e.g. "Visa ***1234".
    #[serde(default)]
    pub display_name: Option<Field<String>>,
    /// Payment type.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// A tag attached to a document.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Tag {
    /// Tag ID.
    pub id: u64,
    /// Tag name.
    pub name: String,
}

/// Typed view of a processed receipt or invoice.
///
/// Fields the view does not name are kept in `other`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct VeryfiDocument {
    /// Document ID.
    #[serde(default)]
    pub id: Option<u64>,
    /// Caller-assigned ID.
    #[serde(default)]
    pub external_id: Option<String>,
    /// Document date.
    #[serde(default)]
    pub date: Option<Field<String>>,
    /// Due date.
    #[serde(default)]
    pub due_date: Option<Field<String>>,
    /// ISO currency code.
    #[serde(default)]
    pub currency_code: Option<Field<String>>,
    /// Category.
    #[serde(default)]
    pub category: Option<Field<String>>,
    /// Document type, e.g. "receipt".
    #[serde(default)]
    pub document_type: Option<Field<String>>,
    /// Invoice number.
    #[serde(default)]
    pub invoice_number: Option<Field<String>>,
    /// Grand total.
    #[serde(default)]
    pub total: Option<Field<f64>>,
    /// Subtotal.
    #[serde(default)]
    pub subtotal: Option<Field<f64>>,
    /// Tax.
    #[serde(default)]
    pub tax: Option<Field<f64>>,
    /// Tip.
    #[serde(default)]
    pub tip: Option<Field<f64>>,
    /// Discount.
    #[serde(default)]
    pub discount: Option<Field<f64>>,
    /// Vendor.
    #[serde(default)]
    pub vendor: Option<Vendor>,
    /// Billing party.
    #[serde(default)]
    pub bill_to: Option<BillTo>,
    /// Line items.
    #[serde(default, deserialize_with = "null_as_default")]
    pub line_items: Vec<LineItem>,
    /// Tax lines.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tax_lines: Vec<TaxLine>,
    /// Payment.
    #[serde(default)]
    pub payment: Option<Payment>,
    /// Tags.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
    /// Notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Full OCR text.
    #[serde(default)]
    pub ocr_text: Option<String>,
    /// Image URL.
    #[serde(default)]
    pub img_url: Option<String>,
    /// PDF URL.
    #[serde(default)]
    pub pdf_url: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_date: Option<String>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_date: Option<String>,
    /// Everything else.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Options for processing receipts and invoices.
#[derive(Debug, Clone, Default)]
pub struct DocumentOptions {
    /// Categories to choose from (default: [`DEFAULT_CATEGORIES`]).
    pub categories: Option<Vec<String>>,
    /// Delete the document from Veryfi once extracted (default: false).
    pub auto_delete: Option<bool>,
    /// Skip data enrichment for faster processing.
    pub boost_mode: Option<bool>,
    /// Caller-assigned document ID.
    pub external_id: Option<String>,
    /// Number of pages to read, starting at page 1.
    pub max_pages_to_process: Option<u32>,
    /// Return bounding boxes for extracted fields.
    pub bounding_boxes: Option<bool>,
    /// Return confidence scores for extracted fields.
    pub confidence_details: Option<bool>,
    /// Extra fields, merged last.
    pub extra: AdditionalFields,
}

impl DocumentOptions {
    pub(crate) fn apply(&self, args: &mut RequestArguments) {
        let categories: Vec<String> = match &self.categories {
            Some(categories) => categories.clone(),
            None => DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        };
        args.insert("categories", categories);
        args.insert("auto_delete", self.auto_delete.unwrap_or(false));
        args.insert_opt("boost_mode", self.boost_mode);
        args.insert_opt("external_id", self.external_id.clone());
        args.insert_opt("max_pages_to_process", self.max_pages_to_process);
        args.insert_opt("bounding_boxes", self.bounding_boxes);
        args.insert_opt("confidence_details", self.confidence_details);
        args.extend_fields(&self.extra);
    }
}

/// Options for bank statements, checks, W-9 and W-8BEN-E forms.
#[derive(Debug, Clone, Default)]
pub struct ExtractionOptions {
    /// Return bounding boxes for extracted fields.
    pub bounding_boxes: bool,
    /// Return confidence scores for extracted fields.
    pub confidence_details: bool,
    /// Extra fields, merged last.
    pub extra: AdditionalFields,
}

impl ExtractionOptions {
    pub(crate) fn apply(&self, args: &mut RequestArguments) {
        args.insert("bounding_boxes", self.bounding_boxes);
        args.insert("confidence_details", self.confidence_details);
        args.extend_fields(&self.extra);
    }
}

/// Options for blueprinted ("any") documents.
#[derive(Debug, Clone, Default)]
pub struct AnyDocumentOptions {
    /// Number of pages to read (default: 20).
    pub max_pages_to_process: Option<u32>,
    /// Extra fields, merged last.
    pub extra: AdditionalFields,
}

impl AnyDocumentOptions {
    pub(crate) const DEFAULT_MAX_PAGES: u32 = 20;

    pub(crate) fn apply(&self, args: &mut RequestArguments) {
        args.insert(
            "max_pages_to_process",
            self.max_pages_to_process.unwrap_or(Self::DEFAULT_MAX_PAGES),
        );
        args.extend_fields(&self.extra);
    }
}

/// Options for W-2 forms.
#[derive(Debug, Clone, Default)]
pub struct W2Options {
    /// Delete the document from Veryfi once extracted (default: false).
    pub auto_delete: Option<bool>,
    /// Number of pages to read (default: 1).
    pub max_pages_to_process: Option<u32>,
    /// Extra fields, merged last.
    pub extra: AdditionalFields,
}

impl W2Options {
    pub(crate) const DEFAULT_MAX_PAGES: u32 = 1;

    pub(crate) fn apply(&self, args: &mut RequestArguments) {
        args.insert("auto_delete", self.auto_delete.unwrap_or(false));
        args.insert(
            "max_pages_to_process",
            self.max_pages_to_process.unwrap_or(Self::DEFAULT_MAX_PAGES),
        );
        args.extend_fields(&self.extra);
    }
}

/// Pagination and detail flags for list endpoints.
#[derive(Debug, Clone)]
pub struct ListQuery {
    /// Page number (default: 1).
    pub page: u32,
    /// Results per page (default: 50).
    pub page_size: u32,
    /// Return bounding boxes.
    pub bounding_boxes: Option<bool>,
    /// Return confidence scores.
    pub confidence_details: Option<bool>,
    /// Extra query-string parameters.
    pub extra: AdditionalFields,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 50,
            bounding_boxes: None,
            confidence_details: None,
            extra: AdditionalFields::default(),
        }
    }
}

impl ListQuery {
    /// A query for one page.
    pub fn page(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            ..Default::default()
        }
    }

    pub(crate) fn arguments(&self) -> RequestArguments {
        let mut args = RequestArguments::new()
            .with("page", self.page)
            .with("page_size", self.page_size);
        args.insert_opt("bounding_boxes", self.bounding_boxes);
        args.insert_opt("confidence_details", self.confidence_details);
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_from_response() {
        let doc = Document::from_response(json!({"data": {"id": 7, "total": 1.0}}));
        assert_eq!(doc.id(), Some(7));
        assert_eq!(doc.get("total"), Some(&json!(1.0)));

        let raw = Document::from_response(json!({"id": 8}));
        assert_eq!(raw.id(), Some(8));
    }

    #[test]
    fn test_veryfi_document_plain_fields() {
        let doc = Document::from(json!({
            "id": 12,
            "total": 24.5,
            "currency_code": "USD",
            "vendor": {"name": "Walgreens", "raw_name": "WALGREENS #123"},
            "line_items": [{"description": "Milk", "total": 3.5, "type": "food"}],
            "tags": null,
            "ocr_text": "..."
        }));

        let typed: VeryfiDocument = doc.parse().unwrap();
        assert_eq!(typed.id, Some(12));
        assert_eq!(typed.total.as_ref().and_then(Field::value), Some(&24.5));
        let vendor = typed.vendor.unwrap();
        assert_eq!(
            vendor.name.as_ref().and_then(Field::value).map(String::as_str),
            Some("Walgreens")
        );
        assert_eq!(typed.line_items.len(), 1);
        assert_eq!(typed.line_items[0].kind.as_deref(), Some("food"));
        assert!(typed.tags.is_empty());
    }

    #[test]
    fn test_veryfi_document_bounded_fields() {
        let doc = Document::from(json!({
            "total": {"value": 10.0, "bounding_box": [0.1, 0.2, 0.3, 0.4], "rotation": 0},
            "vendor": {"name": {"value": "Shell", "bounding_region": [0.0, 1.0]}},
            "custom_field": "kept"
        }));

        let typed: VeryfiDocument = doc.parse().unwrap();
        assert_eq!(typed.total.as_ref().and_then(Field::value), Some(&10.0));
        match typed.total.unwrap() {
            Field::Bounded(b) => assert_eq!(b.bounding_box.unwrap().len(), 4),
            Field::Plain(_) => panic!("expected bounded field"),
        }
        assert_eq!(typed.other.get("custom_field"), Some(&json!("kept")));
    }

    #[test]
    fn test_document_options_defaults() {
        let mut args = RequestArguments::new();
        DocumentOptions::default().apply(&mut args);

        let categories = args.value("categories").unwrap().as_array().unwrap();
        assert_eq!(categories.len(), DEFAULT_CATEGORIES.len());
        assert_eq!(args.value("auto_delete"), Some(&json!(false)));
        assert!(args.value("boost_mode").is_none());
        assert!(args.value("external_id").is_none());
    }

    #[test]
    fn test_document_options_extra_wins() {
        let mut args = RequestArguments::new();
        DocumentOptions {
            auto_delete: Some(false),
            extra: AdditionalFields::new().with("auto_delete", true),
            ..Default::default()
        }
        .apply(&mut args);
        assert_eq!(args.value("auto_delete"), Some(&json!(true)));
    }

    #[test]
    fn test_list_query_arguments() {
        let args = ListQuery::page(2, 10).arguments();
        assert_eq!(args.to_json(), json!({"page": 2, "page_size": 10}));
    }

    #[test]
    fn test_any_document_default_pages() {
        let mut args = RequestArguments::new();
        AnyDocumentOptions::default().apply(&mut args);
        assert_eq!(args.value("max_pages_to_process"), Some(&json!(20)));
    }

    #[test]
    fn test_w2_defaults() {
        let mut args = RequestArguments::new();
        W2Options::default().apply(&mut args);
        assert_eq!(
            args.to_json(),
            json!({"auto_delete": false, "max_pages_to_process": 1})
        );
    }
}
