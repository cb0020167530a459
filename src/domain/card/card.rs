use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::value_objects::{CardStatus, Orientation};
use crate::domain::validation::rules::parse_date;
use crate::domain::validation::{validate_body, Constraint, FieldRule, Record, ValidationErrors};

const ASSET_MAX: usize = 2048;

/// Rules applied to `POST /api/addCard` bodies
///
/// `Created_Date` and `Modified_Date` are not listed: both are assigned when
/// the card is stored.
pub const CARD_SCHEMA: &[FieldRule] = &[
    FieldRule::required(
        "Occasion",
        "Occasion",
        &[Constraint::MaxLength(100)],
    ),
    FieldRule::required(
        "Recipient",
        "Recipient",
        &[Constraint::MaxLength(100)],
    ),
    FieldRule::required(
        "Orientation",
        "Orientation",
        &[Constraint::OneOf(Orientation::VALUES)],
    ),
    FieldRule::required(
        "Publisher_Sku",
        "Publisher SKU",
        &[Constraint::MaxLength(64)],
    ),
    FieldRule::required(
        "CardwithGift_Sku",
        "CardwithGift SKU",
        &[Constraint::MaxLength(64)],
    ),
    FieldRule::optional("Activation_Date", "Activation Date", &[Constraint::Date]),
    FieldRule::optional("Deactivation_Date", "Deactivation Date", &[Constraint::Date]),
    FieldRule::required("Front", "Front", &[Constraint::MaxLength(ASSET_MAX)]),
    FieldRule::optional("Inside_Left", "Inside Left", &[Constraint::MaxLength(ASSET_MAX)]),
    FieldRule::optional("Inside_Right", "Inside Right", &[Constraint::MaxLength(ASSET_MAX)]),
    FieldRule::required("Back", "Back", &[Constraint::MaxLength(ASSET_MAX)]),
    FieldRule::optional("Uploaded_By", "Uploaded By", &[Constraint::MaxLength(100)]),
    FieldRule::optional("Status", "Status", &[Constraint::OneOf(CardStatus::VALUES)]),
];

/// A stored card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "Occasion")]
    pub occasion: String,
    #[serde(rename = "Recipient")]
    pub recipient: String,
    #[serde(rename = "Orientation")]
    pub orientation: Orientation,
    #[serde(rename = "Publisher_Sku")]
    pub publisher_sku: String,
    #[serde(rename = "CardwithGift_Sku")]
    pub cardwithgift_sku: String,
    #[serde(rename = "Created_Date")]
    pub created_date: DateTime<Utc>,
    #[serde(rename = "Modified_Date")]
    pub modified_date: DateTime<Utc>,
    #[serde(rename = "Activation_Date")]
    pub activation_date: Option<NaiveDate>,
    #[serde(rename = "Deactivation_Date")]
    pub deactivation_date: Option<NaiveDate>,
    #[serde(rename = "Front")]
    pub front: String,
    #[serde(rename = "Inside_Left")]
    pub inside_left: Option<String>,
    #[serde(rename = "Inside_Right")]
    pub inside_right: Option<String>,
    #[serde(rename = "Back")]
    pub back: String,
    #[serde(rename = "Uploaded_By")]
    pub uploaded_by: Option<String>,
    #[serde(rename = "Status")]
    pub status: CardStatus,
}

/// A validated card upload, not yet tied to an owner or persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCard {
    pub occasion: String,
    pub recipient: String,
    pub orientation: Orientation,
    pub publisher_sku: String,
    pub cardwithgift_sku: String,
    pub activation_date: Option<NaiveDate>,
    pub deactivation_date: Option<NaiveDate>,
    pub front: String,
    pub inside_left: Option<String>,
    pub inside_right: Option<String>,
    pub back: String,
    pub uploaded_by: Option<String>,
    pub status: CardStatus,
}

impl NewCard {
    /// Validates an upload body against `CARD_SCHEMA` plus the date ordering rule
    ///
    /// Table violations and the date ordering violation are reported together.
    pub fn from_body(body: &Value) -> Result<Self, ValidationErrors> {
        let checked = validate_body(body, CARD_SCHEMA);
        let ordering = date_order_violation(body);

        match (checked, ordering) {
            (Ok(record), None) => Self::from_record(record),
            (Ok(_), Some(message)) => Err(ValidationErrors::single(message)),
            (Err(errors), ordering) => {
                let mut messages = errors.into_messages();
                messages.extend(ordering);
                Err(ValidationErrors::new(messages))
            }
        }
    }

    /// Builds an upload from a record that passed `CARD_SCHEMA`
    pub fn from_record(mut record: Record) -> Result<Self, ValidationErrors> {
        let orientation = take_required(&mut record, "Orientation", "Orientation")?
            .parse::<Orientation>()
            .map_err(|_| ValidationErrors::single("Invalid Orientation"))?;
        let status = match record.take("Status") {
            Some(status) => status
                .parse::<CardStatus>()
                .map_err(|_| ValidationErrors::single("Invalid Status"))?,
            None => CardStatus::default(),
        };

        Ok(Self {
            occasion: take_required(&mut record, "Occasion", "Occasion")?,
            recipient: take_required(&mut record, "Recipient", "Recipient")?,
            orientation,
            publisher_sku: take_required(&mut record, "Publisher_Sku", "Publisher SKU")?,
            cardwithgift_sku: take_required(&mut record, "CardwithGift_Sku", "CardwithGift SKU")?,
            activation_date: record.get("Activation_Date").and_then(parse_date),
            deactivation_date: record.get("Deactivation_Date").and_then(parse_date),
            front: take_required(&mut record, "Front", "Front")?,
            inside_left: record.take("Inside_Left"),
            inside_right: record.take("Inside_Right"),
            back: take_required(&mut record, "Back", "Back")?,
            uploaded_by: record.take("Uploaded_By"),
            status,
        })
    }

    /// Materializes the stored card for `owner_id`
    pub fn into_card(self, id: Uuid, owner_id: Uuid, now: DateTime<Utc>) -> Card {
        Card {
            id,
            user_id: owner_id,
            occasion: self.occasion,
            recipient: self.recipient,
            orientation: self.orientation,
            publisher_sku: self.publisher_sku,
            cardwithgift_sku: self.cardwithgift_sku,
            created_date: now,
            modified_date: now,
            activation_date: self.activation_date,
            deactivation_date: self.deactivation_date,
            front: self.front,
            inside_left: self.inside_left,
            inside_right: self.inside_right,
            back: self.back,
            uploaded_by: self.uploaded_by,
            status: self.status,
        }
    }
}

fn date_order_violation(body: &Value) -> Option<String> {
    let date = |field: &str| body.get(field).and_then(Value::as_str).and_then(parse_date);
    let activation = date("Activation_Date")?;
    let deactivation = date("Deactivation_Date")?;

    (deactivation < activation)
        .then(|| "Deactivation Date must not be before Activation Date".to_string())
}

fn take_required(record: &mut Record, field: &str, label: &str) -> Result<String, ValidationErrors> {
    record
        .take(field)
        .ok_or_else(|| ValidationErrors::single(format!("{} is required", label)))
}
