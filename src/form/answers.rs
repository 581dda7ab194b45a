//! Collected form answers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::question::FieldKey;

/// Fixed defaults for the pre-filled questions the skip rule bypasses.
pub const DEFAULT_ITEM_NAME: &str = "Tender Coconut";
pub const DEFAULT_HSN: &str = "08011910";

/// A typed answer to one question.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerValue {
    Text(String),
    Number(Decimal),
}

/// The answers accumulated over one session, one field at a time. Owned
/// exclusively by the session; dropped with it on submit or abandonment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormAnswers {
    pub supplier_name: String,
    pub supplier_address: String,
    pub buyer_name: String,
    pub buyer_address: String,
    pub item_name: String,
    pub hsn: String,
    pub quantity: Option<Decimal>,
    pub rate: Option<Decimal>,
    pub vehicle_number: String,
    pub notes: String,
}

impl Default for FormAnswers {
    fn default() -> Self {
        Self {
            supplier_name: String::new(),
            supplier_address: String::new(),
            buyer_name: String::new(),
            buyer_address: String::new(),
            item_name: DEFAULT_ITEM_NAME.to_string(),
            hsn: DEFAULT_HSN.to_string(),
            quantity: None,
            rate: None,
            vehicle_number: String::new(),
            notes: String::new(),
        }
    }
}

impl FormAnswers {
    /// Store a validated answer in the slot for `field`.
    ///
    /// `Language` and `WeighmentSlip` are control fields with no slot here;
    /// storing to them is a no-op. Numeric values land only in numeric
    /// slots (the session validates kind before calling).
    pub fn set(&mut self, field: FieldKey, value: AnswerValue) {
        match (field, value) {
            (FieldKey::SupplierName, AnswerValue::Text(v)) => self.supplier_name = v,
            (FieldKey::SupplierAddress, AnswerValue::Text(v)) => self.supplier_address = v,
            (FieldKey::BuyerName, AnswerValue::Text(v)) => self.buyer_name = v,
            (FieldKey::BuyerAddress, AnswerValue::Text(v)) => self.buyer_address = v,
            (FieldKey::ItemName, AnswerValue::Text(v)) => self.item_name = v,
            (FieldKey::Quantity, AnswerValue::Number(v)) => self.quantity = Some(v),
            (FieldKey::Rate, AnswerValue::Number(v)) => self.rate = Some(v),
            (FieldKey::VehicleNumber, AnswerValue::Text(v)) => self.vehicle_number = v,
            (FieldKey::Notes, AnswerValue::Text(v)) => self.notes = v,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn defaults_prefill_item_and_hsn() {
        let answers = FormAnswers::default();
        assert_eq!(answers.item_name, "Tender Coconut");
        assert_eq!(answers.hsn, "08011910");
        assert!(answers.quantity.is_none());
        assert!(answers.rate.is_none());
        assert!(answers.supplier_name.is_empty());
    }

    #[test]
    fn set_routes_values_to_their_slots() {
        let mut answers = FormAnswers::default();
        answers.set(
            FieldKey::SupplierName,
            AnswerValue::Text("Seller X".to_string()),
        );
        answers.set(FieldKey::Quantity, AnswerValue::Number(dec!(12.5)));
        answers.set(FieldKey::Rate, AnswerValue::Number(dec!(40)));

        assert_eq!(answers.supplier_name, "Seller X");
        assert_eq!(answers.quantity, Some(dec!(12.5)));
        assert_eq!(answers.rate, Some(dec!(40)));
    }

    #[test]
    fn control_fields_are_ignored() {
        let mut answers = FormAnswers::default();
        answers.set(FieldKey::Language, AnswerValue::Text("2".to_string()));
        answers.set(
            FieldKey::WeighmentSlip,
            AnswerValue::Text("slip.jpg".to_string()),
        );
        // Nothing changed
        assert_eq!(
            serde_json::to_value(&answers).unwrap(),
            serde_json::to_value(FormAnswers::default()).unwrap()
        );
    }
}
