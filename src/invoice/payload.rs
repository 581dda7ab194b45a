//! Invoice payload assembly.
//!
//! Field names are a contract with the backend and must go over the wire
//! verbatim, including the `[]` suffix on the address arrays.

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;

use crate::form::answers::FormAnswers;

/// A captured file reference for the optional `weighmentSlips` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// The assembled outbound payload. Built deterministically from the
/// answers plus the submission timestamp, so the mapping is testable
/// without a clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoicePayload {
    pub user_id: Option<String>,
    pub invoice_number: String,
    pub invoice_date: String,
    pub place_of_supply: String,
    pub supplier_address: Vec<String>,
    pub bill_to_address: Vec<String>,
    pub ship_to_address: Vec<String>,
    pub product_name: String,
    pub supplier_name: String,
    pub bill_to_name: String,
    pub ship_to_name: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
    pub vehicle_number: Option<String>,
    pub hsn_code: Option<String>,
    pub weighment_slip_note: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn or_default(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

impl InvoicePayload {
    /// Map the collected answers into the outbound payload.
    ///
    /// The invoice number is time-based (`INV-{unix_millis}`), the single
    /// collected buyer address is duplicated into the bill-to and ship-to
    /// slots, and `amount = quantity × rate` with absent operands treated
    /// as 0 rather than rejected.
    pub fn from_answers(
        answers: &FormAnswers,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> Self {
        let supplier_address = or_default(&answers.supplier_address, "Unknown Address");
        let buyer_address = or_default(&answers.buyer_address, "Unknown Address");
        let buyer_name = or_default(&answers.buyer_name, "Unknown Buyer");

        let quantity = answers.quantity.unwrap_or(Decimal::ZERO);
        let rate = answers.rate.unwrap_or(Decimal::ZERO);
        let amount = quantity * rate;

        Self {
            user_id: user_id.map(str::to_string),
            invoice_number: format!("INV-{}", now.timestamp_millis()),
            invoice_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            place_of_supply: or_default(&answers.supplier_address, "State"),
            supplier_address: vec![supplier_address],
            bill_to_address: vec![buyer_address.clone()],
            ship_to_address: vec![buyer_address],
            product_name: or_default(&answers.item_name, "Item"),
            supplier_name: or_default(&answers.supplier_name, "Unknown Supplier"),
            bill_to_name: buyer_name.clone(),
            ship_to_name: buyer_name,
            quantity,
            rate,
            amount,
            vehicle_number: non_empty(&answers.vehicle_number),
            hsn_code: non_empty(&answers.hsn),
            weighment_slip_note: non_empty(&answers.notes),
        }
    }

    /// The exact wire pairs for the multipart form, in submission order.
    ///
    /// The vehicle number goes out twice (`vehicleNumber` and
    /// `truckNumber`); optional pairs appear iff the source is non-empty.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields: Vec<(&'static str, String)> = Vec::new();

        if let Some(ref user_id) = self.user_id {
            fields.push(("userId", user_id.clone()));
        }

        fields.push(("invoiceNumber", self.invoice_number.clone()));
        fields.push(("invoiceDate", self.invoice_date.clone()));
        fields.push(("placeOfSupply", self.place_of_supply.clone()));

        for address in &self.supplier_address {
            fields.push(("supplierAddress[]", address.clone()));
        }
        for address in &self.bill_to_address {
            fields.push(("billToAddress[]", address.clone()));
        }
        for address in &self.ship_to_address {
            fields.push(("shipToAddress[]", address.clone()));
        }

        fields.push(("productName", self.product_name.clone()));
        fields.push(("supplierName", self.supplier_name.clone()));
        fields.push(("billToName", self.bill_to_name.clone()));
        fields.push(("shipToName", self.ship_to_name.clone()));

        fields.push(("quantity", self.quantity.normalize().to_string()));
        fields.push(("rate", self.rate.normalize().to_string()));
        fields.push(("amount", self.amount.normalize().to_string()));

        if let Some(ref vehicle) = self.vehicle_number {
            fields.push(("vehicleNumber", vehicle.clone()));
            fields.push(("truckNumber", vehicle.clone()));
        }
        if let Some(ref hsn) = self.hsn_code {
            fields.push(("hsnCode", hsn.clone()));
        }
        if let Some(ref note) = self.weighment_slip_note {
            fields.push(("weighmentSlipNote", note.clone()));
        }

        fields
    }
}
