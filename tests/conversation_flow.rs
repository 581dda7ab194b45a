//! End-to-end conversation: Hindi flow from language pick to submission.

use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal_macros::dec;

use mandiplus::api::client::{CreatedInvoice, InvoiceApi};
use mandiplus::error::ApiError;
use mandiplus::form::session::{AnswerStep, FormSession, SubmitOutcome};
use mandiplus::form::transcript::Sender;
use mandiplus::invoice::payload::{Attachment, InvoicePayload};

/// Records every submission and replies with a fixed response.
struct RecordingApi {
    response: CreatedInvoice,
    submissions: Mutex<Vec<(InvoicePayload, Option<Attachment>)>>,
}

impl RecordingApi {
    fn new(response: CreatedInvoice) -> Self {
        Self {
            response,
            submissions: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl InvoiceApi for RecordingApi {
    async fn create_invoice(
        &self,
        payload: InvoicePayload,
        attachment: Option<Attachment>,
    ) -> Result<CreatedInvoice, ApiError> {
        self.submissions.lock().unwrap().push((payload, attachment));
        Ok(self.response.clone())
    }
}

fn wire_field<'a>(fields: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.as_str())
}

#[tokio::test]
async fn hindi_conversation_from_greeting_to_document_link() {
    let mut session = FormSession::new();

    // Pick Hindi, answer through the buyer address (which triggers the
    // skip past the pre-filled item and HSN questions).
    assert_eq!(session.submit_answer("2"), AnswerStep::Prompted);
    assert_eq!(session.submit_answer("Seller X"), AnswerStep::Prompted);
    assert_eq!(session.submit_answer("Addr1"), AnswerStep::Prompted);
    assert_eq!(session.submit_answer("Buyer Y"), AnswerStep::Prompted);
    assert_eq!(session.submit_answer("Addr2"), AnswerStep::Prompted);

    // Transcript so far: opening English language prompt, the echoed
    // language name, four Hindi prompt/answer pairs, the synthetic item
    // echo, and the Hindi quantity prompt.
    let texts: Vec<(Sender, &str)> = session
        .transcript()
        .messages()
        .iter()
        .map(|m| (m.sender, m.text.as_str()))
        .collect();
    assert_eq!(
        texts,
        vec![
            (Sender::Bot, "Bhasha / Language\nType 1 - English\nType 2 - Hindi"),
            (Sender::User, "हिंदी"),
            (Sender::Bot, "माल भेजने वाला"),
            (Sender::User, "Seller X"),
            (Sender::Bot, "भेजने वाले का पता"),
            (Sender::User, "Addr1"),
            (Sender::Bot, "पार्टी का नाम"),
            (Sender::User, "Buyer Y"),
            (Sender::Bot, "पार्टी का पता"),
            (Sender::User, "Addr2"),
            (Sender::User, "Tender Coconut"),
            (Sender::Bot, "कुल मात्रा/QTY"),
        ]
    );

    // Finish the numeric and optional questions, attach the slip.
    assert_eq!(session.submit_answer("12.5"), AnswerStep::Prompted);
    assert_eq!(session.submit_answer("40"), AnswerStep::Prompted);
    assert_eq!(session.submit_answer("MH12AB1234"), AnswerStep::Prompted);
    assert_eq!(session.submit_answer("Cash"), AnswerStep::AwaitFile);
    let step = session
        .attach_file(Attachment {
            file_name: "slip.jpg".to_string(),
            bytes: b"fake image bytes".to_vec(),
        })
        .unwrap();
    assert_eq!(step, AnswerStep::ReadyToSubmit);

    let api = RecordingApi::new(CreatedInvoice {
        id: Some("inv-9".to_string()),
        pdf_url: Some("http://localhost:3000/pdfs/inv-9.pdf".to_string()),
    });
    let outcome = session.submit(&api, Some("user-42")).await.unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Redirect("http://localhost:3000/pdfs/inv-9.pdf".to_string())
    );

    // Exactly one submission went out, carrying the full contract.
    let submissions = api.submissions.lock().unwrap();
    assert_eq!(submissions.len(), 1);
    let (payload, attachment) = &submissions[0];

    assert_eq!(payload.supplier_name, "Seller X");
    assert_eq!(payload.bill_to_name, "Buyer Y");
    assert_eq!(payload.ship_to_name, "Buyer Y");
    assert_eq!(payload.amount, dec!(500));
    assert!(payload.invoice_number.starts_with("INV-"));

    let fields = payload.text_fields();
    assert_eq!(wire_field(&fields, "userId"), Some("user-42"));
    assert_eq!(wire_field(&fields, "supplierAddress[]"), Some("Addr1"));
    assert_eq!(wire_field(&fields, "billToAddress[]"), Some("Addr2"));
    assert_eq!(wire_field(&fields, "shipToAddress[]"), Some("Addr2"));
    assert_eq!(wire_field(&fields, "productName"), Some("Tender Coconut"));
    assert_eq!(wire_field(&fields, "hsnCode"), Some("08011910"));
    assert_eq!(wire_field(&fields, "quantity"), Some("12.5"));
    assert_eq!(wire_field(&fields, "rate"), Some("40"));
    assert_eq!(wire_field(&fields, "amount"), Some("500"));
    assert_eq!(wire_field(&fields, "vehicleNumber"), Some("MH12AB1234"));
    assert_eq!(wire_field(&fields, "truckNumber"), Some("MH12AB1234"));
    assert_eq!(wire_field(&fields, "weighmentSlipNote"), Some("Cash"));

    assert_eq!(attachment.as_ref().unwrap().file_name, "slip.jpg");
}

#[tokio::test]
async fn transcript_only_ever_grows() {
    let mut session = FormSession::new();
    let mut last_len = session.transcript().len();

    for input in ["maybe?", "2", "", "Seller X", "Addr1", "Buyer Y", "Addr2", "abc", "3"] {
        session.submit_answer(input);
        let len = session.transcript().len();
        assert!(len >= last_len, "transcript shrank after {input:?}");
        last_len = len;
    }
}

#[tokio::test]
async fn english_flow_without_file_or_vehicle() {
    let mut session = FormSession::new();
    session.submit_answer("1");
    session.submit_answer("Seller X");
    session.submit_answer("Addr1");
    session.submit_answer("Buyer Y");
    session.submit_answer("Addr2");
    session.submit_answer("10");
    session.submit_answer("25");
    // Vehicle number is required in the flow; notes and file are not.
    session.submit_answer("KA01ZZ0001");
    assert_eq!(session.submit_answer(""), AnswerStep::AwaitFile);
    assert_eq!(session.skip_file(), AnswerStep::ReadyToSubmit);

    let api = RecordingApi::new(CreatedInvoice {
        id: Some("inv-10".to_string()),
        pdf_url: None,
    });
    let outcome = session.submit(&api, None).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::FallbackAfter(_)));

    let submissions = api.submissions.lock().unwrap();
    let (payload, attachment) = &submissions[0];
    assert!(attachment.is_none());
    assert_eq!(payload.amount, dec!(250));
    let fields = payload.text_fields();
    assert_eq!(wire_field(&fields, "weighmentSlipNote"), None);
    assert_eq!(wire_field(&fields, "userId"), None);

    // English status messages on the transcript.
    let bot_texts: Vec<&str> = session
        .transcript()
        .messages()
        .iter()
        .filter(|m| m.sender == Sender::Bot)
        .map(|m| m.text.as_str())
        .collect();
    assert!(bot_texts.contains(&"Submitting details..."));
    assert!(bot_texts.contains(&"Success! Invoice created."));
    assert!(bot_texts.contains(&"PDF is generating... Redirecting to My Forms."));
}
