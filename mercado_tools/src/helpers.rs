//! Extraction helpers for the gateway's inconsistently shaped payloads.
use cpg_common::Money;

use crate::data_objects::{NotificationQuery, PaymentDetail, WebhookEvent};

/// Pulls the canonical payment id out of whichever notification shape arrived.
///
/// The structured body counts only when its discriminator says `payment` **and** it carries a nested id; otherwise
/// the legacy `id`/`payment_id` query parameters are consulted, in that order. Empty strings are treated as absent.
/// `None` means the notification is not actionable and must simply be acknowledged so the gateway stops retrying.
pub fn payment_id_from_notification(event: Option<&WebhookEvent>, query: &NotificationQuery) -> Option<String> {
    let not_empty = |s: String| if s.is_empty() { None } else { Some(s) };
    event
        .filter(|ev| ev.event_type.as_deref() == Some("payment"))
        .and_then(|ev| ev.data.as_ref())
        .and_then(|data| data.id.as_ref())
        .map(|id| id.to_string())
        .and_then(not_empty)
        .or_else(|| query.id.clone().and_then(not_empty))
        .or_else(|| query.payment_id.clone().and_then(not_empty))
}

/// The amount actually paid, taken from the first of the gateway's three total fields that is present: the primary
/// transaction amount, then the aggregate paid total, then the first entry of the per-transaction array.
///
/// `None` means the record carried no usable amount at all; callers log that and fall back to zero rather than
/// refuse the confirmation, since the payment itself is already approved.
pub fn paid_amount(payment: &PaymentDetail) -> Option<Money> {
    let pesos = payment
        .transaction_amount
        .or(payment.total_paid_amount)
        .or_else(|| payment.transaction_amounts.as_ref().and_then(|amounts| amounts.first().copied()))?;
    Money::try_from(pesos).ok()
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    fn detail(v: serde_json::Value) -> PaymentDetail {
        serde_json::from_value(v).unwrap()
    }

    fn body(v: serde_json::Value) -> WebhookEvent {
        serde_json::from_value(v).unwrap()
    }

    fn query(v: serde_json::Value) -> NotificationQuery {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn structured_body_id_wins_over_query_parameters() {
        let event = body(json!({ "type": "payment", "data": { "id": 555 } }));
        let q = query(json!({ "id": "111" }));
        assert_eq!(payment_id_from_notification(Some(&event), &q), Some("555".to_string()));
    }

    #[test]
    fn non_payment_events_fall_back_to_the_query() {
        let event = body(json!({ "type": "plan", "data": { "id": 555 } }));
        let q = query(json!({ "id": "111" }));
        assert_eq!(payment_id_from_notification(Some(&event), &q), Some("111".to_string()));
    }

    #[test]
    fn body_without_a_nested_id_falls_back_to_the_query() {
        let event = body(json!({ "type": "payment" }));
        let q = query(json!({ "payment_id": "222" }));
        assert_eq!(payment_id_from_notification(Some(&event), &q), Some("222".to_string()));
    }

    #[test]
    fn query_id_takes_precedence_over_payment_id() {
        let q = query(json!({ "id": "111", "payment_id": "222" }));
        assert_eq!(payment_id_from_notification(None, &q), Some("111".to_string()));
    }

    #[test]
    fn empty_ids_count_as_absent() {
        let event = body(json!({ "type": "payment", "data": { "id": "" } }));
        let q = query(json!({ "id": "", "payment_id": "222" }));
        assert_eq!(payment_id_from_notification(Some(&event), &q), Some("222".to_string()));
    }

    #[test]
    fn nothing_actionable_yields_none() {
        assert_eq!(payment_id_from_notification(None, &NotificationQuery::default()), None);
        let event = body(json!({ "action": "payment.updated" }));
        assert_eq!(payment_id_from_notification(Some(&event), &NotificationQuery::default()), None);
    }

    #[test]
    fn primary_transaction_amount_wins() {
        let payment = detail(json!({
            "id": 1, "status": "approved",
            "transaction_amount": 100.0, "total_paid_amount": 110.0, "transaction_amounts": [120.0]
        }));
        assert_eq!(paid_amount(&payment), Some(Money::from_pesos(100)));
    }

    #[test]
    fn aggregate_total_is_the_first_fallback() {
        let payment = detail(json!({ "id": 1, "status": "approved", "total_paid_amount": 110.5 }));
        assert_eq!(paid_amount(&payment), Some(Money::from_centavos(11_050)));
    }

    #[test]
    fn first_of_the_amount_array_is_the_last_resort() {
        let payment = detail(json!({ "id": 1, "status": "approved", "transaction_amounts": [120.0, 50.0] }));
        assert_eq!(paid_amount(&payment), Some(Money::from_pesos(120)));
    }

    #[test]
    fn a_record_with_no_amount_yields_none() {
        let payment = detail(json!({ "id": 1, "status": "approved", "transaction_amounts": [] }));
        assert_eq!(paid_amount(&payment), None);
        let payment = detail(json!({ "id": 1, "status": "approved" }));
        assert_eq!(paid_amount(&payment), None);
    }
}
