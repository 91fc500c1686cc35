//! Webhook deliveries.
//!
//! Every delivery is a [`WebhookPayload`] whose `data` holds one of five
//! shapes. Each shape is the corresponding resource plus a `payload_type` tag.

use crate::{
    core::{Strictness, Validate},
    enums::{ApiEnum, known_enum},
    errors::Result,
    model::{JsonModel, raw_model},
    resources::{
        disputes::Dispute, license_keys::LicenseKey, payments::Payment, refunds::Refund,
        subscriptions::Subscription,
    },
    types::Timestamp,
    union::tagged_union,
};

known_enum! {
    pub enum WebhookEventType {
        PaymentSucceeded => "payment.succeeded",
        PaymentFailed => "payment.failed",
        PaymentProcessing => "payment.processing",
        PaymentCancelled => "payment.cancelled",
        RefundSucceeded => "refund.succeeded",
        RefundFailed => "refund.failed",
        DisputeOpened => "dispute.opened",
        DisputeExpired => "dispute.expired",
        DisputeAccepted => "dispute.accepted",
        DisputeCancelled => "dispute.cancelled",
        DisputeChallenged => "dispute.challenged",
        DisputeWon => "dispute.won",
        DisputeLost => "dispute.lost",
        SubscriptionActive => "subscription.active",
        SubscriptionRenewed => "subscription.renewed",
        SubscriptionOnHold => "subscription.on_hold",
        SubscriptionCancelled => "subscription.cancelled",
        SubscriptionFailed => "subscription.failed",
        SubscriptionExpired => "subscription.expired",
        SubscriptionPlanChanged => "subscription.plan_changed",
        LicenseKeyCreated => "license_key.created",
    }
}

macro_rules! webhook_data {
    (
        $(#[$meta:meta])*
        $name:ident($base:ident, $as_base:ident),
        $tag:ident::$tag_variant:ident => $tag_raw:literal
    ) => {
        known_enum! {
            pub enum $tag {
                $tag_variant => $tag_raw,
            }
        }

        raw_model! {
            $(#[$meta])*
            pub struct $name;
        }

        impl $name {
            pub fn payload_type(&self) -> Result<ApiEnum<$tag>> {
                self.raw.get("payload_type")
            }

            /// The same fields read as the plain resource.
            pub fn $as_base(&self) -> $base {
                $base::from_raw(self.raw.clone())
            }
        }

        impl Validate for $name {
            fn check(&self, strictness: Strictness) -> Result<()> {
                self.payload_type()?.validate()?;
                self.$as_base().check(strictness)
            }
        }
    };
}

webhook_data! {
    /// `data` of `payment.*` events.
    PaymentWebhookData(Payment, as_payment),
    PaymentPayloadType::Payment => "Payment"
}

webhook_data! {
    /// `data` of `subscription.*` events.
    SubscriptionWebhookData(Subscription, as_subscription),
    SubscriptionPayloadType::Subscription => "Subscription"
}

webhook_data! {
    /// `data` of `refund.*` events.
    RefundWebhookData(Refund, as_refund),
    RefundPayloadType::Refund => "Refund"
}

webhook_data! {
    /// `data` of `dispute.*` events.
    DisputeWebhookData(Dispute, as_dispute),
    DisputePayloadType::Dispute => "Dispute"
}

webhook_data! {
    /// `data` of `license_key.*` events.
    LicenseKeyWebhookData(LicenseKey, as_license_key),
    LicenseKeyPayloadType::LicenseKey => "LicenseKey"
}

tagged_union! {
    /// The resource a webhook event is about, discriminated by `payload_type`.
    pub enum WebhookData {
        Payment(PaymentWebhookData),
        Subscription(SubscriptionWebhookData),
        Refund(RefundWebhookData),
        Dispute(DisputeWebhookData),
        LicenseKey(LicenseKeyWebhookData),
    }
}

raw_model! {
    /// The body of a webhook delivery.
    pub struct WebhookPayload;
}

impl WebhookPayload {
    /// Parses a delivery body. Only the outer object is checked here; call
    /// [`WebhookPayload::data`] or [`Validate::validate`] to inspect the rest.
    ///
    /// Signature verification happens before this and is not done here.
    pub fn parse(body: &str) -> Result<Self> {
        Self::from_json_str(body)
    }

    pub fn business_id(&self) -> Result<String> {
        self.raw.get("business_id")
    }

    pub fn r#type(&self) -> Result<ApiEnum<WebhookEventType>> {
        self.raw.get("type")
    }

    pub fn timestamp(&self) -> Result<Timestamp> {
        self.raw.get("timestamp")
    }

    /// Decodes `data`, keeping every variant's rejection if none matches.
    pub fn data(&self) -> Result<WebhookData> {
        match self.raw.field("data") {
            Some(value) => WebhookData::decode(value),
            None => self.raw.get("data"),
        }
    }
}

impl Validate for WebhookPayload {
    fn check(&self, strictness: Strictness) -> Result<()> {
        self.business_id()?;
        self.r#type()?.check(strictness)?;
        self.timestamp()?;
        self.data()?.check(strictness)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::errors::Error;

    fn refund_body() -> String {
        json!({
            "business_id": "bus_1",
            "type": "refund.succeeded",
            "timestamp": "2025-04-05T06:07:08.009Z",
            "data": {
                "payload_type": "Refund",
                "refund_id": "ref_1",
                "payment_id": "pay_1",
                "business_id": "bus_1",
                "status": "succeeded",
                "is_partial": false,
                "amount": 1000,
                "currency": "EUR",
                "reason": null,
                "metadata": {},
                "created_at": "2025-04-05T06:07:08.000Z",
            },
        })
        .to_string()
    }

    #[test]
    fn parses_refund_event() {
        let payload = WebhookPayload::parse(&refund_body()).unwrap();
        assert_eq!(payload.r#type().unwrap(), WebhookEventType::RefundSucceeded);

        let WebhookData::Refund(data) = payload.data().unwrap() else {
            panic!("expected refund data");
        };
        assert_eq!(data.payload_type().unwrap(), RefundPayloadType::Refund);
        assert_eq!(data.as_refund().amount().unwrap(), Some(1000));
        payload.validate().unwrap();
    }

    #[test]
    fn unrecognized_refund_status_still_selects_refund_data() {
        let mut body: serde_json::Value = serde_json::from_str(&refund_body()).unwrap();
        body["data"]["status"] = json!("partially_reversed");
        let payload = WebhookPayload::parse(&body.to_string()).unwrap();

        let data = payload.data().unwrap();
        let WebhookData::Refund(refund) = &data else {
            panic!("expected refund data, got {}", data.variant_name());
        };
        assert_eq!(refund.as_refund().status().unwrap().raw(), "partially_reversed");
        assert_eq!(serde_json::to_value(&data).unwrap(), body["data"]);

        let err = payload.validate().unwrap_err();
        assert!(err.is_unrecognized_value(), "{err}");
    }

    #[test]
    fn reencodes_data_without_wrapper() {
        let payload = WebhookPayload::parse(&refund_body()).unwrap();
        let data = payload.data().unwrap();
        assert_eq!(data.variant_name(), "Refund");
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            payload.to_json()["data"]
        );
    }

    #[test]
    fn unknown_payload_type_lists_every_rejection() {
        let payload = WebhookPayload::from_json(json!({
            "business_id": "bus_1",
            "type": "payout.sent",
            "timestamp": "2025-04-05T06:07:08.009Z",
            "data": { "payload_type": "Payout" },
        }))
        .unwrap();

        let event_type = payload.r#type().unwrap();
        assert_eq!(event_type.raw(), "payout.sent");
        assert!(!event_type.is_known());

        let Error::UnionDecodeFailed {
            union_name,
            failures,
        } = payload.data().unwrap_err()
        else {
            panic!("expected a union failure");
        };
        assert_eq!(union_name, "WebhookData");
        let names: Vec<_> = failures.iter().map(|f| f.variant).collect();
        assert_eq!(
            names,
            ["Payment", "Subscription", "Refund", "Dispute", "LicenseKey"]
        );
        assert!(failures.iter().all(|f| f.error.is_unrecognized_value()));
    }

    #[test]
    fn missing_data_is_missing_field() {
        let payload = WebhookPayload::from_json(json!({ "business_id": "bus_1" })).unwrap();
        assert!(payload.data().unwrap_err().is_missing_required_field());
    }

    #[test]
    fn malformed_body_is_a_json_error() {
        let err = WebhookPayload::parse("{\"business_id\":").unwrap_err();
        assert!(matches!(err, Error::SerdeJsonError(_)));
    }
}
