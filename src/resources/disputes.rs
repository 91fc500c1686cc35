use crate::{
    core::{Strictness, Validate},
    enums::{ApiEnum, known_enum},
    errors::Result,
    model::raw_model,
    transport::{ApiRequest, Endpoint},
    types::Timestamp,
};

known_enum! {
    pub enum DisputeStatus {
        DisputeOpened => "dispute_opened",
        DisputeExpired => "dispute_expired",
        DisputeAccepted => "dispute_accepted",
        DisputeCancelled => "dispute_cancelled",
        DisputeChallenged => "dispute_challenged",
        DisputeWon => "dispute_won",
        DisputeLost => "dispute_lost",
    }
}

known_enum! {
    pub enum DisputeStage {
        PreDispute => "pre_dispute",
        Dispute => "dispute",
        PreArbitration => "pre_arbitration",
    }
}

raw_model! {
    /// A chargeback raised against a payment.
    pub struct Dispute;
}

impl Dispute {
    pub fn dispute_id(&self) -> Result<String> {
        self.raw.get("dispute_id")
    }

    pub fn payment_id(&self) -> Result<String> {
        self.raw.get("payment_id")
    }

    pub fn business_id(&self) -> Result<String> {
        self.raw.get("business_id")
    }

    /// Disputed amount as a string in the smallest currency unit.
    pub fn amount(&self) -> Result<String> {
        self.raw.get("amount")
    }

    /// Currency code; kept as text since the API does not restrict it here.
    pub fn currency(&self) -> Result<String> {
        self.raw.get("currency")
    }

    pub fn dispute_status(&self) -> Result<ApiEnum<DisputeStatus>> {
        self.raw.get("dispute_status")
    }

    pub fn dispute_stage(&self) -> Result<ApiEnum<DisputeStage>> {
        self.raw.get("dispute_stage")
    }

    pub fn remarks(&self) -> Result<Option<String>> {
        self.raw.get_optional("remarks")
    }

    pub fn created_at(&self) -> Result<Timestamp> {
        self.raw.get("created_at")
    }
}

impl Validate for Dispute {
    fn check(&self, strictness: Strictness) -> Result<()> {
        self.dispute_id()?;
        self.payment_id()?;
        self.business_id()?;
        self.amount()?;
        self.currency()?;
        self.dispute_status()?.check(strictness)?;
        self.dispute_stage()?.check(strictness)?;
        self.remarks()?;
        self.created_at()?;
        Ok(())
    }
}

/// `GET /disputes/{dispute_id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetDispute {
    pub dispute_id: String,
}

impl Endpoint for GetDispute {
    type Response = Dispute;

    fn request(&self) -> Result<ApiRequest> {
        Ok(ApiRequest::get(["disputes", self.dispute_id.as_str()]))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::JsonModel;

    #[test]
    fn stage_and_status_decode() {
        let dispute = Dispute::from_json(json!({
            "dispute_id": "dsp_1",
            "payment_id": "pay_1",
            "business_id": "bus_1",
            "amount": "4999",
            "currency": "USD",
            "dispute_status": "dispute_challenged",
            "dispute_stage": "pre_arbitration",
            "remarks": null,
            "created_at": "2025-03-01T00:00:00+05:30",
        }))
        .unwrap();

        assert_eq!(
            dispute.dispute_status().unwrap(),
            DisputeStatus::DisputeChallenged
        );
        assert_eq!(
            dispute.dispute_stage().unwrap().known().unwrap(),
            DisputeStage::PreArbitration
        );
        assert_eq!(
            dispute.created_at().unwrap().to_string(),
            "2025-02-28T18:30:00.000Z"
        );
        dispute.validate().unwrap();
    }

    #[test]
    fn wrong_type_is_invalid_data() {
        let dispute = Dispute::from_json(json!({ "dispute_id": 7 })).unwrap();
        assert!(dispute.dispute_id().unwrap_err().is_invalid_data());
    }
}
