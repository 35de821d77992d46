//! Regulatory filings
//!
//! Tracks the customs and incentive paperwork attached to export shipments:
//! shipping bills, LUT declarations, drawback and RODTEP claims. These are
//! record-keeping entities; the filings themselves happen on government
//! portals.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{FilingId, OrderId};

use crate::error::DocumentError;

/// Kinds of regulatory filings the company tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingType {
    /// Customs shipping bill
    ShippingBill,
    /// Letter of Undertaking (zero-rated IGST)
    Lut,
    /// Duty Drawback claim
    DrawbackClaim,
    /// RODTEP scrip application
    RodtepClaim,
    Other,
}

impl FilingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilingType::ShippingBill => "shipping_bill",
            FilingType::Lut => "lut",
            FilingType::DrawbackClaim => "drawback_claim",
            FilingType::RodtepClaim => "rodtep_claim",
            FilingType::Other => "other",
        }
    }
}

impl fmt::Display for FilingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FilingType {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shipping_bill" => Ok(FilingType::ShippingBill),
            "lut" => Ok(FilingType::Lut),
            "drawback_claim" => Ok(FilingType::DrawbackClaim),
            "rodtep_claim" => Ok(FilingType::RodtepClaim),
            "other" => Ok(FilingType::Other),
            other => Err(DocumentError::validation(format!(
                "Unknown filing type: {other}"
            ))),
        }
    }
}

/// Filing status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    Pending,
    Filed,
    Approved,
    Rejected,
}

impl FilingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilingStatus::Pending => "pending",
            FilingStatus::Filed => "filed",
            FilingStatus::Approved => "approved",
            FilingStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FilingStatus {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(FilingStatus::Pending),
            "filed" => Ok(FilingStatus::Filed),
            "approved" => Ok(FilingStatus::Approved),
            "rejected" => Ok(FilingStatus::Rejected),
            other => Err(DocumentError::validation(format!(
                "Unknown filing status: {other}"
            ))),
        }
    }
}

/// A tracked regulatory filing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegulatoryFiling {
    pub id: FilingId,
    pub filing_type: FilingType,
    /// Government reference number, once assigned
    pub reference_number: Option<String>,
    /// Order this filing relates to, if any (LUTs are company-wide)
    pub order_id: Option<OrderId>,
    pub filed_on: Option<NaiveDate>,
    pub status: FilingStatus,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RegulatoryFiling {
    pub fn new(filing_type: FilingType) -> Self {
        let now = Utc::now();
        Self {
            id: FilingId::new_v7(),
            filing_type,
            reference_number: None,
            order_id: None,
            filed_on: None,
            status: FilingStatus::Pending,
            remarks: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn for_order(mut self, order_id: OrderId) -> Self {
        self.order_id = Some(order_id);
        self
    }

    /// Records that the filing was submitted
    pub fn mark_filed(
        &mut self,
        reference_number: impl Into<String>,
        filed_on: NaiveDate,
    ) -> Result<(), DocumentError> {
        if self.status != FilingStatus::Pending {
            return Err(DocumentError::InvalidTransition(format!(
                "Filing is {} and cannot be re-filed",
                self.status
            )));
        }
        self.reference_number = Some(reference_number.into());
        self.filed_on = Some(filed_on);
        self.status = FilingStatus::Filed;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Records the authority's decision
    pub fn resolve(&mut self, approved: bool, remarks: Option<String>) -> Result<(), DocumentError> {
        if self.status != FilingStatus::Filed {
            return Err(DocumentError::InvalidTransition(format!(
                "Filing is {} and cannot be resolved",
                self.status
            )));
        }
        self.status = if approved {
            FilingStatus::Approved
        } else {
            FilingStatus::Rejected
        };
        self.remarks = remarks;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filing_flow() {
        let mut filing = RegulatoryFiling::new(FilingType::DrawbackClaim).for_order(OrderId::new());
        assert_eq!(filing.status, FilingStatus::Pending);

        filing
            .mark_filed("DBK/2025/001234", NaiveDate::from_ymd_opt(2025, 5, 20).unwrap())
            .unwrap();
        assert_eq!(filing.status, FilingStatus::Filed);

        filing.resolve(true, None).unwrap();
        assert_eq!(filing.status, FilingStatus::Approved);

        // terminal
        assert!(filing.resolve(false, None).is_err());
    }

    #[test]
    fn test_cannot_resolve_unfiled() {
        let mut filing = RegulatoryFiling::new(FilingType::Lut);
        assert!(filing.resolve(true, None).is_err());
    }
}
