//! Stages of one checkout attempt and the outcome handed back to the caller.

use super::error::CheckoutError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    CollectingInfo,
    ValidatingAddress,
    CreatingOrder,
    CreatingPayment,
    Redirecting,
}

/// Where the caller should go next.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// Send the customer to the payment gateway.
    RedirectToPayment { order_id: String, url: String },
    /// The order exists but has no payment link. Show the order history.
    OrderHistory { order_id: String, reason: String },
    /// Nothing was ordered. The form stays open.
    Rejected {
        stage: CheckoutStage,
        error: CheckoutError,
    },
}

impl CheckoutOutcome {
    pub fn order_id(&self) -> Option<&str> {
        match self {
            Self::RedirectToPayment { order_id, .. } | Self::OrderHistory { order_id, .. } => {
                Some(order_id)
            }
            Self::Rejected { .. } => None,
        }
    }

    /// Text to show the customer, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::RedirectToPayment { .. } => None,
            Self::OrderHistory { reason, .. } => Some(reason.clone()),
            Self::Rejected { error, .. } => Some(error.to_string()),
        }
    }
}

/// Outcome plus every stage visited, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReport {
    pub outcome: CheckoutOutcome,
    pub stages: Vec<CheckoutStage>,
}

/// Records stage transitions of one attempt.
#[derive(Debug)]
pub(crate) struct StageLog {
    stages: Vec<CheckoutStage>,
}

impl StageLog {
    pub(crate) fn start() -> Self {
        Self {
            stages: vec![CheckoutStage::CollectingInfo],
        }
    }

    pub(crate) fn enter(&mut self, stage: CheckoutStage) {
        tracing::debug!(?stage, "Checkout stage");
        self.stages.push(stage);
    }

    pub(crate) fn current(&self) -> CheckoutStage {
        self.stages
            .last()
            .copied()
            .unwrap_or(CheckoutStage::CollectingInfo)
    }

    /// Back to the form with `error`, attributed to the stage that failed.
    pub(crate) fn reject(mut self, error: CheckoutError) -> CheckoutReport {
        let stage = self.current();
        if stage != CheckoutStage::CollectingInfo {
            self.stages.push(CheckoutStage::CollectingInfo);
        }
        CheckoutReport {
            outcome: CheckoutOutcome::Rejected { stage, error },
            stages: self.stages,
        }
    }

    pub(crate) fn finish(self, outcome: CheckoutOutcome) -> CheckoutReport {
        CheckoutReport {
            outcome,
            stages: self.stages,
        }
    }
}
