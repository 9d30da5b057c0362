//! Booking readiness checklist and score.

use serde::{Deserialize, Serialize};

/// One togglable item on the readiness checklist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChecklistItem {
    Deposit,
    Address,
    Inventory,
    Elevator,
    Confirmation,
    AgreementSigned,
}

/// The fixed six-point checklist a job must clear before move day.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessChecklist {
    pub deposit: bool,
    pub address: bool,
    pub inventory: bool,
    pub elevator: bool,
    pub confirmation: bool,
    pub agreement_signed: bool,
}

impl ReadinessChecklist {
    fn items(&self) -> [bool; 6] {
        [
            self.deposit,
            self.address,
            self.inventory,
            self.elevator,
            self.confirmation,
            self.agreement_signed,
        ]
    }

    pub fn toggle(&mut self, item: ChecklistItem) {
        let flag = match item {
            ChecklistItem::Deposit => &mut self.deposit,
            ChecklistItem::Address => &mut self.address,
            ChecklistItem::Inventory => &mut self.inventory,
            ChecklistItem::Elevator => &mut self.elevator,
            ChecklistItem::Confirmation => &mut self.confirmation,
            ChecklistItem::AgreementSigned => &mut self.agreement_signed,
        };
        *flag = !*flag;
    }

    pub fn checked_count(&self) -> usize {
        self.items().iter().filter(|set| **set).count()
    }

    /// Percentage of the checklist completed, rounded to the nearest point.
    pub fn score(&self) -> u8 {
        let total = self.items().len();
        ((self.checked_count() as f64 / total as f64) * 100.0).round() as u8
    }
}
