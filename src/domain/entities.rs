use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime};

use super::readiness::ReadinessChecklist;

/// How long a new hire stays on probation.
const PROBATION_DAYS: i64 = 90;

/// Company-wide settings edited from the back office.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompanySettings {
    pub name: String,
    pub phone: String,
    pub service_area: Vec<String>,
    /// Not consulted by quoting; the fixed crew-size rate table takes
    /// precedence. Kept so saved profiles round-trip.
    pub base_hourly_rate: f64,
    pub min_charge_hours: f64,
    pub deposit_amount: f64,
    pub crew_sizes: Vec<u8>,
    pub processing_fee_rate: f64,
}

impl Default for CompanySettings {
    fn default() -> Self {
        Self {
            name: "Elite Movers HQ".to_string(),
            phone: "555-010-9988".to_string(),
            service_area: vec![
                "Minneapolis".to_string(),
                "St. Paul".to_string(),
                "Brooklyn Park".to_string(),
                "Bloomington".to_string(),
            ],
            base_hourly_rate: 150.0,
            min_charge_hours: 3.0,
            deposit_amount: 50.0,
            crew_sizes: vec![2, 3, 4, 5, 6],
            processing_fee_rate: 0.029,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Owner,
    OpsManager,
    CrewLead,
    Mover,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum W9Status {
    #[default]
    Pending,
    Verified,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayrollKind {
    Salary,
    Bonus,
    Reimbursement,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    pub id: String,
    pub date: Date,
    pub amount: f64,
    pub kind: PayrollKind,
    pub note: String,
}

/// Direct-deposit and tax details for one employee.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PayrollInfo {
    pub routing_number: String,
    pub account_number: String,
    pub bank_name: String,
    pub tax_id: String,
    pub w9_status: W9Status,
    #[serde(default)]
    pub payment_history: Vec<PayrollRecord>,
}

impl PayrollInfo {
    pub fn total_paid(&self) -> f64 {
        self.payment_history.iter().map(|record| record.amount).sum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub role: UserRole,
    pub payroll: PayrollInfo,
    pub status: EmployeeStatus,
    pub hire_date: Date,
}

impl Employee {
    /// Last day of the 90-day probation window.
    pub fn probation_end(&self) -> Date {
        self.hire_date
            .checked_add(Duration::days(PROBATION_DAYS))
            .unwrap_or(Date::MAX)
    }

    pub fn on_probation(&self, today: Date) -> bool {
        today < self.probation_end()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiptCategory {
    #[default]
    Fuel,
    Equipment,
    Maintenance,
    Office,
    Travel,
    Other,
}

/// An expense receipt. The image arrives from the capture flow as a data URL
/// and is stored verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: String,
    pub title: String,
    pub amount: f64,
    pub category: ReceiptCategory,
    pub date: Date,
    pub image_url: String,
    pub uploaded_by: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: String,
    pub employee_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub clock_in: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub clock_out: Option<OffsetDateTime>,
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub mileage: Option<f64>,
}

impl TimeEntry {
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrewStatus {
    #[default]
    Available,
    OnJob,
    Off,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Crew {
    pub id: String,
    pub name: String,
    pub employee_ids: Vec<String>,
    pub status: CrewStatus,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceType {
    #[default]
    Local,
    LongDistance,
    LaborOnly,
    Packing,
    Junk,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    #[default]
    New,
    Contacted,
    Quoted,
    DepositPaid,
    Booked,
    InProgress,
    Completed,
    Lost,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadSource {
    Gbp,
    Ads,
    Referral,
    #[default]
    Web,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhotoKind {
    Before,
    After,
    Damage,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobPhoto {
    pub url: String,
    pub kind: PhotoKind,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Which of the three quote tiers the customer picked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TierChoice {
    Minimal,
    Recommended,
    WinTheJob,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalkDistance {
    Short,
    #[default]
    Medium,
    Long,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackingType {
    #[default]
    None,
    Partial,
    Full,
}

/// Everything the quote builder collects about a move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveLogistics {
    pub pickup_address: String,
    pub dropoff_address: String,
    pub date: Date,
    pub time_window: String,
    pub stairs_pickup: u8,
    pub stairs_dropoff: u8,
    pub elevator: bool,
    pub walk_distance: WalkDistance,
    pub crew_size: u8,
    pub truck_size: String,
    pub packing_type: PackingType,
    pub heavy_items_count: u32,
    pub mileage: f64,
    pub is_same_day: bool,
    pub is_weekend: bool,
    pub is_month_end: bool,
    pub use_credit_card: bool,
    pub estimated_hours: f64,
    pub duration_days: u16,
    #[serde(default)]
    pub timeline_notes: String,
}

impl MoveLogistics {
    /// Fresh builder state for the given move date, mirroring the quote
    /// form's starting values.
    pub fn draft(date: Date) -> Self {
        Self {
            pickup_address: "TBD".to_string(),
            dropoff_address: "TBD".to_string(),
            date,
            time_window: "08:00 - 10:00".to_string(),
            stairs_pickup: 0,
            stairs_dropoff: 0,
            elevator: false,
            walk_distance: WalkDistance::Medium,
            crew_size: 3,
            truck_size: "26ft Box".to_string(),
            packing_type: PackingType::None,
            heavy_items_count: 0,
            mileage: 10.0,
            is_same_day: false,
            is_weekend: false,
            is_month_end: false,
            use_credit_card: false,
            estimated_hours: 4.0,
            duration_days: 1,
            timeline_notes: String::new(),
        }
    }
}

/// One priced option offered to the customer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
    pub label: String,
    pub price: f64,
    /// Estimated profit percent. Reporting only.
    pub margin: f64,
    pub description: String,
    pub deposit_due: f64,
    pub processing_fee: f64,
    pub total_with_fees: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingTiers {
    pub minimal: PricingTier,
    pub recommended: PricingTier,
    pub win_the_job: PricingTier,
}

impl PricingTiers {
    pub fn get(&self, choice: TierChoice) -> &PricingTier {
        match choice {
            TierChoice::Minimal => &self.minimal,
            TierChoice::Recommended => &self.recommended,
            TierChoice::WinTheJob => &self.win_the_job,
        }
    }
}

/// Cost components the tiers were derived from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub labor_revenue: f64,
    pub truck_fee: f64,
    pub mileage_charge: f64,
    pub fuel_fee: f64,
    pub complexity_multiplier: f64,
    pub estimated_hours: f64,
    pub base_subtotal: f64,
}

/// A complete three-tier quote. Immutable once produced; a copy is frozen
/// onto the job when the customer accepts a tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SmartPricing {
    pub tiers: PricingTiers,
    pub breakdown: CostBreakdown,
    pub surcharge_reasons: Vec<String>,
    /// Attached by the caller when the customer adds gratuity; never computed
    /// by the quote engine.
    #[serde(default)]
    pub tip: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub status: JobStatus,
    pub service_type: ServiceType,
    pub logistics: MoveLogistics,
    pub pricing: SmartPricing,
    #[serde(default)]
    pub selected_tier: Option<TierChoice>,
    pub readiness_score: u8,
    pub checklist: ReadinessChecklist,
    #[serde(default)]
    pub crew_id: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_time: Option<OffsetDateTime>,
    #[serde(default)]
    pub risk_flags: Vec<String>,
    pub lead_source: LeadSource,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub photos: Vec<JobPhoto>,
    #[serde(default)]
    pub agreement_url: Option<String>,
}

impl Job {
    /// Booked value of this job: the accepted tier's fee-inclusive total plus
    /// any tip. Zero while no tier has been accepted.
    pub fn booked_total(&self) -> f64 {
        match self.selected_tier {
            Some(choice) => {
                self.pricing.tiers.get(choice).total_with_fees + self.pricing.tip.unwrap_or(0.0)
            }
            None => 0.0,
        }
    }
}
