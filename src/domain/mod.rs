//! Domain logic for the moving back office lives here.

pub mod app_state;
pub mod dispatch;
pub mod entities;
pub mod pricing;
pub mod readiness;

pub use app_state::{AppState, CustomerDraft, PersistedState};
pub use dispatch::{
    dashboard_stats, dispatch_board, is_dispatchable, search_jobs, DashboardStats, DispatchSort,
    AT_RISK_READINESS,
};
pub use entities::{
    CompanySettings, CostBreakdown, Crew, CrewStatus, Employee, EmployeeStatus, Job, JobPhoto,
    JobStatus, LeadSource, MoveLogistics, PackingType, PayrollInfo, PayrollKind, PayrollRecord,
    PhotoKind, PricingTier, PricingTiers, Receipt, ReceiptCategory, ServiceType, SmartPricing,
    TierChoice, TimeEntry, UserRole, W9Status, WalkDistance,
};
pub use pricing::{price_quote, PricingError};
pub use readiness::{ChecklistItem, ReadinessChecklist};
