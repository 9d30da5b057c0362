//! Explicit application state for the back office.
//!
//! All entity collections live on one struct that operations borrow; nothing
//! is global. Persistence happens only through [`PersistedState`] snapshots
//! at the load/save boundary.

use serde::{Deserialize, Serialize};
use time::macros::date;
use time::{Date, OffsetDateTime};
use tracing::debug;

use super::entities::{
    CompanySettings, Crew, CrewStatus, Employee, EmployeeStatus, Job, JobPhoto, JobStatus,
    LeadSource, MoveLogistics, PayrollInfo, PayrollKind, PayrollRecord, Receipt, ReceiptCategory,
    ServiceType, SmartPricing, TierChoice, TimeEntry, UserRole, W9Status,
};
use super::readiness::{ChecklistItem, ReadinessChecklist};
use crate::util::generate_id;

/// Customer contact details captured by the quote builder. Any blank field
/// falls back to a placeholder when the lead is saved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CustomerDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub settings: CompanySettings,
    pub employees: Vec<Employee>,
    pub crews: Vec<Crew>,
    pub receipts: Vec<Receipt>,
    pub time_entries: Vec<TimeEntry>,
    pub jobs: Vec<Job>,
}

impl AppState {
    /// Starter roster and crews for a fresh install with no saved snapshot.
    pub fn seeded() -> Self {
        let employees = vec![
            Employee {
                id: "e1".to_string(),
                name: "Mike Johnson".to_string(),
                phone: "555-123-4567".to_string(),
                email: "mike@elitemovers.com".to_string(),
                address: "123 Pine St, Minneapolis, MN".to_string(),
                role: UserRole::CrewLead,
                status: EmployeeStatus::Active,
                hire_date: date!(2024 - 01 - 15),
                payroll: PayrollInfo {
                    routing_number: "123456789".to_string(),
                    account_number: "987654321".to_string(),
                    bank_name: "First National".to_string(),
                    tax_id: "SSN-XX-1234".to_string(),
                    w9_status: W9Status::Verified,
                    payment_history: vec![
                        PayrollRecord {
                            id: "p1".to_string(),
                            date: date!(2024 - 02 - 01),
                            amount: 2450.0,
                            kind: PayrollKind::Salary,
                            note: "Feb Salary".to_string(),
                        },
                        PayrollRecord {
                            id: "p2".to_string(),
                            date: date!(2024 - 03 - 01),
                            amount: 2450.0,
                            kind: PayrollKind::Salary,
                            note: "Mar Salary".to_string(),
                        },
                    ],
                },
            },
            Employee {
                id: "e2".to_string(),
                name: "Steve Miller".to_string(),
                phone: "555-987-6543".to_string(),
                email: "steve@elitemovers.com".to_string(),
                address: "456 Oak Ave, St. Paul, MN".to_string(),
                role: UserRole::Mover,
                status: EmployeeStatus::Active,
                hire_date: date!(2024 - 03 - 10),
                payroll: PayrollInfo {
                    routing_number: "987654321".to_string(),
                    account_number: "123456789".to_string(),
                    bank_name: "Chase".to_string(),
                    tax_id: "SSN-XX-5678".to_string(),
                    w9_status: W9Status::Pending,
                    payment_history: Vec::new(),
                },
            },
        ];
        let crews = vec![
            Crew {
                id: "c1".to_string(),
                name: "Alpha Crew".to_string(),
                employee_ids: vec!["e1".to_string()],
                status: CrewStatus::Available,
            },
            Crew {
                id: "c2".to_string(),
                name: "Bravo Squad".to_string(),
                employee_ids: vec!["e2".to_string()],
                status: CrewStatus::Available,
            },
        ];

        Self {
            employees,
            crews,
            ..Self::default()
        }
    }

    pub fn job(&self, job_id: &str) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == job_id)
    }

    fn job_mut(&mut self, job_id: &str) -> Option<&mut Job> {
        self.jobs.iter_mut().find(|job| job.id == job_id)
    }

    pub fn employee(&self, employee_id: &str) -> Option<&Employee> {
        self.employees.iter().find(|emp| emp.id == employee_id)
    }

    /// Freeze an accepted quote onto a new lead at the front of the job list.
    pub fn save_quote_as_lead(
        &mut self,
        customer: CustomerDraft,
        logistics: MoveLogistics,
        mut pricing: SmartPricing,
        tier: TierChoice,
        tip: f64,
    ) -> String {
        pricing.tip = (tip > 0.0).then_some(tip);

        let fallback = |value: String, placeholder: &str| {
            if value.trim().is_empty() {
                placeholder.to_string()
            } else {
                value
            }
        };

        let job = Job {
            id: generate_id("job"),
            customer_name: fallback(customer.name, "Anonymous"),
            customer_phone: fallback(customer.phone, "N/A"),
            customer_email: fallback(customer.email, "N/A"),
            status: JobStatus::New,
            service_type: ServiceType::Local,
            logistics,
            pricing,
            selected_tier: Some(tier),
            readiness_score: 0,
            checklist: ReadinessChecklist::default(),
            crew_id: None,
            start_time: None,
            risk_flags: Vec::new(),
            lead_source: LeadSource::Web,
            notes: String::new(),
            photos: Vec::new(),
            agreement_url: None,
        };
        let id = job.id.clone();
        debug!(job_id = %id, customer = %job.customer_name, "saved quote as lead");
        self.jobs.insert(0, job);
        id
    }

    pub fn update_job_status(&mut self, job_id: &str, status: JobStatus) -> bool {
        match self.job_mut(job_id) {
            Some(job) => {
                job.status = status;
                true
            }
            None => false,
        }
    }

    pub fn set_job_notes(&mut self, job_id: &str, notes: &str) -> bool {
        match self.job_mut(job_id) {
            Some(job) => {
                job.notes = notes.to_string();
                true
            }
            None => false,
        }
    }

    /// Flip one readiness item and recompute the job's score.
    /// Returns the new score.
    pub fn toggle_checklist(&mut self, job_id: &str, item: ChecklistItem) -> Option<u8> {
        let job = self.job_mut(job_id)?;
        job.checklist.toggle(item);
        job.readiness_score = job.checklist.score();
        Some(job.readiness_score)
    }

    pub fn add_photo(&mut self, job_id: &str, photo: JobPhoto) -> bool {
        match self.job_mut(job_id) {
            Some(job) => {
                job.photos.push(photo);
                true
            }
            None => false,
        }
    }

    /// Put a crew on a job. Fails if either side is unknown.
    pub fn assign_crew(&mut self, job_id: &str, crew_id: &str) -> bool {
        if self.job(job_id).is_none() {
            return false;
        }
        let Some(crew) = self.crews.iter_mut().find(|crew| crew.id == crew_id) else {
            return false;
        };
        crew.status = CrewStatus::OnJob;
        if let Some(job) = self.job_mut(job_id) {
            job.crew_id = Some(crew_id.to_string());
        }
        debug!(job_id, crew_id, "crew assigned");
        true
    }

    pub fn add_crew(&mut self, name: &str) -> String {
        let crew = Crew {
            id: generate_id("crew"),
            name: name.to_string(),
            employee_ids: Vec::new(),
            status: CrewStatus::Available,
        };
        let id = crew.id.clone();
        self.crews.push(crew);
        id
    }

    /// The employee's currently open shift, if any.
    pub fn open_time_entry(&self, employee_id: &str) -> Option<&TimeEntry> {
        self.time_entries
            .iter()
            .find(|entry| entry.employee_id == employee_id && entry.is_open())
    }

    /// Clock the employee out of an open shift, or open a new one.
    /// Returns the id of the entry touched.
    pub fn clock_toggle(
        &mut self,
        employee_id: &str,
        now: OffsetDateTime,
        mileage: Option<f64>,
    ) -> String {
        let open = self
            .time_entries
            .iter_mut()
            .find(|entry| entry.employee_id == employee_id && entry.is_open());

        if let Some(entry) = open {
            entry.clock_out = Some(now);
            entry.mileage = mileage.or(entry.mileage);
            debug!(employee_id, entry_id = %entry.id, "clocked out");
            return entry.id.clone();
        }

        let entry = TimeEntry {
            id: generate_id("time"),
            employee_id: employee_id.to_string(),
            clock_in: now,
            clock_out: None,
            job_id: None,
            mileage: None,
        };
        let id = entry.id.clone();
        debug!(employee_id, entry_id = %id, "clocked in");
        self.time_entries.insert(0, entry);
        id
    }

    /// File a captured receipt image. Title, amount, and category start at
    /// the defaults and are edited afterwards.
    pub fn add_receipt(&mut self, image_url: String, date: Date, uploaded_by: &str) -> String {
        let receipt = Receipt {
            id: generate_id("rcpt"),
            title: "Manual Receipt".to_string(),
            amount: 0.0,
            category: ReceiptCategory::Fuel,
            date,
            image_url,
            uploaded_by: uploaded_by.to_string(),
        };
        let id = receipt.id.clone();
        self.receipts.insert(0, receipt);
        id
    }

    /// Log a payment against an employee's history. Returns the record id.
    pub fn add_payroll_record(
        &mut self,
        employee_id: &str,
        date: Date,
        amount: f64,
        kind: PayrollKind,
        note: &str,
    ) -> Option<String> {
        let employee = self
            .employees
            .iter_mut()
            .find(|emp| emp.id == employee_id)?;
        let record = PayrollRecord {
            id: generate_id("pay"),
            date,
            amount,
            kind,
            note: note.to_string(),
        };
        let id = record.id.clone();
        employee.payroll.payment_history.push(record);
        Some(id)
    }

    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.settings = persisted.settings;
        self.employees = persisted.employees;
        self.crews = persisted.crews;
        self.receipts = persisted.receipts;
        self.time_entries = persisted.time_entries;
        self.jobs = persisted.jobs;
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            settings: self.settings.clone(),
            employees: self.employees.clone(),
            crews: self.crews.clone(),
            receipts: self.receipts.clone(),
            time_entries: self.time_entries.clone(),
            jobs: self.jobs.clone(),
        }
    }
}

/// Snapshot of everything the back office owns, written at shutdown and
/// restored at startup.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub settings: CompanySettings,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub crews: Vec<Crew>,
    #[serde(default)]
    pub receipts: Vec<Receipt>,
    #[serde(default)]
    pub time_entries: Vec<TimeEntry>,
    #[serde(default)]
    pub jobs: Vec<Job>,
}
