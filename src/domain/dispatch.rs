//! Dispatch-board ordering, job search, and dashboard rollups.

use super::entities::{Job, JobStatus};

/// Booked jobs below this readiness score are flagged at risk.
pub const AT_RISK_READINESS: u8 = 50;

/// Sorting options for the dispatch board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DispatchSort {
    #[default]
    IntakeOrder,
    ScoreDesc,
    ScoreAsc,
}

impl DispatchSort {
    pub fn label(&self) -> &'static str {
        match self {
            Self::IntakeOrder => "Intake order",
            Self::ScoreDesc => "Readiness high-low",
            Self::ScoreAsc => "Readiness low-high",
        }
    }
}

/// Whether a job still needs dispatch attention.
pub fn is_dispatchable(status: JobStatus) -> bool {
    matches!(
        status,
        JobStatus::New | JobStatus::Quoted | JobStatus::Booked | JobStatus::InProgress
    )
}

/// Jobs for the dispatch board, in the requested order.
pub fn dispatch_board(jobs: &[Job], sort: DispatchSort) -> Vec<&Job> {
    let mut board: Vec<&Job> = jobs
        .iter()
        .filter(|job| is_dispatchable(job.status))
        .collect();
    match sort {
        DispatchSort::IntakeOrder => {}
        DispatchSort::ScoreDesc => {
            board.sort_by(|a, b| b.readiness_score.cmp(&a.readiness_score))
        }
        DispatchSort::ScoreAsc => {
            board.sort_by(|a, b| a.readiness_score.cmp(&b.readiness_score))
        }
    }
    board
}

/// Case-insensitive customer search across name, phone, and email.
pub fn search_jobs<'a>(jobs: &'a [Job], query: &str) -> Vec<&'a Job> {
    let needle = query.to_lowercase();
    jobs.iter()
        .filter(|job| {
            job.customer_name.to_lowercase().contains(&needle)
                || job.customer_phone.contains(query)
                || job.customer_email.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Headline numbers for the HQ dashboard.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardStats {
    pub new_leads: usize,
    pub active_jobs: usize,
    /// Accepted-tier totals plus tips, across all jobs with a chosen tier.
    pub revenue_protected: f64,
    pub at_risk: usize,
}

pub fn dashboard_stats(jobs: &[Job]) -> DashboardStats {
    let new_leads = jobs.iter().filter(|job| job.status == JobStatus::New).count();
    let active_jobs = jobs
        .iter()
        .filter(|job| matches!(job.status, JobStatus::Booked | JobStatus::InProgress))
        .count();
    let revenue_protected = jobs.iter().map(Job::booked_total).sum();
    let at_risk = jobs
        .iter()
        .filter(|job| job.status == JobStatus::Booked && job.readiness_score < AT_RISK_READINESS)
        .count();

    DashboardStats {
        new_leads,
        active_jobs,
        revenue_protected,
        at_risk,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CompanySettings, LeadSource, MoveLogistics, ServiceType, TierChoice};
    use crate::domain::pricing::price_quote;
    use crate::domain::readiness::ReadinessChecklist;
    use time::macros::date;

    fn sample_job(name: &str, status: JobStatus, readiness_score: u8) -> Job {
        let logistics = MoveLogistics::draft(date!(2024 - 06 - 03));
        let pricing = price_quote(&logistics, &CompanySettings::default()).unwrap();
        Job {
            id: name.to_lowercase(),
            customer_name: name.to_string(),
            customer_phone: "555-222-0011".to_string(),
            customer_email: format!("{}@example.com", name.to_lowercase()),
            status,
            service_type: ServiceType::Local,
            logistics,
            pricing,
            selected_tier: None,
            readiness_score,
            checklist: ReadinessChecklist::default(),
            crew_id: None,
            start_time: None,
            risk_flags: Vec::new(),
            lead_source: LeadSource::Web,
            notes: String::new(),
            photos: Vec::new(),
            agreement_url: None,
        }
    }

    #[test]
    fn board_keeps_only_dispatchable_jobs() {
        let jobs = vec![
            sample_job("Ada", JobStatus::Booked, 80),
            sample_job("Ben", JobStatus::Completed, 100),
            sample_job("Cleo", JobStatus::Lost, 0),
            sample_job("Dan", JobStatus::New, 10),
        ];
        let board = dispatch_board(&jobs, DispatchSort::IntakeOrder);
        let names: Vec<&str> = board.iter().map(|job| job.customer_name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Dan"]);
    }

    #[test]
    fn board_sorts_by_readiness() {
        let jobs = vec![
            sample_job("Ada", JobStatus::Booked, 40),
            sample_job("Ben", JobStatus::Quoted, 90),
            sample_job("Cleo", JobStatus::InProgress, 65),
        ];
        let desc: Vec<u8> = dispatch_board(&jobs, DispatchSort::ScoreDesc)
            .iter()
            .map(|job| job.readiness_score)
            .collect();
        assert_eq!(desc, vec![90, 65, 40]);

        let asc: Vec<u8> = dispatch_board(&jobs, DispatchSort::ScoreAsc)
            .iter()
            .map(|job| job.readiness_score)
            .collect();
        assert_eq!(asc, vec![40, 65, 90]);
    }

    #[test]
    fn search_matches_name_phone_or_email() {
        let jobs = vec![
            sample_job("Ada", JobStatus::New, 0),
            sample_job("Ben", JobStatus::New, 0),
        ];
        assert_eq!(search_jobs(&jobs, "ada").len(), 1);
        assert_eq!(search_jobs(&jobs, "BEN@EXAMPLE").len(), 1);
        assert_eq!(search_jobs(&jobs, "555-222").len(), 2);
        assert!(search_jobs(&jobs, "zelda").is_empty());
    }

    #[test]
    fn stats_roll_up_revenue_and_risk() {
        let mut accepted = sample_job("Ada", JobStatus::Booked, 40);
        accepted.selected_tier = Some(TierChoice::Recommended);
        accepted.pricing.tip = Some(50.0);
        let expected_revenue = accepted.pricing.tiers.recommended.total_with_fees + 50.0;

        let jobs = vec![
            accepted,
            sample_job("Ben", JobStatus::New, 0),
            sample_job("Cleo", JobStatus::Booked, 75),
        ];
        let stats = dashboard_stats(&jobs);
        assert_eq!(stats.new_leads, 1);
        assert_eq!(stats.active_jobs, 2);
        assert_eq!(stats.at_risk, 1);
        assert!((stats.revenue_protected - expected_revenue).abs() < 1e-9);
    }
}
