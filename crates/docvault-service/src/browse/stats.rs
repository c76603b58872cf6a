//! Dashboard counters over the files an actor can see, and the admin
//! analytics breakdown.

use serde::Serialize;

use docvault_auth::{Capability, Session};
use docvault_core::AppError;
use docvault_entity::{FileCategory, RiskLevel, UserRole};

use super::{BrowseService, acting_user};

/// Counts shown on the dashboard home.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// All visible files.
    pub total_files: usize,
    /// PDF and document files.
    pub documents: usize,
    /// Image files.
    pub images: usize,
    /// Everything else.
    pub other: usize,
    /// Low-risk files.
    pub low_risk: usize,
    /// Medium-risk files.
    pub medium_risk: usize,
    /// High-risk files.
    pub high_risk: usize,
}

/// The analytics view: every file split by type and risk, plus account
/// counts by role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalyticsReport {
    /// All files in the store.
    pub total_files: usize,
    pub pdf: usize,
    pub doc: usize,
    pub image: usize,
    /// Files of any other type.
    pub other: usize,
    pub low_risk: usize,
    pub medium_risk: usize,
    pub high_risk: usize,
    /// Accounts with the admin role.
    pub admins: usize,
    /// Accounts with the user role.
    pub users: usize,
}

impl BrowseService {
    /// Counts the actor's visible files by category and risk level.
    pub fn dashboard_stats(&self, session: &Session) -> Result<DashboardStats, AppError> {
        let actor = session.require(Capability::ViewFiles)?;
        let state = self.state.store.snapshot()?;
        let user = acting_user(&state, actor)?;

        let mut stats = DashboardStats::default();
        for file in self.state.resolver.visible_files(&state, user) {
            stats.total_files += 1;
            match file.category() {
                FileCategory::Documents => stats.documents += 1,
                FileCategory::Images => stats.images += 1,
                FileCategory::Other => stats.other += 1,
            }
            match file.risk_level {
                RiskLevel::Low => stats.low_risk += 1,
                RiskLevel::Medium => stats.medium_risk += 1,
                RiskLevel::High => stats.high_risk += 1,
            }
        }
        Ok(stats)
    }

    /// Store-wide breakdown for the analytics view. Admin only.
    pub fn analytics(&self, session: &Session) -> Result<AnalyticsReport, AppError> {
        session.require(Capability::ViewAnalytics)?;
        let state = self.state.store.snapshot()?;

        let mut report = AnalyticsReport::default();
        for file in state.files() {
            report.total_files += 1;
            match file.file_type.to_ascii_lowercase().as_str() {
                "pdf" => report.pdf += 1,
                "doc" => report.doc += 1,
                "image" => report.image += 1,
                _ => report.other += 1,
            }
            match file.risk_level {
                RiskLevel::Low => report.low_risk += 1,
                RiskLevel::Medium => report.medium_risk += 1,
                RiskLevel::High => report.high_risk += 1,
            }
        }
        for user in state.users() {
            match user.role {
                UserRole::Admin => report.admins += 1,
                UserRole::User => report.users += 1,
            }
        }
        Ok(report)
    }
}
