//! Dashboard statistics and analytics commands.

use serde::Serialize;
use tabled::Tabled;

use docvault_core::AppError;

use super::CommandContext;
use crate::output;

/// One counter
#[derive(Debug, Serialize, Tabled)]
struct StatRow {
    metric: &'static str,
    count: usize,
}

/// Print counters over the files the logged-in user can see
pub fn execute(ctx: &CommandContext) -> Result<(), AppError> {
    let stats = ctx.vault.browse().dashboard_stats(&ctx.session)?;

    match ctx.format {
        output::OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&stats)?;
            println!("{json}");
        }
        output::OutputFormat::Table => {
            let rows = [
                StatRow { metric: "total", count: stats.total_files },
                StatRow { metric: "documents", count: stats.documents },
                StatRow { metric: "images", count: stats.images },
                StatRow { metric: "other", count: stats.other },
                StatRow { metric: "low risk", count: stats.low_risk },
                StatRow { metric: "medium risk", count: stats.medium_risk },
                StatRow { metric: "high risk", count: stats.high_risk },
            ];
            output::print_list(&rows, ctx.format);
        }
    }

    Ok(())
}

/// Print the analytics breakdown
pub fn analytics(ctx: &CommandContext) -> Result<(), AppError> {
    let report = ctx.vault.browse().analytics(&ctx.session)?;

    match ctx.format {
        output::OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{json}");
        }
        output::OutputFormat::Table => {
            let rows = [
                StatRow { metric: "total", count: report.total_files },
                StatRow { metric: "pdf", count: report.pdf },
                StatRow { metric: "doc", count: report.doc },
                StatRow { metric: "image", count: report.image },
                StatRow { metric: "other", count: report.other },
                StatRow { metric: "low risk", count: report.low_risk },
                StatRow { metric: "medium risk", count: report.medium_risk },
                StatRow { metric: "high risk", count: report.high_risk },
                StatRow { metric: "admins", count: report.admins },
                StatRow { metric: "users", count: report.users },
            ];
            output::print_list(&rows, ctx.format);
        }
    }

    Ok(())
}
