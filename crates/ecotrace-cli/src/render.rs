//! Plain-text rendering of dashboards, estimates and listings.

use ecotrace_core::estimator::FootprintEstimate;
use ecotrace_core::{Challenge, Dashboard, WasteReport};

/// Multi-line dashboard summary.
pub fn dashboard(dashboard: &Dashboard) -> String {
    let mut lines = vec![
        format!("Dashboard for {}", dashboard.user_name),
        format!(
            "  Carbon footprint: {:.2} kg CO2e/month ({:.1}% below average)",
            dashboard.carbon_footprint, dashboard.improvement_percent
        ),
        format!(
            "  Waste reduced:    {:.1} kg recycled, {:.0} kg composted",
            dashboard.recycled_kg, dashboard.composted_kg
        ),
        format!(
            "  Community rank:   #{} of {}",
            dashboard.community_rank, dashboard.community_size
        ),
        format!("  Points:           {}", dashboard.points),
        "  Challenges:".to_string(),
    ];
    lines.extend(
        dashboard
            .challenges
            .iter()
            .map(|c| format!("    {:<24} {:>3}%", c.name, c.percent)),
    );
    block(lines)
}

/// Estimate with its per-category breakdown.
pub fn estimate(estimate: &FootprintEstimate) -> String {
    let breakdown = &estimate.breakdown;
    let mut lines = vec![format!("Monthly footprint: {:.2} kg CO2e", estimate.total)];
    lines.extend(
        [
            ("Transport", breakdown.transport),
            ("Electricity", breakdown.electricity),
            ("Gas", breakdown.gas),
            ("Meat", breakdown.meat),
            ("Shopping", breakdown.shopping),
        ]
        .into_iter()
        .map(|(label, value)| format!("  {label:<12} {value:>9.2}")),
    );
    lines.push(estimate.comparison.to_string());
    block(lines)
}

fn block(lines: Vec<String>) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// One line per report.
pub fn report(report: &WasteReport) -> String {
    format!(
        "{}  {:<10} {} (by {}, {}, {})",
        report.timestamp.format("%Y-%m-%d %H:%M"),
        report.waste_type.to_string(),
        report.location,
        report.reporter,
        report.status,
        age(report.age().num_minutes())
    )
}

/// One line per challenge.
pub fn challenge(challenge: &Challenge) -> String {
    format!(
        "[{}] {}: {} ({} points, {} participants, {} left)",
        challenge.id,
        challenge.name,
        challenge.description,
        challenge.points,
        challenge.participants,
        challenge.time_left
    )
}

fn age(minutes: i64) -> String {
    match minutes {
        m if m < 1 => "just now".to_string(),
        m if m < 60 => format!("{m}m ago"),
        m if m < 60 * 24 => format!("{}h ago", m / 60),
        m => format!("{}d ago", m / (60 * 24)),
    }
}
