//! Narrative insights and headline metrics over a generated scenario set

use std::fmt;

use tracing::warn;

use crate::catalog::ReferenceCatalog;
use crate::error::{CalcError, Result};
use crate::models::{Insight, Policy, Scenario, ScenarioKind, ScenarioSet};
use crate::report::{format_currency, format_percentage};

/// Quoted payback period; not derived from the numbers
pub const PAYBACK_PERIOD: &str = "4-6 months";

fn require(scenarios: &ScenarioSet, kind: ScenarioKind) -> Result<&Scenario> {
    scenarios
        .get(&kind)
        .ok_or(CalcError::IncompleteScenarioSet { missing: kind })
}

/// Savings as a percentage of the baseline; 0 when the baseline costs nothing
fn savings_percentage(savings: f64, baseline: f64) -> f64 {
    if baseline == 0.0 {
        warn!("baseline scenario costs nothing; reporting 0% savings");
        0.0
    } else {
        savings / baseline * 100.0
    }
}

/// Produce the four insights: savings, geography, diversification, roadmap
pub fn generate_insights(
    catalog: &ReferenceCatalog,
    scenarios: &ScenarioSet,
    role_id: &str,
    _policy: &Policy,
) -> Result<Vec<Insight>> {
    let current = require(scenarios, ScenarioKind::Current)?;
    let cost_effective = require(scenarios, ScenarioKind::CostEffective)?;

    let savings = current.total_cost - cost_effective.total_cost;
    let savings_pct = savings_percentage(savings, current.total_cost);

    let mut insights = Vec::with_capacity(4);

    insights.push(Insight {
        title: "Significant Cost Reduction Opportunity".to_string(),
        text: format!(
            "By implementing our most cost-effective strategy, you could save {} annually \
             ({:.1}% reduction). This optimization leverages geographic arbitrage while \
             maintaining talent quality through strategic location selection.",
            format_currency(savings),
            savings_pct
        ),
    });

    let distribution = &cost_effective.distribution;
    let (lead_name, lead_fraction, lead_headcount) = match distribution.first() {
        Some(entry) => (
            catalog.location_name(&entry.location_id),
            entry.fraction,
            entry.headcount,
        ),
        None => ("no location", 0.0, 0),
    };

    insights.push(Insight {
        title: "Strategic Geographic Distribution".to_string(),
        text: format!(
            "{} emerges as your primary cost-optimization location, offering {} of your \
             workforce at significantly reduced costs. This location provides an optimal \
             balance of talent availability, cost efficiency, and operational feasibility.",
            lead_name,
            format_percentage(lead_fraction)
        ),
    });

    insights.push(Insight {
        title: "Risk Mitigation Through Diversification".to_string(),
        text: format!(
            "The recommended approach distributes talent across {} strategic locations, \
             reducing dependency risk while maintaining operational efficiency. This \
             diversification strategy provides resilience against local market fluctuations \
             and regulatory changes.",
            distribution.len()
        ),
    });

    let pilot = (f64::from(lead_headcount) * 0.3).floor() as u32;
    insights.push(Insight {
        title: "Implementation Roadmap".to_string(),
        text: format!(
            "For {} positions, we recommend a phased 6-month implementation timeline. Start \
             with {} initial hires to validate the strategy, then scale gradually. Expected \
             payback period: {} based on current market conditions.",
            catalog.role_name(role_id),
            pilot,
            PAYBACK_PERIOD
        ),
    });

    Ok(insights)
}

/// Headline numbers comparing the cost-effective scenario to the baseline
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    pub potential_savings: f64,
    pub optimal_locations: usize,
    pub cost_reduction_pct: f64,
    pub payback_period: &'static str,
}

pub fn summarize(scenarios: &ScenarioSet) -> Result<AnalysisSummary> {
    let current = require(scenarios, ScenarioKind::Current)?;
    let cost_effective = require(scenarios, ScenarioKind::CostEffective)?;

    let savings = current.total_cost - cost_effective.total_cost;
    Ok(AnalysisSummary {
        potential_savings: savings,
        optimal_locations: cost_effective.distribution.len(),
        cost_reduction_pct: savings_percentage(savings, current.total_cost),
        payback_period: PAYBACK_PERIOD,
    })
}

impl fmt::Display for AnalysisSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Summary ===")?;
        writeln!(f, "  Potential savings: {}", format_currency(self.potential_savings))?;
        writeln!(f, "  Optimal locations: {}", self.optimal_locations)?;
        writeln!(f, "  Cost reduction:    {:.1}%", self.cost_reduction_pct)?;
        writeln!(f, "  Payback period:    {}", self.payback_period)
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "* {}\n  {}", self.title, self.text)
    }
}
