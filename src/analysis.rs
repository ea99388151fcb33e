//! Everything one staffing request produces, computed in one pass

use tracing::info;

use crate::calculator::{LocationComparison, calculate_employee_cost, compare_locations};
use crate::catalog::ReferenceCatalog;
use crate::error::Result;
use crate::insights::{AnalysisSummary, generate_insights, summarize};
use crate::models::{CostBreakdown, Insight, ScenarioSet, StaffingRequest};
use crate::scenarios::generate_scenarios;

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub request: StaffingRequest,
    pub scenarios: ScenarioSet,
    pub insights: Vec<Insight>,
    pub summary: AnalysisSummary,
    /// Per-head cost at the primary location under the requested employment type
    pub breakdown: CostBreakdown,
    pub comparison: LocationComparison,
}

pub fn analyze(catalog: &ReferenceCatalog, request: &StaffingRequest) -> Result<Analysis> {
    let scenarios = generate_scenarios(catalog, request)?;
    let insights = generate_insights(catalog, &scenarios, &request.role_id, &request.policy)?;
    let summary = summarize(&scenarios)?;
    let breakdown = calculate_employee_cost(
        catalog,
        &request.role_id,
        &request.location_id,
        1,
        request.employment_type,
    )?;
    let comparison = compare_locations(catalog, &request.role_id, request.employment_type)?;

    info!(
        role_id = %request.role_id,
        location_id = %request.location_id,
        headcount = request.headcount,
        savings = summary.potential_savings,
        "analysis complete"
    );

    Ok(Analysis {
        request: request.clone(),
        scenarios,
        insights,
        summary,
        breakdown,
        comparison,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmploymentType, Policy};

    #[test]
    fn contractor_request_prices_breakdown_with_premium() {
        let catalog = ReferenceCatalog::builtin();
        let request = StaffingRequest {
            role_id: "data-scientist".to_string(),
            location_id: "portugal".to_string(),
            headcount: 20,
            policy: Policy::QualityFocused,
            employment_type: EmploymentType::Contractor,
        };
        let analysis = analyze(&catalog, &request).unwrap();

        assert_eq!(analysis.scenarios.len(), 3);
        assert_eq!(analysis.insights.len(), 4);
        assert!(analysis.breakdown.contractor_premium > 0.0);
        assert_eq!(analysis.breakdown.headcount, 1);
        assert_eq!(analysis.comparison.employment_type, EmploymentType::Contractor);
        assert_eq!(analysis.comparison.costs.len(), catalog.locations().len());
    }
}
