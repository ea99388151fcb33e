//! Per-head cost calculation and location ranking

use std::fmt;

use tracing::trace;

use crate::catalog::ReferenceCatalog;
use crate::error::Result;
use crate::models::{CostBreakdown, EmploymentType};
use crate::report::format_currency;

/// Calculate the fully loaded annual cost of `headcount` people of a role at a location
///
/// Salary is scaled by the location's cost index and the role's multiplier;
/// social charges and benefits are fractions of that adjusted salary. For
/// contractors the whole per-head cost is multiplied by the location's
/// contractor premium and the added amount is reported separately.
pub fn calculate_employee_cost(
    catalog: &ReferenceCatalog,
    role_id: &str,
    location_id: &str,
    headcount: u32,
    employment_type: EmploymentType,
) -> Result<CostBreakdown> {
    let role = catalog.role_by_id(role_id)?;
    let location = catalog.location_by_id(location_id)?;
    let base_salary = catalog.base_salary(role_id)?;

    let adjusted_salary = base_salary * location.cost_index * role.cost_multiplier;
    let social_charges = adjusted_salary * location.social_charge_rate;
    let benefits = adjusted_salary * location.benefits_rate;
    let loaded_cost = adjusted_salary + social_charges + benefits;

    let (total_cost, contractor_premium) = match employment_type {
        EmploymentType::Employee => (loaded_cost, 0.0),
        EmploymentType::Contractor => {
            let with_premium = loaded_cost * location.contractor_premium;
            (with_premium, with_premium - loaded_cost)
        }
    };

    trace!(role_id, location_id, headcount, %employment_type, total_cost, "priced role at location");

    Ok(CostBreakdown {
        base_salary: adjusted_salary,
        social_charges,
        benefits,
        contractor_premium,
        total_cost,
        headcount,
        total_annual_cost: total_cost * f64::from(headcount),
    })
}

/// Per-head cost of one role at one location
#[derive(Debug, Clone, PartialEq)]
pub struct LocationCost {
    pub location_id: String,
    pub location_name: String,
    pub cost_per_head: f64,
}

/// Price one head of the role at every location, in catalog order
pub fn compare_locations(
    catalog: &ReferenceCatalog,
    role_id: &str,
    employment_type: EmploymentType,
) -> Result<LocationComparison> {
    let mut costs = Vec::with_capacity(catalog.locations().len());
    for location in catalog.locations() {
        let cost = calculate_employee_cost(catalog, role_id, &location.id, 1, employment_type)?;
        costs.push(LocationCost {
            location_id: location.id.clone(),
            location_name: location.name.clone(),
            cost_per_head: cost.total_cost,
        });
    }

    Ok(LocationComparison {
        role_name: catalog.role_name(role_id).to_string(),
        employment_type,
        costs,
    })
}

/// Locations sorted by employee unit cost, cheapest first.
///
/// The sort is stable under a total order, so equally priced locations keep
/// their catalog order and repeated calls rank identically.
pub fn rank_locations_by_cost(catalog: &ReferenceCatalog, role_id: &str) -> Result<Vec<LocationCost>> {
    let mut ranked = compare_locations(catalog, role_id, EmploymentType::Employee)?.costs;
    ranked.sort_by(|a, b| a.cost_per_head.total_cmp(&b.cost_per_head));
    Ok(ranked)
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationComparison {
    pub role_name: String,
    pub employment_type: EmploymentType,
    pub costs: Vec<LocationCost>,
}

impl fmt::Display for CostBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<22} {:>14}", "Base salary:", format_currency(self.base_salary))?;
        writeln!(f, "{:<22} {:>14}", "Social charges:", format_currency(self.social_charges))?;
        writeln!(f, "{:<22} {:>14}", "Benefits:", format_currency(self.benefits))?;
        if self.contractor_premium != 0.0 {
            writeln!(
                f,
                "{:<22} {:>14}",
                "Contractor premium:",
                format_currency(self.contractor_premium)
            )?;
        }
        writeln!(f, "{:<22} {:>14}", "Cost per head:", format_currency(self.total_cost))?;
        write!(
            f,
            "{:<22} {:>14}",
            format!("Annual cost (x{}):", self.headcount),
            format_currency(self.total_annual_cost)
        )
    }
}

impl fmt::Display for LocationComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== {} cost per head by location ({}) ===",
            self.role_name, self.employment_type
        )?;
        for cost in &self.costs {
            writeln!(f, "  {:<16} {:>14}", cost.location_name, format_currency(cost.cost_per_head))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CalcError, ReferenceKind};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn employee_cost_in_usa() {
        let catalog = ReferenceCatalog::builtin();
        let cost =
            calculate_employee_cost(&catalog, "software-engineer", "usa", 10, EmploymentType::Employee)
                .unwrap();

        assert!(approx(cost.base_salary, 95000.0));
        assert!(approx(cost.social_charges, 11400.0));
        assert!(approx(cost.benefits, 23750.0));
        assert_eq!(cost.contractor_premium, 0.0);
        assert!(approx(cost.total_cost, 130150.0));
        assert!(approx(cost.total_annual_cost, 1301500.0));
    }

    #[test]
    fn contractor_premium_is_the_added_delta() {
        let catalog = ReferenceCatalog::builtin();
        let cost = calculate_employee_cost(
            &catalog,
            "software-engineer",
            "philippines",
            1,
            EmploymentType::Contractor,
        )
        .unwrap();

        assert!(approx(cost.total_cost, 28500.0));
        assert!(approx(cost.contractor_premium, 4750.0));
    }

    #[test]
    fn breakdown_components_add_up_for_every_combination() {
        let catalog = ReferenceCatalog::builtin();
        for role in catalog.roles() {
            for location in catalog.locations() {
                for employment in [EmploymentType::Employee, EmploymentType::Contractor] {
                    let cost =
                        calculate_employee_cost(&catalog, &role.id, &location.id, 7, employment).unwrap();
                    let parts =
                        cost.base_salary + cost.social_charges + cost.benefits + cost.contractor_premium;
                    assert!(approx(cost.total_cost, parts), "{} @ {}", role.id, location.id);
                    assert!(approx(cost.total_annual_cost, cost.total_cost * 7.0));
                }
            }
        }
    }

    #[test]
    fn zero_headcount_costs_nothing() {
        let catalog = ReferenceCatalog::builtin();
        let cost =
            calculate_employee_cost(&catalog, "hr-manager", "germany", 0, EmploymentType::Employee).unwrap();
        assert!(cost.total_cost > 0.0);
        assert_eq!(cost.total_annual_cost, 0.0);
    }

    #[test]
    fn unknown_references_fail() {
        let catalog = ReferenceCatalog::builtin();
        let err = calculate_employee_cost(&catalog, "pilot", "usa", 1, EmploymentType::Employee).unwrap_err();
        assert_eq!(err, CalcError::unknown(ReferenceKind::Role, "pilot"));

        let err = calculate_employee_cost(&catalog, "software-engineer", "atlantis", 1, EmploymentType::Employee)
            .unwrap_err();
        assert_eq!(err, CalcError::unknown(ReferenceKind::Location, "atlantis"));
    }

    #[test]
    fn ranking_orders_cheapest_first() {
        let catalog = ReferenceCatalog::builtin();
        let ranked = rank_locations_by_cost(&catalog, "software-engineer").unwrap();
        let ids: Vec<_> = ranked.iter().map(|c| c.location_id.as_str()).collect();
        assert_eq!(
            ids,
            ["philippines", "india", "ukraine", "mexico", "poland", "portugal", "usa", "germany"]
        );
    }

    #[test]
    fn comparison_keeps_catalog_order() {
        let catalog = ReferenceCatalog::builtin();
        let comparison = compare_locations(&catalog, "software-engineer", EmploymentType::Employee).unwrap();
        assert_eq!(comparison.costs.len(), 8);
        assert_eq!(comparison.costs[0].location_id, "usa");
        assert!(approx(comparison.costs[1].cost_per_head, 134852.5));
        assert!(comparison.to_string().contains("Philippines"));
    }
}
