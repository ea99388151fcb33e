//! What-if calculator for a hand-picked split across locations

use std::fmt;

use regex::Regex;
use tracing::debug;

use crate::calculator::calculate_employee_cost;
use crate::catalog::ReferenceCatalog;
use crate::error::{CalcError, Result};
use crate::models::EmploymentType;
use crate::report::format_currency;

/// Percentage of the headcount assigned to one location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationShare {
    pub location_id: String,
    pub percent: u32,
}

/// Parse `"india=60, poland=40"` into location shares
pub fn parse_allocation(input: &str) -> Result<Vec<LocationShare>> {
    // Pattern: india=60 or india:60%
    let share_re = Regex::new(r"^\s*([A-Za-z0-9][A-Za-z0-9_-]*)\s*[=:]\s*(\d{1,3})\s*%?\s*$")
        .map_err(|e| CalcError::InvalidAllocation(e.to_string()))?;

    let mut shares = Vec::new();
    for part in input.split(',').filter(|p| !p.trim().is_empty()) {
        let cap = share_re
            .captures(part)
            .ok_or_else(|| CalcError::InvalidAllocation(format!("cannot parse '{}'", part.trim())))?;

        let percent: u32 = cap[2]
            .parse()
            .map_err(|_| CalcError::InvalidAllocation(format!("bad percentage in '{}'", part.trim())))?;
        if percent > 100 {
            return Err(CalcError::InvalidAllocation(format!(
                "{}% for '{}' exceeds 100%",
                percent, &cap[1]
            )));
        }

        shares.push(LocationShare {
            location_id: cap[1].to_string(),
            percent,
        });
    }

    if shares.is_empty() {
        return Err(CalcError::InvalidAllocation("no location shares given".to_string()));
    }
    Ok(shares)
}

#[derive(Debug, Clone, PartialEq)]
pub struct AllocatedLocation {
    pub location_id: String,
    pub percent: u32,
    pub headcount: u32,
    pub annual_cost: f64,
}

/// Cost of a custom split compared against a baseline
#[derive(Debug, Clone, PartialEq)]
pub struct CustomAllocation {
    pub locations: Vec<AllocatedLocation>,
    pub total_cost: f64,
    pub savings: f64,
    pub roi_pct: f64,
}

/// Price a custom split of `headcount` and compare it to `baseline_cost`.
///
/// Each share is rounded to whole heads independently, so the priced
/// headcount need not add up to the total; shares that round to zero cost
/// nothing.
pub fn price_allocation(
    catalog: &ReferenceCatalog,
    role_id: &str,
    headcount: u32,
    shares: &[LocationShare],
    baseline_cost: f64,
) -> Result<CustomAllocation> {
    catalog.role_by_id(role_id)?;

    let mut locations = Vec::with_capacity(shares.len());
    let mut total_cost = 0.0;

    for share in shares {
        catalog.location_by_id(&share.location_id)?;

        let heads = (f64::from(headcount) * f64::from(share.percent) / 100.0).round() as u32;
        let annual_cost = if heads > 0 {
            calculate_employee_cost(catalog, role_id, &share.location_id, heads, EmploymentType::Employee)?
                .total_annual_cost
        } else {
            0.0
        };
        total_cost += annual_cost;

        locations.push(AllocatedLocation {
            location_id: share.location_id.clone(),
            percent: share.percent,
            headcount: heads,
            annual_cost,
        });
    }

    let savings = baseline_cost - total_cost;
    let roi_pct = if total_cost > 0.0 && baseline_cost != 0.0 {
        savings / baseline_cost * 100.0
    } else {
        0.0
    };

    debug!(role_id, headcount, total_cost, savings, "priced custom allocation");

    Ok(CustomAllocation {
        locations,
        total_cost,
        savings,
        roi_pct,
    })
}

impl fmt::Display for CustomAllocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Custom allocation ===")?;
        for loc in &self.locations {
            writeln!(
                f,
                "  {:<16} {:>3}% {:>5} heads {:>14}",
                loc.location_id,
                loc.percent,
                loc.headcount,
                format_currency(loc.annual_cost)
            )?;
        }
        writeln!(f, "  Total cost: {}", format_currency(self.total_cost))?;
        writeln!(f, "  Savings:    {}", format_currency(self.savings))?;
        writeln!(f, "  ROI:        {:.1}%", self.roi_pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReferenceKind;

    fn share(id: &str, percent: u32) -> LocationShare {
        LocationShare {
            location_id: id.to_string(),
            percent,
        }
    }

    #[test]
    fn parses_shares_with_loose_formatting() {
        let shares = parse_allocation("india=60, poland : 30%,ukraine=10").unwrap();
        assert_eq!(shares, [share("india", 60), share("poland", 30), share("ukraine", 10)]);
    }

    #[test]
    fn rejects_malformed_shares() {
        assert!(matches!(parse_allocation("india"), Err(CalcError::InvalidAllocation(_))));
        assert!(matches!(parse_allocation("india=abc"), Err(CalcError::InvalidAllocation(_))));
        assert!(matches!(parse_allocation("india=150"), Err(CalcError::InvalidAllocation(_))));
        assert!(matches!(parse_allocation(" , "), Err(CalcError::InvalidAllocation(_))));
    }

    #[test]
    fn prices_rounded_headcounts() {
        let catalog = ReferenceCatalog::builtin();
        let baseline = 130150.0 * 10.0;
        let result = price_allocation(
            &catalog,
            "software-engineer",
            10,
            &[share("philippines", 55), share("india", 45)],
            baseline,
        )
        .unwrap();

        // round(5.5) = 6, round(4.5) = 5
        let heads: Vec<_> = result.locations.iter().map(|l| l.headcount).collect();
        assert_eq!(heads, [6, 5]);

        let expected = 6.0 * 23750.0 + 5.0 * 28500.0;
        assert!((result.total_cost - expected).abs() < 1e-6);
        assert!((result.savings - (baseline - expected)).abs() < 1e-6);
        assert!((result.roi_pct - (baseline - expected) / baseline * 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_allocation_has_zero_roi() {
        let catalog = ReferenceCatalog::builtin();
        let result =
            price_allocation(&catalog, "software-engineer", 10, &[share("india", 0)], 1000.0).unwrap();
        assert_eq!(result.total_cost, 0.0);
        assert_eq!(result.savings, 1000.0);
        assert_eq!(result.roi_pct, 0.0);
    }

    #[test]
    fn unknown_location_fails() {
        let catalog = ReferenceCatalog::builtin();
        let err = price_allocation(&catalog, "software-engineer", 10, &[share("atlantis", 100)], 1.0)
            .unwrap_err();
        assert_eq!(err, CalcError::unknown(ReferenceKind::Location, "atlantis"));
    }
}
