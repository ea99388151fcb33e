//! Scenario generation: distributing a headcount across locations
//!
//! Every request yields the same three scenarios. `current` keeps everyone at
//! the primary location, `cost-effective` spreads the headcount over the
//! cheapest locations according to the policy, and `balanced` mixes the
//! primary location with the two cheapest ones regardless of policy.

use std::fmt;

use tracing::debug;

use crate::calculator::{LocationCost, calculate_employee_cost, rank_locations_by_cost};
use crate::catalog::ReferenceCatalog;
use crate::error::Result;
use crate::models::{
    AllocationEntry, EmploymentType, Policy, Scenario, ScenarioKind, ScenarioSet, StaffingRequest,
};
use crate::report::{format_currency, format_percentage};

/// Generate the current, cost-effective and balanced scenarios for a request
///
/// Scenario costs are priced on the employee basis. Any unknown role or
/// location fails the whole request; no partial set is returned.
pub fn generate_scenarios(catalog: &ReferenceCatalog, request: &StaffingRequest) -> Result<ScenarioSet> {
    let role_id = request.role_id.as_str();
    let headcount = request.headcount;

    debug!(
        role_id,
        location_id = %request.location_id,
        headcount,
        policy = %request.policy,
        "generating scenarios"
    );

    let current = build_scenario(
        catalog,
        role_id,
        ScenarioKind::Current,
        headcount,
        vec![(request.location_id.clone(), headcount)],
    )?;

    let ranked = rank_locations_by_cost(catalog, role_id)?;

    let cost_effective = build_scenario(
        catalog,
        role_id,
        ScenarioKind::CostEffective,
        headcount,
        cost_effective_split(&ranked, headcount, &request.policy),
    )?;

    let balanced = build_scenario(
        catalog,
        role_id,
        ScenarioKind::Balanced,
        headcount,
        balanced_split(&ranked, &request.location_id, headcount),
    )?;

    let mut scenarios = ScenarioSet::new();
    for scenario in [current, cost_effective, balanced] {
        debug!(
            scenario = %scenario.kind,
            entries = scenario.distribution.len(),
            total_cost = scenario.total_cost,
            "scenario priced"
        );
        scenarios.insert(scenario.kind, scenario);
    }
    Ok(scenarios)
}

fn floor_share(headcount: u32, share: f64) -> u32 {
    (f64::from(headcount) * share).floor() as u32
}

/// Headcount per slot of the cheapest locations.
///
/// `cost-focused` puts 70% / 20% / rest on the three cheapest, dropping the
/// third slot when it is empty. Every other policy halves the headcount
/// between the two cheapest, with the odd head going to the second.
fn cost_effective_split(ranked: &[LocationCost], headcount: u32, policy: &Policy) -> Vec<(String, u32)> {
    let slots = match policy {
        Policy::CostFocused => {
            let primary = floor_share(headcount, 0.7);
            let secondary = floor_share(headcount, 0.2);
            let tertiary = headcount - primary - secondary;
            if tertiary > 0 {
                vec![primary, secondary, tertiary]
            } else {
                vec![primary, secondary]
            }
        }
        _ => {
            let each = headcount / 2;
            let remainder = headcount - each * 2;
            vec![each, each + remainder]
        }
    };

    let slots = slots
        .into_iter()
        .enumerate()
        .map(|(rank, count)| (ranked.get(rank).map(|c| c.location_id.clone()), count));
    fill_slots(slots)
}

/// 40% at the primary location, 40% at the cheapest, the rest at the
/// second cheapest. The cheapest may be the primary location itself; the two
/// entries stay separate.
fn balanced_split(ranked: &[LocationCost], primary_location: &str, headcount: u32) -> Vec<(String, u32)> {
    let primary_count = floor_share(headcount, 0.4);
    let secondary_count = floor_share(headcount, 0.4);
    let tertiary_count = headcount - primary_count - secondary_count;

    let mut slots = vec![
        (Some(primary_location.to_string()), primary_count),
        (ranked.first().map(|c| c.location_id.clone()), secondary_count),
    ];
    if tertiary_count > 0 {
        slots.push((ranked.get(1).map(|c| c.location_id.clone()), tertiary_count));
    }
    fill_slots(slots)
}

/// Turn ranked slots into entries. A slot without a location (catalog too
/// small) hands its headcount to the previous entry so nobody is dropped.
fn fill_slots(slots: impl IntoIterator<Item = (Option<String>, u32)>) -> Vec<(String, u32)> {
    let mut entries: Vec<(String, u32)> = Vec::new();
    for (location, count) in slots {
        match location {
            Some(location_id) => entries.push((location_id, count)),
            None => {
                if let Some(last) = entries.last_mut() {
                    last.1 += count;
                }
            }
        }
    }
    entries
}

fn build_scenario(
    catalog: &ReferenceCatalog,
    role_id: &str,
    kind: ScenarioKind,
    headcount: u32,
    split: Vec<(String, u32)>,
) -> Result<Scenario> {
    let (name, description) = match kind {
        ScenarioKind::Current => ("Current Strategy", "All employees in primary location"),
        ScenarioKind::CostEffective => ("Most Cost-Effective", "Optimized for maximum cost savings"),
        ScenarioKind::Balanced => ("Balanced Approach", "Balance of cost, risk, and quality"),
    };

    let mut distribution = Vec::with_capacity(split.len());
    let mut total_cost = 0.0;
    for (location_id, count) in split {
        let cost = calculate_employee_cost(catalog, role_id, &location_id, count, EmploymentType::Employee)?;
        total_cost += cost.total_annual_cost;

        let fraction = match kind {
            ScenarioKind::Current => 1.0,
            _ if headcount == 0 => 0.0,
            _ => f64::from(count) / f64::from(headcount),
        };
        distribution.push(AllocationEntry {
            location_id,
            fraction,
            headcount: count,
        });
    }

    Ok(Scenario {
        kind,
        name: name.to_string(),
        description: description.to_string(),
        distribution,
        total_cost,
        risk: kind.risk(),
        quality: kind.quality(),
    })
}

/// Renders a scenario with location display names from the catalog
pub struct ScenarioReport<'a> {
    pub scenario: &'a Scenario,
    pub catalog: &'a ReferenceCatalog,
}

impl fmt::Display for ScenarioReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.scenario;
        writeln!(f, "[{}] {} - {}", s.kind, s.name, s.description)?;
        writeln!(f, "  Total annual cost: {}", format_currency(s.total_cost))?;
        writeln!(f, "  Average per head:  {}", format_currency(s.average_cost_per_head()))?;
        writeln!(f, "  Risk: {}  Quality: {}", s.risk, s.quality)?;
        for entry in &s.distribution {
            writeln!(
                f,
                "    {:<16} {:>5} heads {:>7}",
                self.catalog.location_name(&entry.location_id),
                entry.headcount,
                format_percentage(entry.fraction)
            )?;
        }
        Ok(())
    }
}
