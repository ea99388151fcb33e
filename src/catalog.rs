//! Static reference data: job roles, locations and base salaries

use std::collections::{HashMap, HashSet};

use crate::error::{CalcError, ReferenceKind, Result};
use crate::models::{JobRole, Location};

/// Immutable lookup tables shared by every calculation.
///
/// Roles and locations keep the order they were supplied in; scenario
/// generation relies on that order to break ties between equally priced
/// locations.
#[derive(Debug, Clone)]
pub struct ReferenceCatalog {
    roles: Vec<JobRole>,
    locations: Vec<Location>,
    base_salaries: HashMap<String, f64>,
}

impl ReferenceCatalog {
    /// Build a catalog, rejecting tables no calculation could use
    pub fn new(
        roles: Vec<JobRole>,
        locations: Vec<Location>,
        base_salaries: HashMap<String, f64>,
    ) -> Result<Self> {
        if roles.is_empty() {
            return Err(CalcError::InvalidCatalog("no job roles".to_string()));
        }
        if locations.is_empty() {
            return Err(CalcError::InvalidCatalog("no locations".to_string()));
        }

        let mut seen = HashSet::new();
        for role in &roles {
            if !seen.insert(role.id.as_str()) {
                return Err(CalcError::InvalidCatalog(format!("duplicate role '{}'", role.id)));
            }
            if !(role.cost_multiplier > 0.0) {
                return Err(CalcError::InvalidCatalog(format!(
                    "role '{}' has non-positive cost multiplier {}",
                    role.id, role.cost_multiplier
                )));
            }
            match base_salaries.get(&role.id) {
                Some(salary) if *salary > 0.0 => {}
                Some(salary) => {
                    return Err(CalcError::InvalidCatalog(format!(
                        "role '{}' has non-positive base salary {}",
                        role.id, salary
                    )));
                }
                None => {
                    return Err(CalcError::InvalidCatalog(format!(
                        "role '{}' has no base salary",
                        role.id
                    )));
                }
            }
        }

        let mut seen = HashSet::new();
        for loc in &locations {
            if !seen.insert(loc.id.as_str()) {
                return Err(CalcError::InvalidCatalog(format!("duplicate location '{}'", loc.id)));
            }
            if !(loc.cost_index > 0.0) {
                return Err(CalcError::InvalidCatalog(format!(
                    "location '{}' has non-positive cost index {}",
                    loc.id, loc.cost_index
                )));
            }
            if !(loc.social_charge_rate >= 0.0 && loc.benefits_rate >= 0.0) {
                return Err(CalcError::InvalidCatalog(format!(
                    "location '{}' has a negative charge rate",
                    loc.id
                )));
            }
            if !(loc.contractor_premium >= 1.0) {
                return Err(CalcError::InvalidCatalog(format!(
                    "location '{}' has contractor premium {} below 1.0",
                    loc.id, loc.contractor_premium
                )));
            }
        }

        Ok(Self {
            roles,
            locations,
            base_salaries,
        })
    }

    /// The standard table of eight roles and eight locations
    pub fn builtin() -> Self {
        let roles = [
            ("software-engineer", "Software Engineer", 1.0, 95000.0),
            ("data-scientist", "Data Scientist", 1.2, 110000.0),
            ("product-manager", "Product Manager", 1.1, 105000.0),
            ("devops-engineer", "DevOps Engineer", 1.05, 100000.0),
            ("ui-ux-designer", "UI/UX Designer", 0.9, 85000.0),
            ("marketing-manager", "Marketing Manager", 0.95, 90000.0),
            ("sales-manager", "Sales Manager", 1.0, 95000.0),
            ("hr-manager", "HR Manager", 0.85, 80000.0),
        ];

        // (id, name, cost index, social charges, benefits, contractor premium)
        let locations = [
            ("usa", "USA", 1.0, 0.12, 0.25, 2.0),
            ("germany", "Germany", 0.85, 0.45, 0.22, 1.8),
            ("india", "India", 0.25, 0.12, 0.08, 1.2),
            ("portugal", "Portugal", 0.55, 0.23, 0.15, 1.5),
            ("poland", "Poland", 0.45, 0.35, 0.18, 1.4),
            ("ukraine", "Ukraine", 0.30, 0.22, 0.12, 1.3),
            ("philippines", "Philippines", 0.20, 0.15, 0.10, 1.2),
            ("mexico", "Mexico", 0.35, 0.28, 0.16, 1.4),
        ];

        Self {
            base_salaries: roles
                .iter()
                .map(|(id, _, _, salary)| (id.to_string(), *salary))
                .collect(),
            roles: roles
                .iter()
                .map(|(id, name, multiplier, _)| JobRole {
                    id: id.to_string(),
                    name: name.to_string(),
                    cost_multiplier: *multiplier,
                })
                .collect(),
            locations: locations
                .iter()
                .map(|(id, name, index, social, benefits, premium)| Location {
                    id: id.to_string(),
                    name: name.to_string(),
                    cost_index: *index,
                    social_charge_rate: *social,
                    benefits_rate: *benefits,
                    contractor_premium: *premium,
                })
                .collect(),
        }
    }

    pub fn role_by_id(&self, id: &str) -> Result<&JobRole> {
        self.roles
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| CalcError::unknown(ReferenceKind::Role, id))
    }

    pub fn location_by_id(&self, id: &str) -> Result<&Location> {
        self.locations
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| CalcError::unknown(ReferenceKind::Location, id))
    }

    pub fn base_salary(&self, role_id: &str) -> Result<f64> {
        self.base_salaries
            .get(role_id)
            .copied()
            .ok_or_else(|| CalcError::unknown(ReferenceKind::BaseSalary, role_id))
    }

    pub fn roles(&self) -> &[JobRole] {
        &self.roles
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Display name of a location, falling back to the identifier
    pub fn location_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.location_by_id(id).map_or(id, |l| l.name.as_str())
    }

    /// Display name of a role, falling back to the identifier
    pub fn role_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.role_by_id(id).map_or(id, |r| r.name.as_str())
    }
}

impl Default for ReferenceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(id: &str, cost_index: f64) -> Location {
        Location {
            id: id.to_string(),
            name: id.to_uppercase(),
            cost_index,
            social_charge_rate: 0.1,
            benefits_rate: 0.1,
            contractor_premium: 1.5,
        }
    }

    fn role(id: &str) -> JobRole {
        JobRole {
            id: id.to_string(),
            name: id.to_string(),
            cost_multiplier: 1.0,
        }
    }

    #[test]
    fn builtin_catalog_passes_validation() {
        let builtin = ReferenceCatalog::builtin();
        let rebuilt = ReferenceCatalog::new(
            builtin.roles().to_vec(),
            builtin.locations().to_vec(),
            builtin.base_salaries.clone(),
        );
        assert!(rebuilt.is_ok());
        assert_eq!(builtin.roles().len(), 8);
        assert_eq!(builtin.locations().len(), 8);
        assert_eq!(builtin.locations()[0].id, "usa");
    }

    #[test]
    fn lookups_resolve_builtin_entries() {
        let catalog = ReferenceCatalog::builtin();
        assert_eq!(catalog.role_by_id("data-scientist").unwrap().cost_multiplier, 1.2);
        assert_eq!(catalog.location_by_id("poland").unwrap().social_charge_rate, 0.35);
        assert_eq!(catalog.base_salary("hr-manager").unwrap(), 80000.0);
        assert_eq!(catalog.location_name("ukraine"), "Ukraine");
    }

    #[test]
    fn unknown_identifiers_are_reported_with_their_kind() {
        let catalog = ReferenceCatalog::builtin();
        assert_eq!(
            catalog.role_by_id("astronaut").unwrap_err(),
            CalcError::unknown(ReferenceKind::Role, "astronaut")
        );
        assert_eq!(
            catalog.location_by_id("mars").unwrap_err(),
            CalcError::unknown(ReferenceKind::Location, "mars")
        );
        assert!(matches!(
            catalog.base_salary("astronaut"),
            Err(CalcError::UnknownReference {
                kind: ReferenceKind::BaseSalary,
                ..
            })
        ));
        assert_eq!(catalog.location_name("mars"), "mars");
    }

    #[test]
    fn rejects_role_without_salary() {
        let result = ReferenceCatalog::new(vec![role("dev")], vec![location("a", 1.0)], HashMap::new());
        assert!(matches!(result, Err(CalcError::InvalidCatalog(_))));
    }

    #[test]
    fn rejects_duplicates_and_bad_rates() {
        let salaries: HashMap<_, _> = [("dev".to_string(), 50000.0)].into_iter().collect();

        let duplicate = ReferenceCatalog::new(
            vec![role("dev")],
            vec![location("a", 1.0), location("a", 0.5)],
            salaries.clone(),
        );
        assert!(matches!(duplicate, Err(CalcError::InvalidCatalog(_))));

        let mut cheap_premium = location("b", 1.0);
        cheap_premium.contractor_premium = 0.9;
        let premium = ReferenceCatalog::new(vec![role("dev")], vec![cheap_premium], salaries.clone());
        assert!(matches!(premium, Err(CalcError::InvalidCatalog(_))));

        let empty = ReferenceCatalog::new(vec![role("dev")], Vec::new(), salaries);
        assert!(matches!(empty, Err(CalcError::InvalidCatalog(_))));
    }
}
