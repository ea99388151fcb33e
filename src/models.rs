//! Data models for roles, locations, cost breakdowns and scenarios

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct JobRole {
    pub id: String,
    pub name: String,
    pub cost_multiplier: f64, // Applied to the role's base salary
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub cost_index: f64,         // Relative salary scaling, USA = 1.0
    pub social_charge_rate: f64, // Fraction of adjusted salary
    pub benefits_rate: f64,      // Fraction of adjusted salary
    pub contractor_premium: f64, // Multiplier, contractors only
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmploymentType {
    #[default]
    Employee,
    Contractor,
}

impl EmploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::Employee => "employee",
            EmploymentType::Contractor => "contractor",
        }
    }
}

impl FromStr for EmploymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "employee" | "fte" => Ok(EmploymentType::Employee),
            "contractor" => Ok(EmploymentType::Contractor),
            other => Err(format!(
                "unknown employment type '{}' (expected 'employee' or 'contractor')",
                other
            )),
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optimization preference for the cost-effective scenario.
///
/// Anything that is not a known policy name is kept as `Other` and handled
/// like every non-cost-focused policy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Policy {
    CostFocused,
    #[default]
    Balanced,
    QualityFocused,
    Other(String),
}

impl Policy {
    pub fn as_str(&self) -> &str {
        match self {
            Policy::CostFocused => "cost-focused",
            Policy::Balanced => "balanced",
            Policy::QualityFocused => "quality-focused",
            Policy::Other(name) => name,
        }
    }
}

impl FromStr for Policy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "cost-focused" => Policy::CostFocused,
            "balanced" => Policy::Balanced,
            "quality-focused" => Policy::QualityFocused,
            other => Policy::Other(other.to_string()),
        })
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cost of `headcount` people of one role at one location
#[derive(Debug, Clone, PartialEq)]
pub struct CostBreakdown {
    pub base_salary: f64, // Adjusted for location and role
    pub social_charges: f64,
    pub benefits: f64,
    pub contractor_premium: f64, // Amount added by the premium, 0 for employees
    pub total_cost: f64,         // Per head
    pub headcount: u32,
    pub total_annual_cost: f64,
}

/// One location's share of a distribution
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationEntry {
    pub location_id: String,
    pub fraction: f64,
    pub headcount: u32,
}

/// Qualitative label used for scenario risk and quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Low,
    LowMedium,
    Medium,
    MediumHigh,
    High,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Level::Low => "Low",
            Level::LowMedium => "Low-Medium",
            Level::Medium => "Medium",
            Level::MediumHigh => "Medium-High",
            Level::High => "High",
        };
        f.write_str(label)
    }
}

/// Scenario identifiers, ordered the way scenarios are presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScenarioKind {
    Current,
    CostEffective,
    Balanced,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 3] = [
        ScenarioKind::Current,
        ScenarioKind::CostEffective,
        ScenarioKind::Balanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioKind::Current => "current",
            ScenarioKind::CostEffective => "cost-effective",
            ScenarioKind::Balanced => "balanced",
        }
    }

    pub fn risk(&self) -> Level {
        match self {
            ScenarioKind::Current => Level::Low,
            ScenarioKind::CostEffective => Level::Medium,
            ScenarioKind::Balanced => Level::LowMedium,
        }
    }

    pub fn quality(&self) -> Level {
        match self {
            ScenarioKind::Current => Level::High,
            ScenarioKind::CostEffective => Level::MediumHigh,
            ScenarioKind::Balanced => Level::High,
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub name: String,
    pub description: String,
    pub distribution: Vec<AllocationEntry>,
    pub total_cost: f64,
    pub risk: Level,
    pub quality: Level,
}

impl Scenario {
    pub fn headcount(&self) -> u32 {
        self.distribution.iter().map(|e| e.headcount).sum()
    }

    pub fn average_cost_per_head(&self) -> f64 {
        match self.headcount() {
            0 => 0.0,
            n => self.total_cost / f64::from(n),
        }
    }
}

/// Scenarios of one request, keyed and iterated in presentation order
pub type ScenarioSet = BTreeMap<ScenarioKind, Scenario>;

#[derive(Debug, Clone, PartialEq)]
pub struct StaffingRequest {
    pub role_id: String,
    pub location_id: String,
    pub headcount: u32,
    pub policy: Policy,
    pub employment_type: EmploymentType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub title: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employment_type_accepts_fte_alias() {
        assert_eq!("fte".parse::<EmploymentType>(), Ok(EmploymentType::Employee));
        assert_eq!(
            " Contractor ".parse::<EmploymentType>(),
            Ok(EmploymentType::Contractor)
        );
        assert!("intern".parse::<EmploymentType>().is_err());
    }

    #[test]
    fn unknown_policy_is_kept_verbatim() {
        let policy: Policy = "speed-focused".parse().unwrap();
        assert_eq!(policy, Policy::Other("speed-focused".to_string()));
        assert_eq!(policy.to_string(), "speed-focused");
        assert_eq!("cost-focused".parse::<Policy>().unwrap(), Policy::CostFocused);
    }

    #[test]
    fn scenario_labels_are_fixed_per_kind() {
        assert_eq!(ScenarioKind::Current.risk().to_string(), "Low");
        assert_eq!(ScenarioKind::CostEffective.quality().to_string(), "Medium-High");
        assert_eq!(ScenarioKind::Balanced.risk().to_string(), "Low-Medium");
        assert_eq!(ScenarioKind::Balanced.quality(), Level::High);
    }

    #[test]
    fn average_cost_handles_empty_distribution() {
        let scenario = Scenario {
            kind: ScenarioKind::Current,
            name: "Current Strategy".to_string(),
            description: String::new(),
            distribution: vec![AllocationEntry {
                location_id: "usa".to_string(),
                fraction: 1.0,
                headcount: 0,
            }],
            total_cost: 0.0,
            risk: Level::Low,
            quality: Level::High,
        };
        assert_eq!(scenario.average_cost_per_head(), 0.0);
    }
}
