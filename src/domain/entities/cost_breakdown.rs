use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Named cost categories of a screen estimate.
///
/// `BondCost` only appears on project-level totals (bond is charged on
/// the aggregated sell subtotal, not per screen); the rest decompose a
/// single screen's cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostCategory {
    Hardware,
    Structure,
    Installation,
    Power,
    Shipping,
    FieldLabor,
    ProjectManagement,
    GeneralConditions,
    Travel,
    Submittals,
    Engineering,
    Permits,
    Cms,
    BondCost,
    IntegratorMargin,
}

impl CostCategory {
    /// Label used on internal audit rows and exported line items.
    pub fn label(&self) -> &'static str {
        match self {
            CostCategory::Hardware => "LED Hardware",
            CostCategory::Structure => "Structure & Steel",
            CostCategory::Installation => "Installation",
            CostCategory::Power => "Power Distribution",
            CostCategory::Shipping => "Shipping & Freight",
            CostCategory::FieldLabor => "Field Labor",
            CostCategory::ProjectManagement => "Project Management",
            CostCategory::GeneralConditions => "General Conditions",
            CostCategory::Travel => "Travel",
            CostCategory::Submittals => "Submittals",
            CostCategory::Engineering => "Engineering",
            CostCategory::Permits => "Permits",
            CostCategory::Cms => "Control & CMS",
            CostCategory::BondCost => "Bond",
            CostCategory::IntegratorMargin => "Integrator Margin",
        }
    }
}

impl std::fmt::Display for CostCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Full-precision cost decomposition of one screen.
///
/// Derived data: recomputed from the owning `ScreenInput` plus the
/// global rates whenever either changes. Values are intentionally not
/// rounded here; currency rounding happens only at the audit
/// aggregation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub hardware: Decimal,
    pub structure: Decimal,
    pub installation: Decimal,
    pub power: Decimal,
    pub shipping: Decimal,
    pub field_labor: Decimal,
    pub project_management: Decimal,
    pub general_conditions: Decimal,
    pub travel: Decimal,
    pub submittals: Decimal,
    pub engineering: Decimal,
    pub permits: Decimal,
    pub cms: Decimal,
    /// Margin dollars on this screen, filled in after price projection
    pub integrator_margin: Decimal,
}

impl CostBreakdown {
    /// All-zero breakdown: the shape incomplete screens degrade to.
    pub fn zero() -> Self {
        CostBreakdown {
            hardware: Decimal::ZERO,
            structure: Decimal::ZERO,
            installation: Decimal::ZERO,
            power: Decimal::ZERO,
            shipping: Decimal::ZERO,
            field_labor: Decimal::ZERO,
            project_management: Decimal::ZERO,
            general_conditions: Decimal::ZERO,
            travel: Decimal::ZERO,
            submittals: Decimal::ZERO,
            engineering: Decimal::ZERO,
            permits: Decimal::ZERO,
            cms: Decimal::ZERO,
            integrator_margin: Decimal::ZERO,
        }
    }

    /// Direct cost of the screen (everything except margin).
    pub fn direct_total(&self) -> Decimal {
        self.direct_categories()
            .iter()
            .map(|(_, value)| *value)
            .sum()
    }

    /// The thirteen direct cost categories with their values.
    pub fn direct_categories(&self) -> [(CostCategory, Decimal); 13] {
        [
            (CostCategory::Hardware, self.hardware),
            (CostCategory::Structure, self.structure),
            (CostCategory::Installation, self.installation),
            (CostCategory::Power, self.power),
            (CostCategory::Shipping, self.shipping),
            (CostCategory::FieldLabor, self.field_labor),
            (CostCategory::ProjectManagement, self.project_management),
            (CostCategory::GeneralConditions, self.general_conditions),
            (CostCategory::Travel, self.travel),
            (CostCategory::Submittals, self.submittals),
            (CostCategory::Engineering, self.engineering),
            (CostCategory::Permits, self.permits),
            (CostCategory::Cms, self.cms),
        ]
    }

    pub fn is_zero(&self) -> bool {
        self.direct_total().is_zero() && self.integrator_margin.is_zero()
    }

    /// Category-by-category sum of two breakdowns.
    ///
    /// Project totals are built by summing per-screen breakdowns this
    /// way, never by dividing an already-summed figure.
    pub fn sum_with(&self, other: &CostBreakdown) -> CostBreakdown {
        CostBreakdown {
            hardware: self.hardware + other.hardware,
            structure: self.structure + other.structure,
            installation: self.installation + other.installation,
            power: self.power + other.power,
            shipping: self.shipping + other.shipping,
            field_labor: self.field_labor + other.field_labor,
            project_management: self.project_management + other.project_management,
            general_conditions: self.general_conditions + other.general_conditions,
            travel: self.travel + other.travel,
            submittals: self.submittals + other.submittals,
            engineering: self.engineering + other.engineering,
            permits: self.permits + other.permits,
            cms: self.cms + other.cms,
            integrator_margin: self.integrator_margin + other.integrator_margin,
        }
    }
}
