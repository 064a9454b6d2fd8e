//! Rounding ledger: the audit trail for every currency rounding on a
//! proposal.
//!
//! All currency totals go through one rounding function (half-to-even,
//! two fractional digits) and every application of it at a category
//! boundary is logged with its before/after values. The summary proves
//! after the fact that the financial rounding contract held for the
//! whole calculation: only the canonical category-total stages rounded,
//! always with banker's rounding, with bounded drift.
//!
//! A ledger is created per audit run and threaded through the
//! calculation explicitly. Nothing here is process-global, so
//! concurrent audits can never interleave their operation logs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::value_objects::money::round_half_even;

/// Drift beyond this many dollars on any single rounding operation is
/// considered a calculation defect.
pub const DEFAULT_DRIFT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Rounding mode tag recorded on each operation.
///
/// This engine only ever rounds half-to-even; the tag exists so the
/// summary can prove that post hoc rather than assume it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundingMode {
    HalfEven,
    HalfUp,
}

/// Stage label for a rounding checkpoint.
///
/// The five canonical variants are the only places a proposal total is
/// permitted to round. `Other` is representable on purpose: the ledger
/// accepts any label and the audit summary flags non-canonical stages
/// after the fact instead of rejecting them at insertion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum RoundingStage {
    Subtotal,
    Bond,
    BusinessOccupancyTax,
    SalesTax,
    FinalTotal,
    Other(String),
}

impl RoundingStage {
    pub fn label(&self) -> &str {
        match self {
            RoundingStage::Subtotal => "Subtotal",
            RoundingStage::Bond => "Bond",
            RoundingStage::BusinessOccupancyTax => "B&O",
            RoundingStage::SalesTax => "Sales Tax",
            RoundingStage::FinalTotal => "Final Total",
            RoundingStage::Other(label) => label,
        }
    }

    /// True for the five canonical category-total stages.
    pub fn is_category_total(&self) -> bool {
        !matches!(self, RoundingStage::Other(_))
    }
}

impl From<String> for RoundingStage {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Subtotal" => RoundingStage::Subtotal,
            "Bond" => RoundingStage::Bond,
            "B&O" => RoundingStage::BusinessOccupancyTax,
            "Sales Tax" => RoundingStage::SalesTax,
            "Final Total" => RoundingStage::FinalTotal,
            _ => RoundingStage::Other(label),
        }
    }
}

impl From<RoundingStage> for String {
    fn from(stage: RoundingStage) -> Self {
        stage.label().to_string()
    }
}

impl std::fmt::Display for RoundingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One logged rounding. Immutable once appended.
///
/// Invariant: `delta == rounded - input` exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundingOperation {
    pub stage: RoundingStage,
    pub input: Decimal,
    pub rounded: Decimal,
    pub delta: Decimal,
    pub mode: RoundingMode,
    pub timestamp: DateTime<Utc>,
}

/// Drift statistics projected from the full operation log.
///
/// Always recomputed on demand, never mutated directly. On an empty
/// ledger both invariant flags default to true (vacuous truth) and the
/// drift figures are zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundingAuditSummary {
    pub operation_count: usize,
    /// Signed sum of all deltas
    pub total_drift: Decimal,
    /// Largest absolute delta of any single operation
    pub max_abs_drift: Decimal,
    pub mean_abs_drift: Decimal,
    /// Every logged operation used half-to-even
    pub all_half_even: bool,
    /// Every logged operation rounded at a canonical category-total stage
    pub only_category_totals: bool,
}

impl RoundingAuditSummary {
    fn empty() -> Self {
        RoundingAuditSummary {
            operation_count: 0,
            total_drift: Decimal::ZERO,
            max_abs_drift: Decimal::ZERO,
            mean_abs_drift: Decimal::ZERO,
            all_half_even: true,
            only_category_totals: true,
        }
    }
}

/// Append-only log of currency roundings for one audit run.
#[derive(Debug, Clone, Default)]
pub struct RoundingLedger {
    operations: Vec<RoundingOperation>,
}

impl RoundingLedger {
    pub fn new() -> Self {
        RoundingLedger {
            operations: Vec::new(),
        }
    }

    /// Round to cents with half-to-even, without logging.
    ///
    /// Use this only for display formatting; category totals must go
    /// through [`RoundingLedger::round_category_total`] so the audit
    /// trail stays complete.
    pub fn round_to_cents(value: Decimal) -> Decimal {
        round_half_even(value)
    }

    /// Round a category total and append the operation to the ledger.
    pub fn round_category_total(&mut self, value: Decimal, stage: RoundingStage) -> Decimal {
        let rounded = round_half_even(value);
        let delta = rounded - value;
        debug!(
            stage = %stage,
            input = %value,
            rounded = %rounded,
            delta = %delta,
            "Rounded category total"
        );
        self.operations.push(RoundingOperation {
            stage,
            input: value,
            rounded,
            delta,
            mode: RoundingMode::HalfEven,
            timestamp: Utc::now(),
        });
        rounded
    }

    /// Append a pre-built operation.
    ///
    /// The summary's invariant flags exist to catch operations recorded
    /// through this door with a foreign mode or stage.
    pub fn record(&mut self, operation: RoundingOperation) {
        self.operations.push(operation);
    }

    pub fn operations(&self) -> &[RoundingOperation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Project drift statistics from the operation log. O(n).
    pub fn summary(&self) -> RoundingAuditSummary {
        if self.operations.is_empty() {
            return RoundingAuditSummary::empty();
        }

        let mut total_drift = Decimal::ZERO;
        let mut max_abs_drift = Decimal::ZERO;
        let mut abs_sum = Decimal::ZERO;
        let mut all_half_even = true;
        let mut only_category_totals = true;

        for op in &self.operations {
            total_drift += op.delta;
            let abs = op.delta.abs();
            abs_sum += abs;
            if abs > max_abs_drift {
                max_abs_drift = abs;
            }
            if op.mode != RoundingMode::HalfEven {
                all_half_even = false;
            }
            if !op.stage.is_category_total() {
                only_category_totals = false;
            }
        }

        RoundingAuditSummary {
            operation_count: self.operations.len(),
            total_drift,
            max_abs_drift,
            mean_abs_drift: abs_sum / Decimal::from(self.operations.len()),
            all_half_even,
            only_category_totals,
        }
    }

    /// True when no single operation drifted more than `threshold`.
    pub fn is_drift_acceptable(&self, threshold: Decimal) -> bool {
        self.summary().max_abs_drift <= threshold
    }

    /// Empty the ledger between independent audit runs.
    pub fn clear(&mut self) {
        self.operations.clear();
    }
}
