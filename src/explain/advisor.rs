use std::fmt;

use super::ExplainResult;

/// Rows examined per scan above which a plan gets a scan volume warning.
pub const HIGH_SCAN_VOLUME_THRESHOLD: i64 = 1000;

/// Table access method chosen by the optimizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessType {
    /// `ALL`: full table scan.
    All,
    /// `index`: full scan of an index tree.
    Index,
    /// `range`: index range scan.
    Range,
    /// `ref`: lookup of matching rows through an index.
    Ref,
    /// `const`: at most one matching row, read by primary or unique key.
    Const,
    UniqueSubquery,
    IndexSubquery,
    Unknown(String),
}

impl From<&str> for AccessType {
    fn from(code: &str) -> Self {
        match code {
            "ALL" => Self::All,
            "index" => Self::Index,
            "range" => Self::Range,
            "ref" => Self::Ref,
            "const" => Self::Const,
            "unique_subquery" => Self::UniqueSubquery,
            "index_subquery" => Self::IndexSubquery,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl AccessType {
    /// Code as it appears in the plan.
    pub fn code(&self) -> &str {
        match self {
            Self::All => "ALL",
            Self::Index => "index",
            Self::Range => "range",
            Self::Ref => "ref",
            Self::Const => "const",
            Self::UniqueSubquery => "unique_subquery",
            Self::IndexSubquery => "index_subquery",
            Self::Unknown(code) => code,
        }
    }

    /// Explanation and recommendation for this access type.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::All => "full table scan; add an index unless the scan is required",
            Self::Index => "full index scan; can still be optimized",
            Self::Range => "index range scan; consider a more suitable index",
            Self::Ref => {
                "lookup through a non-unique or unique index; generally needs no optimization"
            }
            Self::Const => "point lookup by primary or unique key; already optimal",
            Self::UniqueSubquery => {
                "unique index lookup inside a subquery; consider rewriting the subquery as a join"
            }
            Self::IndexSubquery => {
                "non-unique index lookup inside a subquery; consider rewriting the subquery as a join"
            }
            Self::Unknown(_) => "unknown access type; analyze the execution plan further",
        }
    }
}

/// A single optimization hint for a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advice {
    Access(AccessType),
    HighScanVolume { rows_examined: i64 },
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advice::Access(access) => match access {
                // Quoted so an empty or odd code stays visible.
                AccessType::Unknown(code) => {
                    write!(f, "access type {:?}: {}", code, access.advice())
                }
                _ => write!(f, "access type {}: {}", access.code(), access.advice()),
            },
            Advice::HighScanVolume { rows_examined } => write!(
                f,
                "{} rows examined per scan; consider optimizing the query or adding an index",
                rows_examined
            ),
        }
    }
}

/// Derive the advice for a parsed plan.
///
/// The access type advice always comes first. The scan volume warning is
/// independent of the access type and follows when it applies.
pub fn advise(plan: &ExplainResult) -> Vec<Advice> {
    let table = plan.table();
    let mut advice = vec![Advice::Access(AccessType::from(table.access_type.as_str()))];

    if table.rows_examined_per_scan > HIGH_SCAN_VOLUME_THRESHOLD {
        advice.push(Advice::HighScanVolume {
            rows_examined: table.rows_examined_per_scan,
        });
    }

    advice
}
