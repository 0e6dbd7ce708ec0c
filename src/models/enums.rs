use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectType {
    #[serde(rename = "PoC")]
    Poc,
    Full,
    Side,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Poc => "PoC",
            ProjectType::Full => "Full",
            ProjectType::Side => "Side",
        }
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PoC" | "poc" => Ok(ProjectType::Poc),
            "Full" | "full" => Ok(ProjectType::Full),
            "Side" | "side" => Ok(ProjectType::Side),
            other => Err(format!("Unrecognized project type: {}", other)),
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Employment type. Anything the backend sends that is not `full_time` or
/// `part_time` lands in `Other` and is treated with part-time capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkType {
    FullTime,
    PartTime,
    #[serde(other)]
    Other,
}

impl WorkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkType::FullTime => "full_time",
            WorkType::PartTime => "part_time",
            WorkType::Other => "other",
        }
    }
}

impl FromStr for WorkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full_time" => Ok(WorkType::FullTime),
            "part_time" => Ok(WorkType::PartTime),
            other => Err(format!("Unrecognized work type: {}", other)),
        }
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveType {
    Casual,
    Sick,
    Vacation,
    Personal,
    Emergency,
}

impl LeaveType {
    pub const ALL: [LeaveType; 5] = [
        LeaveType::Casual,
        LeaveType::Sick,
        LeaveType::Vacation,
        LeaveType::Personal,
        LeaveType::Emergency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Casual => "casual",
            LeaveType::Sick => "sick",
            LeaveType::Vacation => "vacation",
            LeaveType::Personal => "personal",
            LeaveType::Emergency => "emergency",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeaveType::Casual => "Casual Leave",
            LeaveType::Sick => "Sick Leave",
            LeaveType::Vacation => "Vacation",
            LeaveType::Personal => "Personal Leave",
            LeaveType::Emergency => "Emergency Leave",
        }
    }
}

impl FromStr for LeaveType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeaveType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unrecognized leave type: {}", s))
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    Overload,
    UnderAllocation,
    SkillMismatch,
    OnLeave,
    ProductivityMismatch,
    MultipleLeaves,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        })
    }
}

/// Well-known skill tags. Tags stay free-form strings on the wire.
pub mod skills {
    pub const ROBOTICS: &str = "robotics";
    pub const TRAJECTORY: &str = "trajectory";
    pub const MEDICAL_IMAGING: &str = "medical_imaging";
    pub const CODING: &str = "coding";
    pub const DATA_ANNOTATION: &str = "data_annotation";
    pub const QUALITY_ASSURANCE: &str = "quality_assurance";

    pub const ALL: [&str; 6] = [
        ROBOTICS,
        TRAJECTORY,
        MEDICAL_IMAGING,
        CODING,
        DATA_ANNOTATION,
        QUALITY_ASSURANCE,
    ];
}
