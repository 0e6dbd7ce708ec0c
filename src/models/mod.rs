// Sub-modules organized by entity
pub mod allocation;
pub mod api;
pub mod employee;
pub mod enums;
pub mod leave;
pub mod project;

pub use allocation::*;
pub use api::*;
pub use employee::*;
pub use enums::*;
pub use leave::*;
pub use project::*;

use serde::{Deserialize, Deserializer};

/// 后端可能返回 `null` 的集合字段，统一按默认值处理
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Entities addressable by a backend id.
pub trait Identified {
    fn id(&self) -> i64;
}

impl Identified for Project {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for Employee {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for Allocation {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for Leave {
    fn id(&self) -> i64 {
        self.id
    }
}
