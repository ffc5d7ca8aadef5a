//! Engine error taxonomy

use crate::types::EquipmentSlot;
use thiserror::Error;

/// Caller-correctable precondition violations reported by engine operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("{item} cannot be equipped in the {slot}")]
    InvalidSlot { item: String, slot: EquipmentSlot },
    #[error("{what} is full ({capacity} max)")]
    CapacityExceeded { what: &'static str, capacity: usize },
    #[error("skill {0} is on cooldown")]
    SkillOnCooldown(String),
    #[error("{0} is already at its maximum")]
    AlreadyAtCap(String),
    #[error("invalid target: {0}")]
    InvalidTarget(String),
    #[error("not found: {0}")]
    NotFound(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
