//! # Estadísticas del Servidor
//! src/metrics/mod.rs
//!
//! Este módulo implementa la recolección de estadísticas de servicio:
//! - Contadores de requests por código de estado
//! - Bytes servidos
//! - Uptime

pub mod collector;

pub use collector::{StatsCollector, StatsSnapshot};
