//! # Collector de Estadísticas
//! src/metrics/collector.rs
//!
//! Recolecta contadores de servicio en tiempo real. El handler registra
//! cada request servido y el snapshot se serializa a JSON para el
//! resumen que se imprime al detener el servidor.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

/// Collector de estadísticas thread-safe
pub struct StatsCollector {
    inner: Mutex<StatsData>,
    start_time: Instant,
}

/// Datos internos de estadísticas
struct StatsData {
    /// Contador total de requests
    total_requests: u64,

    /// Requests por código de estado
    status_codes: HashMap<u16, u64>,

    /// Total de bytes de body servidos
    bytes_sent: u64,
}

/// Snapshot serializable de las estadísticas
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub uptime_secs: u64,
    pub total_requests: u64,
    pub served_ok: u64,
    pub not_found: u64,
    pub bytes_sent: u64,
}

impl StatsCollector {
    /// Crea un nuevo collector
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StatsData {
                total_requests: 0,
                status_codes: HashMap::new(),
                bytes_sent: 0,
            }),
            start_time: Instant::now(),
        }
    }

    /// Registra un request atendido
    pub fn record(&self, status_code: u16, bytes_sent: u64) {
        let mut data = self.inner.lock().unwrap();

        data.total_requests += 1;
        *data.status_codes.entry(status_code).or_insert(0) += 1;
        data.bytes_sent += bytes_sent;
    }

    /// Obtiene un snapshot de las estadísticas actuales
    pub fn snapshot(&self) -> StatsSnapshot {
        let data = self.inner.lock().unwrap();

        StatsSnapshot {
            uptime_secs: self.start_time.elapsed().as_secs(),
            total_requests: data.total_requests,
            served_ok: data.status_codes.get(&200).copied().unwrap_or(0),
            not_found: data.status_codes.get(&404).copied().unwrap_or(0),
            bytes_sent: data.bytes_sent,
        }
    }

    /// Serializa el snapshot actual a JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for StatsCollector {
    fn default() -> Self {
        Self::new()
    }
}
