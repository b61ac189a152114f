//! # Web Server
//! src/lib.rs
//!
//! Servidor web minimalista implementado desde cero: sirve los archivos
//! de un directorio raíz a través de un prefijo de dirección http.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing de requests y escritura de responses HTTP/1.0
//! - `server`: Listener TCP (ciclo de vida y accept loop) y servidor de archivos
//! - `mime`: Tabla de extensión → content-type
//! - `config`: Configuración por CLI y variables de entorno
//! - `metrics`: Estadísticas de requests servidos
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use web_server::server::WebServer;
//!
//! let mut server = WebServer::new("http://localhost:10000/", "files/");
//! server.start().expect("Error al iniciar servidor");
//! // ... el accept loop corre en background ...
//! server.stop();
//! ```

pub mod http;
pub mod config;
pub mod server;
pub mod mime;
pub mod metrics;
