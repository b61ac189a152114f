//! # Módulo HTTP
//!
//! Este módulo implementa el protocolo HTTP/1.0 desde cero, sin usar
//! librerías de alto nivel. Incluye:
//!
//! - Parsing de requests HTTP
//! - Escritura de responses HTTP con body en streaming
//! - Manejo de status codes
//!
//! ### Formato de Request
//!
//! ```text
//! GET /ruta/archivo.html HTTP/1.0\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Content-Type: text/html\r\n
//! Connection: close\r\n
//! \r\n
//! <html>...</html>
//! ```
//!
//! El body de la response se delimita cerrando la conexión (estilo
//! HTTP/1.0), lo que permite escribirlo en bloques sin conocer el
//! tamaño total por adelantado.

pub mod request;   // Parsing de HTTP requests
pub mod response;  // Escritura de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
// Esto permite usar `http::Request` en vez de `http::request::Request`
pub use request::Request;
pub use response::Response;
pub use status::StatusCode;
