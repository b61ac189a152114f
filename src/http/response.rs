//! # Escritura de Respuestas HTTP
//!
//! Este módulo proporciona una API para escribir respuestas HTTP/1.0
//! directamente sobre el stream de la conexión.
//!
//! A diferencia de construir la respuesta completa en memoria, aquí el
//! body se escribe en bloques: el head (status line + headers) se envía
//! una sola vez, de forma perezosa, justo antes del primer bloque. Eso
//! permite servir archivos grandes sin cargarlos completos y decidir el
//! status hasta el último momento (ej: 404 si la primera lectura falla).
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Content-Type: text/html\r\n
//! Connection: close\r\n
//! \r\n
//! <html>...</html>
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use web_server::http::Response;
//!
//! let mut sink = Vec::new();
//! let mut response = Response::new(&mut sink);
//! response.set_header("Content-Type", "text/plain");
//! response.write_chunk(b"Hello").unwrap();
//! response.finish().unwrap();
//! ```

use super::StatusCode;
use std::collections::HashMap;
use std::io::Write;

/// Una respuesta HTTP/1.0 en curso sobre un stream de escritura
///
/// El handler que la recibe es dueño exclusivo de la conexión de salida:
/// al consumirla (con `finish` o `send_empty`) o soltarla, la conexión
/// se cierra y el body queda delimitado.
#[derive(Debug)]
pub struct Response<W: Write> {
    /// Stream de salida (el lado de escritura de la conexión)
    sink: W,

    /// Código de estado; solo tiene efecto antes de enviar el head
    status: StatusCode,

    /// Headers HTTP; usamos HashMap para evitar duplicados
    headers: HashMap<String, String>,

    /// Si el head (status line + headers) ya fue escrito
    head_sent: bool,
}

impl<W: Write> Response<W> {
    /// Crea una respuesta sobre un stream de salida
    ///
    /// El status inicial es 200 OK; puede cambiarse con `set_status`
    /// mientras el head no haya sido enviado.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            status: StatusCode::Ok,
            headers: HashMap::new(),
            head_sent: false,
        }
    }

    /// Cambia el código de estado
    ///
    /// No tiene efecto si el head ya fue enviado.
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Obtiene el código de estado actual
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Agrega o sobrescribe un header
    ///
    /// No tiene efecto si el head ya fue enviado.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    /// Indica si el head ya fue escrito al stream
    pub fn head_sent(&self) -> bool {
        self.head_sent
    }

    /// Escribe la status line y los headers, una sola vez
    ///
    /// Agrega los headers comunes `Server` y `Connection: close` si no
    /// fueron establecidos. Llamadas posteriores son no-ops.
    pub fn send_head(&mut self) -> std::io::Result<()> {
        if self.head_sent {
            return Ok(());
        }

        // Headers comunes a todas las respuestas
        self.headers
            .entry("Server".to_string())
            .or_insert_with(|| "web_server/0.1".to_string());
        self.headers
            .entry("Connection".to_string())
            .or_insert_with(|| "close".to_string());

        // 1. Status line: HTTP/1.0 200 OK\r\n
        write!(self.sink, "HTTP/1.0 {}\r\n", self.status)?;

        // 2. Headers: Header-Name: Value\r\n
        for (name, value) in &self.headers {
            write!(self.sink, "{}: {}\r\n", name, value)?;
        }

        // 3. Línea vacía que separa headers del body
        self.sink.write_all(b"\r\n")?;

        self.head_sent = true;
        Ok(())
    }

    /// Escribe un bloque del body
    ///
    /// Si el head todavía no fue enviado, lo envía primero.
    pub fn write_chunk(&mut self, chunk: &[u8]) -> std::io::Result<()> {
        self.send_head()?;
        self.sink.write_all(chunk)
    }

    /// Envía una respuesta sin body con el status indicado y consume
    /// la respuesta
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::{Response, StatusCode};
    ///
    /// let mut sink = Vec::new();
    /// Response::new(&mut sink).send_empty(StatusCode::NotFound).unwrap();
    ///
    /// let text = String::from_utf8(sink).unwrap();
    /// assert!(text.starts_with("HTTP/1.0 404 Not Found\r\n"));
    /// assert!(text.ends_with("\r\n\r\n"));
    /// ```
    pub fn send_empty(mut self, status: StatusCode) -> std::io::Result<()> {
        self.set_status(status);
        self.set_header("Content-Length", "0");
        self.send_head()?;
        self.sink.flush()
    }

    /// Termina la respuesta: asegura que el head fue enviado y hace
    /// flush del stream
    ///
    /// Consumir la respuesta cierra la conexión al soltar el stream.
    pub fn finish(mut self) -> std::io::Result<()> {
        self.send_head()?;
        self.sink.flush()
    }
}
