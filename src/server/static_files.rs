//! # Servidor de Archivos Estáticos
//! src/server/static_files.rs
//!
//! Traduce cada exchange HTTP en una lectura del filesystem:
//!
//! ```text
//! /ruta/pagina.html  →  <root>/ruta/pagina.html
//! /ruta/             →  <root>/ruta/index.html
//! /                  →  <root>/index.html
//! ```
//!
//! El archivo resuelto se abre por request (sin caché) y se escribe a la
//! response en bloques de 16 KiB. Cualquier fallo de lectura se responde
//! con 404 sin body, sin distinguir la causa.

use crate::http::{Request, Response, StatusCode};
use crate::metrics::{StatsCollector, StatsSnapshot};
use crate::mime::MimeMap;
use crate::server::listener::{Listener, ListenerError, ListenerState, RequestHandler};
use std::fs::File;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::path::PathBuf;
use std::sync::Arc;

/// Tamaño de bloque para el streaming del body
const CHUNK_SIZE: usize = 16 * 1024;

/// Documento servido cuando la ruta designa un directorio
const DEFAULT_DOCUMENT: &str = "index.html";

/// Content-type usado cuando la extensión no está en la tabla
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Servidor web de archivos estáticos
///
/// Arma un `Listener` con el handler de archivos y expone el ciclo de
/// vida completo. Construirlo no toca ni el filesystem ni la red; eso
/// ocurre recién en `start()` y por cada request.
///
/// # Ejemplo
/// ```no_run
/// use web_server::server::WebServer;
///
/// let mut server = WebServer::new("http://localhost:10000/", "files/");
/// server.start().expect("Error al iniciar servidor");
/// ```
pub struct WebServer {
    listener: Listener,
    handler: Arc<StaticFileHandler>,
}

impl WebServer {
    /// Crea un servidor con la tabla de content-types por defecto
    pub fn new(prefix: &str, root_dir: &str) -> Self {
        Self::with_mime_map(prefix, root_dir, MimeMap::with_defaults())
    }

    /// Crea un servidor con una tabla de content-types propia
    pub fn with_mime_map(prefix: &str, root_dir: &str, mime: MimeMap) -> Self {
        let handler = Arc::new(StaticFileHandler::new(root_dir, mime));
        let mut listener = Listener::new(prefix);
        listener.set_handler(Arc::clone(&handler) as Arc<dyn RequestHandler>);

        Self { listener, handler }
    }

    /// Inicia el servidor; propaga los errores del listener
    pub fn start(&mut self) -> Result<(), ListenerError> {
        self.listener.start()
    }

    /// Solicita detener el servidor (cooperativo, no bloquea)
    pub fn stop(&self) {
        self.listener.stop();
    }

    /// Espera a que el accept loop termine
    pub fn join(&mut self) -> Result<(), ListenerError> {
        self.listener.join()
    }

    /// Estado actual del listener
    pub fn state(&self) -> ListenerState {
        self.listener.state()
    }

    /// Activa o desactiva la salida de debug por request
    pub fn set_debug_output(&self, enabled: bool) {
        self.listener.set_debug_output(enabled);
    }

    /// Dirección real del socket (disponible después de `start()`)
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.local_addr()
    }

    /// Snapshot de las estadísticas de requests servidos
    pub fn stats(&self) -> StatsSnapshot {
        self.handler.stats.snapshot()
    }
}

/// Handler que resuelve la ruta del request a un archivo bajo el
/// directorio raíz y lo sirve en streaming
struct StaticFileHandler {
    root_dir: PathBuf,
    mime: MimeMap,
    stats: StatsCollector,
}

impl StaticFileHandler {
    fn new(root_dir: &str, mime: MimeMap) -> Self {
        Self {
            root_dir: PathBuf::from(root_dir),
            mime,
            stats: StatsCollector::new(),
        }
    }

    /// Resuelve la ruta del request a una ruta de archivo bajo root
    ///
    /// Reglas:
    /// 1. Se quita exactamente un separador inicial, si existe
    /// 2. Ruta vacía → documento por defecto
    /// 3. Ruta terminada en '/' → se le agrega el documento por defecto
    /// 4. Cualquier otra ruta se usa tal cual
    ///
    /// No se normalizan secuencias ".."; el directorio raíz se asume
    /// contenido confiable.
    fn resolve(&self, url_path: &str) -> PathBuf {
        let relative = url_path.strip_prefix('/').unwrap_or(url_path);

        let relative = if relative.is_empty() {
            DEFAULT_DOCUMENT.to_string()
        } else if relative.ends_with('/') {
            format!("{}{}", relative, DEFAULT_DOCUMENT)
        } else {
            relative.to_string()
        };

        self.root_dir.join(relative)
    }

    /// Atiende un exchange: resuelve, abre y sirve el archivo
    fn serve<W: Write>(&self, url_path: &str, mut response: Response<W>) {
        println!("[*] solicitud: {}", url_path);
        let file_name = self.resolve(url_path);

        // El content-type se decide por extensión, antes de abrir el
        // archivo; extensión desconocida → tipo binario genérico
        let content_type = match self.mime.for_path(&file_name) {
            Ok(content_type) => content_type,
            Err(_) => FALLBACK_CONTENT_TYPE,
        };
        response.set_header("Content-Type", content_type);

        match File::open(&file_name) {
            Ok(file) => match Self::stream_file(file, &mut response) {
                Ok(bytes_sent) => {
                    if let Err(e) = response.finish() {
                        eprintln!("   ❌ Error cerrando response: {}", e);
                    }
                    self.stats.record(StatusCode::Ok.as_u16(), bytes_sent);
                }
                Err(e) => {
                    eprintln!("   ❌ Error sirviendo {}: {}", file_name.display(), e);
                    if response.head_sent() {
                        // El 200 ya salió; solo queda cortar la conexión
                        self.stats.record(StatusCode::Ok.as_u16(), 0);
                    } else {
                        // La primera lectura falló (ej: es un directorio)
                        let _ = response.send_empty(StatusCode::NotFound);
                        self.stats.record(StatusCode::NotFound.as_u16(), 0);
                    }
                }
            },
            Err(_) => {
                // No existe, sin permisos, etc: siempre 404 sin body
                println!("   ❌ no se pudo abrir: {}", file_name.display());
                let _ = response.send_empty(StatusCode::NotFound);
                self.stats.record(StatusCode::NotFound.as_u16(), 0);
            }
        }
    }

    /// Copia el archivo completo a la response en bloques de 16 KiB
    ///
    /// El head de la response se envía recién con el primer bloque, así
    /// que un fallo en la primera lectura todavía puede responder 404.
    fn stream_file<W: Write>(mut file: File, response: &mut Response<W>) -> std::io::Result<u64> {
        let mut buffer = [0u8; CHUNK_SIZE];
        let mut total: u64 = 0;

        loop {
            let bytes_read = file.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            response.write_chunk(&buffer[..bytes_read])?;
            total += bytes_read as u64;
        }

        Ok(total)
    }
}

impl RequestHandler for StaticFileHandler {
    fn handle_request(&self, request: &Request, response: Response<TcpStream>) {
        self.serve(request.path(), response);
    }

    fn on_stopped(&self) {
        println!("[*] resumen: {}", self.stats.to_json());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn handler_for(root: &str) -> StaticFileHandler {
        StaticFileHandler::new(root, MimeMap::with_defaults())
    }

    /// Helper: sirve una ruta contra un sink en memoria y retorna el
    /// texto completo de la respuesta
    fn serve_to_string(handler: &StaticFileHandler, url_path: &str) -> String {
        let mut sink = Vec::new();
        handler.serve(url_path, Response::new(&mut sink));
        String::from_utf8_lossy(&sink).to_string()
    }

    fn body_of(response: &str) -> &str {
        match response.find("\r\n\r\n") {
            Some(pos) => &response[pos + 4..],
            None => "",
        }
    }

    // ==================== Resolución de rutas ====================

    #[test]
    fn test_resolve_plain_path() {
        let handler = handler_for("files");
        assert_eq!(
            handler.resolve("/docs/manual.pdf"),
            Path::new("files").join("docs/manual.pdf")
        );
    }

    #[test]
    fn test_resolve_root_path_uses_default_document() {
        let handler = handler_for("files");
        assert_eq!(handler.resolve("/"), Path::new("files").join("index.html"));
    }

    #[test]
    fn test_resolve_empty_path_uses_default_document() {
        let handler = handler_for("files");
        assert_eq!(handler.resolve(""), Path::new("files").join("index.html"));
    }

    #[test]
    fn test_resolve_trailing_slash_appends_default_document() {
        let handler = handler_for("files");
        assert_eq!(
            handler.resolve("/docs/"),
            Path::new("files").join("docs/index.html")
        );
    }

    #[test]
    fn test_resolve_without_leading_slash_is_used_as_is() {
        // Una ruta sin separador inicial no se corrompe: se usa tal cual
        let handler = handler_for("files");
        assert_eq!(
            handler.resolve("logo.png"),
            Path::new("files").join("logo.png")
        );
    }

    #[test]
    fn test_resolve_strips_only_one_separator() {
        let handler = handler_for("files");
        assert_eq!(
            handler.resolve("//doble.txt"),
            Path::new("files").join("/doble.txt")
        );
    }

    // ==================== Servir archivos ====================

    #[test]
    fn test_serve_existing_file() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("hola.txt"), "hola mundo").unwrap();

        let handler = handler_for(root.path().to_str().unwrap());
        let response = serve_to_string(&handler, "/hola.txt");

        assert!(response.starts_with("HTTP/1.0 200 OK\r\n"));
        assert!(response.contains("Content-Type: text/plain\r\n"));
        assert_eq!(body_of(&response), "hola mundo");
    }

    #[test]
    fn test_serve_missing_file_is_404_without_body() {
        let root = tempfile::tempdir().unwrap();
        let handler = handler_for(root.path().to_str().unwrap());

        let response = serve_to_string(&handler, "/no-existe.txt");

        assert!(response.starts_with("HTTP/1.0 404 Not Found\r\n"));
        assert_eq!(body_of(&response), "");
    }

    #[test]
    fn test_serve_directory_is_404() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("docs")).unwrap();

        let handler = handler_for(root.path().to_str().unwrap());
        // Sin slash final no hay documento por defecto: apunta al directorio
        let response = serve_to_string(&handler, "/docs");

        assert!(response.starts_with("HTTP/1.0 404 Not Found\r\n"));
        assert_eq!(body_of(&response), "");
    }

    #[test]
    fn test_serve_default_document_for_root() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("index.html"), "<html></html>").unwrap();

        let handler = handler_for(root.path().to_str().unwrap());
        let response = serve_to_string(&handler, "/");

        assert!(response.starts_with("HTTP/1.0 200 OK\r\n"));
        assert!(response.contains("Content-Type: text/html\r\n"));
        assert_eq!(body_of(&response), "<html></html>");
    }

    #[test]
    fn test_serve_unknown_extension_falls_back_to_octet_stream() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("datos.xyz"), "abc").unwrap();

        let handler = handler_for(root.path().to_str().unwrap());
        let response = serve_to_string(&handler, "/datos.xyz");

        assert!(response.starts_with("HTTP/1.0 200 OK\r\n"));
        assert!(response.contains("Content-Type: application/octet-stream\r\n"));
    }

    #[test]
    fn test_serve_empty_file() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("vacio.txt"), "").unwrap();

        let handler = handler_for(root.path().to_str().unwrap());
        let response = serve_to_string(&handler, "/vacio.txt");

        assert!(response.starts_with("HTTP/1.0 200 OK\r\n"));
        assert_eq!(body_of(&response), "");
    }

    #[test]
    fn test_serve_file_larger_than_one_chunk() {
        let root = tempfile::tempdir().unwrap();
        // Más de 16 KiB para forzar varios bloques
        let content: Vec<u8> = (0..40_000u32).map(|i| (i % 251) as u8).collect();
        std::fs::write(root.path().join("grande.bin"), &content).unwrap();

        let handler = handler_for(root.path().to_str().unwrap());
        let mut sink = Vec::new();
        handler.serve("/grande.bin", Response::new(&mut sink));

        let head_end = sink
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .expect("head separator")
            + 4;
        assert_eq!(&sink[head_end..], &content[..]);
    }

    #[test]
    fn test_stats_accounting() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("a.txt"), "12345").unwrap();

        let handler = handler_for(root.path().to_str().unwrap());
        serve_to_string(&handler, "/a.txt");
        serve_to_string(&handler, "/a.txt");
        serve_to_string(&handler, "/no-existe");

        let snapshot = handler.stats.snapshot();
        assert_eq!(snapshot.total_requests, 3);
        assert_eq!(snapshot.served_ok, 2);
        assert_eq!(snapshot.not_found, 1);
        assert_eq!(snapshot.bytes_sent, 10);
    }

    // ==================== WebServer ====================

    #[test]
    fn test_construction_does_not_touch_filesystem() {
        // El directorio no existe; construir no debe fallar ni tocar nada
        let server = WebServer::new("http://127.0.0.1:0/", "/directorio/que/no/existe");
        assert_eq!(server.state(), ListenerState::Stopped);
    }

    #[test]
    fn test_start_propagates_config_error() {
        let mut server = WebServer::new("", "files/");
        let result = server.start();
        assert!(matches!(result, Err(ListenerError::Config(_))));
        assert_eq!(server.state(), ListenerState::Stopped);
    }
}
