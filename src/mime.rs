//! # Tabla de Content-Types
//! src/mime.rs
//!
//! Mapeo de extensión de archivo → content-type. El servidor de archivos
//! recibe la tabla inyectada, así que puede reemplazarse o extenderse sin
//! tocar el resto del código.

use std::collections::HashMap;
use std::path::Path;

/// Errores de la tabla de content-types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MimeError {
    /// La extensión no está registrada en la tabla
    UnknownType(String),
}

impl std::fmt::Display for MimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MimeError::UnknownType(ext) => write!(f, "Unknown content type for extension: {}", ext),
        }
    }
}

impl std::error::Error for MimeError {}

/// Tabla de extensión → content-type
///
/// Las extensiones se registran y consultan en minúsculas, sin el punto.
///
/// # Ejemplo
/// ```
/// use web_server::mime::MimeMap;
///
/// let mime = MimeMap::with_defaults();
/// assert_eq!(mime.lookup("html").unwrap(), "text/html");
/// assert!(mime.lookup("xyz").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MimeMap {
    types: HashMap<String, String>,
}

impl MimeMap {
    /// Crea una tabla vacía
    pub fn new() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Crea una tabla con los tipos habituales de un sitio estático
    pub fn with_defaults() -> Self {
        let mut map = Self::new();

        map.register("html", "text/html");
        map.register("htm", "text/html");
        map.register("css", "text/css");
        map.register("js", "application/javascript");
        map.register("json", "application/json");
        map.register("txt", "text/plain");
        map.register("xml", "application/xml");
        map.register("pdf", "application/pdf");

        map.register("png", "image/png");
        map.register("jpg", "image/jpeg");
        map.register("jpeg", "image/jpeg");
        map.register("gif", "image/gif");
        map.register("svg", "image/svg+xml");
        map.register("ico", "image/x-icon");
        map.register("webp", "image/webp");

        map.register("woff", "font/woff");
        map.register("woff2", "font/woff2");

        map.register("mp3", "audio/mpeg");
        map.register("mp4", "video/mp4");
        map.register("wasm", "application/wasm");
        map.register("zip", "application/zip");

        map
    }

    /// Registra (o sobrescribe) una extensión
    pub fn register(&mut self, extension: &str, content_type: &str) {
        self.types
            .insert(extension.to_ascii_lowercase(), content_type.to_string());
    }

    /// Busca el content-type para una extensión
    ///
    /// Retorna `MimeError::UnknownType` si la extensión no está registrada.
    pub fn lookup(&self, extension: &str) -> Result<&str, MimeError> {
        self.types
            .get(&extension.to_ascii_lowercase())
            .map(|s| s.as_str())
            .ok_or_else(|| MimeError::UnknownType(extension.to_string()))
    }

    /// Busca el content-type para la extensión de una ruta
    ///
    /// Una ruta sin extensión se reporta como extensión vacía.
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::mime::MimeMap;
    /// use std::path::Path;
    ///
    /// let mime = MimeMap::with_defaults();
    /// assert_eq!(mime.for_path(Path::new("files/logo.PNG")).unwrap(), "image/png");
    /// ```
    pub fn for_path(&self, path: &Path) -> Result<&str, MimeError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        self.lookup(extension)
    }
}

impl Default for MimeMap {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_extensions() {
        let mime = MimeMap::with_defaults();
        assert_eq!(mime.lookup("html").unwrap(), "text/html");
        assert_eq!(mime.lookup("css").unwrap(), "text/css");
        assert_eq!(mime.lookup("png").unwrap(), "image/png");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mime = MimeMap::with_defaults();
        assert_eq!(mime.lookup("HTML").unwrap(), "text/html");
        assert_eq!(mime.lookup("Jpg").unwrap(), "image/jpeg");
    }

    #[test]
    fn test_lookup_unknown_extension() {
        let mime = MimeMap::with_defaults();
        let result = mime.lookup("xyz");
        assert_eq!(result, Err(MimeError::UnknownType("xyz".to_string())));
    }

    #[test]
    fn test_register_custom_type() {
        let mut mime = MimeMap::new();
        mime.register("md", "text/markdown");
        assert_eq!(mime.lookup("md").unwrap(), "text/markdown");
    }

    #[test]
    fn test_register_overwrites() {
        let mut mime = MimeMap::with_defaults();
        mime.register("html", "application/xhtml+xml");
        assert_eq!(mime.lookup("html").unwrap(), "application/xhtml+xml");
    }

    #[test]
    fn test_for_path() {
        let mime = MimeMap::with_defaults();
        assert_eq!(mime.for_path(Path::new("files/index.html")).unwrap(), "text/html");
        assert_eq!(mime.for_path(Path::new("a/b/c/foto.JPEG")).unwrap(), "image/jpeg");
    }

    #[test]
    fn test_for_path_without_extension() {
        let mime = MimeMap::with_defaults();
        let result = mime.for_path(Path::new("files/README"));
        assert_eq!(result, Err(MimeError::UnknownType("".to_string())));
    }

    #[test]
    fn test_error_display() {
        let err = MimeError::UnknownType("xyz".to_string());
        assert!(err.to_string().contains("xyz"));
    }
}
