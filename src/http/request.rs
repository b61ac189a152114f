//! # Parsing de Requests HTTP
//! src/http/request.rs
//!
//! Este módulo implementa un parser HTTP desde cero.
//!
//! ## Formato de un Request
//!
//! ```text
//! GET /ruta/archivo.html?x=1 HTTP/1.0\r\n
//! Host: localhost:10000\r\n
//! User-Agent: curl/7.68.0\r\n
//! \r\n
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path?query HTTP/1.x`
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//!
//! El servidor responde igual a cualquier método, así que el método se
//! conserva como token crudo en vez de restringirlo a una lista.

use std::collections::HashMap;

/// Representa un request HTTP parseado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP tal como llegó en el request line (ej: "GET")
    method: String,

    /// Path de la petición, sin query string (ej: "/img/logo.png")
    path: String,

    /// Query parameters parseados (ej: {"x": "1"})
    query_params: HashMap<String, String>,

    /// Headers HTTP (ej: {"Host": "localhost:10000"})
    headers: HashMap<String, String>,

    /// Versión HTTP ("HTTP/1.0" o "HTTP/1.1")
    version: String,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Formato inválido de la request line
    InvalidRequestLine,

    /// Versión HTTP incorrecta (debe ser HTTP/1.0 o HTTP/1.1)
    InvalidHttpVersion(String),

    /// Header malformado
    InvalidHeader(String),

    /// Request vacío
    EmptyRequest,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidRequestLine => write!(f, "Invalid request line format"),
            ParseError::InvalidHttpVersion(v) => write!(f, "Invalid HTTP version: {}", v),
            ParseError::InvalidHeader(h) => write!(f, "Invalid header: {}", h),
            ParseError::EmptyRequest => write!(f, "Empty request"),
        }
    }
}

impl std::error::Error for ParseError {}

impl Request {
    /// Parsea un request HTTP desde bytes
    ///
    /// # Argumentos
    ///
    /// * `buffer` - Buffer conteniendo el request HTTP completo
    ///
    /// # Retorna
    ///
    /// * `Ok(Request)` - Request parseado exitosamente
    /// * `Err(ParseError)` - Error durante el parsing
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use web_server::http::Request;
    ///
    /// let raw = b"GET /index.html HTTP/1.0\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.method(), "GET");
    /// assert_eq!(request.path(), "/index.html");
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        // Convertir a string (validando que sea UTF-8 válido)
        let request_str = std::str::from_utf8(buffer)
            .map_err(|_| ParseError::InvalidRequestLine)?;

        if request_str.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        // Separar por \r\n para obtener líneas
        let lines: Vec<&str> = request_str.split("\r\n").collect();

        // 1. Parsear la request line (primera línea)
        let (method, path, query_params, version) = Self::parse_request_line(lines[0])?;

        // 2. Parsear headers (resto de líneas hasta encontrar línea vacía)
        let headers = Self::parse_headers(&lines[1..])?;

        Ok(Request {
            method,
            path,
            query_params,
            headers,
            version,
        })
    }

    /// Parsea la request line (primera línea del request)
    ///
    /// Formato: `GET /path?query HTTP/1.0`
    fn parse_request_line(
        line: &str,
    ) -> Result<(String, String, HashMap<String, String>, String), ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        // Debe tener exactamente 3 partes: METHOD PATH VERSION
        if parts.len() != 3 {
            return Err(ParseError::InvalidRequestLine);
        }

        // El método se acepta tal cual; el servidor responde igual a todos
        let method = parts[0].to_string();

        // Parsear path y query
        let (path, query_params) = Self::parse_path_and_query(parts[1]);

        // Validar versión HTTP
        let version = parts[2].to_string();
        if version != "HTTP/1.0" && version != "HTTP/1.1" {
            return Err(ParseError::InvalidHttpVersion(version));
        }

        Ok((method, path, query_params, version))
    }

    /// Parsea el path y extrae los query parameters
    ///
    /// Ejemplo: "/docs/index.html?lang=es"
    /// Retorna: ("/docs/index.html", {"lang": "es"})
    fn parse_path_and_query(path_with_query: &str) -> (String, HashMap<String, String>) {
        // Buscar el símbolo '?' que separa path de query
        if let Some(query_start) = path_with_query.find('?') {
            let path = path_with_query[..query_start].to_string();
            let query_string = &path_with_query[query_start + 1..];
            let query_params = Self::parse_query_string(query_string);
            (path, query_params)
        } else {
            // No hay query parameters
            (path_with_query.to_string(), HashMap::new())
        }
    }

    /// Parsea una query string en un HashMap
    ///
    /// Ejemplo: "lang=es&dark=true"
    /// Retorna: {"lang": "es", "dark": "true"}
    fn parse_query_string(query: &str) -> HashMap<String, String> {
        let mut params = HashMap::new();

        // Separar por '&' para obtener cada parámetro
        for param in query.split('&') {
            if param.is_empty() {
                continue;
            }

            // Separar por '=' para obtener key y value
            if let Some(eq_pos) = param.find('=') {
                let key = &param[..eq_pos];
                let value = &param[eq_pos + 1..];
                params.insert(key.to_string(), value.to_string());
            } else {
                // Parámetro sin valor (ej: "?debug")
                params.insert(param.to_string(), String::new());
            }
        }

        params
    }

    /// Parsea los headers HTTP
    ///
    /// Cada header tiene formato: "Name: Value"
    fn parse_headers(lines: &[&str]) -> Result<HashMap<String, String>, ParseError> {
        let mut headers = HashMap::new();

        for line in lines {
            // La línea vacía marca el fin de los headers
            if line.trim().is_empty() {
                break;
            }

            // Buscar el separador ':'
            if let Some(colon_pos) = line.find(':') {
                let name = line[..colon_pos].trim().to_string();
                let value = line[colon_pos + 1..].trim().to_string();
                headers.insert(name, value);
            } else {
                // Header sin ':' es inválido
                return Err(ParseError::InvalidHeader(line.to_string()));
            }
        }

        Ok(headers)
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Obtiene el path del request (sin query string)
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene un query parameter específico
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(|s| s.as_str())
    }

    /// Obtiene un header específico
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Indica si el cliente pidió mantener viva la conexión
    ///
    /// En HTTP/1.1 keep-alive es el default salvo `Connection: close`;
    /// en HTTP/1.0 solo con `Connection: keep-alive` explícito.
    pub fn keep_alive(&self) -> bool {
        match self.header("Connection") {
            Some(v) => v.eq_ignore_ascii_case("keep-alive"),
            None => self.version == "HTTP/1.1",
        }
    }
}
