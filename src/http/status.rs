//! # Códigos de Estado HTTP
//!
//! Este módulo define los códigos de estado que produce el servidor.
//! Un servidor de archivos estáticos necesita muy pocos:
//!
//! - **200 OK**: archivo encontrado y servido
//! - **400 Bad Request**: el request no se pudo parsear
//! - **404 Not Found**: el archivo no se pudo abrir
//! - **500 Internal Server Error**: reservado para fallos inesperados

/// Representa los códigos de estado HTTP que soporta nuestro servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - El archivo se encontró y se sirvió
    Ok = 200,

    /// 400 Bad Request - Request malformado o ilegible
    BadRequest = 400,

    /// 404 Not Found - El archivo no existe o no se pudo leer
    NotFound = 404,

    /// 500 Internal Server Error - Error interno del servidor
    InternalServerError = 500,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el texto de razón (reason phrase) asociado al código
    ///
    /// Estos textos están definidos en el RFC 1945 y son estándares.
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }

    /// Verifica si el código indica éxito (2xx)
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::StatusCode;
    /// assert!(StatusCode::Ok.is_success());
    /// assert!(!StatusCode::NotFound.is_success());
    /// ```
    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Ok)
    }
}

impl std::fmt::Display for StatusCode {
    /// Formatea el código de estado para mostrarlo
    ///
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}
