//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor de archivos con soporte
//! para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./web_server --prefix http://127.0.0.1:10000/ --root ./files
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! WEB_PREFIX=http://0.0.0.0:8080/ WEB_ROOT=/var/www ./web_server
//! ```

use clap::Parser;

/// Configuración del servidor de archivos estáticos
#[derive(Debug, Clone, Parser)]
#[command(name = "web_server")]
#[command(about = "Servidor web minimalista que sirve archivos estáticos desde un directorio")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Prefijo de dirección en el que escucha el servidor (forma http://host:puerto/)
    #[arg(long, default_value = "http://127.0.0.1:10000/", env = "WEB_PREFIX")]
    pub prefix: String,

    /// Directorio raíz del que se sirven los archivos
    #[arg(long, default_value = "./files", env = "WEB_ROOT")]
    pub root: String,

    /// Imprime información de debug por cada request recibido
    #[arg(long, env = "WEB_DEBUG")]
    pub debug: bool,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    ///
    /// # Ejemplo
    /// ```no_run
    /// use web_server::config::Config;
    ///
    /// let config = Config::new();
    /// println!("Sirviendo {} en {}", config.root, config.prefix);
    /// ```
    pub fn new() -> Self {
        Config::parse()
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.prefix.trim().is_empty() {
            return Err("Prefix must not be empty".to_string());
        }
        if !self.prefix.starts_with("http://") {
            return Err("Prefix must start with http://".to_string());
        }
        if self.root.trim().is_empty() {
            return Err("Root directory must not be empty".to_string());
        }
        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("⚙️  Configuración:");
        println!("   Prefix:   {}", self.prefix);
        println!("   Root dir: {}", self.root);
        println!("   Debug:    {}", if self.debug { "activado" } else { "desactivado" });
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            prefix: "http://127.0.0.1:10000/".to_string(),
            root: "./files".to_string(),
            debug: false,
        }
    }
}
