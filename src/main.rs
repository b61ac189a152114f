//! # Web Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor de archivos estáticos.
//!
//! Arranca el servidor con la configuración del CLI/entorno y queda a la
//! espera: el accept loop corre en background y el proceso termina cuando
//! el usuario presiona Enter.

use web_server::config::Config;
use web_server::server::WebServer;

fn main() {
    println!("=================================");
    println!("  Servidor de Archivos Estáticos");
    println!("=================================\n");

    // Crear configuración (CLI o variables de entorno)
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        std::process::exit(1);
    }

    config.print_summary();

    // Crear el servidor; el accept loop arranca con start()
    let mut server = WebServer::new(&config.prefix, &config.root);
    server.set_debug_output(config.debug);

    if let Err(e) = server.start() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }

    // El loop corre en su propio thread; esperar al usuario
    println!("Presione Enter para salir ...");
    let mut line = String::new();
    let _ = std::io::stdin().read_line(&mut line);

    // Detención cooperativa: el loop la observa en su siguiente iteración
    server.stop();
}
