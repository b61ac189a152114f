//! # Listener TCP
//! src/server/listener.rs
//!
//! Ciclo de vida del socket y accept loop del servidor.
//!
//! El `Listener` se enciende con `start()`, que valida el prefijo, hace
//! bind y lanza un thread dedicado con el accept loop. Cada conexión
//! aceptada se atiende en serie dentro de ese mismo thread: se lee y
//! parsea el request y se invoca al handler registrado con el par
//! request/response. `stop()` es cooperativo: marca el estado y el loop
//! lo observa al inicio de su siguiente iteración.
//!
//! ## Estados
//!
//! ```text
//! Stopped ──start()──▶ Running ──stop()──▶ StopRequested ──(loop)──▶ Stopped
//! ```
//!
//! El estado vive en un solo `AtomicU8`, así que `start`/`stop`
//! concurrentes no pueden dejar combinaciones inválidas.

use crate::http::{Request, Response, StatusCode};
use std::io::Read;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Tamaño del buffer de lectura del request
const READ_BUFFER_SIZE: usize = 8192;

/// Estado del ciclo de vida del listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    /// Sin socket; `start()` es válido
    Stopped = 0,

    /// Accept loop corriendo en su thread
    Running = 1,

    /// `stop()` fue llamado; el loop termina en su siguiente iteración
    StopRequested = 2,
}

impl ListenerState {
    fn as_u8(self) -> u8 {
        self as u8
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => ListenerState::Stopped,
            1 => ListenerState::Running,
            _ => ListenerState::StopRequested,
        }
    }
}

/// Errores del listener
#[derive(Debug)]
pub enum ListenerError {
    /// Prefijo de dirección ausente o malformado
    Config(String),

    /// No se pudo hacer bind en la dirección del prefijo
    Bind {
        prefix: String,
        source: std::io::Error,
    },

    /// Falló el accept; el loop terminó y el listener quedó detenido
    Accept(std::io::Error),
}

impl std::fmt::Display for ListenerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListenerError::Config(msg) => write!(f, "Invalid address prefix: {}", msg),
            ListenerError::Bind { prefix, source } => {
                write!(f, "Could not bind listener at {}: {}", prefix, source)
            }
            ListenerError::Accept(source) => write!(f, "Accept failed: {}", source),
        }
    }
}

impl std::error::Error for ListenerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListenerError::Config(_) => None,
            ListenerError::Bind { source, .. } => Some(source),
            ListenerError::Accept(source) => Some(source),
        }
    }
}

/// Handler de exchanges del listener
///
/// `handle_request` se invoca una vez por conexión aceptada, en el thread
/// del accept loop. La response se entrega por valor: el handler debe
/// consumirla y con ella se cierra la conexión.
pub trait RequestHandler: Send + Sync {
    /// Atiende un exchange request/response
    fn handle_request(&self, request: &Request, response: Response<TcpStream>);

    /// Se invoca exactamente una vez, con el socket ya cerrado, cuando el
    /// listener pasa de StopRequested a Stopped
    fn on_stopped(&self) {}
}

/// Handler por defecto: responde 404 vacío a todo exchange
///
/// Evita que una conexión quede colgada esperando si nadie registró un
/// handler propio.
struct NullHandler;

impl RequestHandler for NullHandler {
    fn handle_request(&self, _request: &Request, response: Response<TcpStream>) {
        let _ = response.send_empty(StatusCode::NotFound);
    }
}

/// Listener TCP con accept loop en background
///
/// # Ejemplo
/// ```no_run
/// use web_server::server::Listener;
///
/// let mut listener = Listener::new("http://127.0.0.1:10000/");
/// listener.start().expect("Error al iniciar listener");
/// // ... atiende requests con el handler registrado ...
/// listener.stop();
/// ```
pub struct Listener {
    /// Prefijo de dirección (inmutable después de la construcción)
    prefix: String,

    /// Máquina de estados Stopped/Running/StopRequested
    state: Arc<AtomicU8>,

    /// Imprime el registro de debug por cada request
    debug_output: Arc<AtomicBool>,

    /// Handler registrado para los exchanges
    handler: Arc<dyn RequestHandler>,

    /// Thread del accept loop, retenido para poder hacer join
    worker: Option<JoinHandle<Result<(), ListenerError>>>,

    /// Dirección real del socket una vez hecho el bind
    local_addr: Option<SocketAddr>,
}

impl Listener {
    /// Crea un listener para un prefijo de dirección
    ///
    /// No hace bind ni valida el prefijo; eso ocurre en `start()`.
    /// Sin handler registrado se usa uno que responde 404 a todo.
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            state: Arc::new(AtomicU8::new(ListenerState::Stopped.as_u8())),
            debug_output: Arc::new(AtomicBool::new(false)),
            handler: Arc::new(NullHandler),
            worker: None,
            local_addr: None,
        }
    }

    /// Registra el handler de exchanges
    ///
    /// Debe llamarse antes de `start()`; el accept loop captura el
    /// handler vigente al arrancar.
    pub fn set_handler(&mut self, handler: Arc<dyn RequestHandler>) {
        self.handler = handler;
    }

    /// Activa o desactiva la salida de debug por request
    pub fn set_debug_output(&self, enabled: bool) {
        self.debug_output.store(enabled, Ordering::SeqCst);
    }

    /// Obtiene el estado actual del listener
    pub fn state(&self) -> ListenerState {
        ListenerState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Obtiene el prefijo configurado
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Dirección real del socket (disponible después de `start()`)
    ///
    /// Útil cuando el prefijo pide el puerto 0 y el sistema asigna uno.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Inicia el listener
    ///
    /// Valida el prefijo, hace bind y lanza el accept loop en un thread
    /// dedicado; no bloquea al caller. Es un no-op si el listener ya
    /// está Running o StopRequested.
    ///
    /// # Errores
    ///
    /// * `ListenerError::Config` - prefijo vacío o malformado (se detecta
    ///   antes de tocar el socket)
    /// * `ListenerError::Bind` - el bind falló (puerto ocupado, permisos);
    ///   el estado queda en Stopped
    pub fn start(&mut self) -> Result<(), ListenerError> {
        let address = Self::bind_address(&self.prefix)?;

        if self
            .state
            .compare_exchange(
                ListenerState::Stopped.as_u8(),
                ListenerState::Running.as_u8(),
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_err()
        {
            // Ya estaba Running o StopRequested
            return Ok(());
        }

        let listener = match TcpListener::bind(&address) {
            Ok(listener) => listener,
            Err(e) => {
                self.state
                    .store(ListenerState::Stopped.as_u8(), Ordering::SeqCst);
                return Err(ListenerError::Bind {
                    prefix: self.prefix.clone(),
                    source: e,
                });
            }
        };

        self.local_addr = listener.local_addr().ok();
        println!("[*] iniciado en {}", self.prefix);

        let state = Arc::clone(&self.state);
        let debug_output = Arc::clone(&self.debug_output);
        let handler = Arc::clone(&self.handler);

        self.worker = Some(thread::spawn(move || {
            Self::accept_loop(listener, state, debug_output, handler)
        }));

        Ok(())
    }

    /// Solicita detener el listener
    ///
    /// No bloquea: el accept loop observa la marca al inicio de su
    /// siguiente iteración. Un accept ya bloqueado puede completar un
    /// exchange más antes de que el loop la vea. Es un no-op si el
    /// listener no está Running.
    pub fn stop(&self) {
        let _ = self.state.compare_exchange(
            ListenerState::Running.as_u8(),
            ListenerState::StopRequested.as_u8(),
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
    }

    /// Espera a que el thread del accept loop termine
    ///
    /// Retorna el error fatal del loop si lo hubo (`ListenerError::Accept`).
    /// Con el loop bloqueado en accept, el join solo retorna después de
    /// que llegue una conexión que lo despierte.
    pub fn join(&mut self) -> Result<(), ListenerError> {
        match self.worker.take() {
            Some(handle) => match handle.join() {
                Ok(result) => result,
                // El thread entró en pánico; el listener ya no corre
                Err(_) => Ok(()),
            },
            None => Ok(()),
        }
    }

    /// Deriva la dirección de bind `host:puerto` desde el prefijo
    ///
    /// El prefijo debe tener la forma `http://host:puerto/`.
    fn bind_address(prefix: &str) -> Result<String, ListenerError> {
        if prefix.trim().is_empty() {
            return Err(ListenerError::Config("prefix missing".to_string()));
        }

        let rest = prefix.strip_prefix("http://").ok_or_else(|| {
            ListenerError::Config(format!("prefix must start with http://: {}", prefix))
        })?;

        let host_port = rest.split('/').next().unwrap_or("");
        match host_port.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() => {
                let port: u16 = port.parse().map_err(|_| {
                    ListenerError::Config(format!("invalid port in prefix: {}", prefix))
                })?;
                Ok(format!("{}:{}", host, port))
            }
            _ => Err(ListenerError::Config(format!(
                "prefix must include host and port: {}",
                prefix
            ))),
        }
    }

    /// Accept loop: corre en el thread dedicado hasta observar
    /// StopRequested o hasta un error fatal del accept
    fn accept_loop(
        listener: TcpListener,
        state: Arc<AtomicU8>,
        debug_output: Arc<AtomicBool>,
        handler: Arc<dyn RequestHandler>,
    ) -> Result<(), ListenerError> {
        while state.load(Ordering::SeqCst) != ListenerState::StopRequested.as_u8() {
            // La marca de stop se revisa solo acá; un accept ya bloqueado
            // completa y despacha su exchange antes de salir del loop
            let (stream, _peer) = match listener.accept() {
                Ok(connection) => connection,
                Err(e) => {
                    // Error del propio accept: fatal, sin reintentos
                    state.store(ListenerState::Stopped.as_u8(), Ordering::SeqCst);
                    return Err(ListenerError::Accept(e));
                }
            };

            if let Err(e) = Self::dispatch(stream, &*handler, &debug_output) {
                eprintln!("   ❌ Error atendiendo conexión: {}", e);
            }
        }

        // Cerrar el socket antes de anunciar la detención
        drop(listener);
        state.store(ListenerState::Stopped.as_u8(), Ordering::SeqCst);
        println!("[*] detenido");
        handler.on_stopped();

        Ok(())
    }

    /// Atiende una conexión aceptada: lee, parsea y despacha al handler
    fn dispatch(
        mut stream: TcpStream,
        handler: &dyn RequestHandler,
        debug_output: &AtomicBool,
    ) -> std::io::Result<()> {
        let mut buffer = [0u8; READ_BUFFER_SIZE];
        let bytes_read = stream.read(&mut buffer)?;

        if bytes_read == 0 {
            // El cliente cerró sin enviar nada
            return Ok(());
        }

        let request = match Request::parse(&buffer[..bytes_read]) {
            Ok(request) => request,
            Err(e) => {
                println!("   ❌ Parse error: {}", e);
                return Response::new(stream).send_empty(StatusCode::BadRequest);
            }
        };

        if debug_output.load(Ordering::SeqCst) {
            Self::write_debug_info(&request, &stream);
        }

        handler.handle_request(&request, Response::new(stream));
        Ok(())
    }

    /// Imprime el registro fijo de debug de un request
    fn write_debug_info(request: &Request, stream: &TcpStream) {
        println!("   [debug] KeepAlive: {}", request.keep_alive());
        println!("   [debug] Local end point: {:?}", stream.local_addr());
        println!("   [debug] Remote end point: {:?}", stream.peer_addr());
        println!("   [debug] HTTP method: {}", request.method());
        println!("   [debug] Protocol version: {}", request.version());
        // Sin autenticación ni TLS en este servidor
        println!("   [debug] Is authenticated: false");
        println!("   [debug] Is secure: false");
    }
}
