//! HTTP RPC plumbing shared by the directory and peers. Every call is a
//! `POST /` carrying a JSON `Request`, answered with a JSON `Response`.

use {
  super::*,
  axum::{extract::DefaultBodyLimit, routing::post, Extension, Json, Router},
  axum_server::Handle,
  tokio::task::JoinHandle,
};

#[derive(Clone, Debug, Deserialize, IntoStaticStr, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "method", content = "params")]
#[strum(serialize_all = "snake_case")]
pub(crate) enum Request {
  Download {
    filename: String,
  },
  FindFile {
    filename: String,
  },
  FindNodeWithFile {
    filename: String,
  },
  RegisterFile {
    host: String,
    port: u16,
    filename: String,
    checksum: String,
  },
  RegisterNode {
    host: String,
    port: u16,
    inventory: Inventory,
  },
}

impl Request {
  pub(crate) fn method(&self) -> &'static str {
    self.into()
  }
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Response {
  Fault(Fault),
  Result(serde_json::Value),
}

impl Response {
  pub(crate) fn result(value: impl Serialize) -> Self {
    match serde_json::to_value(value) {
      Ok(value) => Self::Result(value),
      Err(err) => Self::Fault(Fault::internal(format!("failed to serialize result: {err}"))),
    }
  }
}

impl From<Fault> for Response {
  fn from(fault: Fault) -> Self {
    Self::Fault(fault)
  }
}

/// Application-level failure, reported to the caller inside a successful
/// HTTP exchange.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct Fault {
  pub(crate) code: i32,
  pub(crate) message: String,
}

impl Fault {
  pub(crate) const INTERNAL: i32 = 3;
  pub(crate) const NOT_FOUND: i32 = 1;
  pub(crate) const UNSUPPORTED: i32 = 2;

  pub(crate) fn internal(message: impl Into<String>) -> Self {
    Self {
      code: Self::INTERNAL,
      message: message.into(),
    }
  }

  pub(crate) fn not_found(message: impl Into<String>) -> Self {
    Self {
      code: Self::NOT_FOUND,
      message: message.into(),
    }
  }

  pub(crate) fn unsupported(request: &Request) -> Self {
    Self {
      code: Self::UNSUPPORTED,
      message: format!("method `{}` is not supported", request.method()),
    }
  }
}

impl Display for Fault {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{} (code: {})", self.message, self.code)
  }
}

pub(crate) trait Service: Send + Sync + 'static {
  fn dispatch(&self, request: Request) -> Response;
}

// Inventories grow with the number of files a node shares, so request
// bodies are unbounded.
pub(crate) fn router<S: Service>(service: Arc<S>) -> Router {
  Router::new()
    .route("/", post(dispatch::<S>))
    .layer(DefaultBodyLimit::disable())
    .layer(Extension(service))
}

async fn dispatch<S: Service>(
  Extension(service): Extension<Arc<S>>,
  Json(request): Json<Request>,
) -> Json<Response> {
  let method = request.method();

  log::debug!("dispatching `{method}`");

  // handlers lock the registry or read whole files
  let response = tokio::task::spawn_blocking(move || service.dispatch(request))
    .await
    .unwrap_or_else(|err| Fault::internal(format!("`{method}` handler failed: {err}")).into());

  Json(response)
}

/// RPC listener running as a task on the current runtime.
pub(crate) struct Server {
  address: SocketAddr,
  task: JoinHandle<io::Result<()>>,
}

impl Server {
  pub(crate) async fn spawn<S: Service>(service: Arc<S>, address: SocketAddr) -> io::Result<Self> {
    let handle = Handle::new();

    let mut task = tokio::spawn(
      axum_server::bind(address)
        .handle(handle.clone())
        .serve(router(service).into_make_service()),
    );

    match handle.listening().await {
      Some(address) => Ok(Self { address, task }),
      None => match (&mut task).await {
        Ok(Ok(())) => Err(io::Error::new(
          io::ErrorKind::AddrNotAvailable,
          format!("server on {address} exited before listening"),
        )),
        Ok(Err(err)) => Err(err),
        Err(err) => Err(io::Error::other(err)),
      },
    }
  }

  pub(crate) fn address(&self) -> SocketAddr {
    self.address
  }

  pub(crate) async fn join(self) -> io::Result<()> {
    self.task.await.map_err(io::Error::other)?
  }
}
