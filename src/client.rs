use {super::*, reqwest::StatusCode};

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Error)))]
pub(crate) enum Error {
  #[snafu(display("deserializing response from {url} failed"))]
  Deserialize {
    backtrace: Option<Backtrace>,
    source: serde_json::Error,
    url: String,
  },
  #[snafu(display("{url} answered with fault: {fault}"))]
  Fault {
    backtrace: Option<Backtrace>,
    fault: Fault,
    url: String,
  },
  #[snafu(display("request to {url} failed"))]
  Request {
    backtrace: Option<Backtrace>,
    source: reqwest::Error,
    url: String,
  },
  #[snafu(display("response from {url} failed with {status}"))]
  Status {
    backtrace: Option<Backtrace>,
    status: StatusCode,
    url: String,
  },
}

type Result<T = (), E = Error> = std::result::Result<T, E>;

/// Calls operations on a remote node, directory or peer.
pub(crate) struct Client {
  address: Address,
  http: reqwest::Client,
}

impl Client {
  pub(crate) fn new(address: Address) -> Self {
    Self {
      address,
      http: reqwest::Client::new(),
    }
  }

  pub(crate) fn address(&self) -> &Address {
    &self.address
  }

  pub(crate) async fn register_node(&self, node: &Address, inventory: &Inventory) -> Result<bool> {
    self
      .call(Request::RegisterNode {
        host: node.host.clone(),
        port: node.port,
        inventory: inventory.clone(),
      })
      .await
  }

  pub(crate) async fn register_file(
    &self,
    node: &Address,
    filename: &str,
    checksum: &str,
  ) -> Result<bool> {
    self
      .call(Request::RegisterFile {
        host: node.host.clone(),
        port: node.port,
        filename: filename.into(),
        checksum: checksum.into(),
      })
      .await
  }

  pub(crate) async fn find_file(&self, filename: &str) -> Result<Vec<Entry>> {
    self
      .call(Request::FindFile {
        filename: filename.into(),
      })
      .await
  }

  pub(crate) async fn find_node_with_file(&self, filename: &str) -> Result<Option<Address>> {
    self
      .call(Request::FindNodeWithFile {
        filename: filename.into(),
      })
      .await
  }

  pub(crate) async fn download(&self, filename: &str) -> Result<String> {
    self
      .call(Request::Download {
        filename: filename.into(),
      })
      .await
  }

  async fn call<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
    let url = self.address.url();

    let response = self
      .http
      .post(&url)
      .json(&request)
      .send()
      .await
      .with_context(|_| RequestError { url: url.clone() })?;

    let status = response.status();

    ensure!(
      status.is_success(),
      StatusError {
        status,
        url: url.clone(),
      }
    );

    let body = response
      .bytes()
      .await
      .with_context(|_| RequestError { url: url.clone() })?;

    let response = serde_json::from_slice::<Response>(&body)
      .with_context(|_| DeserializeError { url: url.clone() })?;

    match response {
      Response::Result(value) => {
        serde_json::from_value(value).with_context(|_| DeserializeError { url: url.clone() })
      }
      Response::Fault(fault) => FaultError { fault, url }.fail(),
    }
  }
}
