use super::*;

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Error)))]
pub(crate) enum Error {
  #[snafu(display("invalid address `{input}`, expected `HOST:PORT`"))]
  Invalid { input: String },
  #[snafu(display("invalid port in address `{input}`"))]
  Port {
    input: String,
    source: ParseIntError,
  },
}

/// Network endpoint of a node. Nodes have no identity beyond their address,
/// so two registrations from the same host and port are the same node.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub(crate) struct Address {
  pub(crate) host: String,
  pub(crate) port: u16,
}

impl Address {
  pub(crate) fn new(host: impl Into<String>, port: u16) -> Self {
    Self {
      host: host.into(),
      port,
    }
  }

  pub(crate) fn resolve(&self) -> io::Result<SocketAddr> {
    (self.host.as_str(), self.port)
      .to_socket_addrs()?
      .next()
      .ok_or_else(|| {
        io::Error::new(
          io::ErrorKind::NotFound,
          format!("no socket addresses found for `{}`", self.host),
        )
      })
  }

  pub(crate) fn url(&self) -> String {
    format!("http://{self}/")
  }
}

impl From<SocketAddr> for Address {
  fn from(socket_addr: SocketAddr) -> Self {
    Self::new(socket_addr.ip().to_string(), socket_addr.port())
  }
}

impl Display for Address {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    if self.host.contains(':') {
      write!(f, "[{}]:{}", self.host, self.port)
    } else {
      write!(f, "{}:{}", self.host, self.port)
    }
  }
}

impl FromStr for Address {
  type Err = Error;

  fn from_str(input: &str) -> Result<Self, Self::Err> {
    static RE: LazyLock<Regex> =
      LazyLock::new(|| Regex::new(r"^(?:\[([^\[\]]+)\]|([^:\[\]]+)):([0-9]+)$").unwrap());

    let captures = RE.captures(input).context(InvalidError { input })?;

    let host = captures
      .get(1)
      .or_else(|| captures.get(2))
      .context(InvalidError { input })?
      .as_str();

    Ok(Self {
      host: host.into(),
      port: captures[3].parse().context(PortError { input })?,
    })
  }
}
