use {super::*, snafu::IntoError};

/// Why a fetch from a remote peer failed, split by who is at fault: the
/// remote application, the connection, or anything else.
#[derive(Debug, Snafu)]
#[snafu(context(suffix(Error)), visibility(pub(crate)))]
pub(crate) enum FetchError {
  #[snafu(display("RPC fault from {from}: {fault}"))]
  Fault {
    backtrace: Option<Backtrace>,
    fault: Fault,
    from: Address,
  },
  #[snafu(display("transport failure talking to {from}: {source}"))]
  Transport {
    backtrace: Option<Backtrace>,
    from: Address,
    source: client::Error,
  },
  #[snafu(display("an error occurred: {source}"))]
  Other {
    backtrace: Option<Backtrace>,
    source: Unexpected,
  },
}

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Error)), visibility(pub(crate)))]
pub(crate) enum Unexpected {
  #[snafu(display("payload is not valid base64: {source}"))]
  Encoding { source: base64::DecodeError },
  #[snafu(display("refusing to write `{filename}`, not a plain filename"))]
  Filename { filename: String },
  #[snafu(display("malformed response: {source}"))]
  Malformed { source: client::Error },
  #[snafu(display("failed to write `{path}`: {source}"))]
  Write { path: Utf8PathBuf, source: io::Error },
}

impl FetchError {
  pub(crate) fn from_client(from: &Address, err: client::Error) -> Self {
    match err {
      client::Error::Fault { fault, .. } => FaultError {
        fault,
        from: from.clone(),
      }
      .build(),
      client::Error::Request { .. } | client::Error::Status { .. } => {
        TransportError { from: from.clone() }.into_error(err)
      }
      client::Error::Deserialize { .. } => OtherError.into_error(MalformedError.into_error(err)),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn transport() {
    let from = unused_address();

    let err = Client::new(from.clone())
      .download("report.txt")
      .await
      .unwrap_err();

    assert_matches!(
      FetchError::from_client(&from, err),
      FetchError::Transport { from: address, .. } if address == from,
    );
  }

  #[tokio::test]
  async fn fault() {
    let (_directory, from) = directory().await;

    let err = Client::new(from.clone())
      .download("report.txt")
      .await
      .unwrap_err();

    let err = FetchError::from_client(&from, err);

    assert_eq!(
      err.to_string(),
      format!("RPC fault from {from}: method `download` is not supported (code: 2)"),
    );
  }

  #[test]
  fn other() {
    let err = OtherError.into_error(
      FilenameError {
        filename: "../escape",
      }
      .build(),
    );

    assert_eq!(
      err.to_string(),
      "an error occurred: refusing to write `../escape`, not a plain filename",
    );
  }
}
