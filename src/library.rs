use {
  super::*,
  base64::{engine::general_purpose::STANDARD, Engine},
  fetch_error::{EncodingError, FilenameError, OtherError, WriteError},
};

/// The flat directory of files a node shares and downloads into.
pub(crate) struct Library {
  root: Utf8PathBuf,
}

impl Library {
  pub(crate) fn new(root: Utf8PathBuf) -> Self {
    Self { root }
  }

  pub(crate) fn root(&self) -> &Utf8Path {
    &self.root
  }

  pub(crate) fn scan(&self) -> Result<Inventory> {
    Inventory::scan(&self.root)
  }

  // Only bare filenames map into the library; anything with a separator or
  // a `..` does not.
  fn path(&self, filename: &str) -> Option<Utf8PathBuf> {
    let mut components = Utf8Path::new(filename).components();

    match (components.next(), components.next()) {
      (Some(Utf8Component::Normal(name)), None) if name == filename => Some(self.root.join(name)),
      _ => None,
    }
  }

  /// Serve the full content of `filename`, base64 encoded.
  pub(crate) fn download(&self, filename: &str) -> Result<String, Fault> {
    log::info!("received download request for `{filename}`");

    let path = self
      .path(filename)
      .filter(|path| path.is_file())
      .ok_or_else(|| Fault::not_found(format!("file `{filename}` not found on this node")))?;

    let content = fs::read(&path)
      .map_err(|err| Fault::internal(format!("failed to read `{filename}`: {err}")))?;

    Ok(STANDARD.encode(content))
  }

  /// Download `filename` from the peer at `from`, overwriting any local file
  /// of the same name.
  pub(crate) async fn fetch(
    &self,
    from: &Address,
    filename: &str,
  ) -> Result<Utf8PathBuf, FetchError> {
    let path = self
      .path(filename)
      .context(FilenameError { filename })
      .context(OtherError)?;

    let payload = Client::new(from.clone())
      .download(filename)
      .await
      .map_err(|err| FetchError::from_client(from, err))?;

    let content = STANDARD
      .decode(payload)
      .context(EncodingError)
      .context(OtherError)?;

    tokio::fs::write(&path, content)
      .await
      .context(WriteError { path: &path })
      .context(OtherError)?;

    log::info!("downloaded `{filename}` from {from} into `{}`", self.root);

    Ok(path)
  }
}

impl Service for Library {
  fn dispatch(&self, request: Request) -> Response {
    match request {
      Request::Download { filename } => match self.download(&filename) {
        Ok(content) => Response::result(content),
        Err(fault) => fault.into(),
      },
      request => Fault::unsupported(&request).into(),
    }
  }
}
