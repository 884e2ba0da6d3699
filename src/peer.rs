use super::*;

/// A node that publishes its library to the directory and downloads files
/// other nodes have published.
pub(crate) struct Peer {
  address: Address,
  directory: Client,
  library: Arc<Library>,
}

#[derive(Debug)]
pub(crate) enum Outcome {
  Downloaded {
    filename: String,
    from: Address,
    path: Utf8PathBuf,
  },
  Failed {
    filename: String,
    from: Address,
    source: FetchError,
  },
  Missing {
    filename: String,
  },
  Unreachable {
    directory: Address,
    source: client::Error,
  },
}

impl Display for Outcome {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::Downloaded { filename, from, .. } => {
        write!(f, "File `{filename}` downloaded successfully from {from}.")
      }
      Self::Failed {
        filename,
        from,
        source,
      } => write!(f, "Failed to download `{filename}` from {from}: {source}"),
      Self::Missing { filename } => write!(f, "File `{filename}` not found in the network."),
      Self::Unreachable { directory, source } => {
        write!(f, "Error communicating with directory at {directory}: {source}")
      }
    }
  }
}

impl Peer {
  pub(crate) const EXIT: &'static str = "exit";

  pub(crate) fn new(address: Address, directory: Address, library: Arc<Library>) -> Self {
    Self {
      address,
      directory: Client::new(directory),
      library,
    }
  }

  pub(crate) fn address(&self) -> &Address {
    &self.address
  }

  /// Publish `inventory` to the directory: the whole inventory first, then
  /// each file on its own. Stops at the first failed call.
  pub(crate) async fn register(&self, inventory: &Inventory) -> Result<(), client::Error> {
    self
      .directory
      .register_node(&self.address, inventory)
      .await?;

    for (filename, checksum) in inventory.iter() {
      self
        .directory
        .register_file(&self.address, filename, checksum)
        .await?;
    }

    log::info!(
      "registered {} files from `{}` with directory at {}",
      inventory.len(),
      self.library.root(),
      self.directory.address(),
    );

    Ok(())
  }

  /// Ask the directory which node holds `filename` and download it from
  /// that node. Only the first holder is tried.
  pub(crate) async fn locate(&self, filename: &str) -> Outcome {
    let from = match self.directory.find_node_with_file(filename).await {
      Ok(Some(from)) => from,
      Ok(None) => {
        return Outcome::Missing {
          filename: filename.into(),
        }
      }
      Err(source) => {
        return Outcome::Unreachable {
          directory: self.directory.address().clone(),
          source,
        }
      }
    };

    log::info!("file `{filename}` found at node {from}, downloading");

    match self.library.fetch(&from, filename).await {
      Ok(path) => Outcome::Downloaded {
        filename: filename.into(),
        from,
        path,
      },
      Err(source) => Outcome::Failed {
        filename: filename.into(),
        from,
        source,
      },
    }
  }

  /// Prompt for filenames on `output` and fetch each one read from `input`,
  /// until `exit` or end of input.
  pub(crate) fn interact(
    &self,
    runtime: &Runtime,
    mut input: impl BufRead,
    mut output: impl Write,
  ) -> io::Result<()> {
    let mut line = String::new();

    loop {
      write!(
        output,
        "Enter the name of the file to download (or '{}' to quit): ",
        Self::EXIT,
      )?;
      output.flush()?;

      line.clear();

      if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        return Ok(());
      }

      let filename = line.trim_end_matches(['\n', '\r']);

      if filename.trim().eq_ignore_ascii_case(Self::EXIT) {
        return Ok(());
      }

      if filename.trim().is_empty() {
        continue;
      }

      let outcome = runtime.block_on(self.locate(filename));

      writeln!(output, "{outcome}")?;
    }
  }
}

#[cfg(test)]
mod tests {
  use {super::*, directory::Directory, std::io::Cursor};

  async fn peer(root: &Utf8Path, directory: &Address) -> Peer {
    let library = Arc::new(Library::new(root.into()));
    let address = serve(library.clone()).await;
    Peer::new(address, directory.clone(), library)
  }

  #[tokio::test]
  async fn register() {
    let (directory, address) = directory().await;

    let tempdir = tempdir();
    fs::write(tempdir.path_utf8().join("report.txt"), "numbers").unwrap();
    fs::write(tempdir.path_utf8().join("notes.md"), "notes").unwrap();

    let peer = peer(tempdir.path_utf8(), &address).await;

    let inventory = Inventory::scan(tempdir.path_utf8()).unwrap();

    peer.register(&inventory).await.unwrap();

    assert_eq!(directory.nodes(), [(peer.address().clone(), inventory)]);

    assert_eq!(
      directory.find_file("report.txt"),
      [Entry {
        node: peer.address().clone(),
        checksum: Checksum::bytes(b"numbers").to_string(),
      }],
    );

    assert_eq!(
      directory.find_file("notes.md"),
      [Entry {
        node: peer.address().clone(),
        checksum: Checksum::bytes(b"notes").to_string(),
      }],
    );
  }

  #[tokio::test]
  async fn register_directory_unreachable() {
    let tempdir = tempdir();

    let peer = peer(tempdir.path_utf8(), &unused_address()).await;

    assert_matches!(
      peer.register(&Inventory::default()).await.unwrap_err(),
      client::Error::Request { .. },
    );
  }

  #[tokio::test]
  async fn locate_and_fetch() {
    let (_directory, address) = directory().await;

    let a = tempdir();
    fs::write(a.path_utf8().join("report.txt"), "quarterly numbers\n").unwrap();
    let a_peer = peer(a.path_utf8(), &address).await;
    a_peer
      .register(&Inventory::scan(a.path_utf8()).unwrap())
      .await
      .unwrap();

    let b = tempdir();
    let b_peer = peer(b.path_utf8(), &address).await;

    let outcome = b_peer.locate("report.txt").await;

    assert_matches!(
      &outcome,
      Outcome::Downloaded { from, path, .. }
      if from == a_peer.address() && *path == b.path_utf8().join("report.txt"),
    );

    assert_eq!(
      outcome.to_string(),
      format!(
        "File `report.txt` downloaded successfully from {}.",
        a_peer.address()
      ),
    );

    assert_eq!(
      fs::read(b.path_utf8().join("report.txt")).unwrap(),
      fs::read(a.path_utf8().join("report.txt")).unwrap(),
    );
  }

  #[tokio::test]
  async fn locate_missing() {
    let (_directory, address) = directory().await;

    let tempdir = tempdir();

    let outcome = peer(tempdir.path_utf8(), &address)
      .await
      .locate("ghost.txt")
      .await;

    assert_eq!(
      outcome.to_string(),
      "File `ghost.txt` not found in the network."
    );
  }

  #[tokio::test]
  async fn locate_holder_unreachable() {
    let directory = Arc::new(Directory::default());
    let address = serve(directory.clone()).await;

    let holder = unused_address();

    directory.register_node(
      holder.clone(),
      [("report.txt".to_owned(), "sha256:abc".to_owned())]
        .into_iter()
        .collect(),
    );

    let tempdir = tempdir();

    assert_matches!(
      peer(tempdir.path_utf8(), &address)
        .await
        .locate("report.txt")
        .await,
      Outcome::Failed {
        from,
        source: FetchError::Transport { .. },
        ..
      }
      if from == holder,
    );
  }

  #[tokio::test]
  async fn locate_holder_lost_file() {
    let (_directory, address) = directory().await;

    let a = tempdir();
    fs::write(a.path_utf8().join("report.txt"), "numbers").unwrap();
    let a_peer = peer(a.path_utf8(), &address).await;
    a_peer
      .register(&Inventory::scan(a.path_utf8()).unwrap())
      .await
      .unwrap();

    fs::remove_file(a.path_utf8().join("report.txt")).unwrap();

    let b = tempdir();

    assert_matches!(
      peer(b.path_utf8(), &address)
        .await
        .locate("report.txt")
        .await,
      Outcome::Failed {
        source: FetchError::Fault { fault: Fault { code: Fault::NOT_FOUND, .. }, .. },
        ..
      },
    );
  }

  #[tokio::test]
  async fn locate_directory_unreachable() {
    let tempdir = tempdir();

    let directory = unused_address();

    assert_matches!(
      peer(tempdir.path_utf8(), &directory)
        .await
        .locate("report.txt")
        .await,
      Outcome::Unreachable { directory: address, .. }
      if address == directory,
    );
  }

  #[test]
  fn interact() {
    let runtime = Runtime::new().unwrap();

    let a = tempdir();
    fs::write(a.path_utf8().join("report.txt"), "numbers").unwrap();
    let b = tempdir();

    let b_peer = runtime.block_on(async {
      let (_directory, address) = directory().await;

      peer(a.path_utf8(), &address)
        .await
        .register(&Inventory::scan(a.path_utf8()).unwrap())
        .await
        .unwrap();

      peer(b.path_utf8(), &address).await
    });

    let mut output = Vec::new();

    b_peer
      .interact(
        &runtime,
        Cursor::new("report.txt\n\nghost.txt\nEXIT\nlater.txt\n"),
        &mut output,
      )
      .unwrap();

    let output = String::from_utf8(output).unwrap();

    assert_eq!(output.matches("Enter the name of the file").count(), 4);
    assert!(output.contains("File `report.txt` downloaded successfully from"));
    assert!(output.contains("File `ghost.txt` not found in the network."));
    assert!(!output.contains("later.txt"));

    assert_eq!(
      fs::read_to_string(b.path_utf8().join("report.txt")).unwrap(),
      "numbers"
    );
  }

  #[test]
  fn interact_end_of_input() {
    let runtime = Runtime::new().unwrap();

    let tempdir = tempdir();

    let peer = Peer::new(
      Address::new("127.0.0.1", 8002),
      unused_address(),
      Arc::new(Library::new(tempdir.path_utf8().into())),
    );

    let mut output = Vec::new();

    peer
      .interact(&runtime, Cursor::new(""), &mut output)
      .unwrap();

    assert!(String::from_utf8(output).unwrap().ends_with(": \n"));
  }
}
