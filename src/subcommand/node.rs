use super::*;

#[derive(Debug, Parser)]
pub(crate) struct Node {
  #[arg(
    long,
    default_value = "127.0.0.1:8002",
    help = "Serve files to other nodes on <ADDRESS>, and register it with the directory."
  )]
  address: Address,
  #[arg(
    long,
    default_value = "127.0.0.1:8000",
    help = "Register with and query the directory at <DIRECTORY>."
  )]
  directory: Address,
  #[arg(long, default_value = ".", help = "Share files in and download files to <ROOT>.")]
  root: Utf8PathBuf,
}

impl Node {
  pub(crate) fn run(self) -> Result {
    let library = Arc::new(Library::new(self.root.clone()));

    log::info!("scanning `{}`", self.root);

    let inventory = library.scan()?;

    let socket_addr = self.address.resolve().context(error::Resolve {
      address: self.address.clone(),
    })?;

    let runtime = Runtime::new().context(error::Runtime)?;

    let server = runtime
      .block_on(rpc::Server::spawn(library.clone(), socket_addr))
      .context(error::Serve {
        address: self.address.clone(),
      })?;

    let peer = Peer::new(
      Address::new(self.address.host.clone(), server.address().port()),
      self.directory.clone(),
      library,
    );

    runtime
      .block_on(peer.register(&inventory))
      .context(error::Register {
        directory: self.directory.clone(),
      })?;

    println!("Node running on {}", peer.address());

    peer
      .interact(&runtime, io::stdin().lock(), io::stdout())
      .context(error::Prompt)?;

    Ok(())
  }
}
