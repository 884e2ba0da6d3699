use super::*;

#[derive(Debug, Parser)]
pub(crate) struct Directory {
  #[arg(
    long,
    default_value = "127.0.0.1:8000",
    help = "Listen on <ADDRESS> for RPC requests."
  )]
  address: Address,
  #[arg(
    long,
    default_value_t = crate::directory::Directory::AUDIT_INTERVAL.as_secs(),
    value_name = "SECONDS",
    value_parser = clap::value_parser!(u64).range(1..),
    help = "Print registered nodes and their files every <SECONDS>."
  )]
  audit_interval: u64,
}

impl Directory {
  pub(crate) fn run(self) -> Result {
    let socket_addr = self.address.resolve().context(error::Resolve {
      address: self.address.clone(),
    })?;

    let directory = Arc::new(crate::directory::Directory::default());

    Runtime::new().context(error::Runtime)?.block_on(async {
      let server = rpc::Server::spawn(directory.clone(), socket_addr)
        .await
        .context(error::Serve {
          address: self.address.clone(),
        })?;

      log::info!("directory running on {}", server.address());

      tokio::select! {
        result = server.join() => result.context(error::Serve {
          address: self.address.clone(),
        }),
        () = directory.audit_loop(Duration::from_secs(self.audit_interval)) => Ok(()),
      }
    })
  }
}
