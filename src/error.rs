use super::*;

#[derive(Debug, Snafu)]
#[snafu(context(suffix(false)), visibility(pub(crate)))]
pub(crate) enum Error {
  #[snafu(display("fetching `{filename}` from {from} failed"))]
  Fetch {
    backtrace: Option<Backtrace>,
    filename: String,
    from: Address,
    source: FetchError,
  },
  #[snafu(display("failed to query directory at {directory}"))]
  Locate {
    backtrace: Option<Backtrace>,
    directory: Address,
    source: client::Error,
  },
  #[snafu(
    display("path contains invalid UTF-8: `{}`", path.display())
  )]
  PathUnicode {
    backtrace: Option<Backtrace>,
    path: PathBuf,
  },
  #[snafu(display("I/O error reading from prompt"))]
  Prompt {
    backtrace: Option<Backtrace>,
    source: io::Error,
  },
  #[snafu(display("failed to register with directory at {directory}"))]
  Register {
    backtrace: Option<Backtrace>,
    directory: Address,
    source: client::Error,
  },
  #[snafu(display("failed to resolve address {address}"))]
  Resolve {
    address: Address,
    backtrace: Option<Backtrace>,
    source: io::Error,
  },
  #[snafu(display("I/O error initializing async runtime"))]
  Runtime {
    backtrace: Option<Backtrace>,
    source: io::Error,
  },
  #[snafu(display("failed to scan directory `{root}`"))]
  Scan {
    backtrace: Option<Backtrace>,
    root: Utf8PathBuf,
    source: walkdir::Error,
  },
  #[snafu(display("I/O error serving on {address}"))]
  Serve {
    address: Address,
    backtrace: Option<Backtrace>,
    source: io::Error,
  },
}
