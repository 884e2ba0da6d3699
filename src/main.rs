#![allow(clippy::result_large_err)]

use {
  self::{
    address::Address,
    checksum::Checksum,
    client::Client,
    directory::Entry,
    error::Error,
    fetch_error::FetchError,
    inventory::Inventory,
    library::Library,
    path_ext::PathExt,
    peer::Peer,
    report::Report,
    rpc::{Fault, Request, Response, Service},
    subcommand::Subcommand,
  },
  camino::{Utf8Component, Utf8Path, Utf8PathBuf},
  clap::Parser,
  libc::EXIT_FAILURE,
  regex::Regex,
  serde::{de::DeserializeOwned, Deserialize, Serialize},
  snafu::{ensure, ErrorCompat, OptionExt, ResultExt, Snafu},
  std::{
    backtrace::{Backtrace, BacktraceStatus},
    collections::{BTreeMap, HashMap},
    fmt::{self, Display, Formatter},
    fs::{self, File},
    io::{self, BufRead, Read, Write},
    net::{SocketAddr, ToSocketAddrs},
    num::ParseIntError,
    path::PathBuf,
    process,
    str::FromStr,
    sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError},
    time::Duration,
  },
  strum::IntoStaticStr,
  tokio::runtime::Runtime,
  walkdir::WalkDir,
};


#[cfg(test)]
use test::*;

mod address;
mod checksum;
mod client;
mod directory;
mod error;
mod fetch_error;
mod inventory;
mod library;
mod path_ext;
mod peer;
mod report;
mod rpc;
mod subcommand;

type Result<T = (), E = Error> = std::result::Result<T, E>;

fn main() {
  env_logger::init();

  if let Err(err) = Subcommand::parse().run() {
    err.report();
    process::exit(EXIT_FAILURE)
  }
}
