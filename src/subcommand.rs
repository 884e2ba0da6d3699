use {
  super::*,
  clap::builder::{
    styling::{AnsiColor, Effects},
    Styles,
  },
};

mod directory;
mod fetch;
mod locate;
mod node;

#[derive(Debug, Parser)]
#[command(
  version,
  styles = Styles::styled()
    .header(AnsiColor::Green.on_default() | Effects::BOLD)
    .usage(AnsiColor::Green.on_default() | Effects::BOLD)
    .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
    .placeholder(AnsiColor::Cyan.on_default()))
]
pub(crate) enum Subcommand {
  #[command(about = "Run the directory that tracks which node holds which file")]
  Directory(directory::Directory),
  #[command(about = "Download a file from a known node")]
  Fetch(fetch::Fetch),
  #[command(about = "List every node registered as holding a file")]
  Locate(locate::Locate),
  #[command(about = "Share a directory and download files from the network")]
  Node(node::Node),
}

impl Subcommand {
  pub(crate) fn run(self) -> Result {
    match self {
      Self::Directory(directory) => directory.run(),
      Self::Fetch(fetch) => fetch.run(),
      Self::Locate(locate) => locate.run(),
      Self::Node(node) => node.run(),
    }
  }
}
