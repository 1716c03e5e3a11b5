use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum BurnstatsError {
    #[error("core error")]
    Core(#[from] burnstats_core::Error),

    #[error("config error")]
    #[diagnostic(help("run `burnstats config init` to write a default config file"))]
    Config(#[from] burnstats_config::Error),

    #[error("report error")]
    Report(#[from] burnstats_report::Error),

    #[error("io error")]
    Io(#[from] std::io::Error),

    #[error("block {0} is not in the index")]
    #[diagnostic(help("only the most recent blocks are kept"))]
    BlockNotFound(u64),

    #[error("the index holds no blocks")]
    EmptyIndex,

    #[error("nothing was ingested: the bootstrap payload was refused")]
    #[diagnostic(help("pass --expected-version to match the feed's protocol version"))]
    NoSnapshot,
}
