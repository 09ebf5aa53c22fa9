use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Context {
    pub data_dir: PathBuf,
    pub db_file: String,
    pub listen: SocketAddr,
    pub log_file: Option<PathBuf>,
    pub reset: bool,
}

impl Context {
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        Self {
            data_dir: cli.data_dir.clone(),
            db_file: cli.db_file.clone(),
            listen: cli.listen,
            log_file: cli.log_file.clone(),
            reset: cli.reset,
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file)
    }
}
