use clap::Parser;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Personal library catalog served as a local web UI",
    long_about = "Keeps a catalog of books in a local SQLite file and serves forms to add, list, search and delete them."
)]
pub struct Cli {
    #[arg(
        long,
        env = "LIBRARY_DATA_DIR",
        default_value = ".",
        value_name = "DIR",
        help = "Directory holding the catalog database"
    )]
    pub data_dir: PathBuf,

    #[arg(
        long,
        env = "LIBRARY_DB_FILE",
        default_value = "personal_library.db",
        value_name = "NAME",
        help = "Database file name inside the data directory"
    )]
    pub db_file: String,

    #[arg(
        long,
        env = "LIBRARY_LISTEN",
        default_value = "127.0.0.1:8501",
        value_name = "ADDR",
        help = "Web UI listen address (host:port)"
    )]
    pub listen: SocketAddr,

    #[arg(
        long = "log-file",
        env = "LIBRARY_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (in addition to stderr)"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        default_value_t = false,
        help = "Delete the catalog database before starting"
    )]
    pub reset: bool,
}

pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    dotenvy::from_filename(&dotenv_path).ok();

    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_defaults_point_at_local_catalog() {
        let cli = Cli::try_parse_from(["personal-library"]).unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("."));
        assert_eq!(cli.db_file, "personal_library.db");
        assert!(!cli.reset);
    }

    #[test]
    fn cli_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "personal-library",
            "--data-dir",
            "/tmp/lib",
            "--listen",
            "0.0.0.0:9000",
            "--log-file",
            "/tmp/lib/app.log",
            "--reset",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/lib"));
        assert_eq!(cli.listen, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/lib/app.log")));
        assert!(cli.reset);
    }
}
