use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// Posecast backend
#[derive(Debug, Parser)]
#[command(name = "posecast", about = "Character, script, speech and video generation API for AI podcasts")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "posecast.toml", env = "POSECAST_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "POSECAST_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter used when `RUST_LOG` is unset
    #[arg(long, default_value = "info", env = "POSECAST_LOG")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["posecast"]);

        assert_eq!(args.config, PathBuf::from("posecast.toml"));
        assert!(args.listen.is_none());
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn overrides() {
        let args = Args::parse_from([
            "posecast",
            "--config",
            "/etc/posecast.toml",
            "--listen",
            "127.0.0.1:9000",
            "--log-level",
            "debug,tts=trace",
        ]);

        assert_eq!(args.config, PathBuf::from("/etc/posecast.toml"));
        assert_eq!(args.listen, Some("127.0.0.1:9000".parse().unwrap()));
        assert_eq!(args.log_level, "debug,tts=trace");
    }
}
