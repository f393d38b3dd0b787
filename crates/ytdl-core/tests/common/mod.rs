#![allow(dead_code)]

pub mod stub_ytdlp;

use std::net::TcpListener;
use ytdl_core::config::YtdlConfig;

/// Config pointing yt-dlp and ffmpeg at the stub and the network probe at `probe`.
pub fn stub_config(probe: &TcpListener) -> YtdlConfig {
    let stub = stub_ytdlp::stub_path();
    YtdlConfig {
        ytdlp_bin: stub.clone(),
        ffmpeg_bin: Some(stub),
        network_probe_addr: probe.local_addr().unwrap().to_string(),
        network_probe_timeout_secs: 2,
        ..YtdlConfig::default()
    }
}

/// Local listener standing in for the network probe target.
pub fn probe_listener() -> TcpListener {
    TcpListener::bind("127.0.0.1:0").unwrap()
}
