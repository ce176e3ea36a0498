#![allow(dead_code)]

pub mod fixture_server;

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::process::{Command, Output};

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use serde_json::json;
use tempfile::TempDir;

pub use fixture_server::FixtureServer;

const PROXY_VARS: &[&str] = &[
    "HTTP_PROXY",
    "http_proxy",
    "HTTPS_PROXY",
    "https_proxy",
    "ALL_PROXY",
    "all_proxy",
];

/// Helper struct to run pokedex commands against an isolated config directory
pub struct PokedexTest {
    pub temp_dir: TempDir,
    api_url: Option<String>,
    artwork_url: Option<String>,
}

impl PokedexTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        PokedexTest {
            temp_dir,
            api_url: None,
            artwork_url: None,
        }
    }

    /// Point the catalog API and artwork URLs at a fixture server
    pub fn with_server(server: &FixtureServer) -> Self {
        let mut test = Self::new();
        test.api_url = Some(server.url("/api/v2"));
        test.artwork_url = Some(server.url("/art"));
        test
    }

    pub fn config_dir(&self) -> PathBuf {
        self.temp_dir.path().join("config")
    }

    pub fn run(&self, args: &[&str]) -> Output {
        let mut command = Command::new(env!("CARGO_BIN_EXE_pokedex"));
        command
            .args(args)
            .current_dir(self.temp_dir.path())
            .env("POKEDEX_CONFIG_DIR", self.config_dir())
            .env_remove("POKEDEX_API_URL")
            .env_remove("POKEDEX_ARTWORK_URL")
            .env_remove("RUST_LOG");
        for var in PROXY_VARS {
            command.env_remove(var);
        }
        if let Some(url) = &self.api_url {
            command.env("POKEDEX_API_URL", url);
        }
        if let Some(url) = &self.artwork_url {
            command.env("POKEDEX_ARTWORK_URL", url);
        }
        command.output().expect("Failed to execute pokedex command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let stdout = self.run_success(args);
        serde_json::from_str(&stdout)
            .unwrap_or_else(|e| panic!("Invalid JSON from {args:?}: {e}\n{stdout}"))
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn read_config(&self) -> String {
        fs::read_to_string(self.config_dir().join("config.yaml"))
            .expect("Failed to read config file")
    }

    pub fn write_file(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, content).expect("Failed to write file");
        path
    }
}

/// Listing page body. `entries` are `(name, number)` pairs.
pub fn page_json(server: &FixtureServer, count: usize, entries: &[(&str, u32)]) -> String {
    let results: Vec<_> = entries
        .iter()
        .map(|(name, number)| {
            json!({
                "name": name,
                "url": server.url(&format!("/api/v2/pokemon/{number}/")),
            })
        })
        .collect();
    json!({
        "count": count,
        "next": null,
        "previous": null,
        "results": results,
    })
    .to_string()
}

pub fn detail_json(id: u32, name: &str, kind: &str) -> String {
    json!({
        "id": id,
        "name": name,
        "height": 4,
        "weight": 60,
        "base_experience": 112,
        "types": [{ "slot": 1, "type": { "name": kind, "url": "" } }],
        "stats": [
            { "base_stat": 35, "stat": { "name": "hp", "url": "" } },
            { "base_stat": 90, "stat": { "name": "speed", "url": "" } }
        ],
    })
    .to_string()
}

/// A small PNG filled with one color
pub fn solid_png(color: [u8; 4]) -> Vec<u8> {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(16, 16, Rgba(color)));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("Failed to encode PNG");
    bytes
}
