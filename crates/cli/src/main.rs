//! `peer-sdp`: inspect and rewrite WebRTC SDP from the command line

mod config;
mod logging;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use peer_sdp_core::lines::split_lines;
use peer_sdp_core::{
    Codec, DataChannelSection, LineTerminator, LocalCandidatePolicy, MediaKind, SdpConfig,
    SdpContent, SessionDescription,
};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "peer-sdp", version, about = "Inspect and rewrite WebRTC session descriptions")]
struct Cli {
    /// Log level (RUST_LOG directives are applied on top)
    #[arg(long, global = true, default_value = "info", env = "PEER_SDP_LOG_LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse an offer and print the rebuilt SDP
    Rewrite(RewriteArgs),
    /// Print media sections, payload types and SSRCs as JSON
    Inspect(InputArgs),
    /// Print a data-channel answer section
    Datachannel(DataChannelArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// SDP file to read; stdin when omitted
    file: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RewriteArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Replace mDNS hostnames in local candidates with IPv4 addresses
    #[arg(long)]
    mdns: bool,

    /// Keep local candidates unchanged when mDNS rewriting is off
    #[arg(long)]
    keep_local_candidates: bool,

    /// Terminate lines with an escaped \r\n instead of CRLF
    #[arg(long)]
    escaped: bool,
}

#[derive(Args, Debug)]
struct DataChannelArgs {
    /// ICE username fragment
    #[arg(long)]
    ufrag: String,

    /// ICE password
    #[arg(long)]
    pwd: String,

    /// SHA-256 certificate fingerprint
    #[arg(long)]
    fingerprint: String,

    /// Media identifier
    #[arg(long, default_value_t = 0)]
    mid: u32,

    /// Port on the m=application line
    #[arg(long)]
    port: Option<u16>,

    /// Terminate lines with CRLF instead of an escaped \r\n
    #[arg(long)]
    crlf: bool,
}

#[derive(Serialize)]
struct PayloadTypeReport {
    h264: u32,
    pcma: u32,
    opus: u32,
}

#[derive(Serialize)]
struct Report<'a> {
    media_sections: &'a [MediaKind],
    payload_types: PayloadTypeReport,
    audio_ssrc: u32,
    video_ssrc: u32,
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read SDP from {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read SDP from stdin")?;
            Ok(text)
        }
    }
}

fn load_config(input: &InputArgs) -> Result<SdpConfig> {
    match &input.config {
        Some(path) => config::load(path),
        None => Ok(SdpConfig::default()),
    }
}

/// Files saved on Unix often use bare LF; SDP requires CRLF
fn normalize_line_endings(text: &str) -> String {
    if text.contains("\r\n") {
        text.to_string()
    } else {
        text.replace('\n', "\r\n")
    }
}

fn rewrite(args: &RewriteArgs) -> Result<String> {
    let mut config = load_config(&args.input)?;
    if args.mdns {
        config = config.with_mdns(true);
    }
    if args.keep_local_candidates {
        config = config.with_local_candidate_policy(LocalCandidatePolicy::PassThrough);
    }

    let text = normalize_line_endings(&read_input(args.input.file.as_ref())?);
    let sdp = SessionDescription::parse(&text, config.clone()).context("Failed to parse SDP")?;
    info!(
        media_sections = sdp.media_section_count(),
        bytes = sdp.content().len(),
        "Rebuilt session description"
    );

    if !args.escaped {
        return Ok(sdp.into_content());
    }

    let lines = split_lines(sdp.content(), config.max_lines);
    let mut escaped = SdpContent::new(escaped_capacity(sdp.content().len(), lines.len()), config.max_line_len);
    for line in lines {
        escaped.append(line, LineTerminator::Escaped)?;
    }
    Ok(escaped.into_string())
}

/// Size of `len` bytes of CRLF-terminated text once every terminator is escaped
fn escaped_capacity(len: usize, line_count: usize) -> usize {
    let growth = LineTerminator::Escaped.as_str().len() - LineTerminator::Crlf.as_str().len();
    len + line_count * growth
}

fn inspect(args: &InputArgs) -> Result<String> {
    let config = load_config(args)?;
    let text = normalize_line_endings(&read_input(args.file.as_ref())?);
    let sdp = SessionDescription::parse(&text, config).context("Failed to parse SDP")?;

    let pts = sdp.payload_types();
    let report = Report {
        media_sections: sdp.media_sections(),
        payload_types: PayloadTypeReport {
            h264: pts.payload_type(Codec::H264),
            pcma: pts.payload_type(Codec::Pcma),
            opus: pts.payload_type(Codec::Opus),
        },
        audio_ssrc: sdp.ssrc(MediaKind::Audio),
        video_ssrc: sdp.ssrc(MediaKind::Video),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn datachannel(args: &DataChannelArgs) -> Result<String> {
    let mut section = DataChannelSection::new(args.mid, &args.ufrag, &args.pwd, &args.fingerprint);
    if let Some(port) = args.port {
        section = section.with_port(port);
    }
    debug!(?section, "Building data channel section");

    let mut answer = SessionDescription::new(SdpConfig::default())?;
    if args.crlf {
        answer.add_section(&section, LineTerminator::Crlf)?;
    } else {
        answer.add_data_channel(&section)?;
    }
    Ok(answer.into_content())
}

fn run(cli: &Cli) -> Result<String> {
    match &cli.command {
        Command::Rewrite(args) => rewrite(args),
        Command::Inspect(args) => inspect(args),
        Command::Datachannel(args) => datachannel(args),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(logging::parse_log_level(&cli.log_level)?)?;

    let output = run(&cli)?;
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
