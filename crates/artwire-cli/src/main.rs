use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use artwire_core::protocols::artnet::paging::paginate_tod;
use artwire_core::{
    AddressError, AddressSummary, ArtNetError, NetworkAddress, Packet, PacketSummary, TodData,
    Uid, encode_datagram, format_hex, parse_datagram, parse_hex,
};
use clap::{Parser, Subcommand};
use glob::glob;
use log::debug;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "artwire")]
#[command(version)]
#[command(
    about = "Art-Net table-of-devices codec and offline capture scanner.",
    long_about = None,
    after_help = "Examples:\n  artwire packet tod --uid 7A70:00000001 --uid 7A70:00000002\n  artwire packet decode tod.bin\n  artwire addr 10.0.0.1\n  artwire pcap scan capture.pcapng -o report.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on PCAP/PCAPNG inputs (offline).
    Pcap {
        #[command(subcommand)]
        command: PcapCommands,
    },
    /// Encode and decode Art-Net packets.
    Packet {
        #[command(subcommand)]
        command: PacketCommands,
    },
    /// Show the text and raw-byte forms of a network address as JSON.
    Addr {
        /// Address text (dotted quad or IPv6), or hex bytes with --bytes
        value: String,

        /// Read VALUE as 4 or 16 raw bytes in hex
        #[arg(long)]
        bytes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum PcapCommands {
    /// Scan a capture for ArtTodData reports and write a JSON report.
    #[command(
        after_help = "Examples:\n  artwire pcap scan capture.pcapng -o report.json\n  artwire pcap scan 'captures/show-*.pcapng' --stdout --pretty"
    )]
    Scan {
        /// Path (or glob pattern) of a .pcap or .pcapng file
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
}

#[derive(Subcommand, Debug)]
enum PacketCommands {
    /// Decode packets and print them as a JSON array.
    Decode {
        /// Input file, or `-` for stdin
        input: PathBuf,

        /// Input is hex text, one packet per line
        #[arg(long)]
        hex: bool,

        /// Input starts with the `Art-Net` identifier
        #[arg(long)]
        datagram: bool,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Build ArtTodData packets for a table of devices.
    #[command(
        after_help = "Examples:\n  artwire packet tod --uid 7A70:00000001 --net 1 --address 0x23\n  artwire packet tod --nak --datagram -o nak.bin"
    )]
    Tod {
        /// UID as MMMM:DDDDDDDD or 12 hex digits (repeatable, order kept)
        #[arg(long = "uid")]
        uids: Vec<String>,

        /// Physical port (1-4)
        #[arg(long, default_value_t = 1)]
        port: u8,

        /// Net (bits 14-8 of the Port-Address)
        #[arg(long, default_value_t = 0, value_parser = parse_u8)]
        net: u8,

        /// Sub-Net and Universe (low byte of the Port-Address)
        #[arg(long, default_value_t = 0, value_parser = parse_u8)]
        address: u8,

        /// Bind index of the reporting node
        #[arg(long, default_value_t = 1)]
        bind: u8,

        /// Send a TodNak instead of a table
        #[arg(long, conflicts_with = "uids")]
        nak: bool,

        /// Prefix every packet with the `Art-Net` identifier
        #[arg(long)]
        datagram: bool,

        /// Write packets as binary to this file instead of hex lines to stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Pcap { command } => match command {
            PcapCommands::Scan {
                input,
                report,
                stdout,
                pretty,
                compact,
                quiet,
            } => cmd_pcap_scan(&input, report.filter(|_| !stdout), pretty && !compact, quiet),
        },
        Commands::Packet { command } => match command {
            PacketCommands::Decode {
                input,
                hex,
                datagram,
                pretty,
            } => cmd_packet_decode(&input, hex, datagram, pretty),
            PacketCommands::Tod {
                uids,
                port,
                net,
                address,
                bind,
                nak,
                datagram,
                output,
            } => cmd_packet_tod(TodArgs {
                uids,
                port,
                net,
                address,
                bind,
                nak,
                datagram,
                output,
            }),
        },
        Commands::Addr { value, bytes } => cmd_addr(&value, bytes),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

impl From<ArtNetError> for CliError {
    fn from(err: ArtNetError) -> Self {
        let hint = match &err {
            ArtNetError::UnknownOpCode { .. } => {
                Some("only OpTodData (0x8100) packets are decoded".to_string())
            }
            ArtNetError::TruncatedBuffer { .. } => {
                Some("an ArtTodData packet needs at least 20 bytes after the identifier".to_string())
            }
            ArtNetError::InvalidEnumValue { .. } => None,
            ArtNetError::TooManyUids { max, .. } => {
                Some(format!("a single packet holds at most {max} UIDs"))
            }
        };
        CliError::new(err.to_string(), hint)
    }
}

impl From<AddressError> for CliError {
    fn from(err: AddressError) -> Self {
        CliError::new(
            err.to_string(),
            Some("IPv4 takes 4 bytes and IPv6 takes 16".to_string()),
        )
    }
}

fn cmd_addr(value: &str, bytes: bool) -> Result<(), CliError> {
    let address = if bytes {
        let raw = parse_hex(value).ok_or_else(|| {
            CliError::new(
                format!("invalid hex bytes '{value}'"),
                Some("write bytes as hex digits, e.g. 0a000001".to_string()),
            )
        })?;
        NetworkAddress::from_raw_bytes(&raw)?
    } else {
        NetworkAddress::from_text(value).ok_or_else(|| {
            CliError::new(
                format!("invalid address '{value}'"),
                Some("use a dotted quad (10.0.0.1) or an IPv6 address (fe80::1)".to_string()),
            )
        })?
    };
    println!("{}", to_json(&AddressSummary::from_address(&address), false)?);
    Ok(())
}

fn cmd_packet_decode(input: &Path, hex: bool, datagram: bool, pretty: bool) -> Result<(), CliError> {
    let raw = read_input(input)?;
    let buffers = if hex {
        let text = String::from_utf8(raw).context("hex input is not UTF-8 text")?;
        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                parse_hex(line).ok_or_else(|| {
                    CliError::new(
                        format!("invalid hex on line {}", index + 1),
                        Some("write one packet per line as hex digits".to_string()),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?
    } else {
        vec![raw]
    };

    let mut summaries = Vec::with_capacity(buffers.len());
    for buffer in &buffers {
        let packet = decode_buffer(buffer, datagram)?;
        summaries.push(PacketSummary::from_packet(&packet));
    }
    debug!("decoded {} packet(s)", summaries.len());
    println!("{}", to_json(&summaries, pretty)?);
    Ok(())
}

fn decode_buffer(buffer: &[u8], datagram: bool) -> Result<Packet, CliError> {
    if !datagram {
        return Ok(Packet::decode(buffer)?);
    }
    parse_datagram(buffer)?.ok_or_else(|| {
        CliError::new(
            "input does not start with the Art-Net identifier",
            Some("drop --datagram to decode an opcode-first envelope".to_string()),
        )
    })
}

struct TodArgs {
    uids: Vec<String>,
    port: u8,
    net: u8,
    address: u8,
    bind: u8,
    nak: bool,
    datagram: bool,
    output: Option<PathBuf>,
}

fn cmd_packet_tod(args: TodArgs) -> Result<(), CliError> {
    let uids = args
        .uids
        .iter()
        .map(|text| {
            text.parse::<Uid>().map_err(|err| {
                CliError::new(
                    err.to_string(),
                    Some("use MMMM:DDDDDDDD or 12 hex digits".to_string()),
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let template = TodData::builder()
        .port(args.port)
        .net(args.net)
        .address(args.address)
        .binding_index(args.bind)
        .build()?;
    let packets = if args.nak {
        vec![template.to_builder().nak().build()?]
    } else {
        paginate_tod(&template, &uids)?
    };

    let encoded: Vec<Vec<u8>> = packets
        .into_iter()
        .map(|tod| {
            let packet = Packet::from(tod);
            if args.datagram {
                encode_datagram(&packet)
            } else {
                packet.encode()
            }
        })
        .collect();

    match args.output {
        Some(path) => {
            write_output(&path, &encoded.concat())?;
            eprintln!("OK: {} packet(s) written -> {}", encoded.len(), path.display());
        }
        None => {
            for bytes in &encoded {
                println!("{}", format_hex(bytes));
            }
        }
    }
    Ok(())
}

fn cmd_pcap_scan(
    input: &Path,
    report: Option<PathBuf>,
    pretty: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let input = resolve_input_path(input)?;
    validate_input_file(&input)?;
    if let Some(report_path) = report.as_deref() {
        ensure_distinct_output(report_path, &input)?;
    }

    debug!("scanning {}", input.display());
    let rep = artwire_core::scan_capture_file(&input).context("capture scan failed")?;
    let json = to_json(&rep, pretty)?;

    match report {
        None => print!("{}", json),
        Some(report) => {
            write_output(&report, json.as_bytes())?;
            if !quiet {
                eprintln!(
                    "OK: {} node(s), {} issue(s) -> {}",
                    rep.nodes.len(),
                    rep.issues.len(),
                    report.display()
                );
            }
        }
    }
    Ok(())
}

/// Refuse to overwrite the capture being scanned.
fn ensure_distinct_output(report_path: &Path, input: &Path) -> Result<(), CliError> {
    if !report_path.exists() {
        return Ok(());
    }
    let same = fs::canonicalize(report_path).context("Failed to resolve output path")?
        == fs::canonicalize(input).context("Failed to resolve input path")?;
    if same {
        return Err(CliError::new(
            format!("report path must differ from input: {}", report_path.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, CliError> {
    if pretty {
        serde_json::to_string_pretty(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn read_input(input: &Path) -> Result<Vec<u8>, CliError> {
    if input.as_os_str() == "-" {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read stdin")?;
        return Ok(buffer);
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a packet file, or `-` to read stdin".to_string()),
        ));
    }
    Ok(fs::read(input).with_context(|| format!("Failed to read input file: {}", input.display()))?)
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(path, bytes).with_context(|| format!("Failed to write output: {}", path.display()))?;
    Ok(())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.is_file() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .pcap or .pcapng file".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    if !matches!(ext.as_deref(), Some("pcap" | "pcapng")) {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .pcap or .pcapng file".to_string()),
        ));
    }
    Ok(())
}

/// Expand a glob pattern to the single capture it names.
fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !pattern.contains(['*', '?', '[']) {
        return Ok(input.to_path_buf());
    }

    let mut matches: Vec<PathBuf> = glob(&pattern)
        .map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{pattern}'"),
                Some(format!("pattern error: {}", err.msg)),
            )
        })?
        .filter_map(Result::ok)
        .filter(|path| path.is_file())
        .collect();

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{pattern}'"),
            Some("check the path or quote the pattern".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        count => Err(CliError::new(
            format!("multiple files match pattern '{pattern}' ({count} matches)"),
            Some("pass a single capture file, or run once per file".to_string()),
        )),
    }
}

/// Decimal or `0x`-prefixed hex byte.
fn parse_u8(text: &str) -> Result<u8, String> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => text.parse::<u8>(),
    };
    parsed.map_err(|err| format!("'{text}' is not a byte value: {err}"))
}
