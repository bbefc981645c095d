use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use scour::{cipher, DestructionReport, OverwritePass, SystemQuery};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "scour")]
#[command(about = "Secure file destruction and data protection toolkit")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Skip the confirmation prompt before destructive operations
    #[arg(short = 'y', long, global = true)]
    yes: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Securely destroy a file or directory tree: three overwrite passes
    /// (random, fixed byte, memory-mapped random) per file, then unlink
    Destroy {
        /// Target file or directory
        path: PathBuf,

        /// Print the destruction report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a file or directory tree WITHOUT overwriting (insecure: the
    /// content stays recoverable on the medium)
    Delete {
        /// Target file or directory
        path: PathBuf,

        /// Print the destruction report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Overwrite a file in place with random bytes; the file is kept
    Shred {
        /// Target file
        path: PathBuf,

        /// Number of overwrite iterations
        #[arg(short, long, default_value_t = 1)]
        passes: u32,
    },

    /// Overwrite a file in place through a memory mapping, flushed
    /// synchronously to the medium; the file is kept
    Wipe {
        /// Target file
        path: PathBuf,

        /// Number of overwrite iterations
        #[arg(short, long, default_value_t = 1)]
        passes: u32,
    },

    /// Overwrite random single bytes of a file in place (very slow; at
    /// intensity 1.0 roughly 63% of the file is touched)
    Burn {
        /// Target file
        path: PathBuf,

        /// Write count as a fraction of the file length
        #[arg(short, long, default_value_t = 1.0)]
        intensity: f64,
    },

    /// Encrypt a file under a 16-byte key (AES-128)
    Encrypt {
        /// File to encrypt
        source: PathBuf,

        /// Where to write the ciphertext
        destination: PathBuf,

        /// 16-byte key
        #[arg(short, long)]
        key: String,
    },

    /// Decrypt a file produced by `encrypt`
    Decrypt {
        /// File to decrypt
        source: PathBuf,

        /// Where to write the plaintext
        destination: PathBuf,

        /// 16-byte key
        #[arg(short, long)]
        key: String,
    },

    /// Encrypt a string and print the ciphertext as hex
    EncryptText {
        /// Text to encrypt
        text: String,

        /// 16-byte key
        #[arg(short, long)]
        key: String,
    },

    /// Decrypt hex ciphertext from `encrypt-text` back to a string
    DecryptText {
        /// Hex-encoded ciphertext
        ciphertext: String,

        /// 16-byte key
        #[arg(short, long)]
        key: String,
    },

    /// Print the hardware identity fingerprint (SHA-256 over machine
    /// serial numbers, hex-encoded)
    Hwid {
        /// Mix in the MAC address (not recommended: it changes with the
        /// active network interface)
        #[arg(long)]
        include_mac: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match cli.command {
        Commands::Destroy { path, json } => {
            confirm_or_bail(cli.yes, &path, "securely destroy")?;
            let report = scour::secure_delete(&path);
            emit_report(&report, json)
        }

        Commands::Delete { path, json } => {
            confirm_or_bail(cli.yes, &path, "delete (without overwriting)")?;
            let report = scour::delete(&path);
            emit_report(&report, json)
        }

        Commands::Shred { path, passes } => {
            confirm_or_bail(cli.yes, &path, "overwrite")?;
            let written = OverwritePass::Random { iterations: passes }.apply(&path)?;
            println!("{} bytes overwritten in {}", written, path.display());
            Ok(())
        }

        Commands::Wipe { path, passes } => {
            confirm_or_bail(cli.yes, &path, "overwrite")?;
            let written = OverwritePass::MappedRandom { iterations: passes }.apply(&path)?;
            println!("{} bytes overwritten in {}", written, path.display());
            Ok(())
        }

        Commands::Burn { path, intensity } => {
            confirm_or_bail(cli.yes, &path, "overwrite")?;
            let writes = OverwritePass::PointBurn { intensity }.apply(&path)?;
            println!("{} single-byte writes in {}", writes, path.display());
            Ok(())
        }

        Commands::Encrypt {
            source,
            destination,
            key,
        } => {
            cipher::encrypt_file(&source, parse_key(&key)?, &destination)?;
            println!("encrypted {} -> {}", source.display(), destination.display());
            Ok(())
        }

        Commands::Decrypt {
            source,
            destination,
            key,
        } => {
            cipher::decrypt_file(&source, parse_key(&key)?, &destination)?;
            println!("decrypted {} -> {}", source.display(), destination.display());
            Ok(())
        }

        Commands::EncryptText { text, key } => {
            let ciphertext = cipher::encrypt_str(&text, parse_key(&key)?)?;
            println!("{}", hex::encode(ciphertext));
            Ok(())
        }

        Commands::DecryptText { ciphertext, key } => {
            let bytes = hex::decode(ciphertext.trim())
                .context("ciphertext must be hex, as printed by encrypt-text")?;
            println!("{}", cipher::decrypt_str(&bytes, parse_key(&key)?)?);
            Ok(())
        }

        Commands::Hwid { include_mac } => {
            println!("{}", scour::fingerprint_hex(&SystemQuery, include_mac));
            Ok(())
        }
    }
}

fn parse_key(key: &str) -> Result<&[u8]> {
    let bytes = key.as_bytes();
    if bytes.len() != cipher::KEY_LEN {
        bail!(
            "key must be exactly {} bytes, got {}",
            cipher::KEY_LEN,
            bytes.len()
        );
    }
    Ok(bytes)
}

fn confirm_or_bail(assume_yes: bool, path: &Path, action: &str) -> Result<()> {
    if assume_yes {
        return Ok(());
    }

    print!(
        "About to {} {}; this cannot be undone. Continue? [y/N] ",
        action,
        path.display()
    );
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    if !matches!(line.trim(), "y" | "Y" | "yes" | "YES") {
        bail!("aborted");
    }
    Ok(())
}

fn emit_report(report: &DestructionReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!(
            "{} file(s) destroyed, {} director(ies) removed, {} byte(s) overwritten",
            report.files_destroyed, report.directories_removed, report.bytes_overwritten
        );
        for failure in &report.failures {
            eprintln!(
                "failed ({:?}) on {}: {}",
                failure.stage,
                failure.path.display(),
                failure.message
            );
        }
    }

    if !report.fully_destroyed() {
        bail!("destruction incomplete: {} failure(s)", report.failures.len());
    }
    Ok(())
}
