//! cryptkit command-line tool
//!
//! Thin front end over the cryptkit library. Input is read from `--input`
//! or stdin; results go to stdout, logs to stderr.
//!
//! Usage:
//!   cryptkit digest --algorithm sha256 --input report.pdf
//!   echo -n secret | cryptkit encrypt --key "$KEY" --iv "$IV"
//!   cryptkit rsa-encrypt --cert recipient.der --input session.key

use anyhow::Context;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use clap::{Args, Parser, Subcommand};
use cryptkit::keys::{load_private_key_file, load_public_key_x509_file};
use cryptkit::{encode_hex, CryptConfig, CryptoEngine, DigestAlgorithm, KeyDerivation};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "cryptkit")]
#[command(about = "Digest, encrypt, sign and encode data from the command line")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hex-encode the input bytes
    Hex(InputArgs),

    /// Print a random uppercase hex string of LENGTH characters
    Random {
        length: usize,
    },

    /// Print the hex digest of the input
    Digest {
        /// md5, sha1, sha224, sha256, sha384, sha512 (default from CRYPTKIT_DEFAULT_DIGEST)
        #[arg(long, short)]
        algorithm: Option<DigestAlgorithm>,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the hex HMAC of the input
    Hmac {
        #[arg(long, short)]
        algorithm: DigestAlgorithm,

        /// HMAC key, used as raw UTF-8 bytes
        #[arg(long, env = "CRYPTKIT_HMAC_KEY", hide_env_values = true)]
        key: String,

        #[command(flatten)]
        input: InputArgs,
    },

    /// AES-256-CBC encrypt; prints base64 ciphertext
    Encrypt(AesArgs),

    /// AES-256-CBC decrypt base64 ciphertext; writes raw plaintext
    Decrypt(AesArgs),

    /// RSA PKCS#1 v1.5 encrypt to the key in a DER certificate; prints base64
    RsaEncrypt {
        /// DER-encoded X.509 certificate of the recipient
        #[arg(long)]
        cert: PathBuf,

        #[command(flatten)]
        input: InputArgs,
    },

    /// RSA PKCS#1 v1.5 decrypt base64 ciphertext; writes raw plaintext
    RsaDecrypt {
        /// Private key (PKCS#8 PEM or DER, or PKCS#1 DER)
        #[arg(long)]
        private_key: PathBuf,

        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Read input from FILE instead of stdin
    #[arg(long, short)]
    input: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct AesArgs {
    /// Key string; materialized into 32 bytes
    #[arg(long, env = "CRYPTKIT_KEY", hide_env_values = true)]
    key: String,

    /// IV string; materialized into 16 bytes
    #[arg(long, env = "CRYPTKIT_IV", hide_env_values = true)]
    iv: String,

    /// zero-padded or hkdf-sha256 (default from CRYPTKIT_KEY_DERIVATION)
    #[arg(long)]
    kdf: Option<KeyDerivation>,

    #[command(flatten)]
    input: InputArgs,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only results
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CryptConfig::from_env().context("invalid CRYPTKIT_* configuration")?;
    run(cli.command, config)
}

fn run(command: Command, mut config: CryptConfig) -> anyhow::Result<()> {
    if let Command::Encrypt(args) | Command::Decrypt(args) = &command {
        if let Some(kdf) = args.kdf {
            config.key_derivation = kdf;
        }
    }
    let engine = CryptoEngine::with_config(config)?;
    debug!(config = ?engine.config(), "engine ready");

    match command {
        Command::Hex(input) => {
            let data = read_input(input.input.as_deref())?;
            print_line(&engine.encode_hex(&data))
        }
        Command::Random { length } => {
            let value = engine.random_string(length)?;
            print_line(&value)
        }
        Command::Digest { algorithm, input } => {
            let data = read_input(input.input.as_deref())?;
            let digest = match algorithm {
                Some(algorithm) => engine.digest(&data, algorithm)?,
                None => engine.digest_default(&data)?,
            };
            print_line(&encode_hex(&digest))
        }
        Command::Hmac {
            algorithm,
            key,
            input,
        } => {
            let data = read_input(input.input.as_deref())?;
            let mac = engine.hmac(&data, &key, algorithm)?;
            print_line(&encode_hex(&mac))
        }
        Command::Encrypt(args) => {
            let data = read_input(args.input.input.as_deref())?;
            let ciphertext = engine
                .encrypt_aes256(&data, &args.key, &args.iv)
                .context("AES encryption failed")?;
            print_line(&BASE64.encode(ciphertext))
        }
        Command::Decrypt(args) => {
            let ciphertext = read_base64_input(args.input.input.as_deref())?;
            let plaintext = engine
                .decrypt_aes256(&ciphertext, &args.key, &args.iv)
                .context("AES decryption failed")?;
            write_raw(&plaintext)
        }
        Command::RsaEncrypt { cert, input } => {
            let public_key = load_public_key_x509_file(&cert)
                .with_context(|| format!("failed to load certificate {}", cert.display()))?;
            let data = read_input(input.input.as_deref())?;
            let ciphertext = engine
                .rsa_encrypt(&data, &public_key)
                .context("RSA encryption failed")?;
            print_line(&BASE64.encode(ciphertext))
        }
        Command::RsaDecrypt { private_key, input } => {
            let key = load_private_key_file(&private_key).with_context(|| {
                format!("failed to load private key {}", private_key.display())
            })?;
            let ciphertext = read_base64_input(input.input.as_deref())?;
            let plaintext = engine
                .rsa_decrypt(&ciphertext, &key)
                .context("RSA decryption failed")?;
            write_raw(&plaintext)
        }
    }
}

fn read_input(path: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn read_base64_input(path: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    let raw = read_input(path)?;
    decode_base64(&raw)
}

fn decode_base64(raw: &[u8]) -> anyhow::Result<Vec<u8>> {
    let text: Vec<u8> = raw
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    BASE64.decode(text).context("input is not valid base64")
}

fn print_line(value: &str) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", value)?;
    Ok(())
}

fn write_raw(bytes: &[u8]) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    out.write_all(bytes)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_digest() {
        let cli = Cli::try_parse_from(["cryptkit", "digest", "-a", "SHA-384", "-i", "x.bin"]).unwrap();
        match cli.command {
            Command::Digest { algorithm, input } => {
                assert_eq!(algorithm, Some(DigestAlgorithm::Sha384));
                assert_eq!(input.input, Some(PathBuf::from("x.bin")));
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["cryptkit", "digest", "-a", "sha3"]).is_err());
    }

    #[test]
    fn test_parse_encrypt_with_kdf() {
        let cli = Cli::try_parse_from([
            "cryptkit", "encrypt", "--key", "k", "--iv", "v", "--kdf", "hkdf-sha256",
        ])
        .unwrap();
        match cli.command {
            Command::Encrypt(args) => {
                assert_eq!(args.key, "k");
                assert_eq!(args.kdf, Some(KeyDerivation::HkdfSha256));
                assert!(args.input.input.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rsa_commands() {
        let cli =
            Cli::try_parse_from(["cryptkit", "rsa-decrypt", "--private-key", "key.pem"]).unwrap();
        assert!(matches!(cli.command, Command::RsaDecrypt { .. }));

        assert!(Cli::try_parse_from(["cryptkit", "rsa-encrypt"]).is_err());
    }

    #[test]
    fn test_decode_base64_ignores_whitespace() {
        assert_eq!(
            decode_base64(b"/0ZzJ/4QLRoB\nas+fcpI9IQ==\n").unwrap(),
            cryptkit::encrypt_aes256(b"hello world", "secret", "iv").unwrap()
        );
        assert!(decode_base64(b"not base64!").is_err());
    }
}
