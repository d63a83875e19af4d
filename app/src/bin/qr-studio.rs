//! CLI binary: generate a QR design block and write its downloads.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use copy_client::CopyClient;
use design_block::Purpose;
use qr_engine::policy::MIN_COMFORTABLE_CONTRAST;
use qr_engine::{BrandColorPair, ColorInput, QrStyle, Rgb, contrast_ratio_hex};
use tracing::{info, warn};

use qr_studio_lib::bootstrap;
use qr_studio_lib::{ExportFormat, GenerateRequest, Session, write_exports};

const DEFAULT_PRIMARY: Rgb = Rgb::new(0x00, 0x00, 0x00);
const DEFAULT_SECONDARY: Rgb = Rgb::new(0x4f, 0x46, 0xe5);

/// Turn a URL into a print-ready QR design block.
#[derive(Parser, Debug)]
#[command(name = "qr-studio", version, about, arg_required_else_help = true)]
struct Cli {
    /// Destination URL; bare domains get https:// prepended.
    #[arg(long)]
    url: String,

    /// What the QR code is for (label or slug, e.g. "menu", "Reviews").
    #[arg(long, value_parser = parse_purpose)]
    purpose: Option<Purpose>,

    /// Extra instruction for the copywriter, e.g. a phone number to mention.
    #[arg(long)]
    instruction: Option<String>,

    /// Logo image (PNG or JPEG) placed in the center of the code.
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Primary brand color.
    #[arg(long, default_value = "#000000")]
    color: String,

    /// Second gradient stop.
    #[arg(long, default_value = "#4f46e5")]
    color2: String,

    /// Paint a vertical gradient from --color to --color2.
    #[arg(long)]
    gradient: bool,

    /// QR corner style: square or rounded.
    #[arg(long, default_value = "square")]
    style: String,

    /// Output directory (defaults to QR_OUTPUT_DIR, then the download folder).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Comma-separated downloads to write.
    #[arg(long, value_delimiter = ',', default_value = "png,svg,pdf,qr")]
    format: Vec<ExportFormat>,

    /// Debug-level logging unless RUST_LOG is set.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_purpose(s: &str) -> Result<Purpose, String> {
    Purpose::from_label(s).ok_or_else(|| {
        let known: Vec<_> = Purpose::ALL.iter().map(|p| p.slug()).collect();
        format!("unknown purpose '{s}' (expected one of: {})", known.join(", "))
    })
}

/// Feed a flag into a color field; text that is not a hex color leaves the
/// default in effect.
fn color_field(flag: &str, default: Rgb, text: &str) -> ColorInput {
    let mut field = ColorInput::new(default);
    field.set_text(text);
    if !field.text_applied() {
        warn!(flag, text, using = %field.value(), "Ignoring color that is not #RRGGBB");
    }
    field
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    bootstrap::init_tracing(cli.verbose);
    let config = bootstrap::init_config()?;

    let primary = color_field("color", DEFAULT_PRIMARY, &cli.color);
    let colors = if cli.gradient {
        let secondary = color_field("color2", DEFAULT_SECONDARY, &cli.color2);
        BrandColorPair::gradient(primary.value(), secondary.value())
    } else {
        BrandColorPair::solid(primary.value())
    };
    // Unparseable text reports maximum contrast and so never warns here.
    let ratio = contrast_ratio_hex(primary.text(), &Rgb::WHITE.to_hex());
    if ratio < MIN_COMFORTABLE_CONTRAST {
        warn!(ratio, "Low contrast against white, scanning may be unreliable");
    }

    let logo = match &cli.logo {
        Some(path) => Some(std::fs::read(path).with_context(|| format!("reading {}", path.display()))?),
        None => None,
    };

    let fonts = config.load_fonts().context("loading fonts")?;
    let client = CopyClient::new(config.copy_service_config())?;
    let session = Session::new(client, fonts);

    let request = GenerateRequest {
        destination: cli.url,
        purpose: cli.purpose,
        instruction: cli.instruction,
        colors,
        style: QrStyle::parse(&cli.style),
        logo,
    };
    let design = session.generate(request).await?;
    let preview = session
        .preview()
        .await
        .context("QR preview missing after generation")?;

    let out = cli.out.unwrap_or_else(|| config.output_dir.clone());
    let written = write_exports(&out, &design, &preview, &cli.format)?;
    for path in &written {
        println!("{}", path.display());
    }
    info!(files = written.len(), dir = %out.display(), "Done");
    Ok(())
}
